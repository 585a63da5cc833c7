//! Delta types produced by the comparison.
//!
//! Deltas borrow the records and values they describe; nothing is copied
//! while comparing.

use crate::{ColumnId, DataSchema, Record, Value};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Change on a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldChange {
    /// Same value, or null on both sides
    Unchanged,
    /// Null or absent before, has a value now
    Added,
    /// Value differs
    Updated,
    /// Had a value, null or absent now
    Deleted,
}

impl FieldChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldChange::Unchanged => "unchanged",
            FieldChange::Added => "added",
            FieldChange::Updated => "updated",
            FieldChange::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for FieldChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Change on a whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordChange {
    /// Present on both sides with no field changes
    Unchanged,
    /// Only in the new set
    Added,
    /// Present on both sides with at least one field change
    Modified,
    /// Only in the old set
    Deleted,
}

impl RecordChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordChange::Unchanged => "unchanged",
            RecordChange::Added => "added",
            RecordChange::Modified => "modified",
            RecordChange::Deleted => "deleted",
        }
    }
}

impl std::fmt::Display for RecordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delta on one column of a record pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDelta<'a> {
    pub column_id: ColumnId,
    pub change: FieldChange,
    /// Value before; `None` when the column was absent
    pub old_value: Option<&'a Value>,
    /// Value after; `None` when the column is absent
    pub new_value: Option<&'a Value>,
}

/// Delta on one position of a record set.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDelta<'a> {
    /// Position in the compared sets
    pub index: usize,
    pub change: RecordChange,
    /// `None` if added
    pub old_record: Option<&'a Record>,
    /// `None` if deleted
    pub new_record: Option<&'a Record>,
    /// One entry per column present on either side; empty unless both
    /// records exist
    pub field_deltas: Vec<FieldDelta<'a>>,
}

impl<'a> RecordDelta<'a> {
    pub fn has_changes(&self) -> bool {
        self.change != RecordChange::Unchanged
    }

    /// Columns with any change.
    pub fn changed_fields(&self) -> Vec<&str> {
        self.fields_where(|c| c != FieldChange::Unchanged)
    }

    pub fn added_fields(&self) -> Vec<&str> {
        self.fields_where(|c| c == FieldChange::Added)
    }

    pub fn updated_fields(&self) -> Vec<&str> {
        self.fields_where(|c| c == FieldChange::Updated)
    }

    pub fn deleted_fields(&self) -> Vec<&str> {
        self.fields_where(|c| c == FieldChange::Deleted)
    }

    /// Delta for a column, if the column was compared.
    pub fn field_delta(&self, column_id: &str) -> Option<&FieldDelta<'a>> {
        self.field_deltas.iter().find(|fd| fd.column_id == column_id)
    }

    fn fields_where(&self, keep: impl Fn(FieldChange) -> bool) -> Vec<&str> {
        self.field_deltas
            .iter()
            .filter(|fd| keep(fd.change))
            .map(|fd| fd.column_id.as_str())
            .collect()
    }
}

/// Counts of each record change in a set delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaSummary {
    pub added: usize,
    pub modified: usize,
    pub deleted: usize,
    pub unchanged: usize,
    pub total: usize,
}

impl std::fmt::Display for DeltaSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "added={} modified={} deleted={} unchanged={} total={}",
            self.added, self.modified, self.deleted, self.unchanged, self.total
        )
    }
}

/// Positional delta between two record sets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSetDelta<'a> {
    /// Schema of the new set, else of the old set
    #[serde(skip)]
    pub schema: Option<Arc<DataSchema>>,
    /// One entry per position, in order
    pub record_deltas: Vec<RecordDelta<'a>>,
}

impl<'a> RecordSetDelta<'a> {
    pub fn has_changes(&self) -> bool {
        self.record_deltas.iter().any(RecordDelta::has_changes)
    }

    pub fn added_records(&self) -> Vec<&RecordDelta<'a>> {
        self.records_where(RecordChange::Added)
    }

    pub fn modified_records(&self) -> Vec<&RecordDelta<'a>> {
        self.records_where(RecordChange::Modified)
    }

    pub fn deleted_records(&self) -> Vec<&RecordDelta<'a>> {
        self.records_where(RecordChange::Deleted)
    }

    pub fn unchanged_records(&self) -> Vec<&RecordDelta<'a>> {
        self.records_where(RecordChange::Unchanged)
    }

    /// Delta at an original position.
    pub fn get(&self, index: usize) -> Option<&RecordDelta<'a>> {
        self.record_deltas.iter().find(|rd| rd.index == index)
    }

    pub fn len(&self) -> usize {
        self.record_deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.record_deltas.is_empty()
    }

    pub fn summary(&self) -> DeltaSummary {
        self.record_deltas.iter().fold(
            DeltaSummary {
                total: self.record_deltas.len(),
                ..DeltaSummary::default()
            },
            |mut summary, rd| {
                match rd.change {
                    RecordChange::Added => summary.added += 1,
                    RecordChange::Modified => summary.modified += 1,
                    RecordChange::Deleted => summary.deleted += 1,
                    RecordChange::Unchanged => summary.unchanged += 1,
                }
                summary
            },
        )
    }

    fn records_where(&self, change: RecordChange) -> Vec<&RecordDelta<'a>> {
        self.record_deltas
            .iter()
            .filter(|rd| rd.change == change)
            .collect()
    }
}
