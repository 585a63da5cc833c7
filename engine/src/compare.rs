//! Structural comparison of records and record sets.
//!
//! Every function here is total: absent or null inputs, type mismatches and
//! malformed array elements all map to a defined result and never to an
//! error. A mismatch always degrades to "changed".
//!
//! # Algorithm
//!
//! 1. Record sets are walked by position, `0..max(old.len(), new.len())`
//! 2. Each record pair is compared over the union of its column ids
//! 3. Non-null values are equal only if they report the same type and match
//!    structurally; nested records recurse through [`records_equal_with`]
//! 4. Arrays compare by position, or by key when [`CompareOptions`] names a
//!    key column for the array's field path

use crate::delta::{FieldChange, FieldDelta, RecordChange, RecordDelta, RecordSetDelta};
use crate::{CompareOptions, Record, RecordSet, Value};
use chrono::{SecondsFormat, Utc};
use std::collections::{BTreeSet, HashMap};

/// Compare two records at position `index`.
pub fn compare_records<'a>(
    old: Option<&'a Record>,
    new: Option<&'a Record>,
    index: usize,
    options: &CompareOptions,
) -> RecordDelta<'a> {
    let (old_record, new_record) = match (old, new) {
        (None, None) => return record_delta(index, RecordChange::Unchanged, None, None),
        (None, Some(_)) => return record_delta(index, RecordChange::Added, None, new),
        (Some(_), None) => return record_delta(index, RecordChange::Deleted, old, None),
        (Some(o), Some(n)) => (o, n),
    };

    let column_ids: BTreeSet<&String> = old_record
        .values
        .keys()
        .chain(new_record.values.keys())
        .collect();

    let field_deltas: Vec<FieldDelta<'a>> = column_ids
        .into_iter()
        .map(|column_id| {
            let old_value = old_record.values.get(column_id);
            let new_value = new_record.values.get(column_id);
            FieldDelta {
                column_id: column_id.clone(),
                change: field_change(old_value, new_value, column_id, options),
                old_value,
                new_value,
            }
        })
        .collect();

    let change = if field_deltas
        .iter()
        .any(|fd| fd.change != FieldChange::Unchanged)
    {
        RecordChange::Modified
    } else {
        RecordChange::Unchanged
    };

    RecordDelta {
        index,
        change,
        old_record: old,
        new_record: new,
        field_deltas,
    }
}

/// Compare two record sets position by position.
///
/// A record that moved to another position shows up as changes at both
/// positions; there is no move detection.
pub fn compare_record_sets<'a>(
    old: Option<&'a RecordSet>,
    new: Option<&'a RecordSet>,
    options: &CompareOptions,
) -> RecordSetDelta<'a> {
    let schema = new
        .and_then(RecordSet::schema)
        .or_else(|| old.and_then(RecordSet::schema))
        .cloned();

    let old_len = old.map_or(0, RecordSet::len);
    let new_len = new.map_or(0, RecordSet::len);

    tracing::debug!(
        old_len,
        new_len,
        array_keys = options.array_key_count(),
        "comparing record sets"
    );

    let record_deltas = (0..old_len.max(new_len))
        .map(|index| {
            compare_records(
                old.and_then(|set| set.get(index)),
                new.and_then(|set| set.get(index)),
                index,
                options,
            )
        })
        .collect();

    let delta = RecordSetDelta {
        schema,
        record_deltas,
    };

    tracing::debug!(summary = %delta.summary(), "record sets compared");

    delta
}

/// Structural equality with default options.
///
/// Two nulls are equal whatever their declared types; a null never equals a
/// non-null value.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    values_equal_with(a, b, &CompareOptions::default())
}

/// Structural equality, with array keys resolved from the root path.
pub fn values_equal_with(a: &Value, b: &Value, options: &CompareOptions) -> bool {
    nullable_equal(Some(a), Some(b), "", options)
}

/// Record equality with default options.
pub fn records_equal(a: Option<&Record>, b: Option<&Record>) -> bool {
    records_equal_with(a, b, &CompareOptions::default())
}

/// Record equality. Both absent is equal, exactly one absent is not.
///
/// Explicit nulls count as absent columns, so the column-count check and the
/// left-to-right lookup are done over non-null entries only.
pub fn records_equal_with(
    a: Option<&Record>,
    b: Option<&Record>,
    options: &CompareOptions,
) -> bool {
    records_equal_at(a, b, "", options)
}

fn record_delta<'a>(
    index: usize,
    change: RecordChange,
    old_record: Option<&'a Record>,
    new_record: Option<&'a Record>,
) -> RecordDelta<'a> {
    RecordDelta {
        index,
        change,
        old_record,
        new_record,
        field_deltas: Vec::new(),
    }
}

fn is_null(value: Option<&Value>) -> bool {
    value.map_or(true, Value::is_null)
}

fn field_change(
    old: Option<&Value>,
    new: Option<&Value>,
    path: &str,
    options: &CompareOptions,
) -> FieldChange {
    match (old, new) {
        (o, n) if is_null(o) && is_null(n) => FieldChange::Unchanged,
        (o, _) if is_null(o) => FieldChange::Added,
        (_, n) if is_null(n) => FieldChange::Deleted,
        (Some(o), Some(n)) if structural_equal(o, n, path, options) => FieldChange::Unchanged,
        _ => FieldChange::Updated,
    }
}

fn nullable_equal(
    a: Option<&Value>,
    b: Option<&Value>,
    path: &str,
    options: &CompareOptions,
) -> bool {
    match (a, b) {
        (a, b) if is_null(a) || is_null(b) => is_null(a) && is_null(b),
        (Some(a), Some(b)) => structural_equal(a, b, path, options),
        _ => false,
    }
}

/// Equality of two non-null values.
fn structural_equal(a: &Value, b: &Value, path: &str, options: &CompareOptions) -> bool {
    if a.schema_type() != b.schema_type() {
        return false;
    }

    match (a, b) {
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        // Instant equality: the same moment in two offsets is equal
        (Value::Date(a), Value::Date(b)) => a == b,
        (Value::Array { elements: a, .. }, Value::Array { elements: b, .. }) => {
            arrays_equal(a, b, path, options)
        }
        (Value::Record(a), Value::Record(b)) => {
            records_equal_at(a.as_deref(), b.as_deref(), path, options)
        }
        // Unhandled pairings, including nulls reaching here, are never equal
        _ => false,
    }
}

fn records_equal_at(
    a: Option<&Record>,
    b: Option<&Record>,
    path: &str,
    options: &CompareOptions,
) -> bool {
    let (a, b) = match (a, b) {
        (None, None) => return true,
        (Some(a), Some(b)) => (a, b),
        _ => return false,
    };

    let non_null = |r: &Record| r.values.values().filter(|v| !v.is_null()).count();
    if non_null(a) != non_null(b) {
        return false;
    }

    a.values
        .iter()
        .filter(|(_, value)| !value.is_null())
        .all(|(column_id, value)| match b.values.get(column_id) {
            Some(other) if !other.is_null() => {
                structural_equal(value, other, &child_path(path, column_id), options)
            }
            _ => false,
        })
}

fn arrays_equal(a: &[Value], b: &[Value], path: &str, options: &CompareOptions) -> bool {
    match options.array_key(path) {
        None => {
            a.len() == b.len()
                && a.iter()
                    .zip(b)
                    .all(|(x, y)| nullable_equal(Some(x), Some(y), path, options))
        }
        Some(key_column) => {
            let a_map = key_map(a, key_column, path);
            let b_map = key_map(b, key_column, path);

            a_map.len() == b_map.len()
                && a_map.iter().all(|(key, a_elem)| {
                    b_map
                        .get(key)
                        .is_some_and(|b_elem| structural_equal(a_elem, b_elem, path, options))
                })
        }
    }
}

/// Index array elements by the text of their key column.
///
/// Only non-null nested records with a non-null key are indexed; other
/// elements are skipped. A later element with the same key replaces an
/// earlier one.
fn key_map<'v>(
    elements: &'v [Value],
    key_column: &str,
    path: &str,
) -> HashMap<String, &'v Value> {
    let mut map = HashMap::with_capacity(elements.len());
    for (position, element) in elements.iter().enumerate() {
        let key = element
            .as_record()
            .and_then(|record| record.get(key_column))
            .filter(|key| !key.is_null());
        match key {
            Some(key) => {
                map.insert(key_text(key), element);
            }
            None => {
                tracing::trace!(
                    path,
                    key_column,
                    position,
                    "array element skipped for key matching"
                );
            }
        }
    }
    map
}

/// Text form of a key value.
///
/// Arrays and nested records have no key text and all map to `""`. Keys of
/// different types with the same text collide: `Int(1)` and `String("1")`
/// both map to `"1"`, and the later element wins.
fn key_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Int(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Date(d) => d
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::AutoSi, true),
        Value::Null(_) | Value::Array { .. } | Value::Record(_) => String::new(),
    }
}

fn child_path(parent: &str, column_id: &str) -> String {
    if parent.is_empty() {
        column_id.to_string()
    } else {
        format!("{}.{}", parent, column_id)
    }
}
