//! Conversion of a set delta into an ordinary record set.
//!
//! The resulting set has the fixed `Delta` schema so it can flow through the
//! same machinery as any other dataset:
//!
//! | column        | type                                  |
//! |---------------|---------------------------------------|
//! | `index`       | int                                   |
//! | `change_type` | string                                |
//! | `old`         | custom type of the data, else string  |
//! | `new`         | custom type of the data, else string  |

use crate::delta::RecordSetDelta;
use crate::{DataSchema, NativeType, Record, RecordSet, SchemaColumn, SchemaType, Value};
use std::sync::Arc;

/// Id of the schema produced by [`delta_schema`].
pub const DELTA_SCHEMA_ID: &str = "Delta";

pub const INDEX_COLUMN: &str = "index";
pub const CHANGE_TYPE_COLUMN: &str = "change_type";
pub const OLD_COLUMN: &str = "old";
pub const NEW_COLUMN: &str = "new";

/// Schema of delta records for data of `schema`.
///
/// Without a data schema the `old` and `new` columns fall back to the native
/// string type; the nested records are still stored, only their type is lost.
pub fn delta_schema(schema: Option<&Arc<DataSchema>>) -> Arc<DataSchema> {
    let nested: SchemaType = match schema {
        Some(schema) => SchemaType::custom(schema.clone()),
        None => NativeType::String.into(),
    };

    DataSchema::new(
        DELTA_SCHEMA_ID,
        vec![
            SchemaColumn::single(INDEX_COLUMN, NativeType::Int),
            SchemaColumn::single(CHANGE_TYPE_COLUMN, NativeType::String),
            SchemaColumn::single(OLD_COLUMN, nested.clone()),
            SchemaColumn::single(NEW_COLUMN, nested),
        ],
    )
    .shared()
}

impl RecordSetDelta<'_> {
    /// One delta record per record delta, in order.
    ///
    /// Old and new records are cloned into the result; a missing side is a
    /// null record value.
    pub fn to_record_set(&self) -> RecordSet {
        let schema = delta_schema(self.schema.as_ref());
        let mut result = RecordSet::new(schema.clone());

        for rd in &self.record_deltas {
            let mut record = Record::new(schema.clone());
            record.set(INDEX_COLUMN, Value::Int(rd.index as i64));
            record.set(CHANGE_TYPE_COLUMN, rd.change.as_str());
            record.set(OLD_COLUMN, Value::Record(rd.old_record.cloned().map(Box::new)));
            record.set(NEW_COLUMN, Value::Record(rd.new_record.cloned().map(Box::new)));
            result.add(record);
        }

        tracing::debug!(records = result.len(), "delta converted to record set");

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::{RecordChange, RecordDelta};

    fn product_schema() -> Arc<DataSchema> {
        DataSchema::new(
            "Product",
            vec![
                SchemaColumn::single("name", NativeType::String),
                SchemaColumn::single("price", NativeType::Float),
            ],
        )
        .shared()
    }

    #[test]
    fn schema_with_nested_type() {
        let product = product_schema();
        let schema = delta_schema(Some(&product));

        assert_eq!(schema.id, "Delta");
        assert_eq!(schema.columns.len(), 4);
        assert_eq!(
            schema.column("index").unwrap().schema_type(),
            &SchemaType::from(NativeType::Int)
        );
        let old = schema.column("old").unwrap().schema_type();
        assert_eq!(old.type_name(), "Product");
        assert!(Arc::ptr_eq(old.schema().unwrap(), &product));
    }

    #[test]
    fn schema_falls_back_to_string() {
        let schema = delta_schema(None);
        assert_eq!(
            schema.column("new").unwrap().schema_type(),
            &SchemaType::from(NativeType::String)
        );
    }

    #[test]
    fn converts_modified_record() {
        let schema = product_schema();
        let old = Record::new(schema.clone())
            .with("name", "Laptop")
            .with("price", 999.0);
        let new = Record::new(schema.clone())
            .with("name", "Laptop")
            .with("price", 1099.0);

        let delta = RecordSetDelta {
            schema: Some(schema),
            record_deltas: vec![RecordDelta {
                index: 0,
                change: RecordChange::Modified,
                old_record: Some(&old),
                new_record: Some(&new),
                field_deltas: Vec::new(),
            }],
        };

        let result = delta.to_record_set();
        assert_eq!(result.len(), 1);
        assert_eq!(result.schema().unwrap().id, "Delta");

        let record = result.first().unwrap();
        assert_eq!(record.get_int("index"), 0);
        assert_eq!(record.get_string("change_type"), "modified");
        assert_eq!(record.get_record("old").unwrap().get_float("price"), 999.0);
        assert_eq!(record.get_record("new").unwrap().get_float("price"), 1099.0);
        assert_eq!(record.get_record("old"), Some(&old));
    }

    #[test]
    fn missing_sides_are_null() {
        let schema = product_schema();
        let phone = Record::new(schema.clone()).with("name", "Phone");

        let delta = RecordSetDelta {
            schema: Some(schema),
            record_deltas: vec![
                RecordDelta {
                    index: 0,
                    change: RecordChange::Added,
                    old_record: None,
                    new_record: Some(&phone),
                    field_deltas: Vec::new(),
                },
                RecordDelta {
                    index: 1,
                    change: RecordChange::Deleted,
                    old_record: Some(&phone),
                    new_record: None,
                    field_deltas: Vec::new(),
                },
            ],
        };

        let result = delta.to_record_set();
        let added = result.get(0).unwrap();
        assert_eq!(added.get_string("change_type"), "added");
        assert!(added.get("old").unwrap().is_null());
        assert_eq!(added.get_record("new").unwrap().get_string("name"), "Phone");

        let deleted = result.get(1).unwrap();
        assert_eq!(deleted.get_int("index"), 1);
        assert!(deleted.get("new").unwrap().is_null());
    }

    #[test]
    fn empty_delta() {
        let delta = RecordSetDelta {
            schema: None,
            record_deltas: Vec::new(),
        };
        let result = delta.to_record_set();
        assert!(result.is_empty());
        assert_eq!(result.schema().unwrap().id, DELTA_SCHEMA_ID);
    }
}
