//! Records: typed values keyed by column id.

use crate::{ColumnId, DataSchema, Value};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One row of typed data bound to a schema.
///
/// The schema is shared, never owned by the record, and never enforced: a
/// record may hold columns its schema does not declare, or lack declared ones.
/// Typed accessors are lenient and return a zero value on a missing column or
/// a variant mismatch.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Record {
    /// Schema this record is bound to
    #[serde(skip)]
    pub schema: Option<Arc<DataSchema>>,
    /// Column id to value, one entry per column
    pub values: BTreeMap<ColumnId, Value>,
}

impl Record {
    /// Create an empty record bound to a schema.
    pub fn new(schema: Arc<DataSchema>) -> Self {
        Self {
            schema: Some(schema),
            values: BTreeMap::new(),
        }
    }

    /// Create an empty record with no schema.
    pub fn unbound() -> Self {
        Self::default()
    }

    pub fn schema(&self) -> Option<&Arc<DataSchema>> {
        self.schema.as_ref()
    }

    /// Get the raw value of a column.
    pub fn get(&self, column_id: &str) -> Option<&Value> {
        self.values.get(column_id)
    }

    /// Set a column, replacing any previous value.
    pub fn set(&mut self, column_id: impl Into<ColumnId>, value: impl Into<Value>) {
        self.values.insert(column_id.into(), value.into());
    }

    /// Builder-style [`Record::set`].
    pub fn with(mut self, column_id: impl Into<ColumnId>, value: impl Into<Value>) -> Self {
        self.set(column_id, value);
        self
    }

    /// Number of columns present, nulls included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Column ids present in this record, in sorted order.
    pub fn column_ids(&self) -> impl Iterator<Item = &ColumnId> {
        self.values.keys()
    }

    /// String value of a column, or `""`.
    pub fn get_string(&self, column_id: &str) -> &str {
        match self.get(column_id) {
            Some(Value::String(s)) => s,
            _ => "",
        }
    }

    /// Int value of a column, or `0`.
    pub fn get_int(&self, column_id: &str) -> i64 {
        match self.get(column_id) {
            Some(Value::Int(v)) => *v,
            _ => 0,
        }
    }

    /// Float value of a column, or `0.0`.
    pub fn get_float(&self, column_id: &str) -> f64 {
        match self.get(column_id) {
            Some(Value::Float(v)) => *v,
            _ => 0.0,
        }
    }

    /// Date value of a column, or the Unix epoch at UTC.
    pub fn get_date(&self, column_id: &str) -> DateTime<FixedOffset> {
        match self.get(column_id) {
            Some(Value::Date(d)) => *d,
            _ => DateTime::<FixedOffset>::default(),
        }
    }

    /// Bool value of a column, or `false`.
    pub fn get_bool(&self, column_id: &str) -> bool {
        matches!(self.get(column_id), Some(Value::Bool(true)))
    }

    /// Array elements of a column, or an empty slice.
    pub fn get_array(&self, column_id: &str) -> &[Value] {
        match self.get(column_id) {
            Some(Value::Array { elements, .. }) => elements,
            _ => &[],
        }
    }

    /// Nested record of a column, or `None`.
    pub fn get_record(&self, column_id: &str) -> Option<&Record> {
        self.get(column_id).and_then(Value::as_record)
    }
}

/// Structural equality, the same relation the diff engine uses.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        crate::compare::records_equal(Some(self), Some(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NativeType, SchemaColumn, SchemaType};
    use chrono::TimeZone;

    fn product_schema() -> Arc<DataSchema> {
        DataSchema::new(
            "Product",
            vec![
                SchemaColumn::single("name", NativeType::String),
                SchemaColumn::single("price", NativeType::Float),
                SchemaColumn::single("quantity", NativeType::Int),
            ],
        )
        .shared()
    }

    #[test]
    fn create_record() {
        let schema = product_schema();
        let record = Record::new(schema.clone());

        assert!(record.is_empty());
        assert!(Arc::ptr_eq(record.schema().unwrap(), &schema));
        assert!(record.get("name").is_none());
    }

    #[test]
    fn set_and_get() {
        let mut record = Record::new(product_schema());
        record.set("name", "Laptop");
        record.set("price", 999.0);
        record.set("quantity", 3i64);

        assert_eq!(record.len(), 3);
        assert_eq!(record.get_string("name"), "Laptop");
        assert_eq!(record.get_float("price"), 999.0);
        assert_eq!(record.get_int("quantity"), 3);

        record.set("quantity", 4i64);
        assert_eq!(record.len(), 3);
        assert_eq!(record.get_int("quantity"), 4);
    }

    #[test]
    fn accessors_return_zero_values() {
        let record = Record::new(product_schema())
            .with("name", 12i64)
            .with("flag", Value::null(NativeType::Bool));

        assert_eq!(record.get_string("name"), "");
        assert_eq!(record.get_string("missing"), "");
        assert_eq!(record.get_int("missing"), 0);
        assert_eq!(record.get_float("name"), 0.0);
        assert!(!record.get_bool("flag"));
        assert!(record.get_array("name").is_empty());
        assert!(record.get_record("name").is_none());
        assert_eq!(record.get_date("missing").timestamp(), 0);
    }

    #[test]
    fn typed_accessors() {
        let date = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .unwrap();
        let record = Record::unbound()
            .with("when", date)
            .with("active", true)
            .with(
                "tags",
                Value::array(NativeType::String, vec!["a".into(), "b".into()]),
            )
            .with("owner", Record::unbound().with("name", "Alice"));

        assert_eq!(record.get_date("when"), date);
        assert!(record.get_bool("active"));
        assert_eq!(record.get_array("tags").len(), 2);
        assert_eq!(record.get_record("owner").unwrap().get_string("name"), "Alice");
    }

    #[test]
    fn extra_columns_are_kept() {
        let record = Record::new(product_schema()).with("not_in_schema", "x");
        assert_eq!(record.get_string("not_in_schema"), "x");
        assert!(record.schema().unwrap().column("not_in_schema").is_none());
    }

    #[test]
    fn serializes_values_only() {
        let record = Record::new(product_schema())
            .with("name", "Laptop")
            .with("price", Value::null(SchemaType::from(NativeType::Float)));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"name": "Laptop", "price": null}));
    }
}
