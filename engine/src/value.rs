//! Runtime values stored in records.
//!
//! [`Value`] is a closed tagged union. Null is its own variant carrying the
//! declared type, so a null keeps its intended type through storage.

use crate::{NativeType, Record, SchemaType};
use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// A typed value.
#[derive(Debug, Clone)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Date(DateTime<FixedOffset>),
    Bool(bool),
    /// Explicit null of a declared type
    Null(SchemaType),
    /// Ordered elements of one element type
    Array {
        element_type: SchemaType,
        elements: Vec<Value>,
    },
    /// Nested record of a custom type; `None` is a null record
    Record(Option<Box<Record>>),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    pub fn null(schema_type: impl Into<SchemaType>) -> Self {
        Value::Null(schema_type.into())
    }

    pub fn array(element_type: impl Into<SchemaType>, elements: Vec<Value>) -> Self {
        Value::Array {
            element_type: element_type.into(),
            elements,
        }
    }

    pub fn record(record: Record) -> Self {
        Value::Record(Some(Box::new(record)))
    }

    /// The type this value reports.
    ///
    /// Arrays report their element type. A nested record reports `None` when
    /// either the record or its schema is missing.
    pub fn schema_type(&self) -> Option<SchemaType> {
        match self {
            Value::String(_) => Some(NativeType::String.into()),
            Value::Int(_) => Some(NativeType::Int.into()),
            Value::Float(_) => Some(NativeType::Float.into()),
            Value::Date(_) => Some(NativeType::Date.into()),
            Value::Bool(_) => Some(NativeType::Bool.into()),
            Value::Null(schema_type) => Some(schema_type.clone()),
            Value::Array { element_type, .. } => Some(element_type.clone()),
            Value::Record(record) => record
                .as_ref()
                .and_then(|r| r.schema())
                .map(|schema| SchemaType::custom(schema.clone())),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_) | Value::Record(None))
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(Some(record)) => Some(record),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array { elements, .. } => Some(elements),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Value::Date(v)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::record(record)
    }
}

/// Structural equality, the same relation the diff engine uses.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        crate::compare::values_equal(self, other)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Date(d) => f.write_str(&d.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Null(_) | Value::Record(None) => f.write_str("null"),
            Value::Array { elements, .. } => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str("]")
            }
            Value::Record(Some(record)) => {
                f.write_str("{")?;
                for (i, (column, value)) in record.values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", column, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

/// Values serialize as plain JSON-like data; type tags are not written.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Date(d) => d.serialize(serializer),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Null(_) | Value::Record(None) => serializer.serialize_none(),
            Value::Array { elements, .. } => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Record(Some(record)) => record.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataSchema, SchemaColumn};

    fn product() -> Record {
        let schema = DataSchema::new(
            "Product",
            vec![SchemaColumn::single("name", NativeType::String)],
        )
        .shared();
        Record::new(schema).with("name", "Laptop")
    }

    #[test]
    fn scalar_types() {
        assert_eq!(Value::from("a").schema_type(), Some(NativeType::String.into()));
        assert_eq!(Value::from(1i64).schema_type(), Some(NativeType::Int.into()));
        assert_eq!(Value::from(1.5).schema_type(), Some(NativeType::Float.into()));
        assert_eq!(Value::from(true).schema_type(), Some(NativeType::Bool.into()));
        assert!(!Value::from("a").is_null());
    }

    #[test]
    fn null_keeps_declared_type() {
        let null = Value::null(NativeType::Date);
        assert!(null.is_null());
        assert_eq!(null.schema_type(), Some(NativeType::Date.into()));

        let label = Value::null(SchemaType::label("CPE"));
        assert_eq!(label.schema_type().unwrap().type_name(), "CPE");
    }

    #[test]
    fn array_reports_element_type() {
        let array = Value::array(NativeType::Int, vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(array.schema_type(), Some(NativeType::Int.into()));
        assert!(!array.is_null());
        assert_eq!(array.as_array().map(|a| a.len()), Some(2));

        let empty = Value::array(NativeType::Int, vec![]);
        assert!(!empty.is_null());
    }

    #[test]
    fn record_value_type() {
        let value = Value::record(product());
        assert_eq!(value.schema_type().unwrap().type_name(), "Product");
        assert!(!value.is_null());
        assert_eq!(value.as_record().unwrap().get_string("name"), "Laptop");

        let null_record = Value::Record(None);
        assert!(null_record.is_null());
        assert!(null_record.schema_type().is_none());

        let unbound = Value::record(Record::unbound().with("name", "x"));
        assert!(unbound.schema_type().is_none());
        assert!(!unbound.is_null());
    }

    #[test]
    fn display() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::from(42i64).to_string(), "42");
        assert_eq!(Value::null(NativeType::Int).to_string(), "null");
        assert_eq!(
            Value::array(NativeType::Int, vec![Value::Int(1), Value::Int(2)]).to_string(),
            "[1, 2]"
        );
        assert_eq!(Value::record(product()).to_string(), "{name: Laptop}");
    }

    #[test]
    fn serialize_plain() {
        let value = Value::array(
            SchemaType::custom(product().schema().unwrap().clone()),
            vec![Value::record(product()), Value::Record(None)],
        );
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json, serde_json::json!([{"name": "Laptop"}, null]));
    }
}
