//! Schema model: native and custom types, columns and data schemas.
//!
//! Schemas describe the intended shape of records. They are never enforced on
//! write; a record may carry columns its schema does not declare and may miss
//! declared ones.

use crate::{error::Result, ColumnId, Error, SchemaId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeType {
    String,
    Int,
    Float,
    Date,
    Bool,
}

impl NativeType {
    /// Lowercase type name, as used in serialized schemas.
    pub fn as_str(&self) -> &'static str {
        match self {
            NativeType::String => "string",
            NativeType::Int => "int",
            NativeType::Float => "float",
            NativeType::Date => "date",
            NativeType::Bool => "bool",
        }
    }
}

impl std::fmt::Display for NativeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NativeType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "string" => Ok(NativeType::String),
            "int" => Ok(NativeType::Int),
            "float" => Ok(NativeType::Float),
            "date" => Ok(NativeType::Date),
            "bool" => Ok(NativeType::Bool),
            other => Err(Error::UnknownNativeType(other.to_string())),
        }
    }
}

/// The type of a column or value.
///
/// A custom type names a nested schema. The schema may be absent when the
/// type only labels a value; anything that needs the nested shape must go
/// through [`SchemaType::resolve_schema`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Native(NativeType),
    Custom {
        name: SchemaId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        schema: Option<Arc<DataSchema>>,
    },
}

impl SchemaType {
    /// Custom type bound to a schema, named after the schema id.
    pub fn custom(schema: Arc<DataSchema>) -> Self {
        SchemaType::Custom {
            name: schema.id.clone(),
            schema: Some(schema),
        }
    }

    /// Custom type that only carries a name.
    pub fn label(name: impl Into<SchemaId>) -> Self {
        SchemaType::Custom {
            name: name.into(),
            schema: None,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            SchemaType::Native(native) => native.as_str(),
            SchemaType::Custom { name, .. } => name,
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, SchemaType::Native(_))
    }

    /// The nested schema of a custom type, if one is attached.
    pub fn schema(&self) -> Option<&Arc<DataSchema>> {
        match self {
            SchemaType::Native(_) => None,
            SchemaType::Custom { schema, .. } => schema.as_ref(),
        }
    }

    /// The nested schema required to encode or decode values of this type.
    ///
    /// Fails for native types and for custom types used only as labels.
    pub fn resolve_schema(&self) -> Result<&Arc<DataSchema>> {
        self.schema()
            .ok_or_else(|| Error::MissingSchema(self.type_name().to_string()))
    }
}

impl From<NativeType> for SchemaType {
    fn from(native: NativeType) -> Self {
        SchemaType::Native(native)
    }
}

impl PartialEq for SchemaType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (SchemaType::Native(a), SchemaType::Native(b)) => a == b,
            (
                SchemaType::Custom {
                    name: name_a,
                    schema: schema_a,
                },
                SchemaType::Custom {
                    name: name_b,
                    schema: schema_b,
                },
            ) => {
                name_a == name_b
                    && match (schema_a, schema_b) {
                        (None, None) => true,
                        (Some(a), Some(b)) => Arc::ptr_eq(a, b) || a == b,
                        _ => false,
                    }
            }
            _ => false,
        }
    }
}

impl Eq for SchemaType {}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A column in a schema, holding either a single value or an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SchemaColumn {
    Single {
        id: ColumnId,
        #[serde(rename = "type")]
        schema_type: SchemaType,
    },
    Array {
        id: ColumnId,
        #[serde(rename = "elementType")]
        element_type: SchemaType,
    },
}

impl SchemaColumn {
    pub fn single(id: impl Into<ColumnId>, schema_type: impl Into<SchemaType>) -> Self {
        SchemaColumn::Single {
            id: id.into(),
            schema_type: schema_type.into(),
        }
    }

    pub fn array(id: impl Into<ColumnId>, element_type: impl Into<SchemaType>) -> Self {
        SchemaColumn::Array {
            id: id.into(),
            element_type: element_type.into(),
        }
    }

    pub fn id(&self) -> &ColumnId {
        match self {
            SchemaColumn::Single { id, .. } => id,
            SchemaColumn::Array { id, .. } => id,
        }
    }

    /// Column type. For arrays this is the element type.
    pub fn schema_type(&self) -> &SchemaType {
        match self {
            SchemaColumn::Single { schema_type, .. } => schema_type,
            SchemaColumn::Array { element_type, .. } => element_type,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, SchemaColumn::Array { .. })
    }
}

/// A named record layout: an ordered list of typed columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSchema {
    /// Schema identifier, also the name of custom types built from it
    pub id: SchemaId,
    /// Columns in declaration order
    pub columns: Vec<SchemaColumn>,
}

impl DataSchema {
    /// Create a new schema.
    pub fn new(id: impl Into<SchemaId>, columns: Vec<SchemaColumn>) -> Self {
        Self {
            id: id.into(),
            columns,
        }
    }

    /// Builder-style method to append a column.
    pub fn with_column(mut self, column: SchemaColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Get a column by id.
    pub fn column(&self, id: &str) -> Option<&SchemaColumn> {
        self.columns.iter().find(|c| c.id() == id)
    }

    /// Freeze the schema for sharing between records.
    pub fn shared(self) -> Arc<DataSchema> {
        Arc::new(self)
    }
}
