//! # recdiff engine
//!
//! A typed record model and a structural delta engine for schema-typed
//! datasets.
//!
//! This crate compares two versions of a dataset and reports what changed,
//! record by record and field by field. Comparison is a pure, total function:
//! the same inputs always produce the same delta, and no input combination
//! produces an error.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine knows nothing about files, network, or platform
//! - **Total**: absence, nulls, and type mismatches all map to a defined change
//! - **Borrowing**: deltas reference the compared records instead of copying
//! - **Lenient records**: schemas describe, they never reject
//!
//! ## Core Concepts
//!
//! ### Schemas
//!
//! A [`DataSchema`] is an ordered list of [`SchemaColumn`]s. Column types are
//! either a [`NativeType`] or a custom type naming a nested schema.
//!
//! ### Values and Records
//!
//! A [`Value`] is a tagged union of scalars, a typed null, arrays, and nested
//! records. A [`Record`] maps column ids to values; a [`RecordSet`] is an
//! ordered list of records sharing a schema.
//!
//! ### Deltas
//!
//! - [`compare_records`] produces a [`RecordDelta`] with one [`FieldDelta`]
//!   per column
//! - [`compare_record_sets`] compares by position and produces a
//!   [`RecordSetDelta`] with a [`DeltaSummary`]
//! - [`RecordSetDelta::to_record_set`] turns a delta back into a dataset
//!
//! Arrays are compared by position unless [`CompareOptions`] names a key
//! column for them, in which case elements are matched by key and order is
//! ignored.
//!
//! ## Quick Start
//!
//! ```rust
//! use recdiff_engine::{
//!     compare_record_sets, CompareOptions, DataSchema, NativeType, Record, RecordChange,
//!     RecordSet, SchemaColumn, SchemaType, Value,
//! };
//!
//! // 1. Define schemas
//! let product = DataSchema::new(
//!     "Product",
//!     vec![
//!         SchemaColumn::single("name", NativeType::String),
//!         SchemaColumn::single("pricing", NativeType::Int),
//!     ],
//! )
//! .shared();
//! let store = DataSchema::new(
//!     "Store",
//!     vec![
//!         SchemaColumn::single("store_name", NativeType::String),
//!         SchemaColumn::array("stock", SchemaType::custom(product.clone())),
//!     ],
//! )
//! .shared();
//!
//! // 2. Build two versions of a dataset
//! let item = |name: &str, pricing: i64| {
//!     Value::record(Record::new(product.clone()).with("name", name).with("pricing", pricing))
//! };
//! let stock = |items: Vec<Value>| Value::array(SchemaType::custom(product.clone()), items);
//!
//! let mut old = RecordSet::new(store.clone());
//! old.add(
//!     Record::new(store.clone())
//!         .with("store_name", "Paris")
//!         .with("stock", stock(vec![item("Laptop", 999), item("Phone", 499)])),
//! );
//!
//! let mut new = RecordSet::new(store.clone());
//! new.add(
//!     Record::new(store.clone())
//!         .with("store_name", "Paris")
//!         .with("stock", stock(vec![item("Phone", 499), item("Laptop", 999)])),
//! );
//!
//! // 3. Compare: by position the reordered stock is a change...
//! let delta = compare_record_sets(Some(&old), Some(&new), &CompareOptions::default());
//! assert_eq!(delta.record_deltas[0].change, RecordChange::Modified);
//!
//! // ...matched by product name it is not
//! let options = CompareOptions::new().with_array_key("stock", "name");
//! let delta = compare_record_sets(Some(&old), Some(&new), &options);
//! assert!(!delta.has_changes());
//! assert_eq!(delta.summary().unchanged, 1);
//! ```
//!
//! ## Logging
//!
//! The engine emits [`tracing`] events at debug and trace level and never
//! installs a subscriber.

pub mod compare;
pub mod convert;
pub mod delta;
pub mod error;
pub mod options;
pub mod record;
pub mod record_set;
pub mod schema;
pub mod value;

// Re-export main types at crate root
pub use compare::{
    compare_record_sets, compare_records, records_equal, records_equal_with, values_equal,
    values_equal_with,
};
pub use convert::{delta_schema, DELTA_SCHEMA_ID};
pub use delta::{DeltaSummary, FieldChange, FieldDelta, RecordChange, RecordDelta, RecordSetDelta};
pub use error::Error;
pub use options::CompareOptions;
pub use record::Record;
pub use record_set::RecordSet;
pub use schema::{DataSchema, NativeType, SchemaColumn, SchemaType};
pub use value::Value;

/// Type aliases for clarity
pub type ColumnId = String;
pub type SchemaId = String;
/// Column ids joined by `.`, e.g. `stock.tags`
pub type FieldPath = String;
