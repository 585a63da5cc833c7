//! In-memory store inventory and the transformation applied to it.

use chrono::DateTime;
use recdiff_engine::{DataSchema, NativeType, Record, RecordSet, SchemaColumn, SchemaType, Value};
use std::sync::Arc;

/// Stores dropped by [`transform`].
const CLOSED_STORES: [&str; 2] = ["Tech Shop Lyon", "Tech Shop Bordeaux"];
/// Product dropped from every stock.
const DISCONTINUED: &str = "Phone";
/// Products priced at or below this are dropped.
const MIN_PRICING: i64 = 100;
const PRICING_FACTOR: i64 = 3;

/// Product and store schemas.
#[derive(Debug, Clone)]
pub struct Schemas {
    pub product: Arc<DataSchema>,
    pub store: Arc<DataSchema>,
}

impl Schemas {
    pub fn new() -> Self {
        let product = DataSchema::new(
            "Product",
            vec![
                SchemaColumn::single("name", NativeType::String),
                SchemaColumn::single("pricing", NativeType::Int),
            ],
        )
        .shared();

        let store = DataSchema::new(
            "Store",
            vec![
                SchemaColumn::single("store_name", NativeType::String),
                SchemaColumn::single("restocked", NativeType::Date),
                SchemaColumn::array("stock", SchemaType::custom(product.clone())),
            ],
        )
        .shared();

        Self { product, store }
    }

    pub fn product(&self, name: &str, pricing: i64) -> Value {
        Value::record(
            Record::new(self.product.clone())
                .with("name", name)
                .with("pricing", pricing),
        )
    }

    pub fn store(&self, name: &str, restocked: &str, stock: Vec<Value>) -> Record {
        let mut store = Record::new(self.store.clone())
            .with("store_name", name)
            .with("stock", self.stock(stock));
        match DateTime::parse_from_rfc3339(restocked) {
            Ok(date) => store.set("restocked", date),
            Err(_) => store.set("restocked", Value::null(NativeType::Date)),
        }
        store
    }

    fn stock(&self, items: Vec<Value>) -> Value {
        Value::array(SchemaType::custom(self.product.clone()), items)
    }
}

impl Default for Schemas {
    fn default() -> Self {
        Self::new()
    }
}

/// The starting inventory.
pub fn stores(schemas: &Schemas) -> RecordSet {
    let mut set = RecordSet::new(schemas.store.clone());
    set.add(schemas.store(
        "Tech Shop Paris",
        "2024-03-01T09:00:00+01:00",
        vec![
            schemas.product("Laptop", 999),
            schemas.product("Phone", 699),
            schemas.product("Mouse", 25),
            schemas.product("Monitor", 249),
        ],
    ));
    set.add(schemas.store(
        "Tech Shop Lyon",
        "2024-02-15T10:30:00+01:00",
        vec![schemas.product("Tablet", 449), schemas.product("Phone", 699)],
    ));
    set.add(schemas.store(
        "Tech Shop Bordeaux",
        "2024-02-20T08:00:00+01:00",
        vec![schemas.product("Keyboard", 79)],
    ));
    set.add(schemas.store(
        "Tech Shop Lille",
        "2024-03-01T09:00:00+01:00",
        vec![
            schemas.product("Headset", 149),
            schemas.product("Cable", 15),
            schemas.product("Webcam", 119),
        ],
    ));
    set
}

/// Close two stores, drop the discontinued product and cheap products,
/// triple the remaining prices, add an SSD to Paris and open Marseille.
pub fn transform(schemas: &Schemas, original: &RecordSet) -> RecordSet {
    let mut result = original
        .filter(|store| !CLOSED_STORES.contains(&store.get_string("store_name")))
        .map(|store| {
            let mut stock: Vec<Value> = store
                .get_array("stock")
                .iter()
                .filter_map(Value::as_record)
                .filter(|p| p.get_string("name") != DISCONTINUED)
                .filter(|p| p.get_int("pricing") > MIN_PRICING)
                .map(|p| {
                    schemas.product(p.get_string("name"), p.get_int("pricing") * PRICING_FACTOR)
                })
                .collect();

            let mut updated = store.clone();
            if store.get_string("store_name") == "Tech Shop Paris" {
                stock.push(schemas.product("SSD", 199));
                updated.set("restocked", store.get_date("restocked") + chrono::Duration::days(7));
            }
            updated.set("stock", schemas.stock(stock));
            updated
        });

    result.add(schemas.store(
        "Tech Shop Marseille",
        "2024-03-08T09:00:00+01:00",
        vec![schemas.product("Camera", 599), schemas.product("Drone", 899)],
    ));
    result
}
