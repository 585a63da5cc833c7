//! recdiff demo - compares two versions of a store inventory.
//!
//! Builds an in-memory dataset, transforms it, then prints the delta twice:
//! once comparing stock arrays by position and once matching products by the
//! configured key columns.

mod config;
mod dataset;

use crate::config::{Config, OutputFormat};
use crate::dataset::Schemas;
use recdiff_engine::{
    compare_record_sets, CompareOptions, FieldChange, RecordChange, RecordSet, RecordSetDelta,
    Value,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recdiff_demo=info,recdiff_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!(
        array_keys = config.array_keys.array_key_count(),
        output = ?config.output,
        "Starting recdiff demo"
    );

    let schemas = Schemas::new();
    let original = dataset::stores(&schemas);
    let transformed = dataset::transform(&schemas, &original);

    let positional =
        compare_record_sets(Some(&original), Some(&transformed), &CompareOptions::new());
    let keyed = compare_record_sets(Some(&original), Some(&transformed), &config.array_keys);

    match config.output {
        OutputFormat::Text => {
            println!("=== ORIGINAL DATA ===");
            print_stores(&original);
            println!("\n=== TRANSFORMED DATA ===");
            print_stores(&transformed);

            println!("\n=== DELTA BY POSITION ===");
            print_delta(&positional);

            println!("\n=== DELTA WITH KEYS ({}) ===", describe_keys(&config.array_keys));
            print_delta(&keyed);
        }
        OutputFormat::Json => {
            let report = serde_json::json!({
                "positional": {
                    "summary": positional.summary(),
                    "records": positional.record_deltas,
                },
                "keyed": {
                    "array_keys": config.array_keys,
                    "summary": keyed.summary(),
                    "records": keyed.record_deltas,
                },
                "delta_dataset": keyed.to_record_set(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    tracing::info!("Done");

    Ok(())
}

fn describe_keys(options: &CompareOptions) -> String {
    let keys: Vec<String> = options
        .array_keys()
        .map(|(path, key)| format!("{} by '{}'", path, key))
        .collect();
    if keys.is_empty() {
        "none".to_string()
    } else {
        keys.join(", ")
    }
}

fn print_stores(stores: &RecordSet) {
    for store in stores {
        println!(
            "\n{} (restocked {}):",
            store.get_string("store_name"),
            store.get_date("restocked").format("%Y-%m-%d")
        );
        print_stock(store.get_array("stock"), "  ");
    }
}

fn print_stock(stock: &[Value], indent: &str) {
    for product in stock.iter().filter_map(Value::as_record) {
        println!(
            "{}- {}: {} EUR",
            indent,
            product.get_string("name"),
            product.get_int("pricing")
        );
    }
}

fn print_delta(delta: &RecordSetDelta<'_>) {
    println!("\nSummary: {}", delta.summary());

    for rd in &delta.record_deltas {
        let store_name = rd
            .old_record
            .or(rd.new_record)
            .map(|r| r.get_string("store_name"))
            .unwrap_or_default();

        println!("\nStore[{}] {}: {}", rd.index, store_name, rd.change);

        if rd.change != RecordChange::Modified {
            continue;
        }

        for fd in rd
            .field_deltas
            .iter()
            .filter(|fd| fd.change != FieldChange::Unchanged)
        {
            println!("  - Field '{}': {}", fd.column_id, fd.change);

            if let (
                Some(Value::Array { elements: old, .. }),
                Some(Value::Array { elements: new, .. }),
            ) = (fd.old_value, fd.new_value)
            {
                println!("    Old {}:", fd.column_id);
                print_stock(old, "      ");
                println!("    New {}:", fd.column_id);
                print_stock(new, "      ");
            }
        }
    }
}
