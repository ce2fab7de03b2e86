//! Combinators example for trellis-validator

use serde_json::json;
use trellis_validator::prelude::*;

fn main() {
    // Any-of: the first passing alternative wins
    let port = integer().or(literal("auto"));

    println!("Testing port validation (integer or \"auto\"):\n");

    for input in [json!(2379), json!("2380"), json!("auto"), json!("manual")] {
        match port.check(&input) {
            Ok(value) => println!("✓ {input} -> {value}"),
            Err(e) => println!("✗ {input}: {e}"),
        }
    }

    // Record of fields, with a default and a list
    let server = Record::new(vec![
        KeyDescriptor::required("host").with_validator(string().boxed()),
        KeyDescriptor::with_default("port", json!("auto")).with_validator(port.boxed()),
        KeyDescriptor::optional("tags").with_validator(each(string().boxed()).boxed()),
    ]);

    println!("\nTesting server records:\n");

    let good = json!({"host": "db1", "port": "5432"});
    match server.check(&good) {
        Ok(value) => println!("✓ {good} -> {value}"),
        Err(e) => println!("✗ {good}: {e}"),
    }

    let bad = json!({"port": true, "tags": ["a", 1], "debug": 1});
    if let Err(e) = server.check(&bad) {
        println!("✗ {bad}:");
        for (path, message) in e.field_messages() {
            println!("    {path}: {message}");
        }
    }
}
