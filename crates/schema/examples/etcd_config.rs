//! Compiling an etcd connection config schema
//!
//! Builds the schema from plain data, then checks a few configs against it.
//! Compiler events are logged at DEBUG.

use serde_json::{Value, json};
use trellis_schema::{CompileOptions, Compiler, RecordSpec, SchemaAlgebra, Specification};
use trellis_validator::foundation::Validate;
use tracing::Level;

fn etcd_spec() -> Specification {
    let host_port = Specification::tuple(["string", "integer"]);

    RecordSpec::new()
        .field("namespace", "string")
        .field(("addr", json!(["127.0.0.1", 2379])), host_port)
        .field(("user", ""), "null".any_of("string"))
        .field(("password", ""), "null".any_of("string"))
        .allow_extra()
        .into()
}

fn report(label: &str, result: Result<Value, trellis_validator::foundation::ValidationError>) {
    match result {
        Ok(value) => println!("✓ {label}\n    {value}"),
        Err(e) => {
            println!("✗ {label}: {e}");
            for (path, message) in e.field_messages() {
                println!("    {path}: {message}");
            }
        }
    }
}

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let compiler = Compiler::new().with_options(CompileOptions::from_env());
    let etcd = match compiler.compile(&etcd_spec()) {
        Ok(validator) => validator,
        Err(e) => {
            eprintln!("schema error [{}]: {e}", e.code());
            return;
        }
    };

    println!("\n=== etcd config ===\n");

    report("minimal", etcd.check(&json!({"namespace": "local"})));
    report(
        "custom address, extra key kept",
        etcd.check(&json!({
            "namespace": "prod",
            "addr": ["10.0.0.7", "2380"],
            "user": "root",
            "timeout": 5
        })),
    );
    report(
        "broken",
        etcd.check(&json!({"addr": ["10.0.0.7"], "password": 1234})),
    );

    println!("\n=== schema errors ===\n");

    let typo = RecordSpec::new().field("namespace", "strng");
    if let Err(e) = compiler.compile(&typo.into()) {
        println!("✗ [{}] {e}", e.code());
    }
}
