//! End-to-end tests for the docstore expression engine.
//!
//! These exercise the public surface of `docstore-model` and `docstore-core`
//! together: wire payloads in, typed values and items through the engine,
//! wire payloads and store errors out.
//!
//! Run them with:
//! ```text
//! cargo test -p docstore-integration
//! ```

use std::sync::Once;

use docstore_core::{EngineConfig, Item};
use docstore_model::TypedValue;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EngineConfig::from_env().env_filter())
            .with_test_writer()
            .init();
    });
}

/// Decode a typed value from a JSON literal.
#[must_use]
pub fn typed(json: serde_json::Value) -> TypedValue {
    init_tracing();
    TypedValue::from_wire(json).unwrap_or_else(|e| panic!("invalid typed value: {e}"))
}

/// Decode an item from a JSON literal.
#[must_use]
pub fn item(json: &serde_json::Value) -> Item {
    init_tracing();
    Item::from_json(&json.to_string()).unwrap_or_else(|e| panic!("invalid item: {e}"))
}

mod test_item;
mod test_tokenizer;
mod test_value;
