mod defaults;
mod scenarios;

use cruise_export::formats::cruise::render;
use serde_json::Value;

/// Runs the cruise mapping and parses the output back into JSON.
pub fn export_value(dataset: &Value) -> Value {
    let bytes = render(dataset, false).expect("export to succeed");
    serde_json::from_slice(&bytes).expect("output to be valid JSON")
}
