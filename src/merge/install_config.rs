//! Install-config override merging
//!
//! The site configuration carries an optional `installConfigOverride` JSON
//! string and a separate network type. This module folds the network type
//! into the override at `networking.networkType`, leaving every other key
//! untouched.
//!
//! Output is compact JSON with object keys sorted at every level, so the
//! same input always yields the same text.

use log::warn;
use serde_json::{Map, Value as JsonValue};

use crate::error::{Error, Result};

const NETWORKING_KEY: &str = "networking";
const NETWORK_TYPE_KEY: &str = "networkType";

/// Merge `network_type` into the JSON override at `networking.networkType`.
///
/// - An empty (or whitespace-only) override yields
///   `{"networking":{"networkType":"<network_type>"}}`.
/// - A missing or null `networking` key is added.
/// - An existing `networking` object only has `networkType` set; its other
///   keys are kept.
///
/// # Examples
///
/// ```
/// use manifest_merge::merge::merge_network_type;
///
/// let merged = merge_network_type("OVNKubernetes", "").unwrap();
/// assert_eq!(merged, r#"{"networking":{"networkType":"OVNKubernetes"}}"#);
/// ```
///
/// # Errors
///
/// Returns `Error::Format` with the message
/// `Invalid json parameter set at installConfigOverride` when the override
/// is not a JSON object or its `networking` value is not an object.
pub fn merge_network_type(network_type: &str, override_json: &str) -> Result<String> {
    let mut config = if override_json.trim().is_empty() {
        Map::new()
    } else {
        match serde_json::from_str::<JsonValue>(override_json) {
            Ok(JsonValue::Object(map)) => map,
            Ok(other) => {
                warn!(
                    "installConfigOverride must be a JSON object, found {}",
                    json_type_name(&other)
                );
                return Err(Error::invalid_override());
            }
            Err(err) => {
                warn!("installConfigOverride is not valid JSON: {}", err);
                return Err(Error::invalid_override());
            }
        }
    };

    let networking = config
        .entry(NETWORKING_KEY)
        .or_insert(JsonValue::Null);
    if networking.is_null() {
        *networking = JsonValue::Object(Map::new());
    }
    match networking {
        JsonValue::Object(networking) => {
            networking.insert(
                NETWORK_TYPE_KEY.to_string(),
                JsonValue::String(network_type.to_string()),
            );
        }
        other => {
            warn!(
                "installConfigOverride '{}' must be a JSON object, found {}",
                NETWORKING_KEY,
                json_type_name(other)
            );
            return Err(Error::invalid_override());
        }
    }

    serde_json::to_string(&JsonValue::Object(config)).map_err(|err| Error::Serialization {
        message: format!("Failed to serialize install config: {}", err),
    })
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
