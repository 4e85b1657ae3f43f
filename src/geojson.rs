//! # GeoJSON model
//! Minimal FeatureCollection/Feature types for the network dataset. Geometry
//! is carried as an opaque `serde_json::Value` and never inspected; the
//! engine only reads and writes the property map.
//!
//! `as_number` is the single coercion point for raw property values: numbers
//! pass through, numeric strings parse, booleans map to 1/0, and everything
//! else (null, arrays, objects, non-finite parses) falls back to the default.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Dynamic property bag of one feature.
pub type PropertyMap = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,
    #[serde(default)]
    pub geometry: Value,
    #[serde(default, deserialize_with = "null_as_empty_map")]
    pub properties: PropertyMap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default = "collection_type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<Value>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

fn feature_type() -> String {
    "Feature".to_string()
}

fn collection_type() -> String {
    "FeatureCollection".to_string()
}

/// Some exports carry `"properties": null`; treat that the same as `{}`.
fn null_as_empty_map<'de, D>(deserializer: D) -> Result<PropertyMap, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<PropertyMap>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Coerce an arbitrary property value to a finite f64, or `default`.
pub fn as_number(value: &Value, default: f64) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(default),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .unwrap_or(default),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => default,
    }
}

/// Read a named property as a number; missing keys take the default.
pub fn field_number(props: &PropertyMap, key: &str, default: f64) -> f64 {
    props
        .get(key)
        .map(|v| as_number(v, default))
        .unwrap_or(default)
}
