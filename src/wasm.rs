// WebAssembly bindings for the formatter
use crate::si;
use crate::si::request::{number_to_json, FormatRequest};
use serde_json::Value as JsonValue;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct PucWasm {}

impl Default for PucWasm {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl PucWasm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {}
    }

    /// Evaluate a JSON request string
    /// Returns the JSON encoded string, or [string, multiplier, prefix] when verbose
    #[wasm_bindgen]
    pub fn format(&self, request_json: &str) -> Result<String, JsValue> {
        si::format_json(request_json).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Format a value passed as plain JavaScript arguments
    /// Argument types are checked at runtime, mirroring the JSON request
    #[wasm_bindgen(js_name = formatValue)]
    pub fn format_value(
        &self,
        value: JsValue,
        unit: JsValue,
        precision: JsValue,
        verbose: JsValue,
        filecompatible: JsValue,
    ) -> Result<JsValue, JsValue> {
        let mut request = serde_json::Map::new();
        request.insert("value".to_string(), to_json(&value)?);
        request.insert("unit".to_string(), to_json(&unit)?);
        request.insert("precision".to_string(), to_json(&precision)?);
        request.insert("verbose".to_string(), to_json(&verbose)?);
        request.insert("filecompatible".to_string(), to_json(&filecompatible)?);

        let output = FormatRequest::from_json(&JsonValue::Object(request))
            .and_then(|r| r.run())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let json = serde_json::to_string(&output)
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize output: {}", e)))?;

        js_sys::JSON::parse(&json)
    }

    /// Get the multiplier and prefix symbol for a decimal exponent
    /// Returns JSON: {"multiplier": .., "symbol": ..}
    #[wasm_bindgen(js_name = getPrefix)]
    pub fn get_prefix(&self, exponent: f64) -> String {
        let prefix = si::get_prefix(exponent);
        serde_json::json!({
            "multiplier": prefix.multiplier,
            "symbol": prefix.symbol,
        })
        .to_string()
    }
}

/// Convert a JavaScript value to JSON, mapping `undefined` to null
/// Numbers bypass JSON.stringify, which would turn Infinity and NaN into null
fn to_json(value: &JsValue) -> Result<JsonValue, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(JsonValue::Null);
    }
    if let Some(number) = value.as_f64() {
        return Ok(number_to_json(number));
    }

    let text: String = js_sys::JSON::stringify(value)?.into();
    serde_json::from_str(&text)
        .map_err(|e| JsValue::from_str(&format!("Failed to read argument: {}", e)))
}
