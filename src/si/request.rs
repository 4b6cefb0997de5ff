use crate::si::error::PucError;
use crate::si::formatter::format_verbose;
use crate::si::types::{Formatted, Precision};
use serde::Serialize;
use serde_json::Value as JsonValue;

/// A formatting call with loosely typed arguments, as received from JSON or JavaScript
#[derive(Debug, Clone, PartialEq)]
pub struct FormatRequest {
    pub value: f64,
    pub unit: String,
    pub precision: Precision,
    pub verbose: bool,
    pub file_compatible: bool,
}

/// Argument names a request may carry
pub const REQUEST_KEYS: [&str; 5] = ["value", "unit", "precision", "verbose", "filecompatible"];

/// Output of a request: the bare string, or string, multiplier and prefix when verbose
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FormatOutput {
    Text(String),
    Verbose(String, i32, String),
}

impl FormatOutput {
    pub fn text(&self) -> &str {
        match self {
            FormatOutput::Text(text) | FormatOutput::Verbose(text, _, _) => text,
        }
    }
}

impl From<Formatted> for FormatOutput {
    fn from(formatted: Formatted) -> Self {
        FormatOutput::Verbose(
            formatted.text,
            formatted.multiplier,
            formatted.prefix.to_string(),
        )
    }
}

impl FormatRequest {
    /// Validate a JSON object of the form
    /// `{"value": .., "unit": .., "precision": .., "verbose": .., "filecompatible": ..}`
    ///
    /// Only `value` is required and unknown keys are rejected. Argument types
    /// are checked before the value is converted.
    pub fn from_json(request: &JsonValue) -> Result<Self, PucError> {
        let fields = request.as_object().ok_or_else(|| {
            PucError::InvalidRequest(format!("expected a JSON object, got {}", request))
        })?;

        if let Some(unknown) = fields.keys().find(|k| !REQUEST_KEYS.contains(&k.as_str())) {
            return Err(PucError::InvalidRequest(format!(
                "unexpected argument '{}', expected one of {}",
                unknown,
                REQUEST_KEYS.join(", ")
            )));
        }

        let unit = match fields.get("unit") {
            None | Some(JsonValue::Null) => String::new(),
            Some(JsonValue::String(s)) => s.clone(),
            Some(other) => {
                return Err(PucError::InvalidArgumentType(format!(
                    "unit must be a string, got {}",
                    other
                )))
            }
        };
        let verbose = bool_argument(fields.get("verbose"), "verbose")?;
        let file_compatible = bool_argument(fields.get("filecompatible"), "filecompatible")?;

        let value = fields
            .get("value")
            .ok_or_else(|| PucError::InvalidRequest("missing 'value'".to_string()))?;
        let value = to_scalar(value)?;

        let precision = match fields.get("precision") {
            None | Some(JsonValue::Null) => Precision::default(),
            Some(p) => precision_argument(p)?,
        };

        Ok(Self {
            value,
            unit,
            precision,
            verbose,
            file_compatible,
        })
    }

    /// Parse and validate a JSON request string
    pub fn from_json_str(request: &str) -> Result<Self, PucError> {
        let json: JsonValue = serde_json::from_str(request)
            .map_err(|e| PucError::InvalidRequest(format!("malformed JSON: {}", e)))?;
        Self::from_json(&json)
    }

    pub fn run(&self) -> Result<FormatOutput, PucError> {
        let formatted = format_verbose(
            self.value,
            &self.unit,
            &self.precision,
            self.file_compatible,
        )?;

        if self.verbose {
            Ok(formatted.into())
        } else {
            Ok(FormatOutput::Text(formatted.text))
        }
    }
}

/// Evaluate a JSON request and serialize the output back to JSON
pub fn format_json(request: &str) -> Result<String, PucError> {
    let output = FormatRequest::from_json_str(request)?.run()?;
    serde_json::to_string(&output)
        .map_err(|e| PucError::InvalidRequest(format!("failed to serialize output: {}", e)))
}

/// Reduce a JSON value to one float
///
/// Numbers, numeric strings and booleans convert directly. An array is
/// accepted only if it holds exactly one element, which is unwrapped
/// (recursively, so `[[1.5]]` works). Everything else fails, naming the input.
pub fn to_scalar(value: &JsonValue) -> Result<f64, PucError> {
    let conversion_error = |reason: &str| {
        PucError::ValueConversionError(format!(
            "cannot convert value '{}' to float: {}",
            value, reason
        ))
    };

    match value {
        JsonValue::Number(n) => n
            .as_f64()
            .ok_or_else(|| conversion_error("number out of range")),
        JsonValue::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| conversion_error(&e.to_string())),
        JsonValue::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        JsonValue::Array(items) => match items.as_slice() {
            [single] => to_scalar(single).map_err(|_| conversion_error("element is not numeric")),
            [] => Err(conversion_error("empty collection")),
            _ => Err(conversion_error(&format!(
                "expected a single element, got {}",
                items.len()
            ))),
        },
        JsonValue::Null => Err(conversion_error("null")),
        JsonValue::Object(_) => Err(conversion_error("objects are not numeric")),
    }
}

/// Encode a number for a request, keeping infinities and NaN
///
/// JSON has no non-finite numbers, so these become the strings `to_scalar`
/// parses back: "inf", "-inf" and "nan".
pub fn number_to_json(value: f64) -> JsonValue {
    if value.is_nan() {
        JsonValue::String("nan".to_string())
    } else if value.is_infinite() {
        JsonValue::String(if value < 0.0 { "-inf" } else { "inf" }.to_string())
    } else {
        serde_json::Number::from_f64(value)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null)
    }
}

fn bool_argument(value: Option<&JsonValue>, name: &str) -> Result<bool, PucError> {
    match value {
        None | Some(JsonValue::Null) => Ok(false),
        Some(JsonValue::Bool(b)) => Ok(*b),
        Some(other) => Err(PucError::InvalidArgumentType(format!(
            "{} must be a boolean, got {}",
            name, other
        ))),
    }
}

fn precision_argument(value: &JsonValue) -> Result<Precision, PucError> {
    match value {
        JsonValue::Number(n) => {
            if let Some(digits) = n.as_u64() {
                return u32::try_from(digits)
                    .map(Precision::Digits)
                    .map_err(|_| PucError::InvalidPrecision(format!("{} is too large", digits)));
            }
            match n.as_f64() {
                Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= f64::from(u32::MAX) => {
                    Ok(Precision::Digits(f as u32))
                }
                _ => Err(PucError::InvalidPrecision(format!(
                    "expected a non-negative integer, got {}",
                    n
                ))),
            }
        }
        JsonValue::Array(items) => {
            let references = items
                .iter()
                .map(|item| {
                    item.as_f64().ok_or_else(|| {
                        PucError::InvalidPrecision(format!("reference {} is not a number", item))
                    })
                })
                .collect::<Result<Vec<f64>, PucError>>()?;
            Ok(Precision::Spacing(references))
        }
        other => Err(PucError::InvalidPrecision(format!(
            "expected a digit count or reference values, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let request = FormatRequest::from_json(&json!({"value": 1.0001})).unwrap();
        assert_eq!(request.unit, "");
        assert_eq!(request.precision, Precision::Digits(3));
        assert!(!request.verbose);
        assert!(!request.file_compatible);
        assert_eq!(request.run().unwrap(), FormatOutput::Text("1".to_string()));
    }

    #[test]
    fn test_single_element_collection() {
        let request = FormatRequest::from_json(&json!({"value": [1.0001], "unit": "s"})).unwrap();
        assert_eq!(request.run().unwrap().text(), "1s");

        assert_eq!(to_scalar(&json!([[2.5]])).unwrap(), 2.5);
        assert_eq!(to_scalar(&json!("1e-3")).unwrap(), 1e-3);
        assert_eq!(to_scalar(&json!(true)).unwrap(), 1.0);
        assert!(to_scalar(&json!("inf")).unwrap().is_infinite());
    }

    #[test]
    fn test_non_finite_numbers_survive_encoding() {
        assert_eq!(to_scalar(&number_to_json(f64::INFINITY)).unwrap(), f64::INFINITY);
        assert_eq!(
            to_scalar(&number_to_json(f64::NEG_INFINITY)).unwrap(),
            f64::NEG_INFINITY
        );
        assert!(to_scalar(&number_to_json(f64::NAN)).unwrap().is_nan());
        assert_eq!(number_to_json(1.5), json!(1.5));

        let request = FormatRequest::from_json(&json!({
            "value": number_to_json(f64::INFINITY),
            "unit": "W"
        }))
        .unwrap();
        assert_eq!(request.run().unwrap().text(), "infW");

        let request = FormatRequest::from_json(&json!({
            "value": number_to_json(f64::NEG_INFINITY),
            "unit": "W"
        }))
        .unwrap();
        assert_eq!(request.run().unwrap().text(), "-infW");
    }

    #[test]
    fn test_value_conversion_errors() {
        for bad in [
            json!([1.0, 2.0]),
            json!([]),
            json!("abc"),
            json!(null),
            json!({"x": 1}),
            json!([["abc"]]),
        ] {
            match to_scalar(&bad) {
                Err(PucError::ValueConversionError(msg)) => {
                    assert!(msg.contains(&bad.to_string()), "message '{}' should name input", msg)
                }
                other => panic!("expected conversion error for {}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_argument_type_errors() {
        let cases = [
            json!({"value": 1, "unit": 5}),
            json!({"value": 1, "verbose": "yes"}),
            json!({"value": 1, "filecompatible": 1}),
        ];
        for case in cases {
            assert!(matches!(
                FormatRequest::from_json(&case),
                Err(PucError::InvalidArgumentType(_))
            ));
        }
    }

    #[test]
    fn test_type_check_precedes_value_conversion() {
        let result = FormatRequest::from_json(&json!({"value": "abc", "unit": []}));
        assert!(matches!(result, Err(PucError::InvalidArgumentType(_))));
    }

    #[test]
    fn test_precision_arguments() {
        let request =
            FormatRequest::from_json(&json!({"value": 1.2345, "unit": "m", "precision": 2.0}))
                .unwrap();
        assert_eq!(request.precision, Precision::Digits(2));

        let request = FormatRequest::from_json(
            &json!({"value": 1.001, "unit": "m", "precision": [1.001, 1.002, 1.003]}),
        )
        .unwrap();
        assert_eq!(request.run().unwrap().text(), "1001mm");

        for bad in [json!(-1), json!(2.5), json!("3"), json!([1.0, "x"])] {
            assert!(matches!(
                FormatRequest::from_json(&json!({"value": 1, "precision": bad})),
                Err(PucError::InvalidPrecision(_))
            ));
        }
    }

    #[test]
    fn test_verbose_output_is_a_triple() {
        let out = format_json(r#"{"value": 1030e-9, "unit": "m", "verbose": true}"#).unwrap();
        assert_eq!(out, r#"["1.03µm",-6,"µ"]"#);

        let out = format_json(r#"{"value": 0.911, "unit": "%"}"#).unwrap();
        assert_eq!(out, r#""91.1%""#);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result =
            FormatRequest::from_json(&json!({"value": 1030e-9, "unit": "m", "filecompatable": true}));
        match result {
            Err(PucError::InvalidRequest(msg)) => assert!(msg.contains("filecompatable")),
            other => panic!("expected InvalidRequest, got {:?}", other),
        }

        assert!(FormatRequest::from_json(&json!({
            "value": 1, "unit": "m", "precision": 3, "verbose": false, "filecompatible": false
        }))
        .is_ok());
    }

    #[test]
    fn test_huge_precision_with_zero_value() {
        let out = format_json(r#"{"value": 0, "unit": "W", "precision": 4294967295}"#).unwrap();
        assert_eq!(out, r#""0W""#);

        let out = format_json(r#"{"value": 0, "unit": "%", "precision": 70000}"#).unwrap();
        assert_eq!(out, r#""0%""#);
    }

    #[test]
    fn test_malformed_requests() {
        assert!(matches!(
            format_json("{not json"),
            Err(PucError::InvalidRequest(_))
        ));
        assert!(matches!(
            format_json("[1, 2]"),
            Err(PucError::InvalidRequest(_))
        ));
        assert!(matches!(
            format_json(r#"{"unit": "m"}"#),
            Err(PucError::InvalidRequest(_))
        ));
    }
}
