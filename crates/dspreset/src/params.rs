//! Effect parameter values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Parameters of one effect, keyed by attribute name.
pub type EffectParams = BTreeMap<String, ParamValue>;

/// A single effect attribute value.
///
/// Values are typed when the document is read: plain numbers become
/// [`ParamValue::Number`], anything else (file paths, option names, values
/// with units) is kept verbatim as [`ParamValue::Text`].
///
/// # Example
///
/// ```rust
/// use dspreset::ParamValue;
///
/// assert_eq!(ParamValue::from_raw("0.7"), ParamValue::Number(0.7));
/// assert_eq!(ParamValue::from_raw("seconds"), ParamValue::Text("seconds".into()));
///
/// // Text values can still be coerced on demand
/// let time = ParamValue::from_raw("250ms");
/// assert_eq!(time.as_f64(), Some(0.25));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Plain numeric value.
    Number(f64),
    /// Any other value, preserved as written.
    Text(String),
}

impl ParamValue {
    /// Type a raw attribute string.
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => ParamValue::Number(v),
            _ => ParamValue::Text(raw.to_string()),
        }
    }

    /// Numeric view of the value.
    ///
    /// Text values go through [`parse_param_value`], so `"50%"` yields `0.5`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ParamValue::Number(v) => Some(*v),
            ParamValue::Text(s) => parse_param_value(s),
        }
    }

    /// The string written to the `<effect>` attribute.
    pub fn to_wire(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(v) => write!(f, "{v}"),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::from_raw(value)
    }
}

/// Parse a parameter value string into an f64.
///
/// Supports various formats:
/// - Plain numbers: "0.5", "1.2", "-0.3"
/// - Percentages: "50%", "120%" (divided by 100)
/// - Decibels: "-6dB", "+3dB" (kept in dB)
/// - Time in ms: "100ms" (converted to seconds)
/// - Time in s: "1.5s" (kept as seconds)
/// - Frequency in Hz: "440Hz"
/// - Frequency in kHz: "1.2kHz" (converted to Hz)
pub fn parse_param_value(value: &str) -> Option<f64> {
    let value = value.trim();

    if let Some(pct) = value.strip_suffix('%') {
        return pct.trim().parse::<f64>().ok().map(|v| v / 100.0);
    }

    if let Some(db) = value.strip_suffix("dB").or_else(|| value.strip_suffix("db")) {
        return db.trim().parse::<f64>().ok();
    }

    if let Some(ms) = value.strip_suffix("ms") {
        return ms.trim().parse::<f64>().ok().map(|v| v / 1000.0);
    }

    if let Some(khz) = value.strip_suffix("kHz").or_else(|| value.strip_suffix("khz")) {
        return khz.trim().parse::<f64>().ok().map(|v| v * 1000.0);
    }

    if let Some(hz) = value.strip_suffix("Hz").or_else(|| value.strip_suffix("hz")) {
        return hz.trim().parse::<f64>().ok();
    }

    if let Some(s) = value.strip_suffix('s') {
        return s.trim().parse::<f64>().ok();
    }

    value.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_types_numbers() {
        assert_eq!(ParamValue::from_raw("0.5"), ParamValue::Number(0.5));
        assert_eq!(ParamValue::from_raw(" -3 "), ParamValue::Number(-3.0));
        assert_eq!(
            ParamValue::from_raw("musical_time"),
            ParamValue::Text("musical_time".to_string())
        );
        assert_eq!(
            ParamValue::from_raw("NaN"),
            ParamValue::Text("NaN".to_string())
        );
    }

    #[test]
    fn test_wire_form() {
        assert_eq!(ParamValue::Number(22000.0).to_wire(), "22000");
        assert_eq!(ParamValue::Number(0.25).to_wire(), "0.25");
        assert_eq!(ParamValue::Text("ir/hall.wav".into()).to_wire(), "ir/hall.wav");
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_param_value("0.5"), Some(0.5));
        assert_eq!(parse_param_value("-0.3"), Some(-0.3));
        assert_eq!(parse_param_value("  0.5  "), Some(0.5));
    }

    #[test]
    fn test_parse_percentages() {
        assert_eq!(parse_param_value("50%"), Some(0.5));
        assert_eq!(parse_param_value("0%"), Some(0.0));
    }

    #[test]
    fn test_parse_decibels() {
        assert_eq!(parse_param_value("-3dB"), Some(-3.0));
        assert_eq!(parse_param_value("+6db"), Some(6.0));
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_param_value("100ms"), Some(0.1));
        assert_eq!(parse_param_value("1.5s"), Some(1.5));
    }

    #[test]
    fn test_parse_frequency() {
        assert_eq!(parse_param_value("440Hz"), Some(440.0));
        assert_eq!(parse_param_value("1.5kHz"), Some(1500.0));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_param_value("invalid"), None);
        assert_eq!(parse_param_value("abc%"), None);
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(ParamValue::Number(0.7).as_f64(), Some(0.7));
        assert_eq!(ParamValue::Text("2kHz".into()).as_f64(), Some(2000.0));
        assert_eq!(ParamValue::Text("seconds".into()).as_f64(), None);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut params = EffectParams::new();
        params.insert("wetLevel".into(), ParamValue::Number(0.4));
        params.insert("irFile".into(), ParamValue::Text("ir/plate.wav".into()));

        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"{"irFile":"ir/plate.wav","wetLevel":0.4}"#);

        let parsed: EffectParams = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, params);
    }
}
