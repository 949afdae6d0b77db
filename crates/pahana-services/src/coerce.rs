//! Tolerant numeric coercion for untyped billing payloads
//!
//! Billing payloads arrive as free-form JSON from several client versions,
//! so numeric fields may be integers, floats, or numeric strings. The policy
//! is parse-or-zero: anything missing or unparsable coerces to 0.

use serde_json::Value;

/// Coerce an optional JSON value to f64, parse-or-zero
pub fn coerce_f64(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Coerce an optional JSON value to i32, parse-or-zero
///
/// JSON floats are truncated toward zero. Strings must be plain integers:
/// a decimal or whitespace-padded string coerces to 0, not to its
/// truncation, matching the established wire behavior.
pub fn coerce_i32(value: Option<&Value>) -> i32 {
    match value {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i as i32
            } else {
                n.as_f64().unwrap_or(0.0) as i32
            }
        }
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_f64_from_number() {
        assert_eq!(coerce_f64(Some(&json!(9.5))), 9.5);
        assert_eq!(coerce_f64(Some(&json!(3))), 3.0);
    }

    #[test]
    fn test_coerce_f64_from_numeric_string() {
        assert_eq!(coerce_f64(Some(&json!("9.5"))), 9.5);
        assert_eq!(coerce_f64(Some(&json!(" 12 "))), 12.0);
    }

    #[test]
    fn test_coerce_f64_parse_or_zero() {
        assert_eq!(coerce_f64(Some(&json!("abc"))), 0.0);
        assert_eq!(coerce_f64(Some(&json!(null))), 0.0);
        assert_eq!(coerce_f64(Some(&json!({"x": 1}))), 0.0);
        assert_eq!(coerce_f64(None), 0.0);
    }

    #[test]
    fn test_coerce_i32_from_number() {
        assert_eq!(coerce_i32(Some(&json!(3))), 3);
        assert_eq!(coerce_i32(Some(&json!(3.9))), 3);
    }

    #[test]
    fn test_coerce_i32_from_numeric_string() {
        assert_eq!(coerce_i32(Some(&json!("3"))), 3);
        assert_eq!(coerce_i32(Some(&json!("-7"))), -7);
    }

    #[test]
    fn test_coerce_i32_rejects_non_integer_strings() {
        // Unlike the f64 path, integer strings get no trim and no decimal
        // fallback
        assert_eq!(coerce_i32(Some(&json!("3.9"))), 0);
        assert_eq!(coerce_i32(Some(&json!(" 3 "))), 0);
    }

    #[test]
    fn test_coerce_i32_parse_or_zero() {
        assert_eq!(coerce_i32(Some(&json!("three"))), 0);
        assert_eq!(coerce_i32(Some(&json!(null))), 0);
        assert_eq!(coerce_i32(None), 0);
    }
}
