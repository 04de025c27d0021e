//! Common types used throughout the urturn client
//!
//! Shared type aliases plus the small set of helpers that give loosely-typed
//! JSON input the same meaning the urturn web API and its browser callers
//! give it (truthiness, `typeof` names, number formatting).

use serde_json::Value;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Loose value semantics
// ============================================================================

/// Whether a value counts as "present" in an options record.
///
/// `null`, `false`, `0`, and `""` are all treated as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The `typeof` name a browser would report for this value
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Null | Value::Array(_) | Value::Object(_) => "object",
    }
}

/// Format a number the way it is printed in query strings and signatures.
///
/// Integral values print without a fractional part (`50`, not `50.0`); very
/// large and very small magnitudes switch to exponent form.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{n}");
    }
    // Outside that range the shortest digits are printed in exponent form,
    // with an explicit sign on positive exponents (`1e+21`, `1.5e-7`).
    let formatted = format!("{n:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

/// Truncate toward zero into the 32-bit integer range, wrapping like `n | 0`
pub fn truncate_i32(n: f64) -> i32 {
    if !n.is_finite() {
        return 0;
    }
    let wrapped = n.trunc().rem_euclid(4_294_967_296.0);
    (wrapped as u32) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));

        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn test_type_name() {
        assert_eq!(type_name(&json!("a")), "string");
        assert_eq!(type_name(&json!(1)), "number");
        assert_eq!(type_name(&json!(true)), "boolean");
        assert_eq!(type_name(&json!([1])), "object");
        assert_eq!(type_name(&json!({"a": 1})), "object");
        assert_eq!(type_name(&json!(null)), "object");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(50.0), "50");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.000_001), "0.000001");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(123.456), "123.456");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_truncate_i32() {
        assert_eq!(truncate_i32(4.0), 4);
        assert_eq!(truncate_i32(4.9), 4);
        assert_eq!(truncate_i32(-3.7), -3);
        assert_eq!(truncate_i32(0.5), 0);
        assert_eq!(truncate_i32(f64::NAN), 0);
        assert_eq!(truncate_i32(4_294_967_297.0), 1);
        assert_eq!(truncate_i32(2_147_483_648.0), i32::MIN);
    }
}
