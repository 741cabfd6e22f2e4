use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Today's calendar date in UTC, formatted `YYYY-MM-DD`
pub fn today_utc() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Coerce an arbitrary JSON value into a finite number.
///
/// Numbers pass through, numeric strings are parsed, anything else
/// (null, bool, arrays, unparsable text, NaN/inf) becomes `0.0`.
pub fn coerce_number(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// serde `deserialize_with` adapter around [`coerce_number`].
///
/// Pair with `#[serde(default)]` so a missing field also reads as zero.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_number(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(&json!(12.5)), 12.5);
        assert_eq!(coerce_number(&json!(-3)), -3.0);
        assert_eq!(coerce_number(&json!("42.10")), 42.1);
        assert_eq!(coerce_number(&json!(" 7 ")), 7.0);
        assert_eq!(coerce_number(&json!("abc")), 0.0);
        assert_eq!(coerce_number(&json!("inf")), 0.0);
        assert_eq!(coerce_number(&json!("NaN")), 0.0);
        assert_eq!(coerce_number(&json!(null)), 0.0);
        assert_eq!(coerce_number(&json!(true)), 0.0);
        assert_eq!(coerce_number(&json!([1, 2])), 0.0);
    }

    #[test]
    fn test_today_utc_format() {
        let today = today_utc();
        assert_eq!(today.len(), 10);
        assert!(chrono::NaiveDate::parse_from_str(&today, "%Y-%m-%d").is_ok());
    }
}
