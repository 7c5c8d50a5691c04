//! Validation of upstream JSON payloads into typed inputs.

use serde_json::Value;

use crate::types::{DivisorMapping, Range, TransformError, TransformResult};

impl Range {
    /// Read `{lower, upper}` from a payload. Bounds may be numbers or numeric strings.
    pub fn from_payload(json: &Value) -> TransformResult<Self> {
        if json.is_null() {
            return Err(TransformError::InvalidJson("JSON is empty".to_string()));
        }

        let lower = json.get("lower").and_then(parse_bound);
        let upper = json.get("upper").and_then(parse_bound);

        match (lower, upper) {
            (Some(lower), Some(upper)) => Ok(Range::new(lower, upper)),
            _ => Err(TransformError::InvalidJson(format!(
                "Invalid lower & upper bounds {json}"
            ))),
        }
    }
}

impl DivisorMapping {
    /// Read `{outputDetails: [{divisor, output}]}`.
    ///
    /// A missing, null or empty `outputDetails` yields an empty mapping.
    pub fn from_payload(json: &Value) -> TransformResult<Self> {
        let Some(details) = json.get("outputDetails").and_then(Value::as_array) else {
            return Ok(DivisorMapping::new());
        };

        let mut mapping = DivisorMapping::new();
        for (idx, entry) in details.iter().enumerate() {
            let divisor = entry.get("divisor").and_then(parse_divisor).ok_or_else(|| {
                TransformError::InvalidJson(format!("outputDetails[{idx}] has no integer divisor"))
            })?;
            let output = entry.get("output").and_then(Value::as_str).ok_or_else(|| {
                TransformError::InvalidJson(format!("outputDetails[{idx}] has no string output"))
            })?;
            mapping.insert(divisor, output);
        }

        tracing::debug!("Parsed {} divisor(s)", mapping.len());
        Ok(mapping)
    }
}

/// Extract the `text` field of a search payload.
pub fn parse_text(json: &Value) -> TransformResult<String> {
    if json.is_null() {
        return Err(TransformError::InvalidJson("JSON is empty".to_string()));
    }

    json.get("text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| TransformError::InvalidJson("JSON structure mismatch: expected 'text'".to_string()))
}

/// Extract the `subTexts` array. Null entries become empty fragments.
pub fn parse_fragments(json: &Value) -> TransformResult<Vec<String>> {
    if json.is_null() {
        return Err(TransformError::InvalidJson("JSON is empty".to_string()));
    }

    let items = json.get("subTexts").and_then(Value::as_array).ok_or_else(|| {
        TransformError::InvalidJson("JSON structure mismatch: expected 'subTexts'".to_string())
    })?;

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Null => Ok(String::new()),
            Value::String(s) => Ok(s.clone()),
            other => Err(TransformError::InvalidJson(format!(
                "subTexts[{idx}] is not a string: {other}"
            ))),
        })
        .collect()
}

/// Read a bound the lenient way: integers, truncated floats, or a leading integer in a string.
fn parse_bound(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => parse_leading_int(s),
        _ => None,
    }
}

fn parse_divisor(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse an optional sign followed by digits, ignoring leading whitespace and trailing text.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }

    // Saturate rather than fail on absurdly long digit runs.
    let magnitude = rest[..digits_end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_range_normal_values() {
        let range = Range::from_payload(&json!({"lower": 20, "upper": 40})).unwrap();
        assert_eq!(range, Range { min: 20, max: 40 });
    }

    #[test]
    fn test_range_negative_clamped() {
        let range = Range::from_payload(&json!({"lower": -20, "upper": 40})).unwrap();
        assert_eq!(range, Range { min: 0, max: 40 });
    }

    #[test]
    fn test_range_swapped() {
        let range = Range::from_payload(&json!({"lower": 50, "upper": 40})).unwrap();
        assert_eq!(range, Range { min: 40, max: 50 });
    }

    #[test]
    fn test_range_numeric_text() {
        let range = Range::from_payload(&json!({"lower": "20", "upper": 40})).unwrap();
        assert_eq!(range, Range { min: 20, max: 40 });
        let range = Range::from_payload(&json!({"lower": " 7px", "upper": 9.8})).unwrap();
        assert_eq!(range, Range { min: 7, max: 9 });
    }

    #[test]
    fn test_range_rejects_bad_structure() {
        assert!(Range::from_payload(&json!({"lowers": 50, "upper": 40})).is_err());
        assert!(Range::from_payload(&json!({"lower": "abc", "upper": 40})).is_err());
        assert!(Range::from_payload(&json!({"lower": true, "upper": 40})).is_err());
        assert!(Range::from_payload(&Value::Null).is_err());
    }

    #[test]
    fn test_divisors_from_output_details() {
        let mapping = DivisorMapping::from_payload(&json!({
            "outputDetails": [
                {"divisor": 3, "output": "Boss"},
                {"divisor": 5, "output": "Hogg"}
            ]
        }))
        .unwrap();

        let expected: DivisorMapping = vec![(3, "Boss"), (5, "Hogg")].into_iter().collect();
        assert_eq!(mapping, expected);
    }

    #[test]
    fn test_divisors_missing_details_is_empty() {
        let bare_array = json!([{"divisor": 3, "output": "Boss"}]);
        assert!(DivisorMapping::from_payload(&bare_array).unwrap().is_empty());
        assert!(DivisorMapping::from_payload(&json!({"outputDetails": []})).unwrap().is_empty());
        assert!(DivisorMapping::from_payload(&Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_divisors_malformed_entry() {
        let err = DivisorMapping::from_payload(&json!({
            "outputDetails": [{"divisor": "three", "output": "Boss"}]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("outputDetails[0]"));
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(parse_text(&json!({"text": "Text"})).unwrap(), "Text");
        assert!(parse_text(&Value::Null).is_err());
        assert!(parse_text(&json!({"texts": ""})).is_err());
    }

    #[test]
    fn test_parse_fragments() {
        let fragments = parse_fragments(&json!({"subTexts": ["pe", null, "Pep"]})).unwrap();
        assert_eq!(fragments, vec!["pe", "", "Pep"]);
        assert!(parse_fragments(&json!({"subtexts": []})).is_err());
        assert!(parse_fragments(&json!({"subTexts": [1]})).is_err());
    }
}
