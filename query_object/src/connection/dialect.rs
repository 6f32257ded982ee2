//! MySQL quoting rules shared by all adapters

use type_mapping::SqlValue;

/// Format used for timestamp literals
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wrap an identifier in backticks, doubling embedded backticks
pub fn quote_identifier(name: &str) -> String {
    let mut quoted = String::with_capacity(name.len() + 2);
    quoted.push('`');
    for c in name.chars() {
        if c == '`' {
            quoted.push('`');
        }
        quoted.push(c);
    }
    quoted.push('`');
    quoted
}

/// Escape a string the way the server's real-escape routine does
pub fn escape_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\0' => escaped.push_str("\\0"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\x1a' => escaped.push_str("\\Z"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Escape and wrap a string in single quotes
pub fn quote_string(s: &str) -> String {
    format!("'{}'", escape_string(s))
}

/// Render a value as a SQL literal
pub fn quote_value(value: &SqlValue) -> String {
    match value {
        SqlValue::Null => "NULL".to_string(),
        SqlValue::Boolean(b) => if *b { "1" } else { "0" }.to_string(),
        SqlValue::Integer(i) => i.to_string(),
        SqlValue::Unsigned(u) => u.to_string(),
        SqlValue::Float(f) if f.is_finite() => f.to_string(),
        SqlValue::Float(_) => "NULL".to_string(),
        SqlValue::Text(s) => quote_string(s),
        SqlValue::Timestamp(ts) => quote_string(&ts.format(TIMESTAMP_FORMAT).to_string()),
        SqlValue::Json(json) => quote_string(&json.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_quote_identifier() {
        assert_eq!(quote_identifier("dual"), "`dual`");
        assert_eq!(quote_identifier("we`ird"), "`we``ird`");
    }

    #[test]
    fn test_numbers_are_unquoted() {
        assert_eq!(quote_value(&SqlValue::Integer(13)), "13");
        assert_eq!(quote_value(&SqlValue::Unsigned(7)), "7");
        assert_eq!(quote_value(&SqlValue::Float(2.5)), "2.5");
        assert_eq!(quote_value(&SqlValue::Float(f64::NAN)), "NULL");
    }

    #[test]
    fn test_text_is_quoted_and_escaped() {
        assert_eq!(quote_value(&SqlValue::from("aString")), "'aString'");
        assert_eq!(
            quote_value(&SqlValue::from("'; DROP TABLE users; --")),
            "'\\'; DROP TABLE users; --'"
        );
        assert_eq!(quote_value(&SqlValue::from("a\nb\\c")), "'a\\nb\\\\c'");
    }

    #[test]
    fn test_null_and_bool() {
        assert_eq!(quote_value(&SqlValue::Null), "NULL");
        assert_eq!(quote_value(&SqlValue::Boolean(true)), "1");
        assert_eq!(quote_value(&SqlValue::Boolean(false)), "0");
    }

    #[test]
    fn test_timestamp_literal() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        assert_eq!(quote_value(&SqlValue::Timestamp(ts)), "'2024-01-02 03:04:05'");
    }

    #[test]
    fn test_structured_values_become_json_text() {
        let value = SqlValue::Json(json!({"a": [1, 2]}));
        assert_eq!(quote_value(&value), "'{\\\"a\\\":[1,2]}'");
    }
}
