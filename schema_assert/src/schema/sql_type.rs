//! SQL type string parsing
//!
//! Derives the simplified column type, limit, precision and scale from a raw
//! SQL type such as `varchar(255)` or `numeric(10,2)`, and cleans up default
//! expressions as databases report them.

use once_cell::sync::Lazy;
use regex::Regex;

static PARENTHESIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\s*(\d+)\s*(?:,\s*(\d+)\s*)?\)").expect("valid limit regex"));

static DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:decimal|numeric|number)\s*\(\s*(\d+)\s*(?:,\s*(\d+)\s*)?\)")
        .expect("valid decimal regex")
});

static QUOTED_DEFAULT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^'((?:[^']|'')*)'(?:::[\w\s]+(?:\[\])?)?$").expect("valid quoted default regex")
});

static CAST_DEFAULT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(?(.*?)\)?::[\w\s]+(?:\[\])?$").expect("valid cast default regex"));

fn is_decimal(sql_type: &str) -> bool {
    let lower = sql_type.trim_start().to_lowercase();
    ["decimal", "numeric", "number"]
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

/// Precision of a `decimal(p,s)`-style type
pub fn extract_precision(sql_type: &str) -> Option<u32> {
    DECIMAL
        .captures(sql_type)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Scale of a `decimal(p,s)`-style type; `decimal(p)` has scale 0
pub fn extract_scale(sql_type: &str) -> Option<u32> {
    let caps = DECIMAL.captures(sql_type)?;
    match caps.get(2) {
        Some(scale) => scale.as_str().parse().ok(),
        None => Some(0),
    }
}

/// Limit of a sized, non-decimal type such as `varchar(255)`
pub fn extract_limit(sql_type: &str) -> Option<u32> {
    if is_decimal(sql_type) {
        return None;
    }

    PARENTHESIZED
        .captures(sql_type)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Map a raw SQL type onto the simplified type name used in expectations
pub fn simplified_type(sql_type: &str) -> String {
    let lower = sql_type.trim().to_lowercase();
    let base = lower
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    if lower.starts_with("tinyint(1)") {
        return "boolean".to_string();
    }

    // Keywords are matched on the name only; `enum(...)`/`set(...)` value
    // lists must not leak into the type.
    let simplified = match base.as_str() {
        t if t.contains("bool") => "boolean",
        t if t.contains("interval") || t.contains("point") => return t.to_string(),
        t if t.contains("int") => "integer",
        t if t.contains("float") || t.contains("double") || t.contains("real") => "float",
        t if is_decimal(t) => match extract_scale(&lower) {
            Some(0) => "integer",
            _ => "decimal",
        },
        t if t.contains("datetime") => "datetime",
        t if t.contains("timestamp") => "timestamp",
        t if t.contains("time") => "time",
        t if t.contains("date") => "date",
        t if t.contains("clob") || t.contains("text") => "text",
        t if t.contains("blob") || t.contains("binary") || t.contains("bytea") => "binary",
        t if t.contains("char") || t.contains("string") => "string",
        t if t.contains("uuid") => "uuid",
        t if t.contains("json") => "json",
        other => return other.to_string(),
    };

    simplified.to_string()
}

/// Clean a default expression as reported by the database
///
/// Returns `None` for `NULL` and for sequence-generated defaults.
pub fn normalize_default(raw: &str) -> Option<String> {
    let trimmed = raw.trim();

    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") || trimmed.starts_with("nextval(") {
        return None;
    }

    if let Some(caps) = QUOTED_DEFAULT.captures(trimmed) {
        return Some(caps[1].replace("''", "'"));
    }

    if let Some(caps) = CAST_DEFAULT.captures(trimmed) {
        return Some(caps[1].to_string());
    }

    Some(trimmed.to_string())
}
