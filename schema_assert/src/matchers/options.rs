//! Option keys and expected values for column matchers

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A column attribute a matcher can assert on
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnOption {
    Type,
    Primary,
    Default,
    Precision,
    Limit,
    Null,
    Scale,
    SqlType,
    /// A name outside the known attribute set. It is kept so that the
    /// mismatch surfaces at evaluation time, never while parsing.
    Unrecognized(String),
}

impl ColumnOption {
    /// All recognized options, in declaration order
    pub const KNOWN: [ColumnOption; 8] = [
        ColumnOption::Type,
        ColumnOption::Primary,
        ColumnOption::Default,
        ColumnOption::Precision,
        ColumnOption::Limit,
        ColumnOption::Null,
        ColumnOption::Scale,
        ColumnOption::SqlType,
    ];

    /// The option's name as written in configuration and messages
    pub fn as_str(&self) -> &str {
        match self {
            ColumnOption::Type => "type",
            ColumnOption::Primary => "primary",
            ColumnOption::Default => "default",
            ColumnOption::Precision => "precision",
            ColumnOption::Limit => "limit",
            ColumnOption::Null => "null",
            ColumnOption::Scale => "scale",
            ColumnOption::SqlType => "sql_type",
            ColumnOption::Unrecognized(name) => name,
        }
    }
}

impl fmt::Display for ColumnOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnOption {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let option = match s {
            "type" => ColumnOption::Type,
            "primary" => ColumnOption::Primary,
            "default" => ColumnOption::Default,
            "precision" => ColumnOption::Precision,
            "limit" => ColumnOption::Limit,
            "null" => ColumnOption::Null,
            "scale" => ColumnOption::Scale,
            "sql_type" | "sqlType" => ColumnOption::SqlType,
            other => ColumnOption::Unrecognized(other.to_string()),
        };
        Ok(option)
    }
}

impl From<&str> for ColumnOption {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(option) => option,
            Err(never) => match never {},
        }
    }
}

/// An expected attribute value
///
/// Values are compared through [`OptionValue::canonical`], so `10` and `"10"`
/// are equal expectations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl OptionValue {
    /// Canonical string rendering used for equality checks
    pub fn canonical(&self) -> String {
        match self {
            OptionValue::Null => String::new(),
            OptionValue::Bool(value) => value.to_string(),
            OptionValue::Integer(value) => value.to_string(),
            OptionValue::Float(value) => render_float(*value),
            OptionValue::Text(value) => value.clone(),
        }
    }
}

fn render_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Null => f.write_str("null"),
            OptionValue::Text(value) => write!(f, "{:?}", value),
            other => f.write_str(&other.canonical()),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        OptionValue::Bool(value)
    }
}

macro_rules! integer_option_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for OptionValue {
                fn from(value: $ty) -> Self {
                    OptionValue::Integer(i64::from(value))
                }
            }
        )*
    };
}

integer_option_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for OptionValue {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(OptionValue::Integer)
            .unwrap_or_else(|_| OptionValue::Text(value.to_string()))
    }
}

impl From<usize> for OptionValue {
    fn from(value: usize) -> Self {
        OptionValue::from(value as u64)
    }
}

impl From<f32> for OptionValue {
    fn from(value: f32) -> Self {
        OptionValue::Float(f64::from(value))
    }
}

impl From<f64> for OptionValue {
    fn from(value: f64) -> Self {
        OptionValue::Float(value)
    }
}

impl From<&str> for OptionValue {
    fn from(value: &str) -> Self {
        OptionValue::Text(value.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(value: String) -> Self {
        OptionValue::Text(value)
    }
}

impl From<&String> for OptionValue {
    fn from(value: &String) -> Self {
        OptionValue::Text(value.clone())
    }
}

impl<T: Into<OptionValue>> From<Option<T>> for OptionValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(OptionValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_and_unknown_names() {
        assert_eq!("type".parse::<ColumnOption>().unwrap(), ColumnOption::Type);
        assert_eq!(ColumnOption::from("sql_type"), ColumnOption::SqlType);
        assert_eq!(
            ColumnOption::from("collation"),
            ColumnOption::Unrecognized("collation".to_string())
        );
        for option in ColumnOption::KNOWN.iter() {
            assert_eq!(&ColumnOption::from(option.as_str()), option);
        }
    }

    #[test]
    fn canonical_rendering_ignores_native_representation() {
        assert_eq!(OptionValue::from(10).canonical(), OptionValue::from("10").canonical());
        assert_eq!(OptionValue::from(false).canonical(), "false");
        assert_eq!(OptionValue::from(10.0).canonical(), "10.0");
        assert_eq!(OptionValue::from(2.5).canonical(), "2.5");
        assert_eq!(OptionValue::from(None::<i32>).canonical(), "");
    }

    #[test]
    fn display_quotes_text() {
        assert_eq!(OptionValue::from("integer").to_string(), "\"integer\"");
        assert_eq!(OptionValue::Null.to_string(), "null");
        assert_eq!(OptionValue::from(true).to_string(), "true");
    }
}
