//! Cell values and numeric coercion of raw tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single table cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Missing value.
    #[default]
    Null,
    /// Whole number (token had no decimal point).
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// Anything that did not parse as a number, kept verbatim.
    Text(String),
}

impl Cell {
    /// Coerce a raw token into a cell.
    ///
    /// A token containing `.` that parses as a number becomes [`Cell::Float`]; otherwise a
    /// token that parses as an integer becomes [`Cell::Int`]; everything else is kept as
    /// [`Cell::Text`] unchanged. Never fails.
    pub fn coerce(token: &str) -> Cell {
        let trimmed = token.trim();
        if trimmed.contains('.') {
            if let Ok(value) = trimmed.parse::<f64>() {
                return Cell::Float(value);
            }
        } else if let Ok(value) = trimmed.parse::<i64>() {
            return Cell::Int(value);
        }
        Cell::Text(token.to_string())
    }

    /// Parse a stored field. Empty fields are null, everything else is coerced.
    pub fn from_field(field: &str) -> Cell {
        if field.is_empty() {
            Cell::Null
        } else {
            Cell::coerce(field)
        }
    }

    /// Numeric view of the cell, if it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            Cell::Null | Cell::Text(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Text written to a delimited file for this cell.
    ///
    /// Floats always carry a decimal point so the field coerces back to a float.
    pub fn to_field(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Int(i) => i.to_string(),
            Cell::Float(f) => format_float(*f),
            Cell::Text(s) => s.clone(),
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map(Cell::Float).unwrap_or(Cell::Null)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => write!(f, "NaN"),
            other => write!(f, "{}", other.to_field()),
        }
    }
}

fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }
    let text = value.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_null() {
        assert_eq!(Cell::default(), Cell::Null);
        assert!(Cell::default().is_null());
    }

    #[test]
    fn test_coerce_float() {
        assert_eq!(Cell::coerce("3.14"), Cell::Float(3.14));
        assert_eq!(Cell::coerce("-0.5"), Cell::Float(-0.5));
        assert_eq!(Cell::coerce("3.85E-02"), Cell::Float(0.0385));
    }

    #[test]
    fn test_coerce_int() {
        assert_eq!(Cell::coerce("42"), Cell::Int(42));
        assert_eq!(Cell::coerce("-7"), Cell::Int(-7));
        assert_eq!(Cell::coerce(" 13 "), Cell::Int(13));
    }

    #[test]
    fn test_coerce_passthrough() {
        assert_eq!(Cell::coerce("abc"), Cell::Text("abc".to_string()));
        assert_eq!(Cell::coerce(""), Cell::Text(String::new()));
        assert_eq!(Cell::coerce("1.2.3"), Cell::Text("1.2.3".to_string()));
        // No decimal point, so only integer parsing is attempted.
        assert_eq!(Cell::coerce("1e5"), Cell::Text("1e5".to_string()));
    }

    #[test]
    fn test_float_field_keeps_decimal_point() {
        assert_eq!(Cell::Float(13.0).to_field(), "13.0");
        assert_eq!(Cell::Float(0.0385).to_field(), "0.0385");
        assert_eq!(Cell::coerce(&Cell::Float(13.0).to_field()), Cell::Float(13.0));
    }

    #[test]
    fn test_recoerce_is_noop() {
        for token in ["3.14", "42", "abc", "-0.001", "7.0"] {
            let once = Cell::coerce(token);
            let twice = Cell::coerce(&once.to_field());
            assert_eq!(once, twice, "token {token}");
        }
    }

    #[test]
    fn test_from_field_empty_is_null() {
        assert!(Cell::from_field("").is_null());
        assert_eq!(Cell::from_field("8.2"), Cell::Float(8.2));
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(Cell::Int(13).as_f64(), Some(13.0));
        assert_eq!(Cell::Float(0.5).as_f64(), Some(0.5));
        assert_eq!(Cell::Null.as_f64(), None);
        assert_eq!(Cell::Text("x".into()).as_f64(), None);
    }
}
