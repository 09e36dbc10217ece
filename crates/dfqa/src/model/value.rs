//! Tagged cell values.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Runtime representation of a non-missing cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Boolean,
    Integer,
    Float,
    Text,
}

impl ValueType {
    /// Short type name used in summaries and findings.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Boolean => "bool",
            ValueType::Integer => "int",
            ValueType::Float => "float",
            ValueType::Text => "str",
        }
    }

    /// Returns true for integer and floating-point representations.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueType::Integer | ValueType::Float)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single table cell.
///
/// Every cell carries its kind explicitly. `Missing` is a value of its own
/// and is never confused with textual placeholders such as `"NA"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Missing,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Returns true if the cell holds no value.
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Runtime representation, or `None` for missing cells.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            CellValue::Missing => None,
            CellValue::Boolean(_) => Some(ValueType::Boolean),
            CellValue::Integer(_) => Some(ValueType::Integer),
            CellValue::Float(_) => Some(ValueType::Float),
            CellValue::Text(_) => Some(ValueType::Text),
        }
    }

    /// Borrow the text of a `Text` cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coerce the cell to text. Missing cells become the empty string.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Missing => Cow::Borrowed(""),
            CellValue::Boolean(b) => Cow::Owned(b.to_string()),
            CellValue::Integer(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(format!("{:?}", f)),
            CellValue::Text(s) => Cow::Borrowed(s),
        }
    }

    /// Type a raw field the way a dataframe loader would.
    ///
    /// `true`/`false` in any case become booleans, then integers and floats
    /// are tried; anything else stays text. Missing-value handling is left to
    /// the caller.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();

        if trimmed.eq_ignore_ascii_case("true") {
            return CellValue::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return CellValue::Boolean(false);
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if !trimmed.is_empty() && looks_numeric(trimmed) {
            if let Ok(f) = trimmed.parse::<f64>() {
                return CellValue::Float(f);
            }
        }

        CellValue::Text(raw.to_string())
    }

    /// Canonical bit pattern for floats so that equality and hashing agree.
    fn float_key(f: f64) -> u64 {
        if f.is_nan() {
            f64::NAN.to_bits()
        } else if f == 0.0 {
            0.0f64.to_bits()
        } else {
            f.to_bits()
        }
    }

    /// The integer a float holds exactly, if any.
    fn exact_integer(f: f64) -> Option<i64> {
        const BOUND: f64 = 9_223_372_036_854_775_808.0;
        (f.is_finite() && f.fract() == 0.0 && (-BOUND..BOUND).contains(&f)).then(|| f as i64)
    }
}

/// Reject spellings `f64::from_str` accepts but a CSV reader would keep as
/// text, such as `inf` or `NaN`.
fn looks_numeric(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        && s.chars().any(|c| c.is_ascii_digit())
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Missing, CellValue::Missing) => true,
            (CellValue::Boolean(a), CellValue::Boolean(b)) => a == b,
            (CellValue::Integer(a), CellValue::Integer(b)) => a == b,
            (CellValue::Integer(i), CellValue::Float(f))
            | (CellValue::Float(f), CellValue::Integer(i)) => Self::exact_integer(*f) == Some(*i),
            (CellValue::Float(a), CellValue::Float(b)) => {
                Self::float_key(*a) == Self::float_key(*b)
            }
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Whole floats hash as integers so that 1 and 1.0 collide.
        match self {
            CellValue::Missing => 0u8.hash(state),
            CellValue::Boolean(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            CellValue::Integer(i) => {
                2u8.hash(state);
                i.hash(state);
            }
            CellValue::Float(f) => match Self::exact_integer(*f) {
                Some(i) => {
                    2u8.hash(state);
                    i.hash(state);
                }
                None => {
                    3u8.hash(state);
                    Self::float_key(*f).hash(state);
                }
            },
            CellValue::Text(s) => {
                4u8.hash(state);
                s.hash(state);
            }
        }
    }
}

/// Literal rendering: text is quoted, floats always show a decimal point.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => f.write_str("null"),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::Integer(i) => write!(f, "{}", i),
            CellValue::Float(x) => write!(f, "{:?}", x),
            CellValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Integer(i64::from(value))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Missing, Into::into)
    }
}
