//! FieldValue - An untyped incoming field and its coercion rules
//!
//! Callers hand over loosely typed values. Numeric fields accept
//! numbers, numeric strings and booleans; text fields accept any
//! scalar. Structured values are rejected for both.

/// A loosely typed value supplied for one report field
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// Not supplied, or explicitly null
    #[default]
    Missing,
    Number(f64),
    Text(String),
    Bool(bool),
    /// A structured value (object, array); carries its kind for diagnostics
    Unsupported(&'static str),
}

/// A value that could not be cast to the field's type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoercionError {
    pub field: &'static str,
    pub expected: &'static str,
    pub found: String,
}

impl core::fmt::Display for CoercionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Cannot coerce field '{}' to {}: found {}",
            self.field, self.expected, self.found
        )
    }
}

impl std::error::Error for CoercionError {}

impl FieldValue {
    /// Short name of the value's kind
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Missing => "missing",
            FieldValue::Number(_) => "number",
            FieldValue::Text(_) => "string",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Unsupported(kind) => kind,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Cast to a number for the named field
    pub fn to_number(&self, field: &'static str) -> Result<Option<f64>, CoercionError> {
        let reject = |found: String| CoercionError {
            field,
            expected: "number",
            found,
        };

        match self {
            FieldValue::Missing => Ok(None),
            FieldValue::Number(n) if n.is_finite() => Ok(Some(*n)),
            FieldValue::Number(n) => Err(reject(n.to_string())),
            FieldValue::Bool(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
            FieldValue::Text(s) if s.is_empty() => Ok(None),
            FieldValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    // Whitespace-only casts to zero, only the empty string is absent
                    return Ok(Some(0.0));
                }
                match trimmed.parse::<f64>() {
                    Ok(n) if n.is_finite() => Ok(Some(n)),
                    _ => Err(reject(format!("\"{}\"", s))),
                }
            }
            FieldValue::Unsupported(kind) => Err(reject((*kind).to_string())),
        }
    }

    /// Cast to text for the named field
    pub fn to_text(&self, field: &'static str) -> Result<Option<String>, CoercionError> {
        match self {
            FieldValue::Missing => Ok(None),
            FieldValue::Text(s) => Ok(Some(s.clone())),
            FieldValue::Number(n) => Ok(Some(n.to_string())),
            FieldValue::Bool(b) => Ok(Some(b.to_string())),
            FieldValue::Unsupported(kind) => Err(CoercionError {
                field,
                expected: "string",
                found: (*kind).to_string(),
            }),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Missing)
    }
}
