//! Raw field values from `FIELD=VALUE` pairs and JSON documents.

use serde_json::Value;
use thiserror::Error;

use super::models::{Field, FieldParseError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("expected FIELD=VALUE, got `{0}`")]
    MissingEquals(String),

    #[error(transparent)]
    UnknownField(#[from] FieldParseError),

    #[error("input must be a JSON object of field name to value")]
    NotAnObject,

    #[error("{field}: unsupported value {value}")]
    UnsupportedValue { field: Field, value: String },
}

/// Splits `GrLivArea=1500` into a field and its raw value, trimming both sides.
pub fn parse_assignment(raw: &str) -> Result<(Field, String), InputError> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| InputError::MissingEquals(raw.to_string()))?;
    let field = name.trim().parse::<Field>()?;
    Ok((field, value.trim().to_string()))
}

/// Reads field values from a JSON object.
///
/// Strings are kept as typed, numbers are written out and `null` clears the
/// field. Keys use the form's field names (`FirstFlrSF`, not `1stFlrSF`).
pub fn values_from_json(json: Value) -> Result<Vec<(Field, String)>, InputError> {
    let Value::Object(map) = json else {
        return Err(InputError::NotAnObject);
    };

    let mut values = Vec::with_capacity(map.len());
    for (name, value) in map {
        let field: Field = name.parse()?;
        let raw = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Null => String::new(),
            other => {
                return Err(InputError::UnsupportedValue {
                    field,
                    value: other.to_string(),
                })
            }
        };
        values.push((field, raw));
    }
    Ok(values)
}
