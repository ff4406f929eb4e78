//! Field extraction for loosely shaped JSON request bodies.
//!
//! A field is *supplied* when its key is present and its value is neither `null`
//! nor an empty string. Zero and `false` are supplied values.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

pub type Payload = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
  Missing(&'static str),
  Invalid { field: &'static str, reason: String },
  NothingToUpdate(&'static [&'static str]),
}

impl std::error::Error for PayloadError {}

impl std::fmt::Display for PayloadError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      PayloadError::Missing(field) => write!(f, "Missing '{}' is required", field),
      PayloadError::Invalid { field, reason } => write!(f, "Invalid value for '{}': {}", field, reason),
      PayloadError::NothingToUpdate(fields) => write!(f, "Request body must contain either {}", quoted_list(fields)),
    }
  }
}

fn quoted_list(fields: &[&str]) -> String {
  let quoted: Vec<String> = fields.iter().map(|field| format!("'{}'", field)).collect();
  match quoted.split_last() {
    Some((last, rest)) if !rest.is_empty() => format!("{} or {}", rest.join(", "), last),
    Some((last, _)) => last.clone(),
    None => String::new(),
  }
}

pub fn is_blank(value: &Value) -> bool {
  match value {
    Value::Null => true,
    Value::String(s) => s.is_empty(),
    _ => false,
  }
}

pub fn is_supplied(payload: &Payload, field: &str) -> bool {
  payload.get(field).is_some_and(|value| !is_blank(value))
}

/// Checks `fields` in order and reports only the first one that is not supplied.
pub fn require(payload: &Payload, fields: &[&'static str]) -> Result<(), PayloadError> {
  match fields.iter().copied().find(|field| !is_supplied(payload, field)) {
    Some(field) => {
      tracing::warn!("{} is required", field);
      Err(PayloadError::Missing(field))
    }
    None => Ok(()),
  }
}

pub fn require_any(payload: &Payload, fields: &'static [&'static str]) -> Result<(), PayloadError> {
  if fields.iter().any(|field| is_supplied(payload, field)) {
    Ok(())
  } else {
    Err(PayloadError::NothingToUpdate(fields))
  }
}

fn decode<T: DeserializeOwned>(field: &'static str, value: &Value) -> Result<T, PayloadError> {
  serde_json::from_value(value.clone()).map_err(|e| PayloadError::Invalid {
    field,
    reason: e.to_string(),
  })
}

pub fn required<T: DeserializeOwned>(payload: &Payload, field: &'static str) -> Result<T, PayloadError> {
  match payload.get(field) {
    Some(value) if !is_blank(value) => decode(field, value),
    _ => Err(PayloadError::Missing(field)),
  }
}

/// Absent and `null` both read as `None`.
pub fn optional<T: DeserializeOwned>(payload: &Payload, field: &'static str) -> Result<Option<T>, PayloadError> {
  match payload.get(field) {
    Some(value) => decode(field, value),
    None => Ok(None),
  }
}

/// Outer `None` means the key was absent; `Some(None)` means it was sent as `null`.
pub fn change<T: DeserializeOwned>(payload: &Payload, field: &'static str) -> Result<Option<Option<T>>, PayloadError> {
  payload.get(field).map(|value| decode(field, value)).transpose()
}
