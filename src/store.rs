// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Flat key/value configuration store.
//!
//! [`ClockConfiguration`](crate::ClockConfiguration) only needs named get/set
//! access, expressed by the [`ConfigStore`] trait.  [`JsonStore`] implements it
//! on top of a single-level JSON object:
//!
//! ```json
//! {
//!   "showingEarthTime": true,
//!   "kerbinSecondsPerMinute": 24.0
//! }
//! ```
//!
//! Values written as strings (`"24"`, `"True"`) are accepted on read so that
//! hand-edited or legacy files still load.

use crate::error::{ClockError, Result};
use serde_json::{Map, Number, Value};
use std::fs;
use std::path::Path;

/// Named get/set access to persisted settings.
///
/// Getters return `None` when the key is absent *or* its value cannot be read
/// as the requested type; callers treat both the same way.
pub trait ConfigStore {
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn get_f64(&self, key: &str) -> Option<f64>;
    fn set_bool(&mut self, key: &str, value: bool);
    fn set_f64(&mut self, key: &str, value: f64);
}

/// [`ConfigStore`] backed by a flat `serde_json` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonStore {
    values: Map<String, Value>,
}

impl JsonStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse a store from JSON text; the top level must be an object.
    pub fn from_json_str(text: &str) -> Result<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(values) => Ok(Self { values }),
            other => Err(ClockError::Json(format!(
                "expected a flat object, found {}",
                kind_of(&other)
            ))),
        }
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.values)?)
    }

    /// Read a store from `path`.
    ///
    /// A missing file is not an error: it yields an empty store, which leaves
    /// every setting at its in-memory value when loaded.
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file does not exist; using defaults");
            return Ok(Self::new());
        }
        let store = fs::read_to_string(path)
            .map_err(ClockError::from)
            .and_then(|text| Self::from_json_str(&text))
            .map_err(|err| io_failed("read", path, err))?;
        tracing::debug!(path = %path.display(), keys = store.values.len(), "loaded config file");
        Ok(store)
    }

    /// Write the store to `path` as pretty-printed JSON.
    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json_string()?)
            .map_err(|err| io_failed("write", path, err.into()))?;
        tracing::debug!(path = %path.display(), keys = self.values.len(), "saved config file");
        Ok(())
    }
}

fn io_failed(op: &'static str, path: &Path, err: ClockError) -> ClockError {
    tracing::warn!(op, path = %path.display(), error = %err, "config file access failed");
    err
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl ConfigStore for JsonStore {
    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => {
                let s = s.trim();
                if s.eq_ignore_ascii_case("true") {
                    Some(true)
                } else if s.eq_ignore_ascii_case("false") {
                    Some(false)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn get_f64(&self, key: &str) -> Option<f64> {
        match self.values.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.values.insert(key.to_owned(), Value::Bool(value));
    }

    fn set_f64(&mut self, key: &str, value: f64) {
        match Number::from_f64(value) {
            Some(n) => {
                self.values.insert(key.to_owned(), Value::Number(n));
            }
            None => tracing::warn!(key, value, "refusing to store non-finite value"),
        }
    }
}
