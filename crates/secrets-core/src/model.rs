//! Data model shared by the fetcher and merge engine

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use vr_errors::{AppError, AppResult};
use vr_ports::RawSecret;

/// Mapping of output prefix to store path.
///
/// Backed by a `BTreeMap` so iteration is always in lexicographic prefix
/// order; that order decides which error surfaces first and which value wins
/// a flattened-key collision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMapping(BTreeMap<String, String>);

impl PathMapping {
    pub fn new<I, P, Q>(entries: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (P, Q)>,
        P: Into<String>,
        Q: Into<String>,
    {
        let mut mapping = BTreeMap::new();
        for (prefix, path) in entries {
            let (prefix, path) = (prefix.into(), path.into());
            if prefix.is_empty() {
                return Err(AppError::validation(format!(
                    "empty prefix for path `{}`",
                    path
                )));
            }
            if path.is_empty() {
                return Err(AppError::validation(format!(
                    "empty path for prefix `{}`",
                    prefix
                )));
            }
            mapping.insert(prefix, path);
        }
        Ok(Self(mapping))
    }

    /// Entries in processing order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<BTreeMap<String, String>> for PathMapping {
    type Error = AppError;

    fn try_from(map: BTreeMap<String, String>) -> AppResult<Self> {
        Self::new(map)
    }
}

/// Key/value set read from one path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretRecord {
    pub data: BTreeMap<String, String>,
    pub warnings: Vec<String>,
}

impl SecretRecord {
    /// Decode a raw store answer. Every value must be a JSON string.
    pub fn decode(path: &str, raw: RawSecret) -> AppResult<Self> {
        let mut data = BTreeMap::new();
        for (key, value) in raw.data {
            match value {
                Value::String(s) => {
                    data.insert(key, s);
                }
                other => {
                    return Err(AppError::type_mismatch(path, key, describe(&other)));
                }
            }
        }
        Ok(Self {
            data,
            warnings: raw.warnings,
        })
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Output key for `key` read under `prefix`
pub fn flatten_key(prefix: &str, key: &str) -> String {
    format!("{}-{}", prefix, key)
}

/// Flattened secrets for the whole batch, serialized as a flat JSON object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MergedSecrets(BTreeMap<String, String>);

impl MergedSecrets {
    /// Insert every pair under `prefix`, overwriting existing keys.
    /// Returns the keys that replaced an earlier value.
    pub fn extend_prefixed(
        &mut self,
        prefix: &str,
        data: BTreeMap<String, String>,
    ) -> Vec<String> {
        let mut replaced = Vec::new();
        for (key, value) in data {
            let flat = flatten_key(prefix, &key);
            if self.0.insert(flat.clone(), value).is_some() {
                replaced.push(flat);
            }
        }
        replaced
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}
