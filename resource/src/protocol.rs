//! Resource request/response wire types

use std::collections::BTreeMap;
use std::io::{Read, Write};

use chrono::Utc;
use secrecy::Secret;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vr_config::{SourceConfig, USER_ID_ENV};
use vr_errors::{AppError, AppResult};
use vr_secrets_core::{MergedSecrets, PathMapping};

/// Request decoded from stdin
#[derive(Debug, Deserialize)]
pub struct Request {
    pub source: Source,
    #[serde(default)]
    pub version: Option<Version>,
    #[serde(default)]
    pub params: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Deserialize)]
pub struct Source {
    pub vault_uri: String,
    #[serde(default)]
    pub app_id: String,
    // Only present so a smuggled value can be refused.
    #[serde(default)]
    user_id: Option<IgnoredAny>,
}

/// Freshness token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub expires_at: String,
}

impl Version {
    /// Current unix time in seconds
    pub fn now() -> Self {
        Self {
            expires_at: Utc::now().timestamp().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataField {
    pub name: String,
    pub value: Value,
}

/// Response of the `in` step
#[derive(Debug, Clone, Serialize)]
pub struct InResponse {
    pub version: Version,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<MetadataField>,
}

impl InResponse {
    /// Names and counts only; secret values never appear in metadata.
    pub fn new(version: Version, mapping: &PathMapping, merged: &MergedSecrets) -> Self {
        let prefixes: Vec<&str> = mapping.prefixes().collect();
        Self {
            version,
            metadata: vec![
                MetadataField {
                    name: "prefixes".to_string(),
                    value: Value::String(prefixes.join(",")),
                },
                MetadataField {
                    name: "keys".to_string(),
                    value: Value::String(merged.len().to_string()),
                },
            ],
        }
    }
}

impl Request {
    pub fn decode<R: Read>(reader: R) -> AppResult<Self> {
        let request: Self =
            serde_json::from_reader(reader).map_err(|e| AppError::decode(e.to_string()))?;
        if request.source.user_id.is_some() {
            return Err(AppError::validation(format!(
                "source.user_id must not be set in pipeline config; export {} instead",
                USER_ID_ENV
            )));
        }
        Ok(request)
    }

    /// Combine the request source with the user id read from the environment
    pub fn source_config(&self, user_id: Secret<String>) -> AppResult<SourceConfig> {
        Ok(SourceConfig::new(
            &self.source.vault_uri,
            self.source.app_id.clone(),
            user_id,
        )?)
    }

    pub fn path_mapping(&self) -> AppResult<PathMapping> {
        match &self.params {
            Some(params) => PathMapping::try_from(params.clone()),
            None => Ok(PathMapping::default()),
        }
    }
}

/// Write one JSON document followed by a newline
pub fn write_response<W: Write, T: Serialize + ?Sized>(mut writer: W, response: &T) -> AppResult<()> {
    serde_json::to_writer(&mut writer, response)
        .map_err(|e| AppError::encode(e.to_string()))?;
    writeln!(writer).map_err(|e| AppError::encode(e.to_string()))?;
    writer.flush().map_err(|e| AppError::encode(e.to_string()))
}
