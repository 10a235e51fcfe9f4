use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One configured log file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDescriptor {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub path: String,
    #[serde(rename = "type", default)]
    pub log_type: String,
}

impl LogDescriptor {
    pub fn new(id: impl Into<String>, path: impl Into<String>, log_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            log_type: log_type.into(),
        }
    }

    /// First required field that is empty or whitespace-only
    fn first_blank_field(&self) -> Option<&'static str> {
        [
            ("id", &self.id),
            ("path", &self.path),
            ("type", &self.log_type),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// Problems loading or updating a descriptor file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in config file {}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// `index` is 1-based
    #[error("configuration {index}: field '{field}' is required")]
    MissingField { index: usize, field: &'static str },

    #[error("log id '{id}' already exists")]
    DuplicateId { id: String },

    #[error("failed to write config file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load and validate the descriptor list at `path`
pub fn load_descriptors(path: &Path) -> Result<Vec<LogDescriptor>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let descriptors = parse_descriptors(&content).map_err(|source| ConfigError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;
    validate_descriptors(&descriptors)?;

    tracing::debug!(path = %path.display(), count = descriptors.len(), "loaded log descriptors");
    Ok(descriptors)
}

/// Parse descriptor JSON without validating field contents
pub fn parse_descriptors(content: &str) -> Result<Vec<LogDescriptor>, serde_json::Error> {
    serde_json::from_str(content)
}

/// Every descriptor must have non-blank id, path and type
pub fn validate_descriptors(descriptors: &[LogDescriptor]) -> Result<(), ConfigError> {
    for (i, descriptor) in descriptors.iter().enumerate() {
        if let Some(field) = descriptor.first_blank_field() {
            return Err(ConfigError::MissingField {
                index: i + 1,
                field,
            });
        }
    }
    Ok(())
}

/// Append `descriptor` to the config at `path` and rewrite it pretty-printed
///
/// Fails without touching the file when the id is already taken or a field
/// of the new descriptor is blank.
pub fn append_descriptor(path: &Path, descriptor: LogDescriptor) -> Result<(), ConfigError> {
    let mut descriptors = load_descriptors(path)?;

    if descriptors.iter().any(|d| d.id == descriptor.id) {
        return Err(ConfigError::DuplicateId { id: descriptor.id });
    }
    if let Some(field) = descriptor.first_blank_field() {
        return Err(ConfigError::MissingField {
            index: descriptors.len() + 1,
            field,
        });
    }

    tracing::debug!(path = %path.display(), id = %descriptor.id, "appending log descriptor");
    descriptors.push(descriptor);
    write_descriptors(path, &descriptors)
}

/// Write descriptors as pretty-printed JSON
pub fn write_descriptors(path: &Path, descriptors: &[LogDescriptor]) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(descriptors).map_err(|source| {
        ConfigError::InvalidJson {
            path: path.to_path_buf(),
            source,
        }
    })?;
    fs::write(path, json).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
