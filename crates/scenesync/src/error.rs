use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneSyncError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },

    #[error("Invalid update rule '{name}': {reason}")]
    InvalidRule { name: String, reason: String },
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read project file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse project file '{path}': {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Project document root is not a mapping")]
    NotAMapping,

    #[error("Project document has no 'items' mapping")]
    MissingItems,

    #[error("'children' of the 'items' mapping is not a list")]
    MalformedChildren,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to move existing file '{from}' to '{to}': {source}")]
    Backup {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write project file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize project document: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, SceneSyncError>;
