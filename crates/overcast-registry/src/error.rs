//! Registry error types

use std::path::PathBuf;

/// Registry storage errors
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Registry {} could not be read: {source}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Registry {} could not be written: {source}", path.display())]
    StorageWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Registry {} is corrupt: {source}", path.display())]
    CorruptRegistry {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, RegistryError>;
