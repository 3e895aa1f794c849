//! Error types for Veles.

use std::io;

use thiserror::Error;

/// Result type alias for Veles operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Veles.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // Routing errors
    #[error("no available uplinks")]
    NoAvailableUplinks,

    #[error("uplink {0} not found")]
    UplinkNotFound(String),

    #[error("no backup uplink configured")]
    NoBackupConfigured,

    #[error("weighted pool is empty: {0}")]
    EmptyWeightedPool(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // General errors
    #[error("internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Check if error stems from configuration rather than runtime state.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_) | Error::InvalidConfig(_))
    }

    /// Check if error indicates the link set cannot serve traffic at all.
    pub fn is_no_capacity(&self) -> bool {
        matches!(
            self,
            Error::NoAvailableUplinks | Error::EmptyWeightedPool(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(Error::InvalidConfig("bad weight".into()).is_config());
        assert!(Error::EmptyWeightedPool("no active links".into()).is_no_capacity());
        assert!(!Error::NoBackupConfigured.is_config());
    }
}
