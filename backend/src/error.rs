//! Error types for the Mutant Mint backend.
//!
//! Flow errors come from `mutant_mint_core` and are re-exported here:
//!
//! - [`ChainError`] - failed contract call or transaction
//! - [`MintError`] - mint flow errors
//! - [`ExportError`] - holder-export errors
//!
//! Backend-specific errors:
//!
//! - [`ConfigError`] - missing or malformed configuration
//! - [`ServerError`] - HTTP server errors

use thiserror::Error;

pub use mutant_mint_core::error::{
    ChainError, ChainResult, ExportError, ExportResult, MintError, MintResult, QuantityError,
};

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required setting not provided.
    #[error("Missing {0} (set it in the environment or .env)")]
    Missing(&'static str),

    /// Setting present but malformed.
    #[error("Invalid {key} '{value}': {message}")]
    Invalid {
        key: &'static str,
        value: String,
        message: String,
    },
}

impl ConfigError {
    pub fn invalid(key: &'static str, value: impl Into<String>, message: impl ToString) -> Self {
        Self::Invalid {
            key,
            value: value.into(),
            message: message.to_string(),
        }
    }
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration error at startup.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Socket bind or serve failure.
    #[error("Server IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_format() {
        let err = ConfigError::invalid("SERUM_ADDRESS", "0x12", "odd number of digits");
        let msg = err.to_string();
        assert!(msg.contains("SERUM_ADDRESS"));
        assert!(msg.contains("0x12"));
        assert!(msg.contains("odd number of digits"));
    }

    #[test]
    fn test_error_conversion_chain() {
        let config_err = ConfigError::Missing("RPC_URL");
        let server_err: ServerError = config_err.into();
        assert!(server_err.to_string().contains("RPC_URL"));
    }
}
