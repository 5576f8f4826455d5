/*!
 * Error Types
 * Configuration errors with thiserror, miette and serde support
 *
 * Cell and registry operations never fail; only building a registry from
 * configuration can.
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Registry configuration errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Invalid shard amount: {0}")]
    #[diagnostic(
        code(config::invalid_shard_amount),
        help("Shard amount must be a power of two and at least 2.")
    )]
    InvalidShardAmount(usize),

    #[error("Unknown map strategy: {0}")]
    #[diagnostic(
        code(config::invalid_strategy),
        help("Use one of: locked, sharded, auto.")
    )]
    InvalidStrategy(String),

    #[error("Unknown cell kind: {0}")]
    #[diagnostic(
        code(config::invalid_cell_kind),
        help("Use one of: repeatable, once.")
    )]
    InvalidCellKind(String),

    #[error("Invalid number for {name}: {value}")]
    #[diagnostic(
        code(config::invalid_number),
        help("Expected a non-negative integer.")
    )]
    InvalidNumber { name: String, value: String },

    #[error("Malformed configuration: {0}")]
    #[diagnostic(
        code(config::parse_failed),
        help("Configuration must be a JSON object matching RegistryConfig.")
    )]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
