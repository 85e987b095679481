/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

// Re-export MemoryError from memory module
pub use crate::memory::MemoryError;

/// Start-up configuration errors
///
/// All of these are fatal: they are reported before any simulation task
/// starts and the binary exits non-zero.
#[derive(Error, Debug, Clone, Serialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    #[diagnostic(
        code(config::missing_value),
        help("Provide eight integers: p q n m t T queue_size algo")
    )]
    MissingValue(&'static str),

    #[error("Configuration value {field} is not an integer: {value:?}")]
    #[diagnostic(
        code(config::not_an_integer),
        help("Every configuration value must be a base-10 integer.")
    )]
    NotAnInteger { field: &'static str, value: String },

    #[error("Please provide valid memory size and reserved memory, got (p: {total}MB, q: {reserved}MB)")]
    #[diagnostic(
        code(config::invalid_memory),
        help("Total memory must be positive and strictly larger than the reserved memory.")
    )]
    InvalidMemory { total: i64, reserved: i64 },

    #[error("n, m, t, and T must be positive integers, got (n: {rate}, m: {size}MB, t: {duration}sec, T: {simulation}min)")]
    #[diagnostic(code(config::non_positive_workload))]
    NonPositiveWorkload {
        rate: i64,
        size: i64,
        duration: i64,
        simulation: i64,
    },

    #[error("Maximum queue size should be positive integer, got {0}")]
    #[diagnostic(code(config::invalid_queue_capacity))]
    InvalidQueueCapacity(i64),

    #[error("Placement algorithm should be either 0 (first fit), 1 (best fit), or 2 (next fit), got {0}")]
    #[diagnostic(code(config::unknown_strategy))]
    UnknownStrategy(i64),

    #[error("Invalid configuration ({} problems)", .errors.len())]
    #[diagnostic(code(config::invalid))]
    Invalid {
        #[related]
        errors: Vec<ConfigError>,
    },
}

impl ConfigError {
    /// Collapse a list of violations into a single error
    ///
    /// Returns `None` when the list is empty.
    pub fn from_violations(mut errors: Vec<ConfigError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(ConfigError::Invalid { errors }),
        }
    }

    /// Flattened view of every violation carried by this error
    pub fn violations(&self) -> Vec<&ConfigError> {
        match self {
            ConfigError::Invalid { errors } => errors.iter().collect(),
            other => vec![other],
        }
    }
}
