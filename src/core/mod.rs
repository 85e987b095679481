/*!
 * Core Module
 * Fundamental simulator types, configuration and error handling
 */

pub mod config;
pub mod errors;
pub mod limits;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use config::{PlacementStrategy, SimulationConfig};
pub use errors::*;
pub use traits::*;
pub use types::*;
