/*!
 * Variable-Partition Memory Simulator
 * Partition allocator and the concurrent actors that drive it, as a library
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod process;

// Re-exports
pub use crate::core::{ConfigError, PlacementStrategy, SimulationConfig, UniformSource};
pub use memory::{Memory, MemoryError, MemoryResult, PartitionId, PartitionList, Placement};
pub use monitoring::{init_tracing, log_report};
pub use process::{
    DispatchOutcome, Dispatcher, Generator, Process, ProcessQueue, SharedState, Simulation,
    SimulationReport, Workload,
};
