/*!
 * Process Module
 * Process generation, queueing, dispatch and lifetime management
 */

pub mod dispatcher;
pub mod generator;
pub mod lifetime;
pub mod queue;
pub mod simulation;
pub mod state;
pub mod stats;
pub mod types;

// Re-export for convenience
pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use generator::{Admission, Generator, Workload};
pub use queue::ProcessQueue;
pub use simulation::{Simulation, SimulationReport, SimulationTask};
pub use state::{CounterSnapshot, MemoryState, SharedState};
pub use stats::{Stats, StatsSnapshot};
pub use types::{Process, ProcessState};
