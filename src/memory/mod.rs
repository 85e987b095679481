/*!
 * Memory Module
 * Variable-partition memory: partition list, placement and reporting
 */

pub mod manager;
pub mod partition;
pub mod render;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use manager::Memory;
pub use partition::PartitionList;
pub use render::PartitionMap;
pub use traits::*;
pub use types::*;
