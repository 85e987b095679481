/*!
 * Memory Traits
 * Memory reporting abstractions
 */

use super::types::MemoryStats;

/// Memory statistics provider
pub trait MemoryInfo: Send + Sync {
    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Reserved plus occupied memory as a percentage of the total
    fn utilization_percent(&self) -> f64 {
        self.stats().utilization_percent
    }
}
