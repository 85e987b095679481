/*!
 * Core Traits
 * Capabilities consumed by the simulation actors
 */

use rand::rngs::StdRng;
use rand::Rng;

/// Source of uniformly distributed integers
///
/// The generator only needs "a uniform integer in [lo, hi]", so randomness is
/// consumed through this narrow seam and tests can plug in scripted draws.
pub trait UniformSource: Send {
    /// Draw a uniform integer in the closed range `[lo, hi]`
    ///
    /// Implementations must return `lo` when `hi <= lo`.
    fn uniform(&mut self, lo: u64, hi: u64) -> u64;
}

impl UniformSource for StdRng {
    fn uniform(&mut self, lo: u64, hi: u64) -> u64 {
        if hi <= lo {
            return lo;
        }
        self.gen_range(lo..=hi)
    }
}
