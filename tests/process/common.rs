/*!
 * Shared fixtures for process tests
 */

use memsim_kernel::UniformSource;

/// Always draws the lower bound: every spawn trial succeeds, sizes and
/// durations sit at the bottom of their ranges.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestDraw;

impl UniformSource for LowestDraw {
    fn uniform(&mut self, lo: u64, _hi: u64) -> u64 {
        lo
    }
}

/// Always draws the upper bound: no spawn trial ever succeeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct HighestDraw;

impl UniformSource for HighestDraw {
    fn uniform(&mut self, lo: u64, hi: u64) -> u64 {
        hi.max(lo)
    }
}
