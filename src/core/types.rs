/*!
 * Core Types
 * Common types used across the simulator
 */

/// Process ID type
pub type Pid = u32;

/// Address type for memory operations (MB offset into usable memory)
pub type Address = usize;

/// Size type for memory operations (MB)
pub type Size = usize;

/// Common result type for simulator start-up operations
pub type ConfigResult<T> = Result<T, super::errors::ConfigError>;
