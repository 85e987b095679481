/*!
 * Monitoring
 * Structured tracing setup and run reporting
 */

mod tracer;

pub use tracer::{env_flag, init_tracing, log_report};
