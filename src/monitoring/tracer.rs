/*!
 * Structured Tracing
 * Subscriber setup using the tracing crate, plus the end-of-run report
 *
 * Features:
 * - Human-readable compact output for development
 * - JSON-formatted logs for structured parsing
 * - Run-scoped spans carrying the simulation run id
 */

use crate::process::SimulationReport;
use tracing::info;
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing
///
/// Environment variables:
/// - RUST_LOG: Set log level (default: info)
/// - MEMSIM_TRACE_JSON: Enable JSON output (default: false)
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let use_json = env_flag("MEMSIM_TRACE_JSON");

    let registry = tracing_subscriber::registry().with(env_filter);

    if use_json {
        // JSON output for production/parsing
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_names(true)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_span_events(FmtSpan::CLOSE),
            )
            .init();
        info!("Structured tracing initialized with JSON output");
    } else {
        // Human-readable output for development
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_names(true)
                    .compact(),
            )
            .init();
        info!("Structured tracing initialized");
    }
}

/// Whether an environment flag is set to `1` or `true`
pub fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Emit the end-of-run averages and counters
pub fn log_report(report: &SimulationReport) {
    info!(
        run_id = %report.run_id,
        avg_turnaround_ms = report.stats.avg_turnaround_ms,
        avg_utilization_percent = report.stats.avg_utilization_percent,
        "Avg. turnaround time: {:.2}ms, Avg. memory util: {:.2}%",
        report.stats.avg_turnaround_ms,
        report.stats.avg_utilization_percent
    );
    info!(
        generated = report.counters.generated,
        queued = report.counters.queued,
        rejected = report.counters.rejected,
        allocated = report.counters.allocated,
        freed = report.counters.freed,
        pending = report.pending,
        partitions = report.memory.partitions,
        largest_free_mb = report.memory.largest_free,
        "Simulation totals"
    );
}
