/*!
 * Memory Simulator - Main Entry Point
 *
 * Reads `p q n m t T queue_size algo` from stdin, runs the simulation for
 * T minutes and reports average turnaround time and memory utilization.
 */

use miette::{IntoDiagnostic, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::BufRead;
use tracing::{error, info};

use memsim_kernel::monitoring::env_flag;
use memsim_kernel::{init_tracing, log_report, Simulation, SimulationConfig};

/// Number of integers in the configuration record
const CONFIG_FIELDS: usize = 8;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured tracing
    init_tracing();

    let input = read_config_input(std::io::stdin().lock()).into_diagnostic()?;
    let config = SimulationConfig::parse(&input).map_err(|e| {
        for violation in e.violations() {
            error!("{}", violation);
        }
        e
    })?;

    info!("RUNNING SIMULATION WITH FOLLOWING CONFIG");
    info!("p: {}MB", config.total_memory);
    info!("q: {}MB", config.reserved_memory);
    info!("n: {}", config.spawn_rate_seed);
    info!("m: {}MB", config.mean_process_size);
    info!("t: {}sec", config.mean_process_duration);
    info!("T: {}min", config.simulation_minutes);
    info!("Algo: {}", config.strategy);

    let simulation = Simulation::new(config);
    let report = simulation.run(StdRng::from_entropy()).await;
    log_report(&report);

    if env_flag("MEMSIM_REPORT_JSON") {
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
        println!("{}", json);
    }

    Ok(())
}

/// Read lines until eight tokens have arrived or input ends
fn read_config_input(mut reader: impl BufRead) -> std::io::Result<String> {
    let mut input = String::new();
    while input.split_whitespace().count() < CONFIG_FIELDS {
        if reader.read_line(&mut input)? == 0 {
            break;
        }
    }
    Ok(input)
}
