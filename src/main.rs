//! accircuit - series AC circuit analyzer
//!
//! Replays a schematic script and reports the steady-state metrics of the
//! resulting circuit.
//!
//! # Usage
//!
//! ```bash
//! accircuit rlc.acs
//! accircuit rlc.acs --frequency 250 --bypass-open-capacitor
//! accircuit rlc.acs --sweep > response.csv
//! RUST_LOG=debug accircuit rlc.acs --lock-resonance
//! ```

use std::io;
use std::path::PathBuf;

use ac_circuit_core::{
    analysis::{Analyzer, CapacitorlessPolicy},
    dsl,
    error::Result,
    report,
};
use clap::Parser;
use log::info;

/// Series AC circuit analyzer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the schematic script (.acs)
    #[arg(value_name = "SCRIPT_FILE")]
    script_file: PathBuf,

    /// Drive frequency in Hz, overriding the script (clamped to 1..=1000)
    #[arg(short, long)]
    frequency: Option<f64>,

    /// Treat a loop without capacitance as having Xc = 0 instead of an open circuit
    #[arg(long)]
    bypass_open_capacitor: bool,

    /// Drive the circuit at its (rounded) resonance frequency
    #[arg(long)]
    lock_resonance: bool,

    /// Print the frequency response as CSV instead of the summary
    #[arg(long)]
    sweep: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Parse the script
    let ast = dsl::parse_file(&args.script_file)?;

    // Replay it
    let mut analyzer = Analyzer::new();
    let names = dsl::replay(&ast, &mut analyzer)?;
    info!(
        "loaded {} ({} named component(s))",
        args.script_file.display(),
        names.len()
    );

    // Command-line overrides
    if args.bypass_open_capacitor {
        let config = analyzer
            .config()
            .clone()
            .with_capacitorless(CapacitorlessPolicy::Bypass);
        analyzer.set_config(config);
    }
    if let Some(hz) = args.frequency {
        analyzer.set_frequency(hz);
    }
    if args.lock_resonance {
        let hz = analyzer.lock_resonance();
        info!("locked drive frequency to {} Hz", hz);
    }

    // Report
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.sweep {
        report::write_response_csv(&mut out, analyzer.frequency_response())?;
    } else {
        report::write_metrics(&mut out, analyzer.schematic(), &analyzer.metrics())?;
    }

    Ok(())
}
