//! ring-sim - Build, drive and decode a spiking ring attractor
//!
//! # Usage
//!
//! ```bash
//! # Default ring (128 neurons, no fixed points)
//! ring-sim
//!
//! # Run from a JSON config and write the report
//! ring-sim ring.json -o report.json
//!
//! # Include the full potential trace in the report
//! ring-sim ring.json -o report.json --trace
//!
//! # Debug logging
//! RUST_LOG=debug ring-sim ring.json
//! ```
//!
//! # Exit Codes
//!
//! - 0: Run completed and decoded
//! - 1: Simulation or decoding failed (e.g. no spikes in the decode window)
//! - 2: Invalid arguments, unreadable or invalid config

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use ring_attractor::{RingAttractor, RingConfig, SimulationReport};

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut include_trace = false;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                return ExitCode::SUCCESS;
            }
            "--trace" | "-t" => include_trace = true,
            "-o" | "--output" => match iter.next() {
                Some(path) => output = Some(PathBuf::from(path)),
                None => {
                    eprintln!("Error: {} requires a path\n", arg);
                    print_help();
                    return ExitCode::from(2);
                }
            },
            _ if arg.starts_with('-') => {
                eprintln!("Unknown option: {}\n", arg);
                print_help();
                return ExitCode::from(2);
            }
            _ if config_path.is_some() => {
                eprintln!("Error: more than one config file given\n");
                print_help();
                return ExitCode::from(2);
            }
            _ => config_path = Some(PathBuf::from(arg)),
        }
    }

    let ring = match load_config(config_path.as_deref()).and_then(build) {
        Ok(ring) => ring,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return ExitCode::from(2);
        }
    };

    match run(ring, include_trace, output.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<RingConfig> {
    match path {
        Some(path) => RingConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(RingConfig::default()),
    }
}

fn build(config: RingConfig) -> anyhow::Result<RingAttractor> {
    RingAttractor::new(config).context("building ring")
}

fn run(mut ring: RingAttractor, include_trace: bool, output: Option<&Path>) -> anyhow::Result<()> {
    let report = ring.report(include_trace).context("simulating ring")?;
    print_summary(&report);

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&report).context("serializing report")?;
        std::fs::write(path, json)
            .with_context(|| format!("writing report {}", path.display()))?;
        println!("report:        {} (~{} bytes)", path.display(), report.size_bytes());
    }
    Ok(())
}

fn print_summary(report: &SimulationReport) {
    let config = &report.config;
    println!("ring:          {} neurons, {:?} connectivity", config.n, config.connectivity);
    println!("fixed points:  {:?}", report.fixed_points);
    println!("midpoint:      {}", report.midpoint);
    println!("ticks:         {} (window {})", config.total_ticks, config.decode_window);
    println!("spikes:        {}", report.spike_count);
    println!(
        "decoded:       {:.3}° (true {:.3}°, {} ticks used, R = {:.3})",
        report.decoded.decoded_angle,
        report.decoded.true_angle,
        report.decoded.ticks_used,
        report.decoded.resultant
    );
    println!("error:         {:.3}°", report.decoded.error);
}

fn print_help() {
    eprintln!(
        r#"ring-sim - Spiking ring attractor simulation

USAGE:
    ring-sim [OPTIONS] [CONFIG.json]

ARGS:
    CONFIG.json    Ring configuration (defaults used when omitted)

OPTIONS:
    -o, --output <PATH>  Write the JSON report to PATH
    -t, --trace          Include the full potential trace in the report
    -h, --help           Show this help

ENVIRONMENT:
    RUST_LOG             Log filter (error, warn, info, debug)

EXIT CODES:
    0  Run completed and decoded
    1  Simulation or decoding failed
    2  Invalid arguments or config
"#
    );
}
