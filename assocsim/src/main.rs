mod render;

use std::fs::File;
use std::io::BufReader;
use std::time::Instant;
use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use assoclib::config::{CacheConfig, ReplacementPolicyConfig};
use assoclib::io::{parse_address_list_with, read_address_file, Radix};
use assoclib::model::{AccessRecord, CacheModel, CacheStats, SetSnapshot};
use assoclib::error::AddressOutOfRange;

#[cfg(debug_assertions)]
const DEBUG_DEFAULT: bool = true;

#[cfg(not(debug_assertions))]
const DEBUG_DEFAULT: bool = false;

#[derive(Parser, Debug)]
#[command(about = String::from("Set-associative cache simulator with LRU, FIFO and random replacement"))]
struct Args {
    /// JSON cache configuration
    config: String,

    /// File of addresses, separated by commas or whitespace
    #[arg(required_unless_present = "addresses", conflicts_with = "addresses")]
    trace: Option<String>,

    /// Addresses given inline instead of a trace file, e.g. "0x0A, 0x522, 0x1034"
    #[arg(short, long)]
    addresses: Option<String>,

    /// Overrides the replacement policy in the configuration (LRU, FIFO or Random)
    #[arg(long)]
    policy: Option<ReplacementPolicyConfig>,

    /// Overrides the random replacement seed in the configuration
    #[arg(long)]
    seed: Option<u64>,

    /// Read unprefixed addresses as decimal rather than hexadecimal
    #[arg(long)]
    decimal: bool,

    /// Print a single JSON document instead of tables
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    performance: bool,

    #[arg(short, long, default_value_t = DEBUG_DEFAULT)]
    debug: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    records: &'a [AccessRecord],
    rejected: &'a [AddressOutOfRange],
    snapshot: Vec<SetSnapshot>,
    stats: CacheStats,
}

fn main() -> anyhow::Result<()> {
    let start = Instant::now();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let config_file = File::open(&args.config).with_context(|| format!("Couldn't open the config file at path {}", args.config))?;
    let mut config: CacheConfig = serde_json::from_reader(BufReader::new(config_file)).context("Couldn't parse the config file")?;
    if let Some(policy) = args.policy {
        config.policy = policy;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let radix = if args.decimal { Radix::Decimal } else { Radix::Hex };
    let addresses = match (&args.trace, &args.addresses) {
        (Some(path), _) => {
            let trace_file = File::open(path).with_context(|| format!("Couldn't open the trace file at path {path}"))?;
            read_address_file(trace_file, radix).with_context(|| format!("Couldn't read addresses from {path}"))?
        }
        (None, Some(inline)) => parse_address_list_with(inline, radix).context("Couldn't parse the address list")?,
        (None, None) => bail!("Either a trace file or --addresses is required"),
    };
    debug!(count = addresses.len(), radix = ?radix, "parsed address list");

    let mut model = CacheModel::new(config.clone()).context("Invalid cache configuration")?;
    let simulation_start = Instant::now();
    let simulation = model.simulate(addresses);
    let simulation_time = simulation_start.elapsed();

    if args.json {
        let report = Report {
            records: &simulation.records,
            rejected: &simulation.rejected,
            snapshot: model.snapshot(),
            stats: model.stats(),
        };
        println!("{}", serde_json::to_string_pretty(&report).context("Couldn't serialise the output")?);
    } else {
        print!("{}", render::trace_table(&simulation.records));
        for rejected in &simulation.rejected {
            println!("Skipped: {rejected}");
        }
        print!("{}", render::cache_contents(&model.snapshot()));
        print!("{}", render::statistics(&model.stats()));
    }

    if args.performance {
        let total_time = start.elapsed();
        println!("Simulation time: {}s", simulation_time.as_nanos() as f64 / 1e9);
        println!("Total execution time (includes initial parsing, configuration, and output): {}s", total_time.as_nanos() as f64 / 1e9)
    }
    if args.debug {
        #[cfg(debug_assertions)]
        println!("Running the debug binary, debug mode is enabled by default. If benchmarking, re-compile with the --release argument when using cargo run");
        println!("Parsed input configuration: {config:?}");
        println!("Derived geometry: {:?}", model.geometry());
        println!("Uninitialised cache lines: {}", model.get_uninitialised_line_count());
    }
    Ok(())
}
