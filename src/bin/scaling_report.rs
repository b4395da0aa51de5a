//! Scaling report: wall-clock time of solve and verify as `n` doubles.
//!
//! Each size gets its own freshly generated store; verify always runs on
//! the solver's own output. Mean times go to CSV, per-run latencies go
//! into a histogram printed after each size.

use std::error::Error;
use std::hint::black_box;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use hdrhistogram::Histogram;
use serde::Serialize;
use stable_match::generate::{random_store, rng_for};
use stable_match::{setup_logger, verify, MatchingEngine};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "scaling-report", about = "Time solve and verify across sizes")]
struct Args {
    /// Comma-separated problem sizes
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = clap::value_parser!(u32).range(1..),
        default_values_t = vec![1, 2, 4, 8, 16, 32, 64, 128, 256, 512]
    )]
    sizes: Vec<u32>,

    /// Timed runs per size
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    repeat: u32,

    /// Base seed; size `n` uses `seed + n`
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// CSV destination
    #[arg(long, default_value = "scaling.csv")]
    csv: PathBuf,

    /// Pin the timing thread to the last CPU core
    #[arg(long)]
    pin: bool,
}

#[derive(Serialize)]
struct Row {
    n: u32,
    matcher_time: f64,
    verifier_time: f64,
}

fn main() {
    setup_logger();
    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if args.pin {
        pin_to_last_core();
    }

    let mut writer = csv::Writer::from_path(&args.csv)?;

    for &n in &args.sizes {
        let seed = args.seed.wrapping_add(u64::from(n));
        let store = random_store(n as usize, &mut rng_for(Some(seed)))?;
        let engine = MatchingEngine::new(&store);

        let mut solve_hist = Histogram::<u64>::new(3)?;
        let mut verify_hist = Histogram::<u64>::new(3)?;
        let mut solve_total = Duration::ZERO;
        let mut verify_total = Duration::ZERO;

        let (assignment, stats) = engine.solve_with_stats();
        for _ in 0..args.repeat {
            let start = Instant::now();
            black_box(engine.solve());
            let elapsed = start.elapsed();
            solve_hist.record(elapsed.as_nanos() as u64).unwrap_or(());
            solve_total += elapsed;

            let start = Instant::now();
            let outcome = black_box(verify(&store, assignment.pairs()));
            let elapsed = start.elapsed();
            verify_hist.record(elapsed.as_nanos() as u64).unwrap_or(());
            verify_total += elapsed;

            if !outcome.is_valid_stable() {
                warn!(n, %outcome, "solver output failed verification");
            }
        }

        let row = Row {
            n,
            matcher_time: solve_total.as_secs_f64() / f64::from(args.repeat),
            verifier_time: verify_total.as_secs_f64() / f64::from(args.repeat),
        };
        println!(
            "n={}: matcher={:.6}s, verifier={:.6}s, proposals={}",
            row.n, row.matcher_time, row.verifier_time, stats.proposals
        );
        print_latency("solve", &solve_hist);
        print_latency("verify", &verify_hist);
        writer.serialize(&row)?;
    }

    writer.flush()?;
    info!(path = %args.csv.display(), "wrote scaling report");
    println!("Results saved to {}", args.csv.display());
    Ok(())
}

fn print_latency(label: &str, histogram: &Histogram<u64>) {
    println!(
        "  {:<6} min={:>10} ns  p50={:>10} ns  p99={:>10} ns  max={:>10} ns",
        label,
        histogram.min(),
        histogram.value_at_quantile(0.50),
        histogram.value_at_quantile(0.99),
        histogram.max(),
    );
}

/// The last core is typically the quietest one.
fn pin_to_last_core() {
    match core_affinity::get_core_ids().and_then(|ids| ids.last().copied()) {
        Some(core) => {
            if !core_affinity::set_for_current(core) {
                warn!(core = core.id, "failed to pin to core");
            }
        }
        None => warn!("no core ids available, running unpinned"),
    }
}
