//! Command-line front end: solve, verify, and generate fixtures.

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use stable_match::generate::{random_assignment, random_store, rng_for};
use stable_match::{setup_logger, Engine};

#[derive(Parser)]
#[command(
    name = "stable-match",
    about = "Stable matching solver and verifier",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the hospital-optimal stable matching of a .in file
    Solve {
        /// Preference file (.in)
        input: PathBuf,

        /// Write the matching here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check a matching (.out) for validity and stability
    Verify {
        /// Preference file (.in)
        input: PathBuf,

        /// Candidate matching (.out)
        matching: PathBuf,
    },
    /// Write random complete strict preferences of size N
    GenerateIn {
        file: PathBuf,

        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        n: u32,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Write a random (valid, usually unstable) matching of size N
    GenerateOut {
        file: PathBuf,

        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        n: u32,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    setup_logger();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when verification ran but did not pass.
fn run(command: Commands) -> Result<bool, Box<dyn Error>> {
    match command {
        Commands::Solve { input, output } => {
            let engine = Engine::load(&input)?;
            match output {
                Some(path) => {
                    engine.solve_to_file(&path)?;
                }
                None => {
                    let mut stdout = io::stdout().lock();
                    stdout.write_all(engine.solve().render().as_bytes())?;
                    stdout.flush()?;
                }
            }
            Ok(true)
        }
        Commands::Verify { input, matching } => {
            let engine = Engine::load(&input)?;
            let outcome = engine.verify_file(&matching)?;
            println!("{outcome}");
            Ok(outcome.is_valid_stable())
        }
        Commands::GenerateIn { file, n, seed } => {
            let store = random_store(n as usize, &mut rng_for(seed))?;
            store.write(&file)?;
            println!("Generated input file: {} (n={n})", file.display());
            Ok(true)
        }
        Commands::GenerateOut { file, n, seed } => {
            random_assignment(n as usize, &mut rng_for(seed)).write(&file)?;
            println!("Generated random matching file: {} (n={n})", file.display());
            Ok(true)
        }
    }
}
