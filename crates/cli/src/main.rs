//! Caravel user-project register verification CLI.
//!
//! This binary brings up the simulated Caravel environment and runs verification sequences against it. It provides:
//! 1. **Run:** Execute the user-project register test, the firmware smoke test, or both.
//! 2. **Map:** Print the Wishbone address map of the user project.
//!
//! Exits with status 1 if any test fails or the environment cannot be configured.

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;

use caravel_periph_core::common::constants::{
    IRQ_BLOCK_OFFSET, PERIPHERAL_WINDOWS, UNMAPPED_ADDR,
};
use caravel_periph_core::config::Config;
use caravel_periph_core::verify::{TestCase, TestReport};

#[derive(Parser, Debug)]
#[command(
    name = "periph-sim",
    author,
    version,
    about = "Caravel user-project peripheral register verifier",
    long_about = "Configure a simulated Caravel chip, wait for the management firmware, and check the user-project SPI, I3C and GPIO registers over Wishbone.\n\nExamples:\n  periph-sim run\n  periph-sim run --test smoke --json\n  periph-sim run --config periph.json --trace\n  periph-sim map"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one or all verification tests.
    Run {
        /// Test to run.
        #[arg(short, long, value_enum, default_value_t = Selection::All)]
        test: Selection,

        /// JSON configuration file (defaults are used for missing fields).
        #[arg(short, long)]
        config: Option<String>,

        /// Print reports as JSON.
        #[arg(long)]
        json: bool,

        /// Log at debug level.
        #[arg(short, long)]
        verbose: bool,

        /// Log every bus transaction.
        #[arg(long, conflicts_with = "verbose")]
        trace: bool,
    },

    /// Print the user-project address map.
    Map,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Selection {
    UserProject,
    Smoke,
    All,
}

impl Selection {
    fn cases(self) -> Vec<TestCase> {
        match self {
            Self::UserProject => vec![TestCase::UserProject],
            Self::Smoke => vec![TestCase::Smoke],
            Self::All => TestCase::ALL.to_vec(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            test,
            config,
            json,
            verbose,
            trace,
        } => {
            init_logging(verbose, trace);
            let config = load_config(config.as_deref());
            cmd_run(&config, test, json);
        }
        Commands::Map => cmd_map(),
    }
}

/// Installs the tracing subscriber; explicit flags take precedence over `RUST_LOG`.
fn init_logging(verbose: bool, trace: bool) {
    let filter = if trace {
        EnvFilter::new("trace")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Loads the configuration, exiting on error. Files are validated as they are parsed.
fn load_config(path: Option<&str>) -> Config {
    let config = path.map_or_else(
        || {
            let config = Config::default();
            config.validate().map(|()| config)
        },
        Config::from_file,
    );
    config.unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    })
}

/// Runs the selected tests on fresh environments and prints their reports.
fn cmd_run(config: &Config, selection: Selection, json: bool) {
    let mut reports: Vec<TestReport> = Vec::new();
    for case in selection.cases() {
        match case.execute(config) {
            Ok(report) => reports.push(report),
            Err(e) => {
                error!(test = case.name(), "environment setup failed: {e}");
                eprintln!("Error: {case}: {e}");
                process::exit(1);
            }
        }
    }

    if json {
        match serde_json::to_string_pretty(&reports) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("Error: cannot serialize reports: {e}");
                process::exit(1);
            }
        }
    } else {
        for report in &reports {
            println!("{}", report.summary());
        }
    }

    if reports.iter().any(|r| !r.passed) {
        process::exit(1);
    }
}

/// Prints every peripheral window, its interrupt block and the address that must decode to nothing.
fn cmd_map() {
    println!("{:<6} {:>12} {:>12} {:>12}", "Device", "Base", "Size", "IRQ block");
    for (name, base, size) in PERIPHERAL_WINDOWS {
        println!(
            "{name:<6} {base:>#12x} {size:>#12x} {:>#12x}",
            base + IRQ_BLOCK_OFFSET
        );
    }
    println!("{:<6} {UNMAPPED_ADDR:>#12x} {:>12}", "-", "unmapped");
}
