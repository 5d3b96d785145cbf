use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use mbeval::aggregate;
use mbeval::config::Config;
use mbeval::display;
use mbeval::driver;
use mbeval::sizes::SizeRange;

#[derive(Parser)]
#[command(
    name = "mbeval",
    version,
    about = "Drive a microbenchmark binary across input sizes and aggregate its timing output"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (defaults to ./mbeval.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Invoke the benchmark for every size code in the range, capturing its
    /// stdout under the results directory
    Run {
        /// First size code (10-28)
        start_code: u32,
        /// Last size code, inclusive (10-28)
        end_code: u32,
        /// Benchmark executable to invoke
        #[arg(long)]
        bench: Option<PathBuf>,
        /// Directory the capture files are written to
        #[arg(long)]
        results_dir: Option<PathBuf>,
        /// Benchmark invocations per size code
        #[arg(long)]
        runs: Option<u32>,
        /// Value passed as --target=<TARGET> to the benchmark
        #[arg(long)]
        target: Option<String>,
    },
    /// Reduce the captured timing output of a prior run into a summary CSV
    Aggregate {
        /// First size code (10-28)
        start_code: u32,
        /// Last size code, inclusive (10-28)
        end_code: u32,
        /// Directory the capture files are read from
        #[arg(long)]
        results_dir: Option<PathBuf>,
        /// Expected benchmark invocations per size code
        #[arg(long)]
        runs: Option<u32>,
        /// Where to write the CSV
        #[arg(long, default_value = "final_stat.csv")]
        output: PathBuf,
        /// Also print the result table as JSON on stdout
        #[arg(long)]
        json: bool,
    },
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let base = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Run {
            start_code,
            end_code,
            bench,
            results_dir,
            runs,
            target,
        } => {
            let mut config = base;
            if let Some(bench) = bench {
                config.bench_program = bench;
            }
            if let Some(results_dir) = results_dir {
                config.results_dir = results_dir;
            }
            if let Some(runs) = runs {
                config.runs = runs;
            }
            if let Some(target) = target {
                config.target = target;
            }
            config.validate()?;

            let range = SizeRange::new(start_code, end_code)?;
            driver::run_benchmarks(&config, range)?;
        }
        Command::Aggregate {
            start_code,
            end_code,
            results_dir,
            runs,
            output,
            json,
        } => {
            let mut config = base;
            if let Some(results_dir) = results_dir {
                config.results_dir = results_dir;
            }
            if let Some(runs) = runs {
                config.runs = runs;
            }
            config.validate()?;

            let range = SizeRange::new(start_code, end_code)?;
            let table = aggregate::collect(&config, range)?;

            fs::write(&output, table.to_csv())
                .with_context(|| format!("Failed to write {}", output.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                print!("{}", display::format_summary(&table, &output));
            }
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}
