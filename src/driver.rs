use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::display;
use crate::sizes::{self, SizeRange};

/// Run the benchmark for every size code in the range, capturing stdout.
///
/// The results directory is cleared up front. For each code a fresh
/// `res_<label>/` subdirectory is created and the benchmark is invoked
/// `config.runs` times, strictly sequentially, all output accumulating into
/// one capture file. The capture handle is scoped to the size code: opened,
/// filled, and closed before the next code starts.
///
/// Exit status and stderr of the benchmark are not part of any contract. A
/// failed spawn or non-zero exit is reported and skipped, never retried —
/// the aggregator will simply see fewer matching lines.
pub fn run_benchmarks(config: &Config, range: SizeRange) -> Result<()> {
    reset_results_dir(&config.results_dir)?;

    for code in range.codes() {
        let label = sizes::size_label(code)?;
        let dir = config.res_dir(label);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create results directory {}", dir.display()))?;

        let stat_path = config.stat_path(label);
        let mut capture = File::create(&stat_path)
            .with_context(|| format!("Failed to create capture file {}", stat_path.display()))?;

        for run in 1..=config.runs {
            display::print_run_progress(label, run, config.runs);

            match benchmark_command(config, code).output() {
                Ok(output) => {
                    if !output.status.success() {
                        display::print_run_warning(
                            label,
                            run,
                            &format!("benchmark exited with {}", output.status),
                        );
                    }
                    capture.write_all(&output.stdout).with_context(|| {
                        format!("Failed to write capture file {}", stat_path.display())
                    })?;
                }
                Err(err) => {
                    display::print_run_warning(
                        label,
                        run,
                        &format!(
                            "failed to start {}: {}",
                            config.bench_program.display(),
                            err
                        ),
                    );
                }
            }
        }
    }

    Ok(())
}

/// `<prog> --target=<TARGET> <size_code> <loop_count>`
fn benchmark_command(config: &Config, code: u32) -> Command {
    let mut command = Command::new(&config.bench_program);
    command
        .arg(format!("--target={}", config.target))
        .arg(code.to_string())
        .arg(config.loop_count.to_string());
    command
}

/// Remove any prior results tree and start from an empty directory.
fn reset_results_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)
            .with_context(|| format!("Failed to clear results directory {}", dir.display()))?;
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create results directory {}", dir.display()))
}
