use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::MbevalError;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "mbeval.toml";

/// A trimmed mean discards one sample at each end, so anything below three
/// runs leaves nothing to average.
pub const MIN_RUNS: u32 = 3;

/// Settings shared by the run driver and the aggregator.
///
/// Both sides must agree on `results_dir`, `loop_count` and `runs`: the
/// aggregator divides by `runs - 2` regardless of how many samples a capture
/// file actually holds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Benchmark executable invoked by the run driver.
    pub bench_program: PathBuf,
    /// Directory the driver populates and the aggregator reads.
    pub results_dir: PathBuf,
    /// Benchmark invocations per size code.
    pub runs: u32,
    /// Loop-count argument passed to the benchmark.
    pub loop_count: u32,
    /// Value for the benchmark's `--target=<TARGET>` flag.
    pub target: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bench_program: PathBuf::from("./micro_bench"),
            results_dir: PathBuf::from("eval_results"),
            runs: 10,
            loop_count: 1,
            target: "DIRECT".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from `mbeval.toml` in the working
    /// directory when no path is given. A missing default file yields the
    /// built-in defaults; an explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, MbevalError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(CONFIG_FILE), false),
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path).map_err(|source| MbevalError::ConfigRead {
            path: path.clone(),
            source,
        })?;

        toml::from_str(&raw).map_err(|err| MbevalError::ConfigParse {
            path,
            detail: err.to_string(),
        })
    }

    pub fn validate(&self) -> Result<(), MbevalError> {
        if self.runs < MIN_RUNS {
            return Err(MbevalError::RunCountTooSmall { runs: self.runs });
        }
        Ok(())
    }

    /// Per-size-code results directory, e.g. `eval_results/res_4k`.
    pub fn res_dir(&self, label: &str) -> PathBuf {
        self.results_dir.join(format!("res_{label}"))
    }

    /// Capture file for one size code, e.g.
    /// `eval_results/res_4k/prof_res_4k_loop1.stat`.
    pub fn stat_path(&self, label: &str) -> PathBuf {
        self.res_dir(label)
            .join(format!("prof_res_{label}_loop{}.stat", self.loop_count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.bench_program, PathBuf::from("./micro_bench"));
        assert_eq!(config.results_dir, PathBuf::from("eval_results"));
        assert_eq!(config.runs, 10);
        assert_eq!(config.loop_count, 1);
        assert_eq!(config.target, "DIRECT");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn capture_paths_follow_results_layout() {
        let config = Config::default();
        assert_eq!(
            config.res_dir("4k"),
            PathBuf::from("eval_results/res_4k")
        );
        assert_eq!(
            config.stat_path("4k"),
            PathBuf::from("eval_results/res_4k/prof_res_4k_loop1.stat")
        );
    }

    #[test]
    fn load_missing_default_file_yields_defaults() {
        // The crate root has no mbeval.toml, so the optional lookup falls
        // back to defaults.
        let config = Config::load(None).unwrap();
        assert_eq!(config.runs, 10);
    }

    #[test]
    fn load_explicit_missing_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nope.toml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn load_partial_file_keeps_defaults_for_the_rest() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "runs = 5\ntarget = \"ASE\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.runs, 5);
        assert_eq!(config.target, "ASE");
        assert_eq!(config.results_dir, PathBuf::from("eval_results"));
        assert_eq!(config.loop_count, 1);
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "iterations = 5\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn run_count_below_three_is_rejected() {
        let config = Config {
            runs: 2,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("trimmed mean"));
    }
}
