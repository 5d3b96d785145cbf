use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::config::Config;
use crate::errors::MbevalError;
use crate::sizes::{self, SizeRange};
use crate::stats::{MetricAccumulator, MetricKind};
use crate::table::{ResultTable, SizeEntry};

/// Per-metric accumulators folded from one capture file.
#[derive(Debug, Default)]
pub struct FileStats {
    pub preprocess: MetricAccumulator,
    pub kernel: MetricAccumulator,
    pub postprocess: MetricAccumulator,
}

impl FileStats {
    fn metric_mut(&mut self, kind: MetricKind) -> &mut MetricAccumulator {
        match kind {
            MetricKind::Preprocess => &mut self.preprocess,
            MetricKind::Kernel => &mut self.kernel,
            MetricKind::Postprocess => &mut self.postprocess,
        }
    }
}

/// Scan one capture file line by line, folding every timing line into its
/// metric's accumulator. Lines without a marker substring are benchmark
/// chatter and are skipped; a marker line whose third token is not a decimal
/// number is fatal.
pub fn scan_stat_file(path: &Path) -> Result<FileStats, MbevalError> {
    let file = File::open(path).map_err(|source| MbevalError::StatFileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut stats = FileStats::default();
    for line in reader.lines() {
        let line = line.map_err(|source| MbevalError::StatFileRead {
            path: path.to_path_buf(),
            source,
        })?;

        let Some(kind) = MetricKind::classify(&line) else {
            continue;
        };

        let value = parse_metric_value(&line).ok_or_else(|| MbevalError::MalformedTimingLine {
            path: path.to_path_buf(),
            line: line.clone(),
        })?;

        stats.metric_mut(kind).observe(value);
    }

    Ok(stats)
}

/// The measured value is the third whitespace-separated token of a timing
/// line. The benchmark prints small values in scientific notation.
fn parse_metric_value(line: &str) -> Option<Decimal> {
    let token = line.split_whitespace().nth(2)?;
    Decimal::from_str(token)
        .or_else(|_| Decimal::from_scientific(token))
        .ok()
}

/// Reduce the capture files of every size code in the range to one summary
/// table. Files are processed independently, in ascending code order; the
/// only state crossing size codes is the table itself.
pub fn collect(config: &Config, range: SizeRange) -> Result<ResultTable, MbevalError> {
    let mut table = ResultTable::new(config.loop_count);

    for code in range.codes() {
        let label = sizes::size_label(code)?;
        let stats = scan_stat_file(&config.stat_path(label))?;

        table.push(SizeEntry {
            label,
            preprocess: stats.preprocess.trimmed_mean(config.runs),
            kernel: stats.kernel.trimmed_mean(config.runs),
            postprocess: stats.postprocess.trimmed_mean(config.runs),
        });
    }

    Ok(table)
}
