use rust_decimal::Decimal;

/// The three timing metrics a benchmark invocation reports, identified by a
/// fixed marker substring on the output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Preprocess,
    Kernel,
    Postprocess,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [
        MetricKind::Preprocess,
        MetricKind::Kernel,
        MetricKind::Postprocess,
    ];

    pub fn marker(self) -> &'static str {
        match self {
            MetricKind::Preprocess => "one-time preprocess",
            MetricKind::Kernel => "kernel execution",
            MetricKind::Postprocess => "one-time postprocess",
        }
    }

    pub fn row_label(self) -> &'static str {
        match self {
            MetricKind::Preprocess => "Preprocess",
            MetricKind::Kernel => "Kernel",
            MetricKind::Postprocess => "Postprocess",
        }
    }

    /// Classify an output line by marker substring. Lines without any marker
    /// are not timing lines and are skipped by the caller.
    pub fn classify(line: &str) -> Option<MetricKind> {
        Self::ALL.into_iter().find(|kind| line.contains(kind.marker()))
    }
}

/// Running (sum, max, min, count) over the samples of one metric, folded in
/// a single pass over a capture file. All arithmetic is exact decimal.
#[derive(Debug, Clone, Default)]
pub struct MetricAccumulator {
    sum: Decimal,
    max: Option<Decimal>,
    min: Option<Decimal>,
    count: u32,
}

impl MetricAccumulator {
    pub fn observe(&mut self, value: Decimal) {
        self.sum += value;
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.count += 1;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Trimmed mean: drop the single highest and lowest sample, average the
    /// rest as `(sum - max - min) / (expected - 2)`.
    ///
    /// The divisor is always `expected - 2`, even when fewer samples were
    /// actually observed — a short capture file produces a skewed figure, not
    /// an error. An empty accumulator reduces to zero.
    pub fn trimmed_mean(&self, expected: u32) -> Decimal {
        let max = self.max.unwrap_or_default();
        let min = self.min.unwrap_or_default();
        (self.sum - max - min) / Decimal::from(expected - 2)
    }
}
