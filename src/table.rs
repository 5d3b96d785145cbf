use rust_decimal::Decimal;
use serde::Serialize;

/// Row labels of the summary spreadsheet, in output order.
pub const ROW_LABELS: [&str; 5] = [
    "I/O datasize",
    "Loop Number",
    "Preprocess",
    "Kernel",
    "Postprocess",
];

/// One column of the summary: the trimmed means for a single size code.
#[derive(Debug, Clone, Serialize)]
pub struct SizeEntry {
    pub label: &'static str,
    pub preprocess: Decimal,
    pub kernel: Decimal,
    pub postprocess: Decimal,
}

/// The assembled summary table, one entry per processed size code in
/// ascending code order. Serialized once, to CSV and optionally JSON.
#[derive(Debug, Clone, Serialize)]
pub struct ResultTable {
    loop_count: u32,
    entries: Vec<SizeEntry>,
}

impl ResultTable {
    pub fn new(loop_count: u32) -> Self {
        Self {
            loop_count,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, entry: SizeEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[SizeEntry] {
        &self.entries
    }

    /// Render the five-row CSV: each row starts with its label, followed by
    /// one field per size code. None of the fields can contain a comma, so
    /// no quoting is needed.
    pub fn to_csv(&self) -> String {
        let mut rows: [Vec<String>; 5] = ROW_LABELS.map(|label| vec![label.to_string()]);
        for entry in &self.entries {
            rows[0].push(entry.label.to_string());
            rows[1].push(self.loop_count.to_string());
            rows[2].push(entry.preprocess.to_string());
            rows[3].push(entry.kernel.to_string());
            rows[4].push(entry.postprocess.to_string());
        }

        let mut out = String::new();
        for row in rows {
            out.push_str(&row.join(","));
            out.push('\n');
        }
        out
    }
}
