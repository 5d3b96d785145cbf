use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::table::ResultTable;

/// One dimmed progress line per benchmark invocation.
pub fn print_run_progress(label: &str, run: u32, total: u32) {
    let line = format!("[{label}] run {run}/{total}");
    println!(
        "{}",
        line.if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
}

/// Warning for an invocation whose spawn or exit went wrong. The run is not
/// retried; the capture file just ends up with fewer timing lines.
pub fn print_run_warning(label: &str, run: u32, detail: &str) {
    let line = format!("[{label}] run {run}: {detail}");
    eprintln!(
        "{}",
        line.if_supports_color(Stream::Stderr, |s| s.yellow())
    );
}

/// Human-readable aggregation summary: where the CSV went, then one aligned
/// line per size code with the three trimmed means.
pub fn format_summary(table: &ResultTable, output: &Path) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Wrote {} ({} size code{})\n",
        output.display(),
        table.entries().len(),
        if table.entries().len() == 1 { "" } else { "s" },
    ));

    let label_width = table
        .entries()
        .iter()
        .map(|e| e.label.len())
        .max()
        .unwrap_or(0);

    for entry in table.entries() {
        out.push_str(&format!(
            "  {:label_width$}  pre {}  kernel {}  post {}\n",
            entry.label, entry.preprocess, entry.kernel, entry.postprocess,
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::SizeEntry;
    use rust_decimal_macros::dec;
    use std::path::PathBuf;

    fn sample_table() -> ResultTable {
        let mut table = ResultTable::new(1);
        table.push(SizeEntry {
            label: "4k",
            preprocess: dec!(1),
            kernel: dec!(2),
            postprocess: dec!(4),
        });
        table.push(SizeEntry {
            label: "128k",
            preprocess: dec!(0.5),
            kernel: dec!(2.5),
            postprocess: dec!(0.125),
        });
        table
    }

    #[test]
    fn summary_names_output_and_counts_codes() {
        let summary = format_summary(&sample_table(), &PathBuf::from("final_stat.csv"));
        assert!(summary.starts_with("Wrote final_stat.csv (2 size codes)"));
    }

    #[test]
    fn summary_lists_every_code() {
        let summary = format_summary(&sample_table(), &PathBuf::from("final_stat.csv"));
        assert!(summary.contains("4k"));
        assert!(summary.contains("128k"));
        assert!(summary.contains("kernel 2.5"));
    }

    #[test]
    fn summary_singular_for_one_code() {
        let mut table = ResultTable::new(1);
        table.push(SizeEntry {
            label: "1g",
            preprocess: dec!(0),
            kernel: dec!(0),
            postprocess: dec!(0),
        });
        let summary = format_summary(&table, &PathBuf::from("out.csv"));
        assert!(summary.contains("(1 size code)"));
    }

    #[test]
    fn summary_of_empty_table() {
        let summary = format_summary(&ResultTable::new(1), &PathBuf::from("out.csv"));
        assert!(summary.contains("(0 size codes)"));
        assert_eq!(summary.lines().count(), 1);
    }
}
