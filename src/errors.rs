use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum MbevalError {
    #[error("Size code {code} is out of range (10\u{2013}28)")]
    SizeCodeOutOfRange { code: u32 },

    #[error("Invalid size-code range: start {start} is greater than end {end}")]
    InvalidRange { start: u32, end: u32 },

    #[error("Run count {runs} is too small for a trimmed mean (minimum 3)")]
    RunCountTooSmall { runs: u32 },

    #[error("Failed to read capture file {path}: {source}")]
    StatFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed timing line in {path}: {line:?}")]
    MalformedTimingLine { path: PathBuf, line: String },

    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {detail}")]
    ConfigParse { path: PathBuf, detail: String },
}
