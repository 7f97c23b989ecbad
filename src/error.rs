use std::num::ParseFloatError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a csv from becoming a png.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("empty input, expected a header row with x and y labels")]
    MissingHeader,

    #[error("header has {found} label(s), expected at least 2 (x label, y label)")]
    IncompleteHeader { found: usize },

    #[error("no data rows after the header")]
    NoData,

    #[error("line {line}, column {column}: could not parse {token:?} as a number")]
    ParseValue {
        line: usize,
        column: usize,
        token: String,
        source: ParseFloatError,
    },

    #[error("line {line}, column {column}: {token:?} is not a finite number")]
    NonFinite {
        line: usize,
        column: usize,
        token: String,
    },

    #[error("line {line} has no column {column}")]
    MissingColumn { line: usize, column: usize },

    #[error("cannot derive an output name from {path}")]
    NoBaseName { path: PathBuf },

    #[error("series {series} spans a range too wide to draw")]
    RangeOverflow { series: String },

    #[error("plot {plot}: empty datum")]
    EmptyDatum { plot: String },

    #[error("plot {plot}: datum has {found} value(s), expected {expected}")]
    DimensionMismatch {
        plot: String,
        expected: usize,
        found: usize,
    },

    #[error("plot {plot}: bin count {found} differs from the {expected} it was created with")]
    BinCountMismatch {
        plot: String,
        expected: usize,
        found: usize,
    },

    #[error("plot {plot} already holds {existing} data")]
    KindMismatch { plot: String, existing: &'static str },

    #[error("no plot named {plot}")]
    UnknownPlot { plot: String },

    #[error("rendering failed: {0}")]
    Render(String),
}
