use thiserror::Error;

/// Errors reported by the analysis layer.
///
/// Degenerate numeric input (no gap-free sites, no segregating sites,
/// zero-variance denominators) is not an error; see the engine docs for the
/// substitutions applied there.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid window specification: {0}")]
    InvalidWindow(String),

    #[error("Unknown statistic '{0}'. Use: pi, theta or tajima")]
    UnknownStatistic(String),

    #[error("At least 2 sequences are required, found {0}")]
    TooFewSequences(usize),

    /// A window was cut with the wrong number of columns. This is a logic
    /// defect, never a property of the input.
    #[error("Window starting at column {start} has {found} columns, expected {expected}")]
    WindowWidthMismatch {
        start: usize,
        expected: usize,
        found: usize,
    },
}
