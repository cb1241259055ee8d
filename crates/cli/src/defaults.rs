//! Shared default values for the command-line interface.

pub const MOLECULE: &str = "dna";
pub const GAP: char = '-';

/// Column width of the plain-text table.
pub const CELL_WIDTH: usize = 12;
/// Decimal places printed for floating-point statistics.
pub const PRECISION: usize = 6;

pub const NOT_AVAILABLE: &str = "NA";
