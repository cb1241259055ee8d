//! # Analysis crate
//!
//! Population genetics summary statistics computed from a multiple sequence
//! alignment:
//! - Watterson's estimator (θ_W) and nucleotide diversity (π) with
//!   standard errors
//! - Tajima's D, Fu & Li's D* and F*
//! - allele count, heterozygosity and the Ewens / Karlin-McGregor
//!   partition predictions
//!
//! Statistics can be computed for the whole alignment, for every pair of
//! sequences, or in sliding windows over the gap-free columns.

pub mod bundle;
pub mod config;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod modes;
pub mod partition;

pub use bundle::{AnalysisOutput, PairwiseMatrix, StatisticBundle, WindowMatrix, WindowRecord};
pub use config::{AnalysisConfig, AnalysisMode, Normalization, Statistic, WindowSpec};
pub use constants::CoalescentConstants;
pub use engine::{Estimates, StandardErrors, StatisticsEngine};
pub use errors::AnalysisError;
pub use modes::Analyzer;
pub use partition::AllelePartition;
