//! Analysis configuration.
//!
//! The configuration is a plain value: it is built once per run (usually
//! from command-line arguments), validated, and applied to every alignment
//! in the batch.

use std::fmt;
use std::str::FromStr;

use divstat_align::GAP;
use serde::{Deserialize, Serialize};

use crate::errors::AnalysisError;

/// Statistic reported per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    /// Nucleotide diversity (pi).
    Diversity,
    /// Watterson's estimator (theta_W).
    Watterson,
    /// Tajima's D.
    TajimaD,
}

impl Statistic {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diversity => "pi",
            Self::Watterson => "theta_w",
            Self::TajimaD => "tajima_d",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Statistic {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pi" | "d" | "diversity" => Ok(Self::Diversity),
            "theta" | "theta_w" | "w" | "watterson" => Ok(Self::Watterson),
            "tajima" | "tajima_d" | "t" => Ok(Self::TajimaD),
            _ => Err(AnalysisError::UnknownStatistic(s.to_string())),
        }
    }
}

/// Whether diversity and Watterson values are reported per site or as
/// totals over the analysed sites. Tajima's D is unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    #[default]
    PerSite,
    Absolute,
}

/// Sliding window parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSpec {
    /// Number of gap-free columns per window.
    pub width: usize,
    /// Gap-free columns between consecutive window starts.
    pub step: usize,
    pub statistic: Statistic,
}

impl WindowSpec {
    pub fn new(width: usize, step: usize, statistic: Statistic) -> Result<Self, AnalysisError> {
        let spec = Self {
            width,
            step,
            statistic,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.width == 0 {
            return Err(AnalysisError::InvalidWindow(
                "width must be a positive integer".to_string(),
            ));
        }
        if self.step == 0 {
            return Err(AnalysisError::InvalidWindow(
                "step must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}

impl FromStr for WindowSpec {
    type Err = AnalysisError;

    /// Parse `WIDTH:STEP:STAT`, e.g. `100:25:pi`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let [width, step, statistic] = parts.as_slice() else {
            return Err(AnalysisError::InvalidWindow(format!(
                "'{s}' (expected WIDTH:STEP:STAT)"
            )));
        };

        let parse_int = |field: &str, name: &str| {
            field.parse::<usize>().map_err(|_| {
                AnalysisError::InvalidWindow(format!("{name} '{field}' is not a positive integer"))
            })
        };

        Self::new(
            parse_int(*width, "width")?,
            parse_int(*step, "step")?,
            statistic.parse()?,
        )
    }
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.width, self.step, self.statistic)
    }
}

/// Which analysis units are computed for each alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum AnalysisMode {
    /// One unit covering the whole alignment.
    #[default]
    Whole,
    /// One unit per unordered pair of rows.
    Pairwise,
    /// One unit per window of gap-free columns.
    Window(WindowSpec),
    /// One pairwise diversity matrix per window.
    WindowPairwise(WindowSpec),
}

impl AnalysisMode {
    /// Build the mode from the two orthogonal selectors.
    ///
    /// Combining windows with pairwise output always reports diversity.
    pub fn select(pairwise: bool, window: Option<WindowSpec>) -> Self {
        match (pairwise, window) {
            (false, None) => Self::Whole,
            (true, None) => Self::Pairwise,
            (false, Some(spec)) => Self::Window(spec),
            (true, Some(spec)) => Self::WindowPairwise(WindowSpec {
                statistic: Statistic::Diversity,
                ..spec
            }),
        }
    }
}

/// Complete configuration of an analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub mode: AnalysisMode,
    #[serde(default)]
    pub normalization: Normalization,
    /// Free-text label attached to every result.
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "default_gap")]
    pub gap: u8,
}

fn default_gap() -> u8 {
    GAP
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: AnalysisMode::Whole,
            normalization: Normalization::PerSite,
            label: None,
            gap: GAP,
        }
    }
}

impl AnalysisConfig {
    pub fn new(mode: AnalysisMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_gap(mut self, gap: u8) -> Self {
        self.gap = gap;
        self
    }

    /// Reject invalid settings before anything is computed.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        match &self.mode {
            AnalysisMode::Window(spec) | AnalysisMode::WindowPairwise(spec) => spec.validate(),
            AnalysisMode::Whole | AnalysisMode::Pairwise => Ok(()),
        }
    }
}
