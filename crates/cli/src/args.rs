use anyhow::{bail, Result};
use clap::Args;
use divstat_align::{Molecule, ReadOptions};
use divstat_analysis::WindowSpec;
use std::path::PathBuf;

use crate::defaults;
use crate::printing::OutputFormat;

/// Alignment inputs shared by every subcommand.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Alignment files in FASTA format
    ///
    /// Each file is one alignment and is analysed on its own, in the order given.
    #[arg(required = true, value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Molecule type used to validate residues (dna, rna, protein)
    #[arg(short, long, default_value = defaults::MOLECULE)]
    pub molecule: Molecule,

    /// Gap symbol
    #[arg(long, default_value_t = defaults::GAP)]
    pub gap: char,
}

impl InputArgs {
    pub fn gap_byte(&self) -> Result<u8> {
        if !self.gap.is_ascii() {
            bail!("Gap symbol must be a single ASCII character, got '{}'", self.gap);
        }
        Ok(self.gap.to_ascii_uppercase() as u8)
    }

    pub fn read_options(&self) -> Result<ReadOptions> {
        Ok(ReadOptions {
            molecule: self.molecule,
            gap: self.gap_byte()?,
        })
    }
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Report pairwise nucleotide diversity for every pair of sequences
    #[arg(short, long)]
    pub pairwise: bool,

    /// Sliding window as WIDTH:STEP:STAT
    ///
    /// STAT is one of pi (diversity), theta (Watterson) or tajima (Tajima's D).
    /// Windows run over gap-free columns only. Combined with --pairwise the
    /// statistic is always diversity.
    #[arg(short, long, value_name = "WIDTH:STEP:STAT")]
    pub window: Option<WindowSpec>,

    /// Report absolute values instead of per-site values
    #[arg(short, long)]
    pub absolute: bool,

    /// Free-text label attached to every result
    #[arg(short, long)]
    pub label: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Do not print column headers
    #[arg(long)]
    pub no_header: bool,
}
