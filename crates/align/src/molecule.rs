use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AlignmentError;

/// Residue alphabet of an alignment.
///
/// Only unambiguous residues are accepted. The gap symbol is configured
/// separately and is always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Molecule {
    #[default]
    Dna,
    Rna,
    Protein,
}

const AMINO_ACIDS: &[u8; 20] = b"ACDEFGHIKLMNPQRSTVWY";

impl Molecule {
    /// Return true if the uppercase ASCII byte is a residue of this alphabet.
    #[inline]
    pub fn accepts(self, byte: u8) -> bool {
        match self {
            Self::Dna => matches!(byte, b'A' | b'C' | b'G' | b'T'),
            Self::Rna => matches!(byte, b'A' | b'C' | b'G' | b'U'),
            Self::Protein => AMINO_ACIDS.contains(&byte),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dna => "dna",
            Self::Rna => "rna",
            Self::Protein => "protein",
        }
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Molecule {
    type Err = AlignmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dna" | "nucleotide" => Ok(Self::Dna),
            "rna" => Ok(Self::Rna),
            "protein" | "aa" => Ok(Self::Protein),
            _ => Err(AlignmentError::UnknownMolecule(s.to_string())),
        }
    }
}
