use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or constructing an alignment.
#[derive(Debug, Error)]
pub enum AlignmentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Alignment contains no sequences")]
    Empty,

    /// Rows must all have the width of the first row.
    #[error("Sequence '{id}' has length {found}, expected {expected}")]
    RaggedRow {
        id: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid {molecule} residue '{residue}' in sequence '{id}' at column {column}")]
    InvalidResidue {
        id: String,
        residue: char,
        column: usize,
        molecule: crate::Molecule,
    },

    #[error("Unknown molecule type '{0}'. Use: dna, rna or protein")]
    UnknownMolecule(String),
}

impl AlignmentError {
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
