//! FASTA alignment reader.
//!
//! ```text
//! >seq1 optional description
//! ACGT-ACGT
//! ACGT
//! >seq2
//! ACGTTACGTACGA
//! ```
//!
//! The identifier is the first whitespace-delimited token of the header.
//! Sequences may span several lines; blank lines are ignored. Residues are
//! upper-cased and checked against the selected [`Molecule`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::alignment::{Alignment, Row};
use crate::errors::AlignmentError;
use crate::molecule::Molecule;

/// Options controlling how residues are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    pub molecule: Molecule,
    pub gap: u8,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            molecule: Molecule::Dna,
            gap: crate::sites::GAP,
        }
    }
}

/// Read one alignment from a FASTA file.
pub fn read_fasta(path: impl AsRef<Path>, options: ReadOptions) -> Result<Alignment, AlignmentError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| AlignmentError::File {
        path: path.to_path_buf(),
        source,
    })?;

    let alignment = parse_fasta(BufReader::new(file), options)?;
    debug!(
        path = %path.display(),
        rows = alignment.n_rows(),
        width = alignment.width(),
        "loaded alignment"
    );
    Ok(alignment)
}

/// Parse one alignment from any buffered reader.
pub fn parse_fasta<R: BufRead>(reader: R, options: ReadOptions) -> Result<Alignment, AlignmentError> {
    let mut rows = Vec::new();
    let mut current_id: Option<String> = None;
    let mut current_seq: Vec<u8> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(id) = current_id.take() {
                rows.push(finish_row(id, std::mem::take(&mut current_seq), options)?);
            }

            let id = header
                .split_whitespace()
                .next()
                .ok_or_else(|| AlignmentError::parse(line_no + 1, "empty FASTA header"))?;
            current_id = Some(id.to_string());
        } else {
            if current_id.is_none() {
                return Err(AlignmentError::parse(
                    line_no + 1,
                    "sequence data before the first '>' header",
                ));
            }
            current_seq.extend(line.bytes().filter(|b| !b.is_ascii_whitespace()));
        }
    }

    if let Some(id) = current_id {
        rows.push(finish_row(id, current_seq, options)?);
    }

    Alignment::new(rows)
}

fn finish_row(id: String, mut residues: Vec<u8>, options: ReadOptions) -> Result<Row, AlignmentError> {
    residues.make_ascii_uppercase();

    if let Some((column, &residue)) = residues
        .iter()
        .enumerate()
        .find(|&(_, &r)| r != options.gap && !options.molecule.accepts(r))
    {
        return Err(AlignmentError::InvalidResidue {
            id,
            residue: residue as char,
            column: column + 1,
            molecule: options.molecule,
        });
    }

    Ok(Row::new(id, residues))
}
