//! In-memory multiple sequence alignment.

use serde::{Deserialize, Serialize};

use crate::errors::AlignmentError;
use crate::view::AlignmentView;

/// A single aligned sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    id: String,
    residues: Vec<u8>,
}

impl Row {
    pub fn new(id: impl Into<String>, residues: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            residues: residues.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn residues(&self) -> &[u8] {
        &self.residues
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

/// An ordered set of equal-length rows.
///
/// The alignment is never modified once built. Analyses borrow it through
/// [`AlignmentView`]s that select rows and columns without copying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    rows: Vec<Row>,
    width: usize,
}

impl Alignment {
    /// Build an alignment, checking that it has at least one row and that
    /// every row has the same width.
    pub fn new(rows: Vec<Row>) -> Result<Self, AlignmentError> {
        let width = rows.first().ok_or(AlignmentError::Empty)?.len();

        if let Some(bad) = rows.iter().find(|row| row.len() != width) {
            return Err(AlignmentError::RaggedRow {
                id: bad.id.clone(),
                expected: width,
                found: bad.len(),
            });
        }

        Ok(Self { rows, width })
    }

    /// Convenience constructor from `(identifier, sequence)` pairs.
    ///
    /// ```
    /// use divstat_align::Alignment;
    ///
    /// let aln = Alignment::from_pairs([("a", "AAAA"), ("b", "AATA")]).unwrap();
    /// assert_eq!(aln.n_rows(), 2);
    /// assert_eq!(aln.width(), 4);
    /// ```
    pub fn from_pairs<I, S, T>(pairs: I) -> Result<Self, AlignmentError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: AsRef<[u8]>,
    {
        let rows = pairs
            .into_iter()
            .map(|(id, seq)| Row::new(id, seq.as_ref().to_vec()))
            .collect();
        Self::new(rows)
    }

    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns shared by every row.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[inline]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    #[inline]
    pub(crate) fn residue(&self, row: usize, column: usize) -> u8 {
        self.rows[row].residues[column]
    }

    /// View over every row and column.
    pub fn view(&self) -> AlignmentView<'_> {
        AlignmentView::full(self)
    }
}
