//! Row/column projections of an [`Alignment`].

use crate::alignment::Alignment;

/// Read-only projection of an alignment by an ordered row subset and an
/// ordered column subset.
///
/// Positions passed to view methods are relative to the view; the original
/// alignment coordinates are available through [`row_indices`] and
/// [`column_indices`].
///
/// [`row_indices`]: AlignmentView::row_indices
/// [`column_indices`]: AlignmentView::column_indices
#[derive(Debug, Clone)]
pub struct AlignmentView<'a> {
    source: &'a Alignment,
    rows: Vec<usize>,
    columns: Vec<usize>,
}

impl<'a> AlignmentView<'a> {
    /// View over the whole alignment.
    pub fn full(source: &'a Alignment) -> Self {
        Self {
            source,
            rows: (0..source.n_rows()).collect(),
            columns: (0..source.width()).collect(),
        }
    }

    #[inline]
    pub fn source(&self) -> &'a Alignment {
        self.source
    }

    /// Number of rows (the sample size `n`).
    #[inline]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the view.
    #[inline]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Alignment row indices selected by this view, in order.
    #[inline]
    pub fn row_indices(&self) -> &[usize] {
        &self.rows
    }

    /// Alignment column indices selected by this view, in order.
    #[inline]
    pub fn column_indices(&self) -> &[usize] {
        &self.columns
    }

    /// Identifiers of the selected rows.
    pub fn ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        let source = self.source;
        self.rows.iter().map(move |&r| source.rows()[r].id())
    }

    /// Residue at view-relative `(row, column)`.
    #[inline]
    pub fn residue(&self, row: usize, column: usize) -> u8 {
        self.source.residue(self.rows[row], self.columns[column])
    }

    /// Residues of one view column, top to bottom.
    pub fn column(&self, column: usize) -> impl Iterator<Item = u8> + '_ {
        let col = self.columns[column];
        self.rows.iter().map(move |&r| self.source.residue(r, col))
    }

    /// Residues of one view row restricted to the view's columns.
    pub fn row(&self, row: usize) -> Vec<u8> {
        let r = self.rows[row];
        self.columns
            .iter()
            .map(|&c| self.source.residue(r, c))
            .collect()
    }

    /// Derive a narrower view.
    ///
    /// `rows` and `columns` are positions within this view; `None` keeps all
    /// of them. Order is preserved as given.
    pub fn restrict(&self, rows: Option<&[usize]>, columns: Option<&[usize]>) -> Self {
        let rows = match rows {
            Some(sel) => sel.iter().map(|&i| self.rows[i]).collect(),
            None => self.rows.clone(),
        };
        let columns = match columns {
            Some(sel) => sel.iter().map(|&j| self.columns[j]).collect(),
            None => self.columns.clone(),
        };

        Self {
            source: self.source,
            rows,
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alignment() -> Alignment {
        Alignment::from_pairs([("a", "ACGT"), ("b", "ACCT"), ("c", "TCGA")]).unwrap()
    }

    #[test]
    fn test_full_view() {
        let aln = alignment();
        let view = aln.view();
        assert_eq!(view.n_rows(), 3);
        assert_eq!(view.width(), 4);
        assert_eq!(view.ids().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(view.column(2).collect::<Vec<_>>(), b"GCG".to_vec());
    }

    #[test]
    fn test_restrict_rows_and_columns() {
        let aln = alignment();
        let view = aln.view().restrict(Some(&[0, 2]), Some(&[0, 3]));
        assert_eq!(view.ids().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(view.row(0), b"AT".to_vec());
        assert_eq!(view.row(1), b"TA".to_vec());
        assert_eq!(view.column_indices(), &[0, 3]);
    }

    #[test]
    fn test_restrict_is_relative_to_view() {
        let aln = alignment();
        let narrow = aln.view().restrict(None, Some(&[1, 2, 3]));
        let narrower = narrow.restrict(Some(&[1]), Some(&[1]));
        assert_eq!(narrower.column_indices(), &[2]);
        assert_eq!(narrower.row_indices(), &[1]);
        assert_eq!(narrower.residue(0, 0), b'C');
    }
}
