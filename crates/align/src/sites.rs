//! Gap-free and segregating site selection.

use crate::view::AlignmentView;

/// Default gap symbol.
pub const GAP: u8 = b'-';

/// Classifies the columns of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteFilter {
    gap: u8,
}

/// The two narrowed views every analysis unit works on.
#[derive(Debug, Clone)]
pub struct SiteSet<'a> {
    /// Columns without a gap in any row (width `L`).
    pub gap_free: AlignmentView<'a>,
    /// Gap-free columns with more than one residue (width `S`).
    pub segregating: AlignmentView<'a>,
}

impl Default for SiteFilter {
    fn default() -> Self {
        Self { gap: GAP }
    }
}

impl SiteFilter {
    pub fn new(gap: u8) -> Self {
        Self { gap }
    }

    #[inline]
    pub fn gap(&self) -> u8 {
        self.gap
    }

    /// View positions of the columns where no row carries the gap symbol.
    pub fn gap_free_columns(&self, view: &AlignmentView<'_>) -> Vec<usize> {
        (0..view.width())
            .filter(|&j| view.column(j).all(|r| r != self.gap))
            .collect()
    }

    /// View positions of the gap-free columns that are variable.
    pub fn segregating_columns(&self, view: &AlignmentView<'_>) -> Vec<usize> {
        self.gap_free_columns(view)
            .into_iter()
            .filter(|&j| is_variable(view, j))
            .collect()
    }

    /// Narrow `view` to its gap-free columns, then to its segregating columns.
    pub fn partition<'a>(&self, view: &AlignmentView<'a>) -> SiteSet<'a> {
        let gap_free = view.restrict(None, Some(&self.gap_free_columns(view)));
        let variable: Vec<usize> = (0..gap_free.width())
            .filter(|&j| is_variable(&gap_free, j))
            .collect();
        let segregating = gap_free.restrict(None, Some(&variable));

        SiteSet {
            gap_free,
            segregating,
        }
    }
}

/// True if column `j` holds more than one distinct residue.
fn is_variable(view: &AlignmentView<'_>, j: usize) -> bool {
    let mut column = view.column(j);
    match column.next() {
        Some(first) => column.any(|r| r != first),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Alignment;

    #[test]
    fn test_gap_free_columns() {
        let aln = Alignment::from_pairs([("a", "A-GTC"), ("b", "ACG-C"), ("c", "ACGTT")]).unwrap();
        let filter = SiteFilter::default();
        assert_eq!(filter.gap_free_columns(&aln.view()), vec![0, 2, 4]);
    }

    #[test]
    fn test_segregating_columns_skip_gapped() {
        let aln = Alignment::from_pairs([("a", "A-GTC"), ("b", "ACG-C"), ("c", "ATGAT")]).unwrap();
        let filter = SiteFilter::default();
        // Column 1 and 3 vary but carry gaps.
        assert_eq!(filter.segregating_columns(&aln.view()), vec![4]);
    }

    #[test]
    fn test_identical_rows_have_no_segregating_sites() {
        let aln = Alignment::from_pairs([("a", "ACGTACGTAC"); 4]).unwrap();
        let sites = SiteFilter::default().partition(&aln.view());
        assert_eq!(sites.gap_free.width(), 10);
        assert_eq!(sites.segregating.width(), 0);
    }

    #[test]
    fn test_partition_keeps_alignment_coordinates() {
        let aln = Alignment::from_pairs([("a", "A-GTCA"), ("b", "ACG-CA"), ("c", "ACCTTA")]).unwrap();
        let sites = SiteFilter::default().partition(&aln.view());
        assert_eq!(sites.gap_free.column_indices(), &[0, 2, 4, 5]);
        assert_eq!(sites.segregating.column_indices(), &[2, 4]);
    }

    #[test]
    fn test_pair_local_gap_filtering() {
        let aln = Alignment::from_pairs([("a", "AC-T"), ("b", "AGCT"), ("c", "TGCA")]).unwrap();
        let filter = SiteFilter::default();
        let pair = aln.view().restrict(Some(&[1, 2]), None);
        // Column 2 is gapped only in row "a".
        assert_eq!(filter.gap_free_columns(&pair), vec![0, 1, 2, 3]);
        assert_eq!(filter.segregating_columns(&pair), vec![0, 3]);
    }

    #[test]
    fn test_custom_gap_symbol() {
        let aln = Alignment::from_pairs([("a", "A.C"), ("b", "AAC")]).unwrap();
        let filter = SiteFilter::new(b'.');
        assert_eq!(filter.gap_free_columns(&aln.view()), vec![0, 2]);
    }

    #[test]
    fn test_zero_width() {
        let aln = Alignment::from_pairs([("a", ""), ("b", "")]).unwrap();
        let sites = SiteFilter::default().partition(&aln.view());
        assert_eq!(sites.gap_free.width(), 0);
        assert_eq!(sites.segregating.width(), 0);
    }
}
