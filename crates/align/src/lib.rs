//! # Alignment crate
//!
//! Data model shared by the divstat crates: an immutable multiple sequence
//! alignment, borrowed row/column views over it, the site filter that
//! derives gap-free and segregating columns, and a FASTA reader.

pub mod alignment;
pub mod errors;
pub mod fasta;
pub mod molecule;
pub mod sites;
pub mod view;

pub use alignment::{Alignment, Row};
pub use errors::AlignmentError;
pub use fasta::{parse_fasta, read_fasta, ReadOptions};
pub use molecule::Molecule;
pub use sites::{SiteFilter, SiteSet, GAP};
pub use view::AlignmentView;
