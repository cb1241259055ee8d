use anyhow::{bail, Result};
use divstat_align::{read_fasta, SiteFilter};
use tracing::warn;

use crate::args::InputArgs;

/// Load every alignment and report its shape without computing statistics.
pub fn validate_alignments(args: &InputArgs) -> Result<()> {
    let options = args.read_options()?;
    let filter = SiteFilter::new(options.gap);
    let mut failures = 0;

    for path in &args.inputs {
        println!("Validating alignment: {}", path.display());

        let alignment = match read_fasta(path, options) {
            Ok(alignment) => alignment,
            Err(e) => {
                println!("✗ {e}");
                failures += 1;
                continue;
            }
        };

        let view = alignment.view();
        let sites = filter.partition(&view);
        println!("✓ Sequences: {}", alignment.n_rows());
        println!("✓ Columns: {}", alignment.width());
        println!("✓ Gap-free columns: {}", sites.gap_free.width());
        println!("✓ Segregating sites: {}", sites.segregating.width());

        if alignment.n_rows() < 2 {
            println!("⚠️  Fewer than two sequences; statistics cannot be computed");
            failures += 1;
        } else if sites.gap_free.width() == 0 {
            warn!(file = %path.display(), "no gap-free columns");
        }
    }

    if failures > 0 {
        bail!("{failures} of {} alignment(s) failed validation", args.inputs.len());
    }
    println!("\nAll alignments are valid");
    Ok(())
}
