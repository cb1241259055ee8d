use anyhow::{Context, Result};
use divstat_align::read_fasta;
use divstat_analysis::{AnalysisConfig, AnalysisMode, Analyzer, Normalization, Statistic};
use std::io;
use tracing::{info, warn};

use super::source_name;
use crate::args::AnalyzeArgs;
use crate::printing::{OutputConfig, Printer};

pub fn analyze_alignments(args: &AnalyzeArgs) -> Result<()> {
    let options = args.input.read_options()?;
    let config = build_config(args, options.gap);
    let analyzer = Analyzer::new(config).context("Invalid analysis configuration")?;

    let output_config = OutputConfig {
        format: args.format,
        header: !args.no_header,
    };
    let mut printer = Printer::new(io::stdout().lock(), output_config);
    let label = analyzer.config().label.as_deref();

    for path in &args.input.inputs {
        let alignment = read_fasta(path, options)
            .with_context(|| format!("Failed to read alignment {}", path.display()))?;
        let output = analyzer
            .analyze(&alignment)
            .with_context(|| format!("Failed to analyse {}", path.display()))?;

        printer
            .print(&source_name(path), label, &output)
            .context("Failed to write results")?;
        info!(file = %path.display(), "finished");
    }

    printer.finish().context("Failed to write results")?;
    Ok(())
}

fn build_config(args: &AnalyzeArgs, gap: u8) -> AnalysisConfig {
    if args.pairwise {
        if let Some(spec) = args.window.filter(|s| s.statistic != Statistic::Diversity) {
            warn!(
                statistic = %spec.statistic,
                "pairwise windows always report diversity"
            );
        }
    }

    let normalization = if args.absolute {
        Normalization::Absolute
    } else {
        Normalization::PerSite
    };

    let config = AnalysisConfig::new(AnalysisMode::select(args.pairwise, args.window))
        .with_normalization(normalization)
        .with_gap(gap);

    match &args.label {
        Some(label) => config.with_label(label.clone()),
        None => config,
    }
}
