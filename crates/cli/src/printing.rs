//! Rendering of analysis results as plain-text tables, LaTeX rows or JSON.

use clap::ValueEnum;
use divstat_analysis::{
    AnalysisOutput, PairwiseMatrix, StatisticBundle, WindowMatrix, WindowRecord,
};
use serde::Serialize;
use std::io::{self, Write};

use crate::defaults::{CELL_WIDTH, NOT_AVAILABLE, PRECISION};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned plain-text columns
    Table,
    /// LaTeX tabular rows
    Latex,
    /// One JSON document per alignment
    Json,
}

/// How results are rendered. Passed explicitly to the [`Printer`].
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub header: bool,
}

const WHOLE_COLUMNS: [&str; 22] = [
    "alignment",
    "n",
    "k",
    "H",
    "E[k]",
    "P(k)",
    "length",
    "L",
    "S",
    "s",
    "theta_w",
    "theta_w/site",
    "se_w_norec",
    "se_w_free",
    "Pi",
    "pi",
    "se_pi_norec",
    "se_pi_free",
    "D",
    "D*",
    "F*",
    "label",
];

#[derive(Serialize)]
struct JsonRecord<'a> {
    source: &'a str,
    label: Option<&'a str>,
    output: &'a AnalysisOutput,
}

/// Writes results for a batch of alignments to `out`.
pub struct Printer<W: Write> {
    out: W,
    config: OutputConfig,
    whole_header_written: bool,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, config: OutputConfig) -> Self {
        Self {
            out,
            config,
            whole_header_written: false,
        }
    }

    /// Render the result of one alignment read from `source`.
    ///
    /// Pairwise and window blocks are introduced by a line naming the source
    /// and `label`; whole-alignment rows carry the label in their last column.
    pub fn print(
        &mut self,
        source: &str,
        label: Option<&str>,
        output: &AnalysisOutput,
    ) -> io::Result<()> {
        if self.config.format == OutputFormat::Json {
            let record = JsonRecord {
                source,
                label,
                output,
            };
            serde_json::to_writer(&mut self.out, &record)?;
            return writeln!(self.out);
        }

        let title = match label {
            Some(label) => format!("{source} {label}"),
            None => source.to_string(),
        };
        match output {
            AnalysisOutput::Whole(bundle) => self.print_bundle(source, bundle),
            AnalysisOutput::Pairwise(matrix) => {
                self.write_note(&title)?;
                self.print_matrix(matrix)
            }
            AnalysisOutput::Window(records) => {
                self.write_note(&title)?;
                self.print_windows(records)
            }
            AnalysisOutput::WindowPairwise(windows) => {
                self.write_note(&title)?;
                self.print_window_matrices(windows)
            }
        }
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn print_bundle(&mut self, source: &str, bundle: &StatisticBundle) -> io::Result<()> {
        if self.config.header && !self.whole_header_written {
            let header: Vec<String> = WHOLE_COLUMNS.iter().map(|c| c.to_string()).collect();
            self.write_row(&header)?;
            self.whole_header_written = true;
        }

        let row = vec![
            source.to_string(),
            bundle.sample_size.to_string(),
            bundle.allele_count.to_string(),
            value(bundle.heterozygosity),
            value(bundle.expected_allele_count),
            scientific(bundle.partition_probability),
            bundle.total_length.to_string(),
            bundle.gap_free_length.to_string(),
            bundle.segregating_sites.to_string(),
            value(bundle.segregating_fraction),
            value(bundle.theta_w),
            value(bundle.theta_w_per_site),
            value(bundle.theta_w_se.no_recombination),
            value(bundle.theta_w_se.free_recombination),
            value(bundle.pi_total),
            value(bundle.pi),
            value(bundle.pi_se.no_recombination),
            value(bundle.pi_se.free_recombination),
            value(bundle.tajima_d),
            optional(bundle.fu_li_d_star),
            optional(bundle.fu_li_f_star),
            bundle.label.clone().unwrap_or_else(|| "-".to_string()),
        ];
        self.write_row(&row)
    }

    fn print_windows(&mut self, records: &[WindowRecord]) -> io::Result<()> {
        if self.config.header {
            let header = ["first", "last", "midpoint", "value"].map(String::from);
            self.write_row(&header)?;
        }
        for record in records {
            // Columns are reported 1-based.
            let row = vec![
                (record.first_column + 1).to_string(),
                (record.last_column + 1).to_string(),
                format!("{:.1}", record.midpoint + 1.0),
                value(record.value),
            ];
            self.write_row(&row)?;
        }
        Ok(())
    }

    fn print_matrix(&mut self, matrix: &PairwiseMatrix) -> io::Result<()> {
        let n = matrix.ids.len();
        if self.config.header && n > 1 {
            let header: Vec<String> = std::iter::once(String::new())
                .chain(matrix.ids[..n - 1].iter().cloned())
                .collect();
            self.write_row(&header)?;
        }
        for (id, row) in matrix.ids.iter().zip(&matrix.values).skip(1) {
            let cells: Vec<String> = std::iter::once(id.clone())
                .chain(row.iter().map(|&v| value(v)))
                .collect();
            self.write_row(&cells)?;
        }
        Ok(())
    }

    fn print_window_matrices(&mut self, windows: &[WindowMatrix]) -> io::Result<()> {
        for window in windows {
            self.write_note(&format!(
                "window {}-{} midpoint {:.1}",
                window.first_column + 1,
                window.last_column + 1,
                window.midpoint + 1.0
            ))?;
            self.print_matrix(&window.matrix)?;
        }
        Ok(())
    }

    fn write_row(&mut self, cells: &[String]) -> io::Result<()> {
        match self.config.format {
            OutputFormat::Latex => {
                let cells: Vec<String> = cells.iter().map(|c| latex_escape(c)).collect();
                writeln!(self.out, "{} \\\\", cells.join(" & "))
            }
            _ => {
                let mut cells = cells.iter();
                if let Some(first) = cells.next() {
                    write!(self.out, "{first:<CELL_WIDTH$}")?;
                }
                for cell in cells {
                    write!(self.out, " {cell:>CELL_WIDTH$}")?;
                }
                writeln!(self.out)
            }
        }
    }

    /// Comment line introducing a block of rows. Written with or without
    /// column headers.
    fn write_note(&mut self, text: &str) -> io::Result<()> {
        match self.config.format {
            OutputFormat::Latex => writeln!(self.out, "% {text}"),
            _ => writeln!(self.out, "# {text}"),
        }
    }
}

/// Escape the characters that are special inside a LaTeX `tabular`.
fn latex_escape(cell: &str) -> String {
    let mut escaped = String::with_capacity(cell.len());
    for ch in cell.chars() {
        if matches!(ch, '_' | '&' | '%' | '#' | '$') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn value(v: f64) -> String {
    format!("{v:.PRECISION$}")
}

fn scientific(v: f64) -> String {
    format!("{v:.4e}")
}

fn optional(v: Option<f64>) -> String {
    v.map_or_else(|| NOT_AVAILABLE.to_string(), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use divstat_align::Alignment;
    use divstat_analysis::{AnalysisConfig, AnalysisMode, Analyzer, Statistic, WindowSpec};

    fn render_labeled(
        config: OutputConfig,
        mode: AnalysisMode,
        label: Option<&str>,
        pairs: &[(&str, &str)],
    ) -> String {
        let aln = Alignment::from_pairs(pairs.iter().copied()).unwrap();
        let output = Analyzer::new(AnalysisConfig::new(mode))
            .unwrap()
            .analyze(&aln)
            .unwrap();
        let mut printer = Printer::new(Vec::new(), config);
        printer.print("toy.fa", label, &output).unwrap();
        String::from_utf8(printer.finish().unwrap()).unwrap()
    }

    fn render(config: OutputConfig, mode: AnalysisMode, pairs: &[(&str, &str)]) -> String {
        render_labeled(config, mode, None, pairs)
    }

    const TABLE: OutputConfig = OutputConfig {
        format: OutputFormat::Table,
        header: true,
    };

    const BARE_TABLE: OutputConfig = OutputConfig {
        format: OutputFormat::Table,
        header: false,
    };

    #[test]
    fn test_whole_table_marks_fu_li_not_available() {
        let text = render(TABLE, AnalysisMode::Whole, &[("a", "AAAA"), ("b", "AATA")]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("alignment"));
        assert!(lines[1].starts_with("toy.fa"));
        assert_eq!(lines[1].matches(NOT_AVAILABLE).count(), 2);
    }

    #[test]
    fn test_header_written_once_per_batch() {
        let aln = Alignment::from_pairs([("a", "ACGT"), ("b", "ACGA")]).unwrap();
        let output = Analyzer::new(AnalysisConfig::default())
            .unwrap()
            .analyze(&aln)
            .unwrap();
        let mut printer = Printer::new(Vec::new(), TABLE);
        printer.print("one", None, &output).unwrap();
        printer.print("two", None, &output).unwrap();
        let text = String::from_utf8(printer.finish().unwrap()).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_latex_rows() {
        let config = OutputConfig {
            format: OutputFormat::Latex,
            header: false,
        };
        let text = render(
            config,
            AnalysisMode::Pairwise,
            &[("a", "AAAA"), ("b", "AATA"), ("c", "TATA")],
        );
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "% toy.fa",
                "b & 0.250000 \\\\",
                "c & 0.500000 & 0.250000 \\\\"
            ]
        );
    }

    #[test]
    fn test_latex_escapes_special_characters() {
        let config = OutputConfig {
            format: OutputFormat::Latex,
            header: true,
        };
        let whole = render(config, AnalysisMode::Whole, &[("a", "AAAA"), ("b", "AATA")]);
        let header = whole.lines().next().unwrap();
        assert!(header.contains(" & theta\\_w & "));
        assert!(header.contains(" & se\\_pi\\_free & "));
        assert!(!header.contains(" theta_w "));

        let pairwise = render(
            config,
            AnalysisMode::Pairwise,
            &[("s_1", "AAAA"), ("s#2", "AATA"), ("50%", "TATA")],
        );
        assert!(pairwise.contains("\ns\\#2 & 0.250000 \\\\\n"));
        assert!(pairwise.contains("\n50\\% & "));
        assert!(pairwise.contains(" & s\\_1 & s\\#2 \\\\\n"));
    }

    #[test]
    fn test_window_columns_are_one_based() {
        let spec = WindowSpec::new(2, 2, Statistic::Diversity).unwrap();
        let text = render(BARE_TABLE, AnalysisMode::Window(spec), &[("a", "AAAA"), ("b", "AATA")]);
        let rows: Vec<Vec<&str>> = text
            .lines()
            .map(|l| l.split_whitespace().collect())
            .collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], ["#", "toy.fa"]);
        assert_eq!(rows[1][..3], ["1", "2", "1.5"]);
        assert_eq!(rows[2][..3], ["3", "4", "3.5"]);
        assert_eq!(rows[2][3], "0.500000");
    }

    #[test]
    fn test_window_pairwise_keeps_coordinates_without_header() {
        let spec = WindowSpec::new(3, 3, Statistic::Diversity).unwrap();
        let text = render(
            BARE_TABLE,
            AnalysisMode::select(true, Some(spec)),
            &[("a", "AAAAAA"), ("b", "AATAAT"), ("c", "TATAAA")],
        );
        let rows: Vec<Vec<&str>> = text
            .lines()
            .map(|l| l.split_whitespace().collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec!["#", "toy.fa"],
                vec!["#", "window", "1-3", "midpoint", "2.0"],
                vec!["b", "0.333333"],
                vec!["c", "0.666667", "0.333333"],
                vec!["#", "window", "4-6", "midpoint", "5.0"],
                vec!["b", "0.333333"],
                vec!["c", "0.000000", "0.333333"],
            ]
        );
    }

    #[test]
    fn test_label_introduces_pairwise_and_window_blocks() {
        let pairs = [("a", "AAAA"), ("b", "AATA")];
        let pairwise = render_labeled(TABLE, AnalysisMode::Pairwise, Some("run1"), &pairs);
        assert_eq!(pairwise.lines().next(), Some("# toy.fa run1"));

        let spec = WindowSpec::new(2, 1, Statistic::Watterson).unwrap();
        let windows = render_labeled(BARE_TABLE, AnalysisMode::Window(spec), Some("run1"), &pairs);
        assert_eq!(windows.lines().next(), Some("# toy.fa run1"));
    }

    #[test]
    fn test_json_line() {
        let config = OutputConfig {
            format: OutputFormat::Json,
            header: true,
        };
        let text = render(config, AnalysisMode::Whole, &[("a", "AAAA"), ("b", "AATA")]);
        let doc: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(doc["source"], "toy.fa");
        assert!(doc["label"].is_null());
        assert_eq!(doc["output"]["mode"], "whole");
        assert!(doc["output"]["result"]["fu_li_d_star"].is_null());
        assert_eq!(doc["output"]["result"]["segregating_sites"], 1);
    }

    #[test]
    fn test_json_carries_label_for_pairwise() {
        let config = OutputConfig {
            format: OutputFormat::Json,
            header: false,
        };
        let text = render_labeled(
            config,
            AnalysisMode::Pairwise,
            Some("run1"),
            &[("a", "AAAA"), ("b", "AATA")],
        );
        let doc: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(doc["label"], "run1");
        assert_eq!(doc["output"]["mode"], "pairwise");
    }
}
