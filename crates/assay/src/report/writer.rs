//! Report bundle rendering.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::table::{SummaryRow, flatten_summary};
use crate::assay::AnalysisResult;
use crate::error::{AssayError, Result};

/// Correlation pairs listed in the markdown report.
const REPORT_CORRELATION_PAIRS: usize = 10;

/// Writes an [`AnalysisResult`] to a directory as markdown, CSV and JSON.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    out_dir: PathBuf,
    title: String,
    min_missing_share: f64,
}

impl ReportWriter {
    /// Create a writer targeting `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            title: "EDA report".to_string(),
            min_missing_share: 0.1,
        }
    }

    /// Set the report heading.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Columns at or above this missing share are listed as problems.
    pub fn with_min_missing_share(mut self, share: f64) -> Self {
        self.min_missing_share = share;
        self
    }

    /// Write the full bundle. Returns the paths written, `report.md` first.
    pub fn write(&self, result: &AnalysisResult) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.out_dir).map_err(|e| AssayError::io(&self.out_dir, e))?;

        let mut written = Vec::new();

        let report = self.out_dir.join("report.md");
        self.write_markdown(&report, result)
            .map_err(|e| AssayError::io(&report, e))?;
        written.push(report);

        let summary = self.out_dir.join("summary.csv");
        let mut writer = csv::Writer::from_path(&summary)?;
        for row in flatten_summary(&result.summary) {
            writer.serialize(row)?;
        }
        writer.flush().map_err(|e| AssayError::io(&summary, e))?;
        written.push(summary);

        let missing = self.out_dir.join("missing.csv");
        let mut writer = csv::Writer::from_path(&missing)?;
        writer.write_record(["column", "missing_count", "missing_share"])?;
        for (name, entry) in result.missing.iter() {
            writer.write_record([
                name.to_string(),
                entry.missing_count.to_string(),
                entry.missing_share.to_string(),
            ])?;
        }
        writer.flush().map_err(|e| AssayError::io(&missing, e))?;
        written.push(missing);

        let correlation = self.out_dir.join("correlation.csv");
        let mut writer = csv::Writer::from_path(&correlation)?;
        let columns: Vec<&str> = result.correlation.columns().collect();
        writer.write_record(std::iter::once("").chain(columns.iter().copied()))?;
        for a in &columns {
            let row = columns.iter().map(|b| {
                result
                    .correlation
                    .get(a, b)
                    .map(|r| r.to_string())
                    .unwrap_or_default()
            });
            writer.write_record(std::iter::once(a.to_string()).chain(row))?;
        }
        writer.flush().map_err(|e| AssayError::io(&correlation, e))?;
        written.push(correlation);

        let categories_dir = self.out_dir.join("top_categories");
        fs::create_dir_all(&categories_dir).map_err(|e| AssayError::io(&categories_dir, e))?;
        let mut stems = HashSet::new();
        for (column, counts) in result.top_categories.iter() {
            let path = categories_dir.join(format!("{}.csv", unique_stem(column, &mut stems)));
            let mut writer = csv::Writer::from_path(&path)?;
            for count in counts {
                writer.serialize(count)?;
            }
            writer.flush().map_err(|e| AssayError::io(&path, e))?;
            written.push(path);
        }

        let json = self.out_dir.join("analysis.json");
        let file = File::create(&json).map_err(|e| AssayError::io(&json, e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), result)?;
        written.push(json);

        debug!(
            dir = %self.out_dir.display(),
            files = written.len(),
            "wrote report bundle"
        );

        Ok(written)
    }

    fn write_markdown(&self, path: &Path, result: &AnalysisResult) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        let summary = &result.summary;
        let flags = &result.flags;

        writeln!(out, "# {}", self.title)?;
        writeln!(out)?;
        writeln!(
            out,
            "Source: `{}` ({}, delimiter `{}`, {})",
            result.source.file,
            result.source.format,
            result.source.delimiter.escape_default(),
            result.source.hash
        )?;
        writeln!(out)?;
        writeln!(out, "Rows: **{}**, columns: **{}**", summary.n_rows, summary.n_cols)?;
        writeln!(out)?;

        writeln!(out, "## Quality")?;
        writeln!(out)?;
        writeln!(
            out,
            "Quality score: **{:.3}** ({})",
            flags.quality_score,
            if flags.ok_for_model {
                "ok for modeling"
            } else {
                "not ok for modeling"
            }
        )?;
        writeln!(out)?;
        writeln!(out, "| flag | value |")?;
        writeln!(out, "|---|---|")?;
        for (name, value) in flags.entries() {
            writeln!(out, "| {name} | {value} |")?;
        }
        writeln!(out)?;
        for (rule, penalty) in flags.penalties.iter().filter(|(_, p)| **p > 0.0) {
            writeln!(out, "- penalty `{rule}`: {penalty:.3}")?;
        }
        writeln!(out)?;

        writeln!(out, "## Columns")?;
        writeln!(out)?;
        writeln!(
            out,
            "| name | kind | missing | missing share | unique | mean | std | min | max |"
        )?;
        writeln!(out, "|---|---|---|---|---|---|---|---|---|")?;
        for row in flatten_summary(summary) {
            write_summary_row(&mut out, &row)?;
        }
        writeln!(out)?;

        writeln!(out, "## Missing values")?;
        writeln!(out)?;
        let problems = result.missing.problem_columns(self.min_missing_share);
        if problems.is_empty() {
            writeln!(
                out,
                "No columns with a missing share of {:.0}% or more.",
                self.min_missing_share * 100.0
            )?;
        } else {
            for (name, entry) in problems {
                writeln!(
                    out,
                    "- **{name}**: {} missing ({:.1}%)",
                    entry.missing_count,
                    entry.missing_share * 100.0
                )?;
            }
        }
        writeln!(out)?;

        writeln!(out, "## Correlation")?;
        writeln!(out)?;
        if result.correlation.is_empty() {
            writeln!(out, "Fewer than two numeric columns.")?;
        } else {
            writeln!(out, "Strongest pairs (see `correlation.csv`):")?;
            writeln!(out)?;
            for (a, b, r) in result.correlation.strongest_pairs(REPORT_CORRELATION_PAIRS) {
                writeln!(out, "- {a} / {b}: {r:.3}")?;
            }
        }
        writeln!(out)?;

        writeln!(out, "## Top categories")?;
        writeln!(out)?;
        if result.top_categories.is_empty() {
            writeln!(out, "No categorical columns.")?;
        }
        for (column, counts) in result.top_categories.iter() {
            writeln!(out, "### {column}")?;
            writeln!(out)?;
            for count in counts {
                writeln!(out, "- `{}`: {}", count.value, count.count)?;
            }
            writeln!(out)?;
        }

        out.flush()
    }
}

fn write_summary_row(out: &mut impl Write, row: &SummaryRow) -> io::Result<()> {
    let num = |v: Option<f64>| v.map(|v| format!("{v:.3}")).unwrap_or_default();
    writeln!(
        out,
        "| {} | {} | {} | {:.3} | {} | {} | {} | {} | {} |",
        row.name,
        row.kind,
        row.n_missing,
        row.missing_share,
        row.n_unique,
        num(row.mean),
        num(row.std),
        num(row.min),
        num(row.max)
    )
}

/// File name for a column's table: anything outside `[A-Za-z0-9_-]` becomes `_`.
fn file_stem(column: &str) -> String {
    let stem: String = column
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "column".to_string()
    } else {
        stem
    }
}

/// [`file_stem`] with a numeric suffix when the stem is already taken.
///
/// Stems are compared case-insensitively so distinct columns never share a
/// file on case-insensitive filesystems either.
fn unique_stem(column: &str, taken: &mut HashSet<String>) -> String {
    let base = file_stem(column);
    let mut stem = base.clone();
    let mut suffix = 2;
    while !taken.insert(stem.to_ascii_lowercase()) {
        stem = format!("{base}_{suffix}");
        suffix += 1;
    }
    stem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("city"), "city");
        assert_eq!(file_stem("a/b c.d"), "a_b_c_d");
        assert_eq!(file_stem(""), "column");
    }

    #[test]
    fn test_unique_stem_suffixes_collisions() {
        let mut taken = HashSet::new();
        assert_eq!(unique_stem("a b", &mut taken), "a_b");
        assert_eq!(unique_stem("a_b", &mut taken), "a_b_2");
        assert_eq!(unique_stem("a_b_2", &mut taken), "a_b_2_2");
        assert_eq!(unique_stem("A.B", &mut taken), "A_B_3");
        assert_eq!(unique_stem("city", &mut taken), "city");
    }
}
