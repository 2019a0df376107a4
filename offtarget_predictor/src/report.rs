// src/report.rs

use std::fmt::Write as _;
use std::io::Write;

use crate::error::Result;
use crate::models::PredictionResult;

pub const SITE_CSV_HEADER: [&str; 7] = [
    "id",
    "chromosome",
    "position",
    "mismatches",
    "score",
    "chromatinState",
    "accessibility",
];

/// Human-readable report: risk, features and the ranked site table.
pub fn render_text(sequence: &str, result: &PredictionResult) -> String {
    let features = &result.features;
    let mut out = String::new();

    // writing into a String cannot fail
    let _ = writeln!(out, "Off-target risk report for {}", sequence);
    let _ = writeln!(out, "Overall risk:        {:.2}%", result.overall_risk);
    let _ = writeln!(out, "GC content:          {:.2}%", features.gc_content);
    let _ = writeln!(out, "AT content:          {:.2}%", features.at_content);
    let _ = writeln!(out, "Accessibility:       {:.2}%", features.accessibility);
    let _ = writeln!(out, "Sequence complexity: {:.2}%", features.sequence_complexity);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:>4}  {:>3}  {:<5}  {:>10}  {:>3}  {:>6}  {:<15}  {:>6}",
        "rank", "id", "chrom", "position", "mm", "score", "chromatin", "access"
    );
    for (rank, site) in result.off_target_sites.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:>3}  {:<5}  {:>10}  {:>3}  {:>6.4}  {:<15}  {:>5.1}%",
            rank + 1,
            site.id,
            site.chromosome,
            site.position,
            site.mismatches,
            site.score,
            site.chromatin_state,
            site.accessibility
        );
    }
    out
}

pub fn render_json(result: &PredictionResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Writes one CSV row per ranked site.
pub fn write_sites_csv<W: Write>(writer: W, result: &PredictionResult) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(SITE_CSV_HEADER)?;
    for site in &result.off_target_sites {
        csv_writer.write_record([
            site.id.to_string(),
            site.chromosome.clone(),
            site.position.to_string(),
            site.mismatches.to_string(),
            site.score.to_string(),
            site.chromatin_state.clone(),
            site.accessibility.to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
