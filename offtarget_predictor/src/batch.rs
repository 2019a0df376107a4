// src/batch.rs

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::predict;
use crate::error::Result;
use crate::guide::GuideSequence;
use crate::models::PredictionResult;

/// One input row: `sequence,chromatin_state`.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRecord {
    pub sequence: String,
    pub chromatin_state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum BatchOutcome {
    #[serde(rename_all = "camelCase")]
    Predicted {
        sequence: String,
        chromatin_state: String,
        result: PredictionResult,
    },
    #[serde(rename_all = "camelCase")]
    Rejected {
        /// 1-based data row, header excluded.
        line: usize,
        sequence: String,
        reason: String,
    },
}

pub const BATCH_CSV_HEADER: [&str; 9] = [
    "sequence",
    "chromatinState",
    "overallRisk",
    "rank",
    "id",
    "chromosome",
    "position",
    "mismatches",
    "score",
];

/// Flat row of the batch CSV export, same column order as [`BATCH_CSV_HEADER`].
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchSiteRow<'a> {
    sequence: &'a str,
    chromatin_state: &'a str,
    overall_risk: f64,
    rank: usize,
    id: usize,
    chromosome: &'a str,
    position: u64,
    mismatches: u8,
    score: f64,
}

/// Reads `sequence,chromatin_state` rows (with header) from CSV.
pub fn read_batch<R: Read>(reader: R) -> Result<Vec<BatchRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<BatchRecord>() {
        records.push(row?);
    }
    Ok(records)
}

/// Runs one independent prediction per row.
///
/// Rows failing guide validation are logged and returned as
/// `BatchOutcome::Rejected`; the remaining rows are still predicted.
pub fn run_batch(records: &[BatchRecord]) -> Vec<BatchOutcome> {
    info!("Running off-target prediction on {} guides", records.len());

    let outcomes: Vec<BatchOutcome> = records
        .iter()
        .enumerate()
        .map(|(i, record)| predict_record(i + 1, record))
        .collect();

    let rejected = outcomes
        .iter()
        .filter(|o| matches!(o, BatchOutcome::Rejected { .. }))
        .count();
    info!(
        "Batch finished: {} predicted, {} rejected",
        outcomes.len() - rejected,
        rejected
    );
    outcomes
}

fn predict_record(line: usize, record: &BatchRecord) -> BatchOutcome {
    let prediction = GuideSequence::parse(&record.sequence)
        .and_then(|guide| {
            let result = predict(guide.as_str(), &record.chromatin_state)?;
            Ok((guide, result))
        });

    match prediction {
        Ok((guide, result)) => BatchOutcome::Predicted {
            sequence: guide.to_string(),
            chromatin_state: record.chromatin_state.clone(),
            result,
        },
        Err(e) => {
            warn!("Skipping row {}: {}", line, e);
            BatchOutcome::Rejected {
                line,
                sequence: record.sequence.clone(),
                reason: e.to_string(),
            }
        }
    }
}

/// Writes every ranked site of every prediction as a flat CSV row.
/// Rejected rows are omitted; the header is written even when none remain.
pub fn write_batch_csv<W: Write>(writer: W, outcomes: &[BatchOutcome]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(BATCH_CSV_HEADER)?;
    for outcome in outcomes {
        if let BatchOutcome::Predicted {
            sequence,
            chromatin_state,
            result,
        } = outcome
        {
            for (rank, site) in result.off_target_sites.iter().enumerate() {
                csv_writer.serialize(BatchSiteRow {
                    sequence,
                    chromatin_state,
                    overall_risk: result.overall_risk,
                    rank: rank + 1,
                    id: site.id,
                    chromosome: &site.chromosome,
                    position: site.position,
                    mismatches: site.mismatches,
                    score: site.score,
                })?;
            }
        }
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn render_batch_json(outcomes: &[BatchOutcome]) -> Result<String> {
    Ok(serde_json::to_string_pretty(outcomes)?)
}

/// Short text summary, one line per row.
pub fn render_batch_text(outcomes: &[BatchOutcome]) -> String {
    outcomes
        .iter()
        .map(|outcome| match outcome {
            BatchOutcome::Predicted {
                sequence,
                chromatin_state,
                result,
            } => format!(
                "{}\t{}\trisk {:.2}%\t{} sites\ttop score {:.4}",
                sequence,
                chromatin_state,
                result.overall_risk,
                result.off_target_sites.len(),
                result
                    .off_target_sites
                    .first()
                    .map(|s| s.score)
                    .unwrap_or_default()
            ),
            BatchOutcome::Rejected {
                line,
                sequence,
                reason,
            } => format!("{}\trejected (row {}): {}", sequence, line, reason),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
