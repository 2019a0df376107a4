// src/models.rs

use serde::{Deserialize, Serialize};

/// Maximum number of off-target sites kept in a report.
pub const MAX_REPORTED_SITES: usize = 10;

/// Full output of one prediction call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    /// Off-target probability as a percentage, 0–100.
    pub overall_risk: f64,
    pub features: SequenceFeatures,
    /// Ranked by descending score, at most [`MAX_REPORTED_SITES`] entries.
    pub off_target_sites: Vec<OffTargetSite>,
}

/// Derived sequence features, all percentage scaled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceFeatures {
    pub gc_content: f64,
    pub at_content: f64,
    pub accessibility: f64,
    pub sequence_complexity: f64,
}

/// One synthetic off-target site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OffTargetSite {
    /// 1-based generation order, assigned before ranking.
    pub id: usize,
    pub chromosome: String,
    pub position: u64,
    pub mismatches: u8,
    pub score: f64,
    pub chromatin_state: String,
    /// Accessibility of the input state, percentage scaled.
    pub accessibility: f64,
}

impl OffTargetSite {
    /// Chromosome number without the `chr` prefix.
    pub fn chromosome_number(&self) -> Option<u8> {
        self.chromosome.strip_prefix("chr")?.parse().ok()
    }
}
