// src/engine.rs

use tracing::{debug, warn};

use crate::chromatin::{accessibility_for_label, is_known_label};
use crate::error::{PredictorError, Result};
use crate::generator::DeterministicGenerator;
use crate::models::{OffTargetSite, PredictionResult, SequenceFeatures, MAX_REPORTED_SITES};
use crate::seed::{derive_seed, prediction_key};

const BASE_RISK: f64 = 0.3;
const GC_RISK_WEIGHT: f64 = 0.1;
const CHROMATIN_RISK_WEIGHT: f64 = 0.5;
const RISK_JITTER: f64 = 0.1;
const MAX_PROBABILITY: f64 = 0.95;

const MAX_SITES: f64 = 15.0;
const MAX_MISMATCHES: u8 = 4;
const MISMATCH_PENALTY: f64 = 0.2;
const CHROMOSOME_COUNT: u8 = 22;
const POSITION_RANGE: u64 = 100_000_000;
const SCORE_FLOOR: f64 = 0.7;
const SCORE_JITTER: f64 = 0.3;

const COMPLEXITY_BASE: f64 = 60.0;
const COMPLEXITY_SPREAD: f64 = 40.0;

/// Simulated off-target prediction for a guide sequence in a chromatin context.
///
/// The result is a pure function of the two inputs: the generator is seeded
/// from `sequence|chromatin_state` and consumed in a fixed order
/// (risk jitter, four draws per site, complexity).
///
/// # Arguments
///
/// * `sequence` - Guide sequence over A/C/G/T (either case)
/// * `chromatin_state` - Chromatin label; unknown labels use the default accessibility
///
/// # Errors
///
/// * `PredictorError::InvalidSequence` if the sequence is empty or holds other characters
pub fn predict(sequence: &str, chromatin_state: &str) -> Result<PredictionResult> {
    let gc_content = gc_fraction(sequence)?;
    let at_content = 1.0 - gc_content;

    if !is_known_label(chromatin_state) {
        warn!(
            "Unrecognised chromatin state '{}', using default accessibility",
            chromatin_state
        );
    }
    let accessibility = accessibility_for_label(chromatin_state);

    let seed = derive_seed(&prediction_key(sequence, chromatin_state));
    let mut generator = DeterministicGenerator::new(seed);

    let base_risk = BASE_RISK + GC_RISK_WEIGHT * gc_content;
    let chromatin_adjustment = accessibility * CHROMATIN_RISK_WEIGHT;
    let off_target_prob =
        (base_risk + chromatin_adjustment + generator.next() * RISK_JITTER).min(MAX_PROBABILITY);

    let num_sites = (off_target_prob * MAX_SITES).floor() as usize + 1;
    debug!(
        "Seed {} for {}|{}: p={:.4}, generating {} sites",
        seed, sequence, chromatin_state, off_target_prob, num_sites
    );

    let mut sites: Vec<OffTargetSite> = (0..num_sites)
        .map(|i| generate_site(&mut generator, i + 1, chromatin_state, accessibility))
        .collect();
    rank_sites(&mut sites);

    let sequence_complexity = COMPLEXITY_BASE + generator.next() * COMPLEXITY_SPREAD;

    Ok(PredictionResult {
        overall_risk: off_target_prob * 100.0,
        features: SequenceFeatures {
            gc_content: gc_content * 100.0,
            at_content: at_content * 100.0,
            accessibility: accessibility * 100.0,
            sequence_complexity,
        },
        off_target_sites: sites,
    })
}

/// Fraction of G/C bases, rejecting empty input and foreign characters.
pub fn gc_fraction(sequence: &str) -> Result<f64> {
    if sequence.is_empty() {
        return Err(PredictorError::InvalidSequence {
            sequence: String::new(),
            reason: "sequence is empty".to_string(),
        });
    }

    let mut gc_count = 0usize;
    for (pos, base) in sequence.chars().enumerate() {
        match base.to_ascii_uppercase() {
            'G' | 'C' => gc_count += 1,
            'A' | 'T' => {}
            other => {
                return Err(PredictorError::InvalidSequence {
                    sequence: sequence.to_string(),
                    reason: format!("invalid nucleotide '{}' at position {}", other, pos + 1),
                })
            }
        }
    }

    // alphabet is ASCII, so byte length == base count
    Ok(gc_count as f64 / sequence.len() as f64)
}

//───────────────────────────────── helpers ─────────────────────────────────//

/// Draws mismatch, chromosome, position and score jitter, in that order.
fn generate_site(
    generator: &mut DeterministicGenerator,
    id: usize,
    chromatin_state: &str,
    accessibility: f64,
) -> OffTargetSite {
    let mismatches = mismatches_from_draw(generator.next());
    let chromosome = chromosome_from_draw(generator.next());
    let position = position_from_draw(generator.next());
    let score_jitter = generator.next();

    let score = (1.0 - f64::from(mismatches) * MISMATCH_PENALTY)
        * accessibility
        * (SCORE_FLOOR + score_jitter * SCORE_JITTER);

    OffTargetSite {
        id,
        chromosome: format!("chr{}", chromosome),
        position,
        mismatches,
        score,
        chromatin_state: chromatin_state.to_string(),
        accessibility: accessibility * 100.0,
    }
}

/// Stable sort by descending score, then keep the top [`MAX_REPORTED_SITES`].
/// Equal scores keep generation order.
fn rank_sites(sites: &mut Vec<OffTargetSite>) {
    sites.sort_by(|a, b| b.score.total_cmp(&a.score));
    sites.truncate(MAX_REPORTED_SITES);
}

// A draw of exactly 1.0 is clamped onto the top of each range.
fn mismatches_from_draw(draw: f64) -> u8 {
    ((draw * f64::from(MAX_MISMATCHES)).floor() as u8 + 1).min(MAX_MISMATCHES)
}

fn chromosome_from_draw(draw: f64) -> u8 {
    ((draw * f64::from(CHROMOSOME_COUNT)).floor() as u8 + 1).min(CHROMOSOME_COUNT)
}

fn position_from_draw(draw: f64) -> u64 {
    ((draw * POSITION_RANGE as f64).floor() as u64).min(POSITION_RANGE - 1)
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const GUIDE: &str = "GCTTCGAGCTGATCGTACGG";

    #[test]
    fn gc_fraction_counts_both_cases() {
        assert_eq!(gc_fraction("GGCC").unwrap(), 1.0);
        assert_eq!(gc_fraction("atat").unwrap(), 0.0);
        assert_eq!(gc_fraction("AcGt").unwrap(), 0.5);
        assert_eq!(gc_fraction(GUIDE).unwrap(), 0.6);
    }

    #[test]
    fn empty_sequence_is_rejected() {
        let err = predict("", "open").unwrap_err();
        assert!(matches!(err, PredictorError::InvalidSequence { .. }));
    }

    #[test]
    fn foreign_characters_are_rejected() {
        for bad in ["GCTTCGAGCTGATCGTACGN", "GCTTCGAGCU", "ACGT ACGT", "ACGTÄ"] {
            let err = predict(bad, "open").unwrap_err();
            assert!(
                matches!(err, PredictorError::InvalidSequence { .. }),
                "accepted {}",
                bad
            );
        }
    }

    #[test]
    fn identical_inputs_give_identical_results() {
        let a = predict(GUIDE, "euchromatin").unwrap();
        let b = predict(GUIDE, "euchromatin").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.overall_risk.to_bits(), b.overall_risk.to_bits());
    }

    #[test]
    fn reference_scenario_open() {
        let result = predict(GUIDE, "open").unwrap();

        assert_eq!(result.overall_risk, 90.09365865147991);
        assert_eq!(result.features.gc_content, 60.0);
        assert_eq!(result.features.at_content, 40.0);
        assert_eq!(result.features.accessibility, 90.0);
        assert_eq!(result.features.sequence_complexity, 69.68821727896301);

        // 14 sites generated, top 10 kept
        let ids: Vec<usize> = result.off_target_sites.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![12, 9, 1, 14, 7, 5, 4, 2, 6, 8]);

        let top = &result.off_target_sites[0];
        assert_eq!(top.chromosome, "chr20");
        assert_eq!(top.position, 4_329_629);
        assert_eq!(top.mismatches, 1);
        assert_eq!(top.score, 0.7199844987262005);
        assert_eq!(top.chromatin_state, "open");
    }

    #[test]
    fn unknown_label_uses_default_accessibility() {
        let result = predict(GUIDE, "unknown_label").unwrap();
        assert_eq!(result.features.accessibility, 50.0);
        assert_eq!(result.off_target_sites.len(), 10);
        for site in &result.off_target_sites {
            assert_eq!(site.chromatin_state, "unknown_label");
            assert_eq!(site.accessibility, 50.0);
        }
    }

    #[test]
    fn closed_chromatin_lowers_risk() {
        let open = predict(GUIDE, "open").unwrap();
        let closed = predict(GUIDE, "closed").unwrap();
        let hetero = predict(GUIDE, "heterochromatin").unwrap();

        assert_eq!(closed.overall_risk, 57.30756975298458);
        assert_eq!(hetero.overall_risk, 44.87071806561917);
        assert_eq!(hetero.off_target_sites.len(), 7);
        assert_eq!(closed.off_target_sites.len(), 9);
        assert!(open.overall_risk > closed.overall_risk);
    }

    #[test]
    fn sites_are_sorted_and_bounded() {
        for state in ["open", "euchromatin", "closed", "heterochromatin", "other"] {
            let result = predict(GUIDE, state).unwrap();
            let sites = &result.off_target_sites;
            assert!(!sites.is_empty() && sites.len() <= MAX_REPORTED_SITES);
            for pair in sites.windows(2) {
                assert!(pair[0].score >= pair[1].score);
            }
            for site in sites {
                assert!((1..=4).contains(&site.mismatches));
                assert!(matches!(site.chromosome_number(), Some(1..=22)));
                assert!(site.position < POSITION_RANGE);
            }
        }
    }

    #[test]
    fn ties_keep_generation_order() {
        let make = |id: usize, score: f64| OffTargetSite {
            id,
            chromosome: "chr1".to_string(),
            position: 0,
            mismatches: 1,
            score,
            chromatin_state: "open".to_string(),
            accessibility: 90.0,
        };
        let mut sites: Vec<OffTargetSite> = (1..=12)
            .map(|id| make(id, if id % 2 == 0 { 0.5 } else { 0.25 }))
            .collect();
        rank_sites(&mut sites);

        let ids: Vec<usize> = sites.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 4, 6, 8, 10, 12, 1, 3, 5, 7]);
    }

    #[test]
    fn draw_mapping_ranges() {
        assert_eq!(mismatches_from_draw(0.0), 1);
        assert_eq!(mismatches_from_draw(0.2499), 1);
        assert_eq!(mismatches_from_draw(0.25), 2);
        assert_eq!(mismatches_from_draw(0.9999), 4);
        assert_eq!(chromosome_from_draw(0.0), 1);
        assert_eq!(chromosome_from_draw(0.9999), 22);
        assert_eq!(position_from_draw(0.0), 0);
        assert_eq!(position_from_draw(0.5), 50_000_000);
    }

    #[test]
    fn draw_of_one_is_clamped() {
        assert_eq!(mismatches_from_draw(1.0), MAX_MISMATCHES);
        assert_eq!(chromosome_from_draw(1.0), CHROMOSOME_COUNT);
        assert_eq!(position_from_draw(1.0), POSITION_RANGE - 1);
    }
}
