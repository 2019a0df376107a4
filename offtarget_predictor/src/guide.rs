// src/guide.rs

use std::fmt;
use std::ops::RangeInclusive;

use bio_seq::prelude::{Dna, Seq};
use tracing::debug;

use crate::error::{PredictorError, Result};

/// Accepted guide lengths, in nucleotides.
pub const GUIDE_LENGTH: RangeInclusive<usize> = 20..=23;

/// A guide that passed caller-side validation: 20–23 nt, upper-case A/C/G/T.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideSequence {
    sequence: String,
}

impl GuideSequence {
    /// Normalise and validate a raw guide.
    ///
    /// Whitespace around the guide is trimmed and the bases are upper-cased
    /// before the length and alphabet checks.
    ///
    /// # Errors
    ///
    /// * `PredictorError::InvalidGuide` if the length is outside 20–23 or a
    ///   character is not a DNA base
    pub fn parse(raw: &str) -> Result<Self> {
        let normalised = raw.trim().to_ascii_uppercase();

        let length = normalised.chars().count();
        if !GUIDE_LENGTH.contains(&length) {
            debug!("Guide must be 20-23nt long, got {}nt", length);
            return Err(PredictorError::InvalidGuide {
                sequence: raw.to_string(),
                reason: format!(
                    "length must be between {} and {} nt, got {}",
                    GUIDE_LENGTH.start(),
                    GUIDE_LENGTH.end(),
                    length
                ),
            });
        }

        let decoded = Seq::<Dna>::try_from(normalised.as_str()).map_err(|_| {
            PredictorError::InvalidGuide {
                sequence: raw.to_string(),
                reason: first_invalid_base(&normalised),
            }
        })?;
        debug!("Validated {}nt guide {}", decoded.len(), normalised);

        Ok(Self {
            sequence: normalised,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.sequence
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}

/// Locates the offending character once the DNA codec rejected a guide.
fn first_invalid_base(normalised: &str) -> String {
    normalised
        .chars()
        .enumerate()
        .find(|(_, c)| !matches!(c, 'A' | 'C' | 'G' | 'T'))
        .map(|(pos, base)| format!("invalid nucleotide '{}' at position {}", base, pos + 1))
        .unwrap_or_else(|| "not a DNA sequence".to_string())
}

impl fmt::Display for GuideSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sequence)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
