// src/chromatin.rs

use std::fmt;
use std::str::FromStr;

use crate::error::PredictorError;

/// Accessibility used for any label outside the known chromatin states.
pub const DEFAULT_ACCESSIBILITY: f64 = 0.5;

/// Fixed label → accessibility table.
pub const ACCESSIBILITY_TABLE: [(&str, f64); 4] = [
    ("open", 0.9),
    ("euchromatin", 0.7),
    ("closed", 0.3),
    ("heterochromatin", 0.1),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChromatinState {
    Open,
    Euchromatin,
    Closed,
    Heterochromatin,
}

impl ChromatinState {
    pub const ALL: [ChromatinState; 4] = [
        ChromatinState::Open,
        ChromatinState::Euchromatin,
        ChromatinState::Closed,
        ChromatinState::Heterochromatin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChromatinState::Open => "open",
            ChromatinState::Euchromatin => "euchromatin",
            ChromatinState::Closed => "closed",
            ChromatinState::Heterochromatin => "heterochromatin",
        }
    }

    pub fn accessibility(&self) -> f64 {
        accessibility_for_label(self.as_str())
    }
}

impl fmt::Display for ChromatinState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parser, used by callers that restrict input to the known states.
/// Labels are matched exactly.
impl FromStr for ChromatinState {
    type Err = PredictorError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        ChromatinState::ALL
            .into_iter()
            .find(|state| state.as_str() == label)
            .ok_or_else(|| PredictorError::UnknownChromatinState(label.to_string()))
    }
}

/// Looks up the accessibility of a raw chromatin label.
///
/// Unrecognised labels are not an error; they get [`DEFAULT_ACCESSIBILITY`].
pub fn accessibility_for_label(label: &str) -> f64 {
    ACCESSIBILITY_TABLE
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, accessibility)| *accessibility)
        .unwrap_or(DEFAULT_ACCESSIBILITY)
}

pub fn is_known_label(label: &str) -> bool {
    ACCESSIBILITY_TABLE.iter().any(|(name, _)| *name == label)
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
