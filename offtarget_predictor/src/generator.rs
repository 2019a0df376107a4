// src/generator.rs

const MULTIPLIER: u32 = 1_664_525;
const INCREMENT: u32 = 1_013_904_223;
const DIVISOR: f64 = u32::MAX as f64;

/// Linear congruential generator that replays the same stream for the same seed.
///
/// Every call to [`DeterministicGenerator::next`] advances the state, so one
/// instance must only ever be consumed by a single prediction.
#[derive(Debug, Clone)]
pub struct DeterministicGenerator {
    state: u32,
}

impl DeterministicGenerator {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advances the state and returns `state / (2^32 - 1)`.
    ///
    /// The result lies in `[0, 1]`; exactly `1.0` is reached only when the
    /// state lands on `u32::MAX`.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> f64 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
        f64::from(self.state) / DIVISOR
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
