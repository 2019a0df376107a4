//! Deterministic off-target risk simulator for CRISPR guide sequences.
//!
//! Given a 20–23 nt guide and a chromatin state label, [`predict`] produces a
//! reproducible report: an overall off-target probability, derived sequence
//! features and up to ten ranked synthetic off-target sites. The numbers are
//! simulated from a seeded generator, not from a biological model.
//!
//! ```
//! use offtarget_predictor::predict;
//!
//! let result = predict("GCTTCGAGCTGATCGTACGG", "open").unwrap();
//! assert_eq!(result.features.gc_content, 60.0);
//! assert_eq!(result.off_target_sites.len(), 10);
//! ```

pub mod batch;
pub mod chromatin;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod guide;
pub mod models;
pub mod report;
pub mod seed;

pub use chromatin::{accessibility_for_label, ChromatinState, DEFAULT_ACCESSIBILITY};
pub use engine::predict;
pub use error::{PredictorError, Result};
pub use generator::DeterministicGenerator;
pub use guide::GuideSequence;
pub use models::{OffTargetSite, PredictionResult, SequenceFeatures, MAX_REPORTED_SITES};
pub use seed::{derive_seed, prediction_key};
