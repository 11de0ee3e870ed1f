//! LMW Algo - Pair and pod matching engine for Life Minus Work events
//!
//! This library scores how well two people fit a given event mode (a preset)
//! from weighted theme similarity, shared interests, theme complement and
//! strengths meeting needs, then turns those pair scores into ranked pairs
//! and greedy triads ("pods").

pub mod config;
pub mod core;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use crate::core::{Matcher, PresetRegistry, PresetError, calculate_pair_score, cosine_similarity, set_overlap};
pub use crate::models::{Profile, Preset, ThemeSet, ScoringCoefficients, ScoreBreakdown, RankedPair, Pod, PodExclusivity};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let registry = PresetRegistry::builtin(&ThemeSet::default()).unwrap();
        assert!(registry.get("Deep Work Sprint (virtual)").is_ok());
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[2.0, 0.0]), 1.0);
    }
}
