use crate::models::{PodExclusivity, Preset, Profile, RankedPair, ScoreBreakdown, ThemeSet};
use crate::core::{
    filters::pair_eligible,
    scoring::{calculate_pair_score, DEFAULT_LOCALITY_PENALTY},
};

/// Scored pair addressed by population index, `i < j`
#[derive(Debug, Clone, Copy)]
pub(crate) struct IndexedPair {
    pub i: usize,
    pub j: usize,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Main matching orchestrator
///
/// Holds the theme set and tunables shared by every query; populations and
/// presets are passed per call and only ever borrowed.
///
/// # Pipeline
/// 1. City eligibility filter (in-person presets)
/// 2. Pair scoring
/// 3. Ranking
/// 4. Optional greedy pod assembly on top of the ranking
#[derive(Debug, Clone)]
pub struct Matcher {
    themes: ThemeSet,
    locality_penalty: f64,
    pod_exclusivity: PodExclusivity,
}

impl Matcher {
    pub fn new(themes: ThemeSet, locality_penalty: f64) -> Self {
        Self {
            themes,
            locality_penalty,
            pod_exclusivity: PodExclusivity::default(),
        }
    }

    pub fn with_default_settings() -> Self {
        Self::new(ThemeSet::default(), DEFAULT_LOCALITY_PENALTY)
    }

    pub fn with_pod_exclusivity(mut self, pod_exclusivity: PodExclusivity) -> Self {
        self.pod_exclusivity = pod_exclusivity;
        self
    }

    pub fn themes(&self) -> &ThemeSet {
        &self.themes
    }

    pub fn locality_penalty(&self) -> f64 {
        self.locality_penalty
    }

    pub fn pod_exclusivity(&self) -> PodExclusivity {
        self.pod_exclusivity
    }

    /// Score one pair under a preset
    ///
    /// Does not apply the city filter; callers scoring arbitrary pairs get a
    /// score even for people who would never be ranked together.
    #[inline]
    pub fn score_pair(&self, a: &Profile, b: &Profile, preset: &Preset) -> (f64, ScoreBreakdown) {
        calculate_pair_score(a, b, preset, &self.themes, self.locality_penalty)
    }

    /// Rank the best pairs in a population
    ///
    /// # Arguments
    /// * `population` - Everyone being considered
    /// * `preset` - Event mode to score under
    /// * `limit` - Maximum number of pairs to return
    ///
    /// # Returns
    /// At most `limit` pairs, highest score first. Equal scores keep the
    /// order in which pairs were enumerated.
    pub fn rank_pairs<'a>(
        &self,
        population: &'a [Profile],
        preset: &Preset,
        limit: usize,
    ) -> Vec<RankedPair<'a>> {
        if limit == 0 {
            return Vec::new();
        }

        let mut ranked = self.rank_all_indexed(population, preset);
        ranked.truncate(limit);

        ranked
            .into_iter()
            .map(|pair| RankedPair {
                a: &population[pair.i],
                b: &population[pair.j],
                score: pair.score,
                breakdown: pair.breakdown,
            })
            .collect()
    }

    /// Score every eligible pair and sort, without truncation
    pub(crate) fn rank_all_indexed(&self, population: &[Profile], preset: &Preset) -> Vec<IndexedPair> {
        let n = population.len();
        let mut scored = Vec::with_capacity(n * n.saturating_sub(1) / 2);

        for i in 0..n {
            for j in (i + 1)..n {
                let (a, b) = (&population[i], &population[j]);

                // Stage 1: in-person presets never pair across cities
                if !pair_eligible(a, b, preset) {
                    continue;
                }

                // Stage 2: scoring
                let (score, breakdown) = self.score_pair(a, b, preset);
                scored.push(IndexedPair { i, j, score, breakdown });
            }
        }

        tracing::debug!(
            "Scored {} eligible pairs from {} profiles under '{}'",
            scored.len(),
            n,
            preset.name
        );

        // Stage 3: stable sort, highest score first
        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        scored
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_settings()
    }
}
