use std::collections::{HashMap, HashSet};
use crate::models::{Pod, PodExclusivity, Preset, Profile};
use crate::core::{
    filters::pod_eligible,
    matcher::{IndexedPair, Matcher},
    scoring::round_one_decimal,
};

/// Per-call memo of pair scores, keyed by ordered population indices
///
/// Order matters because the complement term makes `score(a, b)` and
/// `score(b, a)` differ.
struct ScoreCache<'m> {
    matcher: &'m Matcher,
    population: &'m [Profile],
    preset: &'m Preset,
    scores: HashMap<(usize, usize), f64>,
}

impl<'m> ScoreCache<'m> {
    fn seeded(
        matcher: &'m Matcher,
        population: &'m [Profile],
        preset: &'m Preset,
        ranked: &[IndexedPair],
    ) -> Self {
        let scores = ranked.iter().map(|p| ((p.i, p.j), p.score)).collect();
        Self {
            matcher,
            population,
            preset,
            scores,
        }
    }

    fn score(&mut self, i: usize, j: usize) -> f64 {
        let (matcher, population, preset) = (self.matcher, self.population, self.preset);
        *self.scores.entry((i, j)).or_insert_with(|| {
            matcher.score_pair(&population[i], &population[j], preset).0
        })
    }
}

/// Order-independent key for a pair
#[inline]
fn pair_key(i: usize, j: usize) -> (usize, usize) {
    if i <= j { (i, j) } else { (j, i) }
}

/// Order-independent key for a triad
#[inline]
fn triad_key(i: usize, j: usize, k: usize) -> [usize; 3] {
    let mut key = [i, j, k];
    key.sort_unstable();
    key
}

impl Matcher {
    /// Build triads by greedily growing the best pairs
    ///
    /// Walks every eligible pair from best to worst. Each unused pair picks
    /// the third member that maximizes the mean of the three pair scores
    /// (first maximum in population order wins) and is then marked used.
    /// In-person presets require all three members to share a city. A seed
    /// whose best triad was already emitted by another of its pairs is
    /// consumed without producing a pod.
    ///
    /// This is a greedy approximation, not an optimal partition of the
    /// population. Under [`PodExclusivity::Pair`] people may appear in
    /// several pods; [`PodExclusivity::Member`] keeps pods disjoint.
    ///
    /// # Returns
    /// At most `limit` pods in the order they were formed, which follows the
    /// seed pair ranking. Averages are not re-sorted, so a later pod can
    /// score higher than an earlier one.
    pub fn build_pods<'a>(
        &self,
        population: &'a [Profile],
        preset: &Preset,
        limit: usize,
    ) -> Vec<Pod<'a>> {
        let mut pods: Vec<Pod<'a>> = Vec::new();
        if population.len() < 3 || limit == 0 {
            return pods;
        }

        let exclusive = self.pod_exclusivity() == PodExclusivity::Member;
        let ranked = self.rank_all_indexed(population, preset);
        let mut cache = ScoreCache::seeded(self, population, preset, &ranked);
        let mut used_pairs: HashSet<(usize, usize)> = HashSet::new();
        let mut placed: HashSet<usize> = HashSet::new();
        let mut emitted: HashSet<[usize; 3]> = HashSet::new();

        for seed in &ranked {
            if pods.len() >= limit {
                break;
            }

            let key = pair_key(seed.i, seed.j);
            if used_pairs.contains(&key) {
                continue;
            }
            if exclusive && (placed.contains(&seed.i) || placed.contains(&seed.j)) {
                continue;
            }

            let (a, b) = (&population[seed.i], &population[seed.j]);
            let mut best: Option<(usize, f64)> = None;

            for (k, c) in population.iter().enumerate() {
                if k == seed.i || k == seed.j {
                    continue;
                }
                if exclusive && placed.contains(&k) {
                    continue;
                }
                if !pod_eligible(a, b, c, preset) {
                    continue;
                }

                let average = (seed.score + cache.score(seed.i, k) + cache.score(seed.j, k)) / 3.0;
                if best.map_or(true, |(_, top)| average > top) {
                    best = Some((k, average));
                }
            }

            let Some((k, average)) = best else {
                continue;
            };
            used_pairs.insert(key);

            // Another pair of the same triad already produced it
            if !emitted.insert(triad_key(seed.i, seed.j, k)) {
                continue;
            }

            pods.push(Pod {
                members: [a, b, &population[k]],
                average_score: round_one_decimal(average),
            });
            if exclusive {
                placed.extend([seed.i, seed.j, k]);
            }
        }

        tracing::debug!(
            "Built {} pods from {} ranked pairs under '{}' ({} pair scores computed)",
            pods.len(),
            ranked.len(),
            preset.name,
            cache.scores.len()
        );

        pods
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ScoringCoefficients, ThemeSet};

    fn create_candidate(name: &str, city: &str, themes: [f64; 6], interests: &[&str]) -> Profile {
        Profile {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            tz: "ET".to_string(),
            city: city.to_string(),
            themes: ThemeSet::default()
                .iter()
                .zip(themes)
                .map(|(t, v)| (t.to_string(), v))
                .collect(),
            strengths: Default::default(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            energizers: Default::default(),
            drainers: Default::default(),
            needs: Default::default(),
        }
    }

    fn create_preset(is_virtual: bool, use_complement: bool) -> Preset {
        Preset {
            name: "test".to_string(),
            weights: ThemeSet::default().iter().map(|t| (t.to_string(), 1.0)).collect(),
            coefficients: ScoringCoefficients {
                similarity: 0.5,
                interest: 0.3,
                complement: if use_complement { 0.2 } else { 0.0 },
                strength_need: 0.0,
            },
            is_virtual,
            use_complement,
            rationale: None,
        }
    }

    fn create_population() -> Vec<Profile> {
        vec![
            create_candidate("Ava", "NYC", [7.0, 6.0, 4.0, 6.0, 3.0, 5.0], &["writing", "yoga"]),
            create_candidate("Ben", "NYC", [5.0, 7.0, 6.0, 4.0, 6.0, 3.0], &["coding", "yoga"]),
            create_candidate("Cam", "SF", [4.0, 6.0, 3.0, 8.0, 2.0, 6.0], &["reading", "tea"]),
            create_candidate("Dia", "SF", [6.0, 5.0, 7.0, 3.0, 7.0, 4.0], &["hiking", "tea"]),
            create_candidate("Eli", "NYC", [5.0, 5.0, 5.0, 6.0, 4.0, 7.0], &["writing", "running"]),
            create_candidate("Fin", "NYC", [8.0, 4.0, 3.0, 7.0, 2.0, 5.0], &["writing", "yoga"]),
        ]
    }

    #[test]
    fn test_too_small_population() {
        let matcher = Matcher::with_default_settings();
        let population = create_population();

        assert!(matcher.build_pods(&population[..1], &create_preset(true, false), 5).is_empty());
        assert!(matcher.build_pods(&population[..2], &create_preset(true, false), 5).is_empty());
    }

    #[test]
    fn test_exactly_three_profiles() {
        let matcher = Matcher::with_default_settings();
        let population = create_population();

        // All three pairs could seed, but they all lead to the same triad
        let pods = matcher.build_pods(&population[..3], &create_preset(true, false), 5);
        assert_eq!(pods.len(), 1);

        let mut names: Vec<&str> = pods[0].members.iter().map(|m| m.name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["Ava", "Ben", "Cam"]);
    }

    #[test]
    fn test_in_person_pods_share_city() {
        let matcher = Matcher::with_default_settings();
        let population = create_population();

        let pods = matcher.build_pods(&population, &create_preset(false, true), 10);
        assert!(!pods.is_empty());
        for pod in &pods {
            let city = &pod.members[0].city;
            assert!(pod.members.iter().all(|m| &m.city == city));
            // Only NYC has three people
            assert_eq!(city, "NYC");
        }
    }

    #[test]
    fn test_respects_limit() {
        let matcher = Matcher::with_default_settings();
        let population = create_population();

        assert_eq!(matcher.build_pods(&population, &create_preset(true, true), 2).len(), 2);
        assert!(matcher.build_pods(&population, &create_preset(true, true), 0).is_empty());
    }

    #[test]
    fn test_average_matches_pair_scores() {
        let matcher = Matcher::with_default_settings();
        let population = create_population();
        let preset = create_preset(true, true);

        for pod in matcher.build_pods(&population, &preset, 5) {
            let [a, b, c] = pod.members;
            let expected = (matcher.score_pair(a, b, &preset).0
                + matcher.score_pair(a, c, &preset).0
                + matcher.score_pair(b, c, &preset).0)
                / 3.0;
            assert_eq!(pod.average_score, round_one_decimal(expected));
        }
    }

    #[test]
    fn test_member_exclusivity_gives_disjoint_pods() {
        let matcher = Matcher::with_default_settings().with_pod_exclusivity(PodExclusivity::Member);
        let population = create_population();

        let pods = matcher.build_pods(&population, &create_preset(true, false), 10);
        assert_eq!(pods.len(), 2);

        let mut seen = HashSet::new();
        for pod in &pods {
            for member in pod.members {
                assert!(seen.insert(member.email.clone()), "{} placed twice", member.name);
            }
        }
    }

    #[test]
    fn test_pair_exclusivity_allows_reuse() {
        let matcher = Matcher::with_default_settings();
        let population = create_population();

        let pods = matcher.build_pods(&population, &create_preset(true, false), 10);
        // More pods than six people can fill without repeats
        assert!(pods.len() >= 3 && pods.len() <= 10);

        let triads: HashSet<Vec<String>> = pods
            .iter()
            .map(|pod| {
                let mut key: Vec<String> = pod.members.iter().map(|m| m.email.clone()).collect();
                key.sort();
                key
            })
            .collect();
        assert_eq!(triads.len(), pods.len());
    }

    #[test]
    fn test_third_member_maximizes_mean() {
        let matcher = Matcher::with_default_settings();
        let population = create_population();
        let preset = create_preset(true, true);

        let pods = matcher.build_pods(&population, &preset, 10);
        assert!(pods.len() >= 3);

        for pod in &pods {
            let [a, b, chosen] = pod.members;
            let seed = matcher.score_pair(a, b, &preset).0;
            let mut best: Option<(&str, f64)> = None;
            for c in population.iter().filter(|c| c.email != a.email && c.email != b.email) {
                let average =
                    (seed + matcher.score_pair(a, c, &preset).0 + matcher.score_pair(b, c, &preset).0) / 3.0;
                if best.map_or(true, |(_, top)| average > top) {
                    best = Some((c.name.as_str(), average));
                }
            }
            assert_eq!(Some(chosen.name.as_str()), best.map(|(name, _)| name));
        }
    }

    #[test]
    fn test_keys_order_independent() {
        assert_eq!(pair_key(3, 1), pair_key(1, 3));
        assert_eq!(triad_key(4, 0, 2), triad_key(2, 4, 0));
    }
}
