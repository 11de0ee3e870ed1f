use crate::models::{Preset, Profile, ScoreBreakdown, ThemeSet};
use crate::core::{
    filters::timezone_compatible,
    similarity::{complement, cosine_similarity, normalize_weights, profile_vector, set_overlap},
};

/// Default amount subtracted from the raw score when timezones clash
pub const DEFAULT_LOCALITY_PENALTY: f64 = 0.15;

/// Calculate a compatibility score (0-100) for a pair of profiles
///
/// Scoring formula:
/// score = clamp(
///     similarity * sim +           # cosine of weighted theme vectors
///     interest * intr +            # Jaccard overlap of interests
///     complement * comp +          # cosine of A against 1 - B
///     strength_need * str_need     # strengths meeting the other's needs
///     - penalty                    # when timezones don't line up
/// , 0, 1) * 100
///
/// The breakdown carries the raw sub-signals before weighting and clamping.
/// `sim` and `intr` are symmetric in A and B; `comp` generally is not.
pub fn calculate_pair_score(
    a: &Profile,
    b: &Profile,
    preset: &Preset,
    themes: &ThemeSet,
    locality_penalty: f64,
) -> (f64, ScoreBreakdown) {
    let weights = normalize_weights(&preset.weights);
    let va = profile_vector(a, &weights, themes);
    let vb = profile_vector(b, &weights, themes);

    let sim = cosine_similarity(&va, &vb);

    let comp = if preset.use_complement {
        cosine_similarity(&va, &complement(&vb))
    } else {
        0.0
    };

    let intr = set_overlap(&a.interests, &b.interests);

    let str_need = 0.5 * (set_overlap(&a.strengths, &b.needs) + set_overlap(&b.strengths, &a.needs));

    let tz_ok = timezone_compatible(a, b, preset);
    let penalty = if tz_ok { 0.0 } else { locality_penalty };

    let c = &preset.coefficients;
    let raw = c.similarity * sim
        + c.interest * intr
        + c.complement * comp
        + c.strength_need * str_need
        - penalty;

    let breakdown = ScoreBreakdown {
        sim,
        intr,
        comp,
        str_need,
        tz_ok,
    };

    (scale_score(raw), breakdown)
}

/// Clamp a raw score to [0, 1] and express it on a 0-100 scale, one decimal
#[inline]
fn scale_score(raw: f64) -> f64 {
    // NaN can only come from non-finite coefficients; treat it as no signal
    let clamped = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };
    round_one_decimal(clamped * 100.0)
}

/// Round to one decimal place
#[inline]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoringCoefficients;
    use std::collections::{BTreeMap, BTreeSet};

    fn tags(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn create_test_profile(tz: &str, themes: &[(&str, f64)], interests: &[&str]) -> Profile {
        Profile {
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            tz: tz.to_string(),
            city: "NYC".to_string(),
            themes: themes.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            strengths: BTreeSet::new(),
            interests: tags(interests),
            energizers: BTreeSet::new(),
            drainers: BTreeSet::new(),
            needs: BTreeSet::new(),
        }
    }

    fn create_test_preset(is_virtual: bool, use_complement: bool, coefficients: ScoringCoefficients) -> Preset {
        Preset {
            name: "test".to_string(),
            weights: ThemeSet::default().iter().map(|t| (t.to_string(), 1.0)).collect(),
            coefficients,
            is_virtual,
            use_complement,
            rationale: None,
        }
    }

    fn coefficients(similarity: f64, interest: f64, complement: f64, strength_need: f64) -> ScoringCoefficients {
        ScoringCoefficients { similarity, interest, complement, strength_need }
    }

    const THEMES_A: &[(&str, f64)] = &[
        ("Identity", 7.0), ("Growth", 6.0), ("Connection", 4.0),
        ("Peace", 6.0), ("Adventure", 3.0), ("Contribution", 5.0),
    ];
    const THEMES_B: &[(&str, f64)] = &[
        ("Identity", 3.0), ("Growth", 7.0), ("Connection", 6.0),
        ("Peace", 3.0), ("Adventure", 8.0), ("Contribution", 4.0),
    ];

    #[test]
    fn test_identical_profiles_score_alpha_plus_beta() {
        let a = create_test_profile("ET", THEMES_A, &["writing", "yoga"]);
        let b = a.clone();
        let preset = create_test_preset(true, false, coefficients(0.6, 0.25, 0.0, 0.0));

        let (score, breakdown) = calculate_pair_score(&a, &b, &preset, &ThemeSet::default(), DEFAULT_LOCALITY_PENALTY);

        assert!((breakdown.sim - 1.0).abs() < 1e-9);
        assert_eq!(breakdown.intr, 1.0);
        assert_eq!(breakdown.comp, 0.0);
        assert_eq!(score, 85.0);
    }

    #[test]
    fn test_timezone_penalty() {
        let a = create_test_profile("ET", THEMES_A, &["writing"]);
        let b = create_test_profile("PT", THEMES_A, &["writing"]);
        let themes = ThemeSet::default();
        let coeffs = coefficients(0.6, 0.25, 0.0, 0.0);

        let (in_person, info) = calculate_pair_score(&a, &b, &create_test_preset(false, false, coeffs), &themes, 0.15);
        let (online, _) = calculate_pair_score(&a, &b, &create_test_preset(true, false, coeffs), &themes, 0.15);

        assert!(!info.tz_ok);
        assert_eq!(online, 85.0);
        assert_eq!(in_person, 70.0);
    }

    #[test]
    fn test_configurable_penalty() {
        let a = create_test_profile("ET", THEMES_A, &["writing"]);
        let b = create_test_profile("PT", THEMES_A, &["writing"]);
        let preset = create_test_preset(false, false, coefficients(0.6, 0.25, 0.0, 0.0));

        let (score, _) = calculate_pair_score(&a, &b, &preset, &ThemeSet::default(), 0.0);
        assert_eq!(score, 85.0);
    }

    #[test]
    fn test_score_clamped_to_upper_bound() {
        let a = create_test_profile("ET", THEMES_A, &["writing"]);
        let preset = create_test_preset(true, false, coefficients(1.0, 1.0, 0.0, 0.0));

        let (score, _) = calculate_pair_score(&a, &a.clone(), &preset, &ThemeSet::default(), 0.15);
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_score_clamped_to_lower_bound() {
        let a = create_test_profile("ET", &[], &[]);
        let b = create_test_profile("PT", &[], &[]);
        let preset = create_test_preset(false, false, coefficients(0.6, 0.25, 0.0, 0.15));

        let (score, breakdown) = calculate_pair_score(&a, &b, &preset, &ThemeSet::default(), 0.15);
        assert_eq!(score, 0.0);
        assert_eq!(breakdown.sim, 0.0);
        assert_eq!(breakdown.intr, 0.0);
    }

    #[test]
    fn test_complement_only_when_enabled() {
        let a = create_test_profile("ET", THEMES_A, &[]);
        let b = create_test_profile("ET", THEMES_B, &[]);
        let themes = ThemeSet::default();
        let coeffs = coefficients(0.45, 0.2, 0.25, 0.1);

        let (_, off) = calculate_pair_score(&a, &b, &create_test_preset(true, false, coeffs), &themes, 0.15);
        let (_, on) = calculate_pair_score(&a, &b, &create_test_preset(true, true, coeffs), &themes, 0.15);

        assert_eq!(off.comp, 0.0);
        assert!(on.comp > 0.0 && on.comp <= 1.0);
    }

    #[test]
    fn test_sim_and_intr_symmetric() {
        let a = create_test_profile("ET", THEMES_A, &["writing", "tea"]);
        let b = create_test_profile("PT", THEMES_B, &["tea", "hiking", "coding"]);
        let preset = create_test_preset(true, true, coefficients(0.45, 0.2, 0.25, 0.1));
        let themes = ThemeSet::default();

        let (_, ab) = calculate_pair_score(&a, &b, &preset, &themes, 0.15);
        let (_, ba) = calculate_pair_score(&b, &a, &preset, &themes, 0.15);

        assert_eq!(ab.sim, ba.sim);
        assert_eq!(ab.intr, ba.intr);
        assert_eq!(ab.str_need, ba.str_need);
    }

    #[test]
    fn test_strength_need_both_directions() {
        let mut a = create_test_profile("ET", THEMES_A, &[]);
        let mut b = create_test_profile("ET", THEMES_B, &[]);
        a.strengths = tags(&["follow-through", "listens"]);
        a.needs = tags(&["starter energy"]);
        b.strengths = tags(&["starter energy"]);
        b.needs = tags(&["follow-through"]);
        let preset = create_test_preset(true, false, coefficients(0.0, 0.0, 0.0, 1.0));

        let (score, breakdown) = calculate_pair_score(&a, &b, &preset, &ThemeSet::default(), 0.15);

        // A->B: 1 of 2, B->A: 1 of 1
        assert!((breakdown.str_need - 0.75).abs() < 1e-12);
        assert_eq!(score, 75.0);
    }

    #[test]
    fn test_zero_weight_preset_gives_no_theme_signal() {
        let a = create_test_profile("ET", THEMES_A, &[]);
        let b = create_test_profile("ET", THEMES_B, &[]);
        let mut preset = create_test_preset(true, true, coefficients(0.5, 0.2, 0.2, 0.1));
        preset.weights = BTreeMap::new();

        let (score, breakdown) = calculate_pair_score(&a, &b, &preset, &ThemeSet::default(), 0.15);
        assert_eq!(breakdown.sim, 0.0);
        assert_eq!(breakdown.comp, 0.0);
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(72.349), 72.3);
        assert_eq!(round_one_decimal(72.35000001), 72.4);
        assert_eq!(round_one_decimal(0.0), 0.0);
    }
}
