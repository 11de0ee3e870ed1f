use crate::models::{Profile, ThemeSet};

/// Strongest `n` themes of a profile, highest intensity first
///
/// Ties keep theme-set order.
pub fn top_themes(profile: &Profile, themes: &ThemeSet, n: usize) -> Vec<String> {
    let mut ranked: Vec<(&str, f64)> = themes.iter().map(|t| (t, profile.theme(t))).collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    ranked
        .into_iter()
        .take(n)
        .map(|(theme, _)| theme.to_string())
        .collect()
}

/// What a pair has in common: shared top-3 themes and shared interests
///
/// Themes follow A's ranking, interests are sorted.
pub fn shared_bits(a: &Profile, b: &Profile, themes: &ThemeSet) -> (Vec<String>, Vec<String>) {
    let b_top = top_themes(b, themes, 3);
    let shared_themes = top_themes(a, themes, 3)
        .into_iter()
        .filter(|theme| b_top.contains(theme))
        .collect();

    let shared_interests = a.interests.intersection(&b.interests).cloned().collect();

    (shared_themes, shared_interests)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_profile(themes: &[(&str, f64)], interests: &[&str]) -> Profile {
        Profile {
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            tz: "ET".to_string(),
            city: "NYC".to_string(),
            themes: themes.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            strengths: Default::default(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            energizers: Default::default(),
            drainers: Default::default(),
            needs: Default::default(),
        }
    }

    #[test]
    fn test_top_themes() {
        let profile = create_test_profile(
            &[("Identity", 7.0), ("Growth", 6.0), ("Peace", 6.0), ("Adventure", 3.0)],
            &[],
        );
        assert_eq!(
            top_themes(&profile, &ThemeSet::default(), 3),
            vec!["Identity", "Growth", "Peace"]
        );
    }

    #[test]
    fn test_shared_bits() {
        let a = create_test_profile(
            &[("Identity", 7.0), ("Growth", 6.0), ("Peace", 6.0)],
            &["writing", "yoga", "tea"],
        );
        let b = create_test_profile(
            &[("Peace", 8.0), ("Growth", 6.0), ("Contribution", 6.0)],
            &["tea", "reading", "writing"],
        );

        let (themes, interests) = shared_bits(&a, &b, &ThemeSet::default());
        assert_eq!(themes, vec!["Growth", "Peace"]);
        assert_eq!(interests, vec!["tea", "writing"]);
    }
}
