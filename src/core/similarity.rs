use std::collections::{BTreeMap, BTreeSet};
use crate::models::{Profile, ThemeSet};

/// Cosine of the angle between two vectors
///
/// Returns 0.0 when either vector has zero magnitude, so an empty profile
/// reads as "no signal" rather than an undefined ratio. Only the common
/// prefix is compared when the lengths differ.
///
/// Each vector is divided by its largest magnitude before accumulating, so
/// huge finite entries cannot overflow the norms. Anything still non-finite
/// (infinite or NaN inputs) is treated as no signal.
///
/// # Returns
/// Similarity in [-1, 1]
#[inline]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len().min(b.len());
    let (a, b) = (&a[..len], &b[..len]);

    let scale_a = max_magnitude(a);
    let scale_b = max_magnitude(b);
    if scale_a == 0.0 || scale_b == 0.0 {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (x, y) in a.iter().zip(b) {
        let (x, y) = (x / scale_a, y / scale_b);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let cosine = dot / (norm_a.sqrt() * norm_b.sqrt());
    if !cosine.is_finite() {
        return 0.0;
    }

    // Rounding can push parallel vectors a hair past 1
    cosine.clamp(-1.0, 1.0)
}

#[inline]
fn max_magnitude(vector: &[f64]) -> f64 {
    vector.iter().fold(0.0, |max: f64, x| max.max(x.abs()))
}

/// Jaccard overlap of two tag sets: |a ∩ b| / max(1, |a ∪ b|)
///
/// Two empty sets give 0.0, not 1.0.
#[inline]
pub fn set_overlap<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let shared = a.intersection(b).count();
    let union = a.len() + b.len() - shared;
    shared as f64 / union.max(1) as f64
}

/// Weighted theme vector aligned to `order`
///
/// Each entry is `intensity * weight`. Missing themes or weights count as
/// zero and negative intensities are clamped to zero.
pub fn weighted_theme_vector(
    themes: &BTreeMap<String, f64>,
    weights: &BTreeMap<String, f64>,
    order: &ThemeSet,
) -> Vec<f64> {
    order
        .iter()
        .map(|theme| {
            let intensity = themes.get(theme).copied().unwrap_or(0.0).max(0.0);
            let weight = weights.get(theme).copied().unwrap_or(0.0);
            intensity * weight
        })
        .collect()
}

/// Theme vector of a profile under the given weights
#[inline]
pub fn profile_vector(profile: &Profile, weights: &BTreeMap<String, f64>, order: &ThemeSet) -> Vec<f64> {
    weighted_theme_vector(&profile.themes, weights, order)
}

/// Scale weights so they sum to 1
///
/// A zero sum leaves the weights untouched.
pub fn normalize_weights(weights: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    let sum: f64 = weights.values().sum();
    let divisor = if sum == 0.0 { 1.0 } else { sum };

    weights
        .iter()
        .map(|(theme, weight)| (theme.clone(), weight / divisor))
        .collect()
}

/// Elementwise complement, `1 - x`
#[inline]
pub fn complement(vector: &[f64]) -> Vec<f64> {
    vector.iter().map(|x| 1.0 - x).collect()
}
