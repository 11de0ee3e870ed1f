use serde::{Deserialize, Serialize};
use crate::core::explain::{shared_bits, top_themes};
use crate::models::domain::{Pod, Preset, Profile, RankedPair, ScoreBreakdown, ThemeSet};

/// Member reference used in pair and pod results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSummary {
    pub name: String,
    pub email: String,
    pub tz: String,
    pub city: String,
    #[serde(rename = "topThemes")]
    pub top_themes: Vec<String>,
}

impl MemberSummary {
    pub fn new(profile: &Profile, themes: &ThemeSet) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            tz: profile.tz.clone(),
            city: profile.city.clone(),
            top_themes: top_themes(profile, themes, 3),
        }
    }
}

/// One scored pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairResult {
    pub a: MemberSummary,
    pub b: MemberSummary,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    #[serde(rename = "sharedThemes")]
    pub shared_themes: Vec<String>,
    #[serde(rename = "sharedInterests")]
    pub shared_interests: Vec<String>,
}

impl PairResult {
    pub fn new(
        a: &Profile,
        b: &Profile,
        score: f64,
        breakdown: ScoreBreakdown,
        themes: &ThemeSet,
    ) -> Self {
        let (shared_themes, shared_interests) = shared_bits(a, b, themes);
        Self {
            a: MemberSummary::new(a, themes),
            b: MemberSummary::new(b, themes),
            score,
            breakdown,
            shared_themes,
            shared_interests,
        }
    }

    pub fn from_ranked(pair: &RankedPair<'_>, themes: &ThemeSet) -> Self {
        Self::new(pair.a, pair.b, pair.score, pair.breakdown, themes)
    }
}

/// One greedy triad
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodResult {
    pub members: Vec<MemberSummary>,
    #[serde(rename = "averageScore")]
    pub average_score: f64,
}

impl PodResult {
    pub fn from_pod(pod: &Pod<'_>, themes: &ThemeSet) -> Self {
        Self {
            members: pod
                .members
                .iter()
                .map(|member| MemberSummary::new(member, themes))
                .collect(),
            average_score: pod.average_score,
        }
    }
}

/// Why a ranking came back empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    PopulationTooSmall,
    NoEligiblePairs,
    NoEligiblePods,
}

/// Response for the score pair endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScorePairResponse {
    pub preset: String,
    pub pair: PairResult,
}

/// Response for the rank pairs endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankPairsResponse {
    pub preset: String,
    pub pairs: Vec<PairResult>,
    #[serde(rename = "populationSize")]
    pub population_size: usize,
    #[serde(rename = "emptyReason", skip_serializing_if = "Option::is_none")]
    pub empty_reason: Option<EmptyReason>,
}

/// Response for the build pods endpoint
///
/// Pods are a greedy approximation: each comes from the best remaining pair
/// plus its best third member, not from an optimal partition of the population.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildPodsResponse {
    pub preset: String,
    pub pods: Vec<PodResult>,
    #[serde(rename = "populationSize")]
    pub population_size: usize,
    #[serde(rename = "emptyReason", skip_serializing_if = "Option::is_none")]
    pub empty_reason: Option<EmptyReason>,
}

/// Response listing configured presets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetsResponse {
    pub themes: Vec<String>,
    pub presets: Vec<Preset>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
