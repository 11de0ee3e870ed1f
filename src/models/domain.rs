use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use validator::Validate;

/// Themes used when no theme list is configured
pub const DEFAULT_THEMES: [&str; 6] = [
    "Identity",
    "Growth",
    "Connection",
    "Peace",
    "Adventure",
    "Contribution",
];

/// Fixed, ordered list of theme names
///
/// The order only determines how theme vectors are laid out; it never
/// changes during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeSet(Vec<String>);

impl ThemeSet {
    /// Build a theme set, dropping repeated names while keeping first-seen order
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut themes: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !themes.contains(&name) {
                themes.push(name);
            }
        }
        Self(themes)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|t| t == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ThemeSet {
    fn default() -> Self {
        Self::new(DEFAULT_THEMES)
    }
}

/// A person taking part in event matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Profile {
    #[validate(length(min = 1))]
    pub name: String,
    /// Contact handle, used to label results
    #[validate(length(min = 1))]
    pub email: String,
    #[serde(alias = "timezone", default)]
    pub tz: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub themes: BTreeMap<String, f64>,
    #[serde(default)]
    pub strengths: BTreeSet<String>,
    #[serde(default)]
    pub interests: BTreeSet<String>,
    #[serde(default)]
    pub energizers: BTreeSet<String>,
    #[serde(default)]
    pub drainers: BTreeSet<String>,
    #[serde(default)]
    pub needs: BTreeSet<String>,
}

impl Profile {
    /// Intensity for a theme, zero when the profile doesn't mention it
    #[inline]
    pub fn theme(&self, name: &str) -> f64 {
        self.themes.get(name).copied().unwrap_or(0.0)
    }
}

/// Coefficients mixing the four sub-signals of a pair score
///
/// They are not required to sum to 1, but the score is easiest to read
/// when they do.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringCoefficients {
    /// α, theme similarity
    pub similarity: f64,
    /// β, shared interests
    pub interest: f64,
    /// γ, theme complement
    pub complement: f64,
    /// δ, strengths meeting needs
    #[serde(rename = "strengthNeed", alias = "strength_need")]
    pub strength_need: f64,
}

impl ScoringCoefficients {
    pub fn sum(&self) -> f64 {
        self.similarity + self.interest + self.complement + self.strength_need
    }
}

impl Default for ScoringCoefficients {
    fn default() -> Self {
        Self {
            similarity: 0.60,
            interest: 0.25,
            complement: 0.0,
            strength_need: 0.15,
        }
    }
}

/// Event mode: theme weights plus coefficients and locality rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub weights: BTreeMap<String, f64>,
    pub coefficients: ScoringCoefficients,
    /// No locality constraint when true
    #[serde(rename = "virtual")]
    pub is_virtual: bool,
    #[serde(rename = "useComplement", alias = "use_complement")]
    pub use_complement: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

/// Raw sub-signals behind a pair score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub sim: f64,
    pub intr: f64,
    pub comp: f64,
    #[serde(rename = "strNeed")]
    pub str_need: f64,
    #[serde(rename = "tzOk")]
    pub tz_ok: bool,
}

/// A scored pair drawn from a population
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPair<'a> {
    pub a: &'a Profile,
    pub b: &'a Profile,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// A triad and the mean of its three pair scores
#[derive(Debug, Clone, PartialEq)]
pub struct Pod<'a> {
    pub members: [&'a Profile; 3],
    pub average_score: f64,
}

/// How strictly pods may share people
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PodExclusivity {
    /// A pair seeds at most one pod; people may still appear in several
    #[default]
    Pair,
    /// Each person appears in at most one pod
    Member,
}
