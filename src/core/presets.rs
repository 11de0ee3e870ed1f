use std::collections::BTreeMap;
use thiserror::Error;
use crate::models::{Preset, ScoringCoefficients, ThemeSet};

/// Errors that can occur when building or querying presets
#[derive(Debug, Error, PartialEq)]
pub enum PresetError {
    #[error("Preset not found: {0}")]
    NotFound(String),

    #[error("Duplicate preset: {0}")]
    Duplicate(String),

    #[error("Preset name must not be empty")]
    EmptyName,

    #[error("Invalid weight for theme '{theme}' in preset '{preset}': {value}")]
    InvalidWeight {
        preset: String,
        theme: String,
        value: f64,
    },

    #[error("Invalid coefficients in preset '{0}': all must be finite")]
    InvalidCoefficient(String),
}

fn weights(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries.iter().map(|(theme, w)| (theme.to_string(), *w)).collect()
}

/// Presets shipped with the service
///
/// Used whenever configuration doesn't list any presets.
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset {
            name: "Deep Work Sprint (virtual)".to_string(),
            weights: weights(&[
                ("Identity", 0.25),
                ("Peace", 0.25),
                ("Growth", 0.25),
                ("Contribution", 0.15),
                ("Connection", 0.10),
                ("Adventure", 0.0),
            ]),
            coefficients: ScoringCoefficients {
                similarity: 0.60,
                interest: 0.25,
                complement: 0.0,
                strength_need: 0.15,
            },
            is_virtual: true,
            use_complement: false,
            rationale: Some("Focus + calm + small progress; pair similar pace and interests.".to_string()),
        },
        Preset {
            name: "Micro-Adventure Saturday (in-person)".to_string(),
            weights: weights(&[
                ("Adventure", 0.35),
                ("Connection", 0.25),
                ("Growth", 0.20),
                ("Peace", 0.10),
                ("Identity", 0.05),
                ("Contribution", 0.05),
            ]),
            coefficients: ScoringCoefficients {
                similarity: 0.55,
                interest: 0.20,
                complement: 0.20,
                strength_need: 0.05,
            },
            is_virtual: false,
            use_complement: true,
            rationale: Some("Energy + connection; allow a little complement to nudge exploration.".to_string()),
        },
        Preset {
            name: "Skill-Share (virtual or local)".to_string(),
            weights: weights(&[
                ("Contribution", 0.30),
                ("Growth", 0.25),
                ("Connection", 0.20),
                ("Identity", 0.15),
                ("Peace", 0.10),
                ("Adventure", 0.0),
            ]),
            coefficients: ScoringCoefficients {
                similarity: 0.45,
                interest: 0.20,
                complement: 0.25,
                strength_need: 0.10,
            },
            is_virtual: true,
            use_complement: true,
            rationale: Some("Teach & learn; match strengths to needs with some complement.".to_string()),
        },
    ]
}

/// Read-only collection of named presets
///
/// Keeps definition order so listings are stable.
#[derive(Debug, Clone)]
pub struct PresetRegistry {
    presets: Vec<Preset>,
}

impl PresetRegistry {
    /// Build a registry, validating every preset against the theme set
    ///
    /// Weight keys are matched to theme names ignoring ASCII case (config
    /// sources may fold keys). Weights for themes outside the set are dropped
    /// with a warning.
    pub fn new(presets: Vec<Preset>, themes: &ThemeSet) -> Result<Self, PresetError> {
        let mut validated: Vec<Preset> = Vec::with_capacity(presets.len());

        for mut preset in presets {
            let name = preset.name.trim().to_string();
            if name.is_empty() {
                return Err(PresetError::EmptyName);
            }
            if validated.iter().any(|p| p.name == name) {
                return Err(PresetError::Duplicate(name));
            }

            let c = &preset.coefficients;
            if ![c.similarity, c.interest, c.complement, c.strength_need]
                .iter()
                .all(|v| v.is_finite())
            {
                return Err(PresetError::InvalidCoefficient(name));
            }

            let mut canonical = BTreeMap::new();
            for (theme, value) in &preset.weights {
                if !value.is_finite() || *value < 0.0 {
                    return Err(PresetError::InvalidWeight {
                        preset: name,
                        theme: theme.clone(),
                        value: *value,
                    });
                }

                match themes.iter().find(|t| t.eq_ignore_ascii_case(theme)) {
                    Some(known) => {
                        canonical.insert(known.to_string(), *value);
                    }
                    None => {
                        tracing::warn!("Preset '{}' weights unknown theme '{}', ignoring", name, theme);
                    }
                }
            }

            if (preset.coefficients.sum() - 1.0).abs() > 1e-6 {
                tracing::debug!(
                    "Preset '{}' coefficients sum to {:.3}, scores may saturate",
                    name,
                    preset.coefficients.sum()
                );
            }

            preset.name = name;
            preset.weights = canonical;
            validated.push(preset);
        }

        Ok(Self { presets: validated })
    }

    /// Registry holding the built-in presets
    pub fn builtin(themes: &ThemeSet) -> Result<Self, PresetError> {
        Self::new(builtin_presets(), themes)
    }

    /// Look up a preset by exact name
    pub fn get(&self, name: &str) -> Result<&Preset, PresetError> {
        self.presets
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| PresetError::NotFound(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.name.as_str())
    }

    pub fn all(&self) -> &[Preset] {
        &self.presets
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
