use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::Profile;

/// Request to score a single pair
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScorePairRequest {
    #[validate(length(min = 1))]
    pub preset: String,
    #[validate(nested)]
    pub a: Profile,
    #[validate(nested)]
    pub b: Profile,
}

/// Request to rank every eligible pair of a population
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankPairsRequest {
    #[validate(length(min = 1))]
    pub preset: String,
    #[validate(nested)]
    #[serde(default)]
    pub population: Vec<Profile>,
    #[validate(range(min = 1))]
    pub limit: Option<u16>,
}

/// Request to build pods from a population
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BuildPodsRequest {
    #[validate(length(min = 1))]
    pub preset: String,
    #[validate(nested)]
    #[serde(default)]
    pub population: Vec<Profile>,
    #[validate(range(min = 1))]
    pub limit: Option<u16>,
    /// Only triads are supported
    #[validate(range(min = 3, max = 3))]
    #[serde(default = "default_pod_size", rename = "podSize", alias = "pod_size")]
    pub pod_size: u8,
}

fn default_pod_size() -> u8 {
    3
}
