// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{ThemeSet, Profile, Preset, ScoringCoefficients, ScoreBreakdown, RankedPair, Pod, PodExclusivity, DEFAULT_THEMES};
pub use requests::{ScorePairRequest, RankPairsRequest, BuildPodsRequest};
pub use responses::{MemberSummary, PairResult, PodResult, EmptyReason, ScorePairResponse, RankPairsResponse, BuildPodsResponse, PresetsResponse, HealthResponse, ErrorResponse};
