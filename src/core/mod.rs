// Core algorithm exports
pub mod explain;
pub mod filters;
pub mod matcher;
pub mod pods;
pub mod presets;
pub mod scoring;
pub mod similarity;

pub use explain::{shared_bits, top_themes};
pub use filters::{timezone_compatible, pair_eligible, pod_eligible};
pub use matcher::Matcher;
pub use presets::{builtin_presets, PresetError, PresetRegistry};
pub use scoring::{calculate_pair_score, round_one_decimal, DEFAULT_LOCALITY_PENALTY};
pub use similarity::{cosine_similarity, set_overlap, weighted_theme_vector, normalize_weights, complement};
