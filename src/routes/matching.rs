use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::MatchingSettings;
use crate::core::{Matcher, PresetError, PresetRegistry};
use crate::models::{
    BuildPodsRequest, BuildPodsResponse, EmptyReason, ErrorResponse, HealthResponse, PairResult,
    PodResult, Preset, PresetsResponse, RankPairsRequest, RankPairsResponse, ScorePairRequest,
    ScorePairResponse,
};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
    pub presets: Arc<PresetRegistry>,
    pub matching: MatchingSettings,
}

/// Configure all matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/presets", web::get().to(list_presets))
        .route("/pairs/score", web::post().to(score_pair))
        .route("/pairs/rank", web::post().to(rank_pairs))
        .route("/pods/build", web::post().to(build_pods));
}

fn validation_error(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn resolve_preset<'s>(state: &'s AppState, name: &str) -> Result<&'s Preset, HttpResponse> {
    state.presets.get(name).map_err(|e| {
        tracing::info!("Rejected request: {}", e);
        match &e {
            PresetError::NotFound(_) => HttpResponse::NotFound().json(ErrorResponse {
                error: "Unknown preset".to_string(),
                message: format!("{}. Available: {}", e, state.presets.names().collect::<Vec<_>>().join(", ")),
                status_code: 404,
            }),
            other => HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Preset error".to_string(),
                message: other.to_string(),
                status_code: 500,
            }),
        }
    })
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// List configured presets
///
/// GET /api/v1/presets
async fn list_presets(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(PresetsResponse {
        themes: state.matcher.themes().iter().map(str::to_string).collect(),
        presets: state.presets.all().to_vec(),
    })
}

/// Score a single pair
///
/// POST /api/v1/pairs/score
///
/// Request body:
/// ```json
/// {
///   "preset": "Skill-Share (virtual or local)",
///   "a": { "name": "Ava", "email": "ava@example.com", ... },
///   "b": { "name": "Ben", "email": "ben@example.com", ... }
/// }
/// ```
///
/// The city filter is not applied here; the score always comes back.
async fn score_pair(
    state: web::Data<AppState>,
    req: web::Json<ScorePairRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for score_pair request: {:?}", errors);
        return validation_error(errors);
    }

    let preset = match resolve_preset(&state, &req.preset) {
        Ok(preset) => preset,
        Err(response) => return response,
    };

    let (score, breakdown) = state.matcher.score_pair(&req.a, &req.b, preset);

    tracing::info!(
        "Scored {} <-> {} under '{}': {:.1}",
        req.a.name,
        req.b.name,
        preset.name,
        score
    );

    HttpResponse::Ok().json(ScorePairResponse {
        preset: preset.name.clone(),
        pair: PairResult::new(&req.a, &req.b, score, breakdown, state.matcher.themes()),
    })
}

/// Rank pairs endpoint
///
/// POST /api/v1/pairs/rank
///
/// Request body:
/// ```json
/// {
///   "preset": "Deep Work Sprint (virtual)",
///   "population": [ { "name": "Ava", "email": "ava@example.com", ... } ],
///   "limit": 8
/// }
/// ```
async fn rank_pairs(
    state: web::Data<AppState>,
    req: web::Json<RankPairsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for rank_pairs request: {:?}", errors);
        return validation_error(errors);
    }

    let preset = match resolve_preset(&state, &req.preset) {
        Ok(preset) => preset,
        Err(response) => return response,
    };

    let limit = state
        .matching
        .resolve_limit(req.limit, state.matching.default_pair_limit);
    let population_size = req.population.len();

    tracing::info!(
        "Ranking pairs for {} profiles under '{}', limit: {}",
        population_size,
        preset.name,
        limit
    );

    let pairs: Vec<PairResult> = state
        .matcher
        .rank_pairs(&req.population, preset, limit)
        .iter()
        .map(|pair| PairResult::from_ranked(pair, state.matcher.themes()))
        .collect();

    let empty_reason = if !pairs.is_empty() {
        None
    } else if population_size < 2 {
        Some(EmptyReason::PopulationTooSmall)
    } else {
        Some(EmptyReason::NoEligiblePairs)
    };

    tracing::info!("Returning {} pairs under '{}'", pairs.len(), preset.name);

    HttpResponse::Ok().json(RankPairsResponse {
        preset: preset.name.clone(),
        pairs,
        population_size,
        empty_reason,
    })
}

/// Build pods endpoint
///
/// POST /api/v1/pods/build
///
/// Request body:
/// ```json
/// {
///   "preset": "Micro-Adventure Saturday (in-person)",
///   "population": [ { "name": "Ava", "email": "ava@example.com", ... } ],
///   "limit": 5,
///   "podSize": 3
/// }
/// ```
///
/// Pods are a greedy approximation, not an optimal grouping.
async fn build_pods(
    state: web::Data<AppState>,
    req: web::Json<BuildPodsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for build_pods request: {:?}", errors);
        return validation_error(errors);
    }

    let preset = match resolve_preset(&state, &req.preset) {
        Ok(preset) => preset,
        Err(response) => return response,
    };

    let limit = state
        .matching
        .resolve_limit(req.limit, state.matching.default_pod_limit);
    let population_size = req.population.len();

    tracing::info!(
        "Building pods for {} profiles under '{}', limit: {}",
        population_size,
        preset.name,
        limit
    );

    let pods: Vec<PodResult> = state
        .matcher
        .build_pods(&req.population, preset, limit)
        .iter()
        .map(|pod| PodResult::from_pod(pod, state.matcher.themes()))
        .collect();

    let empty_reason = if !pods.is_empty() {
        None
    } else if population_size < 3 {
        Some(EmptyReason::PopulationTooSmall)
    } else {
        Some(EmptyReason::NoEligiblePods)
    };

    tracing::info!("Returning {} pods under '{}'", pods.len(), preset.name);

    HttpResponse::Ok().json(BuildPodsResponse {
        preset: preset.name.clone(),
        pods,
        population_size,
        empty_reason,
    })
}
