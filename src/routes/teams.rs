use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::config::MatchingOptions;
use crate::core::{TeamFormationEngine, UuidTeamIds};
use crate::models::{ErrorResponse, HealthResponse, MatchTeamsRequest};

/// Application state shared across all handlers
#[derive(Clone, Default)]
pub struct AppState {
    pub defaults: MatchingOptions,
}

/// Configure all team-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/teams/match", web::post().to(match_teams));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Form teams endpoint
///
/// POST /api/v1/teams/match
///
/// Request body:
/// ```json
/// {
///   "participants": [{ "id": "string", "preferredTeamSize": 3, "...": "..." }],
///   "options": { "useIterativeMatching": true, "logLevel": "detailed" }
/// }
/// ```
///
/// Input problems such as an empty roster come back as `success: false`
/// with status 200; only malformed options are rejected with 400.
async fn match_teams(
    state: web::Data<AppState>,
    req: web::Json<MatchTeamsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match_teams request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let MatchTeamsRequest { participants, options } = req.into_inner();
    let options = options.unwrap_or_else(|| state.defaults.clone());

    tracing::info!("Forming teams for {} participants", participants.len());

    let engine = TeamFormationEngine::new(options);
    let response = web::block(move || engine.run(participants, &mut UuidTeamIds)).await;

    match response {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            tracing::error!("Team matching worker failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Team matching failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
