//! HTTP handlers for the launch endpoints.
//!
//! Launch endpoints always answer with a fixed acknowledgment. Whether the
//! terminal actually opened is only visible in the launcher log.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use simdrive_core::selection::SCENES;
use simdrive_core::wizard::OFFERED_TOWNS;
use simdrive_core::{Effect, Level, Selection};
use tracing::{info, warn};

use crate::helpers::announce_effect;
use crate::state::{AppState, OptionsResponse, PracticeQuery};

pub const LAUNCH_ACK: &str = "Python script is running in a new terminal.";
pub const PRACTICE_ACK: &str = "Practice scenario is running in a new terminal.";

/// Query value of `GET /run_script` that triggers the practice drive.
pub const PRACTICE_ACTION: &str = "runPracticeCommand";

/// POST `/run_script` - Launches a scenario run for `{level, scene, town}`.
///
/// The body is parsed leniently: malformed JSON or missing fields become
/// empty labels, which the command builder degrades around.
pub async fn run_script_handler(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let selection: Selection = serde_json::from_slice(&body).unwrap_or_else(|err| {
        warn!("Malformed launch request ({err}); launching with empty selection");
        Selection::default()
    });
    info!("Launch request: {:?}", selection);

    announce_effect(&state, Effect::Launch(selection));

    (StatusCode::OK, LAUNCH_ACK)
}

/// GET `/run_script?action=runPracticeCommand` and GET `/api/practice`.
pub async fn practice_handler(
    State(state): State<AppState>,
    Query(query): Query<PracticeQuery>,
) -> impl IntoResponse {
    if let Some(action) = query.action.as_deref() {
        if action != PRACTICE_ACTION {
            warn!("Unknown action: {action}");
            return (StatusCode::BAD_REQUEST, "Unknown action.");
        }
    }
    info!("Practice request");

    announce_effect(&state, Effect::Practice);

    (StatusCode::OK, PRACTICE_ACK)
}

/// GET `/api/options` - The captions the wizard offers.
pub async fn options_handler() -> impl IntoResponse {
    Json(OptionsResponse {
        levels: Level::ALL.iter().map(|l| l.label().to_string()).collect(),
        scenes: SCENES.iter().map(|(caption, _)| caption.to_string()).collect(),
        towns: OFFERED_TOWNS.iter().map(|t| t.to_string()).collect(),
    })
}

/// GET `/api/wizard` - Current wizard frame.
pub async fn wizard_view_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.session.view().await)
}
