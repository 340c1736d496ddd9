//! simdrive launcher library - exports modules for the binary and tests.

pub mod config;
pub mod error;
pub mod handlers;
pub mod helpers;
pub mod launcher;
pub mod presentation;
pub mod spawner;
pub mod state;
pub mod websocket;

use std::path::PathBuf;

use axum::routing::{get, post};
use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub use config::LauncherProfile;
pub use spawner::ProcessSpawner;
pub use state::AppState;

/// Builds the launcher router: launch API, surface websocket, and the wizard
/// frontend served from `static_dir`.
pub fn router(state: AppState, static_dir: impl Into<PathBuf>) -> Router {
    Router::new()
        .route(
            "/run_script",
            post(handlers::run_script_handler).get(handlers::practice_handler),
        )
        .route("/api/launch", post(handlers::run_script_handler))
        .route("/api/practice", get(handlers::practice_handler))
        .route("/api/options", get(handlers::options_handler))
        .route("/api/wizard", get(handlers::wizard_view_handler))
        .route("/ws", get(websocket::ws_handler))
        .fallback_service(ServeDir::new(static_dir.into()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
