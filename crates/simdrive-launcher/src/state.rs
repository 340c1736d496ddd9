//! Shared application state and request/response types for the launcher API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use simdrive_core::CommandBuilder;

use crate::config::LauncherProfile;
use crate::launcher::TerminalLauncher;
use crate::presentation::PresentationSession;
use crate::spawner::ProcessSpawner;

/// Shared application state for the launcher server.
///
/// Everything is immutable after startup except the presentation session,
/// which guards its own state. Cloning copies `Arc` pointers only.
#[derive(Clone)]
pub struct AppState {
    pub builder: Arc<CommandBuilder>,
    pub launcher: Arc<TerminalLauncher>,
    pub spawner: Arc<dyn ProcessSpawner>,
    pub session: Arc<PresentationSession>,
}

impl AppState {
    pub fn new(profile: &LauncherProfile, spawner: Arc<dyn ProcessSpawner>) -> Self {
        Self {
            builder: Arc::new(CommandBuilder::new(profile.runner.clone())),
            launcher: Arc::new(TerminalLauncher::from_profile(profile)),
            spawner,
            session: Arc::new(PresentationSession::new()),
        }
    }
}

/// Query string of `GET /run_script`.
#[derive(Debug, Default, Deserialize)]
pub struct PracticeQuery {
    pub action: Option<String>,
}

/// Query string of `GET /ws`.
#[derive(Debug, Default, Deserialize)]
pub struct SurfaceQuery {
    #[serde(default)]
    pub surface: crate::presentation::SurfaceRole,
}

/// HTTP response payload for `/api/options`.
#[derive(Debug, Serialize, Deserialize)]
pub struct OptionsResponse {
    pub levels: Vec<String>,
    pub scenes: Vec<String>,
    pub towns: Vec<String>,
}
