//! Presentation session for the multi-monitor setup.
//!
//! One session exists per launcher process. It owns the wizard state shown on
//! the primary display, the status channel feeding the auxiliary displays,
//! and the browser windows opened in presentation mode. [`teardown`] closes
//! the windows on shutdown.
//!
//! Status delivery is best effort: notices sent while no surface listens are
//! dropped, and a lagging surface skips what it missed.
//!
//! [`teardown`]: PresentationSession::teardown

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};
use simdrive_core::{Effect, Wizard, WizardEvent, WizardView};
use tokio::process::Child;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};

use crate::config::{DisplayBounds, PresentationConfig};
use crate::error::LaunchError;
use crate::spawner::{ProcessSpawner, SpawnRequest};

/// Displays needed for presentation mode: left, primary, right.
pub const REQUIRED_DISPLAYS: usize = 3;

const STATUS_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceRole {
    #[default]
    Primary,
    Left,
    Right,
}

impl SurfaceRole {
    /// Left to right, matching the display order in the profile.
    pub const ORDER: [SurfaceRole; 3] = [SurfaceRole::Left, SurfaceRole::Primary, SurfaceRole::Right];

    pub fn page(self) -> &'static str {
        match self {
            SurfaceRole::Primary => "index.html",
            SurfaceRole::Left => "left.html",
            SurfaceRole::Right => "right.html",
        }
    }

    fn slot(self) -> usize {
        match self {
            SurfaceRole::Primary => 0,
            SurfaceRole::Left => 1,
            SurfaceRole::Right => 2,
        }
    }
}

/// Status line pushed to display surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusNotice {
    pub text: String,
}

pub struct PresentationSession {
    wizard: Mutex<Wizard>,
    status: broadcast::Sender<StatusNotice>,
    connected: [AtomicUsize; 3],
    windows: Mutex<Vec<Child>>,
}

impl Default for PresentationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationSession {
    pub fn new() -> Self {
        let (status, _) = broadcast::channel(STATUS_CAPACITY);
        Self {
            wizard: Mutex::new(Wizard::new()),
            status,
            connected: Default::default(),
            windows: Mutex::new(Vec::new()),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StatusNotice> {
        self.status.subscribe()
    }

    /// Broadcasts a status line. Returns how many surfaces it reached.
    pub fn notify(&self, text: impl Into<String>) -> usize {
        let notice = StatusNotice { text: text.into() };
        match self.status.send(notice) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(notice)) => {
                debug!("No display surface listening for status {:?}", notice.text);
                0
            }
        }
    }

    pub fn attach(&self, role: SurfaceRole) {
        self.connected[role.slot()].fetch_add(1, Ordering::SeqCst);
    }

    pub fn detach(&self, role: SurfaceRole) {
        let _ = self.connected[role.slot()].fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
            n.checked_sub(1)
        });
    }

    pub fn connected(&self, role: SurfaceRole) -> usize {
        self.connected[role.slot()].load(Ordering::SeqCst)
    }

    pub async fn view(&self) -> WizardView {
        self.wizard.lock().await.view()
    }

    /// Applies a wizard event and broadcasts the resulting status.
    pub async fn handle_event(&self, event: WizardEvent) -> (WizardView, Effect) {
        let (view, effect) = {
            let mut wizard = self.wizard.lock().await;
            let effect = wizard.apply(event);
            (wizard.view(), effect)
        };

        let text = effect.status().unwrap_or_else(|| view.status.clone());
        self.notify(text);
        (view, effect)
    }

    /// Opens one fullscreen browser window per display.
    ///
    /// Fewer than [`REQUIRED_DISPLAYS`] displays aborts before anything is
    /// spawned. Returns the number of windows opened.
    pub async fn open_windows(
        &self,
        config: &PresentationConfig,
        base_url: &str,
        spawner: &dyn ProcessSpawner,
    ) -> Result<usize, LaunchError> {
        if config.displays.len() < REQUIRED_DISPLAYS {
            error!(
                "Not enough monitors detected. This setup requires {} monitors, found {}.",
                REQUIRED_DISPLAYS,
                config.displays.len()
            );
            return Err(LaunchError::NotEnoughDisplays {
                found: config.displays.len(),
                required: REQUIRED_DISPLAYS,
            });
        }

        let mut windows = self.windows.lock().await;
        let mut opened = 0;
        for (role, bounds) in SurfaceRole::ORDER.iter().zip(&config.displays) {
            let request = window_request(config, base_url, *role, bounds);
            info!(
                "Opening {:?} window at {},{} ({}x{})",
                role, bounds.x, bounds.y, bounds.width, bounds.height
            );
            if let Some(child) = spawner.spawn(&request)? {
                windows.push(child);
            }
            opened += 1;
        }
        Ok(opened)
    }

    /// Closes presentation windows and resets the wizard.
    pub async fn teardown(&self) {
        self.notify("Launcher shutting down");

        let mut windows = self.windows.lock().await;
        for mut child in windows.drain(..) {
            if let Err(err) = child.kill().await {
                warn!("Failed to close presentation window: {err}");
            }
        }
        *self.wizard.lock().await = Wizard::new();
        info!("Presentation session closed");
    }
}

/// Browser invocation placing `role`'s page fullscreen on `bounds`.
pub fn window_request(
    config: &PresentationConfig,
    base_url: &str,
    role: SurfaceRole,
    bounds: &DisplayBounds,
) -> SpawnRequest {
    let mut args = config.browser_args.clone();
    args.push(format!("--app={}/{}", base_url.trim_end_matches('/'), role.page()));
    args.push(format!("--window-position={},{}", bounds.x, bounds.y));
    args.push(format!("--window-size={},{}", bounds.width, bounds.height));
    args.push("--start-fullscreen".to_string());

    SpawnRequest {
        program: config.browser.clone(),
        args,
        current_dir: None,
    }
}
