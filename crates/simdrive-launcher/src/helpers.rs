//! Launch plumbing shared by the HTTP handlers and the websocket.

use std::net::SocketAddr;

use simdrive_core::{Effect, Selection};
use tracing::error;

use crate::error::LaunchError;
use crate::state::AppState;

/// Builds and launches the scenario run for `selection`.
///
/// Failures are logged here; callers answering the browser ignore them.
pub fn launch_selection(state: &AppState, selection: &Selection) -> Result<(), LaunchError> {
    let command = state.builder.build(selection);
    let result = state
        .launcher
        .launch_scenario(state.spawner.as_ref(), &command);
    if let Err(err) = &result {
        error!("Failed to launch scenario {}: {err}", command.display());
    }
    result
}

pub fn launch_practice(state: &AppState) -> Result<(), LaunchError> {
    let command = state.builder.practice();
    let result = state.launcher.open(state.spawner.as_ref(), &command);
    if let Err(err) = &result {
        error!("Failed to launch practice drive: {err}");
    }
    result
}

/// Carries out what a wizard transition asked for.
pub fn apply_effect(state: &AppState, effect: Effect) {
    let _ = match effect {
        Effect::Idle => Ok(()),
        Effect::Launch(selection) => launch_selection(state, &selection),
        Effect::Practice => launch_practice(state),
    };
}

/// Broadcasts the effect's status line, then carries it out.
pub fn announce_effect(state: &AppState, effect: Effect) {
    if let Some(text) = effect.status() {
        state.session.notify(text);
    }
    apply_effect(state, effect);
}

/// URL presentation windows use to reach this server.
///
/// A wildcard bind address is replaced by loopback.
pub fn surface_base_url(bind: SocketAddr) -> String {
    let mut addr = bind;
    if addr.ip().is_unspecified() {
        match addr {
            SocketAddr::V4(_) => addr.set_ip([127, 0, 0, 1].into()),
            SocketAddr::V6(_) => addr.set_ip(std::net::Ipv6Addr::LOCALHOST.into()),
        }
    }
    format!("http://{addr}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_base_url() {
        assert_eq!(
            surface_base_url("0.0.0.0:8080".parse().unwrap()),
            "http://127.0.0.1:8080"
        );
        assert_eq!(
            surface_base_url("192.168.1.20:9000".parse().unwrap()),
            "http://192.168.1.20:9000"
        );
        assert_eq!(surface_base_url("[::]:8080".parse().unwrap()), "http://[::1]:8080");
    }
}
