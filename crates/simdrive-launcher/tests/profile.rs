//! The shipped profile must load and drive a full launch.

use std::path::PathBuf;
use std::sync::Arc;

use simdrive_core::Selection;
use simdrive_launcher::config::LauncherProfile;
use simdrive_launcher::helpers::launch_selection;
use simdrive_launcher::spawner::mock::{MockBehavior, MockProcessSpawner};
use simdrive_launcher::state::AppState;

fn shipped_profile() -> LauncherProfile {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("profiles/three-monitor.yaml");
    LauncherProfile::load(path).expect("shipped profile should load")
}

#[test]
fn test_shipped_profile_loads() {
    let profile = shipped_profile();
    assert_eq!(profile.presentation.displays.len(), 3);
    assert_eq!(profile.companions.len(), 1);
    assert_eq!(profile.terminal.program, "gnome-terminal");
}

#[tokio::test]
async fn test_launch_with_companion_and_runner_dir() {
    let profile = shipped_profile();
    let spawner = MockProcessSpawner::new(MockBehavior::Success);
    let state = AppState::new(&profile, Arc::new(spawner.clone()));

    launch_selection(&state, &Selection::new("Easy", "Scene 2", "Town 03"))
        .expect("mock spawn should succeed");

    let spawned = spawner.spawned();
    assert_eq!(spawned.len(), 2, "Scenario terminal plus one companion");
    assert!(spawned
        .iter()
        .all(|r| r.current_dir == Some(PathBuf::from("/opt/carla/scenario_runner"))));
    assert!(spawned[0].args.iter().any(|a| a.ends_with("loop_easy2.json")));
    assert_eq!(spawned[1].args.last().map(String::as_str), Some("--display_caution"));
}
