//! Process spawning abstraction for testability.
//!
//! Terminals and presentation windows are spawned through [`ProcessSpawner`]
//! so tests can record invocations instead of opening real windows.

use std::path::PathBuf;

use tokio::process::{Child, Command};
use tracing::debug;

use crate::error::LaunchError;

/// A fully resolved process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRequest {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

/// Trait for spawning child processes.
///
/// Returns the child handle when a real process exists. Callers that fire
/// and forget simply drop it; tokio reaps dropped children in the background.
pub trait ProcessSpawner: Send + Sync {
    fn spawn(&self, request: &SpawnRequest) -> Result<Option<Child>, LaunchError>;
}

/// Spawns real processes via `tokio::process::Command`.
pub struct RealProcessSpawner;

impl ProcessSpawner for RealProcessSpawner {
    fn spawn(&self, request: &SpawnRequest) -> Result<Option<Child>, LaunchError> {
        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args);
        if let Some(dir) = &request.current_dir {
            cmd.current_dir(dir);
        }

        let child = cmd.spawn().map_err(|source| LaunchError::Spawn {
            program: request.program.clone(),
            source,
        })?;
        debug!("Spawned {} (pid {:?})", request.program, child.id());
        Ok(Some(child))
    }
}

pub mod mock {
    //! Recording spawner for tests.

    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Every spawn succeeds without starting a process.
        Success,
        /// Every spawn fails with the given message.
        SpawnFails { error: String },
    }

    /// Records every request and answers according to its [`MockBehavior`].
    #[derive(Clone)]
    pub struct MockProcessSpawner {
        behavior: Arc<Mutex<MockBehavior>>,
        spawned: Arc<Mutex<Vec<SpawnRequest>>>,
    }

    impl MockProcessSpawner {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior: Arc::new(Mutex::new(behavior)),
                spawned: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Requests seen so far, including failed ones.
        pub fn spawned(&self) -> Vec<SpawnRequest> {
            self.spawned
                .lock()
                .expect("MockProcessSpawner spawned mutex poisoned")
                .clone()
        }

        pub fn set_behavior(&self, behavior: MockBehavior) {
            *self
                .behavior
                .lock()
                .expect("MockProcessSpawner behavior mutex poisoned") = behavior;
        }
    }

    impl ProcessSpawner for MockProcessSpawner {
        fn spawn(&self, request: &SpawnRequest) -> Result<Option<Child>, LaunchError> {
            self.spawned
                .lock()
                .expect("MockProcessSpawner spawned mutex poisoned")
                .push(request.clone());

            let behavior = self
                .behavior
                .lock()
                .expect("MockProcessSpawner behavior mutex poisoned")
                .clone();

            match behavior {
                MockBehavior::Success => Ok(None),
                MockBehavior::SpawnFails { error } => Err(LaunchError::Rejected(error)),
            }
        }
    }
}
