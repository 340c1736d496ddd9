//! Opens runner commands in new terminal windows.
//!
//! The hosted command is passed to the terminal as an argument vector. When
//! `hold_open` is set it runs under `bash -c '"$@"; exec bash'` with the
//! command as positional parameters, so the script text is constant and no
//! selection value is ever parsed by a shell.
//!
//! Launches are fire-and-forget: the child handle is dropped immediately and
//! neither exit status nor output is observed.

use std::path::PathBuf;

use simdrive_core::RunnerCommand;
use tracing::{info, warn};

use crate::config::{LauncherProfile, TerminalConfig};
use crate::error::LaunchError;
use crate::spawner::{ProcessSpawner, SpawnRequest};

/// Script run by `bash -c` to execute its positional parameters and then
/// leave an interactive shell behind.
pub const HOLD_OPEN_SCRIPT: &str = r#""$@"; exec bash"#;

/// `$0` for the hold-open script.
const HOLD_OPEN_NAME: &str = "simdrive";

#[derive(Debug, Clone)]
pub struct TerminalLauncher {
    terminal: TerminalConfig,
    runner_dir: Option<PathBuf>,
    companions: Vec<RunnerCommand>,
}

impl TerminalLauncher {
    pub fn new(
        terminal: TerminalConfig,
        runner_dir: Option<PathBuf>,
        companions: Vec<RunnerCommand>,
    ) -> Self {
        Self {
            terminal,
            runner_dir,
            companions,
        }
    }

    pub fn from_profile(profile: &LauncherProfile) -> Self {
        Self::new(
            profile.terminal.clone(),
            profile.runner_dir.clone(),
            profile.companions.clone(),
        )
    }

    /// Builds the terminal invocation hosting `command`.
    pub fn wrap(&self, command: &RunnerCommand) -> SpawnRequest {
        let mut args = self.terminal.args.clone();
        if self.terminal.hold_open {
            args.extend([
                "bash".to_string(),
                "-c".to_string(),
                HOLD_OPEN_SCRIPT.to_string(),
                HOLD_OPEN_NAME.to_string(),
            ]);
        }
        args.push(command.program.clone());
        args.extend(command.args.iter().cloned());

        SpawnRequest {
            program: self.terminal.program.clone(),
            args,
            current_dir: self.runner_dir.clone(),
        }
    }

    /// Opens one terminal for `command` and returns without waiting on it.
    pub fn open(
        &self,
        spawner: &dyn ProcessSpawner,
        command: &RunnerCommand,
    ) -> Result<(), LaunchError> {
        info!("Opening terminal: {}", command.display());
        let _child = spawner.spawn(&self.wrap(command))?;
        Ok(())
    }

    /// Opens the scenario terminal plus one terminal per companion command.
    ///
    /// Companion failures are logged and do not affect the result.
    pub fn launch_scenario(
        &self,
        spawner: &dyn ProcessSpawner,
        command: &RunnerCommand,
    ) -> Result<(), LaunchError> {
        let result = self.open(spawner, command);
        for companion in &self.companions {
            if let Err(err) = self.open(spawner, companion) {
                warn!("Companion {} failed to start: {err}", companion.program);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spawner::mock::{MockBehavior, MockProcessSpawner};

    fn command() -> RunnerCommand {
        RunnerCommand::new("python3")
            .arg("scenario_runner.py")
            .arg("--weather")
            .arg("Wet Cloudy Noon")
    }

    #[test]
    fn test_wrap_hold_open() {
        let launcher = TerminalLauncher::new(
            TerminalConfig::default(),
            Some(PathBuf::from("/opt/runner")),
            Vec::new(),
        );
        let request = launcher.wrap(&command());

        assert_eq!(request.program, "gnome-terminal");
        assert_eq!(
            request.args,
            vec![
                "--",
                "bash",
                "-c",
                HOLD_OPEN_SCRIPT,
                "simdrive",
                "python3",
                "scenario_runner.py",
                "--weather",
                "Wet Cloudy Noon",
            ]
        );
        assert_eq!(request.current_dir, Some(PathBuf::from("/opt/runner")));
    }

    #[test]
    fn test_wrap_without_hold_open() {
        let terminal = TerminalConfig {
            program: "xterm".to_string(),
            args: vec!["-e".to_string()],
            hold_open: false,
        };
        let launcher = TerminalLauncher::new(terminal, None, Vec::new());
        let request = launcher.wrap(&command());

        assert_eq!(request.program, "xterm");
        assert_eq!(request.args[..2], ["-e", "python3"]);
        assert!(request.current_dir.is_none());
    }

    #[test]
    fn test_companions_follow_scenario() {
        let companion = RunnerCommand::new("python3")
            .arg("manual_control_steeringwheel_trials_copy.py")
            .arg("--display_caution");
        let launcher =
            TerminalLauncher::new(TerminalConfig::default(), None, vec![companion]);
        let spawner = MockProcessSpawner::new(MockBehavior::Success);

        launcher.launch_scenario(&spawner, &command()).unwrap();

        let spawned = spawner.spawned();
        assert_eq!(spawned.len(), 2);
        assert_eq!(spawned[1].args.last().map(String::as_str), Some("--display_caution"));
    }

    #[test]
    fn test_spawn_failure_still_attempts_companions() {
        let launcher = TerminalLauncher::new(
            TerminalConfig::default(),
            None,
            vec![RunnerCommand::new("true")],
        );
        let spawner = MockProcessSpawner::new(MockBehavior::SpawnFails {
            error: "no terminal".to_string(),
        });

        let err = launcher.launch_scenario(&spawner, &command()).unwrap_err();
        assert_eq!(err.to_string(), "no terminal");
        assert_eq!(spawner.spawned().len(), 2);
    }
}
