//! Launcher profile: where the scenario runner lives and how to open terminals
//! and presentation windows.
//!
//! Profiles are YAML files. Every field is optional; the defaults reproduce a
//! stock setup (gnome-terminal, `python3 scenario_runner.py` in the working
//! directory, chromium for presentation windows).
//!
//! ```yaml
//! apiVersion: simdrive/v1
//! kind: LauncherProfile
//! runnerDir: /opt/scenario_runner
//! runner:
//!   agent: srunner/autoagents/steering_agent.py
//! companions:
//!   - program: python3
//!     args: [manual_control_steeringwheel_trials_copy.py, --display_caution]
//! presentation:
//!   displays:
//!     - { x: 0, y: 0, width: 1920, height: 1080 }
//!     - { x: 1920, y: 0, width: 1920, height: 1080 }
//!     - { x: 3840, y: 0, width: 1920, height: 1080 }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use simdrive_core::{RunnerCommand, RunnerLayout};

use crate::error::{ConfigError, ConfigResult};

const API_VERSION: &str = "simdrive/v1";
const KIND: &str = "LauncherProfile";

fn default_api_version() -> String {
    API_VERSION.to_string()
}

fn default_kind() -> String {
    KIND.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LauncherProfile {
    #[serde(default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    /// Scenario runner checkout. Terminals start here; `None` keeps the
    /// launcher's own working directory.
    #[serde(default)]
    pub runner_dir: Option<PathBuf>,

    #[serde(default)]
    pub runner: RunnerLayout,

    #[serde(default)]
    pub terminal: TerminalConfig,

    /// Extra commands opened in their own terminals next to every scenario run.
    #[serde(default)]
    pub companions: Vec<RunnerCommand>,

    #[serde(default)]
    pub presentation: PresentationConfig,
}

impl Default for LauncherProfile {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            runner_dir: None,
            runner: RunnerLayout::default(),
            terminal: TerminalConfig::default(),
            companions: Vec::new(),
            presentation: PresentationConfig::default(),
        }
    }
}

impl LauncherProfile {
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        let profile: LauncherProfile = serde_yaml::from_str(yaml)?;
        profile.validate()?;
        Ok(profile)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.api_version != API_VERSION {
            return Err(ConfigError::InvalidApiVersion(self.api_version.clone()));
        }
        if self.kind != KIND {
            return Err(ConfigError::InvalidKind(self.kind.clone()));
        }
        if self.terminal.program.trim().is_empty() {
            return Err(ConfigError::EmptyTerminal);
        }
        Ok(())
    }
}

/// Terminal emulator used to host spawned commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TerminalConfig {
    pub program: String,
    /// Arguments placed before the hosted command (`--` for gnome-terminal).
    pub args: Vec<String>,
    /// Drop into an interactive shell once the command exits, so its output
    /// stays readable.
    pub hold_open: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            program: "gnome-terminal".to_string(),
            args: vec!["--".to_string()],
            hold_open: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PresentationConfig {
    pub browser: String,
    pub browser_args: Vec<String>,
    /// Monitor bounds, left to right. Presentation mode needs three.
    pub displays: Vec<DisplayBounds>,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            browser: "chromium".to_string(),
            browser_args: vec!["--new-window".to_string()],
            displays: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_profile_uses_defaults() {
        let profile = LauncherProfile::from_yaml("{}").unwrap();
        assert_eq!(profile.terminal, TerminalConfig::default());
        assert_eq!(profile.runner, RunnerLayout::default());
        assert!(profile.companions.is_empty());
        assert!(profile.runner_dir.is_none());
    }

    #[test]
    fn test_full_profile() {
        let yaml = r#"
apiVersion: simdrive/v1
kind: LauncherProfile
runnerDir: /opt/scenario_runner
runner:
  agent: srunner/autoagents/steering_agent.py
  weather: Clear Noon
terminal:
  program: xterm
  args: [-hold, -e]
  holdOpen: false
companions:
  - program: python3
    args: [manual_control_steeringwheel_trials_copy.py, --display_caution]
presentation:
  browser: firefox
  displays:
    - { x: 0, y: 0, width: 1920, height: 1080 }
    - { x: 1920, y: 0, width: 2560, height: 1440 }
"#;
        let profile = LauncherProfile::from_yaml(yaml).unwrap();

        assert_eq!(profile.runner_dir, Some(PathBuf::from("/opt/scenario_runner")));
        assert_eq!(profile.runner.agent, "srunner/autoagents/steering_agent.py");
        assert_eq!(profile.runner.weather, "Clear Noon");
        assert_eq!(profile.runner.python, "python3");
        assert_eq!(profile.terminal.program, "xterm");
        assert_eq!(profile.terminal.args, vec!["-hold", "-e"]);
        assert!(!profile.terminal.hold_open);
        assert_eq!(profile.companions.len(), 1);
        assert_eq!(profile.companions[0].args[1], "--display_caution");
        assert_eq!(profile.presentation.browser, "firefox");
        assert_eq!(profile.presentation.browser_args, vec!["--new-window"]);
        assert_eq!(profile.presentation.displays[1].width, 2560);
    }

    #[test]
    fn test_rejects_wrong_api_version() {
        let err = LauncherProfile::from_yaml("apiVersion: simdrive/v2").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiVersion(v) if v == "simdrive/v2"));
    }

    #[test]
    fn test_rejects_wrong_kind() {
        let err = LauncherProfile::from_yaml("kind: Scenario").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKind(_)));
    }

    #[test]
    fn test_rejects_empty_terminal() {
        let err = LauncherProfile::from_yaml("terminal:\n  program: \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyTerminal));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "runnerDir: /srv/carla/scenario_runner").unwrap();

        let profile = LauncherProfile::load(file.path()).unwrap();
        assert_eq!(
            profile.runner_dir,
            Some(PathBuf::from("/srv/carla/scenario_runner"))
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = LauncherProfile::load("/nonexistent/simdrive.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
