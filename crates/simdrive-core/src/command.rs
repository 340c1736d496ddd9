//! Composition of the `scenario_runner.py` invocation.
//!
//! The builder produces an argument list, never a shell string. Rendering to
//! a single line ([`RunnerCommand::display`]) exists for logs only.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::selection::{ResolvedSelection, Selection};
use crate::table;

/// Paths and fixed literals of the scenario runner checkout.
///
/// Paths are relative to the runner directory the launcher spawns in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunnerLayout {
    /// Interpreter used to run the script.
    pub python: String,
    pub script: String,
    pub route_file: String,
    /// Scenario-config path up to the `<level><scene_id>.json` suffix.
    pub scenario_prefix: String,
    pub agent: String,
    pub weather: String,
    pub practice: PracticeLayout,
}

impl Default for RunnerLayout {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            script: "scenario_runner.py".to_string(),
            route_file: "srunner/data/final_routes_loop.xml".to_string(),
            scenario_prefix: "srunner/data/final_all_towns_traffic_scenarios_loop_".to_string(),
            agent: "srunner/autoagents/human_agent.py".to_string(),
            weather: "Wet Cloudy Noon".to_string(),
            practice: PracticeLayout::default(),
        }
    }
}

/// The fixed practice drive: one route, one scenario file, first town.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PracticeLayout {
    pub route_file: String,
    pub scenario_file: String,
    pub town_index: u8,
}

impl Default for PracticeLayout {
    fn default() -> Self {
        Self {
            route_file: "srunner/data/final_routes.xml".to_string(),
            scenario_file: "srunner/data/practice_all_towns_traffic_scenarios.json".to_string(),
            town_index: 0,
        }
    }
}

/// A program and its arguments, ready to hand to a process spawner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl RunnerCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Shell-quoted one-line rendering, for logs and acknowledgments.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn shell_quote(arg: &str) -> Cow<'_, str> {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if plain {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
    }
}

/// Builds runner commands from wizard selections.
#[derive(Debug, Clone, Default)]
pub struct CommandBuilder {
    layout: RunnerLayout,
}

impl CommandBuilder {
    pub fn new(layout: RunnerLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &RunnerLayout {
        &self.layout
    }

    pub fn build(&self, selection: &Selection) -> RunnerCommand {
        let resolved = selection.resolve();
        if resolved.scene_id.is_none() {
            warn!("Unrecognized scene {:?}; scenario config will carry no scene id", selection.scene);
        }
        if resolved.town_index.is_none() {
            warn!("Unrecognized town {:?}; town argument omitted", selection.town);
        }
        self.build_resolved(&resolved)
    }

    /// Builds from already resolved ids. Missing ids degrade, they never fail:
    /// no scene leaves the filename without a scene suffix, no town drops the
    /// positional town argument.
    pub fn build_resolved(&self, selection: &ResolvedSelection) -> RunnerCommand {
        let layout = &self.layout;
        let mut command = RunnerCommand::new(&layout.python)
            .arg(&layout.script)
            .arg("--route")
            .arg(&layout.route_file)
            .arg(self.scenario_config(&selection.level, selection.scene_id));

        if let Some(town) = selection.town_index {
            command = command.arg(town.to_string());
        }

        command
            .arg("--agent")
            .arg(&layout.agent)
            .arg("--output")
            .arg("--weather")
            .arg(&layout.weather)
            .args(table::parameter_args(&selection.level, selection.scene_id))
    }

    /// `<prefix><level><scene_id>.json`
    pub fn scenario_config(&self, level: &str, scene_id: Option<u8>) -> String {
        let scene = scene_id.map(|id| id.to_string()).unwrap_or_default();
        format!("{}{}{}.json", self.layout.scenario_prefix, level, scene)
    }

    pub fn practice(&self) -> RunnerCommand {
        let layout = &self.layout;
        RunnerCommand::new(&layout.python)
            .arg(&layout.script)
            .arg("--route")
            .arg(&layout.practice.route_file)
            .arg(&layout.practice.scenario_file)
            .arg(layout.practice.town_index.to_string())
            .arg("--agent")
            .arg(&layout.agent)
            .arg("--output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trailing(command: &RunnerCommand) -> String {
        let weather = command
            .args
            .iter()
            .position(|arg| arg == "--weather")
            .expect("weather flag present");
        command.args[weather + 2..].join(" ")
    }

    #[test]
    fn test_hard_scene_two_town_four() {
        let builder = CommandBuilder::default();
        let command = builder.build(&Selection::new("Hard", "Scene 2", "Town 04"));

        assert_eq!(command.program, "python3");
        assert_eq!(
            command.args[..5],
            [
                "scenario_runner.py",
                "--route",
                "srunner/data/final_routes_loop.xml",
                "srunner/data/final_all_towns_traffic_scenarios_loop_hard2.json",
                "2",
            ]
        );
        assert_eq!(
            command.args[5..10],
            [
                "--agent",
                "srunner/autoagents/human_agent.py",
                "--output",
                "--weather",
                "Wet Cloudy Noon",
            ]
        );
        assert_eq!(trailing(&command), table::parameters("hard", Some(2)));
    }

    #[test]
    fn test_level_case_is_normalized() {
        let builder = CommandBuilder::default();
        let command = builder.build(&Selection::new("EASY", "Scene 1", "Town 02"));

        assert!(command
            .args
            .contains(&"srunner/data/final_all_towns_traffic_scenarios_loop_easy1.json".to_string()));
        assert_eq!(trailing(&command), "--repetitions 1");
    }

    #[test]
    fn test_unmapped_combination_has_empty_trailing_segment() {
        let builder = CommandBuilder::default();
        let command = builder.build(&Selection::new("Expert", "Scene 1", "Town 03"));

        assert_eq!(command.args.last().map(String::as_str), Some("Wet Cloudy Noon"));
        assert_eq!(trailing(&command), "");
    }

    #[test]
    fn test_scene_three_is_only_reachable_by_id() {
        let builder = CommandBuilder::default();
        let resolved = ResolvedSelection {
            level: "hard".to_string(),
            scene_id: Some(3),
            town_index: Some(0),
        };
        let command = builder.build_resolved(&resolved);

        assert!(command.args[3].ends_with("loop_hard3.json"));
        assert_eq!(trailing(&command), table::parameters("hard", Some(3)));

        let from_label = builder.build(&Selection::new("Hard", "Scene 3", "Town 02"));
        assert!(from_label.args[3].ends_with("loop_hard.json"));
        assert_eq!(trailing(&from_label), "");
    }

    #[test]
    fn test_unknown_town_drops_positional() {
        let builder = CommandBuilder::default();
        let command = builder.build(&Selection::new("Easy", "Scene 2", "Town 99"));

        assert_eq!(command.args[4], "--agent");
    }

    #[test]
    fn test_practice_command() {
        let command = CommandBuilder::default().practice();
        assert_eq!(
            command.display(),
            "python3 scenario_runner.py --route srunner/data/final_routes.xml \
             srunner/data/practice_all_towns_traffic_scenarios.json 0 \
             --agent srunner/autoagents/human_agent.py --output"
        );
    }

    #[test]
    fn test_display_quotes_weather() {
        let command = CommandBuilder::default().build(&Selection::new("easy", "Scene 1", "Town 05"));
        assert!(command.display().contains("--weather 'Wet Cloudy Noon' --repetitions 1"));
    }

    #[test]
    fn test_display_escapes_single_quotes() {
        let command = RunnerCommand::new("echo").arg("it's");
        assert_eq!(command.display(), r"echo 'it'\''s'");
    }

    #[test]
    fn test_layout_deserializes_partial_overrides() {
        let layout: RunnerLayout =
            serde_json::from_str(r#"{"agent":"srunner/autoagents/steering_agent.py"}"#).unwrap();
        assert_eq!(layout.agent, "srunner/autoagents/steering_agent.py");
        assert_eq!(layout.python, "python3");
        assert_eq!(layout.practice.town_index, 0);
    }
}
