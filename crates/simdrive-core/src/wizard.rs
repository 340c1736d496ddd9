//! Selection wizard: landing → level → scene → town.
//!
//! Each step has a back transition to the one before it. Choosing a town is
//! terminal and yields [`Effect::Launch`]; the wizard stays on the town frame
//! so the user can launch again or step back.

use serde::{Deserialize, Serialize};

use crate::selection::{Level, Selection, SCENES};

/// Town captions offered by the web wizard. "Town 06" resolves but is not shown.
pub const OFFERED_TOWNS: [&str; 4] = ["Town 02", "Town 03", "Town 04", "Town 05"];

/// The frame currently shown on the primary display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "frame", rename_all = "snake_case")]
pub enum Frame {
    Landing,
    Level,
    Scene { level: String },
    Town { level: String, scene: String },
}

impl Frame {
    /// Element id of the matching frame in the web UI.
    pub fn element_id(&self) -> &'static str {
        match self {
            Frame::Landing => "landingFrame",
            Frame::Level => "levelFrame",
            Frame::Scene { .. } => "scenesFrame",
            Frame::Town { .. } => "townFrame",
        }
    }
}

/// User input, as sent by the primary display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum WizardEvent {
    Play,
    Practice,
    ChooseLevel(String),
    ChooseScene(String),
    ChooseTown(String),
    Back,
}

/// What the caller has to do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Idle,
    Launch(Selection),
    Practice,
}

impl Effect {
    pub fn status(&self) -> Option<String> {
        match self {
            Effect::Idle => None,
            Effect::Launch(selection) => Some(format!(
                "Launching {} / {} / {}",
                selection.level, selection.scene, selection.town
            )),
            Effect::Practice => Some("Launching practice drive".to_string()),
        }
    }
}

/// Snapshot of the wizard for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardView {
    #[serde(flatten)]
    pub frame: Frame,
    pub element_id: String,
    pub options: Vec<String>,
    pub can_go_back: bool,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct Wizard {
    frame: Frame,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            frame: Frame::Landing,
        }
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Applies one event. Events that make no sense for the current frame,
    /// or name an option the frame does not offer, leave the state unchanged.
    pub fn apply(&mut self, event: WizardEvent) -> Effect {
        let (next, effect) = match (&self.frame, event) {
            (Frame::Landing, WizardEvent::Play) => (Some(Frame::Level), Effect::Idle),
            (Frame::Landing, WizardEvent::Practice) => (None, Effect::Practice),

            (Frame::Level, WizardEvent::ChooseLevel(level)) if Level::parse(&level).is_some() => {
                (Some(Frame::Scene { level }), Effect::Idle)
            }
            (Frame::Level, WizardEvent::Back) => (Some(Frame::Landing), Effect::Idle),

            (Frame::Scene { level }, WizardEvent::ChooseScene(scene))
                if SCENES.iter().any(|(caption, _)| *caption == scene) =>
            {
                let next = Frame::Town {
                    level: level.clone(),
                    scene,
                };
                (Some(next), Effect::Idle)
            }
            (Frame::Scene { .. }, WizardEvent::Back) => (Some(Frame::Level), Effect::Idle),

            (Frame::Town { level, scene }, WizardEvent::ChooseTown(town))
                if OFFERED_TOWNS.contains(&town.as_str()) =>
            {
                let selection = Selection::new(level.clone(), scene.clone(), town);
                (None, Effect::Launch(selection))
            }
            (Frame::Town { level, .. }, WizardEvent::Back) => (
                Some(Frame::Scene {
                    level: level.clone(),
                }),
                Effect::Idle,
            ),

            _ => (None, Effect::Idle),
        };

        if let Some(next) = next {
            self.frame = next;
        }
        effect
    }

    pub fn options(&self) -> Vec<String> {
        match &self.frame {
            Frame::Landing => vec!["Practice".to_string(), "Play".to_string()],
            Frame::Level => Level::ALL.iter().map(|l| l.label().to_string()).collect(),
            Frame::Scene { .. } => SCENES.iter().map(|(c, _)| c.to_string()).collect(),
            Frame::Town { .. } => OFFERED_TOWNS.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn status(&self) -> String {
        match &self.frame {
            Frame::Landing => "Press Play to begin".to_string(),
            Frame::Level => "Select a difficulty level".to_string(),
            Frame::Scene { level } => format!("{level}: select a scene"),
            Frame::Town { level, scene } => format!("{level} / {scene}: select a town"),
        }
    }

    pub fn view(&self) -> WizardView {
        WizardView {
            frame: self.frame.clone(),
            element_id: self.frame.element_id().to_string(),
            options: self.options(),
            can_go_back: self.frame != Frame::Landing,
            status: self.status(),
        }
    }
}
