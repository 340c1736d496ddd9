//! Selection vocabulary: difficulty levels, scene labels and town labels.
//!
//! Labels arrive as the literal button captions of the wizard ("Scene 2",
//! "Town 04"). Resolution never fails loudly: an unknown label resolves to
//! `None` and the command builder degrades around it.

use serde::{Deserialize, Serialize};

/// Scene captions and their numeric ids.
pub const SCENES: [(&str, u8); 2] = [("Scene 1", 1), ("Scene 2", 2)];

/// Town captions and the positional index passed to the scenario runner.
pub const TOWNS: [(&str, u8); 5] = [
    ("Town 02", 0),
    ("Town 03", 1),
    ("Town 04", 2),
    ("Town 05", 3),
    ("Town 06", 4),
];

/// Difficulty tiers that carry an entry in the parameter table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Easy,
    Intermediate,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Intermediate, Level::Hard];

    /// Normalized (lowercase) name, as used in table keys and config filenames.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Intermediate => "intermediate",
            Level::Hard => "hard",
        }
    }

    /// Button caption shown by the wizard.
    pub fn label(self) -> &'static str {
        match self {
            Level::Easy => "Easy",
            Level::Intermediate => "Intermediate",
            Level::Hard => "Hard",
        }
    }

    /// Case-insensitive parse.
    pub fn parse(input: &str) -> Option<Self> {
        match normalize_level(input).as_str() {
            "easy" => Some(Level::Easy),
            "intermediate" => Some(Level::Intermediate),
            "hard" => Some(Level::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercases a level string. Unknown levels are kept, not rejected.
pub fn normalize_level(input: &str) -> String {
    input.to_lowercase()
}

pub fn scene_id(label: &str) -> Option<u8> {
    SCENES
        .iter()
        .find(|(caption, _)| *caption == label)
        .map(|(_, id)| *id)
}

pub fn town_index(label: &str) -> Option<u8> {
    TOWNS
        .iter()
        .find(|(caption, _)| *caption == label)
        .map(|(_, index)| *index)
}

/// A raw wizard selection, exactly as posted by the browser.
///
/// Missing fields deserialize to empty strings and resolve to nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub level: String,
    pub scene: String,
    pub town: String,
}

impl Selection {
    pub fn new(
        level: impl Into<String>,
        scene: impl Into<String>,
        town: impl Into<String>,
    ) -> Self {
        Self {
            level: level.into(),
            scene: scene.into(),
            town: town.into(),
        }
    }

    /// Maps captions to ids through the fixed tables and lowercases the level.
    pub fn resolve(&self) -> ResolvedSelection {
        ResolvedSelection {
            level: normalize_level(&self.level),
            scene_id: scene_id(&self.scene),
            town_index: town_index(&self.town),
        }
    }
}

/// A selection after label resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelection {
    /// Lowercased level; may name a tier outside [`Level::ALL`].
    pub level: String,
    pub scene_id: Option<u8>,
    pub town_index: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_town_resolution() {
        assert_eq!(town_index("Town 02"), Some(0));
        assert_eq!(town_index("Town 03"), Some(1));
        assert_eq!(town_index("Town 04"), Some(2));
        assert_eq!(town_index("Town 05"), Some(3));
        assert_eq!(town_index("Town 06"), Some(4));
        assert_eq!(town_index("Town 07"), None);
        assert_eq!(town_index("town 02"), None);
    }

    #[test]
    fn test_scene_resolution_only_knows_two_scenes() {
        assert_eq!(scene_id("Scene 1"), Some(1));
        assert_eq!(scene_id("Scene 2"), Some(2));
        assert_eq!(scene_id("Scene 3"), None);
    }

    #[test]
    fn test_level_parse_is_case_insensitive() {
        assert_eq!(Level::parse("EASY"), Some(Level::Easy));
        assert_eq!(Level::parse("Intermediate"), Some(Level::Intermediate));
        assert_eq!(Level::parse("hArD"), Some(Level::Hard));
        assert_eq!(Level::parse("expert"), None);
    }

    #[test]
    fn test_resolve_keeps_unknown_level_lowercased() {
        let resolved = Selection::new("Expert", "Scene 9", "Town 99").resolve();
        assert_eq!(resolved.level, "expert");
        assert_eq!(resolved.scene_id, None);
        assert_eq!(resolved.town_index, None);
    }

    #[test]
    fn test_selection_missing_fields_default_to_empty() {
        let selection: Selection = serde_json::from_str(r#"{"level":"Hard"}"#).unwrap();
        assert_eq!(selection.level, "Hard");
        assert!(selection.scene.is_empty());
        assert!(selection.town.is_empty());
    }
}
