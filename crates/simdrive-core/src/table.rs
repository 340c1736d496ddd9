//! Level/scene parameter table.
//!
//! Each entry is the literal block of spawn-density flags handed to
//! `scenario_runner.py` for one difficulty tier and scene. Lookups never
//! fail: a combination without an entry yields an empty parameter set.
//!
//! Scene 3 rows are carried even though no wizard caption resolves to scene 3.

/// One row of the table. `scene: None` matches any scene, including none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub level: &'static str,
    pub scene: Option<u8>,
    pub parameters: &'static str,
}

const fn entry(level: &'static str, scene: Option<u8>, parameters: &'static str) -> Entry {
    Entry {
        level,
        scene,
        parameters,
    }
}

/// Rows in match order; the first matching row wins.
pub const TABLE: &[Entry] = &[
    entry("easy", None, "--repetitions 1"),
    entry(
        "intermediate",
        Some(1),
        "--spawn_pedestrian --num_walkers 15 --spawn_vehicle \
         --spawn_vehicle_Indic_TwoWheeler --num_vehicles_Indic_TwoWheeler 10",
    ),
    entry(
        "intermediate",
        Some(2),
        "--spawn_pedestrian --num_walkers 20 --spawn_vehicle \
         --spawn_vehicle_Indic_TwoWheeler --num_vehicles_Indic_TwoWheeler 15 \
         --spawn_vehicle_Indic_ThreeWheeler --num_vehicles_Indic_ThreeWheeler 5",
    ),
    entry(
        "intermediate",
        Some(3),
        "--spawn_pedestrian --num_walkers 25 --spawn_vehicle \
         --spawn_vehicle_Indic_TwoWheeler --num_vehicles_Indic_TwoWheeler 25 \
         --spawn_vehicle_Indic_ThreeWheeler --num_vehicles_Indic_ThreeWheeler 10",
    ),
    entry(
        "hard",
        Some(1),
        "--spawn_pedestrian --num_walkers 150 --spawn_vehicle \
         --spawn_vehicle_Indic_TwoWheeler --num_vehicles_Indic_TwoWheeler 15 \
         --spawn_vehicle_Indic_HeavyVehicle --num_vehicles_Indic_HeavyVehicle 15 \
         --spawn_vehicle_Indic_ThreeWheeler --num_vehicles_Indic_ThreeWheeler 15",
    ),
    entry(
        "hard",
        Some(2),
        "--spawn_vehicle --spawn_vehicle_Indic_TwoWheeler --num_vehicles_Indic_TwoWheeler 25 \
         --spawn_vehicle_Indic_HeavyVehicle --num_vehicles_Indic_HeavyVehicle 10 \
         --spawn_vehicle_Indic_ThreeWheeler --num_vehicles_Indic_ThreeWheeler 15 \
         --spawn_vehicle_Indic_FourWheeler --num_vehicles_Indic_FourWheeler 5",
    ),
    entry(
        "hard",
        Some(3),
        "--spawn_vehicle --spawn_vehicle_Indic_TwoWheeler --num_vehicles_Indic_TwoWheeler 100 \
         --spawn_vehicle_Indic_HeavyVehicle --num_vehicles_Indic_HeavyVehicle 20 \
         --spawn_vehicle_Indic_ThreeWheeler --num_vehicles_Indic_ThreeWheeler 1000 \
         --spawn_vehicle_Indic_FourWheeler --num_vehicles_Indic_FourWheeler 15",
    ),
];

/// Returns the parameter string for a normalized level and scene id, or `""`.
pub fn parameters(level: &str, scene_id: Option<u8>) -> &'static str {
    TABLE
        .iter()
        .find(|row| row.level == level && (row.scene.is_none() || row.scene == scene_id))
        .map(|row| row.parameters)
        .unwrap_or("")
}

/// The parameter string split into individual arguments.
pub fn parameter_args(level: &str, scene_id: Option<u8>) -> impl Iterator<Item = &'static str> {
    parameters(level, scene_id).split_whitespace()
}
