//! simdrive core
//!
//! Pure logic behind the scenario launcher: the selection vocabulary, the
//! level/scene parameter table, composition of the `scenario_runner.py`
//! invocation, and the wizard state machine driving the browser UI.
//!
//! Nothing in this crate performs I/O. Spawning lives in `simdrive-launcher`.

pub mod command;
pub mod selection;
pub mod table;
pub mod wizard;

pub use command::{CommandBuilder, PracticeLayout, RunnerCommand, RunnerLayout};
pub use selection::{Level, ResolvedSelection, Selection};
pub use wizard::{Effect, Frame, Wizard, WizardEvent, WizardView};
