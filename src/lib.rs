pub mod config;
pub mod controls;
pub mod error;
pub mod gameplay;
pub mod grid;
pub mod layout;
pub mod model;
pub mod puzzle;
pub mod renderer;
pub mod report;

pub use config::{ParamField, PuzzleParams};
pub use error::PuzzleError;
pub use gameplay::GameController;
pub use grid::{GridCoord, GridLayout};
pub use layout::generate_layout;
pub use model::{Slot, Tube};
pub use puzzle::{MoveRecord, PuzzleEngine};
pub use report::format_move_history;
