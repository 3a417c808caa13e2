pub mod detector;
pub mod engine;
pub mod history;
pub(crate) mod machine;
pub mod types;

pub use detector::{DetectionState, MovementAssessment, MovementDetector};
pub use engine::{GameEngine, GameSnapshot};
pub use history::ScoreHistory;
pub use machine::CycleCounter;
pub use types::{Command, GamePhase};
