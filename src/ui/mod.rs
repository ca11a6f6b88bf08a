pub mod orchestrator;
pub mod render;
pub mod search;

pub use orchestrator::{AnalysisRun, Orchestrator};
pub use search::InputAction;
