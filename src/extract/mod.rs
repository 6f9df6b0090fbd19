//! Strategy orchestration and the interactive fallback.

pub mod manual;
pub mod orchestrator;

pub use manual::{FieldSource, TerminalPrompter};
pub use orchestrator::Extractor;
