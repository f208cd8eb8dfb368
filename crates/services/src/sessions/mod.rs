mod plan;
mod play;
mod progress;

// Public API of the session subsystem.
pub use crate::error::PlayError;
pub use plan::{Session, SessionConfig};
pub use play::{AnswerOutcome, DisplayedChoice, FinalTally, PlaySession};
pub use progress::PlayProgress;
