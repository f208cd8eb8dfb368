#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod sessions;

pub use sessions as session;

pub use codec::{ImportedState, deserialize, serialize};
pub use error::{ImportError, InvalidEntry, PlayError};

pub use sessions::{
    AnswerOutcome, DisplayedChoice, FinalTally, PlayProgress, PlaySession, Session, SessionConfig,
};
