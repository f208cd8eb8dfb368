//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuestionValidationError;

/// Errors emitted by the play state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayError {
    #[error("no choice selected")]
    NoSelection,

    #[error("display position {0} does not point at a choice")]
    SelectionOutOfRange(usize),

    #[error("current question was already answered")]
    AlreadyAnswered,

    #[error("current question has not been answered yet")]
    AnswerPending,

    #[error("session is already finished")]
    Finished,
}

/// One rejected question in an import, with its position in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEntry {
    pub index: usize,
    pub error: QuestionValidationError,
}

/// Errors emitted by the import codec. Import is all-or-nothing: any of
/// these leaves the caller's existing bank untouched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    #[error("document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("document has no `bank` array")]
    BankMissing,

    #[error("{} imported question(s) failed validation", .entries.len())]
    InvalidQuestions { entries: Vec<InvalidEntry> },
}
