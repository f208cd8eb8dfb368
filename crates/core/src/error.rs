use thiserror::Error;

use crate::model::BankError;
use crate::model::QuestionValidationError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] QuestionValidationError),
    #[error(transparent)]
    Bank(#[from] BankError),
}
