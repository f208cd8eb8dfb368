mod bank;
mod ids;
mod question;
mod settings;

pub use bank::{Bank, BankError, QuestionFilter};
pub use ids::{ParseIdError, QuestionId};
pub use question::{
    CHOICE_COUNT, Difficulty, ParseDifficultyError, Question, QuestionDraft,
    QuestionRuleViolation, QuestionValidationError, ValidatedQuestion,
};
pub use settings::{ParseThemeError, Settings, Theme};
