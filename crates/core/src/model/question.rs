use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Every question carries exactly this many choices.
pub const CHOICE_COUNT: usize = 4;

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Difficulty grade of a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error type for parsing a difficulty from string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty `{0}`")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ParseDifficultyError(other.to_string())),
        }
    }
}

//
// ─── VALIDATION ERRORS ─────────────────────────────────────────────────────────
//

/// A single broken authoring rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionRuleViolation {
    #[error("category cannot be empty")]
    EmptyCategory,

    #[error("question text cannot be empty")]
    EmptyText,

    #[error("exactly {CHOICE_COUNT} choices are required, got {0}")]
    WrongChoiceCount(usize),

    #[error("choice {0} cannot be empty")]
    EmptyChoice(usize),

    #[error("choices must be distinct ignoring case")]
    DuplicateChoices,

    #[error("answer index {0} does not point at a choice")]
    AnswerIndexOutOfRange(usize),
}

/// All rules a draft broke, reported together so an editing UI can show
/// the complete list rather than the first hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionValidationError {
    violations: Vec<QuestionRuleViolation>,
}

impl QuestionValidationError {
    #[must_use]
    pub fn violations(&self) -> &[QuestionRuleViolation] {
        &self.violations
    }
}

impl fmt::Display for QuestionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid question: ")?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for QuestionValidationError {}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question fields as collected from an editing form or an
/// imported document. Drafts never carry an id; ids are assigned by the
/// bank on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub category: String,
    pub difficulty: Difficulty,
    pub text: String,
    pub choices: Vec<String>,
    pub answer_index: usize,
    pub tags: Vec<String>,
}

impl QuestionDraft {
    /// Validate the draft, reporting every broken rule at once.
    ///
    /// Category, text and choices are trimmed before the emptiness and
    /// uniqueness checks.
    ///
    /// # Errors
    ///
    /// Returns `QuestionValidationError` listing all violations.
    pub fn validate(self) -> Result<ValidatedQuestion, QuestionValidationError> {
        let category = self.category.trim().to_string();
        let text = self.text.trim().to_string();
        let choices: Vec<String> = self
            .choices
            .iter()
            .map(|c| c.trim().to_string())
            .collect();

        let mut violations = Vec::new();

        if category.is_empty() {
            violations.push(QuestionRuleViolation::EmptyCategory);
        }
        if text.is_empty() {
            violations.push(QuestionRuleViolation::EmptyText);
        }
        if choices.len() != CHOICE_COUNT {
            violations.push(QuestionRuleViolation::WrongChoiceCount(choices.len()));
        }
        for (i, choice) in choices.iter().enumerate() {
            if choice.is_empty() {
                violations.push(QuestionRuleViolation::EmptyChoice(i));
            }
        }
        let mut lowered: Vec<String> = choices.iter().map(|c| c.to_lowercase()).collect();
        lowered.sort();
        lowered.dedup();
        if lowered.len() != choices.len() {
            violations.push(QuestionRuleViolation::DuplicateChoices);
        }
        if self.answer_index >= CHOICE_COUNT {
            violations.push(QuestionRuleViolation::AnswerIndexOutOfRange(
                self.answer_index,
            ));
        }

        if !violations.is_empty() {
            return Err(QuestionValidationError { violations });
        }

        let choices: [String; CHOICE_COUNT] = match choices.try_into() {
            Ok(choices) => choices,
            Err(rest) => {
                return Err(QuestionValidationError {
                    violations: vec![QuestionRuleViolation::WrongChoiceCount(rest.len())],
                });
            }
        };

        Ok(ValidatedQuestion {
            category,
            difficulty: self.difficulty,
            text,
            choices,
            answer_index: self.answer_index,
            tags: self.tags,
        })
    }
}

/// A draft that passed every authoring rule but has no identity yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuestion {
    category: String,
    difficulty: Difficulty,
    text: String,
    choices: [String; CHOICE_COUNT],
    answer_index: usize,
    tags: Vec<String>,
}

impl ValidatedQuestion {
    #[must_use]
    pub fn assign_id(self, id: QuestionId) -> Question {
        Question {
            id,
            category: self.category,
            difficulty: self.difficulty,
            text: self.text,
            choices: self.choices,
            answer_index: self.answer_index,
            tags: self.tags,
        }
    }
}

/// One authored quiz item. Only reachable through draft validation, so
/// every `Question` satisfies the authoring invariants.
///
/// Serializes with the interchange document's field names (`answerIndex`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    id: QuestionId,
    category: String,
    difficulty: Difficulty,
    text: String,
    choices: [String; CHOICE_COUNT],
    answer_index: usize,
    tags: Vec<String>,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn choices(&self) -> &[String; CHOICE_COUNT] {
        &self.choices
    }

    /// Index of the correct answer within `choices`, always in range.
    #[must_use]
    pub fn answer_index(&self) -> usize {
        self.answer_index
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Case-insensitive keyword match against the prompt text or any choice.
    #[must_use]
    pub fn matches_keyword(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.text.to_lowercase().contains(&needle)
            || self
                .choices
                .iter()
                .any(|c| c.to_lowercase().contains(&needle))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
