use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::{
    Difficulty, Question, QuestionDraft, QuestionValidationError, ValidatedQuestion,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Errors emitted by bank mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("question {0} not found")]
    NotFound(QuestionId),

    #[error(transparent)]
    Validation(#[from] QuestionValidationError),
}

//
// ─── FILTER ────────────────────────────────────────────────────────────────────
//

/// Search criteria for `Bank::query`. Absent fields match everything;
/// present fields AND together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    /// Case-insensitive substring of the prompt text or any choice.
    pub keyword: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
    /// Exact difficulty match.
    pub difficulty: Option<Difficulty>,
}

impl QuestionFilter {
    #[must_use]
    pub fn matches(&self, question: &Question) -> bool {
        let keyword_ok = self
            .keyword
            .as_deref()
            .is_none_or(|kw| question.matches_keyword(kw));
        let category_ok = self
            .category
            .as_deref()
            .is_none_or(|cat| question.category() == cat);
        let difficulty_ok = self
            .difficulty
            .is_none_or(|diff| question.difficulty() == diff);

        keyword_ok && category_ok && difficulty_ok
    }
}

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

/// Ordered, id-unique collection of authored questions.
///
/// Every mutation goes through draft validation, so the bank never holds
/// a question that breaks the authoring rules. A failed add or update
/// leaves the bank untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bank {
    questions: Vec<Question>,
}

impl Bank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a bank from already-validated questions, assigning a fresh id
    /// to every entry. The import codec uses this so replacing the whole
    /// bank is a single swap and imported ids are never trusted.
    #[must_use]
    pub fn from_validated(questions: Vec<ValidatedQuestion>) -> Self {
        let mut bank = Self::new();
        for validated in questions {
            let id = bank.fresh_id();
            bank.questions.push(validated.assign_id(id));
        }
        bank
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Validate a draft and append it with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionValidationError` listing every broken rule.
    pub fn add(&mut self, draft: QuestionDraft) -> Result<&Question, QuestionValidationError> {
        let validated = draft.validate()?;
        let id = self.fresh_id();
        self.questions.push(validated.assign_id(id));
        // Just pushed, so the vec is non-empty.
        Ok(&self.questions[self.questions.len() - 1])
    }

    /// Validate a draft and replace the question with the given id in
    /// place, keeping its position and id.
    ///
    /// # Errors
    ///
    /// Returns `BankError::NotFound` if no question has that id, or the
    /// draft's validation error.
    pub fn update(&mut self, id: &QuestionId, draft: QuestionDraft) -> Result<&Question, BankError> {
        let index = self
            .position(id)
            .ok_or_else(|| BankError::NotFound(id.clone()))?;
        let validated = draft.validate()?;
        self.questions[index] = validated.assign_id(id.clone());
        Ok(&self.questions[index])
    }

    /// Remove and return the question with the given id.
    ///
    /// # Errors
    ///
    /// Returns `BankError::NotFound` if no question has that id.
    pub fn remove(&mut self, id: &QuestionId) -> Result<Question, BankError> {
        let index = self
            .position(id)
            .ok_or_else(|| BankError::NotFound(id.clone()))?;
        Ok(self.questions.remove(index))
    }

    #[must_use]
    pub fn find(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }

    /// Questions matching the filter, in bank order.
    #[must_use]
    pub fn query(&self, filter: &QuestionFilter) -> Vec<&Question> {
        self.questions.iter().filter(|q| filter.matches(q)).collect()
    }

    fn position(&self, id: &QuestionId) -> Option<usize> {
        self.questions.iter().position(|q| q.id() == id)
    }

    /// A random id not yet present in the bank. Uuid collisions are
    /// negligible, so the loop is expected to run exactly once.
    fn fresh_id(&self) -> QuestionId {
        loop {
            let id = QuestionId::random();
            if self.find(&id).is_none() {
                return id;
            }
        }
    }
}

//
// ─── STARTER CONTENT ───────────────────────────────────────────────────────────
//

impl Bank {
    /// A small starter bank so a first launch has something to play with.
    #[must_use]
    pub fn sample() -> Self {
        let drafts = [
            QuestionDraft {
                category: "general".to_string(),
                difficulty: Difficulty::Easy,
                text: "Which is closest to the height of Mount Fuji?".to_string(),
                choices: vec![
                    "3,776m".to_string(),
                    "2,776m".to_string(),
                    "4,176m".to_string(),
                    "3,176m".to_string(),
                ],
                answer_index: 0,
                tags: vec!["geography".to_string()],
            },
            QuestionDraft {
                category: "general".to_string(),
                difficulty: Difficulty::Normal,
                text: "What is the chemical formula of water?".to_string(),
                choices: vec![
                    "H2O".to_string(),
                    "CO2".to_string(),
                    "O2".to_string(),
                    "NaCl".to_string(),
                ],
                answer_index: 0,
                tags: vec!["science".to_string()],
            },
            QuestionDraft {
                category: "it".to_string(),
                difficulty: Difficulty::Normal,
                text: "Which tag marks a top-level heading in HTML?".to_string(),
                choices: vec![
                    "<h1>".to_string(),
                    "<div>".to_string(),
                    "<p>".to_string(),
                    "<span>".to_string(),
                ],
                answer_index: 0,
                tags: vec!["it".to_string()],
            },
        ];

        let mut bank = Self::new();
        for draft in drafts {
            // The starter drafts are statically valid.
            if let Ok(validated) = draft.validate() {
                let id = bank.fresh_id();
                bank.questions.push(validated.assign_id(id));
            }
        }
        bank
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
