use rand::Rng;
use rand::seq::SliceRandom;
use std::fmt;

use quiz_core::model::{CHOICE_COUNT, Question};

use super::plan::Session;
use super::progress::PlayProgress;
use crate::error::PlayError;

//
// ─── PRESENTATION TYPES ────────────────────────────────────────────────────────
//

/// One choice as currently displayed, remembering which slot of the
/// question's canonical `choices` array it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedChoice {
    text: String,
    original_index: usize,
}

impl DisplayedChoice {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn original_index(&self) -> usize {
        self.original_index
    }
}

/// Outcome of answering the current question, for the UI to highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub selected_position: usize,
    pub correct_position: usize,
    pub is_correct: bool,
}

/// Final score once the session is finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalTally {
    pub correct: usize,
    pub total: usize,
}

//
// ─── PLAY SESSION ──────────────────────────────────────────────────────────────
//

/// Walks a generated session one question at a time.
///
/// Owns the session outright, so play state can never refer to a stale
/// session: generating anew means constructing a new `PlaySession`.
///
/// Choice order is derived fresh from the canonical `choices` array each
/// time a question is presented. It is a uniform random permutation when
/// the session was generated with choice shuffling, the authored order
/// otherwise.
pub struct PlaySession {
    session: Session,
    index: usize,
    correct_count: usize,
    current_order: Vec<DisplayedChoice>,
    // Display position of each original choice index for the current question.
    display_of: [usize; CHOICE_COUNT],
    answered: bool,
}

impl PlaySession {
    /// Start playing a session. An empty session is immediately finished
    /// with a tally of 0 out of 0.
    #[must_use]
    pub fn new<R: Rng + ?Sized>(session: Session, rng: &mut R) -> Self {
        let mut play = Self {
            session,
            index: 0,
            correct_count: 0,
            current_order: Vec::new(),
            display_of: [0; CHOICE_COUNT],
            answered: false,
        };
        play.present_current(rng);
        play
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// 0-based cursor into the session.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.index >= self.session.len()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.session.questions().get(self.index)
    }

    /// Choices of the current question in display order. Empty once the
    /// session is finished.
    #[must_use]
    pub fn current_choices(&self) -> &[DisplayedChoice] {
        &self.current_order
    }

    #[must_use]
    pub fn progress(&self) -> PlayProgress {
        let answered = self.index + usize::from(self.answered);
        PlayProgress {
            total: self.session.len(),
            answered,
            correct: self.correct_count,
            remaining: self.session.len().saturating_sub(answered),
            is_finished: self.is_finished(),
        }
    }

    /// Final score, available only once every question was advanced past.
    #[must_use]
    pub fn tally(&self) -> Option<FinalTally> {
        self.is_finished().then(|| FinalTally {
            correct: self.correct_count,
            total: self.session.len(),
        })
    }

    /// Resolve the selected display position against the current question.
    ///
    /// Does not advance the cursor; call `advance` afterwards.
    ///
    /// # Errors
    ///
    /// `PlayError::Finished` past the last question,
    /// `PlayError::AlreadyAnswered` on a second submission,
    /// `PlayError::NoSelection` when no position is given,
    /// `PlayError::SelectionOutOfRange` for an invalid position.
    pub fn submit_answer(&mut self, selected: Option<usize>) -> Result<AnswerOutcome, PlayError> {
        let Some(question) = self.session.questions().get(self.index) else {
            return Err(PlayError::Finished);
        };
        if self.answered {
            return Err(PlayError::AlreadyAnswered);
        }
        let selected_position = selected.ok_or(PlayError::NoSelection)?;
        if selected_position >= self.current_order.len() {
            return Err(PlayError::SelectionOutOfRange(selected_position));
        }

        // answer_index is validated to be < CHOICE_COUNT.
        let correct_position = self.display_of[question.answer_index()];
        let is_correct = selected_position == correct_position;
        if is_correct {
            self.correct_count += 1;
        }
        self.answered = true;

        Ok(AnswerOutcome {
            selected_position,
            correct_position,
            is_correct,
        })
    }

    /// Move on to the next question, or finish after the last one.
    ///
    /// # Errors
    ///
    /// `PlayError::Finished` past the last question,
    /// `PlayError::AnswerPending` if the current question was not
    /// submitted yet. The cursor is unchanged on error.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<PlayProgress, PlayError> {
        if self.is_finished() {
            return Err(PlayError::Finished);
        }
        if !self.answered {
            return Err(PlayError::AnswerPending);
        }

        self.index += 1;
        self.answered = false;
        self.present_current(rng);
        Ok(self.progress())
    }

    fn present_current<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.current_order.clear();
        let shuffle = self.session.shuffle_choices();
        let Some(question) = self.session.questions().get(self.index) else {
            return;
        };

        let mut order: Vec<DisplayedChoice> = question
            .choices()
            .iter()
            .enumerate()
            .map(|(original_index, text)| DisplayedChoice {
                text: text.clone(),
                original_index,
            })
            .collect();
        if shuffle {
            order.shuffle(rng);
        }

        for (display, choice) in order.iter().enumerate() {
            self.display_of[choice.original_index] = display;
        }
        self.current_order = order;
    }
}

impl fmt::Debug for PlaySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaySession")
            .field("session_len", &self.session.len())
            .field("index", &self.index)
            .field("correct_count", &self.correct_count)
            .field("answered", &self.answered)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
