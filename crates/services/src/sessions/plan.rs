use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Bank, Difficulty, Question};

/// User-facing knobs for building a session. Empty category or
/// difficulty lists mean "no filter".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub categories: Vec<String>,
    pub difficulties: Vec<Difficulty>,
    pub count: usize,
    pub shuffle_choices: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            difficulties: Vec::new(),
            count: 5,
            shuffle_choices: false,
        }
    }
}

impl SessionConfig {
    fn matches(&self, question: &Question) -> bool {
        let category_ok = self.categories.is_empty()
            || self.categories.iter().any(|c| c == question.category());
        let difficulty_ok =
            self.difficulties.is_empty() || self.difficulties.contains(&question.difficulty());
        category_ok && difficulty_ok
    }
}

/// An immutable ordered set of question copies drawn from the bank for
/// one play-through. Later bank edits never affect an existing session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    questions: Vec<Question>,
    shuffle_choices: bool,
}

impl Session {
    /// Draw a session from the bank.
    ///
    /// Filters by category AND difficulty, then shuffles the whole pool
    /// once and takes the first `count` entries. The single shuffle makes
    /// every subset equally likely and every ordering within it equally
    /// likely. A pool smaller than `count` yields the whole pool; an
    /// empty pool yields an empty session, which is not an error.
    #[must_use]
    pub fn generate<R: Rng + ?Sized>(bank: &Bank, config: &SessionConfig, rng: &mut R) -> Self {
        let mut pool: Vec<&Question> = bank
            .questions()
            .iter()
            .filter(|q| config.matches(q))
            .collect();
        pool.shuffle(rng);

        let take = config.count.min(pool.len());
        let questions = pool.into_iter().take(take).cloned().collect();

        Self {
            questions,
            shuffle_choices: config.shuffle_choices,
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Whether choices should be presented in a shuffled order.
    #[must_use]
    pub fn shuffle_choices(&self) -> bool {
        self.shuffle_choices
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn draft(category: &str, difficulty: Difficulty, text: &str) -> QuestionDraft {
        QuestionDraft {
            category: category.to_string(),
            difficulty,
            text: text.to_string(),
            choices: vec![
                format!("{text} A"),
                format!("{text} B"),
                format!("{text} C"),
                format!("{text} D"),
            ],
            answer_index: 0,
            tags: Vec::new(),
        }
    }

    fn build_bank() -> Bank {
        let mut bank = Bank::new();
        for i in 0..6 {
            bank.add(draft("history", Difficulty::Easy, &format!("h{i}")))
                .unwrap();
        }
        for i in 0..4 {
            bank.add(draft("science", Difficulty::Hard, &format!("s{i}")))
                .unwrap();
        }
        bank
    }

    #[test]
    fn generate_respects_count_and_pool_size() {
        let bank = build_bank();
        let mut rng = StdRng::seed_from_u64(1);

        let config = SessionConfig {
            count: 3,
            ..SessionConfig::default()
        };
        assert_eq!(Session::generate(&bank, &config, &mut rng).len(), 3);

        let config = SessionConfig {
            count: 100,
            ..SessionConfig::default()
        };
        assert_eq!(Session::generate(&bank, &config, &mut rng).len(), bank.len());
    }

    #[test]
    fn generate_honors_category_and_difficulty_filters() {
        let bank = build_bank();
        let mut rng = StdRng::seed_from_u64(2);

        let config = SessionConfig {
            categories: vec!["science".to_string()],
            difficulties: vec![Difficulty::Hard],
            count: 100,
            shuffle_choices: false,
        };
        let session = Session::generate(&bank, &config, &mut rng);

        assert_eq!(session.len(), 4);
        assert!(session.questions().iter().all(|q| {
            q.category() == "science" && q.difficulty() == Difficulty::Hard
        }));
    }

    #[test]
    fn generate_samples_without_replacement() {
        let bank = build_bank();
        let mut rng = StdRng::seed_from_u64(3);

        let config = SessionConfig {
            count: 10,
            ..SessionConfig::default()
        };
        let session = Session::generate(&bank, &config, &mut rng);

        let ids: HashSet<_> = session.questions().iter().map(|q| q.id().clone()).collect();
        assert_eq!(ids.len(), session.len());
    }

    #[test]
    fn empty_pool_yields_empty_session() {
        let bank = build_bank();
        let mut rng = StdRng::seed_from_u64(4);

        let config = SessionConfig {
            categories: vec!["geography".to_string()],
            count: 5,
            ..SessionConfig::default()
        };
        let session = Session::generate(&bank, &config, &mut rng);
        assert!(session.is_empty());
    }

    #[test]
    fn generate_is_deterministic_under_a_seeded_rng() {
        let bank = build_bank();
        let config = SessionConfig {
            count: 5,
            ..SessionConfig::default()
        };

        let a = Session::generate(&bank, &config, &mut StdRng::seed_from_u64(7));
        let b = Session::generate(&bank, &config, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn session_copies_survive_bank_edits() {
        let mut bank = build_bank();
        let mut rng = StdRng::seed_from_u64(5);
        let config = SessionConfig {
            count: bank.len(),
            ..SessionConfig::default()
        };
        let session = Session::generate(&bank, &config, &mut rng);

        let id = session.questions()[0].id().clone();
        let original_text = session.questions()[0].text().to_string();
        bank.update(&id, draft("history", Difficulty::Easy, "rewritten"))
            .unwrap();

        assert_eq!(session.questions()[0].text(), original_text);
    }
}
