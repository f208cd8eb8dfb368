use quiz_core::model::{Bank, Difficulty, QuestionDraft, Settings, Theme};
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{PlaySession, Session, SessionConfig, deserialize, serialize};

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
        answer_index: 2,
        tags: vec!["smoke".to_string()],
    }
}

#[test]
fn author_generate_play_export_import_flow() {
    let mut rng = StdRng::seed_from_u64(42);

    // Author a bank.
    let mut bank = Bank::new();
    for i in 0..5 {
        bank.add(draft("rust", Difficulty::Normal, &format!("q{i}")))
            .unwrap();
    }
    bank.add(draft("history", Difficulty::Hard, "outlier"))
        .unwrap();

    // Generate a session over the rust questions only.
    let config = SessionConfig {
        categories: vec!["rust".to_string()],
        difficulties: vec![Difficulty::Normal],
        count: 3,
        shuffle_choices: true,
    };
    let session = Session::generate(&bank, &config, &mut rng);
    assert_eq!(session.len(), 3);
    assert!(session.questions().iter().all(|q| q.category() == "rust"));

    // Play it to completion, always picking the correct display position.
    let mut play = PlaySession::new(session, &mut rng);
    while !play.is_finished() {
        let answer_index = play.current_question().unwrap().answer_index();
        let position = play
            .current_choices()
            .iter()
            .position(|c| c.original_index() == answer_index)
            .unwrap();
        let outcome = play.submit_answer(Some(position)).unwrap();
        assert!(outcome.is_correct);
        play.advance(&mut rng).unwrap();
    }

    let tally = play.tally().unwrap();
    assert_eq!(tally.correct, 3);
    assert_eq!(tally.total, 3);

    // Round-trip the bank through the interchange document.
    let settings = Settings { theme: Theme::Light };
    let text = serialize(&bank, &settings).unwrap();
    let imported = deserialize(&text).unwrap();

    assert_eq!(imported.settings.theme, Theme::Light);
    assert_eq!(imported.bank.len(), bank.len());
    for (original, round_tripped) in bank.questions().iter().zip(imported.bank.questions()) {
        assert_eq!(original.text(), round_tripped.text());
        assert_eq!(original.choices(), round_tripped.choices());
        assert_ne!(original.id(), round_tripped.id());
    }
}
