//! Import/export of the question bank as a JSON interchange document.
//!
//! The document shape is `{ "bank": [question...], "settings": {...} }`.
//! Export is a plain serde serialization. Import is deliberately lenient:
//! each bank entry is first coerced field by field into a well-typed
//! draft, then run through the same validator authored input uses. Any
//! validation failure aborts the whole import.

use serde::Serialize;
use serde_json::Value;

use quiz_core::model::{
    Bank, CHOICE_COUNT, Difficulty, Question, QuestionDraft, Settings, ValidatedQuestion,
};

use crate::error::{ImportError, InvalidEntry};

#[derive(Serialize)]
struct ExportDocument<'a> {
    bank: &'a [Question],
    settings: &'a Settings,
}

/// Serialize the bank and settings as a pretty-printed JSON document.
///
/// # Errors
///
/// Propagates the underlying serializer error.
pub fn serialize(bank: &Bank, settings: &Settings) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&ExportDocument {
        bank: bank.questions(),
        settings,
    })
}

/// A successfully imported document: a fresh-id bank plus settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedState {
    pub bank: Bank,
    pub settings: Settings,
}

/// Parse an interchange document into a new bank and settings.
///
/// All-or-nothing: the returned bank replaces the caller's existing one
/// in a single swap, and every question gets a freshly generated id
/// regardless of what the document claimed.
///
/// # Errors
///
/// `ImportError::Parse` for malformed JSON, `ImportError::BankMissing`
/// when `bank` is absent or not an array, and
/// `ImportError::InvalidQuestions` listing every entry that failed
/// validation after coercion.
pub fn deserialize(text: &str) -> Result<ImportedState, ImportError> {
    let document: Value = serde_json::from_str(text)?;

    let Some(entries) = document.get("bank").and_then(Value::as_array) else {
        return Err(ImportError::BankMissing);
    };

    let mut validated: Vec<ValidatedQuestion> = Vec::with_capacity(entries.len());
    let mut rejected: Vec<InvalidEntry> = Vec::new();
    for (index, raw) in entries.iter().enumerate() {
        match coerce_question(raw).validate() {
            Ok(question) => validated.push(question),
            Err(error) => rejected.push(InvalidEntry { index, error }),
        }
    }
    if !rejected.is_empty() {
        return Err(ImportError::InvalidQuestions { entries: rejected });
    }

    let settings = document
        .get("settings")
        .map(coerce_settings)
        .unwrap_or_default();

    Ok(ImportedState {
        bank: Bank::from_validated(validated),
        settings,
    })
}

//
// ─── COERCION ──────────────────────────────────────────────────────────────────
//

/// Best-effort conversion of a loosely-typed document entry into a draft.
/// Never fails; the validator decides afterwards.
fn coerce_question(raw: &Value) -> QuestionDraft {
    let choices = match raw.get("choices").and_then(Value::as_array) {
        Some(values) => (0..CHOICE_COUNT)
            .map(|i| values.get(i).map(coerce_string).unwrap_or_default())
            .collect(),
        None => vec![String::new(); CHOICE_COUNT],
    };

    let difficulty = raw
        .get("difficulty")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<Difficulty>().ok())
        .unwrap_or_default();

    let answer_index = raw
        .get("answerIndex")
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .filter(|n| *n < CHOICE_COUNT)
        .unwrap_or(0);

    let tags = match raw.get("tags").and_then(Value::as_array) {
        Some(values) => values.iter().map(coerce_string).collect(),
        None => Vec::new(),
    };

    // Ids in the document are ignored; the bank reissues them on import.
    QuestionDraft {
        category: raw.get("category").map(coerce_string).unwrap_or_default(),
        difficulty,
        text: raw.get("text").map(coerce_string).unwrap_or_default(),
        choices,
        answer_index,
        tags,
    }
}

fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn coerce_settings(raw: &Value) -> Settings {
    serde_json::from_value(raw.clone()).unwrap_or_default()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::Theme;

    fn sample_bank() -> Bank {
        Bank::sample()
    }

    #[test]
    fn export_import_round_trip_preserves_content() {
        let bank = sample_bank();
        let settings = Settings { theme: Theme::Dark };

        let text = serialize(&bank, &settings).unwrap();
        let imported = deserialize(&text).unwrap();

        assert_eq!(imported.settings.theme, Theme::Dark);
        assert_eq!(imported.bank.len(), bank.len());
        for (original, round_tripped) in bank.questions().iter().zip(imported.bank.questions()) {
            // Ids are reissued on import; content must match.
            assert_ne!(original.id(), round_tripped.id());
            assert_eq!(original.category(), round_tripped.category());
            assert_eq!(original.difficulty(), round_tripped.difficulty());
            assert_eq!(original.text(), round_tripped.text());
            assert_eq!(original.choices(), round_tripped.choices());
            assert_eq!(original.answer_index(), round_tripped.answer_index());
            assert_eq!(original.tags(), round_tripped.tags());
        }
    }

    #[test]
    fn missing_bank_field_is_rejected() {
        let err = deserialize(r#"{ "settings": { "theme": "dark" } }"#).unwrap_err();
        assert!(matches!(err, ImportError::BankMissing));
    }

    #[test]
    fn non_array_bank_is_rejected() {
        let err = deserialize(r#"{ "bank": "nope" }"#).unwrap_err();
        assert!(matches!(err, ImportError::BankMissing));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = deserialize("{ not json").unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)));
    }

    #[test]
    fn coercion_repairs_loose_types_before_validation() {
        let text = r#"{
            "bank": [{
                "id": 42,
                "category": 7,
                "difficulty": "impossible",
                "text": "Pick one",
                "choices": ["a", "b", "c", "d", "extra"],
                "answerIndex": 99,
                "tags": "not-an-array"
            }]
        }"#;

        let imported = deserialize(text).unwrap();
        let question = &imported.bank.questions()[0];

        assert_eq!(question.category(), "7");
        assert_eq!(question.difficulty(), Difficulty::Normal);
        assert_eq!(question.choices().len(), CHOICE_COUNT);
        assert_eq!(question.answer_index(), 0);
        assert!(question.tags().is_empty());
    }

    #[test]
    fn one_invalid_entry_aborts_the_whole_import() {
        let text = r#"{
            "bank": [
                {
                    "category": "ok",
                    "difficulty": "easy",
                    "text": "Valid?",
                    "choices": ["a", "b", "c", "d"],
                    "answerIndex": 0,
                    "tags": []
                },
                {
                    "category": "",
                    "difficulty": "easy",
                    "text": "Broken",
                    "choices": ["a", "b", "c", "d"],
                    "answerIndex": 0,
                    "tags": []
                }
            ]
        }"#;

        let err = deserialize(text).unwrap_err();
        match err {
            ImportError::InvalidQuestions { entries } => {
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].index, 1);
            }
            other => panic!("expected InvalidQuestions, got {other:?}"),
        }
    }

    #[test]
    fn missing_choices_become_empty_and_fail_validation() {
        let text = r#"{
            "bank": [{
                "category": "c",
                "difficulty": "easy",
                "text": "t",
                "choices": "nope",
                "answerIndex": 0
            }]
        }"#;

        let err = deserialize(text).unwrap_err();
        assert!(matches!(err, ImportError::InvalidQuestions { .. }));
    }

    #[test]
    fn settings_fall_back_to_defaults() {
        let imported = deserialize(r#"{ "bank": [] }"#).unwrap();
        assert_eq!(imported.settings, Settings::default());

        let imported = deserialize(r#"{ "bank": [], "settings": { "theme": "sepia" } }"#).unwrap();
        assert_eq!(imported.settings.theme, Theme::Auto);

        let imported = deserialize(r#"{ "bank": [], "settings": 5 }"#).unwrap();
        assert_eq!(imported.settings, Settings::default());
    }
}
