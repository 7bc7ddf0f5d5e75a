// Integration tests for the built-in level content.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

use level_quiz::builtin_levels;
use level_quiz::quiz::{CHOICES_PER_QUESTION, validate_levels};

#[test]
fn builtin_levels_pass_validation() {
    let levels = builtin_levels();
    assert!(levels.len() > 1, "unlock flow needs at least two levels");
    assert_eq!(validate_levels(&levels), Ok(()));
}

#[test]
fn answers_point_at_distinct_choices() {
    for (li, level) in builtin_levels().iter().enumerate() {
        for q in &level.questions {
            assert!(q.answer_index < CHOICES_PER_QUESTION);
            let unique: HashSet<&str> = q.choices.iter().map(String::as_str).collect();
            assert_eq!(unique.len(), CHOICES_PER_QUESTION, "duplicate choice in level {li}: '{}'", q.text);
            assert!(!q.text.is_empty(), "empty question text in level {li}");
        }
    }
}

#[test]
fn question_texts_are_unique() {
    let mut seen = HashSet::new();
    for level in builtin_levels() {
        for q in level.questions {
            assert!(seen.insert(q.text.clone()), "duplicate question '{}'", q.text);
        }
    }
}

#[test]
fn first_level_matches_the_documented_answers() {
    let levels = builtin_levels();
    let answers: Vec<usize> = levels[0].questions.iter().map(|q| q.answer_index).collect();
    assert_eq!(answers, vec![1, 2]);
}
