//! Quiz content and progression.
//!
//! Levels are ordered lists of four-choice questions. The built-in content is
//! compiled in (one file per level, see `level1.rs` ...); hosts can also supply
//! their own list, which goes through [`validate_levels`] before use.
//!
//! The [`Quiz`] state machine owns the [`Session`] and drives a [`Presenter`]
//! plus a countdown [`Scheduler`]; it never touches the DOM itself.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::QuizError;

mod machine;
mod session;

mod level1;
mod level2;
mod level3;

pub use machine::{Celebration, Presenter, Quiz, Scheduler};
pub use session::{Outcome, Phase, Session};

/// Number of choices every question carries.
pub const CHOICES_PER_QUESTION: usize = 4;

/// Notice shown when a locked level box is clicked.
pub const LOCKED_NOTICE: &str = "🔒 This level is locked!";

/// One multiple-choice prompt. JSON field names follow the level files the
/// game was first authored with (`question`, `choices`, `answerIndex`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Question {
    #[cfg_attr(feature = "serde", serde(rename = "question"))]
    pub text: String,
    pub choices: [String; CHOICES_PER_QUESTION],
    #[cfg_attr(feature = "serde", serde(rename = "answerIndex"))]
    pub answer_index: usize,
}

impl Question {
    pub fn new(text: &str, choices: [&str; CHOICES_PER_QUESTION], answer_index: usize) -> Self {
        Self {
            text: text.to_owned(),
            choices: choices.map(str::to_owned),
            answer_index,
        }
    }
}

/// Static level descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    pub name: String,
    pub questions: Vec<Question>,
}

impl Level {
    pub fn new(name: &str, questions: Vec<Question>) -> Self {
        Self {
            name: name.to_owned(),
            questions,
        }
    }

    /// Build a level from a compiled-in `(text, choices, answer)` table.
    fn from_table(name: &str, table: &[(&str, [&str; CHOICES_PER_QUESTION], usize)]) -> Self {
        let questions = table
            .iter()
            .map(|&(text, choices, answer)| Question::new(text, choices, answer))
            .collect();
        Self::new(name, questions)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// The levels shipped with the game, in play order.
pub fn builtin_levels() -> Vec<Level> {
    vec![level1::level1(), level2::level2(), level3::level3()]
}

/// Reject content the state machine cannot play: no levels at all, a level
/// without questions, or an answer index outside the choices.
pub fn validate_levels(levels: &[Level]) -> Result<(), QuizError> {
    if levels.is_empty() {
        return Err(QuizError::UnknownLevel { level: 0 });
    }
    for (li, level) in levels.iter().enumerate() {
        if level.is_empty() {
            return Err(QuizError::EmptyLevel { level: li });
        }
        for (qi, q) in level.questions.iter().enumerate() {
            if q.answer_index >= CHOICES_PER_QUESTION {
                return Err(QuizError::InvalidQuestion {
                    level: li,
                    question: qi,
                    reason: format!("answer index {} out of range", q.answer_index),
                });
            }
        }
    }
    Ok(())
}

/// Parse level content: a JSON array of levels, each an array of question
/// objects. Levels are named "Level 1", "Level 2", ... in order.
#[cfg(feature = "serde_json")]
pub fn levels_from_json(json: &str) -> Result<Vec<Level>, QuizError> {
    let raw: Vec<Vec<Question>> = serde_json::from_str(json)?;
    let levels: Vec<Level> = raw
        .into_iter()
        .enumerate()
        .map(|(i, questions)| Level::new(&format!("Level {}", i + 1), questions))
        .collect();
    validate_levels(&levels)?;
    Ok(levels)
}
