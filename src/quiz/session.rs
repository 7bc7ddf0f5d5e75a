use std::collections::BTreeSet;

/// How a finished level attempt is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Perfect score on the final level.
    AllCleared,
    /// Perfect score and another level follows.
    NextLevelAvailable,
    /// At least one miss; the level can be replayed.
    Retry,
}

impl Outcome {
    pub fn from_attempt(perfect: bool, has_next_level: bool) -> Self {
        match (perfect, has_next_level) {
            (true, false) => Outcome::AllCleared,
            (true, true) => Outcome::NextLevelAvailable,
            (false, _) => Outcome::Retry,
        }
    }
}

/// Where the quiz is in its level -> question -> answer -> result loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Created, no level loaded yet.
    Loading,
    /// Question on screen, countdown running.
    QuestionActive,
    /// Answer (or timeout) recorded; waiting for the advance control.
    QuestionResolved,
    /// Level finished with a `NextLevelAvailable` or `Retry` outcome.
    ResultsShown(Outcome),
    /// Final level finished with a perfect score.
    AllLevelsCleared,
}

/// Mutable progress for the current play-through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub(super) level: usize,
    pub(super) question: usize,
    pub(super) score: usize,
    pub(super) unlocked: BTreeSet<usize>,
    pub(super) time_remaining: u32,
    pub(super) answered: bool,
}

impl Session {
    pub(super) fn new(question_seconds: u32) -> Self {
        Self {
            level: 0,
            question: 0,
            score: 0,
            unlocked: BTreeSet::from([0]),
            time_remaining: question_seconds,
            answered: false,
        }
    }

    pub fn current_level(&self) -> usize {
        self.level
    }

    pub fn current_question(&self) -> usize {
        self.question
    }

    /// Correct answers in the current level attempt.
    pub fn score(&self) -> usize {
        self.score
    }

    pub fn unlocked_levels(&self) -> &BTreeSet<usize> {
        &self.unlocked
    }

    pub fn is_unlocked(&self, level: usize) -> bool {
        self.unlocked.contains(&level)
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn answered(&self) -> bool {
        self.answered
    }
}
