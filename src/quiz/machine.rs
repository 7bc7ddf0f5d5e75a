//! Quiz state machine.
//!
//! Phases run `Loading -> QuestionActive -> QuestionResolved -> (next
//! QuestionActive | ResultsShown | AllLevelsCleared)`. Every input arrives as
//! a method call from the host's event loop; calls that do not fit the current
//! phase are ignored so a stray click or late timer tick can never double-count.

use super::session::{Outcome, Phase, Session};
use super::{LOCKED_NOTICE, Level, Question, validate_levels};
use crate::{GameConfig, QuizError};

/// Rendering side of the game. The core calls these; the host decides how
/// they look.
pub trait Presenter {
    /// Show the question area and hide the results area (or the reverse).
    fn set_quiz_visible(&mut self, visible: bool);
    fn show_question(&mut self, text: &str, choices: &[String; 4]);
    fn show_remaining_time(&mut self, seconds: u32);
    fn mark_choice_correct(&mut self, index: usize);
    fn mark_choice_wrong(&mut self, index: usize);
    fn set_choices_enabled(&mut self, enabled: bool);
    fn set_advance_enabled(&mut self, enabled: bool);
    /// `current` is one-based.
    fn show_progress(&mut self, current: usize, total: usize);
    fn show_results(&mut self, score: usize, total: usize, outcome: Outcome);
    /// Called once per level. `just_unlocked` asks for a transient highlight;
    /// a later call with `false` must not cut that highlight short.
    fn render_level_unlock_state(&mut self, level: usize, locked: bool, just_unlocked: bool);
    fn show_notice(&mut self, message: &str);
}

/// Source of the one-second countdown tick.
///
/// The host must call [`Quiz::tick`] once per second while the returned handle
/// is alive. Dropping the handle cancels the tick.
pub trait Scheduler {
    type Handle;
    fn every_second(&mut self) -> Self::Handle;
}

/// Level-unlock celebration (the confetti burst in the browser).
pub trait Celebration {
    fn celebrate(&mut self);
}

pub struct Quiz<P: Presenter, S: Scheduler, C: Celebration> {
    levels: Vec<Level>,
    question_seconds: u32,
    session: Session,
    phase: Phase,
    countdown: Option<S::Handle>,
    presenter: P,
    scheduler: S,
    celebration: C,
}

impl<P: Presenter, S: Scheduler, C: Celebration> Quiz<P, S, C> {
    pub fn new(
        levels: Vec<Level>,
        config: &GameConfig,
        presenter: P,
        scheduler: S,
        celebration: C,
    ) -> Result<Self, QuizError> {
        validate_levels(&levels)?;
        config.validate()?;
        Ok(Self {
            levels,
            question_seconds: config.question_seconds,
            session: Session::new(config.question_seconds),
            phase: Phase::Loading,
            countdown: None,
            presenter,
            scheduler,
            celebration,
        })
    }

    /// Draw the level boxes and open the first level.
    pub fn start(&mut self) -> Result<(), QuizError> {
        self.render_levels(None);
        self.load_level(0)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn celebration(&self) -> &C {
        &self.celebration
    }

    /// Whether a countdown handle is currently held.
    pub fn countdown_running(&self) -> bool {
        self.countdown.is_some()
    }

    fn question_count(&self) -> usize {
        self.levels[self.session.level].len()
    }

    fn current(&self) -> &Question {
        &self.levels[self.session.level].questions[self.session.question]
    }

    /// Reset the attempt and show the level's first question.
    ///
    /// Refuses unknown and still-locked levels without touching the session.
    pub fn load_level(&mut self, level: usize) -> Result<(), QuizError> {
        if level >= self.levels.len() {
            return Err(QuizError::UnknownLevel { level });
        }
        if !self.session.is_unlocked(level) {
            return Err(QuizError::LevelLocked { level });
        }
        self.countdown = None;
        self.session.level = level;
        self.session.question = 0;
        self.session.score = 0;
        tracing::info!(level, name = %self.levels[level].name, "level loaded");

        self.presenter.set_quiz_visible(true);
        self.begin_question();
        Ok(())
    }

    fn begin_question(&mut self) {
        self.phase = Phase::QuestionActive;
        self.session.answered = false;

        let q = self.current().clone();
        self.presenter.show_question(&q.text, &q.choices);
        self.presenter
            .show_progress(self.session.question + 1, self.question_count());
        self.presenter.set_choices_enabled(true);
        self.presenter.set_advance_enabled(false);
        self.start_question_timer();
    }

    fn start_question_timer(&mut self) {
        self.session.time_remaining = self.question_seconds;
        self.presenter.show_remaining_time(self.session.time_remaining);
        // Replacing the handle drops (cancels) any previous tick.
        self.countdown = Some(self.scheduler.every_second());
    }

    /// One countdown second elapsed. At zero the question resolves as a miss.
    pub fn tick(&mut self) {
        if self.phase != Phase::QuestionActive {
            tracing::debug!(phase = ?self.phase, "stray countdown tick ignored");
            return;
        }
        self.session.time_remaining = self.session.time_remaining.saturating_sub(1);
        self.presenter.show_remaining_time(self.session.time_remaining);
        if self.session.time_remaining == 0 {
            self.countdown = None;
            tracing::debug!(question = self.session.question, "countdown expired");
            self.select_answer(None);
        }
    }

    /// Resolve the active question. `None` means time ran out.
    pub fn select_answer(&mut self, choice: Option<usize>) {
        if self.phase != Phase::QuestionActive {
            tracing::debug!(phase = ?self.phase, ?choice, "answer outside an active question ignored");
            return;
        }
        let correct = self.current().answer_index;
        if let Some(c) = choice {
            if c >= self.current().choices.len() {
                tracing::debug!(choice = c, "choice index out of range ignored");
                return;
            }
        }
        self.countdown = None;

        if choice == Some(correct) {
            self.session.score += 1;
        }
        self.presenter.mark_choice_correct(correct);
        if let Some(c) = choice.filter(|&c| c != correct) {
            self.presenter.mark_choice_wrong(c);
        }
        self.presenter.set_choices_enabled(false);
        self.presenter.set_advance_enabled(true);
        self.session.answered = true;
        self.phase = Phase::QuestionResolved;
    }

    pub fn choice_selected(&mut self, index: usize) {
        self.select_answer(Some(index));
    }

    /// Move to the next question, or to the results once the level is done.
    pub fn advance(&mut self) {
        if self.phase != Phase::QuestionResolved {
            tracing::debug!(phase = ?self.phase, "advance ignored");
            return;
        }
        if self.session.question + 1 < self.question_count() {
            self.session.question += 1;
            self.begin_question();
        } else {
            self.show_results();
        }
    }

    pub fn advance_clicked(&mut self) {
        self.advance();
    }

    fn show_results(&mut self) {
        let total = self.question_count();
        let perfect = self.session.score == total;
        let has_next = self.session.level + 1 < self.levels.len();
        let outcome = Outcome::from_attempt(perfect, has_next);
        tracing::info!(level = self.session.level, score = self.session.score, total, ?outcome, "level finished");

        self.presenter.set_quiz_visible(false);
        self.presenter.show_results(self.session.score, total, outcome);
        self.phase = match outcome {
            Outcome::AllCleared => Phase::AllLevelsCleared,
            other => Phase::ResultsShown(other),
        };
    }

    /// Unlock the following level, celebrate, and load it. Only valid from a
    /// `NextLevelAvailable` result.
    pub fn unlock_next_level(&mut self) -> Result<(), QuizError> {
        if self.phase != Phase::ResultsShown(Outcome::NextLevelAvailable) {
            tracing::debug!(phase = ?self.phase, "unlock ignored");
            return Ok(());
        }
        let next = self.session.level + 1;
        if self.session.unlocked.insert(next) {
            tracing::info!(level = next, "level unlocked");
        }
        self.celebration.celebrate();
        self.render_levels(Some(next));
        self.load_level(next)
    }

    pub fn next_level_clicked(&mut self) -> Result<(), QuizError> {
        self.unlock_next_level()
    }

    /// Replay the current level after an imperfect attempt.
    pub fn restart_clicked(&mut self) -> Result<(), QuizError> {
        if self.phase != Phase::ResultsShown(Outcome::Retry) {
            tracing::debug!(phase = ?self.phase, "restart ignored");
            return Ok(());
        }
        self.load_level(self.session.level)
    }

    /// Open a level from the level picker. Locked levels produce a notice.
    pub fn level_box_clicked(&mut self, level: usize) -> Result<(), QuizError> {
        let result = self.load_level(level);
        match &result {
            Err(QuizError::LevelLocked { .. }) => {
                tracing::warn!(level, "locked level requested");
                self.presenter.show_notice(LOCKED_NOTICE);
            }
            Err(err) => tracing::warn!(%err, "level box rejected"),
            Ok(()) => {}
        }
        result
    }

    fn render_levels(&mut self, just_unlocked: Option<usize>) {
        for level in 0..self.levels.len() {
            let locked = !self.session.is_unlocked(level);
            self.presenter
                .render_level_unlock_state(level, locked, just_unlocked == Some(level));
        }
    }
}
