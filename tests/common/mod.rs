// Recording fakes shared by the integration tests. They capture every call the
// quiz makes so tests can assert on presentation effects without a browser.
#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use level_quiz::quiz::{Celebration, Presenter, Scheduler};
use level_quiz::{GameConfig, Level, Outcome, Question, Quiz};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    QuizVisible(bool),
    Question(String),
    Time(u32),
    Correct(usize),
    Wrong(usize),
    ChoicesEnabled(bool),
    AdvanceEnabled(bool),
    Progress(usize, usize),
    Results(usize, usize, Outcome),
    LevelState { level: usize, locked: bool, just_unlocked: bool },
    Notice(String),
}

#[derive(Default)]
pub struct RecordingPresenter {
    pub calls: Vec<Call>,
}

impl RecordingPresenter {
    pub fn take(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl Presenter for RecordingPresenter {
    fn set_quiz_visible(&mut self, visible: bool) {
        self.calls.push(Call::QuizVisible(visible));
    }
    fn show_question(&mut self, text: &str, _choices: &[String; 4]) {
        self.calls.push(Call::Question(text.to_owned()));
    }
    fn show_remaining_time(&mut self, seconds: u32) {
        self.calls.push(Call::Time(seconds));
    }
    fn mark_choice_correct(&mut self, index: usize) {
        self.calls.push(Call::Correct(index));
    }
    fn mark_choice_wrong(&mut self, index: usize) {
        self.calls.push(Call::Wrong(index));
    }
    fn set_choices_enabled(&mut self, enabled: bool) {
        self.calls.push(Call::ChoicesEnabled(enabled));
    }
    fn set_advance_enabled(&mut self, enabled: bool) {
        self.calls.push(Call::AdvanceEnabled(enabled));
    }
    fn show_progress(&mut self, current: usize, total: usize) {
        self.calls.push(Call::Progress(current, total));
    }
    fn show_results(&mut self, score: usize, total: usize, outcome: Outcome) {
        self.calls.push(Call::Results(score, total, outcome));
    }
    fn render_level_unlock_state(&mut self, level: usize, locked: bool, just_unlocked: bool) {
        self.calls.push(Call::LevelState { level, locked, just_unlocked });
    }
    fn show_notice(&mut self, message: &str) {
        self.calls.push(Call::Notice(message.to_owned()));
    }
}

/// Hands out countdown handles and tracks how many are alive.
#[derive(Default)]
pub struct ManualScheduler {
    pub live: Rc<Cell<usize>>,
}

pub struct TickHandle(Rc<Cell<usize>>);

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

impl Scheduler for ManualScheduler {
    type Handle = TickHandle;
    fn every_second(&mut self) -> TickHandle {
        self.live.set(self.live.get() + 1);
        TickHandle(self.live.clone())
    }
}

#[derive(Default)]
pub struct CountingCelebration {
    pub bursts: usize,
}

impl Celebration for CountingCelebration {
    fn celebrate(&mut self) {
        self.bursts += 1;
    }
}

pub type TestQuiz = Quiz<RecordingPresenter, ManualScheduler, CountingCelebration>;

/// Two questions per level with answers 1 and 2, like the shipped first level.
pub fn two_question_levels(count: usize) -> Vec<Level> {
    (0..count)
        .map(|i| {
            Level::new(
                &format!("Level {}", i + 1),
                vec![
                    Question::new("first", ["a", "b", "c", "d"], 1),
                    Question::new("second", ["a", "b", "c", "d"], 2),
                ],
            )
        })
        .collect()
}

pub fn started(levels: Vec<Level>) -> (TestQuiz, Rc<Cell<usize>>) {
    let scheduler = ManualScheduler::default();
    let live = scheduler.live.clone();
    let mut quiz = Quiz::new(
        levels,
        &GameConfig::default(),
        RecordingPresenter::default(),
        scheduler,
        CountingCelebration::default(),
    )
    .expect("valid levels");
    quiz.start().expect("level 0 is unlocked");
    (quiz, live)
}

pub fn time_out(quiz: &mut TestQuiz) {
    for _ in 0..10 {
        quiz.tick();
    }
}
