use gloo::timers::callback::Interval;

use crate::quiz::Scheduler;

/// Countdown backed by `setInterval`; dropping the [`Interval`] clears it.
pub struct IntervalScheduler;

impl Scheduler for IntervalScheduler {
    type Handle = Interval;

    fn every_second(&mut self) -> Interval {
        Interval::new(1_000, || super::with_game(|quiz| quiz.tick()))
    }
}
