//! Browser host for the quiz: DOM presenter, one-second countdown and the
//! confetti canvas. Input listeners reach the game through [`with_game`].

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::{GameConfig, Level, Quiz, QuizError};

mod canvas;
mod dom;
mod timer;

use canvas::CanvasConfetti;
use dom::DomPresenter;
use timer::IntervalScheduler;

type WebQuiz = Quiz<DomPresenter, IntervalScheduler, CanvasConfetti>;

thread_local! {
    static GAME: RefCell<Option<WebQuiz>> = const { RefCell::new(None) };
}

pub(crate) fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, Layer};
    use tracing_web::MakeWebConsoleWriter;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(EnvFilter::new("info"));
    // A second start (e.g. hot reload) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
}

pub(crate) fn to_js(err: QuizError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

pub(crate) fn start(config: GameConfig, levels: Vec<Level>) -> Result<(), JsValue> {
    if GAME.with(|g| g.borrow().is_some()) {
        tracing::info!("quiz already mounted; start ignored");
        return Ok(());
    }
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let presenter = DomPresenter::mount(&doc, levels.len(), &config)?;
    let confetti = CanvasConfetti::mount(&win, &doc, config.confetti.clone())?;
    let mut quiz = Quiz::new(levels, &config, presenter, IntervalScheduler, confetti).map_err(to_js)?;
    quiz.start().map_err(to_js)?;

    GAME.with(|g| g.replace(Some(quiz)));
    Ok(())
}

/// Run `f` against the mounted game. Input that arrives while the game is
/// already borrowed (nested dispatch) is dropped.
pub(crate) fn with_game(f: impl FnOnce(&mut WebQuiz)) {
    GAME.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => {
            if let Some(quiz) = slot.as_mut() {
                f(quiz);
            }
        }
        Err(_) => tracing::warn!("quiz busy; input dropped"),
    });
}
