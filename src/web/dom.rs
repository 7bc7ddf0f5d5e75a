//! DOM rendering for the quiz. Elements are looked up by id and created when
//! the host page does not provide them.

use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, MouseEvent, window};

use super::with_game;
use crate::GameConfig;
use crate::quiz::{Outcome, Presenter};

type ClickHandler = Closure<dyn FnMut(MouseEvent)>;

const STYLE: &str = "\
#lq-root { font-family: system-ui, sans-serif; max-width: 520px; margin: 40px auto; text-align: center; }
#lq-levels { display: flex; gap: 8px; justify-content: center; margin-bottom: 16px; }
.level-box { padding: 8px 12px; border-radius: 6px; background: #2d6a4f; color: #fff; cursor: pointer; transition: transform 0.3s; }
.level-box.locked { background: #6b6b6b; cursor: not-allowed; }
.level-box.unlocked { transform: scale(1.15); box-shadow: 0 0 12px #ffd166; }
.choice-btn { display: block; width: 100%; margin: 6px 0; padding: 10px; font-size: 16px; border-radius: 6px; border: 1px solid #333; cursor: pointer; }
.choice-btn.correct { background: #52b788; color: #fff; }
.choice-btn.wrong { background: #e63946; color: #fff; }
";

pub struct DomPresenter {
    doc: Document,
    question: HtmlElement,
    choices: HtmlElement,
    progress: HtmlElement,
    timer: HtmlElement,
    next_btn: HtmlButtonElement,
    result: HtmlElement,
    level_boxes: Vec<HtmlElement>,
    choice_buttons: Vec<HtmlButtonElement>,
    // Kept alive while their buttons are on screen; replaced on re-render.
    choice_handlers: Vec<ClickHandler>,
    result_handler: Option<ClickHandler>,
    unlock_flash_ms: u32,
    farewell_link: Option<String>,
}

impl DomPresenter {
    pub fn mount(doc: &Document, level_count: usize, config: &GameConfig) -> Result<Self, JsValue> {
        let body: Element = doc
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .into();

        if doc.get_element_by_id("lq-style").is_none() {
            let style = doc.create_element("style")?;
            style.set_id("lq-style");
            style.set_text_content(Some(STYLE));
            body.append_child(&style)?;
        }

        let root = ensure(doc, &body, "div", "lq-root")?;
        let levels = ensure(doc, &root, "div", "lq-levels")?;
        let mut level_boxes = Vec::with_capacity(level_count);
        for level in 0..level_count {
            let id = format!("lq-level-{level}");
            let fresh = doc.get_element_by_id(&id).is_none();
            let el = ensure(doc, &levels, "div", &id)?;
            if fresh {
                el.set_class_name("level-box");
            }
            on_click(&el, move || {
                with_game(|quiz| {
                    let _ = quiz.level_box_clicked(level);
                })
            })?
            .forget();
            level_boxes.push(el);
        }

        let question = ensure(doc, &root, "h2", "lq-question")?;
        let choices = ensure(doc, &root, "div", "lq-choices")?;
        let progress = ensure(doc, &root, "div", "lq-progress")?;
        let timer = ensure(doc, &root, "div", "lq-timer")?;
        let next_btn: HtmlButtonElement = ensure(doc, &root, "button", "lq-next")?.dyn_into()?;
        if next_btn.text_content().unwrap_or_default().is_empty() {
            next_btn.set_text_content(Some("Next"));
        }
        on_click(&next_btn, || with_game(|quiz| quiz.advance_clicked()))?.forget();
        let result = ensure(doc, &root, "div", "lq-result")?;
        set_display(&result, false);

        Ok(Self {
            doc: doc.clone(),
            question,
            choices,
            progress,
            timer,
            next_btn,
            result,
            level_boxes,
            choice_buttons: Vec::new(),
            choice_handlers: Vec::new(),
            result_handler: None,
            unlock_flash_ms: config.unlock_flash_ms,
            farewell_link: config.farewell_link.clone(),
        })
    }

    fn try_show_question(&mut self, text: &str, choices: &[String; 4]) -> Result<(), JsValue> {
        self.question.set_text_content(Some(text));
        self.choices.set_inner_html("");
        self.choice_buttons.clear();
        self.choice_handlers.clear();
        for (i, choice) in choices.iter().enumerate() {
            let btn: HtmlButtonElement = self.doc.create_element("button")?.dyn_into()?;
            btn.set_class_name("choice-btn");
            btn.set_text_content(Some(choice));
            let handler = on_click(&btn, move || with_game(|quiz| quiz.choice_selected(i)))?;
            self.choices.append_child(&btn)?;
            self.choice_buttons.push(btn);
            self.choice_handlers.push(handler);
        }
        Ok(())
    }

    fn try_show_results(&mut self, score: usize, total: usize, outcome: Outcome) -> Result<(), JsValue> {
        self.result
            .set_inner_html(&format!("<h2>You scored {score} / {total}</h2>"));
        self.result_handler = None;
        match outcome {
            Outcome::AllCleared => {
                let msg = self.doc.create_element("h3")?;
                msg.set_text_content(Some(
                    "🎉 Congratulations! You cleared all levels. Thank you for playing!",
                ));
                self.result.append_child(&msg)?;
                if let Some(href) = &self.farewell_link {
                    let a = self.doc.create_element("a")?;
                    a.set_attribute("href", href)?;
                    a.set_attribute("target", "_blank")?;
                    a.set_text_content(Some("Go back to the website"));
                    self.result.append_child(&a)?;
                }
            }
            Outcome::NextLevelAvailable => {
                let btn = self.result_button("lq-next-level", "Next Level")?;
                self.result_handler = Some(on_click(&btn, || {
                    with_game(|quiz| {
                        if let Err(err) = quiz.next_level_clicked() {
                            tracing::warn!(%err, "next level failed");
                        }
                    })
                })?);
            }
            Outcome::Retry => {
                let btn = self.result_button("lq-restart", "Restart")?;
                self.result_handler = Some(on_click(&btn, || {
                    with_game(|quiz| {
                        if let Err(err) = quiz.restart_clicked() {
                            tracing::warn!(%err, "restart failed");
                        }
                    })
                })?);
            }
        }
        Ok(())
    }

    fn result_button(&self, id: &str, label: &str) -> Result<HtmlButtonElement, JsValue> {
        let btn: HtmlButtonElement = self.doc.create_element("button")?.dyn_into()?;
        btn.set_id(id);
        btn.set_text_content(Some(label));
        self.result.append_child(&btn)?;
        Ok(btn)
    }

    fn try_render_level(&self, level: usize, locked: bool, just_unlocked: bool) -> Result<(), JsValue> {
        let Some(el) = self.level_boxes.get(level) else {
            return Ok(());
        };
        let classes = el.class_list();
        if locked {
            classes.add_1("locked")?;
            el.set_text_content(Some(&format!("Level {} 🔒", level + 1)));
        } else {
            classes.remove_1("locked")?;
            el.set_text_content(Some(&format!("Level {} 🔓", level + 1)));
            if just_unlocked {
                classes.add_1("unlocked")?;
                let el = el.clone();
                let _ = Timeout::new(self.unlock_flash_ms, move || {
                    el.class_list().remove_1("unlocked").ok();
                })
                .forget();
            }
        }
        Ok(())
    }
}

impl Presenter for DomPresenter {
    fn set_quiz_visible(&mut self, visible: bool) {
        for el in [&self.question, &self.choices, &self.progress, &self.timer] {
            set_display(el, visible);
        }
        set_display(&self.next_btn, visible);
        set_display(&self.result, !visible);
    }

    fn show_question(&mut self, text: &str, choices: &[String; 4]) {
        report(self.try_show_question(text, choices));
    }

    fn show_remaining_time(&mut self, seconds: u32) {
        self.timer.set_text_content(Some(&format!("Time: {seconds}")));
    }

    fn mark_choice_correct(&mut self, index: usize) {
        if let Some(btn) = self.choice_buttons.get(index) {
            report(btn.class_list().add_1("correct"));
        }
    }

    fn mark_choice_wrong(&mut self, index: usize) {
        if let Some(btn) = self.choice_buttons.get(index) {
            report(btn.class_list().add_1("wrong"));
        }
    }

    fn set_choices_enabled(&mut self, enabled: bool) {
        for btn in &self.choice_buttons {
            btn.set_disabled(!enabled);
        }
    }

    fn set_advance_enabled(&mut self, enabled: bool) {
        self.next_btn.set_disabled(!enabled);
    }

    fn show_progress(&mut self, current: usize, total: usize) {
        self.progress
            .set_text_content(Some(&format!("{current} / {total}")));
    }

    fn show_results(&mut self, score: usize, total: usize, outcome: Outcome) {
        report(self.try_show_results(score, total, outcome));
    }

    fn render_level_unlock_state(&mut self, level: usize, locked: bool, just_unlocked: bool) {
        report(self.try_render_level(level, locked, just_unlocked));
    }

    fn show_notice(&mut self, message: &str) {
        if let Some(win) = window() {
            report(win.alert_with_message(message));
        }
    }
}

/// Find `id` or create it as a `tag` child of `parent`.
fn ensure(doc: &Document, parent: &Element, tag: &str, id: &str) -> Result<HtmlElement, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el.dyn_into()?);
    }
    let el = doc.create_element(tag)?;
    el.set_id(id);
    parent.append_child(&el)?;
    Ok(el.dyn_into()?)
}

fn on_click(target: &HtmlElement, mut f: impl FnMut() + 'static) -> Result<ClickHandler, JsValue> {
    let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| f()) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

fn set_display(el: &HtmlElement, visible: bool) {
    let value = if visible { "" } else { "none" };
    report(el.style().set_property("display", value));
}

fn report(result: Result<(), JsValue>) {
    if let Err(err) = result {
        tracing::warn!(?err, "DOM update failed");
    }
}
