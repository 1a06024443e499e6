pub mod keyboard;
pub mod pointer;

use crate::audio::WebSynth;
use crate::core::{AppContext, Clock, InstantClock, Result, Strike};
use crate::dom::KeyElements;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Slack added to release timers so they never land just before the deadline.
const RELEASE_TIMER_SLACK_MS: f64 = 1.0;

/// Shared handles captured by every input listener.
#[derive(Clone)]
pub struct InputWiring {
    pub app: Rc<RefCell<AppContext<WebSynth>>>,
    pub keys: Rc<KeyElements>,
    pub clock: InstantClock,
}

/// Light the key and arm its release timer on success; log and drop the
/// strike otherwise.
pub(crate) fn apply_strike(w: &InputWiring, note: &str, result: Result<Strike>) {
    match result {
        Ok(strike) => {
            log::debug!("[keys] {} {:?}", note, strike);
            w.keys.set_active(note, true);
            arm_release_timer(w);
        }
        Err(e) => log::warn!("[keys] {}", e),
    }
}

/// Release due notes from a window timeout. Browsers stop animation frames in
/// hidden tabs but still run (throttled) timeouts, so notes end on time even
/// when the frame loop is paused.
fn arm_release_timer(w: &InputWiring) {
    let Some(due) = w.app.borrow().next_release_ms() else {
        return;
    };
    let Some(window) = web::window() else {
        return;
    };
    let delay = (due - w.clock.now_ms() + RELEASE_TIMER_SLACK_MS).max(0.0);
    let w = w.clone();
    let callback = Closure::once_into_js(move || {
        let released = w.app.borrow_mut().release_due(w.clock.now_ms());
        for note in &released {
            w.keys.set_active(note, false);
        }
        if !released.is_empty() {
            log::debug!("[keys] timer released {:?}", released);
        }
    });
    if let Err(e) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        delay.ceil() as i32,
    ) {
        log::warn!("[keys] release timer error: {:?}", e);
    }
}
