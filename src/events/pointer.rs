use super::{apply_strike, InputWiring};
use crate::core::Clock;
use crate::dom;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Strike a note on `mousedown`. Mouse-up and mouse-leave are deliberately not
/// wired: a note plays its full duration.
pub fn wire_key_mousedown(w: &InputWiring) {
    for (note, el) in w.keys.iter() {
        let w = w.clone();
        let target = el.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
            let anchor = dom::element_rect(&target);
            let now = w.clock.now_ms();
            let result = w.app.borrow_mut().press(note, anchor, now);
            apply_strike(&w, note, result);
        }) as Box<dyn FnMut(_)>);
        _ = el.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Resume the audio context on the first click anywhere, for browsers that
/// hold audio until a user gesture. Fires once; it is not a retry loop.
pub fn wire_audio_unlock(document: &web::Document, audio_ctx: &web::AudioContext) {
    let ctx = audio_ctx.clone();
    let closure = Closure::wrap(Box::new(move || {
        if ctx.state() != web::AudioContextState::Running {
            log::info!("[audio] resuming context after user gesture");
            _ = ctx.resume();
        }
    }) as Box<dyn FnMut()>);
    let opts = web::AddEventListenerOptions::new();
    opts.set_once(true);
    _ = document.add_event_listener_with_callback_and_add_event_listener_options(
        "click",
        closure.as_ref().unchecked_ref(),
        &opts,
    );
    closure.forget();
}
