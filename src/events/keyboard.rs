use super::{apply_strike, InputWiring};
use crate::core::Clock;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_keydown(ev: &web::KeyboardEvent, w: &InputWiring) {
    let key = ev.key();
    let now = w.clock.now_ms();
    let struck = w
        .app
        .borrow_mut()
        .press_physical(&key, ev.repeat(), |note| w.keys.rect(note), now);
    if let Some((note, result)) = struck {
        apply_strike(w, note, result);
    }
}

/// Physical keys strike notes on keydown. There is no keyup listener: letting
/// go of a key never cuts a note short.
pub fn wire_keydown(document: &web::Document, w: InputWiring) {
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_keydown(&ev, &w);
    }) as Box<dyn FnMut(_)>);
    _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    closure.forget();
}
