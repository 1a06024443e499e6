use crate::audio::WebSynth;
use crate::core::{AppContext, Clock, InstantClock, ParticleChange};
use crate::dom::{KeyElements, SmokeLayer};
use crate::render::CanvasSurface;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub app: Rc<RefCell<AppContext<WebSynth>>>,
    pub surface: CanvasSurface,
    pub keys: Rc<KeyElements>,
    pub smoke: Rc<RefCell<SmokeLayer>>,
    pub document: web::Document,
    pub clock: InstantClock,
}

impl FrameContext {
    /// Advance the scene, paint it, then mirror note and smoke changes into the DOM.
    pub fn frame(&mut self) {
        let now = self.clock.now_ms();
        let report = {
            let mut app = self.app.borrow_mut();
            let report = app.tick(now);
            app.paint(&mut self.surface);
            report
        };

        for note in &report.released {
            self.keys.set_active(note, false);
        }

        let mut smoke = self.smoke.borrow_mut();
        for change in &report.particles {
            match change {
                ParticleChange::Appeared(p) => smoke.show(&self.document, p),
                ParticleChange::Expired(id) => smoke.remove(*id),
            }
        }

        if report.spawned_shooting_star {
            log::debug!("[frame] shooting star at t={:.0}ms", now);
        }
    }
}

/// Drive `frame` from `requestAnimationFrame` until the scene shuts down.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        let running = frame_ctx.borrow().app.borrow().is_running();
        if !running {
            log::info!("[frame] loop stopped");
            return;
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
