//! Starry piano: a twinkling starfield with shooting stars behind a two-octave
//! piano that plays a WebAudio synth and puffs smoke above struck keys.
//!
//! All scene state lives in [`core`] and runs on any target. The browser shell
//! (canvas, DOM, WebAudio, input wiring) is compiled for `wasm32` only.

pub mod constants;
pub mod core;

#[cfg(target_arch = "wasm32")]
mod audio;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod render;

#[cfg(target_arch = "wasm32")]
pub use web_entry::start;

#[cfg(target_arch = "wasm32")]
mod web_entry {
    use crate::audio::WebSynth;
    use crate::core::{AppContext, InstantClock, SceneParams};
    use crate::dom::{self, KeyElements, SmokeLayer};
    use crate::events;
    use crate::frame;
    use crate::render::CanvasSurface;
    use anyhow::anyhow;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::{spawn_local, JsFuture};
    use web_sys as web;

    type SharedApp = Rc<RefCell<AppContext<WebSynth>>>;

    fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, app: SharedApp) {
        let canvas_resize = canvas.clone();
        let resize_closure = Closure::wrap(Box::new(move || {
            let bounds = dom::sync_canvas_to_window(&canvas_resize);
            app.borrow_mut().on_resize(bounds);
        }) as Box<dyn FnMut()>);
        if let Some(window) = web::window() {
            _ = window
                .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
        }
        resize_closure.forget();
    }

    /// Create the audio context now, build the synth once it is running.
    ///
    /// Strikes before that point are dropped by the note controller. A failure
    /// leaves the page silent for the rest of the session.
    fn start_audio(document: &web::Document, app: SharedApp) {
        let audio_ctx = match web::AudioContext::new() {
            Ok(c) => c,
            Err(e) => {
                app.borrow_mut()
                    .mark_audio_failed(format!("AudioContext error: {:?}", e));
                return;
            }
        };
        events::pointer::wire_audio_unlock(document, &audio_ctx);
        spawn_local(async move {
            let built = async {
                let resume = audio_ctx
                    .resume()
                    .map_err(|e| anyhow!("resume error: {:?}", e))?;
                JsFuture::from(resume)
                    .await
                    .map_err(|e| anyhow!("resume rejected: {:?}", e))?;
                WebSynth::new(audio_ctx)
            }
            .await;
            match built {
                Ok(synth) => app.borrow_mut().attach_synth(synth),
                Err(e) => app.borrow_mut().mark_audio_failed(format!("{:#}", e)),
            }
        });
    }

    fn wire_shutdown(app: SharedApp, keys: Rc<KeyElements>, smoke: Rc<RefCell<SmokeLayer>>) {
        let closure = Closure::wrap(Box::new(move || {
            let report = app.borrow_mut().shutdown();
            for note in &report.released {
                keys.set_active(note, false);
            }
            smoke.borrow_mut().clear();
            if let Some(synth) = app.borrow().notes().synth() {
                synth.close();
            }
        }) as Box<dyn FnMut()>);
        if let Some(window) = web::window() {
            _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("starry-piano starting");

        spawn_local(async move {
            if let Err(e) = init().await {
                log::error!("init error: {:?}", e);
            }
        });
        Ok(())
    }

    async fn init() -> anyhow::Result<()> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| anyhow!("no document"))?;

        let canvas: web::HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| anyhow!("missing #canvas"))?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|e| anyhow!(format!("{:?}", e)))?;
        let bounds = dom::sync_canvas_to_window(&canvas);
        let surface = CanvasSurface::from_canvas(&canvas)?;

        let params = SceneParams {
            seed: rand::random(),
            ..SceneParams::default()
        };
        let app: SharedApp = Rc::new(RefCell::new(AppContext::init(params, bounds)));
        let keys = Rc::new(dom::build_piano(&document)?);
        let smoke = Rc::new(RefCell::new(SmokeLayer::default()));
        let clock = InstantClock::new();

        wire_canvas_resize(&canvas, app.clone());

        let wiring = events::InputWiring {
            app: app.clone(),
            keys: keys.clone(),
            clock,
        };
        events::pointer::wire_key_mousedown(&wiring);
        events::keyboard::wire_keydown(&document, wiring);

        start_audio(&document, app.clone());
        wire_shutdown(app.clone(), keys.clone(), smoke.clone());

        let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
            app,
            surface,
            keys,
            smoke,
            document,
            clock,
        }));
        frame::start_loop(frame_ctx);
        Ok(())
    }
}
