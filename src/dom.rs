use crate::core::{keys, Bounds, KeyDescriptor, Rect, SmokeParticle};
use anyhow::anyhow;
use fnv::FnvHashMap;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Size the canvas to the window and return the new bounds.
pub fn sync_canvas_to_window(canvas: &web::HtmlCanvasElement) -> Bounds {
    let px = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let (w, h) = web::window()
        .map(|w| (px(w.inner_width()), px(w.inner_height())))
        .unwrap_or((0.0, 0.0));
    canvas.set_width(w as u32);
    canvas.set_height(h as u32);
    Bounds::new(w as f32, h as f32)
}

#[inline]
pub fn element_rect(el: &web::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
}

/// The piano key elements, indexed by note.
pub struct KeyElements {
    by_note: FnvHashMap<&'static str, web::HtmlElement>,
}

impl KeyElements {
    pub fn rect(&self, note: &str) -> Option<Rect> {
        self.by_note.get(note).map(|el| element_rect(el))
    }

    pub fn set_active(&self, note: &str, active: bool) {
        if let Some(el) = self.by_note.get(note) {
            let cl = el.class_list();
            _ = if active {
                cl.add_1("active")
            } else {
                cl.remove_1("active")
            };
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &web::HtmlElement)> {
        self.by_note.iter().map(|(n, el)| (*n, el))
    }
}

fn build_key(document: &web::Document, key: &KeyDescriptor) -> anyhow::Result<web::HtmlElement> {
    let el = document
        .create_element("div")
        .map_err(|e| anyhow!("create key {}: {:?}", key.note, e))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow!("{:?}", e))?;
    el.set_class_name(key.class_name());
    _ = el.dataset().set("note", key.note);
    if let Some(left) = key.left_px() {
        _ = el.style().set_property("left", &format!("{}px", left));
    }
    Ok(el)
}

/// Populate `#piano` from the static layout.
pub fn build_piano(document: &web::Document) -> anyhow::Result<KeyElements> {
    let piano = document
        .get_element_by_id("piano")
        .ok_or_else(|| anyhow!("missing #piano"))?;
    let mut by_note = FnvHashMap::default();
    for key in keys::layout() {
        let el = build_key(document, &key)?;
        piano
            .append_child(&el)
            .map_err(|e| anyhow!("append key {}: {:?}", key.note, e))?;
        by_note.insert(key.note, el);
    }
    log::info!("[keys] built {} keys", by_note.len());
    Ok(KeyElements { by_note })
}

/// Smoke puffs currently in the document, by particle id.
#[derive(Default)]
pub struct SmokeLayer {
    by_id: FnvHashMap<u64, web::HtmlElement>,
}

impl SmokeLayer {
    /// Add a `.smoke-particle`; the stylesheet animates the rise and drift.
    pub fn show(&mut self, document: &web::Document, p: &SmokeParticle) {
        let Some(body) = document.body() else {
            return;
        };
        let el = match document
            .create_element("div")
            .ok()
            .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
        {
            Some(el) => el,
            None => {
                log::error!("[smoke] cannot create particle {}", p.id);
                return;
            }
        };
        el.set_class_name("smoke-particle");
        let style = el.style();
        _ = style.set_property("left", &format!("{}px", p.x));
        _ = style.set_property("top", &format!("{}px", p.y));
        _ = style.set_property("width", &format!("{}px", p.size));
        _ = style.set_property("height", &format!("{}px", p.size));
        _ = style.set_property("--drift-x", &format!("{}px", p.drift_x));
        if body.append_child(&el).is_ok() {
            self.by_id.insert(p.id, el);
        }
    }

    pub fn remove(&mut self, id: u64) {
        if let Some(el) = self.by_id.remove(&id) {
            el.remove();
        }
    }

    pub fn clear(&mut self) {
        for (_, el) in self.by_id.drain() {
            el.remove();
        }
    }
}
