pub mod app;
pub mod clock;
pub mod error;
pub mod keys;
pub mod music;
pub mod notes;
pub mod paint;
pub mod particles;
pub mod shooting;
pub mod stars;
pub mod timeline;

pub use app::*;
pub use clock::*;
pub use error::*;
pub use keys::*;
pub use music::*;
pub use notes::*;
pub use paint::*;
pub use particles::*;
pub use shooting::*;
pub use stars::*;
pub use timeline::*;

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

/// Screen rectangle of a key element, as reported by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }
}
