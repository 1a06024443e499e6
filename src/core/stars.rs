use super::Bounds;
use crate::constants::*;
use glam::Vec2;
use rand::Rng;

/// A twinkling point light.
#[derive(Clone, Debug)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    pub brightness: f32,
    pub twinkle_speed: f32,
}

impl Star {
    /// Halo radius and alpha, present only for the larger stars.
    #[inline]
    pub fn halo(&self) -> Option<(f32, f32)> {
        (self.size > STAR_HALO_SIZE_THRESHOLD).then(|| {
            (
                self.size * STAR_HALO_RADIUS_SCALE,
                self.brightness * STAR_HALO_ALPHA_SCALE,
            )
        })
    }

    /// Nudge brightness by the twinkle sinusoid at `now_ms`, clamped to the
    /// visible range.
    #[inline]
    pub fn twinkle(&mut self, now_ms: f64) {
        let wave = (now_ms * self.twinkle_speed as f64).sin() as f32;
        self.brightness = (self.brightness + wave * STAR_TWINKLE_STEP)
            .clamp(STAR_BRIGHTNESS_MIN, STAR_BRIGHTNESS_MAX);
    }
}

/// Produce `count` stars spread uniformly over `bounds`.
pub fn generate<R: Rng + ?Sized>(count: usize, bounds: Bounds, rng: &mut R) -> Vec<Star> {
    (0..count)
        .map(|_| Star {
            pos: Vec2::new(
                rng.gen::<f32>() * bounds.width,
                rng.gen::<f32>() * bounds.height,
            ),
            size: rng.gen_range(STAR_SIZE_MIN..=STAR_SIZE_MAX),
            brightness: rng.gen_range(STAR_BRIGHTNESS_MIN..=STAR_BRIGHTNESS_MAX),
            twinkle_speed: rng.gen_range(STAR_TWINKLE_SPEED_MIN..=STAR_TWINKLE_SPEED_MAX),
        })
        .collect()
}

/// Fixed-size star population for the current viewport.
#[derive(Clone, Debug)]
pub struct StarField {
    stars: Vec<Star>,
    count: usize,
}

impl StarField {
    pub fn new<R: Rng + ?Sized>(count: usize, bounds: Bounds, rng: &mut R) -> Self {
        Self {
            stars: generate(count, bounds, rng),
            count,
        }
    }

    /// Replace the whole population for new bounds.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, bounds: Bounds, rng: &mut R) {
        self.stars = generate(self.count, bounds, rng);
    }

    pub fn update(&mut self, now_ms: f64) {
        for star in &mut self.stars {
            star.twinkle(now_ms);
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
