use super::Bounds;
use crate::constants::*;
use glam::Vec2;
use rand::Rng;

/// A short-lived streak travelling down and to the right.
#[derive(Clone, Debug)]
pub struct ShootingStar {
    pub pos: Vec2,
    pub length: f32,
    pub speed: f32,
    /// Radians in [π/4, π/2]; canvas y grows downward.
    pub angle: f32,
    pub opacity: f32,
}

impl ShootingStar {
    pub fn random<R: Rng + ?Sized>(bounds: Bounds, rng: &mut R) -> Self {
        Self {
            pos: Vec2::new(rng.gen::<f32>() * bounds.width, 0.0),
            length: rng.gen_range(SHOOTING_STAR_LENGTH_MIN..=SHOOTING_STAR_LENGTH_MAX),
            speed: rng.gen_range(SHOOTING_STAR_SPEED_MIN..=SHOOTING_STAR_SPEED_MAX),
            angle: rng.gen_range(SHOOTING_STAR_ANGLE_MIN..=SHOOTING_STAR_ANGLE_MAX),
            opacity: 1.0,
        }
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.angle.cos(), self.angle.sin())
    }

    /// End of the trail, `length` back along the trajectory.
    #[inline]
    pub fn tail(&self) -> Vec2 {
        self.pos - self.direction() * self.length
    }

    #[inline]
    fn advance(&mut self) {
        self.pos += self.direction() * self.speed;
        self.opacity -= SHOOTING_STAR_FADE_PER_TICK;
    }

    /// Faded out, or past the right or bottom edge. Stars only travel
    /// down-right so the left and top edges are never checked.
    #[inline]
    pub fn is_spent(&self, bounds: Bounds) -> bool {
        self.opacity <= 0.0 || self.pos.x > bounds.width || self.pos.y > bounds.height
    }
}

/// Live set of shooting stars with per-tick probabilistic spawning.
#[derive(Clone, Debug)]
pub struct ShootingStars {
    live: Vec<ShootingStar>,
    spawn_probability: f64,
}

impl ShootingStars {
    /// A NaN or infinite probability disables spawning.
    pub fn new(spawn_probability: f64) -> Self {
        Self {
            live: Vec::new(),
            spawn_probability: if spawn_probability.is_finite() {
                spawn_probability.clamp(0.0, 1.0)
            } else {
                0.0
            },
        }
    }

    /// Roll once; returns true when a star was spawned.
    pub fn maybe_spawn<R: Rng + ?Sized>(&mut self, bounds: Bounds, rng: &mut R) -> bool {
        if rng.gen_bool(self.spawn_probability) {
            self.live.push(ShootingStar::random(bounds, rng));
            true
        } else {
            false
        }
    }

    /// Advance every star and drop the spent ones.
    pub fn update(&mut self, bounds: Bounds) {
        self.live.retain_mut(|s| {
            s.advance();
            !s.is_spent(bounds)
        });
    }

    /// One frame: roll for a spawn, then advance (the newcomer included).
    pub fn step<R: Rng + ?Sized>(&mut self, bounds: Bounds, rng: &mut R) -> bool {
        let spawned = self.maybe_spawn(bounds, rng);
        self.update(bounds);
        spawned
    }

    pub fn push(&mut self, star: ShootingStar) {
        self.live.push(star);
    }

    pub fn live(&self) -> &[ShootingStar] {
        &self.live
    }

    pub fn clear(&mut self) {
        self.live.clear();
    }
}
