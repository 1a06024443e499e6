//! Frame painting against a minimal 2D surface.
//!
//! The browser implements [`Surface`] over a canvas context; tests implement it
//! with a recorder.

use super::{Bounds, ShootingStar, Star};
use crate::constants::*;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: &'static str,
}

const fn stop(offset: f32, color: &'static str) -> GradientStop {
    GradientStop { offset, color }
}

/// A decorative radial wash, positioned relative to the viewport.
#[derive(Clone, Copy, Debug)]
pub struct Nebula {
    pub center_frac: [f32; 2],
    pub radius_frac_of_width: f32,
    pub stops: [GradientStop; 3],
}

pub const NEBULAE: [Nebula; 2] = [
    Nebula {
        center_frac: [0.3, 0.2],
        radius_frac_of_width: 0.4,
        stops: [
            stop(0.0, "rgba(138, 43, 226, 0.1)"),
            stop(0.5, "rgba(75, 0, 130, 0.05)"),
            stop(1.0, "transparent"),
        ],
    },
    Nebula {
        center_frac: [0.7, 0.6],
        radius_frac_of_width: 0.3,
        stops: [
            stop(0.0, "rgba(0, 100, 200, 0.08)"),
            stop(0.5, "rgba(0, 50, 150, 0.04)"),
            stop(1.0, "transparent"),
        ],
    },
];

pub const SHOOTING_STAR_STOPS: [GradientStop; 3] = [
    stop(0.0, STAR_COLOR),
    stop(0.5, SHOOTING_STAR_MID_COLOR),
    stop(1.0, "transparent"),
];

pub trait Surface {
    /// Opaque fill of the whole viewport.
    fn fill_background(&mut self, bounds: Bounds, color: &str);
    /// Fill the viewport with a radial gradient from `center` out to `radius`.
    fn fill_radial_gradient(
        &mut self,
        bounds: Bounds,
        center: Vec2,
        radius: f32,
        stops: &[GradientStop],
    );
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str, alpha: f32);
    fn stroke_gradient_line(
        &mut self,
        from: Vec2,
        to: Vec2,
        width: f64,
        stops: &[GradientStop],
        alpha: f32,
    );
}

pub fn paint_background<S: Surface + ?Sized>(surface: &mut S, bounds: Bounds) {
    surface.fill_background(bounds, BACKGROUND_COLOR);
    for nebula in &NEBULAE {
        let center = Vec2::new(
            bounds.width * nebula.center_frac[0],
            bounds.height * nebula.center_frac[1],
        );
        let radius = bounds.width * nebula.radius_frac_of_width;
        surface.fill_radial_gradient(bounds, center, radius, &nebula.stops);
    }
}

pub fn paint_stars<S: Surface + ?Sized>(surface: &mut S, stars: &[Star]) {
    for star in stars {
        surface.fill_circle(star.pos, star.size, STAR_COLOR, star.brightness);
        if let Some((radius, alpha)) = star.halo() {
            surface.fill_circle(star.pos, radius, STAR_COLOR, alpha);
        }
    }
}

pub fn paint_shooting_stars<S: Surface + ?Sized>(surface: &mut S, streaks: &[ShootingStar]) {
    for s in streaks {
        surface.stroke_gradient_line(
            s.pos,
            s.tail(),
            SHOOTING_STAR_LINE_WIDTH,
            &SHOOTING_STAR_STOPS,
            s.opacity,
        );
    }
}

/// Background, nebulae, stars, then streaks on top.
pub fn paint_frame<S: Surface + ?Sized>(
    surface: &mut S,
    bounds: Bounds,
    stars: &[Star],
    streaks: &[ShootingStar],
) {
    paint_background(surface, bounds);
    paint_stars(surface, stars);
    paint_shooting_stars(surface, streaks);
}
