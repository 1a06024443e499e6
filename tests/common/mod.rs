// Test doubles shared by the host-side integration tests.

#![allow(dead_code)]

use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use starry_piano::core::{Bounds, GradientStop, Surface, Synth};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Attack(&'static str),
    Release(&'static str),
}

/// Synth that only remembers what it was asked to do.
#[derive(Default)]
pub struct RecordingSynth {
    pub calls: Vec<Call>,
    /// Mirror of `calls` that outlives the synth once its owner drops it.
    pub log: Option<Rc<RefCell<Vec<Call>>>>,
}

impl RecordingSynth {
    pub fn with_log() -> (Self, Rc<RefCell<Vec<Call>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let synth = Self {
            calls: Vec::new(),
            log: Some(log.clone()),
        };
        (synth, log)
    }

    fn record(&mut self, call: Call) {
        if let Some(log) = &self.log {
            log.borrow_mut().push(call.clone());
        }
        self.calls.push(call);
    }

    pub fn releases_of(&self, note: &str) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Release(n) if *n == note))
            .count()
    }

    pub fn attacks_of(&self, note: &str) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Attack(n) if *n == note))
            .count()
    }
}

impl Synth for RecordingSynth {
    fn trigger_attack(&mut self, note: &'static str) {
        self.record(Call::Attack(note));
    }

    fn trigger_release(&mut self, note: &'static str) {
        self.record(Call::Release(note));
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Background(String),
    Radial { center: Vec2, radius: f32 },
    Circle { center: Vec2, radius: f32, alpha: f32 },
    Line { from: Vec2, to: Vec2, alpha: f32 },
}

/// Surface that records draw calls in order.
#[derive(Default)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn circles(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter().filter(|op| matches!(op, Op::Circle { .. }))
    }
}

impl Surface for RecordingSurface {
    fn fill_background(&mut self, _bounds: Bounds, color: &str) {
        self.ops.push(Op::Background(color.to_string()));
    }

    fn fill_radial_gradient(
        &mut self,
        _bounds: Bounds,
        center: Vec2,
        radius: f32,
        _stops: &[GradientStop],
    ) {
        self.ops.push(Op::Radial { center, radius });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, _color: &str, alpha: f32) {
        self.ops.push(Op::Circle {
            center,
            radius,
            alpha,
        });
    }

    fn stroke_gradient_line(
        &mut self,
        from: Vec2,
        to: Vec2,
        _width: f64,
        _stops: &[GradientStop],
        alpha: f32,
    ) {
        self.ops.push(Op::Line { from, to, alpha });
    }
}
