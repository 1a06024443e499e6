use super::{Rect, Timeline};
use crate::constants::*;
use rand::Rng;
use smallvec::SmallVec;

/// One puff of smoke. Motion and fade are left to the presentation layer;
/// `drift_x` is the horizontal target it animates toward.
#[derive(Clone, Debug, PartialEq)]
pub struct SmokeParticle {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub drift_x: f32,
    pub born_ms: f64,
    pub expires_ms: f64,
}

/// Appearance/expiry notifications for the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub enum ParticleChange {
    Appeared(SmokeParticle),
    Expired(u64),
}

#[derive(Clone, Debug)]
enum ParticleEvent {
    Appear(SmokeParticle),
    Expire(u64),
}

/// Emits staggered smoke bursts above piano keys and retires each puff after
/// a fixed lifetime.
#[derive(Clone, Debug)]
pub struct ParticleSpawner {
    live: Vec<SmokeParticle>,
    timeline: Timeline<ParticleEvent>,
    next_id: u64,
    burst_count: usize,
    stagger_ms: f64,
    lifetime_ms: f64,
}

impl ParticleSpawner {
    pub fn new(burst_count: usize, stagger_ms: f64, lifetime_ms: f64) -> Self {
        Self {
            live: Vec::new(),
            timeline: Timeline::new(),
            next_id: 0,
            burst_count,
            stagger_ms,
            lifetime_ms,
        }
    }

    /// Schedule a burst anchored at the top center of `anchor`. The i-th puff
    /// appears `i * stagger_ms` after `now_ms`. Returns the ids in appearance
    /// order.
    pub fn spawn_burst<R: Rng + ?Sized>(
        &mut self,
        anchor: Rect,
        now_ms: f64,
        rng: &mut R,
    ) -> SmallVec<[u64; BURST_PARTICLE_COUNT]> {
        let cx = anchor.center_x();
        let top = anchor.top;
        let mut ids = SmallVec::new();
        for i in 0..self.burst_count {
            let id = self.next_id;
            self.next_id += 1;
            let due = now_ms + i as f64 * self.stagger_ms;
            let particle = SmokeParticle {
                id,
                x: cx + rng.gen_range(-PARTICLE_JITTER_X..=PARTICLE_JITTER_X),
                y: top - rng.gen_range(0.0..=PARTICLE_RISE_MAX),
                size: rng.gen_range(PARTICLE_SIZE_MIN..=PARTICLE_SIZE_MAX),
                drift_x: rng.gen_range(-PARTICLE_DRIFT_X..=PARTICLE_DRIFT_X),
                born_ms: due,
                expires_ms: due + self.lifetime_ms,
            };
            self.timeline.schedule(due, ParticleEvent::Appear(particle));
            ids.push(id);
        }
        log::debug!(
            "[smoke] burst of {} at ({:.0},{:.0})",
            self.burst_count,
            cx,
            top
        );
        ids
    }

    /// Drain every appearance and expiry due by `now_ms`, in due order. A puff
    /// that both appears and expires within the window is reported twice.
    pub fn advance(&mut self, now_ms: f64) -> Vec<ParticleChange> {
        let mut changes = Vec::new();
        while let Some((_, event)) = self.timeline.pop_due(now_ms) {
            match event {
                ParticleEvent::Appear(p) => {
                    self.timeline
                        .schedule(p.expires_ms, ParticleEvent::Expire(p.id));
                    self.live.push(p.clone());
                    changes.push(ParticleChange::Appeared(p));
                }
                ParticleEvent::Expire(id) => {
                    self.live.retain(|p| p.id != id);
                    changes.push(ParticleChange::Expired(id));
                }
            }
        }
        changes
    }

    pub fn live(&self) -> &[SmokeParticle] {
        &self.live
    }

    /// Appearances and expiries still waiting on the timeline.
    pub fn pending(&self) -> usize {
        self.timeline.len()
    }

    /// Drop everything, returning the ids that were visible.
    pub fn clear(&mut self) -> Vec<u64> {
        self.timeline.clear();
        self.live.drain(..).map(|p| p.id).collect()
    }
}
