//! The application context: owns every piece of scene state and is driven by
//! one `tick` per display refresh plus input callbacks.

use super::*;
use crate::constants::*;
use fnv::FnvHashSet;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Tunables for a scene. `Default` mirrors the shipped page.
#[derive(Clone, Debug)]
pub struct SceneParams {
    pub star_count: usize,
    pub shooting_star_probability: f64,
    pub note_duration_ms: f64,
    pub burst_count: usize,
    pub burst_stagger_ms: f64,
    pub particle_lifetime_ms: f64,
    pub seed: u64,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            star_count: STAR_COUNT,
            shooting_star_probability: SHOOTING_STAR_SPAWN_PROBABILITY,
            note_duration_ms: NOTE_DURATION_MS,
            burst_count: BURST_PARTICLE_COUNT,
            burst_stagger_ms: BURST_STAGGER_MS,
            particle_lifetime_ms: PARTICLE_LIFETIME_MS,
            seed: 42,
        }
    }
}

/// Everything that changed during one tick and needs presenting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Notes auto-released this tick; their keys are no longer active.
    pub released: Vec<&'static str>,
    pub particles: Vec<ParticleChange>,
    pub spawned_shooting_star: bool,
}

/// What `shutdown` tore down.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShutdownReport {
    pub released: Vec<&'static str>,
    pub particles: Vec<u64>,
}

pub struct AppContext<S: Synth> {
    pub params: SceneParams,
    bounds: Bounds,
    rng: StdRng,
    stars: StarField,
    shooting: ShootingStars,
    notes: NoteController<S>,
    particles: ParticleSpawner,
    active_keys: FnvHashSet<&'static str>,
    running: bool,
}

impl<S: Synth> AppContext<S> {
    /// Build the scene for the initial viewport. Audio starts uninitialized.
    pub fn init(params: SceneParams, bounds: Bounds) -> Self {
        let mut rng = StdRng::seed_from_u64(params.seed);
        let stars = StarField::new(params.star_count, bounds, &mut rng);
        let shooting = ShootingStars::new(params.shooting_star_probability);
        let notes = NoteController::new(params.note_duration_ms);
        let particles = ParticleSpawner::new(
            params.burst_count,
            params.burst_stagger_ms,
            params.particle_lifetime_ms,
        );
        log::info!(
            "[scene] init {}x{} stars={}",
            bounds.width,
            bounds.height,
            stars.len()
        );
        Self {
            params,
            bounds,
            rng,
            stars,
            shooting,
            notes,
            particles,
            active_keys: FnvHashSet::default(),
            running: true,
        }
    }

    pub fn attach_synth(&mut self, synth: S) {
        log::info!("[audio] synth ready");
        self.notes.attach(synth);
    }

    pub fn mark_audio_failed(&mut self, reason: impl Into<String>) {
        self.notes.mark_failed(reason);
        self.active_keys.clear();
    }

    pub fn audio_state(&self) -> &EngineState {
        self.notes.state()
    }

    /// New viewport: regenerate the whole star field inside it.
    pub fn on_resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.stars.regenerate(bounds, &mut self.rng);
        log::debug!("[scene] resize {}x{}", bounds.width, bounds.height);
    }

    /// One frame of simulation at `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> FrameReport {
        if !self.running {
            return FrameReport::default();
        }
        let released = self.release_due(now_ms);
        let particles = self.particles.advance(now_ms);
        self.stars.update(now_ms);
        let spawned_shooting_star = self.shooting.step(self.bounds, &mut self.rng);
        FrameReport {
            released,
            particles,
            spawned_shooting_star,
        }
    }

    /// Release every note whose duration has elapsed by `now_ms` and clear
    /// its key. `tick` calls this too; it exists on its own so a timer can
    /// release notes while frames are not being delivered.
    pub fn release_due(&mut self, now_ms: f64) -> Vec<&'static str> {
        if !self.running {
            return Vec::new();
        }
        let released = self.notes.advance(now_ms);
        for note in &released {
            self.active_keys.remove(note);
        }
        released
    }

    /// Due time of the earliest pending auto-release.
    pub fn next_release_ms(&self) -> Option<f64> {
        self.notes.next_release_ms()
    }

    /// Strike `note`, whose key occupies `anchor` on screen.
    ///
    /// Errors are not fatal: callers log them and move on. Nothing is queued.
    pub fn press(&mut self, note: &str, anchor: Rect, now_ms: f64) -> Result<Strike> {
        if !self.running {
            return Err(PianoError::ShutDown);
        }
        let note = find_note(note).ok_or_else(|| PianoError::UnknownNote(note.to_string()))?;
        let strike = self.notes.trigger(note, now_ms)?;
        self.active_keys.insert(note);
        self.particles.spawn_burst(anchor, now_ms, &mut self.rng);
        Ok(strike)
    }

    /// Strike the note bound to a physical key. Auto-repeat and unmapped keys
    /// return `None`, as does a note whose key cannot be located on screen.
    pub fn press_physical(
        &mut self,
        key: &str,
        repeat: bool,
        anchor_of: impl FnOnce(&'static str) -> Option<Rect>,
        now_ms: f64,
    ) -> Option<(&'static str, Result<Strike>)> {
        if repeat {
            return None;
        }
        let note = note_for_key(key)?;
        let anchor = anchor_of(note)?;
        Some((note, self.press(note, anchor, now_ms)))
    }

    /// Release `note` early. Not bound to key-up: notes play their full
    /// duration unless re-struck.
    pub fn stop(&mut self, note: &str) -> bool {
        let Some(note) = find_note(note) else {
            return false;
        };
        self.active_keys.remove(note);
        self.notes.stop(note)
    }

    /// Release all voices, drop pending timers and particles, stop ticking.
    pub fn shutdown(&mut self) -> ShutdownReport {
        let released = self.notes.stop_all();
        self.active_keys.clear();
        self.shooting.clear();
        let particles = self.particles.clear();
        self.running = false;
        log::info!(
            "[scene] shutdown released={} particles={}",
            released.len(),
            particles.len()
        );
        ShutdownReport {
            released,
            particles,
        }
    }

    pub fn paint<T: Surface + ?Sized>(&self, surface: &mut T) {
        paint_frame(surface, self.bounds, self.stars.stars(), self.shooting.live());
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    pub fn shooting_stars(&self) -> &ShootingStars {
        &self.shooting
    }

    pub fn notes(&self) -> &NoteController<S> {
        &self.notes
    }

    pub fn particles(&self) -> &ParticleSpawner {
        &self.particles
    }

    pub fn is_key_active(&self, note: &str) -> bool {
        self.active_keys.contains(note)
    }
}
