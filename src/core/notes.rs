//! Per-note voice lifetimes.
//!
//! Every strike sounds for a fixed duration and is then released by a
//! scheduled timeline entry. Striking a note that is still sounding releases
//! it first, so a pitch never has two overlapping sustains. Key-up is not a
//! release: the only early exits are a re-strike and an explicit `stop`.

use super::{PianoError, Result, TimerId, Timeline};
use fnv::FnvHashMap;

/// Audio backend contract. Notes are scientific pitch names such as `"C#4"`.
pub trait Synth {
    fn trigger_attack(&mut self, note: &'static str);
    fn trigger_release(&mut self, note: &'static str);
}

/// Initialization status of the audio backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Ready,
    /// Initialization failed; strikes are dropped for the rest of the session.
    Failed(String),
}

/// What a successful strike did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strike {
    Fresh,
    /// The note was still sounding and was released before the new attack.
    Restruck,
}

#[derive(Clone, Copy, Debug)]
struct Voice {
    release_timer: TimerId,
}

pub struct NoteController<S: Synth> {
    synth: Option<S>,
    state: EngineState,
    voices: FnvHashMap<&'static str, Voice>,
    releases: Timeline<&'static str>,
    duration_ms: f64,
}

impl<S: Synth> NoteController<S> {
    pub fn new(duration_ms: f64) -> Self {
        Self {
            synth: None,
            state: EngineState::Uninitialized,
            voices: FnvHashMap::default(),
            releases: Timeline::new(),
            duration_ms,
        }
    }

    /// Hand over an initialized synth. Strikes are honored from now on.
    pub fn attach(&mut self, synth: S) {
        self.synth = Some(synth);
        self.state = EngineState::Ready;
    }

    /// Record a failed engine. Anything still sounding is released first.
    /// There is no retry.
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        log::error!("[audio] synth unavailable: {}", reason);
        self.stop_all();
        self.synth = None;
        self.state = EngineState::Failed(reason);
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn synth(&self) -> Option<&S> {
        self.synth.as_ref()
    }

    pub fn synth_mut(&mut self) -> Option<&mut S> {
        self.synth.as_mut()
    }

    /// Attack `note` and schedule its release `duration_ms` after `now_ms`.
    pub fn trigger(&mut self, note: &'static str, now_ms: f64) -> Result<Strike> {
        let synth = match (&mut self.synth, &self.state) {
            (Some(s), _) => s,
            (None, EngineState::Failed(reason)) => {
                return Err(PianoError::AudioUnavailable {
                    note: note.to_string(),
                    reason: reason.clone(),
                })
            }
            (None, _) => {
                return Err(PianoError::AudioNotReady {
                    note: note.to_string(),
                })
            }
        };

        let strike = match self.voices.remove(note) {
            Some(prev) => {
                self.releases.cancel(prev.release_timer);
                synth.trigger_release(note);
                Strike::Restruck
            }
            None => Strike::Fresh,
        };

        synth.trigger_attack(note);
        let release_timer = self.releases.schedule(now_ms + self.duration_ms, note);
        self.voices.insert(note, Voice { release_timer });
        log::debug!("[notes] attack {} ({:?})", note, strike);
        Ok(strike)
    }

    /// Release every voice whose timer is due. Returns the released notes in
    /// due order.
    pub fn advance(&mut self, now_ms: f64) -> Vec<&'static str> {
        let mut released = Vec::new();
        while let Some((_, note)) = self.releases.pop_due(now_ms) {
            self.voices.remove(note);
            if let Some(s) = &mut self.synth {
                s.trigger_release(note);
            }
            log::debug!("[notes] auto-release {}", note);
            released.push(note);
        }
        released
    }

    /// Release `note` now. Returns false if it was not sounding.
    pub fn stop(&mut self, note: &'static str) -> bool {
        match self.voices.remove(note) {
            Some(voice) => {
                self.releases.cancel(voice.release_timer);
                if let Some(s) = &mut self.synth {
                    s.trigger_release(note);
                }
                true
            }
            None => false,
        }
    }

    /// Release everything that is still sounding.
    pub fn stop_all(&mut self) -> Vec<&'static str> {
        let mut notes: Vec<&'static str> = self.voices.keys().copied().collect();
        notes.sort_unstable();
        for &note in &notes {
            self.stop(note);
        }
        notes
    }

    pub fn is_sounding(&self, note: &str) -> bool {
        self.voices.contains_key(note)
    }

    pub fn sounding(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.voices.keys().copied()
    }

    pub fn next_release_ms(&self) -> Option<f64> {
        self.releases.next_due()
    }

    /// Number of pending auto-release timers.
    pub fn pending_releases(&self) -> usize {
        self.releases.len()
    }
}
