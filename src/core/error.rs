/// Result alias that carries the custom [`PianoError`] type.
pub type Result<T> = std::result::Result<T, PianoError>;

/// Errors surfaced by the piano core. None of them are fatal to the frame loop.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PianoError {
    /// A note was struck before the synth finished initializing. The strike is
    /// dropped, not queued.
    #[error("audio engine not ready, dropping note {note}")]
    AudioNotReady { note: String },
    /// The synth failed to initialize; every strike is dropped from now on.
    #[error("audio engine unavailable ({reason}), dropping note {note}")]
    AudioUnavailable { note: String, reason: String },
    /// The scene was shut down; input is ignored.
    #[error("scene is shut down")]
    ShutDown,
    /// A note name that is not on the keyboard.
    #[error("unknown note {0:?}")]
    UnknownNote(String),
}
