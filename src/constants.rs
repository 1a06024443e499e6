//! Scene and timing tuning constants.
//!
//! These constants express intended behavior (population sizes, ranges,
//! durations) and keep magic numbers out of the code. `SceneParams::default()`
//! collects the ones that are meant to be overridable.

// Star field
pub const STAR_COUNT: usize = 200;
pub const STAR_SIZE_MIN: f32 = 0.5;
pub const STAR_SIZE_MAX: f32 = 2.5;
pub const STAR_BRIGHTNESS_MIN: f32 = 0.2;
pub const STAR_BRIGHTNESS_MAX: f32 = 1.0;
pub const STAR_TWINKLE_SPEED_MIN: f32 = 0.01;
pub const STAR_TWINKLE_SPEED_MAX: f32 = 0.03;
pub const STAR_TWINKLE_STEP: f32 = 0.1; // max brightness change per tick
pub const STAR_HALO_SIZE_THRESHOLD: f32 = 1.5; // halo only above this size
pub const STAR_HALO_RADIUS_SCALE: f32 = 3.0;
pub const STAR_HALO_ALPHA_SCALE: f32 = 0.3;

// Shooting stars
pub const SHOOTING_STAR_SPAWN_PROBABILITY: f64 = 0.003; // per tick
pub const SHOOTING_STAR_LENGTH_MIN: f32 = 20.0;
pub const SHOOTING_STAR_LENGTH_MAX: f32 = 100.0;
pub const SHOOTING_STAR_SPEED_MIN: f32 = 3.0;
pub const SHOOTING_STAR_SPEED_MAX: f32 = 8.0;
pub const SHOOTING_STAR_ANGLE_MIN: f32 = std::f32::consts::FRAC_PI_4;
pub const SHOOTING_STAR_ANGLE_MAX: f32 = std::f32::consts::FRAC_PI_2;
pub const SHOOTING_STAR_FADE_PER_TICK: f32 = 0.01;
pub const SHOOTING_STAR_LINE_WIDTH: f64 = 2.0;

// Notes
pub const NOTE_DURATION_MS: f64 = 1000.0; // auto-release delay after attack

// Smoke bursts
pub const BURST_PARTICLE_COUNT: usize = 8;
pub const BURST_STAGGER_MS: f64 = 50.0;
pub const PARTICLE_LIFETIME_MS: f64 = 3000.0;
pub const PARTICLE_JITTER_X: f32 = 15.0; // +/- around the key center
pub const PARTICLE_RISE_MAX: f32 = 10.0; // spawn up to this far above the key top
pub const PARTICLE_SIZE_MIN: f32 = 10.0;
pub const PARTICLE_SIZE_MAX: f32 = 25.0;
pub const PARTICLE_DRIFT_X: f32 = 30.0; // +/- horizontal drift target

// Piano layout (CSS pixels)
pub const WHITE_KEY_PITCH_PX: f32 = 51.0; // 50px key + 1px margin
pub const BLACK_KEY_OFFSET_PX: f32 = 36.0;

// Background palette
pub const BACKGROUND_COLOR: &str = "#000011";
pub const STAR_COLOR: &str = "#ffffff";
pub const SHOOTING_STAR_MID_COLOR: &str = "#87ceeb";

// Synth envelope (seconds) and levels
pub const SYNTH_ATTACK_SEC: f64 = 0.02;
pub const SYNTH_DECAY_SEC: f64 = 0.1;
pub const SYNTH_SUSTAIN_LEVEL: f32 = 0.3;
pub const SYNTH_RELEASE_SEC: f64 = 0.3;
pub const SYNTH_VOICE_PEAK: f32 = 0.35; // per-voice peak gain before master
pub const SYNTH_MASTER_GAIN: f32 = 0.8;
pub const REVERB_SECONDS: f32 = 1.0;
pub const REVERB_WET: f32 = 0.5;
