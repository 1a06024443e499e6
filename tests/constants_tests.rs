// Host-side tests for constants and their relationships.

use starry_piano::constants::*;
use starry_piano::core::SceneParams;

#[test]
#[allow(clippy::assertions_on_constants)]
fn star_ranges_are_ordered_and_positive() {
    assert!(STAR_COUNT > 0);
    assert!(STAR_SIZE_MIN > 0.0 && STAR_SIZE_MIN < STAR_SIZE_MAX);
    assert!(STAR_BRIGHTNESS_MIN > 0.0 && STAR_BRIGHTNESS_MIN < STAR_BRIGHTNESS_MAX);
    assert!(STAR_BRIGHTNESS_MAX <= 1.0, "brightness is used as alpha");
    assert!(STAR_TWINKLE_SPEED_MIN < STAR_TWINKLE_SPEED_MAX);

    // Halo threshold must split the size range or no star (or every star) glows
    assert!(STAR_HALO_SIZE_THRESHOLD > STAR_SIZE_MIN);
    assert!(STAR_HALO_SIZE_THRESHOLD < STAR_SIZE_MAX);
    assert!(STAR_HALO_ALPHA_SCALE * STAR_BRIGHTNESS_MAX <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn shooting_star_ranges_are_sane() {
    assert!(SHOOTING_STAR_SPAWN_PROBABILITY > 0.0 && SHOOTING_STAR_SPAWN_PROBABILITY < 1.0);
    assert!(SHOOTING_STAR_LENGTH_MIN < SHOOTING_STAR_LENGTH_MAX);
    assert!(SHOOTING_STAR_SPEED_MIN > 0.0 && SHOOTING_STAR_SPEED_MIN < SHOOTING_STAR_SPEED_MAX);
    // Streaks always head down and to the right
    assert!(SHOOTING_STAR_ANGLE_MIN > 0.0);
    assert!(SHOOTING_STAR_ANGLE_MAX <= std::f32::consts::FRAC_PI_2);
    // A streak lives for at most 1/fade ticks
    let max_ticks = (1.0 / SHOOTING_STAR_FADE_PER_TICK).round() as u32;
    assert_eq!(max_ticks, 100);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn burst_fits_inside_particle_lifetime() {
    let burst_span = BURST_STAGGER_MS * (BURST_PARTICLE_COUNT as f64 - 1.0);
    assert!(burst_span < PARTICLE_LIFETIME_MS);
    assert!(PARTICLE_SIZE_MIN < PARTICLE_SIZE_MAX);
    assert!(PARTICLE_JITTER_X > 0.0 && PARTICLE_DRIFT_X > 0.0);
    assert!(NOTE_DURATION_MS < PARTICLE_LIFETIME_MS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn black_keys_straddle_white_key_boundary() {
    // A 30px black key centred on the seam between two 50px white keys
    assert!(BLACK_KEY_OFFSET_PX < WHITE_KEY_PITCH_PX);
    assert!((BLACK_KEY_OFFSET_PX + 15.0 - WHITE_KEY_PITCH_PX).abs() < 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn synth_envelope_fits_note_duration() {
    assert!(SYNTH_SUSTAIN_LEVEL > 0.0 && SYNTH_SUSTAIN_LEVEL < 1.0);
    let attack_decay_ms = (SYNTH_ATTACK_SEC + SYNTH_DECAY_SEC) * 1000.0;
    assert!(attack_decay_ms < NOTE_DURATION_MS);
    assert!(SYNTH_RELEASE_SEC > 0.0);
    assert!(SYNTH_VOICE_PEAK * SYNTH_MASTER_GAIN <= 1.0);
    assert!(REVERB_WET > 0.0 && REVERB_WET <= 1.0);
    assert!(REVERB_SECONDS > 0.0);
}

#[test]
fn scene_params_default_to_the_shipped_constants() {
    let p = SceneParams::default();
    assert_eq!(p.star_count, STAR_COUNT);
    assert_eq!(p.shooting_star_probability, SHOOTING_STAR_SPAWN_PROBABILITY);
    assert_eq!(p.note_duration_ms, NOTE_DURATION_MS);
    assert_eq!(p.burst_count, BURST_PARTICLE_COUNT);
    assert_eq!(p.burst_stagger_ms, BURST_STAGGER_MS);
    assert_eq!(p.particle_lifetime_ms, PARTICLE_LIFETIME_MS);
}
