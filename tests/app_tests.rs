// Host-side tests for the application context: init, resize, input, ticking
// and shutdown driven through a manual clock.

mod common;

use common::{Call, Op, RecordingSurface, RecordingSynth};
use starry_piano::constants::*;
use starry_piano::core::{
    AppContext, Bounds, Clock, EngineState, FrameReport, ManualClock, ParticleChange, PianoError,
    Rect, SceneParams, Strike,
};

const KEY: Rect = Rect {
    left: 100.0,
    top: 500.0,
    width: 50.0,
    height: 200.0,
};

fn quiet_params() -> SceneParams {
    SceneParams {
        shooting_star_probability: 0.0,
        seed: 7,
        ..SceneParams::default()
    }
}

fn ready_app() -> AppContext<RecordingSynth> {
    let mut app = AppContext::init(quiet_params(), Bounds::new(800.0, 600.0));
    app.attach_synth(RecordingSynth::default());
    app
}

fn calls(app: &AppContext<RecordingSynth>) -> &[Call] {
    &app.notes().synth().expect("synth attached").calls
}

#[test]
fn init_fills_the_viewport_with_stars() {
    let app: AppContext<RecordingSynth> =
        AppContext::init(SceneParams::default(), Bounds::new(800.0, 600.0));
    assert_eq!(app.stars().len(), STAR_COUNT);
    assert!(app
        .stars()
        .stars()
        .iter()
        .all(|s| app.bounds().contains(s.pos.x, s.pos.y)));
    assert_eq!(app.audio_state(), &EngineState::Uninitialized);
    assert!(app.is_running());
}

#[test]
fn resize_regenerates_stars_inside_new_bounds() {
    let mut app: AppContext<RecordingSynth> =
        AppContext::init(quiet_params(), Bounds::new(1920.0, 1080.0));
    let small = Bounds::new(320.0, 240.0);
    app.on_resize(small);
    assert_eq!(app.bounds(), small);
    assert_eq!(app.stars().len(), STAR_COUNT);
    assert!(app
        .stars()
        .stars()
        .iter()
        .all(|s| small.contains(s.pos.x, s.pos.y)));
}

#[test]
fn press_before_audio_is_ready_is_dropped() {
    let mut app: AppContext<RecordingSynth> =
        AppContext::init(quiet_params(), Bounds::new(800.0, 600.0));
    let err = app.press("C4", KEY, 0.0).unwrap_err();
    assert_eq!(
        err,
        PianoError::AudioNotReady {
            note: "C4".to_string()
        }
    );
    assert!(!app.is_key_active("C4"));
    assert_eq!(app.particles().pending(), 0, "no smoke for a dropped strike");

    // Nothing was queued: attaching later does not replay the strike
    app.attach_synth(RecordingSynth::default());
    assert!(calls(&app).is_empty());
}

#[test]
fn press_after_audio_failure_reports_reason() {
    let mut app: AppContext<RecordingSynth> =
        AppContext::init(quiet_params(), Bounds::new(800.0, 600.0));
    app.mark_audio_failed("no audio device");
    match app.press("A4", KEY, 0.0) {
        Err(PianoError::AudioUnavailable { note, reason }) => {
            assert_eq!(note, "A4");
            assert_eq!(reason, "no audio device");
        }
        other => panic!("expected AudioUnavailable, got {:?}", other),
    }
}

#[test]
fn press_lights_key_and_releases_after_note_duration() {
    let clock = ManualClock::new(0.0);
    let mut app = ready_app();
    assert_eq!(app.press("E4", KEY, clock.now_ms()), Ok(Strike::Fresh));
    assert!(app.is_key_active("E4"));
    assert_eq!(app.particles().pending(), BURST_PARTICLE_COUNT);

    clock.advance(NOTE_DURATION_MS - 1.0);
    let report = app.tick(clock.now_ms());
    assert!(report.released.is_empty());
    assert!(app.is_key_active("E4"));

    clock.advance(1.0);
    let report = app.tick(clock.now_ms());
    assert_eq!(report.released, vec!["E4"]);
    assert!(!app.is_key_active("E4"));
    assert_eq!(calls(&app), &[Call::Attack("E4"), Call::Release("E4")]);
}

#[test]
fn restrike_keeps_a_single_release_timer() {
    let mut app = ready_app();
    app.press("G4", KEY, 0.0).unwrap();
    assert_eq!(app.press("G4", KEY, 600.0), Ok(Strike::Restruck));
    assert_eq!(app.notes().pending_releases(), 1);

    assert!(app.tick(1_000.0).released.is_empty(), "first deadline was cancelled");
    assert!(app.is_key_active("G4"));
    assert_eq!(app.tick(1_600.0).released, vec!["G4"]);
    assert_eq!(app.notes().synth().unwrap().releases_of("G4"), 2);
    assert_eq!(app.notes().synth().unwrap().attacks_of("G4"), 2);
}

#[test]
fn smoke_appears_through_tick_reports() {
    let mut app = ready_app();
    app.press("C5", KEY, 0.0).unwrap();

    let appeared = |report: &FrameReport| {
        report
            .particles
            .iter()
            .filter(|c| matches!(c, ParticleChange::Appeared(_)))
            .count()
    };

    assert_eq!(appeared(&app.tick(0.0)), 1, "first puff is immediate");
    assert_eq!(appeared(&app.tick(BURST_STAGGER_MS * 3.0)), 3);
    assert_eq!(appeared(&app.tick(1_000.0)), BURST_PARTICLE_COUNT - 4);
    assert_eq!(app.particles().live().len(), BURST_PARTICLE_COUNT);

    let report = app.tick(PARTICLE_LIFETIME_MS + 1_000.0);
    let expired = report
        .particles
        .iter()
        .filter(|c| matches!(c, ParticleChange::Expired(_)))
        .count();
    assert_eq!(expired, BURST_PARTICLE_COUNT);
    assert!(app.particles().live().is_empty());

    assert!(app.tick(5_000.0).particles.is_empty());
}

#[test]
fn smoke_is_anchored_above_the_key() {
    let mut app = ready_app();
    app.press("D4", KEY, 0.0).unwrap();
    app.tick(1_000.0);
    for p in app.particles().live() {
        assert!((p.x - KEY.center_x()).abs() <= PARTICLE_JITTER_X);
        assert!(p.y <= KEY.top && p.y >= KEY.top - PARTICLE_RISE_MAX);
    }
}

#[test]
fn unknown_note_is_rejected() {
    let mut app = ready_app();
    assert_eq!(
        app.press("C9", KEY, 0.0),
        Err(PianoError::UnknownNote("C9".to_string()))
    );
    assert!(calls(&app).is_empty());
}

#[test]
fn physical_key_presses_map_to_notes() {
    let mut app = ready_app();
    let anchor = |_: &'static str| Some(KEY);

    assert_eq!(
        app.press_physical("A", false, anchor, 0.0),
        Some(("C4", Ok(Strike::Fresh)))
    );
    assert!(app.is_key_active("C4"));
    assert_eq!(app.press_physical("a", true, anchor, 10.0), None, "auto-repeat ignored");
    assert_eq!(app.press_physical("q", false, anchor, 10.0), None);
    assert_eq!(app.press_physical("w", false, |_| None, 10.0), None);
    assert!(!app.notes().is_sounding("C#4"));
    assert_eq!(calls(&app), &[Call::Attack("C4")]);
}

#[test]
fn explicit_stop_releases_early() {
    let mut app = ready_app();
    app.press("B4", KEY, 0.0).unwrap();
    assert!(app.stop("B4"));
    assert!(!app.is_key_active("B4"));
    assert!(!app.stop("B4"));
    assert!(!app.stop("nonsense"));
    assert!(app.tick(2_000.0).released.is_empty());
}

#[test]
fn shutdown_releases_everything_once_and_stops_ticking() {
    let mut app = ready_app();
    app.press("C4", KEY, 0.0).unwrap();
    app.press("F#4", KEY, 10.0).unwrap();
    app.tick(100.0);

    let report = app.shutdown();
    assert_eq!(report.released, vec!["C4", "F#4"]);
    assert!(!report.particles.is_empty());
    assert!(!app.is_running());
    assert!(!app.is_key_active("C4"));
    assert_eq!(app.notes().pending_releases(), 0);
    assert_eq!(app.particles().pending(), 0);

    assert_eq!(app.tick(5_000.0), FrameReport::default());
    assert_eq!(app.press("C4", KEY, 5_000.0), Err(PianoError::ShutDown));
    let synth = app.notes().synth().unwrap();
    assert_eq!(synth.releases_of("C4"), 1);
    assert_eq!(synth.releases_of("F#4"), 1);
}

#[test]
fn paint_draws_background_nebulae_then_stars() {
    let app = ready_app();
    let mut surface = RecordingSurface::default();
    app.paint(&mut surface);

    assert_eq!(surface.ops[0], Op::Background(BACKGROUND_COLOR.to_string()));
    assert!(matches!(surface.ops[1], Op::Radial { .. }));
    assert!(matches!(surface.ops[2], Op::Radial { .. }));
    assert!(surface.ops[3..]
        .iter()
        .all(|op| matches!(op, Op::Circle { .. })));

    let halos = app.stars().stars().iter().filter(|s| s.halo().is_some()).count();
    assert_eq!(surface.circles().count(), STAR_COUNT + halos);
}

#[test]
fn shooting_stars_spawn_at_configured_rate() {
    let mut app: AppContext<RecordingSynth> = AppContext::init(
        SceneParams {
            shooting_star_probability: 1.0,
            ..SceneParams::default()
        },
        Bounds::new(800.0, 600.0),
    );
    for frame in 1..=5 {
        assert!(app.tick(frame as f64 * 16.0).spawned_shooting_star);
    }
    assert!(!app.shooting_stars().live().is_empty());

    let mut surface = RecordingSurface::default();
    app.paint(&mut surface);
    assert!(matches!(surface.ops.last(), Some(Op::Line { .. })));
}

#[test]
fn notes_release_on_time_without_frames() {
    let clock = ManualClock::new(0.0);
    let mut app = ready_app();
    app.press("C4", KEY, clock.now_ms()).unwrap();
    app.press("E4", KEY, 200.0).unwrap();
    assert_eq!(app.next_release_ms(), Some(NOTE_DURATION_MS));

    // No tick at all: a timer firing at the deadline is enough
    clock.set(NOTE_DURATION_MS);
    assert_eq!(app.release_due(clock.now_ms()), vec!["C4"]);
    assert_eq!(calls(&app), &[Call::Attack("C4"), Call::Attack("E4"), Call::Release("C4")]);
    assert!(!app.is_key_active("C4"));
    assert!(app.is_key_active("E4"));
    assert_eq!(app.next_release_ms(), Some(NOTE_DURATION_MS + 200.0));

    // A late timer after a long gap releases what is left, exactly once
    clock.set(60_000.0);
    assert_eq!(app.release_due(clock.now_ms()), vec!["E4"]);
    assert!(app.release_due(clock.now_ms()).is_empty());
    assert!(app.tick(clock.now_ms()).released.is_empty());
    assert_eq!(app.next_release_ms(), None);
}

#[test]
fn release_due_is_inert_after_shutdown() {
    let mut app = ready_app();
    app.press("C4", KEY, 0.0).unwrap();
    app.shutdown();
    assert!(app.release_due(5_000.0).is_empty());
    assert_eq!(app.notes().synth().unwrap().releases_of("C4"), 1);
}
