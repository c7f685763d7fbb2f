// Pointer-driven velocity and offset accumulator.

use rand::prelude::*;
use ribbon_core::*;

fn make_interaction() -> Interaction {
    Interaction::new(&FieldConfig::default())
}

#[test]
fn velocity_stays_clamped_for_random_press_sequences() {
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut it = make_interaction();
        for _ in 0..2_000 {
            match rng.gen_range(0..3) {
                0 => it.press(),
                1 => it.release(),
                _ => {}
            }
            it.step();
            assert!(it.velocity() >= 0.0);
            assert!(it.velocity() <= it.max_velocity());
        }
    }
}

#[test]
fn offset_is_monotone_per_pointer_phase_and_respects_floor() {
    let mut config = FieldConfig::default();
    config.offset_floor = 5.0;
    let mut rng = StdRng::seed_from_u64(3);
    let mut it = Interaction::new(&config);
    assert_eq!(it.offset(), 5.0);
    for _ in 0..5_000 {
        if rng.gen_bool(0.02) {
            if it.pressed() {
                it.release();
            } else {
                it.press();
            }
        }
        let before = it.offset();
        let delta = it.step();
        if it.pressed() {
            assert!(it.offset() >= before);
        } else {
            assert!(it.offset() <= before);
        }
        assert!(delta >= 0.0);
        assert!(it.offset() >= 5.0);
    }
}

#[test]
fn press_then_release_hundred_frames_each() {
    let mut it = make_interaction();
    it.press();
    for _ in 0..100 {
        it.step();
    }
    assert!((it.velocity() - it.max_velocity()).abs() < 1e-6);
    let pressed_offset = it.offset();
    assert!(pressed_offset > 0.0);

    it.release();
    let mut offsets = Vec::new();
    for _ in 0..100 {
        it.step();
        offsets.push(it.offset());
    }
    assert_eq!(it.velocity(), 0.0);
    assert!(offsets.iter().all(|&o| o == pressed_offset));
}

#[test]
fn coasting_release_drifts_then_stops() {
    let config = FieldConfig::default().with_release_motion(ReleaseMotion::Coast);
    let mut it = Interaction::new(&config);
    it.press();
    for _ in 0..100 {
        it.step();
    }
    let pressed_offset = it.offset();

    it.release();
    let mut offsets = Vec::new();
    for _ in 0..100 {
        it.step();
        offsets.push(it.offset());
    }
    assert_eq!(it.velocity(), 0.0);
    assert!(offsets[0] > pressed_offset);
    assert!(offsets.windows(2).all(|w| w[1] >= w[0]));
    // Velocity hits zero within max/step frames; the tail is flat.
    let tail = &offsets[80..];
    assert!(tail.iter().all(|&o| o == tail[0]));
}

#[test]
fn velocity_ramps_by_one_step_per_frame() {
    let mut it = make_interaction();
    it.press();
    it.step();
    assert!((it.velocity() - 0.001).abs() < 1e-7);
    assert!(it.is_accelerating());
    it.release();
    it.step();
    assert_eq!(it.velocity(), 0.0);
    assert!(!it.is_accelerating());
    // Released from rest: nothing moves.
    let o = it.offset();
    assert_eq!(it.step(), 0.0);
    assert_eq!(it.offset(), o);
}

#[test]
fn unvalidated_caps_do_not_panic() {
    for cap in [-1.0, f32::NAN] {
        let mut config = FieldConfig::default();
        config.velocity_max = cap;
        let mut it = Interaction::new(&config);
        it.press();
        for _ in 0..10 {
            it.step();
            assert_eq!(it.velocity(), 0.0);
            assert_eq!(it.offset(), 0.0);
        }
        assert_eq!(it.max_velocity(), 0.0);
    }
}
