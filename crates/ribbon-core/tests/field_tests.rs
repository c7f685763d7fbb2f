// Noise sampler, curve layout and per-frame displacement.

use ribbon_core::color::{ramp_color, shifted_hue};
use ribbon_core::*;

fn make_animation() -> Animation {
    Animation::new(FieldConfig::default(), Viewport::new(1280, 800, 1.0)).unwrap()
}

#[test]
fn noise_is_deterministic_per_seed() {
    for seed in [0u64, 1, 42, u64::MAX] {
        let a = NoiseField::new(seed);
        let b = NoiseField::new(seed);
        for i in 0..50 {
            let x = i as f32 * 0.37 - 5.0;
            let y = i as f32 * 0.11 + 2.0;
            assert_eq!(a.sample(x, y), a.sample(x, y));
            assert_eq!(a.sample(x, y), b.sample(x, y));
        }
    }
}

#[test]
fn noise_stays_in_unit_range_and_is_continuous() {
    let noise = NoiseField::new(7);
    for i in 0..200 {
        for j in 0..20 {
            let x = i as f32 * 0.173 - 17.0;
            let y = j as f32 * 0.291 - 3.0;
            let v = noise.sample(x, y);
            assert!((-1.0..=1.0).contains(&v), "sample {v} out of range");
            let near = noise.sample(x + 1e-3, y);
            assert!((v - near).abs() < 0.05, "jump {v} -> {near}");
        }
    }
}

#[test]
fn taper_boundaries() {
    let config = FieldConfig::default();
    assert_eq!(config.vertex_count, 180);
    assert_eq!(config.half_span, 30.0);
    assert_eq!(taper(30.0, 30.0), 0.0);
    assert_eq!(taper(-30.0, 30.0), 0.0);
    assert_eq!(taper(0.0, 30.0), 1.0);
    // Approaches 0 toward the ends and never goes negative past them.
    assert!(taper(29.9, 30.0) < 0.01);
    assert_eq!(taper(45.0, 30.0), 0.0);
}

#[test]
fn curves_are_laid_out_across_the_span() {
    let anim = make_animation();
    assert_eq!(anim.curves().len(), 12);
    for (i, curve) in anim.curves().iter().enumerate() {
        assert_eq!(curve.index(), i);
        let xs = curve.base_x();
        assert_eq!(xs.len(), 180);
        assert_eq!(xs[0], -30.0);
        assert_eq!(xs[90], 0.0);
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
        assert!(*xs.last().unwrap() < 30.0);
        assert!((180.0..260.0).contains(&curve.hue_seed()));
        assert!(curve.speed() >= 0.1 * 0.0002 && curve.speed() <= 1.1 * 0.0002);
    }
}

#[test]
fn base_x_is_invariant_across_frames() {
    let mut anim = make_animation();
    let before: Vec<Vec<f32>> = anim.curves().iter().map(|c| c.base_x().to_vec()).collect();
    anim.press();
    for f in 0..300 {
        if f == 150 {
            anim.release();
        }
        anim.advance(f as f64 * 16.0);
        for (curve, xs) in anim.curves().iter().zip(&before) {
            assert_eq!(curve.base_x(), xs.as_slice());
            for (p, x) in curve.positions().iter().zip(xs) {
                assert_eq!(p.x, *x);
            }
        }
    }
}

#[test]
fn displacement_is_bounded_by_taper() {
    let mut anim = make_animation();
    let amplitude = anim.config().amplitude;
    anim.advance(1234.0);
    for curve in anim.curves() {
        let first = curve.positions()[0];
        assert_eq!((first.y, first.z), (0.0, 0.0));
        for p in curve.positions() {
            let bound = taper(p.x, 30.0) * amplitude + 1e-4;
            assert!(p.y.abs() <= bound && p.z.abs() <= bound);
        }
    }
}

#[test]
fn vertical_and_depth_samples_are_decorrelated() {
    let mut anim = make_animation();
    let mut interior = 0usize;
    let mut diff_sum = 0.0f32;
    for f in 0..10 {
        anim.advance(f as f64 * 250.0);
        for curve in anim.curves() {
            for p in curve.positions() {
                if taper(p.x, 30.0) == 0.0 {
                    continue;
                }
                assert_ne!(p.y, p.z, "y and z read the same sample at x={}", p.x);
                interior += 1;
                diff_sum += (p.y - p.z).abs();
            }
        }
    }
    assert_eq!(interior, 10 * 12 * 179);
    // Independent channels drift apart by a sizeable fraction of the amplitude.
    assert!(diff_sum / interior as f32 > 0.1);
}

#[test]
fn same_seed_builds_the_same_field() {
    let config = FieldConfig::default().with_seed(9);
    let viewport = Viewport::new(800, 600, 2.0);
    let mut a = Animation::new(config.clone(), viewport).unwrap();
    let mut b = Animation::new(config, viewport).unwrap();
    a.advance(500.0);
    b.advance(500.0);
    for (ca, cb) in a.curves().iter().zip(b.curves()) {
        assert_eq!(ca.hue_seed(), cb.hue_seed());
        assert_eq!(ca.positions(), cb.positions());
    }
}

#[test]
fn initial_colours_follow_the_hue_ramp() {
    let anim = make_animation();
    for curve in anim.curves() {
        for (j, c) in curve.colors().iter().enumerate() {
            assert_eq!(*c, ramp_color(curve.hue_seed(), j));
        }
    }
}

#[test]
fn colours_refresh_while_pressed_at_most_every_interval() {
    let mut anim = make_animation();
    assert!(!anim.advance(0.0).color_refreshed);
    assert!(!anim.advance(200.0).color_refreshed, "released: no refresh");

    anim.press();
    // First pressed frame refreshes and stamps t=201.
    assert!(anim.advance(201.0).color_refreshed);
    for t in 202..=260 {
        assert!(!anim.advance(t as f64).color_refreshed);
    }
    let offset = anim.interaction().offset();
    assert!(offset > 0.0);
    assert!(anim.advance(302.0).color_refreshed);
    for curve in anim.curves() {
        let hue = shifted_hue(curve.hue_seed(), offset);
        assert_eq!(curve.colors()[0], ramp_color(hue, 0));
        assert_eq!(curve.colors()[179], ramp_color(hue, 179));
    }
    assert!(!anim.advance(350.0).color_refreshed);
}

#[test]
fn always_policy_refreshes_without_press() {
    let config = FieldConfig::default().with_color_policy(ColorRefreshPolicy::Always);
    let mut anim = Animation::new(config, Viewport::new(640, 480, 1.0)).unwrap();
    assert!(!anim.advance(50.0).color_refreshed);
    assert!(anim.advance(150.0).color_refreshed);
    assert!(!anim.advance(200.0).color_refreshed);
    assert!(anim.advance(251.0).color_refreshed);
}

#[test]
fn rotation_grows_with_elapsed_time() {
    let mut anim = make_animation();
    anim.advance(1000.0);
    assert_eq!(anim.rotation_x(), 0.0);
    anim.advance(2000.0);
    assert!((anim.rotation_x() - 0.3).abs() < 1e-6);
}

#[test]
fn dirty_flags_track_uploads() {
    let mut anim = make_animation();
    assert_eq!(
        anim.dirty(),
        DirtyFlags {
            positions: true,
            colors: true
        }
    );
    anim.clear_dirty();
    anim.advance(10.0);
    assert!(anim.dirty().positions);
    assert!(!anim.dirty().colors);
}

#[test]
fn invalid_config_is_rejected() {
    let mut config = FieldConfig::default();
    config.curve_count = 0;
    let err = Animation::new(config, Viewport::new(1, 1, 1.0)).err().unwrap();
    assert!(matches!(err, FieldError::InvalidConfig(_)));
}
