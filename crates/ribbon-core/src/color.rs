use crate::constants::{HUE_PER_OFFSET, HUE_PER_VERTEX, LIGHTNESS, SATURATION};

/// Convert HSL (hue in degrees, any range; saturation/lightness in \[0, 1\]) to RGB.
pub fn hsl_to_rgb(hue_deg: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue_deg.rem_euclid(360.0) / 360.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    if s <= 0.0 {
        return [l, l, l];
    }
    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    ]
}

#[inline]
fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Hue rotation along a curve: vertex `index` sits `HUE_PER_VERTEX` degrees past `base_hue`.
#[inline]
pub fn ramp_color(base_hue: f32, index: usize) -> [f32; 3] {
    hsl_to_rgb(index as f32 * HUE_PER_VERTEX + base_hue, SATURATION, LIGHTNESS)
}

/// Base hue of a curve after the offset accumulator has shifted it.
///
/// Uses a truncating remainder so the shift folds back toward the seed hue as
/// the offset grows past it, then takes the magnitude.
#[inline]
pub fn shifted_hue(hue_seed: f32, offset: f32) -> f32 {
    ((hue_seed - offset * HUE_PER_OFFSET) % 360.0).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn primary_hues() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
        assert!(close(hsl_to_rgb(120.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
        assert!(close(hsl_to_rgb(240.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
        assert!(close(hsl_to_rgb(360.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
    }

    #[test]
    fn pastel_channels_stay_light() {
        for h in (0..360).step_by(15) {
            let c = hsl_to_rgb(h as f32, SATURATION, LIGHTNESS);
            for ch in c {
                assert!((0.49..=0.92).contains(&ch), "hue {h} channel {ch}");
            }
        }
    }

    #[test]
    fn shifted_hue_matches_seed_at_zero_offset() {
        assert_eq!(shifted_hue(200.0, 0.0), 200.0);
        assert!((shifted_hue(200.0, 30.0) - 100.0).abs() < 1e-4);
        assert!((shifted_hue(200.0, 60.0) - 40.0).abs() < 1e-3);
    }
}
