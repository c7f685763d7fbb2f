use crate::color::ramp_color;
use crate::config::FieldConfig;
use crate::constants::{HUE_SEED_MIN, HUE_SEED_SPAN, SPEED_FLOOR, SPEED_SCALE};
use glam::Vec3;
use rand::Rng;

/// Displacement falloff toward the curve ends: 1 at the centre, 0 at `±half_span`.
#[inline]
pub fn taper(base_x: f32, half_span: f32) -> f32 {
    (1.0 - (base_x / half_span).abs()).clamp(0.0, 1.0)
}

/// One polyline of the field.
///
/// Vertex count and base X never change after construction; the renderer
/// only sees Y/Z displacement and colours move.
#[derive(Clone, Debug)]
pub struct Curve {
    index: usize,
    hue_seed: f32,
    speed: f32,
    base_x: Vec<f32>,
    positions: Vec<Vec3>,
    colors: Vec<[f32; 3]>,
}

impl Curve {
    pub fn new<R: Rng + ?Sized>(index: usize, config: &FieldConfig, rng: &mut R) -> Self {
        let n = config.vertex_count;
        let span = config.half_span * 2.0;
        let hue_seed = (rng.gen::<f32>() * HUE_SEED_SPAN + HUE_SEED_MIN).floor();
        let speed = (rng.gen::<f32>() + SPEED_FLOOR) * SPEED_SCALE;

        let base_x: Vec<f32> = (0..n)
            .map(|j| j as f32 / n as f32 * span - config.half_span)
            .collect();
        let positions = base_x.iter().map(|&x| Vec3::new(x, 0.0, 0.0)).collect();
        let colors = (0..n).map(|j| ramp_color(hue_seed, j)).collect();

        Self {
            index,
            hue_seed,
            speed,
            base_x,
            positions,
            colors,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn hue_seed(&self) -> f32 {
        self.hue_seed
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn vertex_count(&self) -> usize {
        self.base_x.len()
    }

    pub fn base_x(&self) -> &[f32] {
        &self.base_x
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Rewrite Y/Z of every vertex from `f(index, base_x)`; X is always the base X.
    pub(crate) fn displace(&mut self, mut f: impl FnMut(usize, f32) -> (f32, f32)) {
        for (j, (p, &x)) in self.positions.iter_mut().zip(&self.base_x).enumerate() {
            let (y, z) = f(j, x);
            *p = Vec3::new(x, y, z);
        }
    }

    /// Recolour every vertex from a (possibly shifted) base hue.
    pub(crate) fn recolor(&mut self, base_hue: f32) {
        for (j, c) in self.colors.iter_mut().enumerate() {
            *c = ramp_color(base_hue, j);
        }
    }
}
