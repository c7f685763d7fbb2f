use crate::constants::*;
use crate::error::{FieldError, FieldResult};

/// When throttled colour refreshes are allowed to fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ColorRefreshPolicy {
    /// Refresh only while the pointer is held down.
    #[default]
    WhilePressed,
    /// Refresh on the throttle cadence regardless of pointer state.
    Always,
}

/// What the offset accumulator does after the pointer is released.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ReleaseMotion {
    /// The offset holds still; velocity still decays so a quick re-press
    /// resumes at speed.
    #[default]
    Hold,
    /// The offset keeps integrating the decaying velocity until it reaches 0.
    Coast,
}

#[derive(Clone, Debug)]
pub struct FieldConfig {
    pub curve_count: usize,
    pub vertex_count: usize,
    pub half_span: f32,
    pub amplitude: f32,
    pub index_noise_scale: f32,
    pub base_x_noise_scale: f32,
    pub depth_sample_shift: f32,
    pub rotation_rate: f32,
    pub velocity_step: f32,
    pub velocity_max: f32,
    pub offset_floor: f32,
    pub release_motion: ReleaseMotion,
    pub color_refresh_ms: f64,
    pub color_policy: ColorRefreshPolicy,
    pub seed: u64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            curve_count: CURVE_COUNT,
            vertex_count: VERTEX_COUNT,
            half_span: HALF_SPAN,
            amplitude: AMPLITUDE,
            index_noise_scale: INDEX_NOISE_SCALE,
            base_x_noise_scale: BASE_X_NOISE_SCALE,
            depth_sample_shift: DEPTH_SAMPLE_SHIFT,
            rotation_rate: ROTATION_RATE,
            velocity_step: VELOCITY_STEP,
            velocity_max: VELOCITY_MAX,
            offset_floor: OFFSET_FLOOR,
            release_motion: ReleaseMotion::default(),
            color_refresh_ms: COLOR_REFRESH_MS,
            color_policy: ColorRefreshPolicy::default(),
            seed: 42,
        }
    }
}

impl FieldConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_color_policy(mut self, policy: ColorRefreshPolicy) -> Self {
        self.color_policy = policy;
        self
    }

    pub fn with_release_motion(mut self, motion: ReleaseMotion) -> Self {
        self.release_motion = motion;
        self
    }

    pub fn validate(&self) -> FieldResult<()> {
        if self.curve_count == 0 {
            return Err(FieldError::InvalidConfig("curve_count must be > 0".into()));
        }
        if self.vertex_count < 2 {
            return Err(FieldError::InvalidConfig("vertex_count must be >= 2".into()));
        }
        let finite = [
            ("half_span", self.half_span),
            ("amplitude", self.amplitude),
            ("index_noise_scale", self.index_noise_scale),
            ("base_x_noise_scale", self.base_x_noise_scale),
            ("depth_sample_shift", self.depth_sample_shift),
            ("rotation_rate", self.rotation_rate),
            ("velocity_step", self.velocity_step),
            ("velocity_max", self.velocity_max),
            ("offset_floor", self.offset_floor),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(FieldError::InvalidConfig(format!("{name} must be finite")));
        }
        if self.half_span <= 0.0 {
            return Err(FieldError::InvalidConfig("half_span must be > 0".into()));
        }
        if self.velocity_step < 0.0 || self.velocity_max < 0.0 {
            return Err(FieldError::InvalidConfig(
                "velocity_step and velocity_max must be >= 0".into(),
            ));
        }
        if !(self.color_refresh_ms.is_finite() && self.color_refresh_ms > 0.0) {
            return Err(FieldError::InvalidConfig(
                "color_refresh_ms must be finite and > 0".into(),
            ));
        }
        Ok(())
    }
}
