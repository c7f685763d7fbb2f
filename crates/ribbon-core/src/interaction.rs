use crate::config::{FieldConfig, ReleaseMotion};

/// Pointer-driven offset velocity.
///
/// While pressed the velocity ramps up by `step` each frame, while released it
/// ramps down by the same step; it is clamped to `[0, max]`. The offset
/// accumulator integrates the velocity once per frame while pressed (and while
/// released only under [`ReleaseMotion::Coast`]) and never drops below `floor`.
#[derive(Clone, Debug)]
pub struct Interaction {
    pressed: bool,
    velocity: f32,
    offset: f32,
    step: f32,
    max: f32,
    floor: f32,
    release_motion: ReleaseMotion,
}

impl Interaction {
    pub fn new(config: &FieldConfig) -> Self {
        Self {
            pressed: false,
            velocity: 0.0,
            offset: config.offset_floor,
            step: config.velocity_step,
            // Unvalidated configs must not panic in `clamp`; NaN or negative caps collapse to 0.
            max: config.velocity_max.max(0.0),
            floor: config.offset_floor,
            release_motion: config.release_motion,
        }
    }

    pub fn press(&mut self) {
        self.pressed = true;
    }

    /// Pointer up or pointer leaving the tracked region.
    pub fn release(&mut self) {
        self.pressed = false;
    }

    /// Advance one frame; returns the offset increment applied.
    pub fn step(&mut self) -> f32 {
        let delta = if self.pressed { self.step } else { -self.step };
        self.velocity = (self.velocity + delta).clamp(0.0, self.max);
        let applied = match (self.pressed, self.release_motion) {
            (true, _) | (false, ReleaseMotion::Coast) => self.velocity,
            (false, ReleaseMotion::Hold) => 0.0,
        };
        let before = self.offset;
        self.offset = (self.offset + applied).max(self.floor);
        self.offset - before
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn max_velocity(&self) -> f32 {
        self.max
    }

    /// True while pressed and the velocity is still below its cap.
    pub fn is_accelerating(&self) -> bool {
        self.pressed && self.velocity < self.max
    }
}
