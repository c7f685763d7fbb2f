//! Viewport and camera types shared with the frontends.
//!
//! These avoid platform-specific APIs; hosts fill a [`Viewport`] from their
//! window/canvas and the renderer derives its matrices from [`Camera`].

use crate::constants::{CAMERA_FOVY_DEG, CAMERA_Z, CAMERA_ZFAR, CAMERA_ZNEAR, MAX_PIXEL_RATIO};
use glam::{Mat4, Vec3};

/// Logical drawing area plus the device pixel ratio reported by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }

    /// Ratio used for the backing store: high-density displays render at 2x, everything else at 1x.
    pub fn pixel_ratio(&self) -> f32 {
        if self.device_pixel_ratio > 1.0 {
            MAX_PIXEL_RATIO
        } else {
            1.0
        }
    }

    /// Backing-store size in physical pixels, never zero.
    pub fn physical_size(&self) -> (u32, u32) {
        let r = self.pixel_ratio();
        (
            ((self.width as f32 * r) as u32).max(1),
            ((self.height as f32 * r) as u32).max(1),
        )
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn for_viewport(viewport: &Viewport) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_Z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: viewport.aspect(),
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Projection * view * scene rotation about X.
    pub fn view_proj(&self, scene_rotation_x: f32) -> Mat4 {
        self.projection_matrix() * self.view_matrix() * Mat4::from_rotation_x(scene_rotation_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_is_capped_at_two() {
        assert_eq!(Viewport::new(100, 50, 1.0).pixel_ratio(), 1.0);
        assert_eq!(Viewport::new(100, 50, 0.75).pixel_ratio(), 1.0);
        assert_eq!(Viewport::new(100, 50, 1.5).pixel_ratio(), 2.0);
        assert_eq!(Viewport::new(100, 50, 3.0).physical_size(), (200, 100));
    }

    #[test]
    fn zero_sized_viewport_is_safe() {
        let v = Viewport::new(0, 0, 1.0);
        assert_eq!(v.physical_size(), (1, 1));
        assert!(v.aspect().is_finite());
    }
}
