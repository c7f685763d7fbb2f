use crate::animation::DirtyFlags;
use crate::camera::{Camera, Viewport};
use crate::curve::Curve;

/// Read-only snapshot of one frame handed to the render surface.
pub struct FrameView<'a> {
    pub curves: &'a [Curve],
    pub camera: &'a Camera,
    pub rotation_x: f32,
    pub dirty: DirtyFlags,
}

impl FrameView<'_> {
    pub fn view_proj(&self) -> [[f32; 4]; 4] {
        self.camera.view_proj(self.rotation_x).to_cols_array_2d()
    }

    pub fn vertex_total(&self) -> usize {
        self.curves.iter().map(Curve::vertex_count).sum()
    }
}

/// Drawing target owned by a mounted background.
///
/// `release` must free every graphics resource; after it the surface is never
/// drawn again.
pub trait RenderSurface {
    fn resize(&mut self, viewport: Viewport);
    fn draw(&mut self, frame: &FrameView<'_>);
    fn release(&mut self);
}
