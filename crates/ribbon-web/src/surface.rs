use crate::{dom, overlay};
use ribbon_core::{FrameView, RenderSurface, Viewport};
use ribbon_render::GpuState;
use web_sys as web;

/// The page canvas plus the GPU state presenting into it. The hint overlay
/// lives exactly as long as the surface: shown on creation, removed on release.
pub struct CanvasSurface {
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    gpu: GpuState<'static>,
}

impl CanvasSurface {
    pub fn new(
        document: web::Document,
        canvas: web::HtmlCanvasElement,
        gpu: GpuState<'static>,
    ) -> Self {
        overlay::show(&document, &canvas);
        Self {
            document,
            canvas,
            gpu,
        }
    }
}

impl RenderSurface for CanvasSurface {
    fn resize(&mut self, viewport: Viewport) {
        dom::apply_canvas_size(&self.canvas, viewport);
        self.gpu.resize(viewport);
    }

    fn draw(&mut self, frame: &FrameView<'_>) {
        self.gpu.draw(frame);
    }

    fn release(&mut self) {
        self.gpu.release();
        overlay::remove(&self.document);
    }
}
