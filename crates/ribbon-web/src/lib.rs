#![cfg(target_arch = "wasm32")]
use ribbon_core::{Background, FieldConfig, FieldError};
use ribbon_render::GpuState;
use wasm_bindgen::prelude::*;

mod dom;
mod frame;
mod host;
mod overlay;
mod surface;

use frame::RafScheduler;
use host::DomEventHost;
use surface::CanvasSurface;

type WebBackground = Background<RafScheduler, DomEventHost, CanvasSurface>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ribbon-web starting");
    Ok(())
}

/// A mounted background. Dropping the handle on the JS side (`free()`) also
/// unmounts it.
#[wasm_bindgen]
pub struct BackgroundHandle {
    inner: Option<WebBackground>,
}

#[wasm_bindgen]
impl BackgroundHandle {
    /// Stop animating, remove every listener and release the GPU surface.
    /// Calling it again is a no-op.
    pub fn unmount(&mut self) {
        if let Some(mut background) = self.inner.take() {
            background.unmount();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.inner.as_ref().is_some_and(|b| b.is_mounted())
    }

    /// Current noise-space offset; grows while the pointer is held.
    #[wasm_bindgen(getter)]
    pub fn offset(&self) -> f32 {
        self.inner
            .as_ref()
            .map(|b| b.animation().interaction().offset())
            .unwrap_or(0.0)
    }
}

impl Drop for BackgroundHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Mount the ribbon field on the canvas with id `canvas_id`.
#[wasm_bindgen]
pub async fn mount(canvas_id: String) -> Result<BackgroundHandle, JsValue> {
    init(&canvas_id).await.map_err(|e| {
        log::error!("mount error: {:?}", e);
        JsValue::from_str(&format!("{e:#}"))
    })
}

async fn init(canvas_id: &str) -> anyhow::Result<BackgroundHandle> {
    let (window, document) =
        dom::window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;

    let viewport = dom::window_viewport(&window);
    dom::apply_canvas_size(&canvas, viewport);
    let (width, height) = viewport.physical_size();

    let config = FieldConfig::default().with_seed(dom::random_seed());
    let vertex_capacity = config.curve_count * config.vertex_count;
    let target = wgpu::SurfaceTarget::Canvas(canvas.clone());
    let gpu = GpuState::new(target, width, height, vertex_capacity)
        .await
        .map_err(|e| FieldError::SurfaceUnavailable(format!("{e:#}")))?;

    let surface = CanvasSurface::new(document.clone(), canvas, gpu);
    let background = Background::mount(
        config,
        RafScheduler::new(window.clone()),
        DomEventHost::new(window, document),
        surface,
        viewport,
    )?;

    Ok(BackgroundHandle {
        inner: Some(background),
    })
}
