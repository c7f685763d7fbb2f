use ribbon_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("#{id} is not a canvas: {:?}", e))
}

/// Layout size of the window in CSS pixels plus the device pixel ratio.
pub fn window_viewport(window: &web::Window) -> Viewport {
    let css = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    Viewport::new(
        css(window.inner_width()),
        css(window.inner_height()),
        window.device_pixel_ratio() as f32,
    )
}

/// Backing store follows the capped pixel ratio; CSS size follows the layout size.
pub fn apply_canvas_size(canvas: &web::HtmlCanvasElement, viewport: Viewport) {
    let (w, h) = viewport.physical_size();
    canvas.set_width(w);
    canvas.set_height(h);
    // Only the size properties; the host page owns the rest of the inline style.
    let style = canvas.style();
    for (name, px) in [("width", viewport.width), ("height", viewport.height)] {
        if let Err(e) = style.set_property(name, &format!("{px}px")) {
            log::warn!("[dom] canvas {name}: {:?}", e);
        }
    }
}

/// Per-mount seed for hue and speed draws.
pub fn random_seed() -> u64 {
    let hi = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let lo = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (hi << 32) | lo
}
