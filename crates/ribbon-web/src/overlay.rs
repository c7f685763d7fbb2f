use wasm_bindgen::JsCast;
use web_sys as web;

const HINT_ID: &str = "press-hint";
const HINT_TEXT: &str = "Press down";
const HINT_STYLE: &str = "position:fixed;left:0;right:0;bottom:2rem;margin:0;text-align:center;\
color:rgba(255,255,255,0.6);font:500 1rem sans-serif;letter-spacing:0.2em;\
text-transform:uppercase;pointer-events:none;user-select:none";

/// Shows the hint next to `canvas`, creating it on first use.
pub fn show(document: &web::Document, canvas: &web::HtmlCanvasElement) {
    if let Some(el) = document.get_element_by_id(HINT_ID) {
        let _ = el.set_attribute("style", HINT_STYLE);
        return;
    }
    let Ok(el) = document.create_element("h2") else {
        log::warn!("[overlay] could not create hint element");
        return;
    };
    el.set_id(HINT_ID);
    el.set_text_content(Some(HINT_TEXT));
    let _ = el.set_attribute("style", HINT_STYLE);
    let parent: Option<web::Node> = canvas
        .parent_node()
        .or_else(|| document.body().map(|b| b.unchecked_into()));
    if let Some(parent) = parent {
        let _ = parent.append_child(&el);
    }
}

/// Removes the hint entirely; used on unmount.
#[inline]
pub fn remove(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HINT_ID) {
        el.remove();
    }
}
