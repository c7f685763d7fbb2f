use ribbon_core::{CancelToken, FieldError, FieldResult, FrameCallback, FrameScheduler};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// `requestAnimationFrame` behind the core scheduler trait.
///
/// One JS closure lives as long as the scheduler; each request parks the
/// pending callback in `slot` and the closure takes it when the browser fires.
pub struct RafScheduler {
    window: web::Window,
    slot: Rc<RefCell<Option<FrameCallback>>>,
    tick: Closure<dyn FnMut(f64)>,
}

impl RafScheduler {
    pub fn new(window: web::Window) -> Self {
        let slot: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
        let pending = slot.clone();
        let tick = Closure::wrap(Box::new(move |now_ms: f64| {
            let callback = pending.borrow_mut().take();
            if let Some(callback) = callback {
                callback(now_ms);
            }
        }) as Box<dyn FnMut(f64)>);
        Self { window, slot, tick }
    }
}

impl FrameScheduler for RafScheduler {
    fn schedule(&self, callback: FrameCallback) -> FieldResult<CancelToken> {
        *self.slot.borrow_mut() = Some(callback);
        match self
            .window
            .request_animation_frame(self.tick.as_ref().unchecked_ref())
        {
            Ok(id) => Ok(CancelToken(id as u32 as u64)),
            Err(e) => {
                self.slot.borrow_mut().take();
                Err(FieldError::Scheduler(format!(
                    "request_animation_frame: {:?}",
                    e
                )))
            }
        }
    }

    fn cancel(&self, token: CancelToken) {
        if let Err(e) = self.window.cancel_animation_frame(token.0 as u32 as i32) {
            log::warn!("[raf] cancel_animation_frame failed: {:?}", e);
        }
        self.slot.borrow_mut().take();
    }
}

impl Drop for RafScheduler {
    fn drop(&mut self) {
        self.slot.borrow_mut().take();
    }
}
