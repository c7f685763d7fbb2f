use crate::dom;
use ribbon_core::{EventHandler, EventHost, FieldError, FieldResult, HostEvent, HostSignal};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Window and document listeners behind the core event host trait.
pub struct DomEventHost {
    window: web::Window,
    document: web::Document,
}

/// Everything needed to remove one listener again.
pub struct DomSubscription {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl DomEventHost {
    pub fn new(window: web::Window, document: web::Document) -> Self {
        Self { window, document }
    }

    fn target_for(&self, event: HostEvent) -> FieldResult<(web::EventTarget, &'static str)> {
        Ok(match event {
            HostEvent::PointerDown => (self.window.clone().into(), "pointerdown"),
            HostEvent::PointerUp => (self.window.clone().into(), "pointerup"),
            // pointerleave does not bubble; on the root element it fires when
            // the pointer leaves the page.
            HostEvent::PointerLeave => {
                let root = self
                    .document
                    .document_element()
                    .ok_or_else(|| FieldError::Host("document has no root element".into()))?;
                (root.into(), "pointerleave")
            }
            HostEvent::Resize => (self.window.clone().into(), "resize"),
        })
    }
}

impl EventHost for DomEventHost {
    type Subscription = DomSubscription;

    fn subscribe(
        &self,
        event: HostEvent,
        mut handler: EventHandler,
    ) -> FieldResult<DomSubscription> {
        let (target, kind) = self.target_for(event)?;
        let window = self.window.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
            let signal = match event {
                HostEvent::PointerDown => HostSignal::PointerDown,
                HostEvent::PointerUp => HostSignal::PointerUp,
                HostEvent::PointerLeave => HostSignal::PointerLeave,
                HostEvent::Resize => HostSignal::Resize(dom::window_viewport(&window)),
            };
            handler(signal);
        }) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(|e| FieldError::Host(format!("{kind}: {:?}", e)))?;
        log::debug!("[events] listening for {kind}");
        Ok(DomSubscription {
            target,
            kind,
            closure,
        })
    }

    fn unsubscribe(&self, subscription: DomSubscription) {
        let DomSubscription {
            target,
            kind,
            closure,
        } = subscription;
        if let Err(e) =
            target.remove_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        {
            log::warn!("[events] could not remove {kind} listener: {:?}", e);
        }
    }
}
