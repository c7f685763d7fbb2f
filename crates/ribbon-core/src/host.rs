use crate::camera::Viewport;
use crate::error::FieldResult;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Host notifications the background listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostEvent {
    PointerDown,
    PointerUp,
    PointerLeave,
    Resize,
}

impl HostEvent {
    pub const ALL: [HostEvent; 4] = [
        HostEvent::PointerDown,
        HostEvent::PointerUp,
        HostEvent::PointerLeave,
        HostEvent::Resize,
    ];
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostSignal {
    PointerDown,
    PointerUp,
    PointerLeave,
    Resize(Viewport),
}

impl HostSignal {
    pub fn kind(&self) -> HostEvent {
        match self {
            HostSignal::PointerDown => HostEvent::PointerDown,
            HostSignal::PointerUp => HostEvent::PointerUp,
            HostSignal::PointerLeave => HostEvent::PointerLeave,
            HostSignal::Resize(_) => HostEvent::Resize,
        }
    }
}

pub type EventHandler = Box<dyn FnMut(HostSignal)>;

/// Event registration seam. Every subscription handed out must be passed
/// back to `unsubscribe` exactly once.
pub trait EventHost {
    type Subscription;

    fn subscribe(&self, event: HostEvent, handler: EventHandler)
        -> FieldResult<Self::Subscription>;
    fn unsubscribe(&self, subscription: Self::Subscription);
}

impl<H: EventHost + ?Sized> EventHost for Rc<H> {
    type Subscription = H::Subscription;

    fn subscribe(
        &self,
        event: HostEvent,
        handler: EventHandler,
    ) -> FieldResult<Self::Subscription> {
        (**self).subscribe(event, handler)
    }

    fn unsubscribe(&self, subscription: Self::Subscription) {
        (**self).unsubscribe(subscription)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct LocalSubscription(u64);

/// In-process event host: the owner feeds signals through [`LocalEventHost::dispatch`].
#[derive(Default)]
pub struct LocalEventHost {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(u64, HostEvent, Rc<RefCell<EventHandler>>)>>,
}

impl LocalEventHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `signal` to every matching subscriber; returns how many were called.
    pub fn dispatch(&self, signal: HostSignal) -> usize {
        let kind = signal.kind();
        let targets: Vec<_> = self
            .handlers
            .borrow()
            .iter()
            .filter(|(_, event, _)| *event == kind)
            .map(|(_, _, h)| h.clone())
            .collect();
        for handler in &targets {
            (handler.borrow_mut())(signal);
        }
        targets.len()
    }

    pub fn subscription_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl EventHost for LocalEventHost {
    type Subscription = LocalSubscription;

    fn subscribe(&self, event: HostEvent, handler: EventHandler) -> FieldResult<LocalSubscription> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.handlers
            .borrow_mut()
            .push((id, event, Rc::new(RefCell::new(handler))));
        Ok(LocalSubscription(id))
    }

    fn unsubscribe(&self, subscription: LocalSubscription) {
        self.handlers
            .borrow_mut()
            .retain(|(id, _, _)| *id != subscription.0);
    }
}
