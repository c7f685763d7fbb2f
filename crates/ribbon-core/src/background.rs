use crate::animation::Animation;
use crate::camera::Viewport;
use crate::config::FieldConfig;
use crate::error::FieldResult;
use crate::host::{EventHandler, EventHost, HostEvent, HostSignal};
use crate::scheduler::{DriverState, FrameLoop, FrameScheduler};
use crate::surface::RenderSurface;
use std::cell::{Ref, RefCell};
use std::rc::Rc;

const STATS_LOG_EVERY: u64 = 600;

/// A mounted ribbon field: animation state, its surface, the frame loop and
/// the host subscriptions, all tied to one mount/unmount cycle.
pub struct Background<S, H, R>
where
    S: FrameScheduler + 'static,
    H: EventHost,
    R: RenderSurface + 'static,
{
    animation: Rc<RefCell<Animation>>,
    surface: Rc<RefCell<R>>,
    frame_loop: FrameLoop<S>,
    host: H,
    subscriptions: Vec<H::Subscription>,
    mounted: bool,
}

impl<S, H, R> Background<S, H, R>
where
    S: FrameScheduler + 'static,
    H: EventHost,
    R: RenderSurface + 'static,
{
    pub fn mount(
        config: FieldConfig,
        scheduler: S,
        host: H,
        mut surface: R,
        viewport: Viewport,
    ) -> FieldResult<Self> {
        // A surface handed to a failed mount is still released exactly once.
        let animation = match Animation::new(config, viewport) {
            Ok(animation) => Rc::new(RefCell::new(animation)),
            Err(e) => {
                surface.release();
                return Err(e);
            }
        };
        let surface = Rc::new(RefCell::new(surface));
        surface.borrow_mut().resize(viewport);

        let frame_loop = {
            let animation = animation.clone();
            let surface = surface.clone();
            FrameLoop::new(scheduler, move |now_ms| {
                let mut anim = animation.borrow_mut();
                let stats = anim.advance(now_ms);
                surface.borrow_mut().draw(&anim.frame_view());
                anim.clear_dirty();
                if stats.frame % STATS_LOG_EVERY == 0 {
                    log::debug!(
                        "[field] frame={} dt={:.2}ms offset={:.3} velocity={:.4}",
                        stats.frame,
                        stats.dt_ms,
                        stats.offset,
                        stats.velocity
                    );
                }
            })
        };

        let mut background = Self {
            animation,
            surface,
            frame_loop,
            host,
            subscriptions: Vec::with_capacity(HostEvent::ALL.len()),
            mounted: true,
        };
        // On failure the partially wired background is dropped, which unmounts it.
        for event in HostEvent::ALL {
            let handler = background.handler();
            let sub = background.host.subscribe(event, handler)?;
            background.subscriptions.push(sub);
        }
        background.frame_loop.start()?;

        {
            let anim = background.animation.borrow();
            log::info!(
                "[field] mounted curves={} vertices={} viewport={}x{}@{}",
                anim.curves().len(),
                anim.config().vertex_count,
                viewport.width,
                viewport.height,
                viewport.pixel_ratio()
            );
        }
        Ok(background)
    }

    fn handler(&self) -> EventHandler {
        let animation = self.animation.clone();
        let surface = self.surface.clone();
        Box::new(move |signal| match signal {
            HostSignal::PointerDown => animation.borrow_mut().press(),
            HostSignal::PointerUp | HostSignal::PointerLeave => animation.borrow_mut().release(),
            HostSignal::Resize(viewport) => {
                animation.borrow_mut().set_viewport(viewport);
                surface.borrow_mut().resize(viewport);
                log::info!(
                    "[field] resize {}x{} aspect={:.3}",
                    viewport.width,
                    viewport.height,
                    viewport.aspect()
                );
            }
        })
    }

    /// Stop the frame loop, drop every host subscription and release the
    /// surface. Safe to call more than once.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.frame_loop.stop();
        for sub in self.subscriptions.drain(..) {
            self.host.unsubscribe(sub);
        }
        self.surface.borrow_mut().release();
        log::info!("[field] unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn driver_state(&self) -> DriverState {
        self.frame_loop.state()
    }

    pub fn animation(&self) -> Ref<'_, Animation> {
        self.animation.borrow()
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }
}

impl<S, H, R> Drop for Background<S, H, R>
where
    S: FrameScheduler + 'static,
    H: EventHost,
    R: RenderSurface + 'static,
{
    fn drop(&mut self) {
        self.unmount();
    }
}
