use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    dpi::PhysicalSize,
    event::*,
    event_loop::EventLoop,
    window::WindowBuilder,
};

use ribbon_core::{
    Background, FieldConfig, HostSignal, LocalEventHost, ManualScheduler, Viewport,
};
use ribbon_render::GpuState;

// The surface is sized in physical pixels already, so the ratio stays at 1.
fn viewport_for(size: PhysicalSize<u32>) -> Viewport {
    Viewport::new(size.width, size.height, 1.0)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Ribbons (hold the mouse button)")
            .with_inner_size(PhysicalSize::new(1280u32, 800u32))
            .build(&event_loop)?,
    );

    let viewport = viewport_for(window.inner_size());
    let (width, height) = viewport.physical_size();
    let config = FieldConfig::default().with_seed(rand::random());
    let vertex_capacity = config.curve_count * config.vertex_count;
    let gpu = pollster::block_on(GpuState::new(
        Arc::clone(&window),
        width,
        height,
        vertex_capacity,
    ))?;

    let scheduler = Rc::new(ManualScheduler::new());
    let host = Rc::new(LocalEventHost::new());
    let mut background = Background::mount(
        config,
        Rc::clone(&scheduler),
        Rc::clone(&host),
        gpu,
        viewport,
    )?;
    let start = Instant::now();

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => {
                background.unmount();
                elwt.exit();
            }
            WindowEvent::Resized(size) => {
                host.dispatch(HostSignal::Resize(viewport_for(size)));
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                let signal = match state {
                    ElementState::Pressed => HostSignal::PointerDown,
                    ElementState::Released => HostSignal::PointerUp,
                };
                host.dispatch(signal);
            }
            WindowEvent::CursorLeft { .. } => {
                host.dispatch(HostSignal::PointerLeave);
            }
            WindowEvent::RedrawRequested => {
                scheduler.fire(start.elapsed().as_secs_f64() * 1000.0);
            }
            _ => {}
        },
        Event::AboutToWait => {
            if background.is_mounted() {
                window.request_redraw();
            }
        }
        _ => {}
    })?;
    Ok(())
}

