use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Instant;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyEvent, MouseButton, StartCause, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use tilt_core::{
    attach, tick_interval, BallColor, BallScene, BallView, Channels, CycleColor,
    LocalChannel, PointerSample, Presenter, Tick, UnavailableChannel, BACKGROUND_HEX,
};

mod gpu;

/// Keeps the latest view for the next redraw.
struct FramePresenter {
    latest: Rc<Cell<BallView>>,
    dirty: Rc<Cell<bool>>,
}

impl Presenter for FramePresenter {
    fn present(&mut self, view: &BallView) {
        self.latest.set(*view);
        self.dirty.set(true);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let scene = Rc::new(RefCell::new(BallScene::default()));
    let latest = Rc::new(Cell::new(scene.borrow().view()));
    let dirty = Rc::new(Cell::new(true));
    let presenter: Rc<RefCell<dyn Presenter>> = Rc::new(RefCell::new(FramePresenter {
        latest: Rc::clone(&latest),
        dirty: Rc::clone(&dirty),
    }));

    // The winit loop feeds these; desktop has no accelerometer.
    let mut accel = UnavailableChannel::new("no accelerometer on desktop");
    let mut pointer = LocalChannel::<PointerSample>::new("pointer");
    let mut timer = LocalChannel::<Tick>::new("timer");
    let mut color = LocalChannel::<CycleColor>::new("color");

    let attachment = attach(
        Rc::clone(&scene),
        presenter,
        Channels {
            accel: &mut accel,
            pointer: &mut pointer,
            timer: &mut timer,
            color: &mut color,
        },
    )?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Tilt Ball (move the mouse, click or press C to change color)")
        .with_inner_size(LogicalSize::new(800.0, 600.0))
        .build(&event_loop)?;

    let background = BallColor::from_hex(BACKGROUND_HEX)?;
    let mut state = pollster::block_on(gpu::GpuState::new(&window, background))?;
    let mut attachment = Some(attachment);
    let mut next_tick = Instant::now() + tick_interval();

    event_loop.run(move |event, elwt| match event {
        Event::NewEvents(StartCause::Init) => {
            elwt.set_control_flow(ControlFlow::WaitUntil(next_tick));
        }
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                state.resize(size);
                dirty.set(true);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let size = state.window.inner_size();
                pointer.emit(PointerSample {
                    client_x: position.x,
                    client_y: position.y,
                    viewport_width: size.width as f64,
                    viewport_height: size.height as f64,
                });
            }
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => {
                color.emit(CycleColor);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match logical_key.as_ref() {
                Key::Character("c") | Key::Character("C") => {
                    color.emit(CycleColor);
                }
                Key::Named(NamedKey::Escape) => elwt.exit(),
                _ => {}
            },
            WindowEvent::RedrawRequested => match state.render(&latest.get()) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    state.resize(state.window.inner_size());
                    dirty.set(true);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[gpu] out of memory");
                    elwt.exit();
                }
                Err(e) => log::warn!("[gpu] frame skipped: {e:?}"),
            },
            WindowEvent::CloseRequested => elwt.exit(),
            _ => {}
        },
        Event::AboutToWait => {
            let now = Instant::now();
            if now >= next_tick {
                // One tick per wake-up, no catch-up after a stall
                timer.emit(Tick);
                next_tick = now + tick_interval();
            }
            if dirty.replace(false) {
                state.window.request_redraw();
            }
            elwt.set_control_flow(ControlFlow::WaitUntil(next_tick));
        }
        Event::LoopExiting => {
            if let Some(a) = attachment.take() {
                a.detach();
            }
        }
        _ => {}
    })?;
    Ok(())
}
