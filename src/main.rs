use log::{error, info, warn};
use pixels::{Pixels, SurfaceTexture};
use snake_backdrop::config::CONFIG_ENV;
use snake_backdrop::{Canvas, FrameLoop, FrameScheduler, GridAgentSimulation, SimConfig};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;
use winit::dpi::LogicalSize;
use winit::event::{Event, VirtualKeyCode};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};
use winit_input_helper::WinitInputHelper;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

/// Frames are driven by redraw requests on the window.
struct WindowScheduler {
    window: Rc<Window>,
    cancelled: bool,
}

impl FrameScheduler for WindowScheduler {
    fn request_next_frame(&mut self) {
        if !self.cancelled {
            self.window.request_redraw();
        }
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }
}

fn load_config() -> SimConfig {
    let path = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os(CONFIG_ENV))
        .map(PathBuf::from);
    let Some(path) = path else {
        return SimConfig::default();
    };
    match SimConfig::load(&path) {
        Ok(config) => {
            info!("loaded config from {}", path.display());
            config
        }
        Err(err) => {
            warn!("{err}; falling back to defaults");
            SimConfig::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config();
    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();

    let window = Rc::new(
        WindowBuilder::new()
            .with_title("snake backdrop")
            .with_inner_size(LogicalSize::new(WIDTH, HEIGHT))
            .build(&event_loop)?,
    );

    let size = window.inner_size();
    let mut buffer_size = (size.width.max(1), size.height.max(1));
    let mut pixels = {
        let surface_texture = SurfaceTexture::new(size.width, size.height, window.as_ref());
        Pixels::new(buffer_size.0, buffer_size.1, surface_texture)?
    };

    let sim = GridAgentSimulation::with_entropy(config, buffer_size.0, buffer_size.1);
    info!("grid {}x{} cells", sim.grid().cols, sim.grid().rows);
    let mut frame_loop = FrameLoop::new(sim, WindowScheduler { window: Rc::clone(&window), cancelled: false });
    frame_loop.start();
    let started = Instant::now();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        if let Event::RedrawRequested(_) = event {
            let timestamp_ms = started.elapsed().as_secs_f64() * 1000.0;
            {
                let mut canvas = Canvas::new(pixels.frame_mut(), buffer_size.0, buffer_size.1);
                frame_loop.on_frame(timestamp_ms, &mut canvas);
            }
            if let Err(err) = pixels.render() {
                error!("pixels.render failed: {err}");
                frame_loop.shutdown();
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        if input.update(&event) {
            if input.key_pressed(VirtualKeyCode::Escape) || input.close_requested() || input.destroyed() {
                frame_loop.shutdown();
                *control_flow = ControlFlow::Exit;
                return;
            }

            if let Some(size) = input.window_resized() {
                // Minimised windows report a zero size; keep the last board.
                if size.width > 0 && size.height > 0 {
                    if let Err(err) = pixels.resize_surface(size.width, size.height) {
                        error!("failed to resize surface: {err}");
                    }
                    match pixels.resize_buffer(size.width, size.height) {
                        Ok(()) => {
                            buffer_size = (size.width, size.height);
                            frame_loop.resize(size.width, size.height);
                        }
                        Err(err) => error!("failed to resize buffer: {err}"),
                    }
                }
            }
        }
    })
}
