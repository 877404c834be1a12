//! Block Stacks
//!
//! Stacks of rigid blocks resting on the floor of the window. Blocks can be
//! dragged with the mouse, and friction, bounciness, gravity, and time can be
//! tuned live from the settings panel.

mod error;
mod gui;

use block_renderer::{BlockRenderer, Canvas, Viewport};
use block_simulation::BlockSimulation;
use error::SetupError;
use glam::Vec2;
use gui::{Gui, UiState};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Frames averaged for the FPS readout
const FRAME_TIME_WINDOW: usize = 100;

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    simulation: BlockSimulation,
    canvas: Canvas,
    viewport: Viewport,
    renderer: BlockRenderer,

    gui: Gui,
    ui_state: UiState,

    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
}

impl GpuState {
    async fn new(window: Arc<Window>) -> Result<Self, SetupError> {
        let size = window.inner_size();

        // Fixed for the lifetime of the scene
        let canvas = Canvas::new(size.width, size.height)?;

        // Create wgpu instance
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        // Create device and queue
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(SetupError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Create simulation
        let simulation = BlockSimulation::new(
            size.width as f32,
            size.height as f32,
            &mut rand::rng(),
        );
        log::info!("✓ Simulation initialized");

        // Create renderer
        let renderer = BlockRenderer::new(&device, config.format);
        let viewport = Viewport::new(config.width, config.height);
        log::info!("✓ Renderer initialized");

        // Create GUI
        let gui = Gui::new(&device, config.format, &window);
        let ui_state = UiState {
            body_count: simulation.body_count(),
            ..Default::default()
        };

        Ok(Self {
            surface,
            device,
            queue,
            config,
            simulation,
            canvas,
            viewport,
            renderer,
            gui,
            ui_state,
            frame_times: VecDeque::with_capacity(FRAME_TIME_WINDOW),
            last_frame_time: Instant::now(),
        })
    }

    /// Reconfigure the surface; the scene keeps its startup size
    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            self.viewport.resize(new_size.width, new_size.height);
        }
    }

    fn render(&mut self, window: &Window) -> Result<(f32, f32), wgpu::SurfaceError> {
        // Track frame time
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = now;

        self.frame_times.push_back(frame_time);
        if self.frame_times.len() > FRAME_TIME_WINDOW {
            self.frame_times.pop_front();
        }
        let avg_frame_time = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        let fps = if avg_frame_time > 0.0 {
            1000.0 / avg_frame_time
        } else {
            0.0
        };

        self.ui_state.fps = fps;
        self.ui_state.frame_time = avg_frame_time;

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Sync settings, record this frame's blocks, step physics
        self.simulation.tick(&mut self.canvas);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer.render(
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            &self.viewport,
            &self.canvas,
        );

        self.gui.render(
            &self.device,
            &self.queue,
            &mut encoder,
            window,
            &view,
            &self.ui_state,
            self.simulation.settings_mut(),
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok((fps, avg_frame_time))
    }
}

#[derive(Default)]
struct App {
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    setup_error: Option<SetupError>,
    cursor_position: Vec2,
}

impl App {
    fn setup(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SetupError> {
        let window_attributes = Window::default_attributes()
            .with_title("Block Stacks")
            .with_inner_size(winit::dpi::LogicalSize::new(1600, 900));

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        self.window = Some(window.clone());
        self.gpu_state = Some(pollster::block_on(GpuState::new(window))?);
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.setup(event_loop) {
                log::error!("Startup failed: {}", e);
                self.setup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Handle GUI events
        if let (Some(gpu_state), Some(window)) = (&mut self.gpu_state, &self.window) {
            if gpu_state.gui.handle_event(window, &event) {
                // Letting go over the panel still drops the block
                if matches!(
                    event,
                    WindowEvent::MouseInput {
                        state: ElementState::Released,
                        button: MouseButton::Left,
                        ..
                    }
                ) {
                    gpu_state.simulation.pointer_released();
                }
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_position = Vec2::new(position.x as f32, position.y as f32);

                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.simulation.pointer_moved(self.cursor_position);
                }
            }

            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    match state {
                        ElementState::Pressed => {
                            gpu_state.simulation.pointer_pressed(self.cursor_position)
                        }
                        ElementState::Released => gpu_state.simulation.pointer_released(),
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
                    match gpu_state.render(window) {
                        Ok((fps, frame_time)) => {
                            window.set_title(&format!(
                                "Block Stacks - {:.0} FPS ({:.2}ms) - {} blocks",
                                fps,
                                frame_time,
                                gpu_state.simulation.body_count()
                            ));
                        }
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu_state.resize(window.inner_size())
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("GPU out of memory");
                            event_loop.exit()
                        }
                        Err(e) => log::warn!("Skipping frame: {:?}", e),
                    }
                }
            }

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), SetupError> {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting block stacks...");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::default();
    event_loop.run_app(&mut app)?;

    match app.setup_error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
