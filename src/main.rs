//! Wavesurf - An animated low-poly ocean for the background of your screen
//!
//! The surface rolls with crest-heavy waves, drifts with the pointer,
//! and can slowly cycle through every hue.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use wavesurf::cli::Args;
use wavesurf::params::{RecordingConfig, RenderConfig, WavesConfig};
use wavesurf::rendering::{needs_reconfigure, RenderSystem, SurfaceUniforms};
use wavesurf::surface::{WaveClock, WaveSurface};

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Surface engine
    waves: WaveSurface,

    // Configuration
    config: WavesConfig,
    render_config: RenderConfig,
    recording_config: Option<RecordingConfig>,

    // Accumulated time (one unit per frame)
    clock: WaveClock,
    frame_count: usize,
}

impl App {
    fn new(
        config: WavesConfig,
        recording_config: Option<RecordingConfig>,
    ) -> Result<Self, wavesurf::WaveError> {
        let waves = WaveSurface::new(&config)?;

        Ok(Self {
            window: None,
            render_system: None,
            waves,
            config,
            render_config: RenderConfig::default(),
            recording_config,
            clock: WaveClock::new(),
            frame_count: 0,
        })
    }

    /// Normalize a window position to [0, 1] and forward it to the camera
    fn pointer_moved(&mut self, x: f64, y: f64) {
        let (width, height) = (
            self.render_config.window_width.max(1) as f64,
            self.render_config.window_height.max(1) as f64,
        );
        let nx = (x / width).clamp(0.0, 1.0) as f32;
        let ny = (y / height).clamp(0.0, 1.0) as f32;

        if let Err(e) = self.waves.on_pointer_move(nx, ny) {
            log::warn!("Pointer ignored: {}", e);
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.render_config.window_width = width;
        self.render_config.window_height = height;
        if let Some(render_system) = self.render_system.as_mut() {
            render_system.resize(width, height);
        }
    }

    /// Advance the surface one frame and render it
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let Some(ref render_system) = self.render_system else {
            return;
        };

        let t = self.clock.wave_time(self.config.surface.wave_speed);
        match self.waves.update(t) {
            Ok(output) => {
                if output.positions_dirty || output.normals_dirty {
                    render_system.update_vertices(&self.waves.mesh().vertices);
                }
                if let Some(color) = output.color_changed {
                    log::trace!("Surface color now #{:06x}", color.to_hex());
                }
            }
            Err(e) => log::warn!("Frame {} skipped: {}", self.frame_count, e),
        }
        self.clock.tick();

        let uniforms =
            SurfaceUniforms::from_scene(&self.waves, &self.config.lighting, &self.render_config);
        render_system.update_uniforms(&uniforms);

        match render_system.render(self.frame_count) {
            Ok(()) => {}
            Err(e) if needs_reconfigure(&e) => {
                log::debug!("Reconfiguring surface: {:?}", e);
                let (width, height) = render_system.size();
                self.resize(width, height);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
        self.frame_count += 1;

        if let Some(ref recording) = self.recording_config {
            if self.frame_count % recording.fps as usize == 0 {
                log::info!(
                    "Recorded {}/{} frames",
                    self.frame_count,
                    recording.total_frames()
                );
            }
            if self.frame_count >= recording.total_frames() {
                log::info!("Recording complete: {}", recording.frames_dir());
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        let window_attributes = Window::default_attributes()
            .with_title("Wavesurf")
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.render_config.window_width = size.width.max(1);
        self.render_config.window_height = size.height.max(1);

        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            self.waves.mesh(),
            &self.render_config,
            self.recording_config.clone(),
        )) {
            Ok(render_system) => render_system,
            Err(e) => {
                log::error!("Failed to initialize renderer: {}", e);
                event_loop.exit();
                return;
            }
        };

        log::info!("Wavesurf is running, press ESC to quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(position.x, position.y);
            }
            WindowEvent::Touch(touch) => {
                self.pointer_moved(touch.location.x, touch.location.y);
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();

    let config = match args.to_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let recording_config = match args.create_recording_config() {
        Ok(recording) => recording,
        Err(e) => {
            log::error!("Failed to create recording directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "Surface {}x{} cells, wave height {}, speed {}, zoom {}",
        config.surface.width_cells,
        config.surface.height_cells,
        config.surface.wave_height,
        config.surface.wave_speed,
        config.camera.zoom
    );
    if let Some(ref recording) = recording_config {
        log::info!(
            "Recording {} frames to {}",
            recording.total_frames(),
            recording.frames_dir()
        );
    }

    let mut app = match App::new(config, recording_config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to build surface: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
