use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::{debug, error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    window::WindowId,
};

use watchtower_viewer::cli::Cli;
use watchtower_viewer::config::ViewerConfig;
use watchtower_viewer::core::{FpsCounter, FrameClock, WinitInputAdapter};
use watchtower_viewer::hud::HudStats;
use watchtower_viewer::renderer::{FrameParams, SceneRenderer};
use watchtower_viewer::scene::{load_scene, Scene};
use watchtower_viewer::viewer::{Viewer, ViewerControl};
use watchtower_viewer::window::Window;

// === Application ===

struct App {
    config: ViewerConfig,
    show_hud: bool,
    /// Handed to the renderer on the first `resumed`
    scene: Option<Scene>,
    viewer: Viewer,
    input_adapter: WinitInputAdapter,
    clock: FrameClock,
    fps: FpsCounter,
    window: Option<Window>,
    renderer: Option<SceneRenderer>,
    failure: Option<anyhow::Error>,
}

impl App {
    fn new(config: ViewerConfig, scene: Scene, show_hud: bool) -> Self {
        let viewer = Viewer::new(config.camera_state(), config.camera_settings());
        Self {
            config,
            show_hud,
            scene: Some(scene),
            viewer,
            input_adapter: WinitInputAdapter::new(),
            clock: FrameClock::new(),
            fps: FpsCounter::default(),
            window: None,
            renderer: None,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        error!("{err:#}");
        self.failure = Some(err);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window = event_loop
            .create_window(Window::attributes(&self.config.window))
            .context("failed to create window")?;
        let window = Window::new(Arc::new(window));

        let scene = self.scene.take().unwrap_or_default();
        let renderer = pollster::block_on(SceneRenderer::new(
            window.inner().clone(),
            &scene,
            &self.config.light,
            self.show_hud,
        ))
        .context("failed to initialize renderer")?;

        if self.config.window.capture_cursor {
            let source = window.capture_cursor();
            self.input_adapter.set_source(source, window.center());
        }

        self.window = Some(window);
        self.renderer = Some(renderer);
        // Setup time must not show up as the first frame's delta
        self.clock.reset();
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let frame = self.clock.tick();
        self.viewer.update(frame.delta);

        if let Some(fps) = self.fps.tick(frame.delta) {
            debug!("FPS: {:.1}", fps);
        }

        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        let camera = self.viewer.camera();
        let params = FrameParams {
            view: camera.view_matrix(),
            projection: self.config.projection().matrix(),
            camera_position: camera.position,
            time: frame.time,
        };
        let stats = HudStats {
            fps: self.fps.fps(),
            position: camera.position,
            yaw: camera.yaw(),
            pitch: camera.pitch(),
        };

        match renderer.render(window.inner(), &params, &stats) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("Render error: out of GPU memory");
                event_loop.exit();
            }
            Err(e) => warn!("Render error: {}", e),
        }
    }

    fn into_result(self) -> anyhow::Result<()> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first; key and focus events still reach
        // the input table so no key stays held
        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            if renderer.on_window_event(window.inner(), &event)
                && !WinitInputAdapter::is_input_critical(&event)
            {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Focused(false) => self.viewer.release_keys(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            event => {
                if let Some(input) = self.input_adapter.translate(&event) {
                    if self.viewer.handle_event(input) == ViewerControl::Exit {
                        event_loop.exit();
                    }
                }
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            if let Some(input) = self.input_adapter.device_motion(delta) {
                self.viewer.handle_event(input);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = ViewerConfig::resolve(&cli).context("invalid configuration")?;
    info!(
        "Config: {}x{}, speed {}, sensitivity {}, assets {:?}",
        config.window.width,
        config.window.height,
        config.camera.speed,
        config.camera.sensitivity,
        config.assets.root
    );

    let scene = load_scene(&config.assets.root)?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, scene, !cli.no_ui);

    info!("Controls: WASD to move, mouse to look, Escape to quit");
    event_loop.run_app(&mut app)?;

    app.into_result()
}
