//! The desktop front end: a winit window driving a [`Session`].
//!
//! [`SkyhookApp`] implements winit's [`ApplicationHandler`]: window events
//! feed the [`Session`], and each redraw runs the fixed-step scheduler, the
//! camera rig, and a title-bar telemetry update.

use std::sync::Arc;

use skyhook_config::Config;
use skyhook_input::RawKeyEvent;
use tracing::{error, info, instrument};
use winit::application::ApplicationHandler;
use winit::error::EventLoopError;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::game_loop::FixedStepScheduler;
use crate::hud::format_title;
use crate::session::{RenderFrame, Session};

/// Title and logical size for the game window.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            config.window.width as f64,
            config.window.height as f64,
        ))
}

/// Application state: the window, the session, and its scheduler.
pub struct SkyhookApp {
    /// The window handle, created on first resume.
    pub window: Option<Arc<Window>>,
    config: Config,
    session: Session,
    scheduler: FixedStepScheduler,
    title: String,
    last_frame: Option<RenderFrame>,
}

impl SkyhookApp {
    pub fn new(config: Config, session: Session) -> Self {
        let scheduler = FixedStepScheduler::from_config(session.control());
        Self {
            window: None,
            title: config.window.title.clone(),
            config,
            session,
            scheduler,
            last_frame: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Snapshot from the most recent redraw.
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    fn redraw(&mut self) {
        let session = &mut self.session;
        let timing = self.scheduler.tick(|dt| session.step(dt));
        let frame = session.present(timing.frame_dt as f32);

        if let Some(window) = &self.window {
            let title = format_title(&self.config.window.title, &frame.telemetry);
            if title != self.title {
                window.set_title(&title);
                self.title = title;
            }
            window.request_redraw();
        }
        self.last_frame = Some(frame);
    }
}

impl ApplicationHandler for SkyhookApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attrs = window_attributes_from_config(&self.config);
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("Window creation failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.session.resize(size.width, size.height);
        info!(
            "Window created: {}x{} (scale: {:.2})",
            size.width,
            size.height,
            window.scale_factor()
        );

        self.scheduler.reset_clock();
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Window closed");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.session.resize(new_size.width, new_size.height);
            }
            WindowEvent::Focused(false) => {
                self.session.focus_lost();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.session.key(RawKeyEvent::from(&event));
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.session.pointer_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.session.pointer_button(button, state);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.session.wheel(delta);
            }
            WindowEvent::CursorLeft { .. } => {
                self.session.pointer_leave();
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }
}

/// Creates an event loop and runs the session in a window.
///
/// Blocks until the window is closed.
#[instrument(skip_all)]
pub fn run(config: Config, session: Session) -> Result<(), EventLoopError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = SkyhookApp::new(config, session);
    event_loop.run_app(&mut app)
}
