//! winit window and keyboard, pumped once per logic step

use panelpop_core::{PanelPopError, Result};
use panelpop_runtime::{InputService, KeyInput, KeyboardState, WindowConfig};
use std::rc::Rc;
use std::time::Duration;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Fullscreen, Window, WindowId};

/// Pumps to attempt before giving up on the window appearing
const STARTUP_PUMPS: usize = 100;

struct PumpHandler {
    config: WindowConfig,
    window: Option<Rc<Window>>,
    keyboard: KeyboardState,
    quit: bool,
    create_error: Option<String>,
}

impl PumpHandler {
    fn create_window(&mut self, event_loop: &ActiveEventLoop) {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                if self.config.fullscreen {
                    window.set_fullscreen(Some(Fullscreen::Borderless(None)));
                }
                tracing::info!(
                    "Window created ({}x{}, fullscreen: {})",
                    self.config.width,
                    self.config.height,
                    self.config.fullscreen
                );
                self.window = Some(Rc::new(window));
            }
            Err(e) => {
                self.create_error = Some(e.to_string());
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for PumpHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            self.create_window(event_loop);
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Close requested");
                self.quit = true;
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.keyboard.process_key_down(key_code),
                        ElementState::Released => self.keyboard.process_key_up(key_code),
                    }
                }
            }

            WindowEvent::Focused(false) => {
                self.keyboard.release_all();
            }

            _ => {}
        }
    }
}

/// Input service over a non-blocking winit event loop
pub struct WinitInput {
    event_loop: EventLoop<()>,
    handler: PumpHandler,
}

impl WinitInput {
    /// Create the event loop and pump it until the window exists
    pub fn new(config: &WindowConfig) -> Result<(Self, Rc<Window>)> {
        let event_loop = EventLoop::new()
            .map_err(|e| PanelPopError::PlatformError(format!("Failed to create event loop: {e}")))?;

        let mut input = Self {
            event_loop,
            handler: PumpHandler {
                config: config.clone(),
                window: None,
                keyboard: KeyboardState::new(),
                quit: false,
                create_error: None,
            },
        };

        for _ in 0..STARTUP_PUMPS {
            let status = input
                .event_loop
                .pump_app_events(Some(Duration::ZERO), &mut input.handler);

            if let Some(e) = input.handler.create_error.take() {
                return Err(PanelPopError::PlatformError(format!("Failed to create window: {e}")));
            }
            if let Some(window) = input.handler.window.clone() {
                return Ok((input, window));
            }
            if let PumpStatus::Exit(code) = status {
                return Err(PanelPopError::PlatformError(format!(
                    "Event loop exited during startup ({code})"
                )));
            }
        }

        Err(PanelPopError::PlatformError(
            "Window was not created".to_string(),
        ))
    }
}

impl KeyInput for WinitInput {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.handler.keyboard.is_key_down(key)
    }

    fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.handler.keyboard.is_key_just_pressed(key)
    }

    fn last_just_pressed(&self) -> Option<KeyCode> {
        self.handler.keyboard.last_just_pressed()
    }
}

impl InputService for WinitInput {
    fn poll(&mut self) {
        self.handler.keyboard.begin_poll();
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler);
        if let PumpStatus::Exit(_) = status {
            self.handler.quit = true;
        }
    }

    fn quit_requested(&self) -> bool {
        self.handler.quit
    }
}
