//! Desktop host: winit window, wgpu surface, rodio audio

use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use super::InputTracker;
use crate::Settings;
use crate::assets::Assets;
use crate::audio::{AudioManager, SoundEffect};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, WINDOW_TITLE};
use crate::game_loop::GameLoop;
use crate::renderer::{RendererError, SpriteRenderer, build_scene};

/// Fatal desktop host failures
#[derive(Debug, Error)]
pub enum DesktopError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Renderer(#[from] RendererError),
}

/// Fixed-size, undecorated game window
pub fn window_attributes() -> WindowAttributes {
    WindowAttributes::default()
        .with_title(WINDOW_TITLE)
        .with_inner_size(LogicalSize::new(SCREEN_WIDTH, SCREEN_HEIGHT))
        .with_resizable(false)
        .with_decorations(false)
}

/// Open the window and run until it closes
pub fn run(assets: Assets, settings: Settings, seed: u64) -> Result<(), DesktopError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(assets, settings, seed);
    event_loop.run_app(&mut app)?;
    match app.failure.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    assets: Assets,
    settings: Settings,
    audio: AudioManager,
    game: GameLoop,
    input: InputTracker,
    window: Option<Arc<Window>>,
    renderer: Option<SpriteRenderer>,
    last_frame: Option<Instant>,
    /// Setup error that ended the event loop
    failure: Option<DesktopError>,
}

impl App {
    fn new(assets: Assets, settings: Settings, seed: u64) -> Self {
        let audio = AudioManager::new(&settings, assets.flap_sound.clone());
        Self {
            assets,
            settings,
            audio,
            game: GameLoop::new(seed),
            input: InputTracker::new(),
            window: None,
            renderer: None,
            last_frame: None,
            failure: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), DesktopError> {
        let window = Arc::new(event_loop.create_window(window_attributes())?);
        let size = window.inner_size();
        log::info!("Window created ({}x{})", size.width, size.height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .map_err(RendererError::from)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(RendererError::from)?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let renderer = pollster::block_on(SpriteRenderer::new(
            surface,
            &adapter,
            size.width,
            size.height,
            &self.assets,
        ))?;

        self.renderer = Some(renderer);
        self.window = Some(window);
        self.last_frame = Some(Instant::now());
        Ok(())
    }

    fn toggle_mute(&mut self) {
        self.settings.muted = !self.settings.muted;
        self.audio.apply_settings(&self.settings);
        self.settings.save();
        log::info!("Muted: {}", self.settings.muted);
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = self
            .last_frame
            .replace(now)
            .map_or(0.0, |last| (now - last).as_secs_f64());

        for event in self.game.advance(dt, &mut self.input) {
            if let Some(effect) = SoundEffect::from_event(&event) {
                self.audio.play(effect);
            }
        }

        let Some(renderer) = &mut self.renderer else {
            return;
        };
        match renderer.render(&build_scene(&self.game.state)) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_graphics(event_loop) {
            log::error!("Startup failed: {e}");
            self.failure = Some(e);
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let pressed = event.state.is_pressed();
                match code {
                    KeyCode::Space if pressed && !event.repeat => self.input.press_primary(),
                    KeyCode::KeyR => self.input.set_restart_held(pressed),
                    KeyCode::KeyM if pressed && !event.repeat => self.toggle_mute(),
                    KeyCode::Escape if pressed => event_loop.exit(),
                    _ => {}
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.input.press_primary(),
            WindowEvent::RedrawRequested => self.frame(event_loop),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_is_fixed_and_undecorated() {
        let attrs = window_attributes();
        assert_eq!(attrs.title, "Pong");
        assert!(!attrs.resizable);
        assert!(!attrs.decorations);
    }
}
