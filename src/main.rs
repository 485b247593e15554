//! Hop Ball entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use hop_ball::Settings;
    use hop_ball::assets::{AssetSource, Assets};
    use hop_ball::audio::{AudioManager, SoundEffect};
    use hop_ball::consts::*;
    use hop_ball::game_loop::GameLoop;
    use hop_ball::platform::InputTracker;
    use hop_ball::renderer::{SpriteRenderer, build_scene};

    /// Game instance holding all state
    struct Game {
        game: GameLoop,
        input: InputTracker,
        settings: Settings,
        audio: AudioManager,
        render_state: Option<SpriteRenderer>,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let audio = AudioManager::new(&settings);
            Self {
                game: GameLoop::new(seed),
                input: InputTracker::new(),
                settings,
                audio,
                render_state: None,
                last_time: 0.0,
            }
        }

        /// Run simulation ticks and play their sounds
        fn update(&mut self, dt: f64) {
            for event in self.game.advance(dt, &mut self.input) {
                if let Some(effect) = SoundEffect::from_event(&event) {
                    self.audio.play(effect);
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&build_scene(&self.game.state)) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.apply_settings(&self.settings);
            self.settings.save();
            log::info!("Muted: {}", self.settings.muted);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Hop Ball starting...");

        let assets = match Assets::load(&AssetSource::Embedded) {
            Ok(assets) => assets,
            Err(e) => {
                log::error!("{e}");
                panic!("asset load failed: {e}");
            }
        };

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Backing store at device resolution, logical size stays 500x800
        let dpr = window.device_pixel_ratio();
        let width = (SCREEN_WIDTH as f64 * dpr) as u32;
        let height = (SCREEN_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match SpriteRenderer::new(surface, &adapter, width, height, &assets).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("{e}");
                panic!("renderer setup failed: {e}");
            }
        }

        setup_input_handlers(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Hop Ball running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse press flaps
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.input.press_primary();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touches: one finger flaps, two restart
        for kind in ["touchstart", "touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                // Suppress the emulated mouse events
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.input.set_touch_count(event.touches().length());
            });
            let _ = canvas.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " if !event.repeat() => {
                        event.prevent_default();
                        g.audio.resume();
                        g.input.press_primary();
                    }
                    "r" | "R" => g.input.set_restart_held(true),
                    "m" | "M" if !event.repeat() => g.toggle_mute(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if matches!(event.key().as_str(), "r" | "R") {
                    game.borrow_mut().input.set_restart_held(false);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                (time - g.last_time) / 1000.0
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use hop_ball::Settings;
    use hop_ball::assets::{AssetSource, Assets};
    use hop_ball::platform::desktop;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Hop Ball (native) starting...");

    let source = AssetSource::beside_executable().unwrap_or_else(|| {
        log::warn!("No assets/ directory next to the executable, using built-in assets");
        AssetSource::Embedded
    });
    let assets = match Assets::load(&source) {
        Ok(assets) => assets,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let settings = Settings::load();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64);

    if let Err(e) = desktop::run(assets, settings, seed) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
