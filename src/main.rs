//! Breakout entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use breakout::consts::*;
    use breakout::input::keys;
    use breakout::renderer::{SpriteBatch, SpriteRenderState, draw_scene, textures};
    use breakout::resources::TEXTURE_BACKGROUND;
    use breakout::sim::{GameEvent, GameState, Level, tick};
    use breakout::{KeyState, ResourceTable, TextureHandle, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        keys: KeyState,
        batch: SpriteBatch,
        render_state: Option<SpriteRenderState>,
        background: TextureHandle,
        accumulator: f32,
        last_time: f64,
        idle_mode: bool,
    }

    impl Game {
        fn new(state: GameState, background: TextureHandle) -> Self {
            Self {
                state,
                keys: KeyState::new(),
                batch: SpriteBatch::new(),
                render_state: None,
                background,
                accumulator: 0.0,
                last_time: 0.0,
                idle_mode: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let mut input = self.keys.poll();
                input.idle_mode = self.idle_mode;
                for event in tick(&mut self.state, &input, SIM_DT) {
                    match event {
                        GameEvent::BallLost { lives_left } => {
                            log::info!("Ball lost ({} lives left)", lives_left)
                        }
                        GameEvent::LevelCompleted => log::info!("Level cleared! Space to replay"),
                        other => log::debug!("{:?}", other),
                    }
                }
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };

            self.batch.clear();
            draw_scene(&mut self.batch, &self.state, self.background);

            match render_state.render(&self.batch) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    fn js_err(msg: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&msg.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Breakout starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()?;

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let mut resources = ResourceTable::new();
        let images = textures::register_all(&mut resources);

        let tuning = Tuning::default();
        let arena = breakout::window_size();
        let level_size = glam::Vec2::new(arena.x, tuning.level_height(arena.y));
        let source = breakout::sim::bundled("one").ok_or_else(|| js_err("missing level"))?;
        let level = Level::parse(source, level_size, &resources).map_err(js_err)?;
        let state = GameState::from_resources(level, tuning, arena, &resources).map_err(js_err)?;
        let background = resources.texture(TEXTURE_BACKGROUND).map_err(js_err)?;

        let game = Rc::new(RefCell::new(Game::new(state, background)));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mut render_state =
            SpriteRenderState::new(surface, &adapter, width, height, arena, &resources)
                .await
                .map_err(js_err)?;
        for (handle, image) in &images {
            render_state.upload_texture(*handle, image);
        }
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, game.clone());
        setup_focus_handlers(&window, &document, game.clone());

        request_animation_frame(game);

        log::info!("Breakout running! Arrows/A/D to move, Space to launch, I for demo mode");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let code = event.key_code();
                if matches!(code, keys::SPACE | keys::LEFT | keys::RIGHT) {
                    event.prevent_default();
                }
                let mut g = game.borrow_mut();
                if event.key() == "i" || event.key() == "I" {
                    if !event.repeat() {
                        g.idle_mode = !g.idle_mode;
                        log::info!("Idle mode: {}", g.idle_mode);
                    }
                    return;
                }
                g.keys.press(code);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().keys.release(event.key_code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Drop held keys when the page loses focus; keyup never arrives then
    fn setup_focus_handlers(
        window: &web_sys::Window,
        document: &web_sys::Document,
        game: Rc<RefCell<Game>>,
    ) {
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().keys.clear();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys.clear();
                log::debug!("Window blur, keys released");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
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
    if let Err(e) = wasm_game::run().await {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

/// Native build: no window, just a headless demo session
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use serde::Serialize;

    use breakout::consts::SIM_DT;
    use breakout::renderer::{SpriteBatch, draw_scene, textures};
    use breakout::resources::TEXTURE_BACKGROUND;
    use breakout::sim::{GameEvent, GameState, Level, TickInput, tick};
    use breakout::{LoadError, ResourceTable, Tuning};

    /// Simulated seconds of autopilot play
    const SESSION_SECONDS: f32 = 120.0;
    const DEFAULT_LEVEL: &str = "levels/one.lvl";
    const TUNING_ENV: &str = "BREAKOUT_TUNING";

    /// Summary printed as JSON at the end of a run
    #[derive(Debug, Default, Serialize)]
    pub struct SessionReport {
        pub level: PathBuf,
        pub ticks: u64,
        pub bricks: usize,
        pub bricks_destroyed: u32,
        pub solid_hits: u32,
        pub paddle_hits: u32,
        pub balls_lost: u32,
        pub restarts: u32,
        pub completions: u32,
        pub remaining: usize,
        pub lives: u8,
        pub sprites_last_frame: usize,
    }

    pub fn run(level_path: Option<PathBuf>) -> Result<SessionReport, LoadError> {
        let tuning = match std::env::var_os(TUNING_ENV) {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };

        let mut resources = ResourceTable::new();
        textures::register_all(&mut resources);

        let arena = breakout::window_size();
        let level_size = glam::Vec2::new(arena.x, tuning.level_height(arena.y));
        let path = level_path.unwrap_or_else(|| PathBuf::from(DEFAULT_LEVEL));
        let level = Level::load(&path, level_size, &resources)?;
        let background = resources.texture(TEXTURE_BACKGROUND)?;

        let mut state = GameState::from_resources(level, tuning, arena, &resources)?;
        let mut report = SessionReport {
            level: path,
            bricks: state.level.bricks.len(),
            ..Default::default()
        };

        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let ticks = (SESSION_SECONDS / SIM_DT) as u64;
        for _ in 0..ticks {
            for event in tick(&mut state, &input, SIM_DT) {
                match event {
                    GameEvent::BrickDestroyed { .. } => report.bricks_destroyed += 1,
                    GameEvent::SolidBrickHit { .. } => report.solid_hits += 1,
                    GameEvent::PaddleHit => report.paddle_hits += 1,
                    GameEvent::BallLost { .. } => report.balls_lost += 1,
                    GameEvent::LevelRestarted => report.restarts += 1,
                    GameEvent::LevelCompleted => report.completions += 1,
                    GameEvent::BallLaunched => {}
                }
            }
        }

        // Build one frame's sprites to exercise the draw path
        let mut batch = SpriteBatch::new();
        draw_scene(&mut batch, &state, background);

        report.ticks = state.time_ticks;
        report.remaining = state.level.remaining();
        report.lives = state.lives;
        report.sprites_last_frame = batch.sprite_count();
        Ok(report)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Breakout (native) starting...");
    log::info!("Native mode runs a headless demo session - run with `trunk serve` for the web version");

    let level_path = std::env::args_os().nth(1).map(std::path::PathBuf::from);
    match headless::run(level_path) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to encode report: {}", e),
        },
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}
