//! Flying Rings entry point
//!
//! Browser builds run the WebGPU game loop. Native builds run a headless
//! autopilot session, useful for checking tuning files.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flying_rings::consts::*;
    use flying_rings::renderer::{RenderState, Viewport, build_frame};
    use flying_rings::sim::{GameEvent, GameState, TickInput, tick};
    use flying_rings::world_size;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Last HUD strings pushed to the DOM
        shown_score: String,
        shown_game_over: Option<String>,
    }

    impl Game {
        fn new(seed: u64, canvas: HtmlCanvasElement) -> Self {
            Self {
                state: GameState::new(seed),
                render_state: None,
                canvas,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                shown_score: String::new(),
                shown_game_over: None,
            }
        }

        /// Client coordinates to world coordinates, through the letterbox
        fn client_to_world(&self, x: f64, y: f64) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            let viewport = Viewport::new(world_size(), rect.width() as u32, rect.height() as u32);
            viewport.screen_to_world(Vec2::new(
                (x - rect.left()) as f32,
                (y - rect.top()) as f32,
            ))
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            self.accumulator += dt.min(0.1);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // One-shot inputs are consumed by the first tick that sees them
                self.input.pointer_down = false;
                self.input.key_down = false;
            }

            for event in self.state.drain_events() {
                match event {
                    GameEvent::GameOver { .. } | GameEvent::Restarted { .. } => {
                        log::info!("{:?}", event)
                    }
                    _ => log::debug!("{:?}", event),
                }
            }
        }

        /// Keep the surface in step with the canvas' CSS size
        fn sync_canvas_size(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let width = (self.canvas.client_width() as f64 * dpr) as u32;
            let height = (self.canvas.client_height() as f64 * dpr) as u32;
            if (width, height) != render_state.viewport.size && width > 0 && height > 0 {
                self.canvas.set_width(width);
                self.canvas.set_height(height);
                render_state.resize(width, height);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = build_frame(&self.state);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.viewport.size;
                        render_state.resize(w, h);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = &self.state.hud;

            if let Some(el) = document.get_element_by_id("hud-score") {
                let text = hud.score_text();
                if text != self.shown_score {
                    el.set_text_content(Some(&text));
                    self.shown_score = text;
                }
                let scale = hud.score_scale(self.state.time_ms);
                let _ = el.set_attribute("style", &format!("transform: scale({scale:.3})"));
            }

            let game_over = hud.game_over_text().map(str::to_owned);
            if game_over != self.shown_game_over {
                if let Some(el) = document.get_element_by_id("game-over") {
                    match &game_over {
                        Some(text) => {
                            el.set_text_content(Some(text));
                            let _ = el.class_list().remove_1("hidden");
                        }
                        None => {
                            let _ = el.class_list().add_1("hidden");
                        }
                    }
                }
                self.shown_game_over = game_over;
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger init failed: {e}").into());
        }

        log::info!("Flying Rings starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, canvas.clone())));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, world_size())
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone())?;

        request_animation_frame(game);

        log::info!("Flying Rings running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Mouse move steers
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.client_to_world(event.client_x() as f64, event.client_y() as f64);
                g.input.pointer = Some(pos);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse down dashes (or restarts)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.client_to_world(event.client_x() as f64, event.client_y() as f64);
                g.input.pointer = Some(pos);
                g.input.pointer_down = true;
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch move steers
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let pos = g.client_to_world(touch.client_x() as f64, touch.client_y() as f64);
                    g.input.pointer = Some(pos);
                }
            });
            canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start dashes (or restarts)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.input.pointer_down = true;
                if let Some(touch) = event.touches().get(0) {
                    let pos = g.client_to_world(touch.client_x() as f64, touch.client_y() as f64);
                    g.input.pointer = Some(pos);
                }
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard: any key is a press, I also toggles autopilot
        {
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let mut g = game.borrow_mut();
                let autopilot = g.input.autopilot;
                g.input.press_key(&event.key());
                if g.input.autopilot != autopilot {
                    log::info!("Autopilot: {}", g.input.autopilot);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
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
            g.sync_canvas_size();
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use flying_rings::Tuning;
    use flying_rings::consts::SIM_DT;
    use flying_rings::sim::{GameEvent, GameState, TickInput, tick};

    /// Simulated time a headless session may run
    const MAX_SESSION_SECS: u32 = 300;

    pub fn load_tuning(path: Option<String>) -> Tuning {
        let Some(path) = path else {
            log::info!("Using default tuning");
            return Tuning::default();
        };
        match Tuning::load(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path, e);
                log::warn!("Falling back to default tuning");
                Tuning::default()
            }
        }
    }

    /// Let the autopilot play until the run ends or the time cap is hit
    pub fn run(seed: u64, tuning: Tuning) -> GameState {
        let mut state = GameState::with_tuning(seed, tuning);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        let max_ticks = u64::from(MAX_SESSION_SECS) * 60;
        while state.time_ticks < max_ticks && !state.session.is_game_over() {
            tick(&mut state, &input, SIM_DT);
            for event in state.drain_events() {
                match event {
                    GameEvent::RingSpawned { .. } => log::trace!("{:?}", event),
                    GameEvent::GameOver { .. } => log::info!("{:?}", event),
                    _ => log::debug!("{:?}", event),
                }
            }
        }
        state
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Flying Rings (headless) starting...");

    let tuning = headless::load_tuning(std::env::args().nth(1));
    let seed = rand::random::<u64>();
    let state = headless::run(seed, tuning);

    log::info!(
        "Seed {}: score {}, misses {}, {:.1}s simulated, {} rings spawned",
        seed,
        state.score(),
        state.misses(),
        state.time_ms / 1000.0,
        state.spawner.spawned()
    );
}
