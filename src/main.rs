//! Pac-BOP entry point
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

    use pac_bop::platform::{Intent, LocalStore, apply_intent, intent_for_key};
    use pac_bop::renderer::{CanvasSink, draw_frame};
    use pac_bop::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use pac_bop::{HighScore, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        sink: CanvasSink,
        settings: Settings,
        store: LocalStore,
        high: HighScore,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, sink: CanvasSink) -> Self {
            let store = LocalStore::new();
            let high = HighScore::load(&store);
            let settings = Settings::load(&store);
            Self {
                state: GameState::new(seed, high.best()),
                sink,
                settings,
                store,
                high,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// One simulation tick per frame, then clear the consumed input
        fn update(&mut self, time: f64) {
            tick(&mut self.state, &self.input);
            self.input = TickInput::default();

            for event in &self.state.events {
                if let GameEvent::GameOver { score, .. } = *event {
                    self.high.record(&mut self.store, score);
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        fn cycle_quality(&mut self) {
            self.settings.cycle_quality(&mut self.store);
        }

        fn render(&mut self, time: f64) {
            draw_frame(&self.state, &mut self.sink, &self.settings, time);
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let set_value = |selector: &str, text: String| {
                if let Some(el) = document.query_selector(selector).ok().flatten() {
                    el.set_text_content(Some(&text));
                }
            };
            set_value("#hud-score .hud-value", self.state.score.to_string());
            set_value("#hud-lives .hud-value", self.state.lives.to_string());
            set_value("#hud-level .hud-value", self.state.level.to_string());
            set_value("#hud-high .hud-value", self.high.best().to_string());
            if self.settings.show_fps {
                set_value("#hud-fps .hud-value", self.fps.to_string());
            }

            let show = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
                }
            };
            show("pause-menu", self.state.phase == GamePhase::Paused);
            show("game-over", self.state.phase == GamePhase::GameOver);
            if self.state.phase == GamePhase::GameOver {
                set_value("#final-score", self.state.score.to_string());
                set_value("#final-level", self.state.level.to_string());
            }
        }

        /// Fit the canvas backing store to its CSS size
        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio());
            let width = (canvas.client_width() as f64 * dpr) as u32;
            let height = (canvas.client_height() as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            self.sink.resize(width, height, self.state.field_size());
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Pac-BOP starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let sink = match CanvasSink::new(&canvas) {
            Ok(sink) => sink,
            Err(e) => {
                log::error!("Canvas unavailable: {e:?}");
                return;
            }
        };

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, sink)));
        game.borrow_mut().resize(&canvas);
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_resize(&canvas, game.clone());
        setup_restart_button(game.clone());
        setup_auto_pause(game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);
        log::info!("Pac-BOP running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            let Some(intent) = intent_for_key(&event.key(), g.state.phase) else {
                return;
            };
            // Keep arrows and space from scrolling the page
            event.prevent_default();
            match intent {
                Intent::CycleQuality => g.cycle_quality(),
                _ => apply_intent(&mut g.input, intent),
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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
            g.update(time);
            g.render(time);
            g.update_hud();
        }
        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.restart = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Running {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Running {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pac-BOP (native) starting...");
    log::info!("Native mode runs a headless attract game - run with `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match pac_bop::Tuning::from_path(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Falling back to default tuning: {e}");
                pac_bop::Tuning::default()
            }
        },
        None => pac_bop::Tuning::default(),
    };

    attract_run(tuning);
}

/// Play one scripted game to completion and log how it went
#[cfg(not(target_arch = "wasm32"))]
fn attract_run(tuning: pac_bop::Tuning) {
    use pac_bop::HighScore;
    use pac_bop::persistence::MemoryStore;
    use pac_bop::sim::{Direction, GameEvent, GamePhase, GameState, MazeLayout, TickInput, tick};

    const MAX_TICKS: u64 = 60 * 60 * 5;
    const TURN_EVERY: u64 = 45;

    let mut store = MemoryStore::new();
    let mut high = HighScore::load(&store);
    let mut state = GameState::with_layout(42, MazeLayout::builtin(), tuning, high.best());

    let mut input = TickInput {
        start: true,
        ..TickInput::default()
    };
    for t in 0..MAX_TICKS {
        if t % TURN_EVERY == 0 {
            let turn = (t / TURN_EVERY) as usize + state.pellets_eaten;
            input.direction = Some(Direction::ALL[turn % Direction::ALL.len()]);
        }
        tick(&mut state, &input);
        input = TickInput::default();

        for event in &state.events {
            match *event {
                GameEvent::LevelComplete { level } => log::info!("Reached level {level}"),
                GameEvent::GameOver { score, .. } => {
                    if high.record(&mut store, score) {
                        log::info!("Attract run set a best of {score}");
                    }
                }
                _ => {}
            }
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "Attract run finished after {} ticks: score {}, level {}, lives {}, pellets eaten {}",
        state.time_ticks,
        state.score,
        state.level,
        state.lives,
        state.pellets_eaten
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
