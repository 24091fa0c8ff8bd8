//! Catchy entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use catchy::audio::{AudioManager, SoundEffect};
    use catchy::consts::*;
    use catchy::render::CanvasRenderer;
    use catchy::sim::{GameEvent, GamePhase, GameState, ObjectKind, TickInput, tick};
    use catchy::{HighScores, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        settings: Settings,
        highscores: HighScores,
        input: TickInput,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_muted(settings.muted);
            audio.set_master_volume(settings.master_volume);
            Self {
                state: GameState::new(seed),
                renderer: None,
                audio,
                settings,
                highscores: HighScores::load(),
                input: TickInput::default(),
                last_time: 0.0,
            }
        }

        /// Advance the simulation one frame and service the external sinks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.audio.begin_frame();

            let mut events = Vec::new();
            tick(&mut self.state, &self.input, dt, &mut events);

            // Clear one-shot inputs after processing
            self.input.pause = false;

            for event in events {
                match event {
                    GameEvent::Caught(ObjectKind::Penalty) => self.audio.play(SoundEffect::Hurt),
                    GameEvent::Caught(ObjectKind::Bonus) => self.audio.play(SoundEffect::Coin),
                    GameEvent::Caught(ObjectKind::Neutral) => self.audio.play(SoundEffect::Catch),
                    GameEvent::Missed(_) => self.audio.play(SoundEffect::Miss),
                    GameEvent::ScoreChanged { score, lives } => update_hud(score, lives),
                    GameEvent::GameOver => self.on_game_over(),
                }
            }
        }

        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                renderer.render(&self.state, self.settings.show_spawn_marker);
            }
        }

        fn on_game_over(&mut self) {
            let score = self.state.score;
            if let Some(rank) = self.highscores.record(score, js_sys::Date::now()) {
                log::info!("new high score {} (rank {})", score, rank + 1);
                self.highscores.save();
            }
            show_game_over(score, self.highscores.best());
        }

        /// Reset game state for a fresh run
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed);
            self.input = TickInput::default();
            update_hud(self.state.score, self.state.lives);
            log::info!("game restarted with seed {seed}");
        }
    }

    /// Push new score/lives values to the display sink
    fn update_hud(score: u32, lives: i32) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("score-display") {
            el.set_text_content(Some(&format!("SCORE: {score}")));
        }
        if let Some(el) = document.get_element_by_id("lives-display") {
            el.set_text_content(Some(&format!("LIVES: {lives}")));
        }
    }

    fn show_game_over(score: u32, best: Option<u32>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("game-over") {
            let _ = el.set_attribute("class", "");
        }
        if let Some(el) = document.get_element_by_id("final-score") {
            el.set_text_content(Some(&score.to_string()));
        }
        if let Some(el) = document.get_element_by_id("best-score") {
            if let Some(best) = best {
                el.set_text_content(Some(&best.to_string()));
            }
        }
    }

    fn hide_game_over() {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("game-over"))
        {
            let _ = el.set_attribute("class", "hidden");
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Catchy starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(PLAY_WIDTH as u32);
        canvas.set_height(PLAY_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        game.borrow_mut().renderer = Some(CanvasRenderer::new(ctx));
        update_hud(0, START_LIVES);

        log::info!("Game initialized with seed: {seed}");

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Catchy running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - pointer steers the paddle
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.pointer_x = Some(event.offset_x() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down - user gesture, unlock the audio context
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow().audio.resume();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move (mobile)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let mut g = game.borrow_mut();
                    g.input.pointer_x = Some(x);
                    g.audio.resume();
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: arrows / A / D steer, Escape pauses, M mutes. Holding a
        // directional key drops pointer control until the pointer moves again.
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                match event.code().as_str() {
                    "ArrowLeft" | "KeyA" => {
                        g.input.left_held = true;
                        g.input.pointer_x = None;
                    }
                    "ArrowRight" | "KeyD" => {
                        g.input.right_held = true;
                        g.input.pointer_x = None;
                    }
                    "Escape" => g.input.pause = true,
                    "KeyM" => {
                        let muted = !g.settings.muted;
                        g.settings.muted = muted;
                        g.settings.save();
                        g.audio.set_muted(muted);
                        log::info!("audio muted: {muted}");
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowLeft" | "KeyA" => g.input.left_held = false,
                    "ArrowRight" | "KeyD" => g.input.right_held = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                hide_game_over();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Tab switch / minimize
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.input.pause = true;
                        log::info!("auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Click outside the window
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing {
                    g.input.pause = true;
                    log::info!("auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
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

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                1.0 / 60.0
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
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use catchy::sim::{GameState, TickInput, tick};

    env_logger::init();
    log::info!("Catchy (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Headless smoke run: a minute of simulated play with an idle paddle
    let mut state = GameState::new(42);
    let input = TickInput::default();
    let mut events = Vec::new();
    for _ in 0..3600 {
        tick(&mut state, &input, 1.0 / 60.0, &mut events);
    }
    println!(
        "60s idle run: score {}, lives {}, {} objects in flight, {} events",
        state.score,
        state.lives,
        state.objects.len(),
        events.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
