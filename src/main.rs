//! Tally Tiles entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use tally_tiles::audio::{AudioManager, SoundEffect};
    use tally_tiles::consts::*;
    use tally_tiles::highscores::{HighScoreEntry, HighScores};
    use tally_tiles::layout::PieceLayout;
    use tally_tiles::platform::input::{map_click, map_key};
    use tally_tiles::puzzle::{Command, GameSession, Phase, SessionEvent};
    use tally_tiles::renderer::Feedback;
    use tally_tiles::renderer::canvas::{CanvasRenderer, View};
    use tally_tiles::settings::Settings;

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        settings: Settings,
        renderer: CanvasRenderer,
        audio: AudioManager,
        high_scores: HighScores,
        layout: PieceLayout,
        feedback: Option<Feedback>,
        hinted: Option<usize>,
        /// Timestamp (ms) at which the next round starts after a solve
        next_round_at: Option<f64>,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, renderer: CanvasRenderer) -> Self {
            let session = GameSession::new(seed, settings.tuning(), settings.start_difficulty);
            let layout = PieceLayout::new(session.round().len(), renderer.size);
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_muted(settings.muted);
            Self {
                session,
                settings,
                renderer,
                audio,
                high_scores: HighScores::load(),
                layout,
                feedback: None,
                hinted: None,
                next_round_at: None,
                last_time: 0.0,
            }
        }

        /// Apply a command and react to the outcome
        fn command(&mut self, command: Command) {
            let command = match command {
                Command::Restart(_) => Command::Restart(new_seed()),
                Command::Hint if !self.settings.hints_enabled => return,
                // Rounds advance on their own timer; Enter only skips the wait
                Command::NextRound if self.next_round_at.is_none() => return,
                other => other,
            };

            self.audio.resume();
            let event = self.session.apply(command);
            self.react(&event);
        }

        fn react(&mut self, event: &SessionEvent) {
            let now = self.last_time;

            if let Some(effect) = SoundEffect::for_event(event) {
                self.audio.play(effect);
            }
            if let Some(feedback) = Feedback::for_event(event, self.settings.skin, now) {
                self.feedback = Some(feedback);
            }

            match event {
                SessionEvent::Hinted { index } => self.hinted = Some(*index),
                SessionEvent::Picked { index, .. } if self.hinted == Some(*index) => {
                    self.hinted = None
                }
                SessionEvent::Solved { .. } => {
                    self.hinted = None;
                    self.next_round_at = Some(now + NEXT_ROUND_DELAY_MS);
                }
                SessionEvent::Overshot { .. } | SessionEvent::Cleared => self.hinted = None,
                SessionEvent::GameOver { score, rounds_cleared } => {
                    self.hinted = None;
                    self.record_score(*score, *rounds_cleared);
                }
                SessionEvent::RoundStarted { .. } => {
                    self.hinted = None;
                    self.next_round_at = None;
                    self.layout = PieceLayout::new(self.session.round().len(), self.renderer.size);
                }
                _ => {}
            }
        }

        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.audio.set_muted(self.settings.muted);
            self.settings.save();
        }

        /// Switch to the next skin and start a fresh game with its tuning
        fn cycle_skin(&mut self) {
            self.settings.skin = self.settings.skin.next();
            self.settings.custom_tuning = None;
            self.settings.save();
            log::info!("Skin: {}", self.settings.skin.as_str());

            self.session = GameSession::new(
                new_seed(),
                self.settings.tuning(),
                self.settings.start_difficulty,
            );
            self.react(&SessionEvent::RoundStarted {
                round_index: 0,
                difficulty: self.session.difficulty,
            });
        }

        fn record_score(&mut self, score: u64, rounds_cleared: u32) {
            let entry = HighScoreEntry {
                score,
                rounds_cleared,
                best_streak: self.session.best_streak,
                timestamp: js_sys::Date::now(),
            };
            if let Some(rank) = self.high_scores.add(entry) {
                log::info!("New high score #{}: {}", rank, score);
                self.high_scores.save();
                if rank == 1 {
                    self.audio.play(SoundEffect::HighScore);
                }
            }
        }

        /// Advance timers
        fn update(&mut self, time: f64) {
            self.last_time = time;

            if let Some(at) = self.next_round_at {
                if time >= at && self.session.phase == Phase::Solved {
                    let event = self.session.apply(Command::NextRound);
                    self.react(&event);
                }
            }
            if self.feedback.as_ref().is_some_and(|f| !f.visible(time)) {
                self.feedback = None;
            }
        }

        fn render(&self, time: f64) {
            let view = View {
                skin: self.settings.skin,
                hinted: self.hinted,
                feedback: self.feedback.as_ref(),
                high_contrast: self.settings.high_contrast,
                reduced_motion: self.settings.reduced_motion,
            };
            self.renderer.render(&self.session, &self.layout, &view, time);
        }
    }

    fn new_seed() -> u64 {
        (js_sys::Math::random() * u64::MAX as f64) as u64 ^ js_sys::Date::now() as u64
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }

        log::info!("Tally Tiles starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };

        // Game lives inside #game-container, or the body if the page has none
        let container = document
            .get_element_by_id("game-container")
            .or_else(|| document.body().map(Into::into));
        let Some(container) = container else {
            log::error!("No container element for the canvas");
            return;
        };

        let Some(canvas) = document
            .create_element("canvas")
            .ok()
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("Failed to create canvas");
            return;
        };
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);
        canvas.set_tab_index(0);
        if container.append_child(&canvas).is_err() {
            log::error!("Failed to attach canvas");
            return;
        }

        let Some(renderer) = CanvasRenderer::new(&canvas) else {
            log::error!("2D canvas context unavailable");
            return;
        };

        let settings = Settings::load();
        let seed = new_seed();
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game::new(seed, settings, renderer)));

        setup_input_handlers(&canvas, game.clone());
        setup_auto_mute(game.clone());
        let _ = canvas.focus();

        request_animation_frame(game);

        log::info!("Tally Tiles running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Click -> piece under the pointer
        {
            let game = game.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = target.get_bounding_client_rect();
                if rect.width() <= 0.0 || rect.height() <= 0.0 {
                    return;
                }
                // Map CSS pixels to canvas pixels
                let x = (event.client_x() as f64 - rect.left()) * CANVAS_WIDTH as f64 / rect.width();
                let y = (event.client_y() as f64 - rect.top()) * CANVAS_HEIGHT as f64 / rect.height();

                let mut g = game.borrow_mut();
                let command = map_click(&g.layout, Vec2::new(x as f32, y as f32));
                match (command, g.session.phase) {
                    (Some(command), _) => g.command(command),
                    (None, Phase::GameOver) => g.command(Command::Restart(0)),
                    _ => {}
                }
            });
            let _ = canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let key = event.key();
                let mut g = game.borrow_mut();
                match key.as_str() {
                    "m" | "M" => g.toggle_mute(),
                    "s" | "S" => g.cycle_skin(),
                    _ => match map_key(&key) {
                        Some(command) => g.command(command),
                        None => return,
                    },
                }
                event.prevent_default();
            });
            let _ = canvas.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_mute(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        for (event_name, muted) in [("blur", true), ("focus", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    let muted = muted || g.settings.muted;
                    g.audio.set_muted(muted);
                    log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
                }
            });
            let _ = window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
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
            g.update(time);
            g.render(time);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Native demo: autoplay rounds with the solver and log them.
///
/// Usage: `tally-tiles [seed] [rounds] [skin] [level]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tally_tiles::clamp_difficulty;
    use tally_tiles::puzzle::{Command, GameSession, SessionEvent};
    use tally_tiles::settings::Settings;
    use tally_tiles::tuning::Skin;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = args
        .first()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(rand::random);
    let rounds = args.get(1).and_then(|s| s.parse::<u32>().ok()).unwrap_or(10);
    let skin = args
        .get(2)
        .and_then(|s| Skin::from_str(s))
        .unwrap_or_default();
    let level = args
        .get(3)
        .and_then(|s| s.parse::<i64>().ok())
        .map(clamp_difficulty)
        .unwrap_or(0);
    let settings = Settings {
        start_difficulty: level,
        ..Settings::from_skin(skin)
    };

    log::info!(
        "Tally Tiles (native) autoplay: seed={} rounds={} skin={} level={}",
        seed,
        rounds,
        skin.as_str(),
        level
    );

    let mut session = GameSession::new(seed, settings.tuning(), settings.start_difficulty);
    for _ in 0..rounds {
        let round = session.round().clone();
        let events = session.autoplay_round();
        match events.last() {
            Some(SessionEvent::Solved { points, .. }) => println!(
                "round {:>2}  {:<24} pieces {:?}  ->  {}  (+{})",
                session.round_index + 1,
                round.prompt(),
                round.pieces,
                session.attempt().equation(),
                points
            ),
            other => {
                log::error!("Autoplay could not solve {:?}: {:?}", round, other);
                std::process::exit(1);
            }
        }
        session.apply(Command::NextRound);
    }

    println!(
        "cleared {} rounds, difficulty {}, score {}",
        session.rounds_cleared, session.difficulty, session.score
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
