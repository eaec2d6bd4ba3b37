//! Nova Strike entry point
//!
//! Browser builds wire the loop driver to a canvas, the keyboard, the DOM HUD
//! and Web Audio. Native builds run a headless autopilot session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use nova_strike::audio::{AudioManager, SoundEffect};
    use nova_strike::highscores::HighScores;
    use nova_strike::platform::keyboard;
    use nova_strike::platform::web::{CanvasSurface, FrameScheduler};
    use nova_strike::renderer::Surface;
    use nova_strike::sim::Weapon;
    use nova_strike::{FrameOutcome, GameHooks, LoopDriver, Settings};

    const CANVAS_ID: &str = "canvas";

    fn element(id: &str) -> Option<web_sys::Element> {
        web_sys::window()?.document()?.get_element_by_id(id)
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(id: &str, visible: bool) {
        if let Some(el) = element(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// HUD, sound and leaderboard side of the game
    struct BrowserHooks {
        audio: AudioManager,
        high_scores: HighScores,
        player_name: String,
    }

    impl BrowserHooks {
        fn show_leaderboard(&self) {
            let rows: Vec<String> = self
                .high_scores
                .entries
                .iter()
                .enumerate()
                .map(|(i, e)| format!("{}. {} {}", i + 1, e.name, e.score))
                .collect();
            set_text("high-scores", &rows.join("\n"));
        }
    }

    impl GameHooks for BrowserHooks {
        fn score_changed(&mut self, score: u64) {
            set_text("hud-score", &score.to_string());
        }

        fn lives_changed(&mut self, lives: u32) {
            set_text("hud-lives", &lives.to_string());
        }

        fn weapon_changed(&mut self, weapon: Weapon) {
            set_text("hud-weapon", weapon.name());
        }

        fn autopilot_changed(&mut self, enabled: bool) {
            set_visible("hud-autopilot", enabled);
        }

        fn play_sound(&mut self, effect: SoundEffect) {
            self.audio.play(effect);
        }

        fn settings_changed(&mut self, settings: &Settings) {
            self.audio.apply_settings(settings);
            set_visible("hud-muted", settings.muted);
        }

        fn game_over(&mut self, final_score: u64) {
            set_text("final-score", &final_score.to_string());
            match self.high_scores.add_score(&self.player_name, final_score) {
                Some(rank) => {
                    log::info!("New high score #{}: {}", rank, final_score);
                    set_text("final-rank", &format!("#{}", rank));
                    self.high_scores.save();
                }
                None => set_text("final-rank", ""),
            }
            self.show_leaderboard();
            set_visible("game-over", true);
        }
    }

    struct Game {
        driver: LoopDriver<BrowserHooks>,
        surface: Option<CanvasSurface>,
        scheduler: FrameScheduler,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Nova Strike starting...");

        let settings = Settings::load();
        let hooks = BrowserHooks {
            audio: AudioManager::new(&settings),
            high_scores: HighScores::load(),
            player_name: settings.player_name.clone(),
        };
        hooks.show_leaderboard();

        let surface = CanvasSurface::from_element_id(CANVAS_ID);
        if surface.is_none() {
            log::warn!("Canvas #{} not available yet", CANVAS_ID);
        }

        let game = Rc::new(RefCell::new(Game {
            driver: LoopDriver::new(hooks, settings),
            surface,
            scheduler: FrameScheduler::new(),
        }));

        setup_keyboard(game.clone());
        setup_restart_button(game.clone());
        setup_teardown(game.clone());

        set_visible("loading", false);
        schedule(game);

        log::info!("Nova Strike running!");
    }

    fn schedule(game: Rc<RefCell<Game>>) {
        let scheduler = game.borrow().scheduler.clone();
        if scheduler.is_pending() {
            return;
        }
        scheduler.request(move |time| game_loop(game, time));
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let outcome = {
            let mut g = game.borrow_mut();
            if g.surface.is_none() {
                g.surface = CanvasSurface::from_element_id(CANVAS_ID);
            }
            let Game {
                driver, surface, ..
            } = &mut *g;
            driver.frame(time, surface.as_mut().map(|s| s as &mut dyn Surface))
        };

        match outcome {
            FrameOutcome::Rendered | FrameOutcome::Skipped => schedule(game),
            FrameOutcome::GameOver { final_score } => {
                log::info!("Loop ended with score {}", final_score);
            }
            FrameOutcome::Stopped => {}
        }
    }

    fn restart(game: &Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.scheduler.cancel();
            g.driver.restart();
        }
        set_visible("game-over", false);
        schedule(game.clone());
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key();
                let running = game.borrow().driver.is_running();
                if key == "Enter" && !running {
                    restart(&game);
                    return;
                }

                let mut g = game.borrow_mut();
                g.driver.hooks().audio.resume();
                if (key == "m" || key == "M") && !event.repeat() {
                    toggle_mute(&mut g.driver);
                    return;
                }
                if keyboard::key_down(g.driver.input_mut(), &key, event.repeat()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                if keyboard::key_up(g.driver.input_mut(), &event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn toggle_mute(driver: &mut LoopDriver<BrowserHooks>) {
        let mut settings = driver.settings().clone();
        settings.muted = !settings.muted;
        settings.save();
        log::info!("Sound {}", if settings.muted { "muted" } else { "on" });
        driver.apply_settings(settings);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let Some(btn) = element("restart-btn") else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            restart(&game);
            log::info!("Game restarted");
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Stop the loop when the page goes away
    fn setup_teardown(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.scheduler.cancel();
            g.driver.stop();
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use nova_strike::audio::{AudioManager, SoundEffect};
    use nova_strike::consts::{FRAME_MS, INITIAL_LIVES};
    use nova_strike::renderer::RecordingSurface;
    use nova_strike::{FrameOutcome, GameHooks, HighScores, LoopDriver, Settings};

    /// Frames simulated when no count is given (five minutes at 60 Hz)
    const DEFAULT_FRAMES: u64 = 5 * 60 * 60;

    struct HeadlessHooks {
        audio: AudioManager,
        high_scores: HighScores,
        player_name: String,
        extra_lives: u32,
        last_lives: u32,
    }

    impl HeadlessHooks {
        fn new(settings: &Settings) -> Self {
            Self {
                audio: AudioManager::new(settings),
                high_scores: HighScores::load(),
                player_name: settings.player_name.clone(),
                extra_lives: 0,
                last_lives: INITIAL_LIVES,
            }
        }
    }

    impl GameHooks for HeadlessHooks {
        fn lives_changed(&mut self, lives: u32) {
            if lives > self.last_lives {
                self.extra_lives += lives - self.last_lives;
            }
            self.last_lives = lives;
        }

        fn play_sound(&mut self, effect: SoundEffect) {
            self.audio.play(effect);
        }

        fn settings_changed(&mut self, settings: &Settings) {
            self.audio.apply_settings(settings);
        }

        fn game_over(&mut self, final_score: u64) {
            if let Some(rank) = self.high_scores.add_score(&self.player_name, final_score) {
                log::info!("Score {} ranks #{}", final_score, rank);
                self.high_scores.save();
            }
        }
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Nova Strike (native) starting headless autopilot run...");

        let mut args = std::env::args().skip(1);
        let frames = match args.next() {
            Some(arg) => arg.parse().unwrap_or_else(|_| {
                log::warn!("Invalid frame count {:?}, using {}", arg, DEFAULT_FRAMES);
                DEFAULT_FRAMES
            }),
            None => DEFAULT_FRAMES,
        };
        let mut settings = match args.next() {
            Some(path) => Settings::load_file(Path::new(&path)),
            None => Settings::load(),
        };
        settings.autopilot_on_start = true;

        let hooks = HeadlessHooks::new(&settings);
        let mut driver = LoopDriver::new(hooks, settings);
        let mut surface = RecordingSurface::new();

        let mut frame = 0;
        let mut final_score = None;
        while frame < frames {
            let now = frame as f64 * FRAME_MS as f64;
            frame += 1;
            match driver.frame(now, Some(&mut surface)) {
                FrameOutcome::Rendered | FrameOutcome::Skipped => {}
                FrameOutcome::GameOver { final_score: score } => {
                    final_score = Some(score);
                    break;
                }
                FrameOutcome::Stopped => break,
            }
        }
        driver.stop();

        let state = driver.state();
        let hooks = driver.hooks();
        match final_score {
            Some(score) => log::info!("Game over after {} frames, final score {}", frame, score),
            None => log::info!(
                "Survived {} frames with {} lives, score {}",
                frame,
                state.player.lives,
                state.score
            ),
        }
        println!(
            "frames={} score={} lives={} extra_lives={} draw_calls={} sounds={}",
            frame,
            state.score,
            state.player.lives,
            hooks.extra_lives,
            surface.commands().len(),
            hooks.audio.played()
        );
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
