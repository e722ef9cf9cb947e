//! Pizza Delivery entry point
//!
//! On the web this hosts the session in a requestAnimationFrame loop, maps the
//! keyboard onto control signals and mirrors the HUD into the DOM. Natively it
//! flies a headless autopilot session and logs how far it got.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent};

    use pizza_delivery::consts::*;
    use pizza_delivery::sim::{ControlSignals, FlightMode, Signal};
    use pizza_delivery::upgrades::store::{self, LocalStore};
    use pizza_delivery::{Bounds, Game, HudSnapshot, Screen, Tuning};

    /// Tuning override read from LocalStorage, if present
    const TUNING_KEY: &str = "pizza-delivery-tuning";

    /// Everything the frame loop and the DOM listeners share
    struct Host {
        game: Game,
        input: ControlSignals,
        store: LocalStore,
        last_time: f64,
    }

    impl Host {
        fn frame(&mut self, time: f64) {
            let dt_ms = if self.last_time > 0.0 {
                (time - self.last_time) as f32
            } else {
                FRAME_MS
            };
            self.last_time = time;

            for event in self.game.tick(&self.input, dt_ms) {
                log::debug!("Stage event: {:?}", event);
            }
            self.persist();
        }

        fn persist(&mut self) {
            if self.game.take_upgrades_dirty() {
                if let Err(e) = store::save(&mut self.store, self.game.upgrades()) {
                    log::warn!("Could not save upgrades: {}", e);
                }
            }
        }
    }

    /// Physical key to control signal
    fn key_signal(code: &str) -> Option<Signal> {
        match code {
            "ArrowUp" | "KeyW" => Some(Signal::MoveUp),
            "ArrowDown" | "KeyS" => Some(Signal::MoveDown),
            "ArrowLeft" | "KeyA" => Some(Signal::MoveLeft),
            "ArrowRight" | "KeyD" => Some(Signal::MoveRight),
            "ShiftLeft" | "ShiftRight" => Some(Signal::Boost),
            "Space" => Some(Signal::Shoot),
            _ => None,
        }
    }

    fn load_tuning() -> Tuning {
        use pizza_delivery::upgrades::KeyValueStore;

        match LocalStore.get(TUNING_KEY) {
            Some(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring bad tuning override: {}", e);
                Tuning::default()
            }),
            None => Tuning::default(),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Pizza Delivery starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let bounds = document
            .get_element_by_id("playfield")
            .map(|el| Bounds::new(el.client_width() as f32, el.client_height() as f32))
            .filter(|b| b.width > 0.0 && b.height > 0.0)
            .unwrap_or_default();

        let store = LocalStore;
        let upgrades = store::load(&store);
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(upgrades, load_tuning(), bounds, seed);
        log::info!("Session seed {} on a {}x{} playfield", seed, bounds.width, bounds.height);

        let host = Rc::new(RefCell::new(Host {
            game,
            input: ControlSignals::default(),
            store,
            last_time: 0.0,
        }));

        setup_keyboard(&window, host.clone());
        setup_buttons(&document, host.clone());
        setup_auto_pause(&window, &document, host.clone());

        request_animation_frame(host);

        log::info!("Pizza Delivery running!");
    }

    fn setup_keyboard(window: &web_sys::Window, host: Rc<RefCell<Host>>) {
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                let mut h = host.borrow_mut();
                if let Some(signal) = key_signal(&code) {
                    event.prevent_default();
                    h.input.set(signal, true);
                    return;
                }
                match (code.as_str(), h.game.screen()) {
                    ("Escape", _) => h.game.toggle_pause(),
                    ("Enter", Screen::Start) => {
                        h.game.start(FlightMode::Campaign);
                    }
                    ("Enter", Screen::GalaxyMap) => {
                        h.game.continue_journey();
                    }
                    ("Enter", Screen::GameOver { .. }) => {
                        h.game.continue_from_here();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(signal) = key_signal(&event.code()) {
                    host.borrow_mut().input.set(signal, false);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Wire a click handler to an element if the page has it
    fn on_click(document: &Document, id: &str, host: &Rc<RefCell<Host>>, action: fn(&mut Host)) {
        let Some(el) = document.get_element_by_id(id) else {
            return;
        };
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut h = host.borrow_mut();
            action(&mut h);
            h.persist();
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, host: Rc<RefCell<Host>>) {
        on_click(document, "start-btn", &host, |h| {
            h.game.start(FlightMode::Campaign);
        });
        on_click(document, "classic-btn", &host, |h| {
            h.game.start(FlightMode::Classic);
        });
        on_click(document, "continue-btn", &host, |h| {
            h.game.continue_from_here();
        });
        on_click(document, "journey-btn", &host, |h| {
            h.game.continue_journey();
        });
        on_click(document, "menu-btn", &host, |h| {
            h.input.clear();
            h.game.main_menu();
        });
        on_click(document, "resume-btn", &host, |h| h.game.set_paused(false));
        on_click(document, "reset-upgrades-btn", &host, |h| h.game.reset_upgrades());

        // Galaxy map planets carry their level index in the id
        for level in 0..pizza_delivery::tables::LEVEL_COUNT {
            let Some(el) = document.get_element_by_id(&format!("planet-{}", level)) else {
                continue;
            };
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                host.borrow_mut().game.select_level(level);
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(window: &web_sys::Window, document: &Document, host: Rc<RefCell<Host>>) {
        {
            let host = host.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut h = host.borrow_mut();
                    if !h.game.is_paused() && h.game.stage().is_some() {
                        h.game.set_paused(true);
                        log::info!("Auto-paused (tab hidden)");
                    }
                    h.input.clear();
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
                let mut h = host.borrow_mut();
                if !h.game.is_paused() && h.game.stage().is_some() {
                    h.game.set_paused(true);
                    log::info!("Auto-paused (window blur)");
                }
                h.input.clear();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>, time: f64) {
        {
            let mut h = host.borrow_mut();
            h.frame(time);
            update_hud(&h.game.snapshot());
        }

        request_animation_frame(host);
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Mirror a snapshot into the DOM
    fn update_hud(hud: &HudSnapshot) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        set_visible(&document, "start-screen", hud.screen == Screen::Start);
        set_visible(&document, "galaxy-map", hud.screen == Screen::GalaxyMap);
        set_visible(&document, "pause-menu", hud.paused);
        set_visible(&document, "hud", hud.flight.is_some() || hud.boss.is_some());
        set_text(&document, "hud-points", &hud.available_points.to_string());

        match hud.screen {
            Screen::GameOver { score } => {
                set_visible(&document, "game-over", true);
                set_text(&document, "final-score", &score.to_string());
            }
            Screen::Victory { score } => {
                set_visible(&document, "victory", true);
                set_text(&document, "victory-score", &score.to_string());
            }
            _ => {
                set_visible(&document, "game-over", false);
                set_visible(&document, "victory", false);
            }
        }

        if let Some(flight) = &hud.flight {
            set_text(&document, "hud-score", &flight.score.to_string());
            set_text(&document, "hud-lives", &flight.lives.to_string());
            set_text(&document, "hud-fuel", &format!("{:.0}%", flight.fuel));
            set_text(&document, "hud-level", flight.level_name);
            set_text(
                &document,
                "hud-progress",
                &format!("{:.0}%", flight.progress() * 100.0),
            );
            set_visible(&document, "hud-combo", flight.combo > 1);
            set_text(&document, "hud-combo", &format!("x{}", flight.combo));
            set_visible(&document, "level-banner", flight.banner.is_some());
            if let Some(name) = flight.banner {
                set_text(&document, "level-banner", name);
            }
        }

        set_visible(&document, "boss-hud", hud.boss.is_some());
        if let Some(boss) = &hud.boss {
            set_text(&document, "hud-score", &boss.score.to_string());
            set_text(&document, "hud-lives", &boss.lives.to_string());
            set_text(&document, "boss-name", boss.boss_name);
            set_text(
                &document,
                "boss-health",
                &format!("{:.0}%", boss.boss_health_percent),
            );
            set_text(&document, "boss-phase", &format!("Phase {}", boss.phase));
            set_visible(&document, "boss-defeated", boss.victory_pending);
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
    log::info!("Pizza Delivery (native) starting...");
    log::info!("The browser build hosts the real game; running a headless autopilot session");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2024);
    autopilot::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {}

/// Headless session flown by a simple steering rule
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use pizza_delivery::consts::FRAME_MS;
    use pizza_delivery::game::ActiveStage;
    use pizza_delivery::sim::{ControlSignals, FlightMode};
    use pizza_delivery::upgrades::{Category, MemoryStore, store};
    use pizza_delivery::{Bounds, Game, Screen, Tuning};

    /// Give up after this many frames (about ten minutes of play)
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    /// Steer away from the nearest threat in front of the ship and keep firing
    fn steer(game: &Game) -> ControlSignals {
        let mut input = ControlSignals {
            shoot: true,
            ..Default::default()
        };
        match game.stage() {
            Some(ActiveStage::Flight(stage)) => {
                let center = stage.player.center();
                let threat = stage
                    .asteroids
                    .iter()
                    .filter(|a| a.pos.x > center.x && a.pos.x - center.x < 200.0)
                    .min_by(|a, b| a.pos.distance(center).total_cmp(&b.pos.distance(center)));
                if let Some(rock) = threat {
                    if (rock.pos.y - center.y).abs() < rock.radius + 30.0 {
                        input.move_up = rock.pos.y >= center.y;
                        input.move_down = rock.pos.y < center.y;
                    }
                }
                input.boost = stage.fuel > 50.0 && threat.is_none();
            }
            Some(ActiveStage::Boss(stage)) => {
                let dy = stage.boss.center().y - stage.player.center().y;
                input.move_up = dy < -10.0;
                input.move_down = dy > 10.0;
            }
            None => {}
        }
        input
    }

    pub fn run(seed: u64) {
        let mut store = MemoryStore::new();
        let mut game = Game::new(
            store::load(&store),
            Tuning::default(),
            Bounds::default(),
            seed,
        );
        game.start(FlightMode::Campaign);

        let mut frames = 0;
        while frames < MAX_FRAMES {
            let input = steer(&game);
            game.tick(&input, FRAME_MS);
            frames += 1;

            if game.take_upgrades_dirty() {
                if let Err(e) = store::save(&mut store, game.upgrades()) {
                    log::warn!("Could not save upgrades: {}", e);
                }
            }

            match game.screen() {
                Screen::GalaxyMap => {
                    let outcome = game.purchase(Category::FiringMode, "double");
                    log::debug!("Tried to buy double shot: {:?}", outcome);
                    game.continue_journey();
                }
                Screen::GameOver { .. } | Screen::Victory { .. } => break,
                _ => {}
            }
        }

        let progression = game.progression();
        log::info!(
            "Autopilot finished after {} frames on {:?}: levels cleared {:?}, {} upgrade points",
            frames,
            game.screen(),
            progression.completed_levels(),
            game.upgrades().total_points
        );
    }
}
