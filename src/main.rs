//! Season Flap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{KeyboardEvent, MouseEvent, TouchEvent};

    use season_flap::consts::*;
    use season_flap::persistence::LocalStorageStore;
    use season_flap::platform::decode_key;
    use season_flap::sim::{InputEvent, Session};
    use season_flap::{Settings, Tier, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session,
        last_time: f64,
        last_tier: Tier,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let last_tier = settings.last_tier;
            Self {
                session: Session::new(
                    seed,
                    Tuning::default(),
                    settings,
                    Box::new(LocalStorageStore::new()),
                ),
                last_time: 0.0,
                last_tier,
            }
        }

        fn input(&mut self, event: InputEvent) {
            self.session.handle_input(event);

            // Remember the chosen tier for the next visit
            let tier = self.session.settings().last_tier;
            if tier != self.last_tier {
                self.last_tier = tier;
                self.session.settings().save();
            }
        }

        /// Hand the latest snapshot to the page's renderer, if it installed one
        fn publish(&self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let Ok(render) = js_sys::Reflect::get(&window, &JsValue::from_str("renderSnapshot")) else {
                return;
            };
            let Ok(render) = render.dyn_into::<js_sys::Function>() else {
                return;
            };
            match self.session.snapshot().to_json() {
                Ok(json) => {
                    if let Err(e) = render.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                        log::warn!("renderSnapshot failed: {:?}", e);
                    }
                }
                Err(e) => log::error!("Snapshot serialization failed: {}", e),
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Season Flap starting...");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        request_animation_frame(game);

        log::info!("Season Flap running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, input disabled");
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(input) = decode_key(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().input(input);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input(InputEvent::Impulse);
            });
            let _ = window
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input(InputEvent::Impulse);
            });
            let _ = window
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
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

            g.session.advance(dt);
            g.publish();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Longest headless run (two minutes of play)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_MAX_TICKS: u32 = 120 * season_flap::consts::SIM_HZ;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;

    use season_flap::persistence::JsonFileStore;
    use season_flap::sim::{InputEvent, Session, SessionPhase};
    use season_flap::{Settings, Tuning};

    env_logger::init();
    log::info!("Season Flap (native) starting...");
    log::info!("Native mode runs a headless autopilot - serve the wasm build for the playable version");

    let settings = Settings::load_from(Path::new("season_flap_settings.json"));
    let tuning = match std::fs::read_to_string("season_flap_tuning.json") {
        Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring invalid tuning file: {}", e);
            Tuning::default()
        }),
        Err(_) => Tuning::default(),
    };
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let store = JsonFileStore::new("season_flap_best_scores.json");
    let mut session = Session::new(seed, tuning, settings, Box::new(store));
    session.handle_input(InputEvent::Confirm);

    for _ in 0..HEADLESS_MAX_TICKS {
        if autopilot_wants_flap(&session) {
            session.handle_input(InputEvent::Impulse);
        }
        session.tick();
        if session.phase() == SessionPhase::GameOver {
            break;
        }
    }

    let snapshot = session.snapshot();
    println!(
        "tier {} | score {} | best {} | lives {} | season {}{}",
        snapshot.tier.as_str(),
        snapshot.score,
        snapshot.best_score,
        snapshot.agent.lives,
        snapshot.stage_index,
        if snapshot.new_best { " | new best!" } else { "" }
    );
}

/// Flap when falling below the middle of the next gap
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_wants_flap(session: &season_flap::sim::Session) -> bool {
    use season_flap::consts::*;

    let agent = session.agent();
    if !agent.started {
        return true;
    }
    let target = session
        .obstacles()
        .obstacles()
        .iter()
        .find(|o| o.right() >= agent.x)
        .map(|o| o.gap_top + o.gap / 2.0)
        .unwrap_or((CANVAS_HEIGHT - GROUND_HEIGHT) / 2.0);

    agent.velocity >= 0.0 && agent.y + HITBOX_HEIGHT / 2.0 > target + 10.0
}
