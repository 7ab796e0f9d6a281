//! Browser entry point
//!
//! A JS presentation layer owns the canvas, the DOM and the event listeners.
//! It forwards input and lifecycle events here, calls `frame` from
//! `requestAnimationFrame`, and draws whatever `snapshot_json` returns.

use wasm_bindgen::prelude::*;

use super::{Direction, Runner};
use crate::audio::AudioManager;
use crate::config::Config;
use crate::persistence::LocalStorageStore;
use crate::settings::Settings;
use crate::sim::Signal;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WebGame {
    runner: Runner<AudioManager, LocalStorageStore>,
}

#[wasm_bindgen]
impl WebGame {
    /// Build the game. `config_json` optionally overrides tuning values.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<WebGame, JsValue> {
        console_error_panic_hook::set_once();
        // Already initialized when a second game is created
        let _ = console_log::init_with_level(log::Level::Info);

        let config = match config_json {
            Some(json) => Config::from_json(&json).map_err(to_js)?,
            None => Config::default(),
        };
        let seed = js_sys::Date::now() as u64;
        let runner = Runner::new(
            config,
            seed,
            Settings::load(),
            AudioManager::new(),
            LocalStorageStore,
        )
        .map_err(to_js)?;
        log::info!("Gold Rush initialized with seed: {}", seed);
        Ok(WebGame { runner })
    }

    /// Assets finished loading; show the menu
    pub fn assets_ready(&mut self) -> bool {
        self.runner.signal(Signal::AssetsReady)
    }

    /// Start from the menu or restart after game over
    pub fn start(&mut self) -> bool {
        self.runner.signal(Signal::Start)
    }

    pub fn pause(&mut self) -> bool {
        self.runner.signal(Signal::Pause)
    }

    pub fn resume(&mut self) -> bool {
        self.runner.signal(Signal::Resume)
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.runner.signal(Signal::TogglePause)
    }

    /// `visibilitychange` and window `blur`
    pub fn visibility_changed(&mut self, hidden: bool) {
        self.runner.visibility_changed(hidden);
    }

    /// Returns true if the key is a movement key (caller should preventDefault)
    pub fn key_down(&mut self, key: &str) -> bool {
        self.runner.input_mut().key_down(key)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.runner.input_mut().key_up(key)
    }

    /// On-screen direction buttons
    pub fn touch(&mut self, direction: &str, pressed: bool) {
        match Direction::from_name(direction) {
            Some(dir) => self.runner.input_mut().touch(dir, pressed),
            None => log::warn!("Unknown touch control: {}", direction),
        }
    }

    /// Advance one display frame. `timestamp` is the rAF timestamp in ms.
    pub fn frame(&mut self, timestamp: f64) {
        self.runner.frame(timestamp);
    }

    /// Everything needed to draw the current frame
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.runner.snapshot()).map_err(to_js)
    }

    /// Events produced by the last frame or signal
    pub fn events_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.runner.events()).map_err(to_js)
    }

    pub fn set_sound(&mut self, on: bool) {
        let settings = Settings {
            sound: on,
            ..self.runner.settings().clone()
        };
        self.apply(settings);
    }

    pub fn set_debug(&mut self, on: bool) {
        let settings = Settings {
            show_debug: on,
            ..self.runner.settings().clone()
        };
        self.apply(settings);
    }

    pub fn high_score(&self) -> u32 {
        self.runner.state().high_score.best
    }
}

impl WebGame {
    /// Persist and apply changed preferences
    fn apply(&mut self, settings: Settings) {
        if let Err(e) = settings.save() {
            log::warn!("Could not save settings: {e}");
        }
        self.runner.apply_settings(settings);
    }
}

/// `M:SS` label for the HUD
#[wasm_bindgen(js_name = formatTime)]
pub fn format_time(seconds: f32) -> String {
    crate::format_time(seconds)
}
