//! Platform abstraction layer
//!
//! Handles what sits between the browser (or a headless driver) and the
//! simulation:
//! - Frame timing from display-refresh timestamps
//! - Input events folded into one directional intent
//! - Visibility/focus loss
//! - Routing simulation events to audio and storage

#[cfg(target_arch = "wasm32")]
pub mod web;

use serde::{Deserialize, Serialize};

use crate::audio::AudioSink;
use crate::config::Config;
use crate::error::ConfigError;
use crate::highscores::HighScore;
use crate::persistence::HighScoreStore;
use crate::settings::Settings;
use crate::sim::{DirectionalIntent, GameEvent, GameState, Signal, Snapshot, TickInput, tick};

/// Turns frame timestamps into bounded simulation steps
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous frame, in `[0, max_dt]`. The first frame
    /// after construction or `reset` yields 0.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        if !now_ms.is_finite() {
            return 0.0;
        }
        let dt = match self.last_ms.replace(now_ms) {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        dt.clamp(0.0, self.max_dt)
    }

    /// Forget the previous timestamp (after a pause or a hidden tab)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Map a `KeyboardEvent.key` value: arrow keys and WASD
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            _ => None,
        }
    }

    /// Map an on-screen control name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }
}

fn set_direction(intent: &mut DirectionalIntent, direction: Direction, held: bool) {
    match direction {
        Direction::Left => intent.left = held,
        Direction::Right => intent.right = held,
        Direction::Up => intent.up = held,
        Direction::Down => intent.down = held,
    }
}

/// Held directions per input source
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    keyboard: DirectionalIntent,
    touch: DirectionalIntent,
}

impl InputState {
    /// Returns true if the key controls movement
    pub fn key_down(&mut self, key: &str) -> bool {
        self.key(key, true)
    }

    pub fn key_up(&mut self, key: &str) -> bool {
        self.key(key, false)
    }

    fn key(&mut self, key: &str, held: bool) -> bool {
        let Some(direction) = Direction::from_key(key) else {
            return false;
        };
        set_direction(&mut self.keyboard, direction, held);
        true
    }

    pub fn touch(&mut self, direction: Direction, held: bool) {
        set_direction(&mut self.touch, direction, held);
    }

    /// Release everything (focus lost, so key-up events will never arrive)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The device-independent intent the simulation reads
    pub fn intent(&self) -> DirectionalIntent {
        self.keyboard.merge(self.touch)
    }
}

/// Drives a `GameState` and connects it to its collaborators
pub struct Runner<A, S> {
    state: GameState,
    clock: FrameClock,
    input: InputState,
    settings: Settings,
    audio: A,
    store: S,
    /// Events from the most recent frame or signal
    events: Vec<GameEvent>,
}

impl<A: AudioSink, S: HighScoreStore> Runner<A, S> {
    /// Validate the config and load the stored high score
    pub fn new(
        config: Config,
        seed: u64,
        settings: Settings,
        audio: A,
        mut store: S,
    ) -> Result<Self, ConfigError> {
        let mut state = GameState::new(config, seed)?;
        state.high_score = store.load_or_default();
        let clock = FrameClock::new(state.config.max_frame_dt);
        let mut runner = Self {
            state,
            clock,
            input: InputState::default(),
            settings: Settings::default(),
            audio,
            store,
            events: Vec::new(),
        };
        runner.apply_settings(settings);
        Ok(runner)
    }

    pub fn apply_settings(&mut self, settings: Settings) {
        self.state.max_particles = settings.max_particles();
        self.state.debug = settings.show_debug;
        self.audio.set_volume(settings.effective_volume());
        self.settings = settings;
    }

    /// Feed a lifecycle signal to the state machine
    pub fn signal(&mut self, signal: Signal) -> bool {
        self.events.clear();
        let changed = self.state.handle(signal);
        if changed {
            // The next frame must not count the time spent outside play
            self.clock.reset();
        }
        self.dispatch();
        changed
    }

    /// Page visibility or window focus changed
    pub fn visibility_changed(&mut self, hidden: bool) {
        if !hidden {
            return;
        }
        self.input.clear();
        if self.settings.pause_on_blur {
            self.signal(Signal::VisibilityLost);
        }
    }

    /// One display frame at `now_ms`. Returns the dt that was simulated.
    pub fn frame(&mut self, now_ms: f64) -> f32 {
        let dt = self.clock.delta(now_ms);
        self.step(dt);
        dt
    }

    /// Simulate exactly `dt` seconds, bypassing the frame clock. Negative or
    /// non-finite steps are ignored.
    pub fn step(&mut self, dt: f32) {
        self.events.clear();
        let input = TickInput {
            intent: self.input.intent(),
        };
        tick(&mut self.state, &input, dt);
        self.dispatch();
    }

    fn dispatch(&mut self) {
        for event in self.state.drain_events() {
            match &event {
                GameEvent::Sound(effect) => {
                    if self.settings.sound {
                        self.audio.play(*effect);
                    }
                }
                GameEvent::SessionEnded {
                    high_score,
                    new_high_score: true,
                    ..
                } => {
                    if let Err(e) = self.store.save(HighScore::new(*high_score)) {
                        log::warn!("Could not save high score: {e}");
                    }
                }
                _ => {}
            }
            self.events.push(event);
        }
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
