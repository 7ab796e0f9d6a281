//! Game state and core simulation types
//!
//! Everything the frame loop reads or writes lives on `GameState`. Presentation
//! code only ever sees it through `Snapshot` and the drained `GameEvent`s.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::basket::Basket;
use super::gold::Gold;
use super::particle::Particle;
use super::pool::Pool;
use crate::audio::SoundEffect;
use crate::config::Config;
use crate::error::ConfigError;
use crate::format_time;
use crate::highscores::HighScore;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the presentation layer to finish loading assets
    Loading,
    /// Title screen
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen mid-session, still rendered
    Paused,
    /// Session ended, final score shown
    GameOver,
}

/// Lifecycle signals consumed by the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    AssetsReady,
    Start,
    Restart,
    Pause,
    Resume,
    TogglePause,
    /// Page hidden or window lost focus
    VisibilityLost,
    /// Session clock hit zero (raised by the tick itself)
    TimeExpired,
}

impl GamePhase {
    /// The transition table. `None` means the signal is ignored in this phase.
    pub fn on(self, signal: Signal) -> Option<GamePhase> {
        use GamePhase::*;
        use Signal::*;
        match (self, signal) {
            (Loading, AssetsReady) => Some(Menu),
            (Menu, Start) => Some(Playing),
            (GameOver, Start | Restart) => Some(Playing),
            (Playing, Pause | TogglePause | VisibilityLost) => Some(Paused),
            (Paused, Resume | TogglePause) => Some(Playing),
            (Playing, TimeExpired) => Some(GameOver),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Loading => "loading",
            GamePhase::Menu => "menu",
            GamePhase::Playing => "playing",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "gameover",
        }
    }
}

/// Aggregated movement intent, independent of the input device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionalIntent {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl DirectionalIntent {
    /// Unit steps per axis in arena coordinates (y grows downward)
    pub fn axis(&self) -> Vec2 {
        let step = |neg: bool, pos: bool| pos as i8 as f32 - neg as i8 as f32;
        Vec2::new(step(self.left, self.right), step(self.up, self.down))
    }

    /// Merge two sources; a direction is held if either source holds it
    pub fn merge(self, other: Self) -> Self {
        Self {
            left: self.left || other.left,
            right: self.right || other.right,
            up: self.up || other.up,
            down: self.down || other.down,
        }
    }
}

/// Per-session counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub score: u32,
    /// Seconds left, never below zero
    pub time_remaining: f32,
    /// Simulated seconds since the session started
    pub elapsed: f32,
    /// Current spawns per second
    pub spawn_rate: f32,
    /// Simulated seconds since the last gold spawned
    pub since_last_spawn: f32,
    pub caught: u32,
    pub missed: u32,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            score: 0,
            time_remaining: config.initial_timer,
            elapsed: 0.0,
            spawn_rate: config.spawn_rate,
            since_last_spawn: 0.0,
            caught: 0,
            missed: 0,
        }
    }
}

/// Things that happened this frame, for presentation and collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Sound(SoundEffect),
    PhaseChanged(GamePhase),
    Collected { points: u32, pos: Vec2 },
    Missed { pos: Vec2 },
    SessionEnded {
        score: u32,
        high_score: u32,
        new_high_score: bool,
    },
    Hud { score: u32, time_remaining: f32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: Config,
    pub phase: GamePhase,
    pub session: Session,
    pub high_score: HighScore,
    /// Present from the first session start on
    pub basket: Option<Basket>,
    pub golds: Pool<Gold>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Upper bound on live particles, 0 disables bursts
    pub max_particles: usize,
    /// Ask the renderer to draw hit boxes
    pub debug: bool,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

/// Default particle budget
pub const MAX_PARTICLES: usize = 500;

impl GameState {
    /// Validate `config` and build a state waiting in `Loading`
    pub fn new(config: Config, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = Session::new(&config);
        Ok(Self {
            config,
            phase: GamePhase::Loading,
            session,
            high_score: HighScore::default(),
            basket: None,
            golds: Pool::new(),
            particles: Vec::new(),
            max_particles: MAX_PARTICLES,
            debug: false,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        })
    }

    /// Apply a lifecycle signal. Returns whether the phase changed.
    pub fn handle(&mut self, signal: Signal) -> bool {
        let Some(next) = self.phase.on(signal) else {
            log::debug!("Ignoring {:?} while {:?}", signal, self.phase);
            return false;
        };

        let from = self.phase;
        match (from, next) {
            (GamePhase::Menu | GamePhase::GameOver, GamePhase::Playing) => self.start_session(),
            (GamePhase::Playing, GamePhase::GameOver) => self.end_session(),
            _ => {}
        }

        log::info!("{:?} -> {:?} ({:?})", from, next, signal);
        self.phase = next;
        self.events.push(GameEvent::PhaseChanged(next));
        true
    }

    /// Reset everything a session owns
    fn start_session(&mut self) {
        self.session = Session::new(&self.config);
        self.golds.clear();
        self.particles.clear();
        self.basket = Some(Basket::new(&self.config));
        self.events.push(GameEvent::Sound(SoundEffect::Start));
    }

    /// Settle the score against the high score
    fn end_session(&mut self) {
        let score = self.session.score;
        let new_high_score = self.high_score.record(score);
        log::info!(
            "Session over: score {} (caught {}, missed {}), best {}",
            score,
            self.session.caught,
            self.session.missed,
            self.high_score.best
        );
        self.events.push(GameEvent::Sound(SoundEffect::GameOver));
        if new_high_score {
            self.events.push(GameEvent::Sound(SoundEffect::HighScore));
        }
        self.events.push(GameEvent::SessionEnded {
            score,
            high_score: self.high_score.best,
            new_high_score,
        });
    }

    /// Events since the last drain, oldest first. Drivers call this once per
    /// frame; `tick` keeps only the newest `Hud` in an undrained queue.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            score: self.session.score,
            time_remaining: self.session.time_remaining,
            time_label: format_time(self.session.time_remaining),
            high_score: self.high_score.best,
            basket: self.basket.as_ref(),
            golds: self.golds.iter().map(|(_, g)| g).collect(),
            particles: &self.particles,
            debug: self.debug,
        }
    }
}

/// What a renderer needs to draw one frame
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub score: u32,
    pub time_remaining: f32,
    pub time_label: String,
    pub high_score: u32,
    pub basket: Option<&'a Basket>,
    pub golds: Vec<&'a Gold>,
    pub particles: &'a [Particle],
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing() -> GameState {
        let mut state = GameState::new(Config::default(), 1).unwrap();
        assert!(state.handle(Signal::AssetsReady));
        assert!(state.handle(Signal::Start));
        state
    }

    #[test]
    fn test_transition_table() {
        use GamePhase::*;
        assert_eq!(Loading.on(Signal::AssetsReady), Some(Menu));
        assert_eq!(Loading.on(Signal::Start), None);
        assert_eq!(Menu.on(Signal::Start), Some(Playing));
        assert_eq!(Menu.on(Signal::Pause), None);
        assert_eq!(Playing.on(Signal::VisibilityLost), Some(Paused));
        assert_eq!(Playing.on(Signal::TogglePause), Some(Paused));
        assert_eq!(Paused.on(Signal::TogglePause), Some(Playing));
        assert_eq!(Paused.on(Signal::TimeExpired), None);
        assert_eq!(Playing.on(Signal::TimeExpired), Some(GameOver));
        assert_eq!(GameOver.on(Signal::Restart), Some(Playing));
        assert_eq!(GameOver.on(Signal::TimeExpired), None);
    }

    #[test]
    fn test_start_session_resets() {
        let mut state = playing();
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.basket.is_some());
        assert_eq!(state.session.time_remaining, 60.0);
        let events: Vec<_> = state.drain_events().collect();
        assert!(events.contains(&GameEvent::Sound(SoundEffect::Start)));
        assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::Playing)));
        assert!(state.drain_events().next().is_none());
    }

    #[test]
    fn test_ignored_signal_keeps_phase() {
        let mut state = GameState::new(Config::default(), 1).unwrap();
        assert!(!state.handle(Signal::Pause));
        assert_eq!(state.phase, GamePhase::Loading);
        assert!(state.drain_events().next().is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = Config {
            gold_min_size: 50.0,
            ..Default::default()
        };
        assert!(GameState::new(config, 1).is_err());
    }

    #[test]
    fn test_end_session_updates_high_score_once() {
        let mut state = playing();
        state.high_score = HighScore { best: 10 };
        state.session.score = 25;
        state.drain_events().for_each(drop);

        assert!(state.handle(Signal::TimeExpired));
        assert_eq!(state.high_score.best, 25);
        let ended: Vec<_> = state
            .drain_events()
            .filter(|e| matches!(e, GameEvent::SessionEnded { .. }))
            .collect();
        assert_eq!(
            ended,
            vec![GameEvent::SessionEnded {
                score: 25,
                high_score: 25,
                new_high_score: true
            }]
        );

        // Restart with a lower score: high score holds
        assert!(state.handle(Signal::Restart));
        state.session.score = 5;
        state.handle(Signal::TimeExpired);
        assert_eq!(state.high_score.best, 25);
    }

    #[test]
    fn test_intent_axis() {
        let intent = DirectionalIntent {
            left: true,
            down: true,
            ..Default::default()
        };
        assert_eq!(intent.axis(), Vec2::new(-1.0, 1.0));
        let both = intent.merge(DirectionalIntent {
            right: true,
            ..Default::default()
        });
        assert_eq!(both.axis(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_snapshot_reports_time_label() {
        let mut state = playing();
        state.session.time_remaining = 65.4;
        state.debug = true;
        let snap = state.snapshot();
        assert_eq!(snap.time_label, "1:05");
        assert!(snap.debug);
        assert!(snap.golds.is_empty());
        assert!(serde_json::to_string(&snap).is_ok());
    }
}
