//! Gold Rush entry point
//!
//! The browser build is driven from JS through `platform::web::WebGame`. The
//! native binary runs a headless session with an autopilot, which is handy for
//! checking tuning changes.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match native::Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{msg}");
            eprintln!("usage: gold-rush [--config <path>] [--seed <n>] [--seconds <f>]");
            std::process::exit(2);
        }
    };

    if let Err(e) = native::run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::WebGame, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use gold_rush::audio::SilentAudio;
    use gold_rush::persistence::JsonFileStore;
    use gold_rush::platform::Runner;
    use gold_rush::sim::{DirectionalIntent, GameEvent, GamePhase, GameState, Signal};
    use gold_rush::{Config, ConfigError, Settings, format_time};

    /// Simulated frame rate of the headless run
    const FRAME_DT: f32 = 1.0 / 60.0;
    const HIGH_SCORE_FILE: &str = "gold_rush_highscore.json";

    pub struct Args {
        config: Option<String>,
        seed: u64,
        seconds: Option<f32>,
    }

    impl Args {
        pub fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
            let mut parsed = Args {
                config: None,
                seed: 0x601D,
                seconds: None,
            };
            while let Some(flag) = args.next() {
                let mut value = || args.next().ok_or(format!("{flag} needs a value"));
                match flag.as_str() {
                    "--config" => parsed.config = Some(value()?),
                    "--seed" => {
                        parsed.seed = value()?
                            .parse()
                            .map_err(|e| format!("bad --seed: {e}"))?
                    }
                    "--seconds" => {
                        parsed.seconds = Some(
                            value()?
                                .parse()
                                .map_err(|e| format!("bad --seconds: {e}"))?,
                        )
                    }
                    other => return Err(format!("unknown argument {other}")),
                }
            }
            Ok(parsed)
        }
    }

    /// Chase the lowest piece still above the basket
    fn autopilot(state: &GameState) -> DirectionalIntent {
        let Some(basket) = state.basket.as_ref() else {
            return DirectionalIntent::default();
        };
        let center = basket.collision_bounds().center();
        let target = state
            .golds
            .iter()
            .map(|(_, g)| g)
            .filter(|g| g.pos.y < basket.pos.y + basket.size.y)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        let Some(target) = target else {
            return DirectionalIntent::default();
        };
        let dx = target.pos.x - center.x;
        let dead_zone = basket.size.x * 0.2;
        DirectionalIntent {
            left: dx < -dead_zone,
            right: dx > dead_zone,
            ..Default::default()
        }
    }

    pub fn run(args: Args) -> Result<(), ConfigError> {
        log::info!("Gold Rush (native) starting...");

        let mut config = match &args.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(seconds) = args.seconds {
            config.initial_timer = seconds;
        }

        let mut runner = Runner::new(
            config,
            args.seed,
            Settings::load(),
            SilentAudio,
            JsonFileStore::new(HIGH_SCORE_FILE),
        )?;
        log::info!("Game initialized with seed: {}", args.seed);

        runner.signal(Signal::AssetsReady);
        runner.signal(Signal::Start);

        let mut frames = 0u64;
        while runner.state().phase == GamePhase::Playing {
            let intent = autopilot(runner.state());
            let input = runner.input_mut();
            input.clear();
            if intent.left {
                input.key_down("ArrowLeft");
            }
            if intent.right {
                input.key_down("ArrowRight");
            }

            runner.step(FRAME_DT);
            frames += 1;

            if frames % 600 == 0 {
                let snap = runner.snapshot();
                log::info!(
                    "{} left, score {}, {} gold falling",
                    snap.time_label,
                    snap.score,
                    snap.golds.len()
                );
            }

            for event in runner.events() {
                if let GameEvent::SessionEnded {
                    score,
                    high_score,
                    new_high_score,
                } = event
                {
                    let session = &runner.state().session;
                    println!(
                        "Final score {score} in {} ({} caught, {} missed). Best: {high_score}{}",
                        format_time(session.elapsed),
                        session.caught,
                        session.missed,
                        if *new_high_score { " (new!)" } else { "" }
                    );
                }
            }
        }
        Ok(())
    }
}
