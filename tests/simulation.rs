use gold_rush::sim::*;
use gold_rush::{Config, HighScore, clamp};
use proptest::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn playing(config: Config, seed: u64) -> GameState {
    let mut state = GameState::new(config, seed).unwrap();
    state.handle(Signal::AssetsReady);
    state.handle(Signal::Start);
    state.drain_events().for_each(drop);
    state
}

fn idle() -> TickInput {
    TickInput::default()
}

#[test]
fn test_session_ends_exactly_once() {
    let mut state = playing(Config::default(), 7);

    tick(&mut state, &idle(), 60.0);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.session.time_remaining, 0.0);

    let events: Vec<GameEvent> = state.drain_events().collect();
    let ended = events
        .iter()
        .filter(|e| matches!(e, GameEvent::SessionEnded { .. }))
        .count();
    assert_eq!(ended, 1);
    assert!(events.contains(&GameEvent::PhaseChanged(GamePhase::GameOver)));

    // Further frames in GameOver change nothing
    tick(&mut state, &idle(), 1.0);
    tick(&mut state, &idle(), 1.0);
    assert_eq!(state.drain_events().count(), 0);
    assert_eq!(state.session.time_remaining, 0.0);
}

#[test]
fn test_overlapping_gold_is_caught_not_missed() {
    let mut state = playing(Config::default(), 3);
    let config = state.config.clone();
    let center = state.basket.as_ref().unwrap().collision_bounds().center();
    let radius = config.gold_max_size;
    state
        .golds
        .acquire(|gold| gold.reset(&config, center.x, center.y, radius, 0.0));

    tick(&mut state, &idle(), DT);

    assert_eq!(state.golds.len(), 0);
    assert_eq!(state.session.caught, 1);
    assert_eq!(state.session.missed, 0);
    assert_eq!(state.session.score, 15);
    assert!(state.basket.as_ref().unwrap().is_flashing());
    assert!(!state.particles.is_empty());

    let events: Vec<GameEvent> = state.drain_events().collect();
    assert!(events.contains(&GameEvent::Sound(gold_rush::audio::SoundEffect::Pickup)));
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, GameEvent::Missed { .. }))
    );
}

#[test]
fn test_gold_left_alone_is_missed() {
    let mut state = playing(Config::default(), 3);
    let config = state.config.clone();
    // Far from the basket, just above the bottom edge
    let x = if state.basket.as_ref().unwrap().pos.x > 400.0 {
        40.0
    } else {
        760.0
    };
    state
        .golds
        .acquire(|gold| gold.reset(&config, x, 590.0, 20.0, 0.0));

    for _ in 0..30 {
        tick(&mut state, &idle(), DT);
    }

    assert_eq!(state.session.missed, 1);
    assert_eq!(state.session.caught, 0);
    assert!(
        state
            .drain_events()
            .any(|e| matches!(e, GameEvent::Missed { .. }))
    );
}

#[test]
fn test_restart_resets_session_but_keeps_best() {
    let mut state = playing(Config::default(), 11);
    state.session.score = 25;
    tick(&mut state, &idle(), 60.0);
    assert_eq!(state.high_score.best, 25);

    assert!(state.handle(Signal::Restart));
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.session.score, 0);
    assert_eq!(state.session.time_remaining, state.config.initial_timer);
    assert_eq!(state.golds.len(), 0);
    assert!(state.particles.is_empty());
    assert_eq!(state.high_score.best, 25);
}

#[test]
fn test_paused_game_is_frozen() {
    let mut state = playing(Config::default(), 5);
    for _ in 0..90 {
        tick(&mut state, &idle(), DT);
    }
    assert!(state.handle(Signal::TogglePause));
    let falling: Vec<f32> = state.golds.iter().map(|(_, g)| g.pos.y).collect();
    let remaining = state.session.time_remaining;

    for _ in 0..60 {
        tick(&mut state, &idle(), DT);
    }
    let after: Vec<f32> = state.golds.iter().map(|(_, g)| g.pos.y).collect();
    assert_eq!(falling, after);
    assert_eq!(state.session.time_remaining, remaining);

    assert!(state.handle(Signal::TogglePause));
    assert!(state.is_playing());
}

#[test]
fn test_same_seed_same_game() {
    let run = |seed| {
        let mut state = playing(Config::default(), seed);
        for _ in 0..(10 * 60) {
            tick(&mut state, &idle(), DT);
        }
        state
            .golds
            .iter()
            .map(|(_, g)| (g.pos.x, g.radius))
            .collect::<Vec<_>>()
    };
    assert_eq!(run(99), run(99));
}

proptest! {
    #[test]
    fn clamp_stays_in_range(v in -1e6f32..1e6, a in -1e3f32..1e3, b in -1e3f32..1e3) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let c = clamp(v, lo, hi);
        prop_assert!(c >= lo && c <= hi);
        if v >= lo && v <= hi {
            prop_assert_eq!(c, v);
        }
    }

    #[test]
    fn circle_far_from_rect_never_hits(
        x in 0.0f32..100.0,
        y in 0.0f32..100.0,
        r in 1.0f32..20.0,
        gap in 0.5f32..50.0,
    ) {
        let rect = Rect::new(x, y, 40.0, 30.0);
        // Directly right of the rect, separated by `gap`
        let circle = Circle::new(x + 40.0 + r + gap, y + 15.0, r);
        prop_assert!(!circle_intersects_rect(&circle, &rect));
        // Same gap on the left side
        let mirrored = Circle::new(x - r - gap, y + 15.0, r);
        prop_assert!(!circle_intersects_rect(&mirrored, &rect));
    }

    #[test]
    fn circle_center_inside_rect_always_hits(
        fx in 0.0f32..=1.0,
        fy in 0.0f32..=1.0,
        r in 0.0f32..10.0,
    ) {
        let rect = Rect::new(10.0, 20.0, 100.0, 60.0);
        let circle = Circle::new(10.0 + fx * 100.0, 20.0 + fy * 60.0, r);
        prop_assert!(circle_intersects_rect(&circle, &rect));
    }

    #[test]
    fn pool_counts_after_releases(
        n in 1usize..64,
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..64),
    ) {
        let mut pool: Pool<u32> = Pool::new();
        let handles: Vec<Handle> = (0..n).map(|i| pool.acquire(|v| *v = i as u32)).collect();

        let mut released = std::collections::HashSet::new();
        for pick in picks {
            let h = handles[pick.index(n)];
            let fresh = released.insert(h.index());
            prop_assert_eq!(pool.release(h), fresh);
        }

        prop_assert_eq!(pool.len(), n - released.len());
        prop_assert_eq!(pool.free_len(), released.len());
        prop_assert_eq!(pool.len() + pool.free_len(), pool.capacity());
    }

    #[test]
    fn bigger_gold_is_worth_at_least_as_much(a in 15.0f32..=35.0, b in 15.0f32..=35.0) {
        let config = Config::default();
        let (small, big) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(gold::point_value(&config, small) <= gold::point_value(&config, big));
        prop_assert!(gold::fall_speed(&config, small) >= gold::fall_speed(&config, big));
    }

    #[test]
    fn high_score_never_decreases(scores in prop::collection::vec(0u32..1000, 1..20)) {
        let mut best = HighScore::default();
        let mut last = 0;
        for score in scores {
            best.record(score);
            prop_assert!(best.best >= last);
            prop_assert!(best.best >= score);
            last = best.best;
        }
    }

    #[test]
    fn basket_stays_inside_arena(
        moves in prop::collection::vec(any::<(bool, bool, bool, bool)>(), 1..120),
    ) {
        let mut state = playing(Config::default(), 1);
        let (min_x, max_x, min_y, max_y) = state.config.basket_bounds();
        for (left, right, up, down) in moves {
            let input = TickInput { intent: DirectionalIntent { left, right, up, down } };
            tick(&mut state, &input, 0.1);
            let pos = state.basket.as_ref().unwrap().pos;
            prop_assert!(pos.x >= min_x && pos.x <= max_x);
            prop_assert!(pos.y >= min_y && pos.y <= max_y);
        }
    }
}
