//! Per-frame simulation step
//!
//! Order within a frame is fixed: clock, spawn rate, basket, spawning, gold,
//! particles, HUD. The caller is responsible for bounding `dt`; steps that are
//! negative or not finite are dropped.
//!
//! Every frame queues a `Hud` event. Drivers drain the queue once per frame;
//! an undrained queue keeps only the newest `Hud`.

use super::collision::circle_intersects_rect;
use super::particle;
use super::state::{DirectionalIntent, GameEvent, GameState, Signal};
use crate::audio::SoundEffect;
use crate::random_range;

/// Input sampled once per frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub intent: DirectionalIntent,
}

/// Advance the game by `dt` seconds. A no-op outside `Playing`.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if !state.is_playing() {
        return;
    }
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Dropping invalid frame step {dt}");
        return;
    }

    // 1. Session clock
    state.session.time_remaining -= dt;
    if state.session.time_remaining <= 0.0 {
        state.session.time_remaining = 0.0;
        push_hud(state);
        state.handle(Signal::TimeExpired);
        return;
    }

    // 2. Difficulty steps with simulated time, never wall time
    state.session.elapsed += dt;
    state.session.spawn_rate = state.config.spawn_rate_at(state.session.elapsed);

    // 3. Basket
    if let Some(basket) = state.basket.as_mut() {
        basket.steer(input.intent, &state.config);
        basket.advance(dt, &state.config);
    }

    // 4. Spawning
    spawn_gold(state, dt);

    // 5. Gold: catches take priority over misses
    resolve_gold(state, dt);

    // 6. Particles
    let gravity = state.config.particle_gravity;
    for particle in state.particles.iter_mut() {
        particle.advance(dt, gravity);
    }
    state.particles.retain(|p| !p.is_expired());

    // 7. HUD
    push_hud(state);
}

fn push_hud(state: &mut GameState) {
    state
        .events
        .retain(|e| !matches!(e, GameEvent::Hud { .. }));
    state.events.push(GameEvent::Hud {
        score: state.session.score,
        time_remaining: state.session.time_remaining,
    });
}

fn spawn_gold(state: &mut GameState, dt: f32) {
    state.session.since_last_spawn += dt;
    let interval = 1.0 / state.session.spawn_rate;
    if state.session.since_last_spawn <= interval {
        return;
    }
    state.session.since_last_spawn = 0.0;

    let config = &state.config;
    let rng = &mut state.rng;
    let max_size = config.gold_max_size;
    let x = random_range(rng, max_size, config.arena_width - max_size);
    state
        .golds
        .acquire(|gold| gold.spawn(config, rng, x, -max_size));
}

fn resolve_gold(state: &mut GameState, dt: f32) {
    let GameState {
        config,
        session,
        basket,
        golds,
        particles,
        max_particles,
        rng,
        events,
        ..
    } = state;
    let Some(basket) = basket.as_mut() else {
        return;
    };
    let basket_bounds = basket.collision_bounds();

    golds.retain_rev(|gold| {
        gold.advance(dt);

        if circle_intersects_rect(&gold.collision_bounds(config), &basket_bounds) {
            gold.collected = true;
            let points = gold.point_value(config);
            session.score = session.score.saturating_add(points);
            session.caught += 1;
            basket.trigger_flash(config);
            events.push(GameEvent::Sound(SoundEffect::Pickup));
            events.push(GameEvent::Collected {
                points,
                pos: gold.pos,
            });

            let room = max_particles.saturating_sub(particles.len()) as u32;
            let count = config.particle_count.min(room);
            particle::burst(particles, rng, config, gold.pos.x, gold.pos.y, count);
            return false;
        }

        if gold.is_below_arena(config) {
            session.missed += 1;
            events.push(GameEvent::Sound(SoundEffect::Miss));
            events.push(GameEvent::Missed { pos: gold.pos });
            return false;
        }

        true
    });
}
