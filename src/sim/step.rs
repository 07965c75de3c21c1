//! Per-tick integration
//!
//! Advances one card by one time slice: gravity, friction, throttled
//! magnetism against the shared position table, stochastic impulses and
//! dashes, position integration, wall bounce with squash/stretch, rotation,
//! and trail upkeep. `dt` is normalized so 1.0 is one nominal 16 ms frame,
//! capped at [`MAX_DT`] to absorb frame-rate hiccups.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::heading;

use super::profile::{ForceProfile, Magnetism};
use super::state::{CardSize, ChaosPhase, ControlMode, EntityState, Viewport};
use super::table::PositionTable;

/// Advance `state` by one tick. A no-op while the card is being dragged;
/// the drag handoff publishes positions on its own.
pub fn step(
    state: &mut EntityState,
    profile: &ForceProfile,
    table: &mut PositionTable,
    viewport: Viewport,
    card: CardSize,
    dt: f32,
    rng: &mut impl Rng,
) {
    if state.control == ControlMode::Dragging {
        return;
    }

    let dt = dt.min(MAX_DT);
    state.clock += dt * NOMINAL_FRAME_SECS;

    state.vel.y += profile.gravity * dt;

    // Once per tick, not dt-scaled: friction is frame-rate-coupled while
    // gravity and translation are not.
    state.vel *= profile.air_friction;

    state.magnetism_tick += 1;
    if state.magnetism_tick % MAGNETISM_INTERVAL == 0 {
        apply_magnetism(state, profile, table);
    }

    if profile.random_impulses && rng.random::<f32>() < IMPULSE_CHANCE {
        state.vel.x += (rng.random::<f32>() - 0.5) * IMPULSE_KICK;
        state.vel.y += (rng.random::<f32>() - 0.5) * IMPULSE_KICK;
    }

    if let Some(dash) = &profile.dash {
        let ready = state
            .last_dash
            .is_none_or(|last| state.clock - last > dash.cooldown);
        if ready && rng.random::<f32>() < DASH_CHANCE {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            state.vel = heading(angle) * DASH_SPEED;
            state.last_dash = Some(state.clock);
        }
    }

    // A NaN or runaway card never recovers; reset and cap instead
    if !state.vel.is_finite() {
        state.vel = Vec2::ZERO;
    }
    state.vel = state.vel.clamp_length_max(MAX_SPEED);

    state.pos += state.vel * dt;

    let collided = resolve_bounds(state, profile, viewport, card);

    state.scale = if collided {
        squash_scale(state.vel, profile.squash_stretch)
    } else {
        Vec2::ONE
    };

    state.rotation += state.vel.x * ROTATION_FACTOR * dt;

    table.publish(state.index, state.pos);
    state.record_trail(card);
}

/// Accumulate magnetism forces from every other tracked position.
///
/// Coincident positions are skipped; the distance checks also make a zero
/// radius a no-op, so there is no other division-by-zero site.
fn apply_magnetism(state: &mut EntityState, profile: &ForceProfile, table: &PositionTable) {
    match profile.magnetism {
        Magnetism::None | Magnetism::Neutral => {}

        Magnetism::Repulsion { radius, force } => {
            let radius_sq = radius * radius;
            for other in table.others(state.index) {
                let away = state.pos - other;
                let dist_sq = away.length_squared();
                if dist_sq == 0.0 || dist_sq > radius_sq {
                    continue;
                }
                let dist = dist_sq.sqrt();
                let push = force * (1.0 - dist / radius);
                state.vel += away / dist * push;
            }
        }

        Magnetism::Attraction { radius, force } => {
            let radius_sq = radius * radius;
            for other in table.others(state.index) {
                let toward = other - state.pos;
                let dist_sq = toward.length_squared();
                if dist_sq == 0.0 || dist_sq > radius_sq {
                    continue;
                }
                let dist = dist_sq.sqrt();
                let pull = force * (dist / radius);
                state.vel += toward / dist * pull * 0.5;
            }
        }

        Magnetism::Chaotic { phase_duration } => {
            if state.clock - state.chaos.last_flip > phase_duration {
                state.chaos.phase = state.chaos.phase.flipped();
                state.chaos.last_flip = state.clock;
            }

            let range_sq = CHAOS_RANGE * CHAOS_RANGE;
            for other in table.others(state.index) {
                let dir = match state.chaos.phase {
                    ChaosPhase::Attract => other - state.pos,
                    ChaosPhase::Repel => state.pos - other,
                };
                let dist_sq = dir.length_squared();
                if dist_sq == 0.0 || dist_sq > range_sq {
                    continue;
                }
                let dist = dist_sq.sqrt();
                let kick = CHAOS_FORCE * (1.0 - dist / CHAOS_RANGE);
                state.vel += dir / dist * kick;
            }
        }
    }
}

/// Clamp the card's bounding box to the viewport, reflecting the crossed
/// velocity component scaled by the profile's restitution. Axis-independent;
/// returns whether any edge was hit this tick.
fn resolve_bounds(
    state: &mut EntityState,
    profile: &ForceProfile,
    viewport: Viewport,
    card: CardSize,
) -> bool {
    let mut collided = false;
    let max_x = viewport.width - card.width;
    let max_y = viewport.height - card.height;

    if state.pos.x < 0.0 {
        state.pos.x = 0.0;
        state.vel.x = state.vel.x.abs() * profile.bounce;
        collided = true;
    }
    if state.pos.x > max_x {
        state.pos.x = max_x;
        state.vel.x = -state.vel.x.abs() * profile.bounce;
        collided = true;
    }
    if state.pos.y < 0.0 {
        state.pos.y = 0.0;
        state.vel.y = state.vel.y.abs() * profile.bounce;
        collided = true;
    }
    if state.pos.y > max_y {
        state.pos.y = max_y;
        state.vel.y = -state.vel.y.abs() * profile.bounce;
        collided = true;
    }

    collided
}

/// Impact deformation: compress along the dominant velocity axis, expand
/// the other by half as much, saturating with speed.
fn squash_scale(vel: Vec2, squash_stretch: f32) -> Vec2 {
    let squash = (vel.length() / SQUASH_SPEED_REF).min(1.0) * squash_stretch;
    if vel.x.abs() > vel.y.abs() {
        Vec2::new(1.0 - squash, 1.0 + squash * 0.5)
    } else {
        Vec2::new(1.0 + squash * 0.5, 1.0 - squash)
    }
}
