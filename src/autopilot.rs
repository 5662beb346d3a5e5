//! Demo-mode pilot
//!
//! Produces a [`TickInput`] from the current state: hold fire, line up with
//! the closest hostile, sidestep anything about to run into the ship.

use glam::Vec2;

use crate::sim::collision::Rect;
use crate::sim::orientation::{Layout, Orientation};
use crate::sim::{GameState, TickInput};

/// How far ahead (px along the travel axis) the pilot watches for threats
const LOOKAHEAD: f32 = 220.0;
/// Extra clearance on the cross axis when judging a collision course
const CLEARANCE: f32 = 12.0;
/// Fraction of the arena the ship may advance into in horizontal play
const MAX_ADVANCE: f32 = 0.3;

/// Split a point into (along travel axis, across travel axis)
fn split(layout: &Layout, v: Vec2) -> (f32, f32) {
    match layout.orientation {
        Orientation::Horizontal => (v.x, v.y),
        Orientation::Vertical => (v.y, v.x),
    }
}

/// Cross-axis span of a rect
fn cross_span(layout: &Layout, r: &Rect) -> (f32, f32) {
    match layout.orientation {
        Orientation::Horizontal => (r.y, r.bottom()),
        Orientation::Vertical => (r.x, r.right()),
    }
}

/// Distance from the ship's nose to `r` along the firing direction
fn distance_ahead(layout: &Layout, ship: &Rect, r: &Rect) -> f32 {
    match layout.orientation {
        Orientation::Horizontal => r.x - ship.right(),
        Orientation::Vertical => ship.y - r.bottom(),
    }
}

/// Build the pilot's input. Pause/restart/layout are carried over from `base`.
pub fn drive(state: &GameState, base: &TickInput) -> TickInput {
    let layout = &state.layout;
    let ship = &state.player.rect;
    let (ship_along, ship_cross) = split(layout, ship.center());
    let (ship_lo, ship_hi) = cross_span(layout, ship);

    let mut input = TickInput {
        fire: true,
        pause: base.pause,
        restart: base.restart,
        layout: base.layout,
        ..Default::default()
    };

    // Everything that kills on contact
    let threats = state
        .enemies
        .iter()
        .map(|e| e.rect)
        .chain(state.boss_bullets.iter().map(|b| b.rect))
        .chain(state.boss.iter().map(|b| b.rect));

    let mut dodge: Option<f32> = None;
    let mut closest = f32::INFINITY;
    for rect in threats {
        let ahead = distance_ahead(layout, ship, &rect);
        if !(-CLEARANCE..LOOKAHEAD).contains(&ahead) {
            continue;
        }
        let (lo, hi) = cross_span(layout, &rect);
        let on_course = lo < ship_hi + CLEARANCE && hi > ship_lo - CLEARANCE;
        if on_course && ahead < closest {
            closest = ahead;
            let (_, threat_cross) = split(layout, rect.center());
            // Step away from the threat, unless pinned against the wall
            let room_low = ship_lo;
            let room_high = layout.cross_len() - ship_hi;
            dodge = Some(if threat_cross >= ship_cross && room_low > 0.0 {
                -1.0
            } else if room_high > 0.0 {
                1.0
            } else {
                -1.0
            });
        }
    }

    let steer = match dodge {
        Some(dir) => dir,
        None => {
            // Line up with the nearest hostile in front of the ship
            let target = state
                .boss
                .as_ref()
                .map(|b| b.rect)
                .into_iter()
                .chain(state.enemies.iter().map(|e| e.rect))
                .filter(|r| distance_ahead(layout, ship, r) > 0.0)
                .min_by(|a, b| {
                    distance_ahead(layout, ship, a).total_cmp(&distance_ahead(layout, ship, b))
                });
            match target {
                Some(rect) => {
                    let (_, target_cross) = split(layout, rect.center());
                    let delta = target_cross - ship_cross;
                    if delta.abs() <= state.player.speed {
                        0.0
                    } else {
                        delta.signum()
                    }
                }
                None => 0.0,
            }
        }
    };

    match layout.orientation {
        Orientation::Horizontal => {
            input.move_up = steer < 0.0;
            input.move_down = steer > 0.0;
            // Keep to the left side of the arena
            input.move_left = ship_along > layout.width * MAX_ADVANCE;
        }
        Orientation::Vertical => {
            input.move_left = steer < 0.0;
            input.move_right = steer > 0.0;
        }
    }

    input
}
