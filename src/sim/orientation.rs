//! Orientation strategy
//!
//! Horizontal play scrolls right-to-left (player on the left, firing right).
//! Vertical play scrolls top-to-bottom (player at the bottom, firing up).
//! Every axis-dependent rule goes through [`Layout`] so the controllers
//! never branch on orientation themselves.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::clamp_span;
use crate::consts::PLAYER_EDGE_MARGIN;

/// Scroll layout of the arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    /// Landscape: travel along x, player free in all four directions
    #[default]
    Horizontal,
    /// Portrait: travel along y, player restricted to left/right
    Vertical,
}

impl Orientation {
    /// Portrait viewports play vertically
    pub fn from_dimensions(width: f32, height: f32) -> Self {
        if height > width {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    /// Sign of the player's firing direction along the travel axis
    #[inline]
    pub fn forward(&self) -> f32 {
        match self {
            Orientation::Horizontal => 1.0,
            Orientation::Vertical => -1.0,
        }
    }
}

/// Arena dimensions plus orientation, supplied by the embedding layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub orientation: Orientation,
}

impl Layout {
    pub fn new(width: f32, height: f32, orientation: Orientation) -> Self {
        Self {
            width,
            height,
            orientation,
        }
    }

    /// Orientation derived from the aspect ratio
    pub fn from_dimensions(width: f32, height: f32) -> Self {
        Self::new(width, height, Orientation::from_dimensions(width, height))
    }

    /// Finite, positive dimensions; anything else can't host a session
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Length of the arena along the travel axis
    pub fn travel_len(&self) -> f32 {
        match self.orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }

    /// Length of the arena across the travel axis
    pub fn cross_len(&self) -> f32 {
        match self.orientation {
            Orientation::Horizontal => self.height,
            Orientation::Vertical => self.width,
        }
    }

    /// Translate `rect` by a signed distance along the travel axis
    pub fn advance(&self, rect: &mut Rect, distance: f32) {
        match self.orientation {
            Orientation::Horizontal => rect.x += distance,
            Orientation::Vertical => rect.y += distance,
        }
    }

    /// Movement delta for the held direction flags, masked by orientation
    pub fn movement(&self, up: bool, down: bool, left: bool, right: bool) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if left {
            dir.x -= 1.0;
        }
        if right {
            dir.x += 1.0;
        }
        if self.orientation == Orientation::Horizontal {
            if up {
                dir.y -= 1.0;
            }
            if down {
                dir.y += 1.0;
            }
        }
        dir
    }

    /// Keep `rect` fully inside the arena
    pub fn clamp_inside(&self, rect: &mut Rect) {
        rect.x = clamp_span(rect.x, 0.0, self.width - rect.width);
        rect.y = clamp_span(rect.y, 0.0, self.height - rect.height);
    }

    /// True once `rect`, moving with signed `velocity` along the travel
    /// axis, has fully left the arena through the edge it is heading for
    pub fn has_exited(&self, rect: &Rect, velocity: f32) -> bool {
        let (start, extent) = match self.orientation {
            Orientation::Horizontal => (rect.x, rect.width),
            Orientation::Vertical => (rect.y, rect.height),
        };
        if velocity < 0.0 {
            start + extent < 0.0
        } else {
            start > self.travel_len()
        }
    }

    /// Projectile rect leaving the leading edge of `shooter`, centred
    /// across the travel axis; `length` runs along the travel axis
    pub fn muzzle(&self, shooter: &Rect, length: f32, thickness: f32, toward_forward: bool) -> Rect {
        let center = shooter.center();
        // Leading edge of `shooter` in the direction of fire
        let forward_sign = if toward_forward {
            self.orientation.forward()
        } else {
            -self.orientation.forward()
        };
        match self.orientation {
            Orientation::Horizontal => {
                let x = if forward_sign > 0.0 {
                    shooter.right()
                } else {
                    shooter.x - length
                };
                Rect::new(x, center.y - thickness / 2.0, length, thickness)
            }
            Orientation::Vertical => {
                let y = if forward_sign > 0.0 {
                    shooter.bottom()
                } else {
                    shooter.y - length
                };
                Rect::new(center.x - thickness / 2.0, y, thickness, length)
            }
        }
    }

    /// Enemy spawn rect just beyond the far edge at cross offset `offset`
    pub fn spawn_rect(&self, size: f32, offset: f32) -> Rect {
        match self.orientation {
            Orientation::Horizontal => Rect::new(self.width, offset, size, size),
            Orientation::Vertical => Rect::new(offset, -size, size, size),
        }
    }

    /// Player start position
    pub fn player_start(&self, size: f32) -> Rect {
        let mut rect = match self.orientation {
            Orientation::Horizontal => Rect::new(
                PLAYER_EDGE_MARGIN,
                self.height / 2.0 - size / 2.0,
                size,
                size,
            ),
            Orientation::Vertical => Rect::new(
                self.width / 2.0 - size / 2.0,
                self.height - size - PLAYER_EDGE_MARGIN,
                size,
                size,
            ),
        };
        self.clamp_inside(&mut rect);
        rect
    }

    /// Boss entry position
    pub fn boss_start(&self, size: f32) -> Rect {
        let mut rect = match self.orientation {
            Orientation::Horizontal => Rect::new(
                self.width - size * 1.5,
                self.height / 2.0 - size / 2.0,
                size,
                size,
            ),
            Orientation::Vertical => {
                Rect::new(self.width / 2.0 - size / 2.0, size / 2.0, size, size)
            }
        };
        self.confine(&mut rect);
        rect
    }

    /// The half of the arena the boss patrols
    pub fn boss_box(&self) -> Rect {
        match self.orientation {
            Orientation::Horizontal => {
                Rect::new(self.width / 2.0, 0.0, self.width / 2.0, self.height)
            }
            Orientation::Vertical => Rect::new(0.0, 0.0, self.width, self.height / 2.0),
        }
    }

    /// Clamp `rect` into the boss box
    pub fn confine(&self, rect: &mut Rect) {
        let area = self.boss_box();
        rect.x = clamp_span(rect.x, area.x, area.right() - rect.width);
        rect.y = clamp_span(rect.y, area.y, area.bottom() - rect.height);
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new(800.0, 600.0, Orientation::Horizontal)
    }
}
