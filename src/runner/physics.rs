//! Vertical motion of the player. The world scrolls; the player never moves in x.

use super::collision::Rect;
use crate::config::GameConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub vy: f64,
    pub gravity: f64,
    pub jump_force: f64,
    pub grounded: bool,
}

impl Player {
    /// Standing on the ground at the configured column.
    pub fn new(cfg: &GameConfig) -> Self {
        Self {
            x: cfg.player_x,
            y: cfg.player_ground_y(),
            w: cfg.player_w,
            h: cfg.player_h,
            vy: 0.0,
            gravity: cfg.gravity,
            jump_force: cfg.jump_force,
            grounded: true,
        }
    }

    /// Integrate one step and clamp to `ground_y` (the resting top edge).
    pub fn apply_gravity(&mut self, dt: f64, ground_y: f64) {
        self.vy += self.gravity * dt;
        self.y += self.vy * dt;
        if self.y >= ground_y {
            self.y = ground_y;
            self.vy = 0.0;
            self.grounded = true;
        } else {
            self.grounded = false;
        }
    }

    /// Not gated on `grounded`: mid-air jumps are allowed.
    pub fn jump(&mut self) {
        self.vy = self.jump_force;
        self.grounded = false;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}
