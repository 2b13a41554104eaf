//! Tunable constants for a run. `GameConfig::default()` is the shipped game;
//! hosts may override any subset through JSON (feature `serde_json`).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// One background layer: image file (resolved against the asset folders) and scroll speed.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayerSpec {
    pub file: String,
    pub speed: f64,
}

impl LayerSpec {
    pub fn new(file: &str, speed: f64) -> Self {
        Self { file: file.to_string(), speed }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct GameConfig {
    // --- Surface ---
    pub width: f64,
    pub height: f64,
    pub ground_height: f64,

    // --- Player ---
    pub player_x: f64,
    pub player_w: f64,
    pub player_h: f64,
    pub gravity: f64,
    pub jump_force: f64, // negative = upward

    // --- Obstacles ---
    pub obstacle_width: f64,
    pub obstacle_min_height: f64,
    pub obstacle_height_range: f64,
    pub obstacle_spawn_margin: f64,
    pub obstacle_base_speed: f64,
    pub initial_spawn_interval: f64,
    pub min_spawn_interval: f64,
    pub interval_score_divisor: f64, // interval shrinks by 1 tick per this many points
    pub speed_score_divisor: f64,    // speed grows by 1 px/tick per this many points

    // --- Collectibles ---
    pub crown_w: f64,
    pub crown_h: f64,
    pub crown_spawn_margin: f64,
    pub crown_min_interval: f64,
    pub crown_interval_range: f64,
    pub crown_band_margin: f64,
    pub crown_bonus: f64,

    // --- Floating texts ---
    pub floating_ttl: f64,
    pub floating_rise: f64,

    // --- Scoring / stages ---
    pub survival_rate: f64,
    pub stage_threshold: f64,
    pub stage_backgrounds: Vec<Vec<LayerSpec>>,

    // --- Timing ---
    pub max_frame_ms: f64,
    pub frame_ms: f64,
    pub parallax_rate: f64,

    /// Entities are dropped once their right edge is left of this x.
    pub retire_x: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            ground_height: 80.0,
            player_x: 150.0,
            player_w: 80.0,
            player_h: 80.0,
            gravity: 0.9,
            jump_force: -16.0,
            obstacle_width: 84.0,
            obstacle_min_height: 40.0,
            obstacle_height_range: 240.0,
            obstacle_spawn_margin: 20.0,
            obstacle_base_speed: 4.0,
            initial_spawn_interval: 90.0,
            min_spawn_interval: 40.0,
            interval_score_divisor: 5.0,
            speed_score_divisor: 10.0,
            crown_w: 38.0,
            crown_h: 28.0,
            crown_spawn_margin: 30.0,
            crown_min_interval: 140.0,
            crown_interval_range: 160.0,
            crown_band_margin: 40.0,
            crown_bonus: 5.0,
            floating_ttl: 60.0,
            floating_rise: 0.3,
            survival_rate: 0.01,
            stage_threshold: 20.0,
            stage_backgrounds: vec![
                vec![
                    LayerSpec::new("nature 3/2.png", 0.15),
                    LayerSpec::new("nature 3/2.png", 0.5),
                    LayerSpec::new("nature 3/3.png", 0.15),
                ],
                vec![LayerSpec::new("origbig1.png", 0.15)],
            ],
            max_frame_ms: 40.0,
            frame_ms: 16.666,
            parallax_rate: 2.0,
            retire_x: -50.0,
        }
    }
}

impl GameConfig {
    /// Top edge of the ground strip.
    pub fn ground_top(&self) -> f64 {
        self.height - self.ground_height
    }

    /// Resting y for the player (top of sprite when standing on the ground).
    pub fn player_ground_y(&self) -> f64 {
        self.ground_top() - self.player_h
    }

    /// Parse overrides on top of the defaults; missing keys keep their default.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let cfg: GameConfig =
            serde_json::from_str(json).map_err(|e| GameError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("ground_height", self.ground_height),
            ("player_w", self.player_w),
            ("player_h", self.player_h),
            ("obstacle_width", self.obstacle_width),
            ("crown_w", self.crown_w),
            ("crown_h", self.crown_h),
            ("min_spawn_interval", self.min_spawn_interval),
            ("interval_score_divisor", self.interval_score_divisor),
            ("speed_score_divisor", self.speed_score_divisor),
            ("stage_threshold", self.stage_threshold),
            ("frame_ms", self.frame_ms),
            ("max_frame_ms", self.max_frame_ms),
        ];
        for (name, v) in positive {
            if !(v > 0.0) {
                return Err(GameError::Config(format!("{} must be positive", name)));
            }
        }
        if self.ground_height >= self.height {
            return Err(GameError::Config("ground_height must be below height".into()));
        }
        if self.initial_spawn_interval < self.min_spawn_interval {
            return Err(GameError::Config(
                "initial_spawn_interval is below min_spawn_interval".into(),
            ));
        }
        if self.obstacle_height_range < 0.0 || self.crown_interval_range < 0.0 {
            return Err(GameError::Config("ranges must not be negative".into()));
        }
        Ok(())
    }
}
