//! Procedural obstacles and crowns. Difficulty (cadence and travel speed) is a
//! step function of the current score.

use rand::Rng;

use super::collision::Rect;
use crate::config::GameConfig;

/// Which edge an obstacle hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Top,
    Bottom,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub anchor: Anchor,
    /// Travel per tick, refreshed from the score every tick.
    pub speed: f64,
}

impl Obstacle {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Collectible {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Collectible {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Ticks between obstacle spawns at this score.
pub fn obstacle_interval(cfg: &GameConfig, score: f64) -> f64 {
    let shrink = (score / cfg.interval_score_divisor).floor();
    (cfg.initial_spawn_interval - shrink).max(cfg.min_spawn_interval)
}

/// Horizontal travel per tick at this score.
pub fn obstacle_speed(cfg: &GameConfig, score: f64) -> f64 {
    cfg.obstacle_base_speed + (score / cfg.speed_score_divisor).floor()
}

/// `true` once the entity's right edge has passed the retire line.
pub fn is_retired(cfg: &GameConfig, x: f64, w: f64) -> bool {
    x + w < cfg.retire_x
}

/// Countdown timers for both entity kinds. Timers start at 0 so the first
/// tick of a run spawns immediately.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spawner {
    pub obstacle_timer: f64,
    pub collectible_timer: f64,
}

impl Spawner {
    pub fn reset(&mut self) {
        self.obstacle_timer = 0.0;
        self.collectible_timer = 0.0;
    }

    pub fn tick_obstacles<R: Rng>(
        &mut self,
        dt: f64,
        score: f64,
        cfg: &GameConfig,
        rng: &mut R,
    ) -> Option<Obstacle> {
        self.obstacle_timer -= dt;
        if self.obstacle_timer > 0.0 {
            return None;
        }
        self.obstacle_timer = obstacle_interval(cfg, score);
        let h = cfg.obstacle_min_height + rng.r#gen::<f64>() * cfg.obstacle_height_range;
        let anchor = if rng.r#gen::<bool>() { Anchor::Top } else { Anchor::Bottom };
        let y = match anchor {
            Anchor::Top => 0.0,
            Anchor::Bottom => cfg.ground_top() - h,
        };
        Some(Obstacle {
            x: cfg.width + cfg.obstacle_spawn_margin,
            y,
            w: cfg.obstacle_width,
            h,
            anchor,
            speed: obstacle_speed(cfg, score),
        })
    }

    pub fn tick_collectibles<R: Rng>(
        &mut self,
        dt: f64,
        cfg: &GameConfig,
        rng: &mut R,
    ) -> Option<Collectible> {
        self.collectible_timer -= dt;
        if self.collectible_timer > 0.0 {
            return None;
        }
        self.collectible_timer =
            cfg.crown_min_interval + (rng.r#gen::<f64>() * cfg.crown_interval_range).floor();
        let (min_y, max_y) = crown_band(cfg);
        let y = (min_y + rng.r#gen::<f64>() * (max_y - min_y)).floor().clamp(min_y, max_y);
        Some(Collectible {
            x: cfg.width + cfg.crown_spawn_margin,
            y,
            w: cfg.crown_w,
            h: cfg.crown_h,
        })
    }
}

/// Reachable band for crown tops. Collapses to a single row instead of inverting
/// when the surface is too short for the margins.
pub fn crown_band(cfg: &GameConfig) -> (f64, f64) {
    let min_y = cfg.crown_band_margin;
    let max_y = cfg.ground_top() - cfg.crown_h - cfg.crown_band_margin;
    (min_y, max_y.max(min_y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn difficulty_at_zero() {
        let cfg = GameConfig::default();
        assert_eq!(obstacle_interval(&cfg, 0.0), 90.0);
        assert_eq!(obstacle_speed(&cfg, 0.0), 4.0);
    }

    #[test]
    fn difficulty_at_fifty() {
        let cfg = GameConfig::default();
        assert_eq!(obstacle_interval(&cfg, 50.0), 80.0);
        assert_eq!(obstacle_speed(&cfg, 50.0), 9.0);
    }

    #[test]
    fn interval_floors_at_minimum() {
        let cfg = GameConfig::default();
        assert_eq!(obstacle_interval(&cfg, 10_000.0), 40.0);
    }

    #[test]
    fn first_tick_spawns_both_kinds() {
        let cfg = GameConfig::default();
        let mut rng = SmallRng::seed_from_u64(7);
        let mut s = Spawner::default();
        let o = s.tick_obstacles(1.0, 0.0, &cfg, &mut rng).expect("obstacle");
        assert_eq!(o.x, 1020.0);
        assert_eq!(o.w, 84.0);
        assert_eq!(s.obstacle_timer, 90.0);
        let c = s.tick_collectibles(1.0, &cfg, &mut rng).expect("crown");
        assert_eq!(c.x, 1030.0);
        assert!(s.collectible_timer >= 140.0 && s.collectible_timer < 300.0);
    }

    #[test]
    fn no_spawn_until_timer_expires() {
        let cfg = GameConfig::default();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut s = Spawner::default();
        s.tick_obstacles(1.0, 0.0, &cfg, &mut rng);
        for _ in 0..89 {
            assert!(s.tick_obstacles(1.0, 0.0, &cfg, &mut rng).is_none());
        }
        assert!(s.tick_obstacles(1.0, 0.0, &cfg, &mut rng).is_some());
    }

    #[test]
    fn obstacles_are_anchored_and_sized() {
        let cfg = GameConfig::default();
        let mut rng = SmallRng::seed_from_u64(42);
        let mut seen_top = false;
        let mut seen_bottom = false;
        for _ in 0..200 {
            let mut s = Spawner::default();
            let o = s.tick_obstacles(1.0, 0.0, &cfg, &mut rng).unwrap();
            assert!(o.h >= 40.0 && o.h < 280.0);
            match o.anchor {
                Anchor::Top => {
                    seen_top = true;
                    assert_eq!(o.y, 0.0);
                }
                Anchor::Bottom => {
                    seen_bottom = true;
                    assert!((o.y + o.h - cfg.ground_top()).abs() < 1e-9);
                }
            }
        }
        assert!(seen_top && seen_bottom);
    }

    #[test]
    fn crowns_stay_in_band() {
        let cfg = GameConfig::default();
        let (lo, hi) = crown_band(&cfg);
        assert_eq!((lo, hi), (40.0, 452.0));
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..200 {
            let mut s = Spawner::default();
            let c = s.tick_collectibles(1.0, &cfg, &mut rng).unwrap();
            assert!(c.y >= lo && c.y <= hi);
            assert_eq!(c.y, c.y.floor());
        }
    }

    #[test]
    fn band_never_inverts_on_short_surfaces() {
        let cfg = GameConfig { height: 150.0, ground_height: 60.0, ..GameConfig::default() };
        let (lo, hi) = crown_band(&cfg);
        assert_eq!(lo, hi);
        let mut rng = SmallRng::seed_from_u64(9);
        let mut s = Spawner::default();
        assert_eq!(s.tick_collectibles(1.0, &cfg, &mut rng).unwrap().y, 40.0);
    }

    #[test]
    fn retire_line() {
        let cfg = GameConfig::default();
        assert!(!is_retired(&cfg, -134.0, 84.0));
        assert!(is_retired(&cfg, -134.1, 84.0));
    }
}
