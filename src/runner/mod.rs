//! Endless-runner core: one `GameLoop` instance owns a whole run.
//!
//! The loop is driven from outside. A host calls [`GameLoop::frame`] with its
//! animation-frame timestamp (or [`GameLoop::tick`] directly with a normalized delta)
//! and then paints with [`render::render_frame`]. Nothing in here touches the DOM,
//! so the whole run can be stepped under a test clock.
//!
//! Tick order is fixed: background, physics, obstacle spawn/move, crown spawn/move/pickup,
//! floating texts, fatal collision, survival score, stage check. A fatal collision ends
//! the tick early, so the crashing tick earns no survival score and never changes stage.

pub mod clock;
pub mod collision;
pub mod parallax;
pub mod physics;
pub mod render;
pub mod spawner;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::GameConfig;
use crate::storage::ScoreStore;
use clock::FrameClock;
use collision::intersects;
use parallax::ParallaxBackground;
use physics::Player;
use spawner::{Collectible, Obstacle, Spawner, is_retired, obstacle_speed};

// --- Run state ---------------------------------------------------------------

/// Short-lived "+5" label left behind by a pickup.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingText {
    pub x: f64,
    pub y: f64,
    pub ttl: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunState {
    /// Fractional; only the HUD floors it.
    pub score: f64,
    /// Index into `GameConfig::stage_backgrounds`.
    pub stage: usize,
    /// Persisted best, whole points.
    pub best: u64,
    pub running: bool,
    /// Set when the run ended on an obstacle; cleared by `reset`.
    pub game_over: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// Stopped, or the frame only primed the clock.
    Idle,
    Advanced,
    GameOver { final_score: f64, new_best: Option<u64> },
}

// --- Game loop ---------------------------------------------------------------

pub struct GameLoop<I> {
    cfg: GameConfig,
    rng: SmallRng,
    player: Player,
    obstacles: Vec<Obstacle>,
    collectibles: Vec<Collectible>,
    floating_texts: Vec<FloatingText>,
    spawner: Spawner,
    run: RunState,
    background: ParallaxBackground<I>,
    store: Box<dyn ScoreStore>,
    clock: FrameClock,
    ticks: u64,
}

impl<I: render::ImageHandle> GameLoop<I> {
    /// New stopped game seeded from OS/browser entropy.
    pub fn new(cfg: GameConfig, store: Box<dyn ScoreStore>) -> Self {
        Self::with_rng(cfg, store, SmallRng::from_entropy())
    }

    /// Deterministic spawning for tests and replays.
    pub fn with_seed(cfg: GameConfig, store: Box<dyn ScoreStore>, seed: u64) -> Self {
        Self::with_rng(cfg, store, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(cfg: GameConfig, store: Box<dyn ScoreStore>, rng: SmallRng) -> Self {
        let best = store.load_best();
        let background = ParallaxBackground::new(cfg.stage_backgrounds.first().map(Vec::as_slice).unwrap_or(&[]));
        Self {
            player: Player::new(&cfg),
            clock: FrameClock::new(cfg.max_frame_ms, cfg.frame_ms),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            floating_texts: Vec::new(),
            spawner: Spawner::default(),
            run: RunState { score: 0.0, stage: 0, best, running: false, game_over: false },
            background,
            store,
            rng,
            cfg,
            ticks: 0,
        }
    }

    // --- Run control ---

    /// No-op while running. Otherwise resumes; the next frame only primes the clock.
    pub fn start(&mut self) {
        if self.run.running {
            return;
        }
        self.run.running = true;
        self.clock.rearm();
    }

    /// Freezes the run as-is (for a game-over screen); nothing is cleared.
    pub fn stop(&mut self) {
        self.run.running = false;
    }

    /// Fresh run: empty world, zero score, player on the ground, then start.
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.collectibles.clear();
        self.floating_texts.clear();
        self.spawner.reset();
        self.player = Player::new(&self.cfg);
        self.run.score = 0.0;
        self.run.game_over = false;
        if self.run.stage != 0 {
            self.switch_stage(0);
        }
        self.stop();
        self.start();
    }

    pub fn jump(&mut self) {
        self.player.jump();
    }

    /// Host frame callback. Ticks only while running and once the clock is primed.
    pub fn frame(&mut self, now_ms: f64) -> TickOutcome {
        if !self.run.running {
            return TickOutcome::Idle;
        }
        match self.clock.advance(now_ms) {
            Some(dt) => self.tick(dt),
            None => TickOutcome::Idle,
        }
    }

    /// Advance the world by `dt` normalized frames.
    pub fn tick(&mut self, dt: f64) -> TickOutcome {
        self.ticks += 1;

        self.background.update(dt * self.cfg.parallax_rate);

        let ground_y = self.cfg.ground_top() - self.player.h;
        self.player.apply_gravity(dt, ground_y);

        if let Some(o) = self.spawner.tick_obstacles(dt, self.run.score, &self.cfg, &mut self.rng) {
            self.obstacles.push(o);
        }
        let speed = obstacle_speed(&self.cfg, self.run.score);
        for o in &mut self.obstacles {
            o.speed = speed;
            o.x -= speed * dt;
        }
        let cfg = &self.cfg;
        self.obstacles.retain(|o| !is_retired(cfg, o.x, o.w));

        if let Some(c) = self.spawner.tick_collectibles(dt, &self.cfg, &mut self.rng) {
            self.collectibles.push(c);
        }
        self.advance_collectibles(dt);
        self.advance_floating_texts(dt);

        let player_box = self.player.bounds();
        if self.obstacles.iter().any(|o| intersects(&player_box, &o.bounds())) {
            return self.end_run();
        }

        self.run.score += self.cfg.survival_rate * dt;
        self.check_stage();
        TickOutcome::Advanced
    }

    fn advance_collectibles(&mut self, dt: f64) {
        let speed = obstacle_speed(&self.cfg, self.run.score);
        let player_box = self.player.bounds();
        let mut picked: Vec<Collectible> = Vec::new();
        let cfg = &self.cfg;
        self.collectibles.retain_mut(|c| {
            c.x -= speed * dt;
            if intersects(&player_box, &c.bounds()) {
                picked.push(c.clone());
                return false;
            }
            !is_retired(cfg, c.x, c.w)
        });
        for c in picked {
            self.run.score += self.cfg.crown_bonus;
            self.floating_texts.push(FloatingText {
                x: c.x + c.w / 2.0,
                y: c.y,
                ttl: self.cfg.floating_ttl,
                label: format!("+{}", self.cfg.crown_bonus),
            });
        }
    }

    fn advance_floating_texts(&mut self, dt: f64) {
        for ft in &mut self.floating_texts {
            ft.y -= self.cfg.floating_rise * dt;
            ft.ttl -= dt;
        }
        self.floating_texts.retain(|ft| ft.ttl > 0.0);
    }

    fn end_run(&mut self) -> TickOutcome {
        self.stop();
        self.run.game_over = true;
        let final_score = self.run.score;
        let whole = final_score.floor() as u64;
        let new_best = if whole > self.run.best {
            self.run.best = whole;
            if let Err(e) = self.store.save_best(whole) {
                log::warn!("best score {} not persisted: {}", whole, e);
            }
            Some(whole)
        } else {
            None
        };
        log::info!("run over: score {} (best {})", whole, self.run.best);
        TickOutcome::GameOver { final_score, new_best }
    }

    fn check_stage(&mut self) {
        let presets = self.cfg.stage_backgrounds.len();
        if presets == 0 {
            return;
        }
        let stage = (self.run.score / self.cfg.stage_threshold).floor() as usize % presets;
        if stage != self.run.stage {
            self.switch_stage(stage);
        }
    }

    fn switch_stage(&mut self, stage: usize) {
        self.run.stage = stage;
        if let Some(specs) = self.cfg.stage_backgrounds.get(stage) {
            self.background.set_layers(specs);
            log::info!("stage {} background ({} layers)", stage, specs.len());
        }
    }

    // --- Accessors ---

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }
    pub fn player(&self) -> &Player {
        &self.player
    }
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
    pub fn collectibles(&self) -> &[Collectible] {
        &self.collectibles
    }
    pub fn floating_texts(&self) -> &[FloatingText] {
        &self.floating_texts
    }
    pub fn run_state(&self) -> &RunState {
        &self.run
    }
    pub fn is_running(&self) -> bool {
        self.run.running
    }
    /// Number of ticks executed since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
    pub fn background(&self) -> &ParallaxBackground<I> {
        &self.background
    }
    pub fn background_mut(&mut self) -> &mut ParallaxBackground<I> {
        &mut self.background
    }

    // Scripted placement, used by scenario tests.
    pub fn obstacles_mut(&mut self) -> &mut Vec<Obstacle> {
        &mut self.obstacles
    }
    pub fn collectibles_mut(&mut self) -> &mut Vec<Collectible> {
        &mut self.collectibles
    }
    pub fn spawner_mut(&mut self) -> &mut Spawner {
        &mut self.spawner
    }
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }
}
