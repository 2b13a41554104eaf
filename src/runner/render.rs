//! One frame of paint. Reads the game state, never changes it.

use super::GameLoop;
use super::spawner::Anchor;
use crate::error::GameError;

/// Anything with pixel dimensions that a `Surface` can blit.
pub trait ImageHandle {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Minimal 2d drawing surface (canvas-like).
pub trait Surface {
    type Image: ImageHandle;

    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self);
    fn set_fill(&mut self, style: &str);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn fill_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, radius: f64);
    /// `size = None` draws at the image's natural size.
    fn draw_image(
        &mut self,
        image: &Self::Image,
        x: f64,
        y: f64,
        size: Option<(f64, f64)>,
    ) -> Result<(), GameError>;
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// Sprites supplied by the host; either may be missing.
pub struct Sprites<I> {
    pub player: Option<I>,
    pub crown: Option<I>,
}

impl<I> Default for Sprites<I> {
    fn default() -> Self {
        Self { player: None, crown: None }
    }
}

const GROUND_COLOR: &str = "#bfe7a1";
const OBSTACLE_COLOR: &str = "#7b5e3a";
const SHADOW_COLOR: &str = "rgba(0,0,0,0.08)";
const SHADOW_DEPTH: f64 = 6.0;
const PLACEHOLDER_COLOR: &str = "#ff6b81";
const HUD_COLOR: &str = "#333";
const HUD_INSET: f64 = 14.0;

pub fn render_frame<S: Surface>(surface: &mut S, game: &GameLoop<S::Image>, sprites: &Sprites<S::Image>) {
    let cfg = game.config();
    let (w, h) = (surface.width(), surface.height());
    surface.clear();

    game.background().render(surface, w, h, cfg.ground_height);

    surface.set_fill(GROUND_COLOR);
    surface.fill_rect(0.0, h - cfg.ground_height, w, cfg.ground_height);

    for o in game.obstacles() {
        let (x, y, ow, oh) = (o.x.round(), o.y.round(), o.w.round(), o.h.round());
        surface.set_fill(OBSTACLE_COLOR);
        surface.fill_rect(x, y, ow, oh);
        // Shadow on the side facing the ground
        surface.set_fill(SHADOW_COLOR);
        match o.anchor {
            Anchor::Top => surface.fill_rect(x, y + oh, ow, SHADOW_DEPTH),
            Anchor::Bottom => surface.fill_rect(x, y - SHADOW_DEPTH, ow, SHADOW_DEPTH),
        }
    }

    if let Some(crown) = &sprites.crown {
        for c in game.collectibles() {
            if let Err(e) = surface.draw_image(crown, c.x, c.y, Some((c.w, c.h))) {
                log::warn!("crown draw failed: {}", e);
                break;
            }
        }
    }

    surface.set_font("18px Arial");
    surface.set_text_align(TextAlign::Center);
    surface.set_fill("rgba(0,0,0,0.7)");
    for ft in game.floating_texts() {
        surface.fill_text(&ft.label, ft.x.round(), ft.y.round());
    }

    let p = game.player();
    let drew_sprite = match &sprites.player {
        Some(img) => match surface.draw_image(img, p.x, p.y, Some((p.w, p.h))) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("player sprite draw failed: {}", e);
                false
            }
        },
        None => false,
    };
    if !drew_sprite {
        surface.set_fill(PLACEHOLDER_COLOR);
        surface.fill_round_rect(p.x, p.y, p.w, p.h, 10.0);
    }

    let run = game.run_state();
    surface.set_fill(HUD_COLOR);
    surface.set_font("20px Arial");
    surface.set_text_align(TextAlign::Left);
    surface.fill_text(&format!("Score: {}", run.score.floor()), HUD_INSET, 30.0);
    surface.set_text_align(TextAlign::Right);
    surface.fill_text(&format!("Best: {}", run.best), w - HUD_INSET, 30.0);

    if run.game_over {
        surface.set_fill("rgba(0,0,0,0.55)");
        surface.fill_rect(0.0, 0.0, w, h);
        surface.set_fill("#ffffff");
        surface.set_text_align(TextAlign::Center);
        surface.set_font("64px Arial");
        surface.fill_text("GAME OVER", w / 2.0, h / 2.0);
        surface.set_font("20px Arial");
        surface.fill_text(&format!("Score: {}", run.score.floor()), w / 2.0, h / 2.0 + 44.0);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::config::GameConfig;
    use crate::runner::spawner::{Collectible, Obstacle};
    use crate::storage::MemoryScoreStore;

    fn game() -> GameLoop<FakeImage> {
        GameLoop::with_seed(GameConfig::default(), Box::new(MemoryScoreStore::with_best(12)), 5)
    }

    /// A game whose spawners stay silent, holding one freshly picked-up crown (+5).
    fn game_after_pickup() -> GameLoop<FakeImage> {
        let mut g = game();
        g.spawner_mut().obstacle_timer = 1e9;
        g.spawner_mut().collectible_timer = 1e9;
        g.collectibles_mut().push(Collectible { x: 160.0, y: 450.0, w: 38.0, h: 28.0 });
        g.tick(1.0);
        g
    }

    fn hud_painted(s: &RecordingSurface) -> bool {
        let texts = s.texts();
        texts.contains(&"Score: 5") && texts.contains(&"Best: 12")
    }

    #[test]
    fn placeholder_when_no_sprite() {
        let g = game();
        let mut s = RecordingSurface::new(1000.0, 600.0);
        render_frame(&mut s, &g, &Sprites::default());
        assert_eq!(s.ops[0], Op::Clear);
        assert!(s.ops.contains(&Op::RoundRect { x: 150.0, y: 440.0, w: 80.0, h: 80.0 }));
        assert_eq!(s.texts(), vec!["Score: 0", "Best: 12"]);
    }

    #[test]
    fn sprite_drawn_at_player_box() {
        let g = game();
        let mut s = RecordingSurface::new(1000.0, 600.0);
        let sprites = Sprites { player: Some(FakeImage::new(300.0, 300.0)), crown: None };
        render_frame(&mut s, &g, &sprites);
        assert!(s.ops.contains(&Op::Image { x: 150.0, y: 440.0, size: Some((80.0, 80.0)) }));
        assert!(!s.ops.iter().any(|op| matches!(op, Op::RoundRect { .. })));
    }

    #[test]
    fn broken_sprite_falls_back_and_hud_still_paints() {
        let g = game();
        let mut s = RecordingSurface::new(1000.0, 600.0);
        let sprites = Sprites {
            player: Some(FakeImage { w: 1.0, h: 1.0, broken: true }),
            crown: None,
        };
        render_frame(&mut s, &g, &sprites);
        assert!(s.ops.iter().any(|op| matches!(op, Op::RoundRect { .. })));
        assert_eq!(s.texts(), vec!["Score: 0", "Best: 12"]);
    }

    #[test]
    fn obstacle_shadow_faces_ground() {
        let mut g = game();
        g.obstacles_mut().push(Obstacle {
            x: 500.0,
            y: 0.0,
            w: 84.0,
            h: 100.0,
            anchor: Anchor::Top,
            speed: 4.0,
        });
        g.obstacles_mut().push(Obstacle {
            x: 700.0,
            y: 420.0,
            w: 84.0,
            h: 100.0,
            anchor: Anchor::Bottom,
            speed: 4.0,
        });
        let mut s = RecordingSurface::new(1000.0, 600.0);
        render_frame(&mut s, &g, &Sprites::default());
        assert!(s.ops.contains(&Op::Rect { x: 500.0, y: 100.0, w: 84.0, h: 6.0 }));
        assert!(s.ops.contains(&Op::Rect { x: 700.0, y: 414.0, w: 84.0, h: 6.0 }));
    }

    #[test]
    fn ground_strip_spans_width() {
        let g = game();
        let mut s = RecordingSurface::new(1000.0, 600.0);
        render_frame(&mut s, &g, &Sprites::default());
        assert!(s.ops.contains(&Op::Rect { x: 0.0, y: 520.0, w: 1000.0, h: 80.0 }));
    }

    #[test]
    fn game_over_overlay_dims_and_shows_final_score() {
        let mut g = game_after_pickup();
        g.obstacles_mut().push(Obstacle {
            x: 150.0,
            y: 0.0,
            w: 84.0,
            h: 600.0,
            anchor: Anchor::Top,
            speed: 4.0,
        });
        g.tick(1.0);
        assert!(g.run_state().game_over);
        let mut s = RecordingSurface::new(1000.0, 600.0);
        render_frame(&mut s, &g, &Sprites::default());
        let dim = s.ops.iter().position(|op| *op == Op::Fill("rgba(0,0,0,0.55)".into())).expect("dim fill");
        assert_eq!(s.ops[dim + 1], Op::Rect { x: 0.0, y: 0.0, w: 1000.0, h: 600.0 });
        assert!(s.texts().ends_with(&["GAME OVER", "Score: 5"]));
        assert!(s.ops.contains(&Op::Text { text: "GAME OVER".into(), x: 500.0, y: 300.0 }));
    }

    #[test]
    fn running_game_has_no_overlay() {
        let g = game_after_pickup();
        let mut s = RecordingSurface::new(1000.0, 600.0);
        render_frame(&mut s, &g, &Sprites::default());
        assert!(!s.texts().contains(&"GAME OVER"));
    }

    #[test]
    fn floating_text_drawn_at_rounded_position() {
        let g = game_after_pickup();
        let mut s = RecordingSurface::new(1000.0, 600.0);
        render_frame(&mut s, &g, &Sprites::default());
        // label sits at (175, 449.7) after the pickup tick
        assert!(s.ops.contains(&Op::Text { text: "+5".into(), x: 175.0, y: 450.0 }));
    }

    #[test]
    fn crowns_drawn_at_their_box() {
        let mut g = game();
        g.collectibles_mut().push(Collectible { x: 500.0, y: 100.0, w: 38.0, h: 28.0 });
        let mut s = RecordingSurface::new(1000.0, 600.0);
        let sprites = Sprites { player: None, crown: Some(FakeImage::new(64.0, 48.0)) };
        render_frame(&mut s, &g, &sprites);
        assert!(s.ops.contains(&Op::Image { x: 500.0, y: 100.0, size: Some((38.0, 28.0)) }));
    }

    #[test]
    fn broken_crown_is_skipped_and_hud_still_paints() {
        let mut g = game_after_pickup();
        g.collectibles_mut().push(Collectible { x: 500.0, y: 100.0, w: 38.0, h: 28.0 });
        let mut s = RecordingSurface::new(1000.0, 600.0);
        let sprites = Sprites {
            player: None,
            crown: Some(FakeImage { w: 64.0, h: 48.0, broken: true }),
        };
        render_frame(&mut s, &g, &sprites);
        assert!(!s.ops.iter().any(|op| matches!(op, Op::Image { .. })));
        assert!(hud_painted(&s));
    }

    #[test]
    fn broken_background_layer_is_skipped_and_hud_still_paints() {
        let mut g = game_after_pickup();
        let generation = g.background().generation();
        assert!(g.background_mut().attach(generation, 0, FakeImage { w: 400.0, h: 200.0, broken: true }));
        let mut s = RecordingSurface::new(1000.0, 600.0);
        render_frame(&mut s, &g, &Sprites::default());
        assert!(!s.ops.iter().any(|op| matches!(op, Op::Image { .. })));
        assert!(s.ops.contains(&Op::Rect { x: 0.0, y: 520.0, w: 1000.0, h: 80.0 }));
        assert!(hud_painted(&s));
    }
}
