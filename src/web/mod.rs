//! Browser host: mounts the canvas, loads sprites, drives `GameLoop` from
//! `requestAnimationFrame` and exposes run control to JS.

pub mod assets;
pub mod canvas;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlImageElement, KeyboardEvent, window};

use crate::character;
use crate::config::GameConfig;
use crate::error::{GameError, describe_js};
use crate::runner::parallax::LoadRequest;
use crate::runner::render::{Sprites, render_frame};
use crate::runner::{GameLoop, TickOutcome};
use crate::storage::{LocalScoreStore, MemoryScoreStore, ScoreStore};
use canvas::CanvasSurface;

pub const DEFAULT_MOUNT_ID: &str = "gameArea";
const RESTART_BUTTON_ID: &str = "restartBtn";
const HOME_BUTTON_ID: &str = "homeBtn";
const HIGH_SCORE_ID: &str = "highScore";

type FrameClosure = Closure<dyn FnMut(f64)>;

struct WebGame {
    game: GameLoop<HtmlImageElement>,
    surface: CanvasSurface,
    sprites: Sprites<HtmlImageElement>,
    /// Pending animation-frame request, cancelled by `stop`.
    raf_id: Option<i32>,
    frame_cb: Option<FrameClosure>,
}

impl WebGame {
    fn request_frame(&mut self) {
        let (Some(win), Some(cb)) = (window(), self.frame_cb.as_ref()) else {
            return;
        };
        match win.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.raf_id = Some(id),
            Err(e) => log::warn!("requestAnimationFrame failed: {}", describe_js(&e)),
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(win) = window() {
                win.cancel_animation_frame(id).ok();
            }
        }
    }

    fn paint(&mut self) {
        render_frame(&mut self.surface, &self.game, &self.sprites);
    }
}

/// Handle returned to JS by [`init_game`]. Each handle is an independent game.
#[wasm_bindgen]
pub struct GameHandle {
    inner: Rc<RefCell<WebGame>>,
}

#[wasm_bindgen]
impl GameHandle {
    pub fn start(&self) {
        start_loop(&self.inner);
    }

    /// No tick runs after this returns, even if a frame was already requested.
    pub fn stop(&self) {
        let mut web = self.inner.borrow_mut();
        web.game.stop();
        web.cancel_frame();
    }

    pub fn reset(&self) {
        reset_game(&self.inner);
    }

    pub fn jump(&self) {
        self.inner.borrow_mut().game.jump();
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> f64 {
        self.inner.borrow().game.run_state().score
    }

    #[wasm_bindgen(getter)]
    pub fn best(&self) -> f64 {
        self.inner.borrow().game.run_state().best as f64
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.inner.borrow().game.is_running()
    }
}

/// Mount the game into `#mount_id` (default `gameArea`), load sprites and start a run.
///
/// Resolves to `undefined` (after a console warning) when the mount element is missing.
/// `config_json` overrides any `GameConfig` field; ignored without the `serde_json` feature.
#[wasm_bindgen]
pub async fn init_game(
    mount_id: Option<String>,
    config_json: Option<String>,
) -> Result<Option<GameHandle>, JsValue> {
    let cfg = load_config(config_json.as_deref())?;
    let win = window().ok_or(GameError::NoWindow)?;
    let doc = win.document().ok_or(GameError::NoDocument)?;

    let mount_id = mount_id.unwrap_or_else(|| DEFAULT_MOUNT_ID.to_string());
    let Some(area) = doc.get_element_by_id(&mount_id) else {
        log::warn!("{}; game stays inert", GameError::MissingMount(mount_id));
        return Ok(None);
    };
    let surface = CanvasSurface::mount(&doc, &area, cfg.width, cfg.height)?;

    let store: Box<dyn ScoreStore> = match LocalScoreStore::open() {
        Some(store) => Box::new(store),
        None => {
            log::warn!("localStorage unavailable; best score will not persist");
            Box::new(MemoryScoreStore::default())
        }
    };
    let game = GameLoop::new(cfg, store);

    let selected = character::selected_from_page();
    let player = assets::load_first(selected.sprite_file()).await;
    if player.is_none() {
        log::warn!("drawing placeholder for {:?}", selected);
    }
    let crown = assets::load_first(assets::CROWN_FILE).await;

    let inner = Rc::new(RefCell::new(WebGame {
        game,
        surface,
        sprites: Sprites { player, crown },
        raf_id: None,
        frame_cb: None,
    }));
    install_frame_callback(&inner);
    load_pending_layers(&inner);
    wire_input(&doc, &inner)?;

    show_best(inner.borrow().game.run_state().best);
    reset_game(&inner);
    Ok(Some(GameHandle { inner }))
}

fn load_config(json: Option<&str>) -> Result<GameConfig, GameError> {
    match json {
        None => Ok(GameConfig::default()),
        #[cfg(feature = "serde_json")]
        Some(json) => GameConfig::from_json(json),
        #[cfg(not(feature = "serde_json"))]
        Some(_) => {
            log::warn!("config overrides ignored (built without serde_json)");
            Ok(GameConfig::default())
        }
    }
}

// --- Frame loop --------------------------------------------------------------

fn install_frame_callback(inner: &Rc<RefCell<WebGame>>) {
    let weak = Rc::downgrade(inner);
    let cb = Closure::wrap(Box::new(move |ts: f64| {
        if let Some(rc) = weak.upgrade() {
            on_frame(&rc, ts);
        }
    }) as Box<dyn FnMut(f64)>);
    inner.borrow_mut().frame_cb = Some(cb);
}

fn on_frame(rc: &Rc<RefCell<WebGame>>, ts: f64) {
    {
        let mut web = rc.borrow_mut();
        web.raf_id = None;
        if !web.game.is_running() {
            return;
        }
        if let TickOutcome::GameOver { final_score, new_best } = web.game.frame(ts) {
            log::info!("game over at {}", final_score.floor());
            if let Some(best) = new_best {
                show_best(best);
            }
        }
        web.paint();
        if web.game.is_running() {
            web.request_frame();
        }
    }
    load_pending_layers(rc);
}

fn start_loop(inner: &Rc<RefCell<WebGame>>) {
    let mut web = inner.borrow_mut();
    if web.game.is_running() && web.raf_id.is_some() {
        return;
    }
    web.game.start();
    web.request_frame();
}

fn reset_game(inner: &Rc<RefCell<WebGame>>) {
    {
        let mut web = inner.borrow_mut();
        web.cancel_frame();
        web.game.reset();
        show_best(web.game.run_state().best);
    }
    start_loop(inner);
    load_pending_layers(inner);
}

/// Kick off async loads for a freshly swapped background set. Layers land in any order.
fn load_pending_layers(inner: &Rc<RefCell<WebGame>>) {
    let request = inner.borrow_mut().game.background_mut().take_load_request();
    if let Some(request) = request {
        spawn_layer_loads(Rc::downgrade(inner), request);
    }
}

fn spawn_layer_loads(weak: Weak<RefCell<WebGame>>, request: LoadRequest) {
    let generation = request.generation;
    for (index, file) in request.files.into_iter().enumerate() {
        let weak = weak.clone();
        spawn_local(async move {
            let Some(img) = assets::load_first(&file).await else {
                return;
            };
            let Some(rc) = weak.upgrade() else { return };
            let attached = rc.borrow_mut().game.background_mut().attach(generation, index, img);
            if !attached {
                log::debug!("dropped stale background layer {}", file);
            }
        });
    }
}

// --- Input -------------------------------------------------------------------

fn wire_input(doc: &Document, inner: &Rc<RefCell<WebGame>>) -> Result<(), GameError> {
    let win = window().ok_or(GameError::NoWindow)?;
    let listen_err = |e: JsValue| GameError::Canvas(describe_js(&e));

    // Space / ArrowUp
    {
        let weak = Rc::downgrade(inner);
        let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
            let code = evt.code();
            if code == "Space" || code == "ArrowUp" {
                evt.prevent_default();
                if let Some(rc) = weak.upgrade() {
                    rc.borrow_mut().game.jump();
                }
            }
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .map_err(listen_err)?;
        closure.forget();
    }

    // Tap / click on the canvas
    {
        let weak = Rc::downgrade(inner);
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if let Some(rc) = weak.upgrade() {
                rc.borrow_mut().game.jump();
            }
        }) as Box<dyn FnMut(_)>);
        inner
            .borrow()
            .surface
            .canvas()
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())
            .map_err(listen_err)?;
        closure.forget();
    }

    // Optional page buttons
    if let Some(btn) = doc.get_element_by_id(RESTART_BUTTON_ID) {
        let weak = Rc::downgrade(inner);
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if let Some(rc) = weak.upgrade() {
                reset_game(&rc);
            }
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(listen_err)?;
        closure.forget();
    }
    if let Some(btn) = doc.get_element_by_id(HOME_BUTTON_ID) {
        let weak = Rc::downgrade(inner);
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if let Some(rc) = weak.upgrade() {
                let mut web = rc.borrow_mut();
                web.game.stop();
                web.cancel_frame();
            }
        }) as Box<dyn FnMut(_)>);
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(listen_err)?;
        closure.forget();
    }
    Ok(())
}

fn show_best(best: u64) {
    if let Some(el) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(HIGH_SCORE_ID))
    {
        el.set_text_content(Some(&best.to_string()));
    }
}
