//! Error type shared by the browser glue and the config loader.
//!
//! The tick loop itself never fails; everything here is absorbed at the boundary
//! that hit it (asset loads, storage, drawing) or surfaced from `init_game`.

use std::fmt;

use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq)]
pub enum GameError {
    /// `window` is unavailable (not running in a browser main thread).
    NoWindow,
    /// `document` is unavailable.
    NoDocument,
    /// The element the game mounts into does not exist.
    MissingMount(String),
    /// Canvas creation or 2d context lookup failed.
    Canvas(String),
    /// localStorage unavailable or a write was refused.
    Storage(String),
    /// A single draw call failed (usually a broken image).
    Draw(String),
    /// Config overrides were unparseable or out of range.
    Config(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::NoWindow => write!(f, "no window"),
            GameError::NoDocument => write!(f, "no document"),
            GameError::MissingMount(id) => write!(f, "mount element #{} not found", id),
            GameError::Canvas(msg) => write!(f, "canvas error: {}", msg),
            GameError::Storage(msg) => write!(f, "storage error: {}", msg),
            GameError::Draw(msg) => write!(f, "draw error: {}", msg),
            GameError::Config(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for GameError {}

impl From<GameError> for JsValue {
    fn from(e: GameError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Render a JS exception value for logs and error messages.
pub(crate) fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
