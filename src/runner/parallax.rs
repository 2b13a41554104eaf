//! Scrolling background layers.
//!
//! Layers are declared up front (file + speed) and receive their image later, whenever
//! the host's loader finishes. Each layer set carries a generation number so a load
//! that completes after the set was swapped out is dropped instead of landing on the
//! wrong layer.

use super::render::{ImageHandle, Surface};
use crate::config::LayerSpec;

pub struct BackgroundLayer<I> {
    pub file: String,
    pub speed: f64,
    pub offset: f64,
    pub image: Option<I>,
}

/// A set of layer files the host should fetch for `generation`.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadRequest {
    pub generation: u32,
    pub files: Vec<String>,
}

pub struct ParallaxBackground<I> {
    layers: Vec<BackgroundLayer<I>>,
    generation: u32,
    pending: Option<LoadRequest>,
}

impl<I> Default for ParallaxBackground<I> {
    fn default() -> Self {
        Self { layers: Vec::new(), generation: 0, pending: None }
    }
}

impl<I: ImageHandle> ParallaxBackground<I> {
    pub fn new(specs: &[LayerSpec]) -> Self {
        let mut bg = Self::default();
        bg.set_layers(specs);
        bg
    }

    /// Replace the whole layer set. Offsets start over and a load request is queued.
    pub fn set_layers(&mut self, specs: &[LayerSpec]) {
        self.generation = self.generation.wrapping_add(1);
        self.layers = specs
            .iter()
            .map(|s| BackgroundLayer { file: s.file.clone(), speed: s.speed, offset: 0.0, image: None })
            .collect();
        self.pending = Some(LoadRequest {
            generation: self.generation,
            files: specs.iter().map(|s| s.file.clone()).collect(),
        });
    }

    /// Hand the outstanding load request to the host (at most once per set).
    pub fn take_load_request(&mut self) -> Option<LoadRequest> {
        self.pending.take()
    }

    /// Install a loaded image. Returns false for stale generations or bad indices.
    pub fn attach(&mut self, generation: u32, index: usize, image: I) -> bool {
        if generation != self.generation {
            return false;
        }
        match self.layers.get_mut(index) {
            Some(layer) => {
                layer.image = Some(image);
                true
            }
            None => false,
        }
    }

    pub fn layers(&self) -> &[BackgroundLayer<I>] {
        &self.layers
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn update(&mut self, dt: f64) {
        for layer in &mut self.layers {
            let Some(img) = &layer.image else { continue };
            let w = img.width();
            if w <= 0.0 {
                continue;
            }
            layer.offset = (layer.offset + layer.speed * dt).rem_euclid(w);
        }
    }

    /// Tile each loaded layer across the width, resting just above the ground strip.
    pub fn render<S: Surface<Image = I>>(&self, surface: &mut S, width: f64, height: f64, ground: f64) {
        for layer in &self.layers {
            let Some(img) = &layer.image else { continue };
            let (iw, ih) = (img.width(), img.height());
            if iw <= 0.0 {
                continue;
            }
            let y = (height - ih - ground).max(0.0);
            let mut x = -layer.offset.floor();
            while x < width {
                if let Err(e) = surface.draw_image(img, x, y, None) {
                    log::warn!("skipping background layer {}: {}", layer.file, e);
                    break;
                }
                x += iw;
            }
        }
    }
}
