//! `Surface` over a real `<canvas>` 2d context.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlImageElement};

use crate::error::{GameError, describe_js};
use crate::runner::render::{ImageHandle, Surface, TextAlign};

impl ImageHandle for HtmlImageElement {
    fn width(&self) -> f64 {
        self.natural_width() as f64
    }
    fn height(&self) -> f64 {
        self.natural_height() as f64
    }
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Replace the contents of `area` with a fresh canvas of the given logical size.
    pub fn mount(doc: &Document, area: &Element, width: f64, height: f64) -> Result<Self, GameError> {
        area.set_inner_html("");
        let canvas: HtmlCanvasElement = doc
            .create_element("canvas")
            .map_err(|e| GameError::Canvas(describe_js(&e)))?
            .dyn_into()
            .map_err(|_| GameError::Canvas("created element is not a canvas".into()))?;
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        canvas.set_attribute("style", "max-width:100%; height:auto;").ok();
        area.append_child(&canvas).map_err(|e| GameError::Canvas(describe_js(&e)))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| GameError::Canvas(describe_js(&e)))?
            .ok_or_else(|| GameError::Canvas("2d context unavailable".into()))?
            .dyn_into()
            .map_err(|_| GameError::Canvas("context is not 2d".into()))?;
        Ok(Self { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width(), self.height());
    }

    fn set_fill(&mut self, style: &str) {
        self.ctx.set_fill_style_str(style);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }

    fn fill_round_rect(&mut self, x: f64, y: f64, w: f64, h: f64, r: f64) {
        let ctx = &self.ctx;
        ctx.begin_path();
        ctx.move_to(x + r, y);
        ctx.arc_to(x + w, y, x + w, y + h, r).ok();
        ctx.arc_to(x + w, y + h, x, y + h, r).ok();
        ctx.arc_to(x, y + h, x, y, r).ok();
        ctx.arc_to(x, y, x + w, y, r).ok();
        ctx.close_path();
        ctx.fill();
    }

    fn draw_image(
        &mut self,
        image: &HtmlImageElement,
        x: f64,
        y: f64,
        size: Option<(f64, f64)>,
    ) -> Result<(), GameError> {
        let res = match size {
            Some((w, h)) => self.ctx.draw_image_with_html_image_element_and_dw_and_dh(image, x, y, w, h),
            None => self.ctx.draw_image_with_html_image_element(image, x, y),
        };
        res.map_err(|e| GameError::Draw(describe_js(&e)))
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ctx.fill_text(text, x, y).ok();
    }
}
