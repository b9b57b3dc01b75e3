use crate::constants::MAX_DEVICE_PIXEL_RATIO;
use crate::core::{scroll_progress, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlCanvasElement> {
    let el = document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))?;
    el.dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("#{} is not a canvas: {:?}", id, e)))
}

pub fn create_canvas(document: &web::Document, width: u32, height: u32) -> Option<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .ok()?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()?;
    canvas.set_width(width);
    canvas.set_height(height);
    Some(canvas)
}

pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .ok()
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio().clamp(1.0, MAX_DEVICE_PIXEL_RATIO);
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        // Collapsed layout: keep the previous size until it measures again.
        if w_px == 0 || h_px == 0 {
            return;
        }
        if canvas.width() != w_px {
            canvas.set_width(w_px);
        }
        if canvas.height() != h_px {
            canvas.set_height(h_px);
        }
    }
}

#[inline]
pub fn canvas_viewport(canvas: &web::HtmlCanvasElement) -> Viewport {
    Viewport::new(canvas.width() as f32, canvas.height() as f32)
}

/// Live page scroll as a fraction of the scrollable range.
pub fn read_scroll_progress(window: &web::Window) -> f32 {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let viewport_h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let document_h = window
        .document()
        .and_then(|d| d.document_element())
        .map(|el| el.scroll_height() as f64)
        .unwrap_or(0.0);
    scroll_progress(scroll_y, document_h, viewport_h)
}
