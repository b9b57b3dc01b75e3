use glam::Vec2;
use web_sys as web;

/// Pointer position in the canvas backing store's pixel space.
#[inline]
pub fn pointer_canvas_px(ev: &web::MouseEvent, canvas: &web::HtmlCanvasElement) -> Option<Vec2> {
    let rect = canvas.get_bounding_client_rect();
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    if w <= 0.0 || h <= 0.0 {
        return None;
    }
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let sx = (x_css / w) * canvas.width() as f32;
    let sy = (y_css / h) * canvas.height() as f32;
    Some(Vec2::new(sx, sy))
}
