use crate::constants::{CAPTION_FILL, CAPTION_FONT, CAPTION_LINE_Y, CAPTION_TEXT_X};
use crate::core::constants::{CAPTION_TILE_H_PX, CAPTION_TILE_W_PX};
use crate::core::Caption;
use crate::loader::TileCanvas;
use wasm_bindgen::JsValue;

/// Draw the location/date lines onto a transparent tile and return its pixels.
///
/// Layout is authored for a 256x64 raster and scaled to whatever tile size
/// the caption atlas ended up with.
pub fn rasterize_caption(tile: &TileCanvas, caption: &Caption) -> Result<Vec<u8>, JsValue> {
    tile.clear()?;
    let ctx = tile.context();
    ctx.scale(
        tile.width() as f64 / CAPTION_TILE_W_PX as f64,
        tile.height() as f64 / CAPTION_TILE_H_PX as f64,
    )?;
    ctx.set_fill_style_str(CAPTION_FILL);
    ctx.set_font(CAPTION_FONT);
    ctx.set_text_align("left");
    for (line, y) in caption.lines().iter().zip(CAPTION_LINE_Y) {
        ctx.fill_text(line, CAPTION_TEXT_X, y)?;
    }
    tile.rgba()
}
