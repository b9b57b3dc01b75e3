use crate::core::{square_crop, ImageCatalog};
use crate::dom;
use crate::render::AtlasKind;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use thiserror::Error;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{path}: image unavailable ({detail})")]
    Unavailable { path: String, detail: String },
    #[error("{path}: decoded image has no pixels")]
    Empty { path: String },
    #[error("{path}: could not rasterize tile ({detail})")]
    Raster { path: String, detail: String },
}

/// Result of background work, applied by the frame callback.
#[derive(Debug)]
pub enum LoadOutcome {
    Tile {
        kind: AtlasKind,
        slot: usize,
        rgba: Vec<u8>,
    },
    Failed {
        image: usize,
    },
}

pub type UploadQueue = RefCell<VecDeque<LoadOutcome>>;

/// Scratch 2D canvas sized to one atlas tile.
pub struct TileCanvas {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl TileCanvas {
    pub fn new(document: &web::Document, width: u32, height: u32) -> Option<Self> {
        let canvas = dom::create_canvas(document, width.max(1), height.max(1))?;
        let ctx = dom::context_2d(&canvas)?;
        Some(Self { canvas, ctx })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    #[inline]
    pub fn context(&self) -> &web::CanvasRenderingContext2d {
        &self.ctx
    }

    /// Reset transform and clear to transparent.
    pub fn clear(&self) -> Result<(), JsValue> {
        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.ctx
            .clear_rect(0.0, 0.0, self.width() as f64, self.height() as f64);
        Ok(())
    }

    /// Tightly packed RGBA8 copy of the canvas.
    pub fn rgba(&self) -> Result<Vec<u8>, JsValue> {
        let data = self
            .ctx
            .get_image_data(0.0, 0.0, self.width() as f64, self.height() as f64)?;
        Ok(data.data().0)
    }
}

async fn load_image(path: &str) -> Result<web::HtmlImageElement, LoadError> {
    let unavailable = |e: JsValue| LoadError::Unavailable {
        path: path.to_owned(),
        detail: format!("{:?}", e),
    };
    let img = web::HtmlImageElement::new().map_err(unavailable)?;
    img.set_cross_origin(Some("anonymous"));
    img.set_src(path);
    JsFuture::from(img.decode()).await.map_err(unavailable)?;
    if img.natural_width() == 0 || img.natural_height() == 0 {
        return Err(LoadError::Empty {
            path: path.to_owned(),
        });
    }
    Ok(img)
}

/// Draw the centered square crop of `img` into the tile and read it back.
fn crop_to_tile(path: &str, img: &web::HtmlImageElement, tile: &TileCanvas) -> Result<Vec<u8>, LoadError> {
    let raster = |e: JsValue| LoadError::Raster {
        path: path.to_owned(),
        detail: format!("{:?}", e),
    };
    let crop = square_crop(img.natural_width(), img.natural_height()).ok_or_else(|| {
        LoadError::Empty {
            path: path.to_owned(),
        }
    })?;
    let (sx, sy, sw, sh) = crop.source_px(img.natural_width(), img.natural_height());
    tile.clear().map_err(raster)?;
    tile.context()
        .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
            img,
            sx,
            sy,
            sw,
            sh,
            0.0,
            0.0,
            tile.width() as f64,
            tile.height() as f64,
        )
        .map_err(raster)?;
    tile.rgba().map_err(raster)
}

/// Start one fetch per distinct catalog image in `wanted`. Every particle
/// sharing an image shares its outcome. Completions after teardown are
/// dropped.
pub fn spawn_image_loads(
    catalog: &ImageCatalog,
    wanted: &[usize],
    tile: Rc<TileCanvas>,
    queue: Weak<UploadQueue>,
) {
    for &image in wanted {
        let Some(path) = catalog.path(image).map(str::to_owned) else {
            continue;
        };
        let tile = tile.clone();
        let queue = queue.clone();
        spawn_local(async move {
            let result = match load_image(&path).await {
                Ok(img) => {
                    // Skip the raster work if the scene is already gone.
                    if queue.upgrade().is_none() {
                        return;
                    }
                    crop_to_tile(&path, &img, &tile)
                }
                Err(e) => Err(e),
            };
            let Some(queue) = queue.upgrade() else {
                return;
            };
            let outcome = match result {
                Ok(rgba) => LoadOutcome::Tile {
                    kind: AtlasKind::Image,
                    slot: image,
                    rgba,
                },
                Err(e) => {
                    log::debug!("[loader] {}", e);
                    LoadOutcome::Failed { image }
                }
            };
            queue.borrow_mut().push_back(outcome);
        });
    }
    log::info!("[loader] requested {} images", wanted.len());
}
