#![cfg(target_arch = "wasm32")]
use crate::core::{Caption, ImageCatalog, ParticleField, SceneConfig, SceneController};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod caption;
mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod overlay;
mod render;

use loader::{LoadOutcome, TileCanvas};
use render::AtlasKind;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("echo-sphere loaded");
    Ok(())
}

/// Read `{ [path]: { location, date } }` metadata for one image.
fn caption_from_metadata(metadata: &JsValue, path: &str) -> Option<Caption> {
    if metadata.is_undefined() || metadata.is_null() {
        return None;
    }
    let entry = js_sys::Reflect::get(metadata, &JsValue::from_str(path)).ok()?;
    if !entry.is_object() {
        return None;
    }
    let field = |name: &str| {
        js_sys::Reflect::get(&entry, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default()
    };
    Some(Caption {
        location: field("location"),
        date: field("date"),
    })
}

/// Queue caption rasters for every image some particle shows.
fn queue_captions(
    document: &web::Document,
    catalog: &ImageCatalog,
    wanted: &[usize],
    tile_w: u32,
    tile_h: u32,
    queue: &loader::UploadQueue,
) {
    let Some(tile) = TileCanvas::new(document, tile_w, tile_h) else {
        log::warn!("[caption] 2D canvas unavailable, captions disabled");
        return;
    };
    let mut drawn = 0usize;
    for &image in wanted {
        let Some(caption) = catalog.caption(image) else {
            continue;
        };
        match caption::rasterize_caption(&tile, caption) {
            Ok(rgba) => {
                queue.borrow_mut().push_back(LoadOutcome::Tile {
                    kind: AtlasKind::Caption,
                    slot: image,
                    rgba,
                });
                drawn += 1;
            }
            Err(e) => log::debug!("[caption] image {}: {:?}", image, e),
        }
    }
    log::info!("[caption] {} captions rasterized", drawn);
}

struct Mounted {
    ctx: Rc<RefCell<frame::FrameContext>>,
    frame_loop: frame::FrameLoop,
    listeners: Option<events::Listeners>,
}

/// Live sphere scene bound to a canvas. Call `destroy()` (or let JS free it)
/// to stop rendering and detach every listener.
#[wasm_bindgen]
pub struct SphereHandle {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl SphereHandle {
    pub fn destroy(&mut self) {
        let Some(mut m) = self.mounted.take() else {
            return;
        };
        m.frame_loop.stop();
        m.listeners.take();
        m.ctx.borrow_mut().release();
        log::info!("[scene] destroyed");
    }

    #[wasm_bindgen(getter)]
    pub fn wordmark_opacity(&self) -> f32 {
        self.read(|s| s.wordmark_opacity)
    }

    #[wasm_bindgen(getter)]
    pub fn headline_opacity(&self) -> f32 {
        self.read(|s| s.headline_opacity)
    }

    #[wasm_bindgen(getter)]
    pub fn headline_weight(&self) -> f32 {
        self.read(|s| s.headline_weight)
    }

    #[wasm_bindgen(getter)]
    pub fn scroll_progress(&self) -> f32 {
        self.read(|s| s.scroll_progress)
    }
}

impl SphereHandle {
    fn read(&self, f: impl Fn(&crate::core::OverlaySignals) -> f32) -> f32 {
        self.mounted
            .as_ref()
            .and_then(|m| m.ctx.try_borrow().ok().map(|c| f(&c.signals)))
            .unwrap_or(0.0)
    }
}

impl Drop for SphereHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Mount the sphere on `<canvas id=canvas_id>`.
///
/// Rejects without attaching anything when the canvas or WebGPU is missing.
#[wasm_bindgen]
pub async fn mount_sphere(
    canvas_id: String,
    image_paths: Vec<String>,
    metadata: JsValue,
) -> Result<SphereHandle, JsValue> {
    mount(&canvas_id, image_paths, &metadata)
        .await
        .map_err(|e| {
            log::error!("[scene] mount failed: {:?}", e);
            JsValue::from_str(&e.to_string())
        })
}

async fn mount(
    canvas_id: &str,
    image_paths: Vec<String>,
    metadata: &JsValue,
) -> anyhow::Result<SphereHandle> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, canvas_id)?;
    dom::sync_canvas_backing_size(&canvas);

    let catalog = ImageCatalog::new(image_paths, |p| caption_from_metadata(metadata, p));
    let config = SceneConfig::default();

    // Fatal if missing; nothing has been attached yet.
    let gpu = render::GpuState::new(&canvas, catalog.len(), config.count).await?;

    let mut rng = StdRng::from_entropy();
    let field = ParticleField::build_with(config, catalog.len(), &mut rng)?;
    let wanted: Vec<usize> = field
        .particles()
        .iter()
        .filter_map(|p| p.image)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    log::info!(
        "[scene] {} particles, {} catalog images ({} in use)",
        field.len(),
        catalog.len(),
        wanted.len()
    );

    let image_layout = gpu.atlas_layout(AtlasKind::Image);
    let caption_layout = gpu.atlas_layout(AtlasKind::Caption);
    let ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        SceneController::new(field),
        gpu,
        canvas.clone(),
        window.clone(),
        overlay::Overlay::attach(&document),
    )));
    let uploads = ctx.borrow().uploads.clone();

    queue_captions(
        &document,
        &catalog,
        &wanted,
        caption_layout.tile_w,
        caption_layout.tile_h,
        &uploads,
    );
    match TileCanvas::new(&document, image_layout.tile_w, image_layout.tile_h) {
        Some(tile) => {
            loader::spawn_image_loads(&catalog, &wanted, Rc::new(tile), Rc::downgrade(&uploads))
        }
        None => {
            log::warn!("[loader] 2D canvas unavailable, images fall back");
            let mut q = uploads.borrow_mut();
            for &image in &wanted {
                q.push_back(LoadOutcome::Failed { image });
            }
        }
    }
    drop(uploads);

    let listeners = events::Listeners::wire(&window, &canvas, &ctx);
    let frame_loop = frame::start_loop(ctx.clone());

    Ok(SphereHandle {
        mounted: Some(Mounted {
            ctx,
            frame_loop,
            listeners: Some(listeners),
        }),
    })
}
