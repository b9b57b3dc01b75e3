use crate::constants::{FPS_LOG_INTERVAL, UPLOADS_PER_FRAME};
use crate::core::{FrameInput, OverlaySignals, SceneController, SceneError, TextureState};
use crate::dom;
use crate::loader::{LoadOutcome, UploadQueue};
use crate::overlay::Overlay;
use crate::render::{self, AtlasKind};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: SceneController,
    pub gpu: Option<render::GpuState>,
    pub canvas: web::HtmlCanvasElement,
    pub window: web::Window,
    pub overlay: Overlay,
    pub uploads: Rc<UploadQueue>,
    pub signals: OverlaySignals,

    started: Instant,
    last_log: Instant,
    frames_since_log: u64,
    deferred: bool,
    order: Vec<usize>,
    instances: Vec<render::TileInstance>,
}

impl FrameContext {
    pub fn new(
        scene: SceneController,
        gpu: render::GpuState,
        canvas: web::HtmlCanvasElement,
        window: web::Window,
        overlay: Overlay,
    ) -> Self {
        let n = scene.field().len();
        let now = Instant::now();
        Self {
            scene,
            gpu: Some(gpu),
            canvas,
            window,
            overlay,
            uploads: Rc::new(RefCell::new(Default::default())),
            signals: OverlaySignals::default(),
            started: now,
            last_log: now,
            frames_since_log: 0,
            deferred: false,
            order: Vec::with_capacity(n),
            instances: Vec::with_capacity(n * 3),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let elapsed = (now - self.started).as_secs_f32();
        self.log_fps(now);

        let viewport = dom::canvas_viewport(&self.canvas);
        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
        }
        self.drain_uploads();

        let input = FrameInput {
            scroll_progress: dom::read_scroll_progress(&self.window),
            elapsed,
            viewport,
        };
        match self.scene.tick(input) {
            Ok(signals) => {
                if self.deferred {
                    log::debug!("[frame] viewport ready {}x{}", viewport.width, viewport.height);
                    self.deferred = false;
                }
                self.overlay.apply(&signals);
                self.signals = signals;
            }
            Err(e @ SceneError::DegenerateViewport { .. }) => {
                if !self.deferred {
                    log::debug!("[frame] {}; deferring", e);
                    self.deferred = true;
                }
                return;
            }
            Err(e) => {
                log::error!("[frame] tick error: {}", e);
                return;
            }
        }

        self.draw();
    }

    fn draw(&mut self) {
        let Some(camera) = self.scene.camera() else {
            return;
        };
        let Some(g) = &mut self.gpu else {
            return;
        };
        let model = self.scene.scene_model();
        let view_model = camera.view_matrix() * model;
        self.scene.field().depth_order(&view_model, &mut self.order);
        render::pack_instances(
            self.scene.field(),
            &self.order,
            &g.atlas_layout(AtlasKind::Image),
            &g.atlas_layout(AtlasKind::Caption),
            &mut self.instances,
        );
        let uniforms = render::SceneUniforms::new(camera.view_proj(), model);
        match g.render(&uniforms, &self.instances) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
            Err(wgpu::SurfaceError::Timeout) => log::debug!("[frame] surface timeout"),
            Err(e) => log::error!("render error: {:?}", e),
        }
    }

    /// Apply a bounded number of finished loads; the rest wait for later frames.
    fn drain_uploads(&mut self) {
        let Some(g) = &self.gpu else {
            return;
        };
        for _ in 0..UPLOADS_PER_FRAME {
            let Some(outcome) = self.uploads.borrow_mut().pop_front() else {
                break;
            };
            match outcome {
                LoadOutcome::Tile {
                    kind: AtlasKind::Image,
                    slot,
                    rgba,
                } => {
                    let state = if g.upload_tile(AtlasKind::Image, slot, &rgba) {
                        TextureState::Ready { slot }
                    } else {
                        TextureState::Fallback
                    };
                    self.scene.set_image_texture(slot, state);
                }
                LoadOutcome::Tile {
                    kind: AtlasKind::Caption,
                    slot,
                    rgba,
                } => {
                    _ = g.upload_tile(AtlasKind::Caption, slot, &rgba);
                }
                LoadOutcome::Failed { image } => {
                    self.scene.set_image_texture(image, TextureState::Fallback);
                }
            }
        }
    }

    fn log_fps(&mut self, now: Instant) {
        self.frames_since_log += 1;
        if self.frames_since_log >= FPS_LOG_INTERVAL {
            let secs = (now - self.last_log).as_secs_f32().max(1e-3);
            log::debug!(
                "[frame] {:.1} fps, phase {}, p={:.3}",
                self.frames_since_log as f32 / secs,
                self.signals.phase + 1,
                self.signals.scroll_progress
            );
            self.frames_since_log = 0;
            self.last_log = now;
        }
    }

    /// Drop GPU state; later frames become no-ops.
    pub fn release(&mut self) {
        if let Some(g) = self.gpu.take() {
            g.release();
        }
        self.uploads.borrow_mut().clear();
    }
}

/// Handle on the requestAnimationFrame chain.
pub struct FrameLoop {
    alive: Rc<Cell<bool>>,
    raf_id: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
    /// Stop rescheduling, cancel the pending frame and free the callback.
    pub fn stop(&self) {
        if !self.alive.replace(false) {
            return;
        }
        if let (Some(id), Some(w)) = (self.raf_id.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // Breaks the closure's reference to itself.
        self.tick.borrow_mut().take();
        log::info!("[frame] loop stopped");
    }
}

fn request_frame(tick: &RefCell<Option<Closure<dyn FnMut()>>>, raf_id: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        raf_id.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let alive = Rc::new(Cell::new(true));
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

    let tick_clone = tick.clone();
    let alive_tick = alive.clone();
    let raf_tick = raf_id.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        raf_tick.set(None);
        if !alive_tick.get() {
            return;
        }
        if let Ok(mut ctx) = frame_ctx.try_borrow_mut() {
            ctx.frame();
        }
        if alive_tick.get() {
            request_frame(&tick_clone, &raf_tick);
        }
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &raf_id);

    FrameLoop {
        alive,
        raf_id,
        tick,
    }
}
