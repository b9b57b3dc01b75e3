use crate::dom;
use crate::frame::FrameContext;
use gloo::events::EventListener;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

mod pointer;

/// Every DOM listener the sphere installs. Dropping this removes them.
pub struct Listeners {
    listeners: Vec<EventListener>,
}

impl Listeners {
    pub fn wire(
        window: &web::Window,
        canvas: &web::HtmlCanvasElement,
        ctx: &Rc<RefCell<FrameContext>>,
    ) -> Self {
        let listeners = vec![
            wire_canvas_resize(window, canvas),
            pointer::wire_pointermove(window, canvas, ctx),
            pointer::wire_pointerleave(window, ctx),
        ];
        log::info!("[events] {} listeners attached", listeners.len());
        Self { listeners }
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        log::debug!("[events] removing {} listeners", self.listeners.len());
    }
}

// Maintain canvas internal pixel size to match CSS size * devicePixelRatio.
// The frame loop picks the new size up on its next tick.
fn wire_canvas_resize(window: &web::Window, canvas: &web::HtmlCanvasElement) -> EventListener {
    dom::sync_canvas_backing_size(canvas);
    let canvas = canvas.clone();
    EventListener::new(window, "resize", move |_ev: &web::Event| {
        dom::sync_canvas_backing_size(&canvas);
    })
}
