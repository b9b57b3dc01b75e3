use crate::frame::FrameContext;
use crate::core::HoverTransition;
use crate::input;
use gloo::events::EventListener;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

fn log_transition(t: HoverTransition) {
    match t {
        HoverTransition::Unchanged => {}
        HoverTransition::Enter(i) => log::debug!("[pointer] hover enter {}", i),
        HoverTransition::Switch { from, to } => {
            log::debug!("[pointer] hover switch {} -> {}", from, to)
        }
        HoverTransition::Exit(i) => log::debug!("[pointer] hover exit {}", i),
    }
}

/// Hit-test on every pointer move anywhere in the window; the canvas sits
/// under page content that swallows its own events.
pub fn wire_pointermove(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    ctx: &Rc<RefCell<FrameContext>>,
) -> EventListener {
    let canvas = canvas.clone();
    let ctx = ctx.clone();
    EventListener::new(window, "pointermove", move |ev: &web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let Some(px) = input::pointer_canvas_px(ev, &canvas) else {
            return;
        };
        // A frame in progress owns the scene; this move is superseded by the next one.
        let Ok(mut c) = ctx.try_borrow_mut() else {
            return;
        };
        log_transition(c.scene.pointer_move(px));
    })
}

/// Pointer left the page: drop any hover.
pub fn wire_pointerleave(window: &web::Window, ctx: &Rc<RefCell<FrameContext>>) -> EventListener {
    let ctx = ctx.clone();
    EventListener::new(window, "mouseout", move |ev: &web::Event| {
        let Some(ev) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        if ev.related_target().is_some() {
            return;
        }
        if let Ok(mut c) = ctx.try_borrow_mut() {
            log_transition(c.scene.pointer_leave());
        }
    })
}
