use crate::constants::{HEADLINE_ID, WORDMARK_ID};
use crate::core::OverlaySignals;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Page elements layered over the canvas: the wordmark that fades out in the
/// first phase and the headline that fades in at the end.
pub struct Overlay {
    wordmark: Option<web::HtmlElement>,
    headline: Option<web::HtmlElement>,
    written: Written,
}

/// Last style text pushed to the DOM, to skip redundant writes.
#[derive(Default)]
struct Written {
    wordmark_opacity: Option<String>,
    headline_opacity: Option<String>,
    headline_weight: Option<String>,
}

fn html_element(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

fn set_style(el: &web::HtmlElement, slot: &mut Option<String>, property: &str, text: String) {
    if slot.as_deref() != Some(text.as_str()) {
        _ = el.style().set_property(property, &text);
        *slot = Some(text);
    }
}

impl Overlay {
    pub fn attach(document: &web::Document) -> Self {
        let wordmark = html_element(document, WORDMARK_ID);
        let headline = html_element(document, HEADLINE_ID);
        if wordmark.is_none() {
            log::debug!("[overlay] #{} not found", WORDMARK_ID);
        }
        if headline.is_none() {
            log::debug!("[overlay] #{} not found", HEADLINE_ID);
        }
        Self {
            wordmark,
            headline,
            written: Written::default(),
        }
    }

    pub fn apply(&mut self, signals: &OverlaySignals) {
        if let Some(el) = &self.wordmark {
            let text = format!("{:.3}", signals.wordmark_opacity);
            set_style(el, &mut self.written.wordmark_opacity, "opacity", text);
        }
        if let Some(el) = &self.headline {
            let text = format!("{:.3}", signals.headline_opacity);
            set_style(el, &mut self.written.headline_opacity, "opacity", text);
            let text = format!("{:.0}", signals.headline_weight);
            set_style(el, &mut self.written.headline_weight, "font-weight", text);
        }
    }
}
