//! DOM Seams
//!
//! The few element operations the sync flow needs, as traits, with the
//! `web_sys` implementations used in the browser.

use wasm_bindgen::JsCast;
use web_sys::{Document, DomParser, Element, HtmlElement, SupportedType};

use crate::error::SyncError;

/// Icon child of a toggle control
pub trait IconElement {
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);
    /// Replace the whole class attribute
    fn set_class_name(&self, value: &str);
}

/// Navbar counter
pub trait BadgeElement {
    fn set_text(&self, text: &str);
    /// Toggle visibility without detaching the element
    fn set_visible(&self, visible: bool);
}

/// A parsed document that is never attached to the live page
pub trait MarkupFragment {
    fn count(&self, selector: &str) -> usize;
    /// Text content of every element matching `selector`, in document order
    fn texts(&self, selector: &str) -> Vec<String>;
}

/// Lookups against the current page plus out-of-band parsing
pub trait Page {
    fn badge(&self, selector: &str) -> Option<Box<dyn BadgeElement>>;
    fn parse_markup(&self, html: &str) -> Result<Box<dyn MarkupFragment>, SyncError>;
}

// ========================
// Browser implementations
// ========================

impl IconElement for Element {
    fn add_class(&self, class: &str) {
        let _ = self.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.class_list().remove_1(class);
    }

    fn set_class_name(&self, value: &str) {
        Element::set_class_name(self, value);
    }
}

impl BadgeElement for HtmlElement {
    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn set_visible(&self, visible: bool) {
        let display = if visible { "inline-block" } else { "none" };
        let _ = self.style().set_property("display", display);
    }
}

/// Document produced by `DOMParser`; scripts in it never run
struct DetachedDocument(Document);

impl MarkupFragment for DetachedDocument {
    fn count(&self, selector: &str) -> usize {
        self.0
            .query_selector_all(selector)
            .map(|nodes| nodes.length() as usize)
            .unwrap_or(0)
    }

    fn texts(&self, selector: &str) -> Vec<String> {
        let Ok(nodes) = self.0.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.text_content())
            .collect()
    }
}

pub struct BrowserPage;

impl Page for BrowserPage {
    fn badge(&self, selector: &str) -> Option<Box<dyn BadgeElement>> {
        let document = web_sys::window()?.document()?;
        let element = document.query_selector(selector).ok()??;
        let element = element.dyn_into::<HtmlElement>().ok()?;
        Some(Box::new(element))
    }

    fn parse_markup(&self, html: &str) -> Result<Box<dyn MarkupFragment>, SyncError> {
        let parser = DomParser::new().map_err(|_| SyncError::Dom("DOMParser is unavailable".to_string()))?;
        let document = parser
            .parse_from_string(html, SupportedType::TextHtml)
            .map_err(|_| SyncError::Decode("markup could not be parsed".to_string()))?;
        Ok(Box::new(DetachedDocument(document)))
    }
}
