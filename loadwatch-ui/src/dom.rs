//! DOM helpers
//!
//! Lookups return `Option` so a page without a given element simply skips
//! the feature that needs it.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

/// Element by id, cast to `T`
pub fn element_by_id<T: JsCast>(id: &str) -> Option<T> {
    document()?.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// First element matching a CSS selector, cast to `T`
pub fn query_selector<T: JsCast>(selector: &str) -> Option<T> {
    document()?
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<T>()
        .ok()
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

/// Run `f` once the DOM is parsed
pub fn on_ready(f: impl FnOnce() + 'static) {
    let Some(doc) = document() else {
        return;
    };

    if doc.ready_state() != "loading" {
        f();
        return;
    }

    let mut f = Some(f);
    let cb = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        if let Some(f) = f.take() {
            f();
        }
    }) as Box<dyn FnMut()>);
    if doc
        .add_event_listener_with_callback("DOMContentLoaded", cb.as_ref().unchecked_ref())
        .is_err()
    {
        web_sys::console::error_1(&"Failed to listen for DOMContentLoaded".into());
    }
    cb.forget();
}
