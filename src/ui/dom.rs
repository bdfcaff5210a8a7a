/// Host page DOM: anchoring, replacing and mounting the chip container

use crate::config::ContentConfig;
use crate::controller::{PageEvent, PageView};
use crate::error::ControllerError;
use crate::language_pair::LanguagePair;
use crate::ui::components::{ChipBar, ChipBarProps};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};
use yew::{AppHandle, Callback};

pub struct DomView {
    config: ContentConfig,
    on_event: Callback<PageEvent>,
    app: RefCell<Option<AppHandle<ChipBar>>>,
}

impl DomView {
    pub fn new(config: ContentConfig, on_event: Callback<PageEvent>) -> Self {
        DomView {
            config,
            on_event,
            app: RefCell::new(None),
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn reference_class(&self, document: &Document) -> Option<String> {
        document
            .query_selector(&self.config.reference_button_selector)
            .ok()
            .flatten()
            .map(|button| button.class_name())
    }

    /// Tear down the previous chip bar, including a container left by an
    /// earlier script instance
    fn remove_existing(&self, document: &Document) {
        if let Some(handle) = self.app.borrow_mut().take() {
            handle.destroy();
        }
        if let Some(existing) = document.get_element_by_id(&self.config.container_id) {
            existing.remove();
        }
    }

    fn create_container(&self, document: &Document) -> Result<Element, ControllerError> {
        let container = document.create_element("div").map_err(dom_error)?;
        container.set_id(&self.config.container_id);

        if let Some(element) = container.dyn_ref::<HtmlElement>() {
            set_styles(element, &[("display", "flex"), ("padding", "0 12px"), ("gap", "5px")]);
        }
        Ok(container)
    }
}

impl PageView for DomView {
    fn current_url(&self) -> Option<String> {
        web_sys::window()?.location().href().ok()
    }

    fn navigate(&self, url: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().assign(url) {
            log::error!("Failed to navigate to {}: {:?}", url, e);
        }
    }

    fn mount(&self, items: &[LanguagePair]) -> Result<(), ControllerError> {
        let document = Self::document().ok_or(ControllerError::MissingAnchor)?;
        let anchor = document
            .query_selector(&self.config.anchor_selector)
            .ok()
            .flatten()
            .ok_or(ControllerError::MissingAnchor)?;

        self.remove_existing(&document);

        // Let the nav row grow to fit the chips
        if let Some(parent) = anchor.parent_element().and_then(|p| p.dyn_into::<HtmlElement>().ok()) {
            set_styles(&parent, &[("height", "auto"), ("flex-wrap", "wrap")]);
        }

        let container = self.create_container(&document)?;
        anchor
            .insert_adjacent_element("afterend", &container)
            .map_err(dom_error)?;

        let props = ChipBarProps {
            items: items.to_vec(),
            button_class: self.reference_class(&document),
            on_event: self.on_event.clone(),
        };
        let handle = yew::Renderer::<ChipBar>::with_root_and_props(container, props).render();
        *self.app.borrow_mut() = Some(handle);

        log::debug!("Rendered {} quick links", items.len());
        Ok(())
    }

    fn notify(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

/// Run `callback` once the document has loaded: right away if it already
/// has, otherwise on `DOMContentLoaded`
pub fn on_document_ready(callback: impl FnOnce() + 'static) {
    let Some(document) = DomView::document() else {
        return;
    };

    if document.ready_state() != "loading" {
        callback();
        return;
    }

    let listener = Closure::once_into_js(callback);
    if let Err(e) = document.add_event_listener_with_callback("DOMContentLoaded", listener.unchecked_ref()) {
        log::error!("Failed to listen for DOMContentLoaded: {:?}", e);
    }
}

fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) {
    let style = element.style();
    for (property, value) in styles {
        let _ = style.set_property(property, value);
    }
}

fn dom_error(e: JsValue) -> ControllerError {
    ControllerError::Dom(format!("{:?}", e))
}
