//! Browser bindings: the real [`Dom`] and page config loading.

use crate::config::{PageConfig, CONFIG_SCRIPT_ID};
use crate::dom::Dom;
use crate::{AgeOption, PageError, Result};
use log::warn;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlButtonElement, HtmlOptionElement, HtmlSelectElement, Window};

/// Map a thrown JS value into a [`PageError`].
pub fn js_error(value: JsValue) -> PageError {
    let message = value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value));
    PageError::Host(message)
}

/// [`Dom`] over the live `window.document`.
#[derive(Clone)]
pub struct WebDom {
    window: Window,
    document: Document,
}

impl WebDom {
    pub fn new() -> Self {
        WebDom {
            window: gloo_utils::window(),
            document: gloo_utils::document(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn select(&self, id: &str) -> Result<Option<HtmlSelectElement>> {
        match self.element(id) {
            Some(el) => el.dyn_into::<HtmlSelectElement>().map(Some).map_err(|_| {
                PageError::WrongElementKind {
                    id: id.to_string(),
                    expected: "select",
                }
            }),
            None => Ok(None),
        }
    }
}

impl Default for WebDom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom for WebDom {
    fn contains(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn append_option(&self, select_id: &str, option: &AgeOption) -> Result<bool> {
        let Some(select) = self.select(select_id)? else {
            return Ok(false);
        };
        let node = HtmlOptionElement::new_with_text_and_value(&option.label, &option.value_attr())
            .map_err(js_error)?;
        select.append_child(&node).map_err(js_error)?;
        Ok(true)
    }

    fn selected_value(&self, select_id: &str) -> Result<Option<String>> {
        Ok(self
            .select(select_id)?
            .map(|select| select.value())
            .filter(|value| !value.is_empty()))
    }

    fn set_disabled(&self, id: &str, disabled: bool) -> Result<bool> {
        let Some(el) = self.element(id) else {
            return Ok(false);
        };
        let button = el
            .dyn_into::<HtmlButtonElement>()
            .map_err(|_| PageError::WrongElementKind {
                id: id.to_string(),
                expected: "button",
            })?;
        button.set_disabled(disabled);
        Ok(true)
    }

    fn navigate(&self, path: &str) -> Result<()> {
        self.window.location().set_href(path).map_err(js_error)
    }
}

/// Read the optional `<script id="page-config" type="application/json">`
/// block. Absent or unreadable config yields the defaults.
pub fn load_page_config(document: &Document) -> PageConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content())
    else {
        return PageConfig::default();
    };
    match PageConfig::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}; using defaults", e);
            PageConfig::default()
        }
    }
}
