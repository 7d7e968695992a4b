//! Browser entry point. Runs the page initializer once the DOM is ready and
//! wires the navigation button.

use base_station_page::web::{load_page_config, js_error, WebDom};
use base_station_page::{
    DelayedDetector, PageInitializer, ProfileState, Result, TimeoutScheduler,
};
use log::{error, info, Level};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

type Page = PageInitializer<WebDom, DelayedDetector<TimeoutScheduler>>;

/// Expose `openOtherSite()` on `window` for inline handlers and direct calls.
fn export_open_other_site(page: &Rc<Page>) -> Result<()> {
    let page = page.clone();
    let open = Closure::<dyn FnMut()>::new(move || {
        if let Err(e) = page.open_other_site() {
            error!("openOtherSite failed: {}", e);
        }
    });
    js_sys::Reflect::set(
        &gloo_utils::window(),
        &JsValue::from_str("openOtherSite"),
        open.as_ref(),
    )
    .map_err(js_error)?;
    open.forget();
    Ok(())
}

/// A click on a disabled button never reaches this listener.
fn wire_button(page: &Rc<Page>) -> Result<()> {
    let Some(button) = page.dom().document().get_element_by_id(&page.config().button_id) else {
        return Ok(());
    };
    let page = page.clone();
    let onclick = Closure::<dyn FnMut()>::new(move || {
        if let Err(e) = page.open_other_site() {
            error!("Navigation failed: {}", e);
        }
    });
    button
        .add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())
        .map_err(js_error)?;
    onclick.forget();
    Ok(())
}

fn start() {
    let dom = WebDom::new();
    let config = load_page_config(dom.document());
    info!(
        "Starting page (profile check delay {} ms)",
        config.detection_delay_ms
    );

    let state = Rc::new(ProfileState::new());
    let detector = DelayedDetector::new(TimeoutScheduler, config.detection_delay_ms);
    let page: Rc<Page> = Rc::new(PageInitializer::new(dom, detector, state.clone(), config));

    if let Err(e) = page.on_load() {
        error!("Page initialization failed: {}", e);
    }
    // Registered after on_load so it runs once the button has been synced.
    let button_id = page.config().button_id.clone();
    state.on_detected(move || info!("Profile ready; '{}' enabled", button_id));

    if let Err(e) = wire_button(&page).and_then(|_| export_open_other_site(&page)) {
        error!("Failed to wire navigation: {}", e);
    }
}

fn main() {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(Level::Info) {
        web_sys::console::warn_1(&JsValue::from_str(&format!("Logger unavailable: {}", e)));
    }

    let document = gloo_utils::document();
    if document.ready_state() != "loading" {
        start();
        return;
    }

    let on_ready = Closure::once(start);
    if let Err(e) = document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
    {
        error!("Could not listen for DOMContentLoaded: {:?}", e);
        return;
    }
    on_ready.forget();
}
