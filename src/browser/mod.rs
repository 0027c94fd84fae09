//! Browser bindings (`csr` feature only).
//!
//! SYSTEM CONTEXT
//! ==============
//! Adapts `web-sys` to the controller seams: `localStorage` as a
//! [`crate::store::KeyValueStorage`], the header badge element as a
//! [`crate::badge::BadgeSink`], and a Leptos toast as a
//! [`crate::notify::Notifier`]. [`boot`] is the wasm start hook.

pub mod dom;
pub mod storage;
pub mod toast;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::config::{CONFIG_ELEMENT_ID, CartConfig, ConfigError};
use crate::store::StoreError;

/// Error raised while attaching the controller to the page.
#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("no document available")]
    NoDocument,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("selector {selector:?} rejected: {message}")]
    Selector { selector: String, message: String },
    #[error("failed to attach {event} listener: {message}")]
    Listener { event: &'static str, message: String },
}

/// Best-effort text for a thrown JS value.
pub(crate) fn js_error_text(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Install the panic hook and logger, read page config, and mount the cart
/// controller once the document is parsed.
pub fn boot() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match read_page_config() {
        Ok(config) => (config, None),
        Err(err) => (CartConfig::default(), Some(err)),
    };

    match config.level_filter().to_level() {
        Some(level) => {
            if let Err(err) = console_log::init_with_level(level) {
                web_sys::console::warn_1(&JsValue::from_str(&format!("cart logger unavailable: {err}")));
            }
        }
        None => log::set_max_level(log::LevelFilter::Off),
    }
    if let Some(err) = config_error {
        log::warn!("ignoring cart config, using defaults: {err}");
    }

    if let Err(err) = on_dom_ready(move || match dom::mount(&config) {
        Ok(wired) => log::info!("cart ready: {wired} add button(s) wired"),
        Err(err) => log::error!("cart unavailable: {err}"),
    }) {
        log::error!("cart unavailable: {err}");
    }
}

/// Read the optional `#cart-config` JSON block. Absent means defaults.
fn read_page_config() -> Result<CartConfig, ConfigError> {
    let block = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());
    match block {
        Some(raw) if !raw.trim().is_empty() => CartConfig::from_json(&raw),
        _ => Ok(CartConfig::default()),
    }
}

/// Run `run` now if the document is parsed, else on `DOMContentLoaded`.
fn on_dom_ready(run: impl FnOnce() + 'static) -> Result<(), MountError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(MountError::NoDocument)?;
    if document.ready_state() != "loading" {
        run();
        return Ok(());
    }

    let handler = Closure::once(run);
    document
        .add_event_listener_with_callback("DOMContentLoaded", handler.as_ref().unchecked_ref())
        .map_err(|err| MountError::Listener { event: "DOMContentLoaded", message: js_error_text(&err) })?;
    handler.forget();
    Ok(())
}
