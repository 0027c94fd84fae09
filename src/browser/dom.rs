//! Menu page wiring: candidate buttons, card extraction, and the header badge.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Element, Event, HtmlElement, HtmlImageElement};

use super::storage::LocalStorage;
use super::toast::ToastNotifier;
use super::{MountError, js_error_text};
use crate::badge::{BadgeDisplay, BadgeElement, BadgeSink, BadgeView, apply_badge};
use crate::config::CartConfig;
use crate::controller::CartController;
use crate::page::{ACTION_ATTRIBUTE, ButtonCandidate, CardFields};
use crate::store::JsonCartStore;

type BrowserController = CartController<JsonCartStore<LocalStorage>, DomBadge, ToastNotifier>;

/// Header badge looked up by id on every render; absent means no-op.
pub struct DomBadge {
    document: Document,
    badge_id: String,
}

impl DomBadge {
    pub fn new(document: Document, badge_id: impl Into<String>) -> Self {
        Self { document, badge_id: badge_id.into() }
    }
}

impl BadgeSink for DomBadge {
    fn render(&mut self, view: &BadgeView) {
        let element = self.document.get_element_by_id(&self.badge_id).map(ElementBadge);
        if !apply_badge(element, view) {
            log::debug!("no #{} badge on this page", self.badge_id);
        }
    }
}

struct ElementBadge(Element);

impl BadgeElement for ElementBadge {
    fn set_text(&mut self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn set_display(&mut self, display: BadgeDisplay) {
        let Some(html) = self.0.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(err) = html.style().set_property("display", display.as_css()) {
            log::warn!("badge display update failed: {}", js_error_text(&err));
        }
    }
}

/// Build the controller, wire qualifying buttons, and render the badge.
/// Returns the number of wired buttons.
///
/// # Errors
///
/// Returns [`MountError`] when the document or storage is unavailable, the
/// button selector is invalid, or a listener cannot be attached.
pub fn mount(config: &CartConfig) -> Result<usize, MountError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(MountError::NoDocument)?;

    let store = JsonCartStore::new(LocalStorage::open()?, config.storage_key.clone());
    let badge = DomBadge::new(document.clone(), config.badge_id.clone());
    let toast = ToastNotifier::mount(config.toast_duration_ms);
    let controller = Rc::new(RefCell::new(CartController::new(store, badge, toast, config)));

    let buttons = select_all(&document, &config.button_selector)?;
    let candidates: Vec<ButtonCandidate> = buttons.iter().map(button_candidate).collect();
    let wired = controller.borrow_mut().initialize(&candidates);

    let config = Rc::new(config.clone());
    for &index in &wired {
        if let Some(button) = buttons.get(index) {
            attach_add_listener(button, Rc::clone(&controller), Rc::clone(&config))?;
        }
    }
    Ok(wired.len())
}

fn select_all(document: &Document, selector: &str) -> Result<Vec<Element>, MountError> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|err| MountError::Selector { selector: selector.to_owned(), message: js_error_text(&err) })?;
    Ok((0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_ref::<Element>().cloned())
        .collect())
}

fn button_candidate(button: &Element) -> ButtonCandidate {
    ButtonCandidate {
        text: button.text_content().unwrap_or_default(),
        action: button.get_attribute(ACTION_ATTRIBUTE),
    }
}

fn attach_add_listener(
    button: &Element,
    controller: Rc<RefCell<BrowserController>>,
    config: Rc<CartConfig>,
) -> Result<(), MountError> {
    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        let card = event
            .target()
            .as_ref()
            .and_then(|target| target.dyn_ref::<Element>())
            .and_then(|clicked| read_card(clicked, &config));
        match controller.borrow_mut().on_add_click(card) {
            Ok(outcome) => log::debug!("add click handled: {outcome:?}"),
            Err(err) => log::warn!("add to cart failed: {err}"),
        }
    });
    button
        .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
        .map_err(|err| MountError::Listener { event: "click", message: js_error_text(&err) })?;
    handler.forget();
    Ok(())
}

/// Fields of the product card enclosing `clicked`, or `None` outside a card.
fn read_card(clicked: &Element, config: &CartConfig) -> Option<CardFields> {
    let card = match clicked.closest(&config.card_selector) {
        Ok(card) => card?,
        Err(err) => {
            log::warn!("card selector {:?} rejected: {}", config.card_selector, js_error_text(&err));
            return None;
        }
    };
    Some(CardFields {
        id: card.get_attribute(&config.id_attribute),
        name: select_one(&card, &config.name_selector).map(|name| name.text_content().unwrap_or_default()),
        price_text: select_one(&card, &config.price_selector).map(|price| price.text_content().unwrap_or_default()),
        image_src: select_one(&card, &config.image_selector).map(|image| image_source(&image)),
    })
}

fn select_one(card: &Element, selector: &str) -> Option<Element> {
    match card.query_selector(selector) {
        Ok(found) => found,
        Err(err) => {
            log::warn!("card field selector {selector:?} rejected: {}", js_error_text(&err));
            None
        }
    }
}

/// Resolved URL for `<img>`, raw `src` attribute for anything else.
fn image_source(image: &Element) -> String {
    match image.dyn_ref::<HtmlImageElement>() {
        Some(img) => img.src(),
        None => image.get_attribute("src").unwrap_or_default(),
    }
}
