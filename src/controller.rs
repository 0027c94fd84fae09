//! Cart controller: button qualification, click handling, cart mutation, and
//! badge rendering.
//!
//! DESIGN
//! ======
//! The controller owns no DOM handles. Storage, the badge, and notifications
//! are injected through [`CartStore`], [`BadgeSink`], and [`Notifier`], and
//! clicks arrive as already-extracted [`CardFields`]. The `dom` module adapts
//! `web-sys` to these seams; tests use in-memory fakes.
//!
//! Every operation is a one-shot load → mutate → save → render. Nothing is
//! cached between calls, so a cart changed by another script is picked up on
//! the next click.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use crate::badge::{BadgeSink, BadgeView};
use crate::cart::{AddOutcome, CartLineItem};
use crate::config::CartConfig;
use crate::error::CartError;
use crate::notify::{CartEvent, Notifier};
use crate::page::{ButtonCandidate, ButtonSelection, CardFields, MissingField};
use crate::price::{PriceFailurePolicy, parse_price};
use crate::store::CartStore;

/// Why a click was dropped without touching the cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The button is not inside a product card.
    NoCard,
    /// The card lacks a required element or attribute.
    Missing(MissingField),
}

/// Result of [`CartController::on_add_click`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Added(AddOutcome),
    Ignored(IgnoreReason),
}

pub struct CartController<S, B, N> {
    store: S,
    badge: B,
    notifier: N,
    selection: ButtonSelection,
    price_failure: PriceFailurePolicy,
}

impl<S: CartStore, B: BadgeSink, N: Notifier> CartController<S, B, N> {
    pub fn new(store: S, badge: B, notifier: N, config: &CartConfig) -> Self {
        Self {
            store,
            badge,
            notifier,
            selection: config.button_selection,
            price_failure: config.price_failure,
        }
    }

    /// Page-load setup. Returns the indices of `buttons` that should receive
    /// an add-to-cart listener, and renders the badge once.
    pub fn initialize<'a, I>(&mut self, buttons: I) -> Vec<usize>
    where
        I: IntoIterator<Item = &'a ButtonCandidate>,
    {
        let wired: Vec<usize> = buttons
            .into_iter()
            .enumerate()
            .filter(|(_, button)| self.selection.accepts(button))
            .map(|(index, _)| index)
            .collect();
        log::debug!("cart controller wiring {} button(s)", wired.len());
        self.update_cart_icon();
        wired
    }

    /// Handle a click on a wired button. `card` is `None` when the button has
    /// no enclosing product card.
    ///
    /// Clicks outside a complete card are ignored without touching the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Price`] when the price text is unparseable and the
    /// policy is [`PriceFailurePolicy::Reject`], and [`CartError::Store`] when
    /// the cart cannot be saved.
    pub fn on_add_click(&mut self, card: Option<CardFields>) -> Result<ClickOutcome, CartError> {
        let Some(fields) = card else {
            log::debug!("add click outside a product card ignored");
            return Ok(ClickOutcome::Ignored(IgnoreReason::NoCard));
        };
        let card = match fields.complete() {
            Ok(card) => card,
            Err(missing) => {
                log::debug!("add click on incomplete card ignored: missing {missing:?}");
                return Ok(ClickOutcome::Ignored(IgnoreReason::Missing(missing)));
            }
        };

        let item = match (parse_price(&card.price_text), self.price_failure) {
            (Ok(price), _) => CartLineItem::new(card.id, card.name, price, card.image_src),
            (Err(error), PriceFailurePolicy::Zero) => {
                log::warn!("storing {} with zero price: {error}", card.id);
                CartLineItem::new(card.id, card.name, 0.0, card.image_src)
            }
            (Err(error), PriceFailurePolicy::StoreNull) => {
                log::warn!("storing {} without a price: {error}", card.id);
                CartLineItem::new(card.id, card.name, 0.0, card.image_src).unpriced()
            }
            (Err(error), PriceFailurePolicy::Reject) => {
                log::warn!("rejected add of {}: {error}", card.id);
                self.notifier.notify(&CartEvent::PriceRejected {
                    id: card.id,
                    name: card.name,
                    error: error.clone(),
                });
                return Err(error.into());
            }
        };

        self.add_item_to_cart(item).map(ClickOutcome::Added)
    }

    /// Add one unit of `item` to the stored cart.
    ///
    /// An existing entry with the same id only has its quantity bumped. The
    /// badge is re-rendered from storage afterwards, whether or not the save
    /// succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] when the cart cannot be saved. No
    /// confirmation is emitted in that case.
    pub fn add_item_to_cart(&mut self, item: CartLineItem) -> Result<AddOutcome, CartError> {
        let mut cart = self.store.load();
        let id = item.id.clone();
        let name = item.name.clone();
        let outcome = cart.add(item);

        if let Err(err) = self.store.save(&cart) {
            log::warn!("failed to save cart after adding {id}: {err}");
            self.update_cart_icon();
            return Err(err.into());
        }

        let view = self.update_cart_icon();
        let quantity = cart.get(&id).map_or(1, |entry| entry.quantity);
        log::info!("added {id} to cart (quantity {quantity}, total {})", view.total);
        self.notifier.notify(&CartEvent::ItemAdded { id, name, quantity, total: view.total });
        Ok(outcome)
    }

    /// Re-render the badge from the stored cart and return what was rendered.
    pub fn update_cart_icon(&mut self) -> BadgeView {
        let view = BadgeView::for_cart(&self.store.load());
        self.badge.render(&view);
        view
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn badge(&self) -> &B {
        &self.badge
    }

    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
