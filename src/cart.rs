//! Cart model: line items, the ordered cart, and the add/merge rule.
//!
//! The cart is never cached between operations. Every controller call loads a
//! fresh copy from the store, mutates it here, and writes the whole array back.
//! Field names serialize in camelCase so the stored array matches the
//! `{id, name, price, imageSrc, quantity}` layout other page scripts read.

#[cfg(test)]
#[path = "cart_test.rs"]
mod cart_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One purchasable product's state within the cart.
///
/// Only `id` and `quantity` are required when reading. A missing or `null`
/// price loads as `None` (older page scripts stored an unparseable price that
/// way), missing text fields load empty, and unknown fields are kept so a save
/// writes them back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Stable product identifier taken from the card's data attribute.
    pub id: String,
    /// Display name, verbatim heading text.
    #[serde(default)]
    pub name: String,
    /// Unit price with the currency symbol stripped; `None` when the card's
    /// price was not a number.
    #[serde(default)]
    pub price: Option<f64>,
    /// Resolved image URL.
    #[serde(default)]
    pub image_src: String,
    /// Number of units; starts at 1.
    pub quantity: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CartLineItem {
    /// Build a fresh priced line item with quantity 1.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64, image_src: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: Some(price),
            image_src: image_src.into(),
            quantity: 1,
            extra: Map::new(),
        }
    }

    /// Same item with its price cleared, stored as `null`.
    #[must_use]
    pub fn unpriced(self) -> Self {
        Self { price: None, ..self }
    }
}

/// Result of [`Cart::add`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// The item was new and was appended.
    Appended,
    /// An entry with the same id already existed; its quantity is now `quantity`.
    Incremented { quantity: u32 },
}

/// One stored array element. Elements that are not line items (no string
/// `id`, no integer `quantity`, not an object) are carried through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
enum CartEntry {
    Item(CartLineItem),
    Unrecognized(Value),
}

impl CartEntry {
    fn quantity(&self) -> u64 {
        match self {
            Self::Item(item) => u64::from(item.quantity),
            Self::Unrecognized(value) => value.get("quantity").and_then(Value::as_u64).unwrap_or(0),
        }
    }
}

/// Ordered sequence of entries, unique by id, in first-add order.
///
/// Any JSON array loads. Elements that are not line items still count toward
/// [`Cart::total_quantity`] when they carry an integer `quantity`, are written
/// back on save, and are never matched by id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item`.
    ///
    /// When an entry with the same id exists only its quantity changes; the
    /// stored name, price, and image are kept even if `item` carries different
    /// values. Otherwise `item` is appended as-is.
    pub fn add(&mut self, item: CartLineItem) -> AddOutcome {
        let existing = self.entries.iter_mut().find_map(|entry| match entry {
            CartEntry::Item(stored) if stored.id == item.id => Some(stored),
            _ => None,
        });
        if let Some(existing) = existing {
            existing.quantity = existing.quantity.saturating_add(1);
            return AddOutcome::Incremented { quantity: existing.quantity };
        }
        self.entries.push(CartEntry::Item(item));
        AddOutcome::Appended
    }

    /// Sum of every entry's quantity.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.entries.iter().map(CartEntry::quantity).sum()
    }

    /// Look up a line item by product id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CartLineItem> {
        self.items().find(|item| item.id == id)
    }

    /// Line items in order, skipping unrecognized entries.
    pub fn items(&self) -> impl Iterator<Item = &CartLineItem> {
        self.entries.iter().filter_map(|entry| match entry {
            CartEntry::Item(item) => Some(item),
            CartEntry::Unrecognized(_) => None,
        })
    }

    /// Number of stored entries, recognized or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
