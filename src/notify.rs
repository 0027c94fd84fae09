//! Cart notifications.
//!
//! The controller reports what happened as [`CartEvent`]s instead of blocking
//! on a dialog. The browser build shows [`CartEvent::ItemAdded`] as a toast;
//! other events only reach the log.

use crate::price::PriceError;

/// Something the user or host page may want to hear about.
#[derive(Clone, Debug, PartialEq)]
pub enum CartEvent {
    /// An item was added. `name` is the clicked card's name, `quantity` the
    /// entry's quantity after the add, `total` the new cart-wide unit count.
    ItemAdded { id: String, name: String, quantity: u32, total: u64 },
    /// The click was dropped because the card's price could not be parsed.
    PriceRejected { id: String, name: String, error: PriceError },
}

impl CartEvent {
    /// User-facing message, if this event has one.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::ItemAdded { name, .. } => Some(format!("\"{name}\" has been added to your cart!")),
            Self::PriceRejected { .. } => None,
        }
    }
}

/// Receiver of [`CartEvent`]s.
pub trait Notifier {
    fn notify(&mut self, event: &CartEvent);
}
