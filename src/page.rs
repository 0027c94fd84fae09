//! Menu page contract: which buttons add to the cart, and what a product card
//! yields when clicked.
//!
//! These types carry plain strings read out of the DOM, so selection and
//! extraction rules stay testable without a browser. The `dom` module fills
//! them in from `web-sys` elements.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use serde::Deserialize;

/// Attribute that explicitly declares a button as an add-to-cart action.
pub const ACTION_ATTRIBUTE: &str = "data-cart-action";
/// Value of [`ACTION_ATTRIBUTE`] for add-to-cart buttons.
pub const ACTION_ADD: &str = "add";

const LEGACY_KEYWORDS: [&str; 2] = ["cart", "order"];

/// How candidate buttons qualify for an add-to-cart listener.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonSelection {
    /// Only buttons carrying `data-cart-action="add"`.
    Marker,
    /// Buttons whose visible text contains "cart" or "order", any case.
    /// Matches false positives such as "Order history".
    LegacyText,
    /// Either of the above. The default, so menus written before the marker
    /// existed keep working; set `marker` once every page is annotated.
    #[default]
    MarkerOrText,
}

/// What the page exposes about one candidate button.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonCandidate {
    /// Visible text content.
    pub text: String,
    /// Value of [`ACTION_ATTRIBUTE`], if present.
    pub action: Option<String>,
}

impl ButtonCandidate {
    fn has_add_marker(&self) -> bool {
        self.action
            .as_deref()
            .is_some_and(|action| action.trim().eq_ignore_ascii_case(ACTION_ADD))
    }

    fn has_legacy_text(&self) -> bool {
        let text = self.text.to_lowercase();
        LEGACY_KEYWORDS.iter().any(|keyword| text.contains(keyword))
    }
}

impl ButtonSelection {
    /// Whether `button` should be wired to add to the cart.
    #[must_use]
    pub fn accepts(self, button: &ButtonCandidate) -> bool {
        match self {
            Self::Marker => button.has_add_marker(),
            Self::LegacyText => button.has_legacy_text(),
            Self::MarkerOrText => button.has_add_marker() || button.has_legacy_text(),
        }
    }
}

/// Raw fields read from the product card enclosing a clicked button.
///
/// `None` means the card lacked that element or attribute.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardFields {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price_text: Option<String>,
    pub image_src: Option<String>,
}

/// A card with every field present.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub price_text: String,
    pub image_src: String,
}

/// Which part of a card was missing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingField {
    Id,
    Name,
    Price,
    Image,
}

impl CardFields {
    /// Require every field.
    ///
    /// # Errors
    ///
    /// Returns the first [`MissingField`] found, checked in id, name, price,
    /// image order. A blank id counts as missing.
    pub fn complete(self) -> Result<ProductCard, MissingField> {
        let id = self
            .id
            .filter(|id| !id.trim().is_empty())
            .ok_or(MissingField::Id)?;
        let name = self.name.ok_or(MissingField::Name)?;
        let price_text = self.price_text.ok_or(MissingField::Price)?;
        let image_src = self.image_src.ok_or(MissingField::Image)?;
        Ok(ProductCard { id, name, price_text, image_src })
    }
}
