//! Header badge showing the total number of units in the cart.

#[cfg(test)]
#[path = "badge_test.rs"]
mod badge_test;

use crate::cart::Cart;

/// CSS `display` value applied to the badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BadgeDisplay {
    InlineBlock,
    None,
}

impl BadgeDisplay {
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::InlineBlock => "inline-block",
            Self::None => "none",
        }
    }
}

/// What the badge should show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeView {
    pub total: u64,
    pub text: String,
    pub display: BadgeDisplay,
}

impl BadgeView {
    /// Badge for `cart`: the summed quantity, hidden when zero.
    #[must_use]
    pub fn for_cart(cart: &Cart) -> Self {
        let total = cart.total_quantity();
        Self {
            total,
            text: total.to_string(),
            display: if total > 0 { BadgeDisplay::InlineBlock } else { BadgeDisplay::None },
        }
    }
}

/// Render target for [`BadgeView`]s.
///
/// Pages without a badge element are valid; implementations then do nothing.
pub trait BadgeSink {
    fn render(&mut self, view: &BadgeView);
}

/// A badge element found on the page.
pub trait BadgeElement {
    fn set_text(&mut self, text: &str);
    fn set_display(&mut self, display: BadgeDisplay);
}

/// Write `view` into the looked-up badge element.
///
/// `None` means the page has no badge; nothing is written and `false` is
/// returned. Otherwise the text is set before the display value.
pub fn apply_badge<E: BadgeElement>(element: Option<E>, view: &BadgeView) -> bool {
    let Some(mut element) = element else {
        return false;
    };
    element.set_text(&view.text);
    element.set_display(view.display);
    true
}
