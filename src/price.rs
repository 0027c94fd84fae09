//! Price text parsing.
//!
//! Cards display prices as `"$" + number`, sometimes followed by a unit
//! (`"$9.50 each"`). The first `$` is removed wherever it sits and the longest
//! leading decimal literal is read, so stored amounts match what the page's own
//! scripts compute with `parseFloat`. Failures are typed so the controller can
//! apply the configured [`PriceFailurePolicy`] instead of storing a non-number.

#[cfg(test)]
#[path = "price_test.rs"]
mod price_test;

use serde::Deserialize;

const CURRENCY_SYMBOL: char = '$';

/// Error returned by [`parse_price`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    /// Nothing left after trimming and stripping the currency symbol.
    #[error("price text is empty")]
    Empty,
    /// The remaining text does not start with a decimal number.
    #[error("price text is not a number: {raw:?}")]
    NotANumber { raw: String },
    /// The text spells infinity or overflows `f64`, which JSON cannot carry.
    #[error("price is not finite: {raw:?}")]
    NotFinite { raw: String },
}

/// What to do with a click whose card shows an unparseable price.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceFailurePolicy {
    /// Abort the add and report [`crate::notify::CartEvent::PriceRejected`].
    #[default]
    Reject,
    /// Store the item with a price of zero.
    Zero,
    /// Store the item with a `null` price, as pages without this crate did.
    StoreNull,
}

/// Parse displayed price text such as `"$12.99"` into an amount.
///
/// The first `$` anywhere in the text is dropped, leading whitespace is
/// skipped, and the longest decimal prefix is parsed; trailing text such as
/// `" each"` or `"/plate"` is ignored.
///
/// # Errors
///
/// Returns [`PriceError::Empty`] for blank text, [`PriceError::NotANumber`]
/// when no digits lead the remainder, and [`PriceError::NotFinite`] for
/// `Infinity` or amounts beyond `f64` range.
pub fn parse_price(text: &str) -> Result<f64, PriceError> {
    let without_symbol = match text.find(CURRENCY_SYMBOL) {
        Some(at) => format!("{}{}", &text[..at], &text[at + CURRENCY_SYMBOL.len_utf8()..]),
        None => text.to_owned(),
    };
    let rest = without_symbol.trim_start();
    if rest.is_empty() {
        return Err(PriceError::Empty);
    }
    let unsigned = rest.strip_prefix(['+', '-']).unwrap_or(rest);
    if unsigned.starts_with("Infinity") {
        return Err(PriceError::NotFinite { raw: text.to_owned() });
    }
    let literal = decimal_prefix(rest).ok_or_else(|| PriceError::NotANumber { raw: text.to_owned() })?;
    let value: f64 = literal
        .parse()
        .map_err(|_| PriceError::NotANumber { raw: text.to_owned() })?;
    if !value.is_finite() {
        return Err(PriceError::NotFinite { raw: text.to_owned() });
    }
    Ok(value)
}

/// Longest prefix of `text` shaped like `[sign] digits [. digits] [e [sign] digits]`
/// with at least one mantissa digit. An exponent marker without digits is not
/// part of the prefix.
fn decimal_prefix(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    Some(&text[..end])
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|byte| byte.is_ascii_digit()).count()
}
