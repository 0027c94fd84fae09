//! Cart configuration.
//!
//! Defaults describe the BellyFull menu markup. A page may override any field
//! with a JSON block:
//!
//! ```html
//! <script type="application/json" id="cart-config">
//!   {"button_selection": "marker", "price_failure": "zero"}
//! </script>
//! ```
//!
//! Missing fields keep their defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::page::ButtonSelection;
use crate::price::PriceFailurePolicy;

pub const DEFAULT_STORAGE_KEY: &str = "bellyFullCart";
pub const DEFAULT_BADGE_ID: &str = "cart-item-count";
pub const DEFAULT_TOAST_DURATION_MS: u32 = 2_500;

/// Element id of the optional JSON configuration block.
pub const CONFIG_ELEMENT_ID: &str = "cart-config";

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Error returned by [`CartConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid cart config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

/// Typed cart configuration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CartConfig {
    /// `localStorage` key holding the cart array.
    pub storage_key: String,
    /// Selector for candidate buttons.
    pub button_selector: String,
    /// Selector for the product card enclosing a button.
    pub card_selector: String,
    /// Selector, inside a card, for the product name.
    pub name_selector: String,
    /// Selector, inside a card, for the price text.
    pub price_selector: String,
    /// Selector, inside a card, for the product image.
    pub image_selector: String,
    /// Card attribute carrying the product id.
    pub id_attribute: String,
    /// Element id of the header badge.
    pub badge_id: String,
    pub button_selection: ButtonSelection,
    pub price_failure: PriceFailurePolicy,
    /// How long a confirmation toast stays visible.
    pub toast_duration_ms: u32,
    /// Console log level: `off`, `error`, `warn`, `info`, `debug`, or `trace`.
    pub log_level: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            button_selector: ".btn".to_owned(),
            card_selector: ".food-card".to_owned(),
            name_selector: "h4".to_owned(),
            price_selector: ".price".to_owned(),
            image_selector: "img".to_owned(),
            id_attribute: "data-id".to_owned(),
            badge_id: DEFAULT_BADGE_ID.to_owned(),
            button_selection: ButtonSelection::default(),
            price_failure: PriceFailurePolicy::default(),
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            log_level: "info".to_owned(),
        }
    }
}

impl CartConfig {
    /// Parse and validate a JSON override block.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// [`ConfigError::InvalidValue`] when validation fails.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check field values serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a blank storage key, a blank
    /// selector, or an unknown log level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("storage_key", &self.storage_key),
            ("button_selector", &self.button_selector),
            ("card_selector", &self.card_selector),
            ("name_selector", &self.name_selector),
            ("price_selector", &self.price_selector),
            ("image_selector", &self.image_selector),
            ("id_attribute", &self.id_attribute),
            ("badge_id", &self.badge_id),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue { field, value: value.clone() });
            }
        }
        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(ConfigError::InvalidValue { field: "log_level", value: self.log_level.clone() });
        }
        Ok(())
    }

    /// The configured log level as a [`log::LevelFilter`].
    #[must_use]
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.log_level.to_ascii_lowercase().as_str() {
            "off" => log::LevelFilter::Off,
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }
}
