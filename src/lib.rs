//! # bellyfull-cart
//!
//! Browser-local shopping cart for the BellyFull menu pages, compiled to
//! WebAssembly. Clicking an add-to-cart button inside a product card stores
//! the product in `localStorage` and updates the header badge with the total
//! number of units.
//!
//! Everything that decides *what* happens is DOM-free and tested on the host.
//! The `browser` module (behind the `csr` feature) only adapts `web-sys`.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`cart`] | Line items, the ordered cart, add/merge rule |
//! | [`price`] | `"$9.50"` → `9.5` with typed failures |
//! | [`store`] | Storage seams, JSON cart store, in-memory backend |
//! | [`page`] | Button qualification and card field extraction results |
//! | [`badge`] | Badge view model and render seam |
//! | [`notify`] | Cart events and the notifier seam |
//! | [`controller`] | [`controller::CartController`] orchestration |
//! | [`config`] | Typed configuration with defaults |
//! | [`error`] | Controller error type |
//! | `browser` | `web-sys` bindings and the wasm start hook (`csr`) |
//!
//! ## Page contract
//!
//! ```html
//! <span id="cart-item-count"></span>
//! <div class="food-card" data-id="p1">
//!   <img src="/img/burger.png">
//!   <h4>Burger</h4>
//!   <span class="price">$9.50</span>
//!   <a class="btn" href="#" data-cart-action="add">Add to Cart</a>
//! </div>
//! ```
//!
//! By default a `.btn` qualifies when it carries `data-cart-action="add"` or its
//! text mentions "cart" or "order", so unannotated menus still work. Configure
//! `"button_selection": "marker"` to require the attribute.

pub mod badge;
pub mod cart;
pub mod config;
pub mod controller;
pub mod error;
pub mod notify;
pub mod page;
pub mod price;
pub mod store;

#[cfg(feature = "csr")]
pub mod browser;

/// wasm start hook.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    browser::boot();
}
