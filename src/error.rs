//! Errors returned by [`crate::controller::CartController`] operations.

use crate::price::PriceError;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Price(#[from] PriceError),
}
