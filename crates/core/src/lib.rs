//! `ticketing-core` — purchase foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the purchasing
//! crates (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{InvalidPurchase, PurchaseError, PurchaseResult};
pub use id::AccountId;
pub use value_object::ValueObject;
