//! Core types for Pantry.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod action;
pub mod error;
pub mod id;
pub mod product;
pub mod session;

pub use action::ActionKind;
pub use error::ShopError;
pub use id::*;
pub use product::Product;
pub use session::{CartLine, UserSession};
