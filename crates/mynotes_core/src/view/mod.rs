//! Read-side projections used by the dashboard and detail screens.
//!
//! # Responsibility
//! - Order, filter and count note lists without touching storage.
//! - Derive plain-text previews from rich-text markup.

pub mod dashboard;
pub mod list;
pub mod preview;
