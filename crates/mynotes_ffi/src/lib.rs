//! Flutter-facing bindings for `mynotes_core`.

pub mod api;
