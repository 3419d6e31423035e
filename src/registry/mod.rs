//! Application state registry.
//!
//! Composes every slice into one [`AppState`] tree behind a single
//! [`Store`](crate::store::Store). Components read through selectors and
//! change state only by dispatching [`Action`]s, directly or through the
//! async operations on [`Registry`].

mod registry;

pub use registry::{Action, AppState, Registry, Slot};
