//! Shared state container.
//!
//! A [`Store`] owns one value behind a lock, notifies subscribers after each
//! change and, for states implementing [`Reduce`], serializes every mutation
//! through [`Store::dispatch`].

mod store;

pub use store::{Ignored, Reduce, Store, SubscriptionId, Transition};
