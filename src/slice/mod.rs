//! State slices.
//!
//! Each slice is a small state container plus the pure transitions that move
//! it through a request lifecycle:
//! - [`ListSlice`] - fetch/remove lifecycle for one remote list resource
//! - [`UiToggle`] - the shared sidebar visibility flag

mod resource;
mod toggle;

pub use resource::{FetchTicket, Lifecycle, ListAction, ListSlice, ResourceState, Status};
pub use toggle::UiToggle;
