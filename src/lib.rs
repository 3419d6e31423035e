//! # Souk
//!
//! Client-side state for a service marketplace.
//!
//! Two parts do the real work:
//!
//! ## Resource slices
//!
//! Independent `{status, data, error}` containers for taskers, offerings,
//! images and reviews, plus a shared sidebar flag:
//! - [`ListSlice`] - pure fetch/remove lifecycle transitions
//! - [`Registry`] - one explicit state tree, one dispatch path, async
//!   operations that drive the lifecycles against a [`Gateway`]
//! - Superseded fetch responses are discarded by generation, and duplicate
//!   in-flight requests are refused
//!
//! ## Registration wizard
//!
//! [`Wizard`] walks a new store through category, subcategory and details
//! screens, merging each screen's input into one payload that is submitted
//! once at the end.

pub mod config;
pub mod error;
pub mod gateway;
pub mod model;
pub mod registry;
pub mod slice;
pub mod store;
pub mod wizard;

// Re-export main types for convenience
pub use config::Config;
pub use error::{
    ConfigError, GatewayError, WizardError, CANCELLED_MESSAGE, DEFAULT_ERROR_MESSAGE,
};
pub use gateway::{Gateway, HttpGateway};
pub use model::{Image, Offering, Resource, Review, StoreId, Tasker};
pub use registry::{Action, AppState, Registry};
pub use slice::{ListSlice, ResourceState, Status};
pub use store::{Store, Transition};
pub use wizard::{PartialStorePayload, Step, Wizard};
