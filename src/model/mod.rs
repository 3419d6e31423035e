//! Remote entities and how their list responses are decoded.

mod entity;

pub use entity::{Envelope, Image, Offering, Resource, Review, StoreId, Tasker, OWNER_QUERY};
