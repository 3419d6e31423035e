//! Store-registration wizard.
//!
//! Three screens (categories, subcategories, details) feed one accumulated
//! [`PartialStorePayload`], which is submitted once from the last screen.

mod payload;
mod wizard;

pub use payload::{
    CategoryId, CreatedStore, OwnerRef, PartialStorePayload, StoreSubmission, SubcategoryId,
};
pub use wizard::{CategoryCatalog, Domain, Step, SubmitRejected, Wizard};
