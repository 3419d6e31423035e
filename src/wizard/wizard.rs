use std::collections::{BTreeSet, HashMap};

use super::payload::{CategoryId, CreatedStore, PartialStorePayload};
use crate::error::WizardError;
use crate::gateway::{create_store, Gateway};

/// Screens of the store-registration flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Step {
    #[default]
    Categories,
    Subcategories,
    Details,
}

impl Step {
    /// 1-based position shown to the user.
    pub fn number(self) -> u8 {
        match self {
            Step::Categories => 1,
            Step::Subcategories => 2,
            Step::Details => 3,
        }
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::Categories => Some(Step::Subcategories),
            Step::Subcategories => Some(Step::Details),
            Step::Details => None,
        }
    }

    pub fn previous(self) -> Option<Step> {
        match self {
            Step::Categories => None,
            Step::Subcategories => Some(Step::Categories),
            Step::Details => Some(Step::Subcategories),
        }
    }
}

/// Business domain a top-level category belongs to; decides which
/// subcategory pickers the second step shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Domain {
    EventPlanning,
    RentHire,
}

impl Domain {
    /// Classify a category by the whole words of its display name.
    pub fn from_category_name(name: &str) -> Option<Domain> {
        let words: Vec<String> = name
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .map(str::to_lowercase)
            .collect();
        let has = |candidates: &[&str]| words.iter().any(|w| candidates.contains(&w.as_str()));

        if has(&["event", "events"]) {
            Some(Domain::EventPlanning)
        } else if has(&["rent", "rental", "rentals", "hire"]) {
            Some(Domain::RentHire)
        } else {
            None
        }
    }
}

/// Maps top-level categories to their domain.
pub type CategoryCatalog = HashMap<CategoryId, Domain>;

/// Linear three-step store-registration flow.
///
/// The wizard owns the accumulated payload. Only [`advance`](Self::advance),
/// [`retreat`](Self::retreat) and [`retreat_with`](Self::retreat_with) change
/// it, and each merges rather than replaces. A successful
/// [`submit`](Self::submit) consumes the wizard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wizard {
    step: Step,
    payload: PartialStorePayload,
}

/// A submission that did not go through. The wizard comes back unchanged
/// apart from the final screen's input, so the user can fix it and retry.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct SubmitRejected {
    pub wizard: Box<Wizard>,
    #[source]
    pub error: WizardError,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn payload(&self) -> &PartialStorePayload {
        &self.payload
    }

    /// Merge this screen's input and move to the next step.
    ///
    /// Leaving the category step requires a category selection to exist,
    /// though an empty one is accepted. On error nothing is merged.
    pub fn advance(&mut self, partial: PartialStorePayload) -> Result<Step, WizardError> {
        let next = self.step.next().ok_or(WizardError::AtFinalStep)?;
        if self.step == Step::Categories
            && partial.categories.is_none()
            && self.payload.categories.is_none()
        {
            return Err(WizardError::MissingCategories);
        }

        self.payload.merge(partial);
        self.step = next;
        tracing::info!(step = next.number(), "wizard advanced");
        Ok(next)
    }

    /// Go back one step, keeping everything entered so far.
    pub fn retreat(&mut self) -> Result<Step, WizardError> {
        self.retreat_with(PartialStorePayload::default())
    }

    /// Merge the current screen's unfinished input, then go back one step.
    pub fn retreat_with(&mut self, partial: PartialStorePayload) -> Result<Step, WizardError> {
        let previous = self.step.previous().ok_or(WizardError::AtFirstStep)?;
        self.payload.merge(partial);
        self.step = previous;
        tracing::info!(step = previous.number(), "wizard went back");
        Ok(previous)
    }

    /// Subcategory pickers to show on the second step.
    ///
    /// Both subcategory sets are kept in the payload whichever pickers are
    /// shown, so a store may belong to both domains.
    pub fn subcategory_branches(&self, catalog: &CategoryCatalog) -> BTreeSet<Domain> {
        self.payload
            .categories
            .iter()
            .flatten()
            .filter_map(|id| catalog.get(id).copied())
            .collect()
    }

    /// Merge the details screen's input and register the store.
    pub async fn submit(
        mut self,
        gateway: &dyn Gateway,
        partial: PartialStorePayload,
    ) -> Result<CreatedStore, SubmitRejected> {
        if self.step != Step::Details {
            let error = WizardError::NotAtFinalStep(self.step);
            return Err(SubmitRejected {
                wizard: Box::new(self),
                error,
            });
        }

        self.payload.merge(partial);
        match create_store(gateway, &self.payload.to_submission()).await {
            Ok(created) => {
                tracing::info!(store_id = %created.id, "store registered");
                Ok(created)
            }
            Err(err) => {
                tracing::warn!(error = %err, "store registration failed");
                Err(SubmitRejected {
                    wizard: Box::new(self),
                    error: WizardError::Submission(err),
                })
            }
        }
    }
}
