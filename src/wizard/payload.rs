use std::collections::BTreeSet;

use serde::{Deserialize, Serialize, Serializer};

use crate::model::StoreId;

/// Top-level marketplace category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

/// Subcategory within event planning or rent & hire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubcategoryId(pub String);

impl From<&str> for SubcategoryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Owner of the store being registered.
///
/// `Deferred` leaves resolution to the server, which attaches the store to
/// the authenticated user. It goes over the wire as `null`; a known user goes
/// over as its numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OwnerRef {
    #[default]
    Deferred,
    User(u64),
}

impl Serialize for OwnerRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OwnerRef::Deferred => serializer.serialize_none(),
            OwnerRef::User(id) => serializer.serialize_u64(*id),
        }
    }
}

/// Store fields collected so far.
///
/// `None` means "not touched yet". [`merge`](Self::merge) overwrites exactly
/// the fields a patch sets, so input entered on earlier screens survives
/// moving between steps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialStorePayload {
    pub categories: Option<BTreeSet<CategoryId>>,
    pub event_planning_categories: Option<BTreeSet<SubcategoryId>>,
    pub rent_hire_categories: Option<BTreeSet<SubcategoryId>>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub whats_app: Option<String>,
    pub image: Option<String>,
    pub overview: Option<String>,
    pub location: Option<String>,
    pub working_hours: Option<String>,
    pub owner: Option<OwnerRef>,
}

macro_rules! merge_fields {
    ($target:expr, $patch:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field {
                $target.$field = Some(value);
            }
        )+
    };
}

macro_rules! text_setters {
    ($($field:ident),+ $(,)?) => {
        $(
            pub fn $field(mut self, value: impl Into<String>) -> Self {
                self.$field = Some(value.into());
                self
            }
        )+
    };
}

impl PartialStorePayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shallow union: every field set in `patch` replaces the current value.
    pub fn merge(&mut self, patch: PartialStorePayload) {
        merge_fields!(
            self,
            patch,
            categories,
            event_planning_categories,
            rent_hire_categories,
            name,
            phone_number,
            whats_app,
            image,
            overview,
            location,
            working_hours,
            owner,
        );
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn categories(mut self, ids: impl IntoIterator<Item = CategoryId>) -> Self {
        self.categories = Some(ids.into_iter().collect());
        self
    }

    pub fn event_planning_categories<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SubcategoryId>,
    {
        self.event_planning_categories = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn rent_hire_categories<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SubcategoryId>,
    {
        self.rent_hire_categories = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    text_setters!(
        name,
        phone_number,
        whats_app,
        image,
        overview,
        location,
        working_hours,
    );

    pub fn owner(mut self, owner: OwnerRef) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Complete wire body, with empty values for untouched fields.
    pub fn to_submission(&self) -> StoreSubmission {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        StoreSubmission {
            categories: self.categories.clone().unwrap_or_default(),
            event_planning_categories: self.event_planning_categories.clone().unwrap_or_default(),
            rent_hire_categories: self.rent_hire_categories.clone().unwrap_or_default(),
            name: text(&self.name),
            phone_number: text(&self.phone_number),
            whats_app: text(&self.whats_app),
            image: self.image.clone(),
            overview: text(&self.overview),
            location: text(&self.location),
            working_hours: text(&self.working_hours),
            owner: self.owner.unwrap_or_default(),
        }
    }
}

/// Body of the store-creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSubmission {
    pub categories: BTreeSet<CategoryId>,
    pub event_planning_categories: BTreeSet<SubcategoryId>,
    pub rent_hire_categories: BTreeSet<SubcategoryId>,
    pub name: String,
    pub phone_number: String,
    pub whats_app: String,
    pub image: Option<String>,
    pub overview: String,
    pub location: String,
    pub working_hours: String,
    pub owner: OwnerRef,
}

/// Store record returned after a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedStore {
    pub id: StoreId,
    #[serde(default)]
    pub name: String,
}
