use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::error::CANCELLED_MESSAGE;
use crate::gateway::{delete_entity, fetch_list, Gateway};
use crate::model::{Image, Offering, Resource, Review, StoreId, Tasker};
use crate::slice::{FetchTicket, Lifecycle, ListAction, ListSlice, UiToggle};
use crate::store::{Ignored, Reduce, Store, SubscriptionId, Transition};

/// The whole client state tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub taskers: ListSlice<Tasker>,
    pub offerings: ListSlice<Offering>,
    pub images: ListSlice<Image>,
    pub reviews: ListSlice<Review>,
    pub ui: UiToggle,
}

/// Every mutation the state tree accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Taskers(ListAction<Tasker>),
    Offerings(ListAction<Offering>),
    Images(ListAction<Image>),
    Reviews(ListAction<Review>),
    ToggleSidebar,
}

impl Reduce for AppState {
    type Action = Action;

    fn reduce(&mut self, action: Action) -> Transition {
        match action {
            Action::Taskers(action) => self.taskers.reduce(action),
            Action::Offerings(action) => self.offerings.reduce(action),
            Action::Images(action) => self.images.reduce(action),
            Action::Reviews(action) => self.reviews.reduce(action),
            Action::ToggleSidebar => {
                self.ui.toggle();
                Transition::Applied
            }
        }
    }
}

/// A resource kind with a slice in [`AppState`].
pub trait Slot: Resource {
    fn slice(state: &AppState) -> &ListSlice<Self>;

    fn wrap(action: ListAction<Self>) -> Action;
}

macro_rules! slot {
    ($resource:ty, $field:ident, $variant:ident) => {
        impl Slot for $resource {
            fn slice(state: &AppState) -> &ListSlice<Self> {
                &state.$field
            }

            fn wrap(action: ListAction<Self>) -> Action {
                Action::$variant(action)
            }
        }
    };
}

slot!(Tasker, taskers, Taskers);
slot!(Offering, offerings, Offerings);
slot!(Image, images, Images);
slot!(Review, reviews, Reviews);

/// Single entry point for reading and mutating client state.
///
/// Each registry is an independent instance; clones share state,
/// subscribers and gateway. Remote calls dispatch their pending transition
/// before the request goes out and their outcome after it resolves. Errors
/// end up on the slice, not in the return value.
#[derive(Clone)]
pub struct Registry {
    store: Store<AppState>,
    gateway: Arc<dyn Gateway>,
    generations: Arc<AtomicU64>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("state", &self.store.get())
            .field("generations", &self.generations.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl Registry {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self::with_state(gateway, AppState::default())
    }

    pub fn with_state(gateway: Arc<dyn Gateway>, state: AppState) -> Self {
        Self {
            store: Store::new(state),
            gateway,
            generations: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn dispatch(&self, action: Action) -> Transition {
        let transition = self.store.dispatch(action);
        tracing::debug!(?transition, "action dispatched");
        transition
    }

    /// Snapshot of the whole tree.
    pub fn state(&self) -> AppState {
        self.store.get()
    }

    /// Derive a value from the current state without cloning the tree.
    pub fn select<F, T>(&self, selector: F) -> T
    where
        F: FnOnce(&AppState) -> T,
    {
        self.store.read(selector)
    }

    pub fn slice<R: Slot>(&self) -> ListSlice<R> {
        self.select(|state| R::slice(state).clone())
    }

    pub fn sidebar_visible(&self) -> bool {
        self.select(|state| state.ui.sidebar_visible())
    }

    /// Run `callback` with a snapshot after every applied transition.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&AppState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.store.unsubscribe(id)
    }

    pub fn toggle_sidebar(&self) {
        self.dispatch(Action::ToggleSidebar);
    }

    /// Load every `R`, scoped to `owner` for store-owned resources.
    ///
    /// Returns `Ignored(Busy)` without calling the API when the same fetch is
    /// already running, and `Ignored(Stale)` when a later fetch started while
    /// this one was in flight; the late response is then dropped.
    pub async fn fetch_all<R: Slot>(&self, owner: Option<StoreId>) -> Transition {
        let ticket = FetchTicket {
            generation: self.generations.fetch_add(1, Ordering::SeqCst) + 1,
            owner,
        };

        let started = self.dispatch(R::wrap(ListAction::Fetch(ticket, Lifecycle::Pending)));
        if let Transition::Ignored(reason) = started {
            tracing::warn!(resource = R::NAME, ?owner, ?reason, "fetch not started");
            return started;
        }
        tracing::debug!(
            resource = R::NAME,
            ?owner,
            generation = ticket.generation,
            "fetch started"
        );
        let guard = SettleOnDrop::new(
            self,
            R::wrap(ListAction::Fetch(
                ticket,
                Lifecycle::Rejected(CANCELLED_MESSAGE.to_string()),
            )),
        );

        let phase = match fetch_list::<R>(self.gateway.as_ref(), owner).await {
            Ok(items) => {
                tracing::debug!(resource = R::NAME, count = items.len(), "fetch succeeded");
                Lifecycle::Fulfilled(items)
            }
            Err(err) => {
                tracing::warn!(resource = R::NAME, error = %err, "fetch failed");
                Lifecycle::Rejected(err.user_message())
            }
        };

        guard.disarm();
        let settled = self.dispatch(R::wrap(ListAction::Fetch(ticket, phase)));
        if settled == Transition::Ignored(Ignored::Stale) {
            tracing::warn!(
                resource = R::NAME,
                ?owner,
                generation = ticket.generation,
                "discarding superseded response"
            );
        }
        settled
    }

    /// Delete one `R` remotely and drop it from the slice on success.
    pub async fn remove<R: Slot>(&self, id: R::Id) -> Transition {
        let started = self.dispatch(R::wrap(ListAction::Remove(id.clone(), Lifecycle::Pending)));
        if let Transition::Ignored(reason) = started {
            tracing::warn!(resource = R::NAME, %id, ?reason, "remove not started");
            return started;
        }
        tracing::debug!(resource = R::NAME, %id, "remove started");
        let guard = SettleOnDrop::new(
            self,
            R::wrap(ListAction::Remove(
                id.clone(),
                Lifecycle::Rejected(CANCELLED_MESSAGE.to_string()),
            )),
        );

        let phase = match delete_entity::<R>(self.gateway.as_ref(), &id).await {
            Ok(()) => Lifecycle::Fulfilled(()),
            Err(err) => {
                tracing::warn!(resource = R::NAME, %id, error = %err, "remove failed");
                Lifecycle::Rejected(err.user_message())
            }
        };
        guard.disarm();
        self.dispatch(R::wrap(ListAction::Remove(id, phase)))
    }
}

/// Settles a started request when its future is dropped before the outcome
/// is dispatched, so the slice does not stay busy.
struct SettleOnDrop<'a> {
    registry: &'a Registry,
    cancel: Option<Action>,
}

impl<'a> SettleOnDrop<'a> {
    fn new(registry: &'a Registry, cancel: Action) -> Self {
        Self {
            registry,
            cancel: Some(cancel),
        }
    }

    fn disarm(mut self) {
        self.cancel = None;
    }
}

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        if let Some(action) = self.cancel.take() {
            tracing::warn!(?action, "request dropped before it resolved");
            self.registry.dispatch(action);
        }
    }
}
