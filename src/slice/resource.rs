use crate::error::DEFAULT_ERROR_MESSAGE;
use crate::model::{Resource, StoreId};
use crate::store::{Ignored, Reduce, Transition};

/// Lifecycle status of a remote resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// `{status, data, error}` container for one remote resource.
///
/// A failure never clears `data`: whatever was loaded before stays visible
/// next to the error.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub status: Status,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            status: Status::Idle,
            data: None,
            error: None,
        }
    }
}

impl<T> ResourceState<T> {
    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    /// True once the last request has resolved either way.
    pub fn is_settled(&self) -> bool {
        matches!(self.status, Status::Succeeded | Status::Failed)
    }

    fn begin(&mut self) {
        self.status = Status::Loading;
        self.error = None;
    }

    fn succeed(&mut self) {
        self.status = Status::Succeeded;
        self.error = None;
    }

    fn fail(&mut self, message: String) {
        self.status = Status::Failed;
        self.error = Some(if message.trim().is_empty() {
            DEFAULT_ERROR_MESSAGE.to_string()
        } else {
            message
        });
    }
}

/// Phase of one asynchronous call.
#[derive(Debug, Clone, PartialEq)]
pub enum Lifecycle<T> {
    Pending,
    Fulfilled(T),
    Rejected(String),
}

/// Identifies one fetch request.
///
/// Generations are handed out in increasing order; only completions carrying
/// the most recently started generation are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub owner: Option<StoreId>,
}

/// Action addressed to a single list slice.
#[derive(Debug, Clone, PartialEq)]
pub enum ListAction<R: Resource> {
    Fetch(FetchTicket, Lifecycle<Vec<R>>),
    Remove(R::Id, Lifecycle<()>),
}

/// State slice for one listable resource kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSlice<R: Resource> {
    state: ResourceState<Vec<R>>,
    latest_fetch: Option<FetchTicket>,
    fetch_in_flight: bool,
    removing: Vec<R::Id>,
}

impl<R: Resource> Default for ListSlice<R> {
    fn default() -> Self {
        Self {
            state: ResourceState::default(),
            latest_fetch: None,
            fetch_in_flight: false,
            removing: Vec::new(),
        }
    }
}

impl<R: Resource> ListSlice<R> {
    pub fn state(&self) -> &ResourceState<Vec<R>> {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// Loaded entities, empty before the first successful fetch.
    pub fn items(&self) -> &[R] {
        self.state.data.as_deref().unwrap_or_default()
    }

    /// Store the most recently requested listing belongs to.
    pub fn owner(&self) -> Option<StoreId> {
        self.latest_fetch.and_then(|ticket| ticket.owner)
    }

    /// Whether a fetch for `owner` is currently outstanding.
    pub fn is_fetching(&self, owner: Option<StoreId>) -> bool {
        self.fetch_in_flight && self.owner() == owner
    }

    pub fn is_removing(&self, id: &R::Id) -> bool {
        self.removing.contains(id)
    }

    fn reduce_fetch(&mut self, ticket: FetchTicket, phase: Lifecycle<Vec<R>>) -> Transition {
        match phase {
            Lifecycle::Pending => {
                if self.is_fetching(ticket.owner) {
                    return Transition::Ignored(Ignored::Busy);
                }
                if self
                    .latest_fetch
                    .is_some_and(|latest| latest.generation >= ticket.generation)
                {
                    return Transition::Ignored(Ignored::Stale);
                }
                self.latest_fetch = Some(ticket);
                self.fetch_in_flight = true;
                self.state.begin();
            }
            Lifecycle::Fulfilled(items) => {
                if !self.settle_fetch(ticket) {
                    return Transition::Ignored(Ignored::Stale);
                }
                self.state.data = Some(items);
                self.state.succeed();
            }
            Lifecycle::Rejected(message) => {
                if !self.settle_fetch(ticket) {
                    return Transition::Ignored(Ignored::Stale);
                }
                self.state.fail(message);
            }
        }
        Transition::Applied
    }

    /// Close the in-flight fetch if `ticket` is the one it was opened with.
    fn settle_fetch(&mut self, ticket: FetchTicket) -> bool {
        if !self.fetch_in_flight || self.latest_fetch != Some(ticket) {
            return false;
        }
        self.fetch_in_flight = false;
        true
    }

    fn reduce_remove(&mut self, id: R::Id, phase: Lifecycle<()>) -> Transition {
        match phase {
            Lifecycle::Pending => {
                if self.is_removing(&id) {
                    return Transition::Ignored(Ignored::Busy);
                }
                self.removing.push(id);
                self.state.begin();
            }
            Lifecycle::Fulfilled(()) => {
                if !self.take_removal(&id) {
                    return Transition::Ignored(Ignored::Stale);
                }
                if let Some(items) = self.state.data.as_mut() {
                    items.retain(|item| item.id() != &id);
                }
                self.state.succeed();
            }
            Lifecycle::Rejected(message) => {
                if !self.take_removal(&id) {
                    return Transition::Ignored(Ignored::Stale);
                }
                self.state.fail(message);
            }
        }
        Transition::Applied
    }

    fn take_removal(&mut self, id: &R::Id) -> bool {
        let before = self.removing.len();
        self.removing.retain(|pending| pending != id);
        self.removing.len() != before
    }
}

impl<R: Resource> Reduce for ListSlice<R> {
    type Action = ListAction<R>;

    fn reduce(&mut self, action: ListAction<R>) -> Transition {
        match action {
            ListAction::Fetch(ticket, phase) => self.reduce_fetch(ticket, phase),
            ListAction::Remove(id, phase) => self.reduce_remove(id, phase),
        }
    }
}
