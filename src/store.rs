//! Store - owns the snapshot and runs fetch effects
//!
//! Every transition goes through [`PokedexStore::dispatch`], which applies the
//! reducer while holding the watch channel's write lock. Fetches run on tracked
//! Tokio tasks and re-enter through `dispatch` with a result action.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio_util::task::TaskTracker;
use tracing::Instrument;

use crate::action::Action;
use crate::api::CatalogClient;
use crate::config::PageRequest;
use crate::effect::Effect;
use crate::reducer::reducer;
use crate::sprite::decode_sprite;
use crate::state::AppState;

/// Shared handle to the application state.
///
/// Cloning is cheap; all clones observe and mutate the same snapshot.
/// Creating a store and calling its intents requires a running Tokio runtime.
#[derive(Clone)]
pub struct PokedexStore {
    inner: Arc<Inner>,
}

struct Inner {
    state: watch::Sender<AppState>,
    client: Arc<dyn CatalogClient>,
    page: PageRequest,
    tasks: TaskTracker,
    /// Serializes `settle` callers around the tracker's close/reopen
    settling: Mutex<()>,
}

impl PokedexStore {
    /// Create a store with default state and start the first refresh
    pub fn new(client: Arc<dyn CatalogClient>, page: PageRequest) -> Self {
        let store = Self::with_state(client, page, AppState::default());
        store.refresh();
        store
    }

    /// Create a store around an existing snapshot without fetching
    pub fn with_state(client: Arc<dyn CatalogClient>, page: PageRequest, state: AppState) -> Self {
        let (state, _) = watch::channel(state);
        Self {
            inner: Arc::new(Inner {
                state,
                client,
                page,
                tasks: TaskTracker::new(),
                settling: Mutex::new(()),
            }),
        }
    }

    /// Current snapshot
    pub fn state(&self) -> AppState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.inner.state.subscribe()
    }

    /// Reload the list page
    pub fn refresh(&self) {
        self.dispatch(Action::PokedexFetch);
    }

    /// Update the search query and refilter the loaded list
    pub fn set_query(&self, query: impl Into<String>) {
        self.dispatch(Action::SearchQueryChange(query.into()));
    }

    /// Load detail for a name or id
    pub fn select_entry(&self, identifier: impl Into<String>) {
        self.dispatch(Action::DetailFetch(identifier.into()));
    }

    /// Apply an action atomically and start any effects it declares.
    ///
    /// Returns whether the snapshot changed.
    pub fn dispatch(&self, action: Action) -> bool {
        tracing::debug!(?action, "dispatch");
        let mut effects = Vec::new();
        let changed = self.inner.state.send_if_modified(|state| {
            let result = reducer(state, action);
            effects = result.effects;
            result.changed
        });
        for effect in effects {
            self.run_effect(effect);
        }
        changed
    }

    /// Wait until every fetch started so far, and every fetch those start,
    /// has applied its result.
    ///
    /// Concurrent callers are served one after another.
    pub async fn settle(&self) {
        let _settling = self.inner.settling.lock().await;
        self.inner.tasks.close();
        self.inner.tasks.wait().await;
        self.inner.tasks.reopen();
    }

    /// Number of fetches still running
    pub fn in_flight(&self) -> usize {
        self.inner.tasks.len()
    }

    fn run_effect(&self, effect: Effect) {
        let store = self.clone();
        let client = Arc::clone(&self.inner.client);
        let page = self.inner.page;
        self.inner.tasks.spawn(async move {
            let action = perform_effect(client, page, effect).await;
            store.dispatch(action);
        });
    }
}

/// Run one effect against the catalog and return the action that reports it.
///
/// Failures become `*DidError` actions; this never fails itself.
pub async fn perform_effect(
    client: Arc<dyn CatalogClient>,
    page: PageRequest,
    effect: Effect,
) -> Action {
    let span = tracing::debug_span!("fetch", kind = effect.kind());
    async move {
        match effect {
            Effect::LoadPokedex => {
                let PageRequest { limit, offset } = page;
                match client.fetch_page(limit, offset).await {
                    Ok(entries) => {
                        tracing::debug!(count = entries.len(), limit, offset, "page loaded");
                        Action::PokedexDidLoad(entries)
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, limit, offset, "pokedex fetch failed");
                        Action::PokedexDidError(err.to_string())
                    }
                }
            }
            Effect::LoadDetail { key } => match client.fetch_detail(&key).await {
                Ok(detail) => Action::DetailDidLoad(detail),
                Err(err) => {
                    tracing::warn!(error = %err, %key, "detail fetch failed");
                    Action::DetailDidError(err.to_string())
                }
            },
            Effect::LoadSprite { id, url } => {
                let sprite = match client.fetch_sprite(&url).await {
                    Ok(bytes) => decode_sprite(&bytes).map_err(|err| err.to_string()),
                    Err(err) => Err(err.to_string()),
                };
                match sprite {
                    Ok(sprite) => Action::SpriteDidLoad { id, sprite },
                    Err(error) => {
                        tracing::debug!(%error, id, %url, "sprite unavailable");
                        Action::SpriteDidError { id, error }
                    }
                }
            }
        }
    }
    .instrument(span)
    .await
}
