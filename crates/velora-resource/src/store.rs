use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::warn;

use velora_client::ApiError;
use velora_core::{Entity, ListQuery, Page, PageMeta, Patch};

use crate::api::ResourceApi;
use crate::error::{ResourceError, ResourceResult};
use crate::events::{InvalidationBus, ResourceEvent, ResourceOp};
use crate::notify::Notifier;

/// Collection state owned by one store.
///
/// Rebuilt wholesale on every successful list fetch. `error` and `loading`
/// are mutually exclusive with a fresh page: starting a request clears the
/// previous error, and a failed request keeps the previous items visible.
#[derive(Debug, Clone)]
pub struct CollectionState<E> {
    pub items: Vec<E>,
    pub meta: PageMeta,
    pub loading: bool,
    pub error: Option<String>,
    /// Query behind the current `items`, re-issued by `refresh`.
    pub last_query: ListQuery,
}

impl<E> Default for CollectionState<E> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            meta: PageMeta::default(),
            loading: false,
            error: None,
            last_query: ListQuery::default(),
        }
    }
}

/// State container for one entity type against one REST resource.
///
/// Clones share the same state; a dialog can hold a clone and mutate while
/// the list view holds another. Overlapping list fetches are arbitrated by
/// a generation counter: only the most recently issued fetch may commit,
/// so a stale response can never clobber a newer one.
pub struct ResourceStore<E: Entity> {
    api: Arc<dyn ResourceApi>,
    notifier: Arc<dyn Notifier>,
    bus: InvalidationBus,
    state: Arc<RwLock<CollectionState<E>>>,
    generation: Arc<AtomicU64>,
}

impl<E: Entity> Clone for ResourceStore<E> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            notifier: Arc::clone(&self.notifier),
            bus: self.bus.clone(),
            state: Arc::clone(&self.state),
            generation: Arc::clone(&self.generation),
        }
    }
}

impl<E: Entity> ResourceStore<E> {
    pub fn new(
        api: Arc<dyn ResourceApi>,
        notifier: Arc<dyn Notifier>,
        bus: InvalidationBus,
    ) -> Self {
        Self {
            api,
            notifier,
            bus,
            state: Arc::new(RwLock::new(CollectionState::default())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Invalidation bus this store publishes to.
    pub fn bus(&self) -> &InvalidationBus {
        &self.bus
    }

    /// Snapshot of the current collection state.
    pub async fn snapshot(&self) -> CollectionState<E> {
        self.state.read().await.clone()
    }

    pub async fn items(&self) -> Vec<E> {
        self.state.read().await.items.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Fetch one page and replace the collection state with it.
    ///
    /// On failure the previous items stay in place (stale-but-visible beats
    /// a blank page), `error` is set, and the user is notified. A response
    /// that resolves after a newer fetch was issued is discarded without
    /// touching state.
    pub async fn fetch_list(&self, query: ListQuery) -> ResourceResult<Page<E>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
            state.last_query = query.clone();
        }

        match self.api.list(E::RESOURCE, &query).await {
            Ok(raw) => {
                let page = decode_page::<E>(raw);
                if self.is_current(generation) {
                    let mut state = self.state.write().await;
                    state.items = page.items.clone();
                    state.meta = page.meta;
                    state.loading = false;
                }
                Ok(page)
            }
            Err(err) => {
                let err = ResourceError::from(err);
                if self.is_current(generation) {
                    let message = err.user_message("loading", E::RESOURCE);
                    let mut state = self.state.write().await;
                    state.loading = false;
                    state.error = Some(message.clone());
                    drop(state);
                    self.notifier.error(&message);
                }
                Err(err)
            }
        }
    }

    /// Re-fetch the page behind the current items, e.g. after a mutation
    /// or an invalidation event.
    pub async fn refresh(&self) -> ResourceResult<Page<E>> {
        let query = self.state.read().await.last_query.clone();
        self.fetch_list(query).await
    }

    /// Fetch a single entity. Read-only: no notification on failure.
    pub async fn get_one(&self, id: &str) -> ResourceResult<E> {
        let value = self.api.get_one(E::RESOURCE, id).await?;
        decode_entity::<E>(value).map_err(ResourceError::from)
    }

    /// Create an entity from a draft payload. The server assigns identity;
    /// the caller is expected to re-fetch its list (or react to the
    /// published invalidation event) rather than patch items locally.
    pub async fn create(&self, draft: Patch) -> ResourceResult<E> {
        let body = draft.into_body()?;
        let outcome = match self.api.create(E::RESOURCE, &body).await {
            Ok(value) => decode_entity::<E>(value).map_err(ResourceError::from),
            Err(err) => Err(ResourceError::from(err)),
        };
        self.finish_mutation(outcome, "creating", ResourceOp::Created)
    }

    /// Sparse update: only fields present in `patch` are sent, so an
    /// explicit `false` reaches the wire while untouched fields stay
    /// server-side as they were.
    pub async fn update(&self, id: &str, patch: Patch) -> ResourceResult<E> {
        let body = patch.into_body()?;
        let outcome = match self.api.update(E::RESOURCE, id, &body).await {
            Ok(value) => decode_entity::<E>(value).map_err(ResourceError::from),
            Err(err) => Err(ResourceError::from(err)),
        };
        self.finish_mutation(outcome, "updating", ResourceOp::Updated)
    }

    /// Delete an entity.
    pub async fn remove(&self, id: &str) -> ResourceResult<()> {
        match self.api.delete(E::RESOURCE, id).await {
            Ok(()) => {
                self.notifier
                    .success(&format!("Deleted {}/{}", E::RESOURCE, id));
                self.bus.publish(ResourceEvent {
                    resource: E::RESOURCE,
                    op: ResourceOp::Deleted,
                    id: Some(id.to_string()),
                });
                Ok(())
            }
            Err(err) => {
                let err = ResourceError::from(err);
                self.notifier
                    .error(&err.user_message("deleting", E::RESOURCE));
                Err(err)
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Shared tail of create/update: exactly one notification either way,
    /// plus an invalidation event on success. The error is handed back so
    /// the calling form can keep its dialog open.
    fn finish_mutation(
        &self,
        outcome: ResourceResult<E>,
        operation: &str,
        op: ResourceOp,
    ) -> ResourceResult<E> {
        match outcome {
            Ok(entity) => {
                self.notifier
                    .success(&format!("{} {}/{}", past_tense(op), E::RESOURCE, entity.id()));
                self.bus.publish(ResourceEvent {
                    resource: E::RESOURCE,
                    op,
                    id: Some(entity.id().to_string()),
                });
                Ok(entity)
            }
            Err(err) => {
                self.notifier
                    .error(&err.user_message(operation, E::RESOURCE));
                Err(err)
            }
        }
    }
}

fn past_tense(op: ResourceOp) -> &'static str {
    match op {
        ResourceOp::Created => "Created",
        ResourceOp::Updated => "Updated",
        ResourceOp::Deleted => "Deleted",
    }
}

fn decode_entity<E: Entity>(value: Value) -> Result<E, ApiError> {
    E::from_wire(value).map_err(ApiError::Decode)
}

/// Decode a raw page record by record. A record whose top-level shape is
/// malformed is skipped with a warning; the rest of the page still renders.
fn decode_page<E: Entity>(raw: Page<Value>) -> Page<E> {
    let meta = raw.meta;
    let items = raw
        .items
        .into_iter()
        .filter_map(|value| match E::from_wire(value) {
            Ok(entity) => Some(entity),
            Err(err) => {
                warn!(
                    resource = E::RESOURCE,
                    error = %err,
                    "skipping malformed record in list response"
                );
                None
            }
        })
        .collect();
    Page { items, meta }
}
