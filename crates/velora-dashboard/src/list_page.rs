use std::future::Future;

use indexmap::IndexMap;
use thiserror::Error;

use velora_core::{DEFAULT_PAGE_SIZE, FilterValue, ListQuery, Page};
use velora_forms::{FormModel, FormState, SubmitError};
use velora_resource::{Debouncer, ResourceResult, ResourceStore};

/// What the page's dialog is currently doing.
///
/// Orthogonal to the load state: a fetch can be in flight while a dialog
/// is open, and neither machine touches the other's fields.
#[derive(Debug, Clone)]
pub enum DialogState<M: FormModel> {
    Closed,
    /// Create or edit form; which one is recorded in the form's mode.
    Open(FormState<M>),
    /// Delete requested, waiting for the user to confirm.
    ConfirmDelete { id: String },
}

impl<M: FormModel> DialogState<M> {
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

#[derive(Debug, Error)]
pub enum DialogError {
    /// The requested dialog action has no matching dialog open.
    #[error("no dialog is open")]
    NotOpen,

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Controller behind one entity's list page.
///
/// Owns the page-local concerns (pagination cursor, search text, named
/// filters, the dialog) and delegates collection state to the shared
/// [`ResourceStore`]. A failed fetch leaves the previous items visible
/// with an error message on the store; [`ListPage::retry`] re-issues the
/// same query.
pub struct ListPage<M: FormModel> {
    store: ResourceStore<M::Entity>,
    debouncer: Debouncer,
    page: u32,
    page_size: u32,
    search: String,
    filters: IndexMap<String, FilterValue>,
    dialog: DialogState<M>,
}

impl<M: FormModel> ListPage<M> {
    pub fn new(store: ResourceStore<M::Entity>) -> Self {
        Self {
            store,
            debouncer: Debouncer::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: String::new(),
            filters: IndexMap::new(),
            dialog: DialogState::Closed,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Debounce window for search keystrokes, overridable for tests.
    pub fn with_debouncer(mut self, debouncer: Debouncer) -> Self {
        self.debouncer = debouncer;
        self
    }

    pub fn store(&self) -> &ResourceStore<M::Entity> {
        &self.store
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filters(&self) -> &IndexMap<String, FilterValue> {
        &self.filters
    }

    pub fn dialog(&self) -> &DialogState<M> {
        &self.dialog
    }

    fn query(&self) -> ListQuery {
        let mut query = ListQuery::new()
            .with_page(self.page)
            .with_page_size(self.page_size);
        if !self.search.trim().is_empty() {
            query = query.with_search(self.search.clone());
        }
        for (key, value) in &self.filters {
            query = query.with_filter(key.clone(), value.clone());
        }
        query
    }

    /// Fetch the page described by the current cursor and search text.
    pub async fn load(&self) -> ResourceResult<Page<M::Entity>> {
        self.store.fetch_list(self.query()).await
    }

    /// Re-issue the last query. Used by the error-state retry control.
    pub async fn retry(&self) -> ResourceResult<Page<M::Entity>> {
        self.load().await
    }

    /// Jump to a page, keeping search and filters.
    pub async fn set_page(&mut self, page: u32) -> ResourceResult<Page<M::Entity>> {
        self.page = page.max(1);
        self.load().await
    }

    /// Apply a named filter and fetch. Like a search change, a filter
    /// change resets pagination to page 1. Flag filters keep an explicit
    /// `false` distinct from "filter removed".
    pub async fn set_filter(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FilterValue>,
    ) -> ResourceResult<Page<M::Entity>> {
        self.filters.insert(key.into(), value.into());
        self.page = 1;
        self.load().await
    }

    /// Drop a named filter and fetch from page 1.
    pub async fn clear_filter(&mut self, key: &str) -> ResourceResult<Page<M::Entity>> {
        self.filters.shift_remove(key);
        self.page = 1;
        self.load().await
    }

    /// Record a search keystroke. The text and the page-1 reset apply
    /// immediately; the returned future waits out the debounce window and
    /// fetches only if no newer keystroke superseded this one, resolving
    /// to whether it was the call that fetched.
    pub fn set_search(
        &mut self,
        text: impl Into<String>,
    ) -> impl Future<Output = ResourceResult<bool>> + Send + 'static {
        self.search = text.into();
        self.page = 1;
        let store = self.store.clone();
        let debouncer = self.debouncer.clone();
        let query = self.query();
        async move {
            if !debouncer.acquire().await {
                return Ok(false);
            }
            store.fetch_list(query).await?;
            Ok(true)
        }
    }

    /// Open the dialog on an empty draft.
    pub fn open_create(&mut self, defaults: M) {
        self.dialog = DialogState::Open(FormState::create(defaults));
    }

    /// Open the dialog seeded from an existing entity.
    pub fn open_edit(&mut self, entity: &M::Entity) {
        self.dialog = DialogState::Open(FormState::edit(entity));
    }

    /// Close whatever dialog is open, discarding its draft.
    pub fn close_dialog(&mut self) {
        self.dialog = DialogState::Closed;
    }

    /// Mutable access to the open form, for binding field edits.
    pub fn form_mut(&mut self) -> Option<&mut FormState<M>> {
        match &mut self.dialog {
            DialogState::Open(form) => Some(form),
            _ => None,
        }
    }

    /// Submit the open form. On success the dialog closes and the current
    /// page is re-fetched; on any failure the dialog stays open with its
    /// draft intact so the user can correct and retry.
    pub async fn submit_dialog(&mut self) -> Result<M::Entity, DialogError> {
        let DialogState::Open(form) = &mut self.dialog else {
            return Err(DialogError::NotOpen);
        };
        let saved = form.submit(&self.store).await?;
        self.dialog = DialogState::Closed;
        // A refresh failure surfaces through the collection's error state;
        // the save itself already succeeded.
        let _ = self.store.refresh().await;
        Ok(saved)
    }

    /// Ask for confirmation before deleting.
    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.dialog = DialogState::ConfirmDelete { id: id.into() };
    }

    /// Delete the entity behind the confirm dialog, then re-fetch.
    pub async fn confirm_delete(&mut self) -> Result<(), DialogError> {
        let DialogState::ConfirmDelete { id } = &self.dialog else {
            return Err(DialogError::NotOpen);
        };
        let id = id.clone();
        self.store
            .remove(&id)
            .await
            .map_err(SubmitError::Resource)?;
        self.dialog = DialogState::Closed;
        let _ = self.store.refresh().await;
        Ok(())
    }
}
