//! Per-entity resource stores.
//!
//! A [`ResourceStore`] owns the collection state for one REST resource —
//! the current page of items, pagination meta, loading/error flags — and
//! exposes the list/create/update/delete/get operations every dashboard is
//! built from. Mutations notify the user through a [`Notifier`] and publish
//! invalidation events so dependent views re-fetch; the collection itself is
//! always rebuilt from the server, never patched locally.

pub mod api;
pub mod debounce;
pub mod error;
pub mod events;
pub mod notify;
pub mod store;

pub use api::ResourceApi;
pub use debounce::Debouncer;
pub use error::{ResourceError, ResourceResult};
pub use events::{InvalidationBus, ResourceEvent, ResourceOp};
pub use notify::{Notifier, NullNotifier, TracingNotifier};
pub use store::{CollectionState, ResourceStore};
