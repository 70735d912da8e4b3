//! Dashboard page controllers.
//!
//! Each list page composes a [`ResourceStore`](velora_resource::ResourceStore)
//! with page-local state: the pagination cursor, the (debounced) search
//! text, and the create/edit/delete dialog. [`PageStats`] and the agenda
//! bucketing are the read-only garnish on top.

pub mod agenda;
pub mod list_page;
pub mod stats;

pub use agenda::{AgendaBucket, AgendaScope, bucket_appointments};
pub use list_page::{DialogError, DialogState, ListPage};
pub use stats::{PageStats, page_average};
