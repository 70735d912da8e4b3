pub mod blob;
pub mod entity;
pub mod error;
pub mod page;
pub mod patch;

pub use blob::{merge_with_defaults, parse_blob_or_default};
pub use entity::{Entity, EntityMeta};
pub use error::{CoreError, ErrorCategory, Result};
pub use page::{DEFAULT_PAGE_SIZE, FilterValue, ListQuery, Page, PageMeta};
pub use patch::Patch;
