//! Form drafts and validation.
//!
//! A form holds a local draft — a copy of an entity's fields, or defaults
//! for a new one — edited entirely client-side until submit. Validation
//! runs before any network call; a draft with inline errors never leaves
//! the browser-equivalent. Submission delegates to the entity's
//! `ResourceStore` and reports back so the hosting dialog can close.

pub mod form;
pub mod validate;

pub use form::{FormMode, FormModel, FormState, SubmitError};
pub use validate::ValidationErrors;
