use thiserror::Error;

use velora_core::{Entity, Patch};
use velora_resource::{ResourceError, ResourceStore};

use crate::validate::ValidationErrors;

/// Typed draft behind a create/edit form.
///
/// The draft is a local copy of an entity's editable fields (or defaults
/// for a new one); edits never touch the store's items. `to_patch` builds
/// the wire payload: strings trimmed, untouched optionals stripped,
/// explicit booleans kept even when `false`.
pub trait FormModel: Clone + Send {
    type Entity: Entity;

    /// Seed a draft from an existing entity (edit flow).
    fn from_entity(entity: &Self::Entity) -> Self;

    /// Required-field and format checks. Runs before any network call.
    fn validate(&self) -> ValidationErrors;

    /// Wire payload containing only the fields this form manages.
    fn to_patch(&self) -> Patch;
}

/// Whether the dialog is creating a new entity or editing an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Errors from a submit attempt.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// A submit is already in flight; the triggering control should have
    /// been disabled.
    #[error("submit already in progress")]
    AlreadySubmitting,

    /// Client-side validation failed; inline errors are on the form and
    /// nothing was sent.
    #[error("validation failed")]
    Invalid,

    #[error(transparent)]
    Resource(#[from] ResourceError),
}

/// Dialog-side state machine around one draft.
///
/// Multi-section (tabbed) forms are a view over this single draft:
/// switching sections changes `active_section` and nothing else.
#[derive(Debug, Clone)]
pub struct FormState<M: FormModel> {
    mode: FormMode,
    pub draft: M,
    errors: ValidationErrors,
    submitting: bool,
    active_section: usize,
}

impl<M: FormModel> FormState<M> {
    /// Form for a new entity, seeded with defaults.
    pub fn create(defaults: M) -> Self {
        Self {
            mode: FormMode::Create,
            draft: defaults,
            errors: ValidationErrors::new(),
            submitting: false,
            active_section: 0,
        }
    }

    /// Form editing an existing entity; the draft is a copy of it.
    pub fn edit(entity: &M::Entity) -> Self {
        Self {
            mode: FormMode::Edit {
                id: entity.id().to_string(),
            },
            draft: M::from_entity(entity),
            errors: ValidationErrors::new(),
            submitting: false,
            active_section: 0,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn active_section(&self) -> usize {
        self.active_section
    }

    /// Switch tab. The draft is shared across sections and survives.
    pub fn set_section(&mut self, section: usize) {
        self.active_section = section;
    }

    /// Validate and, if clean, delegate to the store.
    ///
    /// On validation failure the inline errors are stored and nothing is
    /// sent. On a server failure the error is returned so the dialog stays
    /// open (the store has already notified the user). On success the
    /// saved entity is returned for the parent to close the dialog and
    /// refresh its list.
    pub async fn submit(
        &mut self,
        store: &ResourceStore<M::Entity>,
    ) -> Result<M::Entity, SubmitError> {
        if self.submitting {
            return Err(SubmitError::AlreadySubmitting);
        }

        self.errors = self.draft.validate();
        if !self.errors.is_empty() {
            return Err(SubmitError::Invalid);
        }

        self.submitting = true;
        let patch = self.draft.to_patch();
        let result = match &self.mode {
            FormMode::Create => store.create(patch).await,
            FormMode::Edit { id } => store.update(id, patch).await,
        };
        self.submitting = false;

        Ok(result?)
    }

    #[cfg(test)]
    fn force_submitting(&mut self) {
        self.submitting = true;
    }
}
