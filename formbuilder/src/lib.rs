//! # formbuilder
//!
//! Build custom forms from a palette of field types, keep them in local
//! storage and fill them out to produce stored answers.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use formbuilder::{FieldDraft, FieldType, FormBuilder, MemoryStorage, ScriptedBackend};
//!
//! let mut app = FormBuilder::load(MemoryStorage::new())?;
//!
//! let mut draft = FieldDraft::new();
//! draft.set_field_type(FieldType::Text);
//! draft.field_name = "Nom".into();
//! draft.required = true;
//! app.add_field_from_draft(&mut draft)?;
//! let form_id = app.save_form()?;
//!
//! app.answer_form(form_id)?;
//! app.answer_with(&ScriptedBackend::new().with_text("Nom", "Alice"))?;
//! assert_eq!(app.answers().len(), 1);
//! ```
//!
//! ## Layout
//!
//! - [`FormBuilder`] - The root controller: current view, form being edited,
//!   saved forms and answers
//! - [`FieldDraft`] - The field editor's inputs and their checks
//! - [`Storage`] / [`FormStore`] - Local key/value storage of forms and answers
//! - [`FormBackend`] - Implemented by interactive renderers
//!   (`formbuilder-ratatui-form`) and by [`ScriptedBackend`] for tests

// Re-export all types from formbuilder-types
pub use formbuilder_types::*;

mod store;
pub use store::{
    ALL_ANSWERS_KEY, ALL_FORMS_KEY, FileStorage, FormStore, MemoryStorage, Storage, StoreError,
};

mod draft;
pub use draft::{DraftError, FieldDraft};

mod app;
pub use app::{AppError, FormBuilder, InvalidField, Mode, View};

pub mod preview;

// Scripted backend for filling forms without user interaction
mod scripted_backend;
pub use scripted_backend::{ScriptedBackend, ScriptedBackendError};
