//! # formbuilder-ratatui-form
//!
//! Ratatui form backend for formbuilder.
//!
//! This backend displays every field of a form at once in a scrollable TUI
//! form. Users move between fields with Tab/Shift+Tab or the arrow keys,
//! adjust range sliders with ←/→ and submit with F10 or the submit button.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use formbuilder::{FileStorage, FormBuilder};
//! use formbuilder_ratatui_form::RatatuiFormBackend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut app = FormBuilder::load(FileStorage::new(".data"))?;
//!     let id = app.forms()[0].id;
//!     app.answer_form(id)?;
//!     app.answer_with(&RatatuiFormBackend::new())?;
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{RatatuiFormBackend, RatatuiFormError, Theme};
