//! # formbuilder-dialoguer-editor
//!
//! Step-by-step command-line prompts for building forms with formbuilder.
//!
//! The editor asks for each new field's type, name, options or bounds and
//! whether it is required, then offers a menu to rename the form, move or
//! remove fields, preview and save.
//!
//! ## Example
//!
//! ```rust,ignore
//! use formbuilder::{FileStorage, FormBuilder};
//! use formbuilder_dialoguer_editor::DialoguerEditor;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut app = FormBuilder::load(FileStorage::new(".data"))?;
//!     if let Some(id) = DialoguerEditor::new().design(&mut app)? {
//!         println!("Saved form {id}");
//!     }
//!     Ok(())
//! }
//! ```

mod editor;

pub use editor::{DialoguerEditor, EditorError, MenuAction};
