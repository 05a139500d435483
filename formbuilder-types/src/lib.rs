//! Core types for the formbuilder crates.
//!
//! This crate provides the data model shared by every frontend:
//! - `FormData` - A named, ordered collection of fields (template or answer)
//! - `Field`, `FieldType` and `FieldValue` - One question and its current value
//! - `initialize_field` and `validate_field` - Type-aware defaults and validation
//! - `FormBackend` - The seam implemented by interactive renderers

mod id;
pub use id::generate_unique_id;

mod field_type;
pub use field_type::{FieldType, ParseFieldTypeError};

mod field_value;
pub use field_value::FieldValue;

mod field;
pub use field::{Field, FieldOption, initialize_field, today};

mod validate;
pub use validate::{FieldError, is_valid_email, validate_field};

mod form_data;
pub use form_data::{DEFAULT_FORM_NAME, FormData};

mod error;
pub use error::FillError;

mod traits;
pub use traits::FormBackend;
