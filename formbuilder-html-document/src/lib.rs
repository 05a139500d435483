//! # formbuilder-html-document
//!
//! Export formbuilder forms as standalone, fillable HTML documents.
//!
//! Each field type maps to its native HTML control: number and range inputs
//! carry `min`/`max`, select fields become `<select>`, radio and checkbox
//! fields become option groups, and required fields get the `required`
//! attribute.
//!
//! ## Example
//!
//! ```rust,ignore
//! use formbuilder_html_document::{HtmlOptions, to_html_with_options};
//!
//! let html = to_html_with_options(&form, &HtmlOptions::new().with_styles(false));
//! std::fs::write("form.html", html)?;
//! ```

mod generator;

pub use generator::{HtmlOptions, escape_html, to_html, to_html_with_options};
