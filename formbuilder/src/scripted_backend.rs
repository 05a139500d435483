//! Scripted backend for filling forms without user interaction.
//!
//! `ScriptedBackend` answers a form from values configured up front, keyed by
//! field name or position. This is what the tests use in place of a terminal.
//!
//! # Example
//!
//! ```rust,ignore
//! use formbuilder::{FormBuilder, MemoryStorage, ScriptedBackend};
//!
//! app.answer_form(form_id)?;
//! app.answer_with(
//!     &ScriptedBackend::new()
//!         .with_text("Nom", "Alice")
//!         .with_number("Age", 30.0),
//! )?;
//! ```

use std::collections::HashMap;

use crate::{Field, FieldError, FieldValue, FillError, FormBackend, FormData};

/// A backend that returns pre-configured values.
///
/// Fields without a scripted value keep the value they already have, so a
/// select field answers with its first option unless told otherwise.
#[derive(Debug, Clone)]
pub struct ScriptedBackend {
    by_name: HashMap<String, FieldValue>,
    by_index: HashMap<usize, FieldValue>,
    validate: bool,
}

/// Error type for ScriptedBackend.
#[derive(Debug, thiserror::Error)]
pub enum ScriptedBackendError {
    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Scripted value for unknown field: {0}")]
    UnknownField(String),
}

impl From<ScriptedBackendError> for FillError {
    fn from(err: ScriptedBackendError) -> Self {
        FillError::backend(err)
    }
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self {
            by_name: HashMap::new(),
            by_index: HashMap::new(),
            validate: true,
        }
    }
}

impl ScriptedBackend {
    /// Create a backend with no scripted values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the field named `name` with `value`.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.by_name.insert(name.into(), value.into());
        self
    }

    /// Answer the field at `index` with `value`. Takes precedence over a
    /// value given by name.
    pub fn with_value_at(mut self, index: usize, value: impl Into<FieldValue>) -> Self {
        self.by_index.insert(index, value.into());
        self
    }

    /// Add a text answer.
    pub fn with_text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_value(name, FieldValue::Text(value.into()))
    }

    /// Add a numeric answer.
    pub fn with_number(self, name: impl Into<String>, value: f64) -> Self {
        self.with_value(name, FieldValue::Number(value))
    }

    /// Add the checked options of a checkbox field.
    pub fn with_list<I, T>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.with_value(name, FieldValue::List(values))
    }

    /// Return values as given, leaving validation to the caller.
    ///
    /// This models a renderer that lets the user press submit with invalid
    /// input.
    pub fn without_validation(mut self) -> Self {
        self.validate = false;
        self
    }
}

impl FormBackend for ScriptedBackend {
    type Error = ScriptedBackendError;

    fn collect(
        &self,
        form: &FormData,
        validate: &dyn Fn(&Field) -> Result<(), FieldError>,
    ) -> Result<Vec<FieldValue>, Self::Error> {
        if let Some(name) = self
            .by_name
            .keys()
            .find(|name| form.field_by_name(name).is_none())
        {
            return Err(ScriptedBackendError::UnknownField(name.clone()));
        }
        if let Some(index) = self.by_index.keys().find(|&&index| index >= form.len()) {
            return Err(ScriptedBackendError::UnknownField(format!("#{index}")));
        }

        let mut values = Vec::with_capacity(form.len());
        for (index, field) in form.fields().iter().enumerate() {
            let value = self
                .by_index
                .get(&index)
                .or_else(|| self.by_name.get(&field.field_name))
                .cloned()
                .unwrap_or_else(|| field.value.clone());

            if self.validate {
                let candidate = Field {
                    value: value.clone(),
                    ..field.clone()
                };
                if let Err(err) = validate(&candidate) {
                    return Err(ScriptedBackendError::ValidationFailed {
                        field: field.field_name.clone(),
                        message: err.to_string(),
                    });
                }
            }

            values.push(value);
        }

        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldOption, FieldType, initialize_field, validate_field};

    fn form() -> FormData {
        FormData::new("Test")
            .with_field(initialize_field(FieldType::Text, "Nom", true, 0.0, 100.0, vec![]))
            .with_field(initialize_field(
                FieldType::Select,
                "Pays",
                true,
                0.0,
                100.0,
                vec![FieldOption::new("france"), FieldOption::new("belgique")],
            ))
            .with_field(initialize_field(FieldType::Number, "Age", false, 0.0, 120.0, vec![]))
    }

    #[test]
    fn scripted_values_by_name_and_index() {
        let backend = ScriptedBackend::new()
            .with_text("Nom", "Alice")
            .with_number("Age", 10.0)
            .with_value_at(2, 42.0);

        let values = backend.collect(&form(), &validate_field).unwrap();

        assert_eq!(
            values,
            vec![
                FieldValue::from("Alice"),
                FieldValue::from("france"),
                FieldValue::Number(42.0),
            ]
        );
    }

    #[test]
    fn validation_failure() {
        let backend = ScriptedBackend::new().with_number("Age", 500.0);
        let err = backend.collect(&form(), &validate_field).unwrap_err();
        match err {
            ScriptedBackendError::ValidationFailed { field, .. } => assert_eq!(field, "Nom"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn without_validation_passes_values_through() {
        let values = ScriptedBackend::new()
            .without_validation()
            .collect(&form(), &validate_field)
            .unwrap();
        assert_eq!(values[0], FieldValue::from(""));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = ScriptedBackend::new()
            .with_text("Email", "a@b.c")
            .collect(&form(), &validate_field)
            .unwrap_err();
        assert!(matches!(err, ScriptedBackendError::UnknownField(name) if name == "Email"));

        let err = ScriptedBackend::new()
            .with_value_at(7, "x")
            .collect(&form(), &validate_field)
            .unwrap_err();
        assert!(matches!(err, ScriptedBackendError::UnknownField(_)));
    }

    #[test]
    fn converts_to_fill_error() {
        let err: FillError = ScriptedBackendError::UnknownField("x".into()).into();
        assert!(!err.is_cancelled());
        assert!(err.to_string().contains("unknown field"));
    }
}
