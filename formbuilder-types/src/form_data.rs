use serde::{Deserialize, Serialize};

use crate::{Field, FieldError, FieldValue, generate_unique_id, validate_field};

/// Name given to a form before the user renames it.
pub const DEFAULT_FORM_NAME: &str = "Nom du formulaire";

/// A named, ordered collection of fields.
///
/// The same structure is used for form templates and for stored answers; an
/// answer is a form whose field values have been filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub id: u64,

    pub form_name: String,

    /// Fields in display order. The order is chosen by the user.
    pub fields: Vec<Field>,
}

impl FormData {
    /// Create an empty form with the given name.
    pub fn new(form_name: impl Into<String>) -> Self {
        Self {
            id: generate_unique_id(),
            form_name: form_name.into(),
            fields: Vec::new(),
        }
    }

    /// Create an empty form with the default name.
    pub fn untitled() -> Self {
        Self::new(DEFAULT_FORM_NAME)
    }

    /// Add a field, returning the form for chaining.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Get the fields.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Get the field at `index`.
    pub fn field(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    /// Find a field by name (exact match).
    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.field_name == name)
    }

    /// Check if the form has any fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Move the field at `from` to position `to`.
    ///
    /// The other fields keep their relative order. Returns `false` and leaves
    /// the form untouched when either index is out of range.
    pub fn move_field(&mut self, from: usize, to: usize) -> bool {
        if from >= self.fields.len() || to >= self.fields.len() {
            return false;
        }
        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        true
    }

    /// Validate every field, recording each message in `error_message`.
    ///
    /// Returns the failures as `(index, error)` pairs, in field order.
    pub fn validate_all(&mut self) -> Vec<(usize, FieldError)> {
        let mut failures = Vec::new();
        for (index, field) in self.fields.iter_mut().enumerate() {
            match validate_field(field) {
                Ok(()) => field.error_message = None,
                Err(error) => {
                    field.error_message = Some(error.to_string());
                    failures.push((index, error));
                }
            }
        }
        failures
    }

    /// Tidy user input before the form is stored.
    ///
    /// Field names are trimmed; text values, checked options and option
    /// values are trimmed and lower-cased.
    pub fn normalize(&mut self) {
        for field in &mut self.fields {
            field.field_name = field.field_name.trim().to_string();

            match &mut field.value {
                FieldValue::Text(text) => *text = text.trim().to_lowercase(),
                FieldValue::List(items) => {
                    for item in items.iter_mut() {
                        *item = item.trim().to_lowercase();
                    }
                }
                FieldValue::Number(_) => {}
            }

            if let Some(options) = &mut field.options {
                for option in options.iter_mut() {
                    option.value = option.value.trim().to_lowercase();
                }
            }
        }
    }
}

impl Default for FormData {
    fn default() -> Self {
        Self::untitled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldOption, FieldType, initialize_field};

    fn text(name: &str) -> Field {
        initialize_field(FieldType::Text, name, false, 0.0, 100.0, Vec::new())
    }

    fn names(form: &FormData) -> Vec<&str> {
        form.fields.iter().map(|f| f.field_name.as_str()).collect()
    }

    #[test]
    fn move_field_splices() {
        let mut form = FormData::untitled()
            .with_field(text("a"))
            .with_field(text("b"))
            .with_field(text("c"));

        assert!(form.move_field(0, 2));
        assert_eq!(names(&form), ["b", "c", "a"]);

        assert!(form.move_field(2, 1));
        assert_eq!(names(&form), ["b", "a", "c"]);

        assert!(!form.move_field(3, 0));
        assert_eq!(names(&form), ["b", "a", "c"]);
    }

    #[test]
    fn validate_all_records_messages() {
        let mut required = text("nom");
        required.required = true;
        let mut form = FormData::untitled()
            .with_field(required)
            .with_field(text("optional"));

        let failures = form.validate_all();
        assert_eq!(failures, vec![(0, FieldError::Required)]);
        assert_eq!(
            form.fields[0].error_message.as_deref(),
            Some("Ce champ est obligatoire")
        );
        assert!(form.fields[1].error_message.is_none());

        form.fields[0].value = "Alice".into();
        assert!(form.validate_all().is_empty());
        assert!(form.fields[0].error_message.is_none());
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        let mut name = text("  Nom  ");
        name.value = "  ALICE ".into();
        let colors = initialize_field(
            FieldType::Checkbox,
            "Couleurs",
            false,
            0.0,
            100.0,
            vec![FieldOption::new(" Rouge"), FieldOption::new("VERT ")],
        );
        let mut form = FormData::untitled().with_field(name).with_field(colors);

        form.normalize();

        assert_eq!(form.fields[0].field_name, "Nom");
        assert_eq!(form.fields[0].value, FieldValue::from("alice"));
        let options: Vec<_> = form.fields[1].option_values().collect();
        assert_eq!(options, ["rouge", "vert"]);
        assert_eq!(form.fields[1].value, FieldValue::List(vec!["rouge".into()]));
    }

    #[test]
    fn json_shape() {
        let form = FormData::new("Contact").with_field(text("nom"));
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["formName"], "Contact");
        assert_eq!(json["fields"][0]["fieldName"], "nom");

        let back: FormData = serde_json::from_value(json).unwrap();
        assert_eq!(back, form);
    }
}
