use serde::{Deserialize, Serialize};

use crate::{FieldType, FieldValue, generate_unique_id};

/// One selectable option of a Select, Radio or Checkbox field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub id: u64,
    pub value: String,
}

impl FieldOption {
    /// Create an option with a fresh id.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: generate_unique_id(),
            value: value.into(),
        }
    }
}

/// A single question in a form.
///
/// `options` is only present for choice fields and `min`/`max` only for
/// numeric fields; `initialize_field` upholds this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: u64,

    pub field_type: FieldType,

    /// The label shown to the person filling the form.
    pub field_name: String,

    pub value: FieldValue,

    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    /// Message from the last validation, shown next to the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Field {
    /// The options of a choice field (empty for other types).
    pub fn options(&self) -> &[FieldOption] {
        self.options.as_deref().unwrap_or_default()
    }

    /// Option values in display order.
    pub fn option_values(&self) -> impl Iterator<Item = &str> {
        self.options().iter().map(|option| option.value.as_str())
    }

    /// The field name with its first letter upper-cased, as displayed.
    pub fn display_name(&self) -> String {
        let mut chars = self.field_name.chars();
        match chars.next() {
            None => String::new(),
            Some(first) => first.to_uppercase().chain(chars).collect(),
        }
    }
}

/// Today's date in UTC as `YYYY-MM-DD`, the default of date fields.
pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Build a new field with defaults appropriate to its type.
///
/// - Number and Range: `min`/`max` are kept and the value starts at `min`.
/// - Select and Radio: the options are kept and the value is the first option.
/// - Checkbox: the options are kept and the first option starts checked.
/// - Date: today's date.
/// - Everything else: the empty string.
pub fn initialize_field(
    field_type: FieldType,
    field_name: impl Into<String>,
    required: bool,
    min: f64,
    max: f64,
    options: Vec<FieldOption>,
) -> Field {
    let base = Field {
        id: generate_unique_id(),
        field_type,
        field_name: field_name.into(),
        value: FieldValue::empty(),
        required,
        options: None,
        min: None,
        max: None,
        error_message: None,
    };

    match field_type {
        FieldType::Number | FieldType::Range => Field {
            min: Some(min),
            max: Some(max),
            value: FieldValue::Number(min),
            ..base
        },
        FieldType::Select | FieldType::Radio => Field {
            value: options
                .first()
                .map(|option| FieldValue::Text(option.value.clone()))
                .unwrap_or_default(),
            options: Some(options),
            ..base
        },
        FieldType::Checkbox => Field {
            value: FieldValue::List(
                options
                    .first()
                    .map(|option| vec![option.value.clone()])
                    .unwrap_or_default(),
            ),
            options: Some(options),
            ..base
        },
        FieldType::Date => Field {
            value: FieldValue::Text(today()),
            ..base
        },
        FieldType::Text | FieldType::Email | FieldType::File => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(values: &[&str]) -> Vec<FieldOption> {
        values.iter().map(|v| FieldOption::new(*v)).collect()
    }

    #[test]
    fn numeric_fields_start_at_min() {
        for ty in [FieldType::Number, FieldType::Range] {
            let field = initialize_field(ty, "age", false, 5.0, 10.0, Vec::new());
            assert_eq!(field.value, FieldValue::Number(5.0));
            assert_eq!(field.min, Some(5.0));
            assert_eq!(field.max, Some(10.0));
            assert!(field.options.is_none());
        }
    }

    #[test]
    fn single_choice_fields_start_at_first_option() {
        for ty in [FieldType::Select, FieldType::Radio] {
            let field = initialize_field(ty, "color", true, 0.0, 100.0, opts(&["red", "blue"]));
            assert_eq!(field.value, FieldValue::from("red"));
            assert_eq!(field.options().len(), 2);
            assert!(field.min.is_none() && field.max.is_none());
        }
    }

    #[test]
    fn checkbox_starts_with_first_option_checked() {
        let field = initialize_field(
            FieldType::Checkbox,
            "toppings",
            false,
            0.0,
            100.0,
            opts(&["cheese", "ham"]),
        );
        assert_eq!(field.value, FieldValue::List(vec!["cheese".to_string()]));
    }

    #[test]
    fn choice_fields_without_options_are_empty() {
        let select = initialize_field(FieldType::Select, "s", false, 0.0, 1.0, Vec::new());
        assert_eq!(select.value, FieldValue::empty());

        let checkbox = initialize_field(FieldType::Checkbox, "c", false, 0.0, 1.0, Vec::new());
        assert_eq!(checkbox.value, FieldValue::List(Vec::new()));
    }

    #[test]
    fn date_defaults_to_today() {
        let before = today();
        let field = initialize_field(FieldType::Date, "when", true, 0.0, 100.0, Vec::new());
        let after = today();

        let value = field.value.as_str().unwrap().to_string();
        assert!(value == before || value == after);
        assert_eq!(value.len(), 10);
    }

    #[test]
    fn other_fields_default_to_empty_text() {
        for ty in [FieldType::Text, FieldType::Email, FieldType::File] {
            let field = initialize_field(ty, "x", false, 3.0, 4.0, opts(&["ignored"]));
            assert_eq!(field.value, FieldValue::empty());
            assert!(field.options.is_none());
            assert!(field.min.is_none());
        }
    }

    #[test]
    fn camel_case_json() {
        let field = initialize_field(FieldType::Number, "age", true, 1.0, 9.0, Vec::new());
        let json = serde_json::to_value(&field).unwrap();

        assert_eq!(json["fieldType"], "number");
        assert_eq!(json["fieldName"], "age");
        assert_eq!(json["value"], 1.0);
        assert!(json.get("options").is_none());
        assert!(json.get("errorMessage").is_none());
    }

    #[test]
    fn display_name_capitalizes() {
        let field = initialize_field(FieldType::Text, "nom complet", false, 0.0, 1.0, Vec::new());
        assert_eq!(field.display_name(), "Nom complet");
    }
}
