use formbuilder_types::{Field, FieldOption, FieldType, initialize_field};
use thiserror::Error;

const DEFAULT_MIN: f64 = 0.0;
const DEFAULT_MAX: f64 = 100.0;

/// Reason a draft cannot be inserted into the form yet.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("Le nom du champ est obligatoire")]
    MissingName,

    #[error("L'option {0} est vide")]
    EmptyOption(usize),

    #[error("Option (min. {min})")]
    TooFewOptions { min: usize, actual: usize },

    #[error("Min et Max doivent être des nombres")]
    NonFiniteBound,

    #[error("Min et Max doivent être positifs")]
    NegativeBound,

    #[error("Min doit être inférieur à Max")]
    MinNotBelowMax,

    #[error("Aucune option à l'index {index} ({len} options)")]
    OptionIndexOutOfRange { index: usize, len: usize },
}

/// The inputs of the field editor.
///
/// A draft is filled in step by step and turned into a [`Field`] with
/// [`FieldDraft::build`], which refuses drafts that [`FieldDraft::check`]
/// rejects.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDraft {
    pub field_name: String,
    pub field_type: FieldType,
    pub min: f64,
    pub max: f64,
    pub required: bool,

    /// Option values for choice fields, ignored otherwise.
    pub options: Vec<String>,
}

impl Default for FieldDraft {
    fn default() -> Self {
        Self::for_type(FieldType::Text)
    }
}

impl FieldDraft {
    /// An empty draft for a text field.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty draft for `field_type`, with its default `required` flag.
    pub fn for_type(field_type: FieldType) -> Self {
        Self {
            field_name: String::new(),
            field_type,
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            required: field_type.required_by_default(),
            options: Vec::new(),
        }
    }

    /// Switch to another field type.
    ///
    /// Everything entered so far is cleared, as the inputs of one type do not
    /// carry over to another.
    pub fn set_field_type(&mut self, field_type: FieldType) {
        *self = Self::for_type(field_type);
    }

    /// Append an empty option and return its index.
    pub fn add_option(&mut self) -> usize {
        self.options.push(String::new());
        self.options.len() - 1
    }

    /// Remove the option at `index`.
    pub fn remove_option(&mut self, index: usize) -> Result<String, DraftError> {
        self.check_option_index(index)?;
        Ok(self.options.remove(index))
    }

    /// Replace the value of the option at `index`.
    pub fn update_option(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), DraftError> {
        self.check_option_index(index)?;
        self.options[index] = value.into();
        Ok(())
    }

    fn check_option_index(&self, index: usize) -> Result<(), DraftError> {
        if index >= self.options.len() {
            return Err(DraftError::OptionIndexOutOfRange {
                index,
                len: self.options.len(),
            });
        }
        Ok(())
    }

    /// Check whether the draft can be inserted, reporting the first problem.
    pub fn check(&self) -> Result<(), DraftError> {
        if self.field_name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }

        if self.field_type.has_options() {
            if let Some(index) = self.options.iter().position(|o| o.trim().is_empty()) {
                return Err(DraftError::EmptyOption(index + 1));
            }
            let min = self.field_type.min_options();
            if self.options.len() < min {
                return Err(DraftError::TooFewOptions {
                    min,
                    actual: self.options.len(),
                });
            }
        }

        if self.field_type.is_numeric() {
            if !self.min.is_finite() || !self.max.is_finite() {
                return Err(DraftError::NonFiniteBound);
            }
            if self.min < 0.0 || self.max < 0.0 {
                return Err(DraftError::NegativeBound);
            }
            if self.min >= self.max {
                return Err(DraftError::MinNotBelowMax);
            }
        }

        Ok(())
    }

    /// Turn the draft into a new field and clear it for the next one.
    ///
    /// The field type is kept so several fields of the same type can be
    /// added in a row.
    pub fn build(&mut self) -> Result<Field, DraftError> {
        self.check()?;

        let options = if self.field_type.has_options() {
            self.options.iter().map(FieldOption::new).collect()
        } else {
            Vec::new()
        };

        let field = initialize_field(
            self.field_type,
            self.field_name.clone(),
            self.required,
            self.min,
            self.max,
            options,
        );

        self.set_field_type(self.field_type);
        Ok(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbuilder_types::FieldValue;

    fn named(field_type: FieldType, name: &str) -> FieldDraft {
        let mut draft = FieldDraft::for_type(field_type);
        draft.field_name = name.to_string();
        draft
    }

    #[test]
    fn defaults() {
        let draft = FieldDraft::new();
        assert_eq!(draft.field_type, FieldType::Text);
        assert_eq!(draft.min, 0.0);
        assert_eq!(draft.max, 100.0);
        assert!(!draft.required);
        assert!(draft.options.is_empty());
    }

    #[test]
    fn changing_type_resets_inputs() {
        let mut draft = named(FieldType::Select, "Pays");
        draft.options.push("France".into());
        draft.min = 10.0;

        draft.set_field_type(FieldType::Range);

        assert!(draft.field_name.is_empty());
        assert!(draft.options.is_empty());
        assert_eq!((draft.min, draft.max), (0.0, 100.0));
        assert!(draft.required);

        draft.set_field_type(FieldType::Email);
        assert!(!draft.required);
    }

    #[test]
    fn name_is_checked_first() {
        let mut draft = FieldDraft::for_type(FieldType::Radio);
        draft.field_name = "   ".into();
        assert_eq!(draft.check(), Err(DraftError::MissingName));
    }

    #[test]
    fn empty_option_blocks_insert() {
        let mut draft = named(FieldType::Radio, "Choix");
        draft.add_option();
        draft.update_option(0, "oui").unwrap();
        draft.add_option();
        assert_eq!(draft.check(), Err(DraftError::EmptyOption(2)));
    }

    #[test]
    fn minimum_option_counts() {
        let checkbox = named(FieldType::Checkbox, "Options");
        assert_eq!(
            checkbox.check(),
            Err(DraftError::TooFewOptions { min: 1, actual: 0 })
        );

        let mut select = named(FieldType::Select, "Pays");
        select.options.push("France".into());
        assert_eq!(
            select.check(),
            Err(DraftError::TooFewOptions { min: 2, actual: 1 })
        );
        assert_eq!(select.check().unwrap_err().to_string(), "Option (min. 2)");

        select.options.push("Belgique".into());
        assert_eq!(select.check(), Ok(()));
    }

    #[test]
    fn numeric_bounds() {
        let mut draft = named(FieldType::Number, "Age");
        draft.min = -1.0;
        assert_eq!(draft.check(), Err(DraftError::NegativeBound));

        draft.min = 10.0;
        draft.max = 10.0;
        let err = draft.check().unwrap_err();
        assert_eq!(err, DraftError::MinNotBelowMax);
        assert_eq!(err.to_string(), "Min doit être inférieur à Max");

        draft.max = 20.0;
        assert_eq!(draft.check(), Ok(()));
    }

    #[test]
    fn non_finite_bounds() {
        let mut draft = named(FieldType::Range, "Note");
        draft.min = f64::NAN;
        assert_eq!(draft.check(), Err(DraftError::NonFiniteBound));

        draft.min = 0.0;
        draft.max = f64::INFINITY;
        let err = draft.build().unwrap_err();
        assert_eq!(err, DraftError::NonFiniteBound);
        assert_eq!(err.to_string(), "Min et Max doivent être des nombres");

        draft.max = 1e308;
        assert_eq!(draft.check(), Ok(()));
    }

    #[test]
    fn bounds_ignored_for_text() {
        let mut draft = named(FieldType::Text, "Nom");
        draft.min = 50.0;
        draft.max = 1.0;
        assert_eq!(draft.check(), Ok(()));
    }

    #[test]
    fn option_index_errors() {
        let mut draft = named(FieldType::Select, "Pays");
        assert_eq!(
            draft.update_option(0, "x"),
            Err(DraftError::OptionIndexOutOfRange { index: 0, len: 0 })
        );
        draft.add_option();
        assert_eq!(draft.remove_option(0), Ok(String::new()));
    }

    #[test]
    fn build_creates_field_and_keeps_type() {
        let mut draft = named(FieldType::Checkbox, "Loisirs");
        draft.options = vec!["sport".into(), "lecture".into()];
        draft.required = true;

        let field = draft.build().unwrap();

        assert_eq!(field.field_type, FieldType::Checkbox);
        assert_eq!(field.field_name, "Loisirs");
        assert!(field.required);
        assert_eq!(
            field.option_values().collect::<Vec<_>>(),
            vec!["sport", "lecture"]
        );
        assert_eq!(field.value, FieldValue::List(vec!["sport".into()]));

        assert_eq!(draft, FieldDraft::for_type(FieldType::Checkbox));
    }

    #[test]
    fn build_refuses_invalid_draft() {
        let mut draft = named(FieldType::Range, "Note");
        draft.max = 0.0;
        assert_eq!(draft.build(), Err(DraftError::MinNotBelowMax));
        assert_eq!(draft.field_name, "Note");
    }

    #[test]
    fn build_numeric_field() {
        let mut draft = named(FieldType::Range, "Note");
        draft.min = 1.0;
        draft.max = 5.0;

        let field = draft.build().unwrap();
        assert_eq!(field.min, Some(1.0));
        assert_eq!(field.max, Some(5.0));
        assert_eq!(field.value, FieldValue::Number(1.0));
        assert!(field.options.is_none());
    }
}
