use formbuilder_types::{
    Field, FieldError, FieldType, FieldValue, FillError, FormBackend, FormData, validate_field,
};
use thiserror::Error;

use crate::draft::{DraftError, FieldDraft};
use crate::store::{FormStore, Storage, StoreError};

/// The screen shown next to the form editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Live rendering of the form being built or answered.
    #[default]
    Preview,
    /// Saved forms.
    FormList,
    /// Stored answers.
    AnswerList,
}

/// What the current form is being used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Building a new form.
    #[default]
    Design,
    /// Changing a saved form in place.
    Edit,
    /// Filling a saved form to record an answer.
    Answer,
}

/// A field rejected when an answer was submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidField {
    pub index: usize,
    pub field_name: String,
    pub message: String,
}

impl std::fmt::Display for InvalidField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field_name, self.message)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No saved form with id {0}")]
    FormNotFound(u64),

    #[error("Field index {index} out of range ({len} fields)")]
    FieldIndexOutOfRange { index: usize, len: usize },

    #[error("Answer index {index} out of range ({len} answers)")]
    AnswerIndexOutOfRange { index: usize, len: usize },

    #[error("Cannot save a form without fields")]
    EmptyForm,

    #[error("No form is being answered")]
    NotAnswering,

    #[error("A form being answered cannot be changed")]
    Answering,

    #[error("{} invalid field(s): {}", .errors.len(), join_errors(.errors))]
    InvalidAnswer { errors: Vec<InvalidField> },

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Fill(#[from] FillError),
}

fn join_errors(errors: &[InvalidField]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The form builder application state.
///
/// Holds the form currently being designed, edited or answered, the saved
/// forms and the stored answers, and writes every change to the forms or
/// answers through to storage.
#[derive(Debug)]
pub struct FormBuilder<S> {
    store: FormStore<S>,
    forms: Vec<FormData>,
    answers: Vec<FormData>,
    current: FormData,
    view: View,
    mode: Mode,
}

impl<S: Storage> FormBuilder<S> {
    /// Open the application over `storage`, loading saved forms and answers.
    pub fn load(storage: S) -> Result<Self, AppError> {
        let store = FormStore::new(storage);
        let forms = store.forms()?;
        let answers = store.answers()?;
        tracing::info!(forms = forms.len(), answers = answers.len(), "loaded store");

        Ok(Self {
            store,
            forms,
            answers,
            current: FormData::untitled(),
            view: View::Preview,
            mode: Mode::Design,
        })
    }

    pub fn forms(&self) -> &[FormData] {
        &self.forms
    }

    pub fn answers(&self) -> &[FormData] {
        &self.answers
    }

    /// Answers recorded for the form `form_id`.
    pub fn answers_for(&self, form_id: u64) -> impl Iterator<Item = &FormData> {
        self.answers.iter().filter(move |answer| answer.id == form_id)
    }

    pub fn form(&self, id: u64) -> Option<&FormData> {
        self.forms.iter().find(|form| form.id == id)
    }

    /// The form being designed, edited or answered.
    pub fn current(&self) -> &FormData {
        &self.current
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn store(&self) -> &FormStore<S> {
        &self.store
    }

    /// Start over with an empty, untitled form in design mode.
    pub fn reset_form(&mut self) {
        self.current = FormData::untitled();
        self.mode = Mode::Design;
        self.view = View::Preview;
    }

    pub fn open_form_list(&mut self) {
        self.view = View::FormList;
    }

    pub fn open_answer_list(&mut self) {
        self.view = View::AnswerList;
    }

    /// Return from a list to the preview.
    pub fn back(&mut self) {
        self.view = View::Preview;
    }

    fn ensure_not_answering(&self) -> Result<(), AppError> {
        if self.mode == Mode::Answer {
            return Err(AppError::Answering);
        }
        Ok(())
    }

    fn check_field_index(&self, index: usize) -> Result<(), AppError> {
        if index >= self.current.fields.len() {
            return Err(AppError::FieldIndexOutOfRange {
                index,
                len: self.current.fields.len(),
            });
        }
        Ok(())
    }

    pub fn rename_form(&mut self, name: impl Into<String>) -> Result<(), AppError> {
        self.ensure_not_answering()?;
        self.current.form_name = name.into();
        Ok(())
    }

    /// Append a field to the current form.
    pub fn add_field(&mut self, field: Field) -> Result<(), AppError> {
        self.ensure_not_answering()?;
        tracing::debug!(field = %field.field_name, kind = %field.field_type, "field added");
        self.current.fields.push(field);
        Ok(())
    }

    /// Build a field from `draft` and append it. The draft is cleared.
    pub fn add_field_from_draft(&mut self, draft: &mut FieldDraft) -> Result<(), AppError> {
        self.ensure_not_answering()?;
        let field = draft.build()?;
        self.add_field(field)
    }

    pub fn remove_field(&mut self, index: usize) -> Result<Field, AppError> {
        self.ensure_not_answering()?;
        self.check_field_index(index)?;
        Ok(self.current.fields.remove(index))
    }

    /// Move a field after a drag ends.
    ///
    /// `destination` is `None` when the field was dropped outside the list,
    /// which leaves the order unchanged.
    pub fn reorder_field(
        &mut self,
        source: usize,
        destination: Option<usize>,
    ) -> Result<(), AppError> {
        let Some(destination) = destination else {
            return Ok(());
        };
        self.check_field_index(source)?;
        self.check_field_index(destination)?;
        self.current.move_field(source, destination);
        Ok(())
    }

    /// Set the value of a field and record its validation message.
    ///
    /// Returns the validation result; an invalid value is still stored so the
    /// user can correct it.
    pub fn set_field_value(
        &mut self,
        index: usize,
        value: impl Into<FieldValue>,
    ) -> Result<Result<(), FieldError>, AppError> {
        self.check_field_index(index)?;
        let field = &mut self.current.fields[index];
        field.value = value.into();
        let result = validate_field(field);
        field.error_message = result.as_ref().err().map(ToString::to_string);
        Ok(result)
    }

    /// Check or uncheck one option of a checkbox field.
    pub fn toggle_checkbox_option(
        &mut self,
        index: usize,
        option_index: usize,
        checked: bool,
    ) -> Result<Result<(), FieldError>, AppError> {
        self.check_field_index(index)?;
        let field = &self.current.fields[index];
        let Some(option) = field.options().get(option_index) else {
            return Err(DraftError::OptionIndexOutOfRange {
                index: option_index,
                len: field.options().len(),
            }
            .into());
        };
        let option = option.value.clone();

        let mut selected = match (&field.field_type, &field.value) {
            (FieldType::Checkbox, FieldValue::List(items)) => items.clone(),
            _ => Vec::new(),
        };
        selected.retain(|item| *item != option);
        if checked {
            selected.push(option);
        }
        self.set_field_value(index, selected)
    }

    /// Store the current form and start a new one.
    ///
    /// In edit mode the saved form with the same id is replaced; otherwise the
    /// form is appended. Returns the id of the saved form.
    pub fn save_form(&mut self) -> Result<u64, AppError> {
        self.ensure_not_answering()?;
        if self.current.is_empty() {
            return Err(AppError::EmptyForm);
        }

        let mut form = self.current.clone();
        form.normalize();
        let id = form.id;

        let mut forms = self.forms.clone();
        match self.mode {
            Mode::Edit => match forms.iter_mut().find(|saved| saved.id == id) {
                Some(saved) => *saved = form,
                None => {
                    tracing::warn!(id, "edited form no longer stored, saving as new");
                    forms.push(form);
                }
            },
            _ => forms.push(form),
        }

        self.store.save_forms(&forms)?;
        self.forms = forms;
        tracing::info!(id, total = self.forms.len(), "form saved");

        self.reset_form();
        Ok(id)
    }

    /// Validate the answered form and store it.
    ///
    /// Every field's message is refreshed. If any field is invalid nothing is
    /// stored and the failures are returned.
    pub fn submit_answers(&mut self) -> Result<(), AppError> {
        if self.mode != Mode::Answer {
            return Err(AppError::NotAnswering);
        }

        let failures = self.current.validate_all();
        if !failures.is_empty() {
            let errors = failures
                .into_iter()
                .map(|(index, error)| InvalidField {
                    index,
                    field_name: self.current.fields[index].field_name.clone(),
                    message: error.to_string(),
                })
                .collect();
            return Err(AppError::InvalidAnswer { errors });
        }

        let mut answers = self.answers.clone();
        answers.push(self.current.clone());
        self.store.save_answers(&answers)?;
        self.answers = answers;
        tracing::info!(form = self.current.id, total = self.answers.len(), "answer stored");

        self.view = View::AnswerList;
        Ok(())
    }

    /// Fill the answered form through `backend` and submit the result.
    pub fn answer_with<B: FormBackend>(&mut self, backend: &B) -> Result<(), AppError> {
        if self.mode != Mode::Answer {
            return Err(AppError::NotAnswering);
        }

        let values = backend
            .collect(&self.current, &validate_field)
            .map_err(Into::<FillError>::into)?;

        if values.len() != self.current.len() {
            return Err(FillError::ValueCount {
                expected: self.current.len(),
                actual: values.len(),
            }
            .into());
        }

        for (index, value) in values.into_iter().enumerate() {
            // Failures are collected again by submit_answers.
            let _ = self.set_field_value(index, value)?;
        }
        self.submit_answers()
    }

    fn saved(&self, id: u64) -> Result<FormData, AppError> {
        self.form(id).cloned().ok_or(AppError::FormNotFound(id))
    }

    /// Load a saved form into the editor to change it in place.
    pub fn edit_form(&mut self, id: u64) -> Result<(), AppError> {
        self.current = self.saved(id)?;
        self.mode = Mode::Edit;
        self.view = View::Preview;
        tracing::debug!(id, "editing form");
        Ok(())
    }

    /// Load a saved form to fill it in.
    pub fn answer_form(&mut self, id: u64) -> Result<(), AppError> {
        self.current = self.saved(id)?;
        self.mode = Mode::Answer;
        self.view = View::Preview;
        tracing::debug!(id, "answering form");
        Ok(())
    }

    /// Delete the saved form `id`. Answers to it are kept.
    pub fn delete_form(&mut self, id: u64) -> Result<FormData, AppError> {
        let position = self
            .forms
            .iter()
            .position(|form| form.id == id)
            .ok_or(AppError::FormNotFound(id))?;

        let mut forms = self.forms.clone();
        let removed = forms.remove(position);
        self.store.save_forms(&forms)?;
        self.forms = forms;
        tracing::info!(id, remaining = self.forms.len(), "form deleted");
        Ok(removed)
    }

    /// Delete the answer at `index` in the answer list.
    pub fn delete_answer(&mut self, index: usize) -> Result<FormData, AppError> {
        if index >= self.answers.len() {
            return Err(AppError::AnswerIndexOutOfRange {
                index,
                len: self.answers.len(),
            });
        }

        let mut answers = self.answers.clone();
        let removed = answers.remove(index);
        self.store.save_answers(&answers)?;
        self.answers = answers;
        tracing::info!(index, remaining = self.answers.len(), "answer deleted");
        Ok(removed)
    }
}
