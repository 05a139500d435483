//! Dialoguer prompts for the field editor and the form design menu.

use dialoguer::{
    Confirm, FuzzySelect, Input, Select,
    theme::{ColorfulTheme, SimpleTheme, Theme},
};
use formbuilder::{
    AppError, DraftError, Field, FieldDraft, FieldType, FormBuilder, Mode, Storage, preview,
};
use thiserror::Error;

/// Error type for the Dialoguer editor.
#[derive(Debug, Error)]
pub enum EditorError {
    /// User cancelled the editor (e.g., pressed Ctrl+C or Escape).
    #[error("Editing cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    #[error(transparent)]
    App(#[from] AppError),
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn prompt_result<T>(result: Result<T, dialoguer::Error>) -> Result<T, EditorError> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if is_cancelled(&e) => Err(EditorError::Cancelled),
        Err(e) => Err(EditorError::Dialoguer(e)),
    }
}

/// An entry of the design menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddField,
    Rename,
    MoveField,
    RemoveField,
    Preview,
    Save,
    Discard,
}

impl MenuAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::AddField => "Ajouter un champ",
            Self::Rename => "Renommer le formulaire",
            Self::MoveField => "Déplacer un champ",
            Self::RemoveField => "Supprimer un champ",
            Self::Preview => "Aperçu",
            Self::Save => "Enregistrer",
            Self::Discard => "Abandonner",
        }
    }

    /// Actions that make sense for a form with `field_count` fields.
    pub fn available(field_count: usize) -> Vec<MenuAction> {
        let mut actions = vec![Self::AddField, Self::Rename];
        if field_count > 1 {
            actions.push(Self::MoveField);
        }
        if field_count > 0 {
            actions.extend([Self::RemoveField, Self::Preview, Self::Save]);
        }
        actions.push(Self::Discard);
        actions
    }
}

/// `Input::<f64>` parses `NaN` and `inf`, which cannot be stored.
fn finite_number(n: f64) -> Result<(), &'static str> {
    if n.is_finite() {
        Ok(())
    } else {
        Err("Nombre invalide")
    }
}

/// The part of the field editor to ask again after a rejected draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Name,
    Options,
    Bounds,
}

fn retry_step(err: &DraftError) -> Step {
    match err {
        DraftError::MissingName => Step::Name,
        DraftError::EmptyOption(_)
        | DraftError::TooFewOptions { .. }
        | DraftError::OptionIndexOutOfRange { .. } => Step::Options,
        DraftError::NonFiniteBound | DraftError::NegativeBound | DraftError::MinNotBelowMax => {
            Step::Bounds
        }
    }
}

/// Dialoguer editor for designing forms from the command line.
#[derive(Debug, Default, Clone)]
pub struct DialoguerEditor {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl DialoguerEditor {
    /// Create a new editor with the colorful theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create an editor with plain (no color) prompts.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    fn theme(&self) -> Box<dyn Theme> {
        if self.colorful {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        }
    }

    fn ask_text(&self, prompt: &str, initial: &str, allow_empty: bool) -> Result<String, EditorError> {
        let theme = self.theme();
        let mut input = Input::<String>::with_theme(theme.as_ref())
            .with_prompt(prompt)
            .allow_empty(allow_empty);
        if !initial.is_empty() {
            input = input.with_initial_text(initial);
        }
        prompt_result(input.interact_text())
    }

    fn ask_number(&self, prompt: &str, default: f64) -> Result<f64, EditorError> {
        let theme = self.theme();
        prompt_result(
            Input::<f64>::with_theme(theme.as_ref())
                .with_prompt(prompt)
                .default(default)
                .validate_with(|n: &f64| finite_number(*n))
                .interact_text(),
        )
    }

    fn ask_index(&self, prompt: &str, items: &[String], default: usize) -> Result<usize, EditorError> {
        let theme = self.theme();
        prompt_result(
            Select::with_theme(theme.as_ref())
                .with_prompt(prompt)
                .items(items)
                .default(default)
                .interact(),
        )
    }

    fn ask_field_type(&self) -> Result<FieldType, EditorError> {
        let labels: Vec<&str> = FieldType::ALL.iter().map(|t| t.label()).collect();
        let theme = self.theme();
        let idx = prompt_result(
            FuzzySelect::with_theme(theme.as_ref())
                .with_prompt("Type de champ")
                .items(&labels)
                .default(0)
                .interact(),
        )?;
        Ok(FieldType::ALL[idx])
    }

    fn ask_name(&self, draft: &mut FieldDraft) -> Result<(), EditorError> {
        draft.field_name = self.ask_text("Nom du champ", &draft.field_name, true)?;
        Ok(())
    }

    /// Ask option values one per line, an empty line ends the list.
    fn ask_options(&self, draft: &mut FieldDraft) -> Result<(), EditorError> {
        draft.options.clear();
        println!(
            "Options (min. {}), une par ligne, ligne vide pour terminer",
            draft.field_type.min_options()
        );
        loop {
            let prompt = format!("  Option {}", draft.options.len() + 1);
            let value = self.ask_text(&prompt, "", true)?;
            if value.trim().is_empty() {
                return Ok(());
            }
            let idx = draft.add_option();
            draft.update_option(idx, value).map_err(AppError::from)?;
        }
    }

    fn ask_bounds(&self, draft: &mut FieldDraft) -> Result<(), EditorError> {
        draft.min = self.ask_number("Min", draft.min)?;
        draft.max = self.ask_number("Max", draft.max)?;
        Ok(())
    }

    /// Prompt for one new field until the draft is accepted.
    pub fn prompt_field(&self) -> Result<Field, EditorError> {
        let mut draft = FieldDraft::for_type(self.ask_field_type()?);

        self.ask_name(&mut draft)?;
        if draft.field_type.has_options() {
            self.ask_options(&mut draft)?;
        }
        if draft.field_type.is_numeric() {
            self.ask_bounds(&mut draft)?;
        }

        let theme = self.theme();
        draft.required = prompt_result(
            Confirm::with_theme(theme.as_ref())
                .with_prompt("Obligatoire ?")
                .default(draft.required)
                .interact(),
        )?;

        loop {
            match draft.build() {
                Ok(field) => return Ok(field),
                Err(err) => {
                    println!("Error: {err}");
                    match retry_step(&err) {
                        Step::Name => self.ask_name(&mut draft)?,
                        Step::Options => self.ask_options(&mut draft)?,
                        Step::Bounds => self.ask_bounds(&mut draft)?,
                    }
                }
            }
        }
    }

    fn field_names<S: Storage>(app: &FormBuilder<S>) -> Vec<String> {
        app.current()
            .fields()
            .iter()
            .enumerate()
            .map(|(idx, field)| format!("{}. {}", idx + 1, preview::describe_field(field)))
            .collect()
    }

    /// Run the design menu over the form currently open in `app`.
    ///
    /// Returns the id of the saved form, or `None` if the user discarded it.
    pub fn design<S: Storage>(&self, app: &mut FormBuilder<S>) -> Result<Option<u64>, EditorError> {
        if app.mode() == Mode::Answer {
            return Err(AppError::Answering.into());
        }

        loop {
            let actions = MenuAction::available(app.current().len());
            let labels: Vec<String> = actions.iter().map(|a| a.label().to_string()).collect();
            let title = format!(
                "{} ({} champ(s))",
                app.current().form_name,
                app.current().len()
            );
            let action = actions[self.ask_index(&title, &labels, 0)?];
            tracing::debug!(?action, "design menu");

            match action {
                MenuAction::AddField => {
                    let field = self.prompt_field()?;
                    app.add_field(field)?;
                }
                MenuAction::Rename => {
                    let name = self.ask_text("Nom du formulaire", &app.current().form_name, false)?;
                    app.rename_form(name.trim())?;
                }
                MenuAction::MoveField => {
                    let names = Self::field_names(app);
                    let from = self.ask_index("Champ à déplacer", &names, 0)?;
                    let positions: Vec<String> =
                        (1..=names.len()).map(|p| format!("Position {p}")).collect();
                    let to = self.ask_index("Nouvelle position", &positions, from)?;
                    app.reorder_field(from, Some(to))?;
                }
                MenuAction::RemoveField => {
                    let names = Self::field_names(app);
                    let idx = self.ask_index("Champ à supprimer", &names, 0)?;
                    app.remove_field(idx)?;
                }
                MenuAction::Preview => {
                    println!();
                    print!("{}", preview::render_form(app.current()));
                    println!();
                }
                MenuAction::Save => match app.save_form() {
                    Ok(id) => return Ok(Some(id)),
                    Err(AppError::EmptyForm) => println!("Error: {}", AppError::EmptyForm),
                    Err(e) => return Err(e.into()),
                },
                MenuAction::Discard => {
                    app.reset_form();
                    return Ok(None);
                }
            }
        }
    }
}
