//! Command implementations.
//!
//! Every command works on an opened [`FormBuilder`] and writes its report to
//! `out`, so the same code runs against the file store in the binary and
//! against a memory store in tests.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
use formbuilder::{AppError, FileStorage, FormBackend, FormBuilder, Storage, preview};
use formbuilder_dialoguer_editor::{DialoguerEditor, EditorError};
use formbuilder_html_document::{HtmlOptions, to_html_with_options};
use tracing::{debug, info};

/// Open the forms and answers stored under `data_dir`.
pub fn open(data_dir: &Path) -> Result<FormBuilder<FileStorage>> {
    debug!(dir = %data_dir.display(), "opening store");
    FormBuilder::load(FileStorage::new(data_dir))
        .with_context(|| format!("load forms from {}", data_dir.display()))
}

/// Turn a 1-based position typed by the user into an index.
fn position(value: usize, what: &str) -> Result<usize> {
    match value.checked_sub(1) {
        Some(index) => Ok(index),
        None => bail!("{what} positions start at 1"),
    }
}

fn plural(count: usize, word: &str) -> String {
    if count > 1 {
        format!("{count} {word}s")
    } else {
        format!("{count} {word}")
    }
}

pub fn list_forms<S: Storage>(app: &FormBuilder<S>, out: &mut impl Write) -> Result<()> {
    if app.forms().is_empty() {
        writeln!(out, "Aucun formulaire enregistré")?;
        return Ok(());
    }
    for form in app.forms() {
        writeln!(
            out,
            "{:>16}  {}  ({}, {})",
            form.id,
            form.form_name,
            plural(form.len(), "champ"),
            plural(app.answers_for(form.id).count(), "réponse"),
        )?;
    }
    Ok(())
}

pub fn show_form<S: Storage>(app: &FormBuilder<S>, id: u64, out: &mut impl Write) -> Result<()> {
    let form = app.form(id).ok_or(AppError::FormNotFound(id))?;
    write!(out, "{}", preview::render_form(form))?;
    Ok(())
}

/// Print answers in list order, numbered from 1 so `delete-answer` can use
/// the same number. With `form` set only answers to that form are printed.
pub fn list_answers<S: Storage>(
    app: &FormBuilder<S>,
    form: Option<u64>,
    out: &mut impl Write,
) -> Result<()> {
    let mut shown = 0;
    for (index, answer) in app.answers().iter().enumerate() {
        if form.is_some_and(|id| id != answer.id) {
            continue;
        }
        shown += 1;
        writeln!(out, "#{} {} ({})", index + 1, answer.form_name, answer.id)?;
        for line in preview::render_answer(answer).lines() {
            writeln!(out, "    {line}")?;
        }
    }
    if shown == 0 {
        writeln!(out, "Aucune réponse")?;
    }
    Ok(())
}

/// Move the field at position `from` of form `id` to position `to` and save.
pub fn move_field<S: Storage>(
    app: &mut FormBuilder<S>,
    id: u64,
    from: usize,
    to: usize,
    out: &mut impl Write,
) -> Result<()> {
    let source = position(from, "field")?;
    let destination = position(to, "field")?;

    app.edit_form(id)?;
    if let Err(err) = app.reorder_field(source, Some(destination)) {
        app.reset_form();
        return Err(err.into());
    }
    app.save_form()?;

    show_form(app, id, out)
}

pub fn delete_form<S: Storage>(
    app: &mut FormBuilder<S>,
    id: u64,
    out: &mut impl Write,
) -> Result<()> {
    let removed = app.delete_form(id)?;
    writeln!(out, "Formulaire « {} » supprimé", removed.form_name)?;
    Ok(())
}

pub fn delete_answer<S: Storage>(
    app: &mut FormBuilder<S>,
    index: usize,
    out: &mut impl Write,
) -> Result<()> {
    let removed = app.delete_answer(position(index, "answer")?)?;
    writeln!(out, "Réponse #{index} à « {} » supprimée", removed.form_name)?;
    Ok(())
}

/// Render form `id` as HTML into `output`, or into `out` when no file is given.
pub fn export_html<S: Storage>(
    app: &FormBuilder<S>,
    id: u64,
    output: Option<&Path>,
    fragment: bool,
    out: &mut impl Write,
) -> Result<()> {
    let form = app.form(id).ok_or(AppError::FormNotFound(id))?;
    let options = HtmlOptions::new().full_document(!fragment);
    let html = to_html_with_options(form, &options);

    match output {
        Some(path) => {
            fs::write(path, &html).with_context(|| format!("write {}", path.display()))?;
            info!(id, path = %path.display(), "form exported");
            writeln!(out, "Formulaire écrit dans {}", path.display())?;
        }
        None => out.write_all(html.as_bytes())?,
    }
    Ok(())
}

/// Fill form `id` through `backend` and store the answer.
///
/// Returns `false` when the user cancelled; nothing is stored then.
pub fn answer_form<S: Storage, B: FormBackend>(
    app: &mut FormBuilder<S>,
    id: u64,
    backend: &B,
    out: &mut impl Write,
) -> Result<bool> {
    app.answer_form(id)?;
    match app.answer_with(backend) {
        Ok(()) => {
            let answer = app.answers().last().context("stored answer missing")?;
            writeln!(out, "Réponse #{} enregistrée", app.answers().len())?;
            write!(out, "{}", preview::render_answer(answer))?;
            app.reset_form();
            Ok(true)
        }
        Err(AppError::Fill(err)) if err.is_cancelled() => {
            app.reset_form();
            writeln!(out, "Réponse annulée")?;
            Ok(false)
        }
        Err(err) => {
            app.reset_form();
            Err(err.into())
        }
    }
}

fn finish_design(
    result: std::result::Result<Option<u64>, EditorError>,
    out: &mut impl Write,
) -> Result<Option<u64>> {
    match result {
        Ok(Some(id)) => {
            writeln!(out, "Formulaire {id} enregistré")?;
            Ok(Some(id))
        }
        Ok(None) | Err(EditorError::Cancelled) => {
            writeln!(out, "Modifications abandonnées")?;
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

/// Design a new form with the interactive editor.
pub fn new_form<S: Storage>(
    app: &mut FormBuilder<S>,
    name: Option<&str>,
    editor: &DialoguerEditor,
    out: &mut impl Write,
) -> Result<Option<u64>> {
    app.reset_form();
    if let Some(name) = name {
        app.rename_form(name.trim())?;
    }
    finish_design(editor.design(app), out)
}

/// Change saved form `id` with the interactive editor and save it in place.
pub fn edit_form<S: Storage>(
    app: &mut FormBuilder<S>,
    id: u64,
    editor: &DialoguerEditor,
    out: &mut impl Write,
) -> Result<Option<u64>> {
    app.edit_form(id)?;
    finish_design(editor.design(app), out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbuilder::{MemoryStorage, ScriptedBackend};

    fn app_with_contact() -> (FormBuilder<MemoryStorage>, u64) {
        let mut app = FormBuilder::load(MemoryStorage::new()).unwrap();
        let form = example_forms::contact_form();
        app.rename_form(form.form_name.clone()).unwrap();
        for field in form.fields {
            app.add_field(field).unwrap();
        }
        let id = app.save_form().unwrap();
        (app, id)
    }

    fn output(run: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        run(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn positions_start_at_one() {
        assert_eq!(position(1, "field").unwrap(), 0);
        assert_eq!(
            position(0, "field").unwrap_err().to_string(),
            "field positions start at 1"
        );
    }

    #[test]
    fn plural_words() {
        assert_eq!(plural(0, "champ"), "0 champ");
        assert_eq!(plural(1, "champ"), "1 champ");
        assert_eq!(plural(3, "champ"), "3 champs");
    }

    #[test]
    fn empty_lists() {
        let app = FormBuilder::load(MemoryStorage::new()).unwrap();
        assert_eq!(
            output(|out| list_forms(&app, out)),
            "Aucun formulaire enregistré\n"
        );
        assert_eq!(output(|out| list_answers(&app, None, out)), "Aucune réponse\n");
    }

    #[test]
    fn forms_listing() {
        let (app, id) = app_with_contact();
        let text = output(|out| list_forms(&app, out));
        assert!(text.contains(&id.to_string()));
        assert!(text.contains("Contact  (3 champs, 0 réponse)"));
    }

    #[test]
    fn show_unknown_form() {
        let (app, _) = app_with_contact();
        let err = show_form(&app, 1, &mut Vec::new()).unwrap_err();
        assert_eq!(err.to_string(), "No saved form with id 1");
    }

    #[test]
    fn move_saves_in_place() {
        let (mut app, id) = app_with_contact();
        let text = output(|out| move_field(&mut app, id, 3, 1, out));
        assert!(text.starts_with("Contact\n  1. Message"));
        assert_eq!(app.forms().len(), 1);
        assert_eq!(app.store().forms().unwrap()[0].fields[0].field_name, "message");
    }

    #[test]
    fn move_out_of_range_leaves_form_alone() {
        let (mut app, id) = app_with_contact();
        assert!(move_field(&mut app, id, 9, 1, &mut Vec::new()).is_err());
        assert_eq!(app.forms()[0].fields[0].field_name, "nom");
        assert_eq!(app.mode(), formbuilder::Mode::Design);
    }

    #[test]
    fn answer_then_list_and_delete() {
        let (mut app, id) = app_with_contact();
        let backend = ScriptedBackend::new()
            .with_text("nom", "Alice")
            .with_text("email", "alice@example.fr");

        let text = output(|out| answer_form(&mut app, id, &backend, out).map(|_| ()));
        assert!(text.starts_with("Réponse #1 enregistrée\n"));
        assert!(text.contains("Nom: Alice"));

        let listed = output(|out| list_answers(&app, Some(id), out));
        assert!(listed.starts_with("#1 Contact"));
        assert!(listed.contains("    Email: alice@example.fr"));
        assert_eq!(output(|out| list_answers(&app, Some(id + 1), out)), "Aucune réponse\n");

        let deleted = output(|out| delete_answer(&mut app, 1, out));
        assert_eq!(deleted, "Réponse #1 à « Contact » supprimée\n");
        assert!(app.answers().is_empty());
    }

    #[test]
    fn invalid_answer_is_an_error() {
        let (mut app, id) = app_with_contact();
        let backend = ScriptedBackend::new().with_text("email", "pas-un-email");
        assert!(answer_form(&mut app, id, &backend, &mut Vec::new()).is_err());
        assert!(app.answers().is_empty());
        assert_eq!(app.mode(), formbuilder::Mode::Design);
    }

    #[test]
    fn delete_form_reports_name() {
        let (mut app, id) = app_with_contact();
        let text = output(|out| delete_form(&mut app, id, out));
        assert_eq!(text, "Formulaire « Contact » supprimé\n");
        assert!(app.forms().is_empty());
    }

    #[test]
    fn html_to_stdout_and_file() {
        let (app, id) = app_with_contact();
        let html = output(|out| export_html(&app, id, None, true, out));
        assert!(html.starts_with("<form"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contact.html");
        let text = output(|out| export_html(&app, id, Some(&path), false, out));
        assert!(text.starts_with("Formulaire écrit dans"));
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
    }
}
