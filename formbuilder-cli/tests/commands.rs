//! Commands against a data directory on disk.

use formbuilder::ScriptedBackend;
use formbuilder_cli::commands;

fn run(f: impl FnOnce(&mut Vec<u8>) -> anyhow::Result<()>) -> String {
    let mut buf = Vec::new();
    f(&mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

fn seed(dir: &std::path::Path) -> u64 {
    let mut app = commands::open(dir).unwrap();
    let form = example_forms::satisfaction_survey();
    app.rename_form(form.form_name.clone()).unwrap();
    for field in form.fields {
        app.add_field(field).unwrap();
    }
    app.save_form().unwrap()
}

#[test]
fn fresh_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let app = commands::open(&dir.path().join("not-yet-created")).unwrap();
    assert!(app.forms().is_empty());
    assert!(app.answers().is_empty());
}

#[test]
fn answers_survive_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let id = seed(dir.path());

    {
        let mut app = commands::open(dir.path()).unwrap();
        let backend = ScriptedBackend::new()
            .with_number("note", 9.0)
            .with_text("commentaire", "Très bien");
        let stored = commands::answer_form(&mut app, id, &backend, &mut Vec::new()).unwrap();
        assert!(stored);
    }

    let app = commands::open(dir.path()).unwrap();
    let listed = run(|out| commands::list_answers(&app, None, out));
    assert!(listed.starts_with("#1 Satisfaction"));
    assert!(listed.contains("    Note: 9"));
    assert!(listed.contains("    Commentaire: Très bien"));

    let forms = run(|out| commands::list_forms(&app, out));
    assert!(forms.contains("Satisfaction  (4 champs, 1 réponse)"));
}

#[test]
fn moved_field_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let id = seed(dir.path());

    let mut app = commands::open(dir.path()).unwrap();
    run(|out| commands::move_field(&mut app, id, 4, 1, out));

    let app = commands::open(dir.path()).unwrap();
    let shown = run(|out| commands::show_form(&app, id, out));
    assert!(shown.starts_with("Satisfaction\n  1. Commentaire (Texte)"));
}

#[test]
fn deleting_a_form_keeps_its_answers() {
    let dir = tempfile::tempdir().unwrap();
    let id = seed(dir.path());

    let mut app = commands::open(dir.path()).unwrap();
    commands::answer_form(&mut app, id, &ScriptedBackend::new(), &mut Vec::new()).unwrap();
    run(|out| commands::delete_form(&mut app, id, out));

    let app = commands::open(dir.path()).unwrap();
    assert!(app.forms().is_empty());
    assert_eq!(app.answers().len(), 1);
}

#[test]
fn stored_documents_use_the_storage_keys() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());
    assert!(dir.path().join("allForms.json").exists());
    assert!(!dir.path().join("allAnswers.json").exists());
}
