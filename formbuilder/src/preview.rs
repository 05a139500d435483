//! Plain-text rendering of forms and answers.

use std::fmt::Write;

use crate::{Field, FieldType, FormData};

/// Describe one field on a single line: label, type and constraints.
pub fn describe_field(field: &Field) -> String {
    let mut line = format!("{} ({})", field.display_name(), field.field_type.label());

    match field.field_type {
        FieldType::Number | FieldType::Range => {
            if let (Some(min), Some(max)) = (field.min, field.max) {
                let _ = write!(line, " [{min} - {max}]");
            }
        }
        FieldType::Select | FieldType::Radio | FieldType::Checkbox => {
            let options: Vec<&str> = field.option_values().collect();
            let _ = write!(line, " : {}", options.join(" | "));
        }
        _ => {}
    }

    if field.required {
        line.push_str(" *");
    }
    line
}

/// Render a form as a numbered list of its fields under its name.
pub fn render_form(form: &FormData) -> String {
    let mut out = format!("{}\n", form.form_name);
    if form.is_empty() {
        out.push_str("  (aucun champ)\n");
        return out;
    }
    for (index, field) in form.fields().iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, describe_field(field));
        if let Some(message) = &field.error_message {
            let _ = writeln!(out, "     ! {message}");
        }
    }
    out
}

/// Render a stored answer as `Field: value` lines.
pub fn render_answer(answer: &FormData) -> String {
    let mut out = String::new();
    for field in answer.fields() {
        let _ = writeln!(out, "{}: {}", field.display_name(), field.value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldOption, initialize_field};

    #[test]
    fn form_lines() {
        let form = FormData::new("Inscription")
            .with_field(initialize_field(FieldType::Text, "nom", true, 0.0, 100.0, vec![]))
            .with_field(initialize_field(FieldType::Range, "note", false, 1.0, 5.0, vec![]))
            .with_field(initialize_field(
                FieldType::Radio,
                "choix",
                false,
                0.0,
                100.0,
                vec![FieldOption::new("oui"), FieldOption::new("non")],
            ));

        assert_eq!(
            render_form(&form),
            "Inscription\n\
             \x20 1. Nom (Texte) *\n\
             \x20 2. Note (Plage d'entrée) [1 - 5]\n\
             \x20 3. Choix (Choix multiple) : oui | non\n"
        );
    }

    #[test]
    fn empty_form() {
        assert_eq!(render_form(&FormData::new("Vide")), "Vide\n  (aucun champ)\n");
    }

    #[test]
    fn answer_lines() {
        let mut nom = initialize_field(FieldType::Text, "nom", true, 0.0, 100.0, vec![]);
        nom.value = "alice".into();
        let mut loisirs = initialize_field(
            FieldType::Checkbox,
            "loisirs",
            false,
            0.0,
            100.0,
            vec![FieldOption::new("sport"), FieldOption::new("lecture")],
        );
        loisirs.value = vec!["sport".to_string(), "lecture".to_string()].into();
        let age = initialize_field(FieldType::Number, "age", false, 18.0, 99.0, vec![]);

        let answer = FormData::new("x")
            .with_field(nom)
            .with_field(loisirs)
            .with_field(age);

        assert_eq!(
            render_answer(&answer),
            "Nom: alice\nLoisirs: sport, lecture\nAge: 18\n"
        );
    }
}
