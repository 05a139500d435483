//! HTML form generator implementation.

use formbuilder::{Field, FieldType, FieldValue, FormData};

/// Options for HTML generation.
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Title for the HTML document. Defaults to the form name.
    pub title: Option<String>,
    /// Whether to include default CSS styling.
    pub include_styles: bool,
    /// Whether to generate a complete HTML document (with html/head/body tags).
    pub full_document: bool,
    /// Whether the current field values are filled in.
    pub prefill: bool,
    /// Custom CSS class prefix for all generated elements.
    pub class_prefix: String,
}

impl HtmlOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self {
            title: None,
            include_styles: true,
            full_document: true,
            prefill: true,
            class_prefix: "form".to_string(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable default CSS styling.
    pub fn with_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }

    /// Generate a complete HTML document or just the form fragment.
    pub fn full_document(mut self, full: bool) -> Self {
        self.full_document = full;
        self
    }

    /// Fill in the current field values, or leave every control empty.
    pub fn with_prefill(mut self, prefill: bool) -> Self {
        self.prefill = prefill;
        self
    }

    /// Set a custom CSS class prefix.
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }
}

/// Generate an HTML document for `form` with default options.
pub fn to_html(form: &FormData) -> String {
    to_html_with_options(form, &HtmlOptions::new())
}

/// Generate HTML for `form` with custom options.
pub fn to_html_with_options(form: &FormData, options: &HtmlOptions) -> String {
    let mut html = String::new();
    let prefix = &options.class_prefix;
    let title = options.title.as_deref().unwrap_or(&form.form_name);

    if options.full_document {
        html.push_str("<!DOCTYPE html>\n<html lang=\"fr\">\n<head>\n");
        html.push_str("  <meta charset=\"UTF-8\">\n");
        html.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(&format!("  <title>{}</title>\n", escape_html(title)));

        if options.include_styles {
            html.push_str(&generate_styles(prefix));
        }

        html.push_str("</head>\n<body>\n");
    }

    html.push_str(&format!(
        "<form class=\"{prefix}-form\" data-form-id=\"{}\">\n",
        form.id
    ));
    html.push_str(&format!(
        "  <h1 class=\"{prefix}-title\">{}</h1>\n",
        escape_html(title)
    ));

    html.push_str(&format!("  <div class=\"{prefix}-fields\">\n"));
    for (idx, field) in form.fields().iter().enumerate() {
        html.push_str(&generate_field(field, idx, prefix, options.prefill));
    }
    html.push_str("  </div>\n");

    html.push_str(&format!(
        "  <button type=\"submit\" class=\"{prefix}-submit\">Envoyer</button>\n"
    ));
    html.push_str("</form>\n");

    if options.full_document {
        html.push_str("</body>\n</html>\n");
    }

    html
}

fn label_text(field: &Field, prefix: &str) -> String {
    let mut label = escape_html(&field.display_name());
    if field.required {
        label.push_str(&format!(" <span class=\"{prefix}-required\">*</span>"));
    }
    label
}

fn number_attr(name: &str, value: Option<f64>) -> String {
    value
        .map(|v| format!(" {name}=\"{}\"", FieldValue::Number(v)))
        .unwrap_or_default()
}

/// Generate HTML for a single field.
fn generate_field(field: &Field, idx: usize, prefix: &str, prefill: bool) -> String {
    const IND: &str = "    ";

    let field_id = format!("{prefix}-field-{idx}");
    let name = escape_html(&field.field_name);
    let label = label_text(field, prefix);
    let required = if field.required { " required" } else { "" };
    let value = prefill.then_some(&field.value);

    let mut html = String::new();

    match field.field_type {
        FieldType::Text
        | FieldType::Email
        | FieldType::Date
        | FieldType::File
        | FieldType::Number
        | FieldType::Range => {
            let mut attrs = format!(
                "type=\"{}\" id=\"{field_id}\" name=\"{name}\" class=\"{prefix}-input\"",
                field.field_type.as_str()
            );
            if field.field_type.is_numeric() {
                attrs.push_str(&number_attr("min", field.min));
                attrs.push_str(&number_attr("max", field.max));
                attrs.push_str(" step=\"1\"");
            }
            // A file input cannot carry a value
            if field.field_type != FieldType::File
                && let Some(value) = value.filter(|v| !v.is_empty())
            {
                attrs.push_str(&format!(" value=\"{}\"", escape_html(&value.to_string())));
            }

            html.push_str(&format!("{IND}<div class=\"{prefix}-field\">\n"));
            html.push_str(&format!("{IND}  <label for=\"{field_id}\">{label}</label>\n"));
            html.push_str(&format!("{IND}  <input {attrs}{required}>\n"));
            html.push_str(&format!("{IND}</div>\n"));
        }

        FieldType::Select => {
            let current = value.and_then(FieldValue::as_str);

            html.push_str(&format!("{IND}<div class=\"{prefix}-field\">\n"));
            html.push_str(&format!("{IND}  <label for=\"{field_id}\">{label}</label>\n"));
            html.push_str(&format!(
                "{IND}  <select id=\"{field_id}\" name=\"{name}\" class=\"{prefix}-input\"{required}>\n"
            ));
            for option in field.option_values() {
                let selected = if current == Some(option) { " selected" } else { "" };
                let option = escape_html(option);
                html.push_str(&format!(
                    "{IND}    <option value=\"{option}\"{selected}>{option}</option>\n"
                ));
            }
            html.push_str(&format!("{IND}  </select>\n"));
            html.push_str(&format!("{IND}</div>\n"));
        }

        FieldType::Radio | FieldType::Checkbox => {
            let is_radio = field.field_type == FieldType::Radio;
            let (kind, group) = if is_radio {
                ("radio", "oneof")
            } else {
                ("checkbox", "anyof")
            };
            let checked_values: Vec<&str> = match value {
                Some(FieldValue::Text(text)) => vec![text.as_str()],
                Some(FieldValue::List(items)) => items.iter().map(String::as_str).collect(),
                _ => Vec::new(),
            };
            // HTML has no required checkbox group, a script can check the marker
            let group_required = if field.required && !is_radio {
                " data-required=\"true\""
            } else {
                ""
            };
            let input_name = if is_radio {
                name.clone()
            } else {
                format!("{name}[]")
            };

            html.push_str(&format!(
                "{IND}<fieldset id=\"{field_id}\" class=\"{prefix}-fieldset {prefix}-{group}\"{group_required}>\n"
            ));
            html.push_str(&format!("{IND}  <legend>{label}</legend>\n"));

            for (opt_idx, option) in field.option_values().enumerate() {
                let option_id = format!("{field_id}-{opt_idx}");
                let checked = if checked_values.contains(&option) {
                    " checked"
                } else {
                    ""
                };
                let option_required = if is_radio && opt_idx == 0 { required } else { "" };
                let option = escape_html(option);

                html.push_str(&format!("{IND}  <div class=\"{prefix}-{kind}-option\">\n"));
                html.push_str(&format!(
                    "{IND}    <input type=\"{kind}\" id=\"{option_id}\" name=\"{input_name}\" value=\"{option}\"{checked}{option_required}>\n"
                ));
                html.push_str(&format!(
                    "{IND}    <label for=\"{option_id}\">{option}</label>\n"
                ));
                html.push_str(&format!("{IND}  </div>\n"));
            }

            html.push_str(&format!("{IND}</fieldset>\n"));
        }
    }

    html
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate default CSS styles.
fn generate_styles(prefix: &str) -> String {
    format!(
        r#"  <style>
    .{prefix}-form {{
      max-width: 600px;
      margin: 2rem auto;
      padding: 1rem;
      font-family: sans-serif;
    }}
    .{prefix}-field {{
      margin: 0.75rem 0;
    }}
    .{prefix}-field label {{
      display: block;
      margin-bottom: 0.25rem;
    }}
    .{prefix}-input {{
      width: 100%;
      padding: 0.5rem;
      box-sizing: border-box;
    }}
    .{prefix}-required {{
      color: #c00;
    }}
    .{prefix}-fieldset {{
      margin: 1rem 0;
      padding: 1rem;
    }}
    .{prefix}-radio-option, .{prefix}-checkbox-option {{
      margin: 0.25rem 0;
    }}
    .{prefix}-submit {{
      margin-top: 1rem;
      padding: 0.5rem 1rem;
    }}
  </style>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use example_forms::{contact_form, every_field, satisfaction_survey};
    use formbuilder::{FieldOption, initialize_field};

    #[test]
    fn html_options_chaining() {
        let options = HtmlOptions::new()
            .with_title("Test Form")
            .with_styles(false)
            .full_document(true)
            .with_prefill(false)
            .with_class_prefix("my-form");

        assert_eq!(options.title, Some("Test Form".to_string()));
        assert!(!options.include_styles);
        assert!(options.full_document);
        assert!(!options.prefill);
        assert_eq!(options.class_prefix, "my-form");
    }

    #[test]
    fn full_document_uses_form_name() {
        let html = to_html(&contact_form());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Contact</title>"));
        assert!(html.contains("<style>"));
        assert!(html.contains("Envoyer</button>"));
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn fragment_only() {
        let options = HtmlOptions::new().full_document(false);
        let html = to_html_with_options(&contact_form(), &options);
        assert!(html.starts_with("<form class=\"form-form\""));
        assert!(!html.contains("<html"));
    }

    #[test]
    fn controls_match_field_types() {
        let html = to_html_with_options(&every_field(), &HtmlOptions::new().with_styles(false));

        assert!(html.contains("type=\"text\" id=\"form-field-0\" name=\"text\""));
        assert!(html.contains("type=\"email\""));
        assert!(html.contains("type=\"date\""));
        assert!(html.contains("type=\"file\""));
        assert!(html.contains("type=\"number\" id=\"form-field-5\" name=\"number\" class=\"form-input\" min=\"0\" max=\"100\""));
        assert!(html.contains("type=\"range\""));
        assert!(html.contains("<select id=\"form-field-2\""));
        assert!(html.contains("<option value=\"un\" selected>un</option>"));
        assert!(html.contains("type=\"radio\" id=\"form-field-3-0\" name=\"radio\" value=\"un\" checked required>"));
        assert!(html.contains("type=\"checkbox\" id=\"form-field-1-0\" name=\"checkbox[]\" value=\"un\" checked>"));
        assert!(html.contains("data-required=\"true\""));
    }

    #[test]
    fn optional_fields_are_not_required() {
        let html = to_html_with_options(
            &contact_form(),
            &HtmlOptions::new().with_styles(false).with_prefill(false),
        );
        assert!(html.contains("name=\"nom\" class=\"form-input\" required>"));
        assert!(html.contains("name=\"email\" class=\"form-input\">"));
    }

    #[test]
    fn prefill_values() {
        let mut form = satisfaction_survey();
        form.fields[0].value = FieldValue::Number(7.0);

        let html = to_html_with_options(&form, &HtmlOptions::new());
        assert!(html.contains("min=\"1\" max=\"10\" step=\"1\" value=\"7\""));

        let html = to_html_with_options(&form, &HtmlOptions::new().with_prefill(false));
        assert!(!html.contains("value=\"7\""));
        assert!(!html.contains(" checked"));
    }

    #[test]
    fn escapes_user_text() {
        let form = FormData::new("<Q&A>").with_field(initialize_field(
            FieldType::Select,
            "choix \"x\"",
            false,
            0.0,
            100.0,
            vec![FieldOption::new("a<b"), FieldOption::new("c")],
        ));
        let html = to_html(&form);
        assert!(html.contains("<title>&lt;Q&amp;A&gt;</title>"));
        assert!(html.contains("name=\"choix &quot;x&quot;\""));
        assert!(html.contains("<option value=\"a&lt;b\" selected>a&lt;b</option>"));
    }

    #[test]
    fn escape_html_replaces_all_specials() {
        assert_eq!(escape_html("<a href='x'>&\"</a>"), "&lt;a href=&#39;x&#39;&gt;&amp;&quot;&lt;/a&gt;");
    }
}
