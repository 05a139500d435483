use formbuilder_types::{FieldType, FormData, initialize_field};

/// Name, email and message. Only the name is required.
pub fn contact_form() -> FormData {
    FormData::new("Contact")
        .with_field(initialize_field(FieldType::Text, "nom", true, 0.0, 100.0, vec![]))
        .with_field(initialize_field(FieldType::Email, "email", false, 0.0, 100.0, vec![]))
        .with_field(initialize_field(FieldType::Text, "message", false, 0.0, 100.0, vec![]))
}
