use formbuilder_types::{FieldOption, FieldType, FormData, initialize_field};

/// One required field of every type, in palette order.
pub fn every_field() -> FormData {
    FieldType::ALL
        .into_iter()
        .fold(FormData::new("Tous les champs"), |form, field_type| {
            let options = if field_type.has_options() {
                vec![FieldOption::new("un"), FieldOption::new("deux")]
            } else {
                Vec::new()
            };
            form.with_field(initialize_field(
                field_type,
                field_type.as_str(),
                true,
                0.0,
                100.0,
                options,
            ))
        })
}
