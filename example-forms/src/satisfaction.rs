use formbuilder_types::{FieldOption, FieldType, FormData, initialize_field};

fn options(values: &[&str]) -> Vec<FieldOption> {
    values.iter().copied().map(FieldOption::new).collect()
}

/// Short satisfaction survey with a 1 to 10 score.
pub fn satisfaction_survey() -> FormData {
    FormData::new("Satisfaction")
        .with_field(initialize_field(FieldType::Range, "note", true, 1.0, 10.0, vec![]))
        .with_field(initialize_field(
            FieldType::Select,
            "fréquence",
            false,
            0.0,
            100.0,
            options(&["quotidienne", "hebdomadaire", "mensuelle"]),
        ))
        .with_field(initialize_field(
            FieldType::Checkbox,
            "points forts",
            false,
            0.0,
            100.0,
            options(&["prix", "qualité", "service"]),
        ))
        .with_field(initialize_field(FieldType::Text, "commentaire", false, 0.0, 100.0, vec![]))
}
