use formbuilder_types::{FieldOption, FieldType, FormData, initialize_field};

/// Minimum number of guests per registration.
pub const MIN_GUESTS: f64 = 1.0;

/// Maximum number of guests per registration.
pub const MAX_GUESTS: f64 = 10.0;

/// Registration to an event: attendee, date, session and guest count.
pub fn event_registration() -> FormData {
    let sessions = ["matin", "après-midi"]
        .into_iter()
        .map(FieldOption::new)
        .collect();

    FormData::new("Inscription à l'événement")
        .with_field(initialize_field(FieldType::Text, "participant", true, 0.0, 100.0, vec![]))
        .with_field(initialize_field(FieldType::Email, "email", true, 0.0, 100.0, vec![]))
        .with_field(initialize_field(FieldType::Date, "date", true, 0.0, 100.0, vec![]))
        .with_field(initialize_field(FieldType::Radio, "session", true, 0.0, 100.0, sessions))
        .with_field(initialize_field(
            FieldType::Number,
            "invités",
            true,
            MIN_GUESTS,
            MAX_GUESTS,
            vec![],
        ))
}
