use std::sync::LazyLock;

use regex::Regex;

use crate::{Field, FieldType};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Why a field value was rejected.
///
/// The `Display` text is the message shown next to the input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("Ce champ est obligatoire")]
    Required,

    /// NaN or infinite; JSON cannot store these.
    #[error("Nombre invalide")]
    NotFinite,

    #[error("La valeur doit être supérieure ou égale à {0}")]
    BelowMin(f64),

    #[error("La valeur doit être inférieure ou égale à {0}")]
    AboveMax(f64),

    #[error("Adresse email invalide")]
    InvalidEmail,
}

/// Check an email address against the accepted pattern.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Validate the current value of a field.
///
/// Rules, first failure wins:
/// 1. a required field must not be empty,
/// 2. a numeric value must be finite,
/// 3. a numeric value must be at least `min`,
/// 4. a numeric value must be at most `max`,
/// 5. a non-empty email value must look like an address.
pub fn validate_field(field: &Field) -> Result<(), FieldError> {
    if field.required && field.value.is_empty() {
        return Err(FieldError::Required);
    }

    if let Some(n) = field.value.as_number() {
        if !n.is_finite() {
            return Err(FieldError::NotFinite);
        }
        if let Some(min) = field.min
            && n < min
        {
            return Err(FieldError::BelowMin(min));
        }
        if let Some(max) = field.max
            && n > max
        {
            return Err(FieldError::AboveMax(max));
        }
    }

    if field.field_type == FieldType::Email
        && let Some(address) = field.value.as_str()
        && !address.is_empty()
        && !is_valid_email(address)
    {
        return Err(FieldError::InvalidEmail);
    }

    Ok(())
}
