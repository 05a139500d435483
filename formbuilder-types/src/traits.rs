use crate::{Field, FieldError, FieldValue, FillError, FormData};

/// Trait for renderers that let a user fill in a form.
///
/// Backends receive a `FormData` and return one value per field, in field
/// order. They decide how to present the form and handle validation
/// internally in retry loops.
pub trait FormBackend {
    /// The error type for this backend.
    type Error: Into<FillError>;

    /// Collect values for every field of `form`.
    ///
    /// # Arguments
    /// * `form` - The form to fill; current field values are the starting point
    /// * `validate` - Validates a candidate field (the template with the
    ///   entered value in place)
    ///
    /// # Returns
    /// * `Ok(values)` with exactly one value per field
    /// * `Err` on cancellation or backend failure
    fn collect(
        &self,
        form: &FormData,
        validate: &dyn Fn(&Field) -> Result<(), FieldError>,
    ) -> Result<Vec<FieldValue>, Self::Error>;
}
