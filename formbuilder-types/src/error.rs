/// Error type for filling a form through a backend.
#[derive(Debug, thiserror::Error)]
pub enum FillError {
    /// User cancelled the form (Esc, Ctrl+C, closed window, etc.)
    #[error("Form cancelled by user")]
    Cancelled,

    /// A backend returned a different number of values than the form has fields.
    #[error("Backend returned {actual} values for {expected} fields")]
    ValueCount { expected: usize, actual: usize },

    /// Backend-specific failure (I/O, UI framework crash, etc.)
    #[error("Backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl FillError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }

    /// Check if this error represents user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
