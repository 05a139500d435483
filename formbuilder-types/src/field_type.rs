use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The kind of input a field collects.
///
/// Serialized in lowercase (`"text"`, `"checkbox"`, ...) so stored forms stay
/// readable and compatible with the browser version of the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line text input.
    Text,

    /// Pick any number of options.
    Checkbox,

    /// Pick exactly one option, all options visible.
    Radio,

    /// Pick exactly one option from a drop-down list.
    Select,

    /// Numeric input with bounds.
    Number,

    /// Calendar date (`YYYY-MM-DD`).
    Date,

    /// Email address.
    Email,

    /// File reference (path or file name).
    File,

    /// Numeric slider with bounds.
    Range,
}

impl FieldType {
    /// All field types, in the order the palette lists them.
    pub const ALL: [FieldType; 9] = [
        Self::Text,
        Self::Checkbox,
        Self::Select,
        Self::Radio,
        Self::Email,
        Self::Number,
        Self::Date,
        Self::File,
        Self::Range,
    ];

    /// The identifier used in stored JSON and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Select => "select",
            Self::Number => "number",
            Self::Date => "date",
            Self::Email => "email",
            Self::File => "file",
            Self::Range => "range",
        }
    }

    /// The label shown in the palette.
    pub fn label(self) -> &'static str {
        match self {
            Self::Text => "Texte",
            Self::Checkbox => "Case à cocher",
            Self::Select => "Liste déroulante",
            Self::Radio => "Choix multiple",
            Self::Email => "Email",
            Self::Number => "Nombre",
            Self::Date => "Date",
            Self::File => "Fichier",
            Self::Range => "Plage d'entrée",
        }
    }

    /// Whether fields of this type carry a list of options.
    pub fn has_options(self) -> bool {
        matches!(self, Self::Select | Self::Radio | Self::Checkbox)
    }

    /// Whether fields of this type carry `min`/`max` bounds and a numeric value.
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Number | Self::Range)
    }

    /// Minimum number of options the editor accepts for this type.
    pub fn min_options(self) -> usize {
        match self {
            Self::Checkbox => 1,
            Self::Radio | Self::Select => 2,
            _ => 0,
        }
    }

    /// Whether a freshly chosen field of this type starts out required.
    pub fn required_by_default(self) -> bool {
        matches!(self, Self::Date | Self::Radio | Self::Range)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown field type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown field type '{0}'")]
pub struct ParseFieldTypeError(pub String);

impl FromStr for FieldType {
    type Err = ParseFieldTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFieldTypeError(s.to_string()))
    }
}
