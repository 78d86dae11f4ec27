//! Text style shared by notes and checklist items.

use crate::model::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// Display style for note bodies and checklist items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    #[default]
    Normal,
    Bold,
    Italic,
}

impl TextStyle {
    /// Stable storage value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Bold => "bold",
            Self::Italic => "italic",
        }
    }

    /// Parses a style from transport input.
    ///
    /// Blank input means "not set" and resolves to [`TextStyle::Normal`].
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "normal" => Ok(Self::Normal),
            "bold" => Ok(Self::Bold),
            "italic" => Ok(Self::Italic),
            _ => Err(ValidationError::InvalidStyle(value.to_string())),
        }
    }

    pub(crate) fn from_db(value: &str) -> Option<Self> {
        match value {
            "normal" => Some(Self::Normal),
            "bold" => Some(Self::Bold),
            "italic" => Some(Self::Italic),
            _ => None,
        }
    }
}
