//! Error types for pgfrag

use thiserror::Error;

/// Result type alias for fragment building.
pub type FragResult<T> = Result<T, FragError>;

/// What was wrong with the caller's input.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputErrorKind {
    /// Input is not a JSON object (or is an array).
    Shape,
    /// Input has no fields.
    Empty,
    /// Filter key is not recognized.
    UnknownField,
    /// Value has the wrong type for its field.
    Type,
    /// Lower bound is greater than upper bound.
    Range,
    /// Column name cannot be used as an identifier.
    Identifier,
}

impl InputErrorKind {
    /// Message used when the caller does not supply one.
    pub fn default_message(self) -> &'static str {
        match self {
            Self::Shape => "Bad Request",
            Self::Empty => "No data",
            Self::UnknownField => "Unknown field",
            Self::Type => "Invalid value type",
            Self::Range => "Invalid range",
            Self::Identifier => "Invalid identifier",
        }
    }
}

/// Error types for fragment building
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FragError {
    /// Caller-supplied data could not be turned into a fragment.
    #[error("Invalid input: {message}")]
    InvalidInput {
        kind: InputErrorKind,
        message: String,
    },

    /// Configuration could not be read or parsed
    #[error("Config error: {0}")]
    Config(String),
}

impl FragError {
    /// Create an invalid-input error with the kind's default message.
    pub fn invalid_input(kind: InputErrorKind) -> Self {
        Self::InvalidInput {
            kind,
            message: kind.default_message().to_string(),
        }
    }

    /// Create an invalid-input error with a caller-supplied message.
    pub fn invalid_input_msg(kind: InputErrorKind, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            kind,
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The input error kind, if this is an invalid-input error.
    pub fn kind(&self) -> Option<InputErrorKind> {
        match self {
            Self::InvalidInput { kind, .. } => Some(*kind),
            Self::Config(_) => None,
        }
    }

    /// Check if this is an invalid-input error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Check if this error was caused by an empty update.
    pub fn is_empty_input(&self) -> bool {
        self.kind() == Some(InputErrorKind::Empty)
    }

    /// HTTP status the web layer should answer with.
    ///
    /// Invalid input is the client's fault (400); a broken config is ours (500).
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput { .. } => 400,
            Self::Config(_) => 500,
        }
    }
}

impl From<toml::de::Error> for FragError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_messages() {
        let err = FragError::invalid_input(InputErrorKind::Empty);
        assert_eq!(err.to_string(), "Invalid input: No data");
        assert!(err.is_empty_input());

        let err = FragError::invalid_input(InputErrorKind::Shape);
        assert_eq!(err.to_string(), "Invalid input: Bad Request");
        assert!(!err.is_empty_input());
    }

    #[test]
    fn custom_message_keeps_kind() {
        let err =
            FragError::invalid_input_msg(InputErrorKind::Type, "minEmployees must be an integer");
        assert_eq!(err.kind(), Some(InputErrorKind::Type));
        assert_eq!(err.to_string(), "Invalid input: minEmployees must be an integer");
    }

    #[test]
    fn status_codes() {
        assert_eq!(FragError::invalid_input(InputErrorKind::Range).status_code(), 400);
        assert_eq!(FragError::config("missing file").status_code(), 500);
        assert!(FragError::config("x").kind().is_none());
    }
}
