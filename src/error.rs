//! Error types for parsing and field validation.
//!
//! Every failure is returned as a value. Messages are deterministic and name
//! the document (source/target) and the condition that failed, so callers can
//! show them to the user verbatim.

use crate::CONTROLS_FIELD;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Parse errors
    EmptyInput,
    MalformedJson,
    InputTooLarge,
    NestingTooDeep,

    // Field errors
    MissingControls,
    SourceMissingControls,
    TargetNotObject,
}

impl ErrorCode {
    /// True for codes produced while turning text into JSON.
    pub fn is_parse(self) -> bool {
        matches!(
            self,
            ErrorCode::EmptyInput
                | ErrorCode::MalformedJson
                | ErrorCode::InputTooLarge
                | ErrorCode::NestingTooDeep
        )
    }
}

/// Which input document an error refers to.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Source,
    Target,
    /// A standalone document being validated.
    Input,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Source => write!(f, "source"),
            Role::Target => write!(f, "target"),
            Role::Input => write!(f, "input"),
        }
    }
}

/// Input text could not be turned into a JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input: no JSON text provided")]
    Empty,

    #[error("malformed JSON at line {line}, column {column}: {message}")]
    Malformed {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("input is {len} bytes, larger than the {limit} byte limit")]
    TooLarge { len: usize, limit: usize },

    #[error("JSON nesting is deeper than the limit of {limit} levels")]
    TooDeep { limit: usize },
}

impl ParseError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::Empty => ErrorCode::EmptyInput,
            ParseError::Malformed { .. } => ErrorCode::MalformedJson,
            ParseError::TooLarge { .. } => ErrorCode::InputTooLarge,
            ParseError::TooDeep { .. } => ErrorCode::NestingTooDeep,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        // serde_json appends " at line L column C"; position is kept in its own fields
        let full = err.to_string();
        let suffix = format!(" at line {} column {}", err.line(), err.column());
        let message = full.strip_suffix(&suffix).unwrap_or(&full).to_string();
        ParseError::Malformed {
            line: err.line(),
            column: err.column(),
            message,
        }
    }
}

/// Parsed JSON does not have the shape an operation requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("missing {} field", CONTROLS_FIELD)]
    MissingControls,

    #[error("source missing {} field", CONTROLS_FIELD)]
    SourceMissingControls,

    #[error("target is not a settings object")]
    TargetNotObject,
}

impl FieldError {
    pub fn code(&self) -> ErrorCode {
        match self {
            FieldError::MissingControls => ErrorCode::MissingControls,
            FieldError::SourceMissingControls => ErrorCode::SourceMissingControls,
            FieldError::TargetNotObject => ErrorCode::TargetNotObject,
        }
    }
}

/// Error returned by the text-in/text-out operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlsError {
    #[error("{role}: {error}")]
    Parse {
        role: Role,
        error: ParseError,
    },

    #[error(transparent)]
    Field(#[from] FieldError),
}

impl ControlsError {
    pub fn parse(role: Role, error: ParseError) -> Self {
        ControlsError::Parse { role, error }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ControlsError::Parse { error, .. } => error.code(),
            ControlsError::Field(err) => err.code(),
        }
    }
}

/// Result type for controls operations.
pub type ControlsResult<T> = std::result::Result<T, ControlsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_error_messages() {
        assert_eq!(
            FieldError::MissingControls.to_string(),
            "missing controls field"
        );
        assert_eq!(
            FieldError::SourceMissingControls.to_string(),
            "source missing controls field"
        );
        assert_eq!(
            FieldError::TargetNotObject.to_string(),
            "target is not a settings object"
        );
    }

    #[test]
    fn test_parse_error_names_document() {
        let err = ControlsError::parse(Role::Target, ParseError::Empty);
        assert_eq!(err.to_string(), "target: empty input: no JSON text provided");
        assert_eq!(err.code(), ErrorCode::EmptyInput);
        assert!(err.code().is_parse());
    }

    #[test]
    fn test_malformed_from_serde_error_keeps_position() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{\n  \"a\": }").unwrap_err();
        let err = ParseError::from(serde_err);
        match &err {
            ParseError::Malformed { line, column, message } => {
                assert_eq!(*line, 2);
                assert!(*column > 0);
                assert!(!message.contains("at line"));
            }
            other => panic!("expected Malformed, got {:?}", other),
        }
        assert!(err.to_string().starts_with("malformed JSON at line 2"));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::SourceMissingControls).unwrap();
        assert_eq!(json, "\"SOURCE_MISSING_CONTROLS\"");
        assert!(!ErrorCode::TargetNotObject.is_parse());
    }
}
