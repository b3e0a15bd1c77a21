use crate::obs::sink::{self, MetricsEvent};
use derive_more::Display;
use fieldkit_primitives::ExpressionKind;
use thiserror::Error as ThisError;

///
/// Error
///
/// Structured error carrying a stable classification and the component that
/// raised it. Every failure surfaced by fieldkit is one of these.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured detail; the variant must correspond to `class`.
    pub detail: Option<ErrorDetail>,
}

impl Error {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// A nullable expression was asked for a value it reports as absent.
    pub(crate) fn value_required(kind: ExpressionKind) -> Self {
        sink::record(MetricsEvent::ValueRequired { kind });

        Self {
            class: ErrorClass::ValueRequired,
            origin: ErrorOrigin::Expression,
            message: format!("value required: {kind} expression produced no value"),
            detail: Some(ErrorDetail::ValueRequired { kind }),
        }
    }

    /// Construct an invalid-argument error for a specific origin.
    pub(crate) fn invalid_argument(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvalidArgument, origin, message)
    }

    /// Construct an unsupported-operation error for a specific origin.
    pub(crate) fn unsupported(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unsupported, origin, message)
    }

    /// A keyed collection saw the same key twice without a merge strategy.
    pub(crate) fn duplicate_key(key: impl Into<String>) -> Self {
        let key = key.into();

        Self {
            class: ErrorClass::DuplicateKey,
            origin: ErrorOrigin::Collect,
            message: format!("duplicate key: {key}"),
            detail: Some(ErrorDetail::DuplicateKey { key }),
        }
    }

    #[must_use]
    pub const fn is_value_required(&self) -> bool {
        matches!(self.class, ErrorClass::ValueRequired)
    }
}

///
/// ErrorDetail
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("no value for {kind}")]
    ValueRequired { kind: ExpressionKind },

    #[error("key {key} already present")]
    DuplicateKey { key: String },
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ErrorClass {
    #[display("value_required")]
    ValueRequired,
    #[display("invalid_argument")]
    InvalidArgument,
    #[display("unsupported")]
    Unsupported,
    #[display("duplicate_key")]
    DuplicateKey,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ErrorOrigin {
    #[display("expression")]
    Expression,
    #[display("cast")]
    Cast,
    #[display("column")]
    Column,
    #[display("field")]
    Field,
    #[display("predicate")]
    Predicate,
    #[display("comparator")]
    Comparator,
    #[display("collect")]
    Collect,
    #[display("config")]
    Config,
}

impl From<fieldkit_config::ConfigError> for Error {
    fn from(err: fieldkit_config::ConfigError) -> Self {
        Self::invalid_argument(ErrorOrigin::Config, err.to_string())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_and_origin_display_as_snake_case_labels() {
        assert_eq!(ErrorClass::ValueRequired.to_string(), "value_required");
        assert_eq!(ErrorClass::InvalidArgument.to_string(), "invalid_argument");
        assert_eq!(ErrorClass::Unsupported.to_string(), "unsupported");
        assert_eq!(ErrorClass::DuplicateKey.to_string(), "duplicate_key");
        assert_eq!(ErrorOrigin::Comparator.to_string(), "comparator");
    }

    #[test]
    fn error_displays_its_message() {
        let err = Error::new(ErrorClass::Unsupported, ErrorOrigin::Cast, "no decimal sqrt");

        assert_eq!(err.to_string(), "no decimal sqrt");
        assert!(!err.is_value_required());
    }
}
