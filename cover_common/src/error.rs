//! Error types shared between the quote flow library and the terminal client.
//!
//! The `QuoteError` enum unifies form validation failures, out-of-domain input,
//! illegal flow transitions, and the I/O and channel failures of the client, so
//! that every layer can propagate a single error type with `?`.
use std::collections::BTreeSet;
use std::io;

use thiserror::Error;

use crate::flow::Stage;
use crate::vehicle::Field;

/// Unified error type shared by the library and the client.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// One or more required text fields were empty at submit time.
    #[error("Validation error: required fields missing: {}", join_fields(.0))]
    Validation(BTreeSet<Field>),

    /// A value outside an enumerated domain reached the pricing surface.
    #[error("Invalid value {value:?} for field {field}")]
    InvalidEnumValue {
        /// Field whose value could not be parsed.
        field: Field,
        /// Raw value as received.
        value: String,
    },

    /// A field name that is not part of the quote form.
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    /// The requested action is not allowed from the current stage.
    #[error("Action '{action}' is not allowed in stage {stage}")]
    InvalidState {
        /// Name of the rejected action.
        action: &'static str,
        /// Stage the flow was in when the action arrived.
        stage: Stage,
    },

    /// A line from the terminal could not be parsed into a command.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// I/O error originating from stdin/stdout.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding a view snapshot to JSON.
    #[error("JSON serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Countdown tick channel closed while the client loop was waiting on it.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),
}

impl QuoteError {
    /// Returns the invalid field set when this is a validation failure.
    pub fn invalid_fields(&self) -> Option<&BTreeSet<Field>> {
        match self {
            QuoteError::Validation(fields) => Some(fields),
            _ => None,
        }
    }
}

fn join_fields(fields: &BTreeSet<Field>) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
