// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for gamewire.
//!
//! Every failure is a pure function of the input and is reported to the
//! immediate caller:
//! - Types without a registry entry
//! - Truncated or self-inconsistent buffers
//! - Values the wire format cannot represent
//! - Invalid registry or schema definitions

use thiserror::Error;

/// Errors that can occur while encoding or decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The value's or target's type has no registry entry
    #[error("Unsupported type: '{type_name}'")]
    UnsupportedType {
        /// Canonical name of the type
        type_name: String,
    },

    /// Decode buffer is truncated or inconsistent with its own framing
    #[error("Malformed input at offset {offset}: {reason}")]
    MalformedInput {
        /// Byte offset where the problem was detected
        offset: usize,
        /// What was wrong
        reason: String,
    },

    /// A value cannot be represented on the wire
    #[error("Invalid value for '{type_name}': {reason}")]
    InvalidValue {
        /// Type the value was encoded as
        type_name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Registry or schema definition rejected at construction time
    #[error("Invalid schema '{schema_name}': {reason}")]
    InvalidSchema {
        /// Schema or type name
        schema_name: String,
        /// Validation error message
        reason: String,
    },
}

impl CodecError {
    /// Create an "unsupported type" error.
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        CodecError::UnsupportedType {
            type_name: type_name.into(),
        }
    }

    /// Create a malformed input error.
    pub fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        CodecError::MalformedInput {
            offset,
            reason: reason.into(),
        }
    }

    /// Create a malformed input error for a read past the end of the buffer.
    pub fn truncated(offset: usize, requested: usize, available: usize) -> Self {
        CodecError::MalformedInput {
            offset,
            reason: format!("requested {requested} bytes, but only {available} available"),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::InvalidValue {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid schema error.
    pub fn invalid_schema(schema_name: impl Into<String>, reason: impl Into<String>) -> Self {
        CodecError::InvalidSchema {
            schema_name: schema_name.into(),
            reason: reason.into(),
        }
    }

    /// Check if this is an unsupported type error.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, CodecError::UnsupportedType { .. })
    }

    /// Check if this is a malformed input error.
    pub fn is_malformed(&self) -> bool {
        matches!(self, CodecError::MalformedInput { .. })
    }

    /// Shift the reported offset of a malformed input error by `base`.
    ///
    /// Element decoders see a sub-slice of the frame; this maps their offsets
    /// back into the enclosing buffer.
    pub(crate) fn at_offset(self, base: usize) -> Self {
        match self {
            CodecError::MalformedInput { offset, reason } => CodecError::MalformedInput {
                offset: base + offset,
                reason,
            },
            other => other,
        }
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            CodecError::UnsupportedType { type_name } => vec![("type", type_name.clone())],
            CodecError::MalformedInput { offset, reason } => {
                vec![("offset", offset.to_string()), ("reason", reason.clone())]
            }
            CodecError::InvalidValue { type_name, reason } => {
                vec![("type", type_name.clone()), ("reason", reason.clone())]
            }
            CodecError::InvalidSchema {
                schema_name,
                reason,
            } => vec![("schema", schema_name.clone()), ("reason", reason.clone())],
        }
    }
}

/// Result type for gamewire operations.
pub type Result<T> = std::result::Result<T, CodecError>;
