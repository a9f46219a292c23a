//! Structured error types shared across EDM crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`EdmError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (indices, ranges, sizes, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the event-data converter.
///
/// Per-object truth-matching failures are never reported through this type;
/// they degrade a single record and surface as a [`MatchOutcome`](crate::MatchOutcome).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum EdmError {
    /// Malformed records handed over by the simulation engine.
    #[error("input error: {0}")]
    Input(ErrorInfo),
    /// Genealogy graph structural errors.
    #[error("graph error: {0}")]
    Graph(ErrorInfo),
    /// Association bookkeeping errors.
    #[error("match error: {0}")]
    Match(ErrorInfo),
    /// Invalid converter configuration.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl EdmError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            EdmError::Input(info)
            | EdmError::Graph(info)
            | EdmError::Match(info)
            | EdmError::Config(info)
            | EdmError::Serde(info) => info,
        }
    }

    /// Returns the stable machine readable code of the error.
    pub fn code(&self) -> &str {
        &self.info().code
    }

    /// Adds a context entry to the payload regardless of the error family.
    pub fn with_context(self, key: impl Into<String>, value: impl ToString) -> Self {
        match self {
            EdmError::Input(info) => EdmError::Input(info.with_context(key, value)),
            EdmError::Graph(info) => EdmError::Graph(info.with_context(key, value)),
            EdmError::Match(info) => EdmError::Match(info.with_context(key, value)),
            EdmError::Config(info) => EdmError::Config(info.with_context(key, value)),
            EdmError::Serde(info) => EdmError::Serde(info.with_context(key, value)),
        }
    }

    /// Attaches a hint to the payload regardless of the error family.
    pub fn with_hint(self, hint: impl Into<String>) -> Self {
        match self {
            EdmError::Input(info) => EdmError::Input(info.with_hint(hint)),
            EdmError::Graph(info) => EdmError::Graph(info.with_hint(hint)),
            EdmError::Match(info) => EdmError::Match(info.with_hint(hint)),
            EdmError::Config(info) => EdmError::Config(info.with_hint(hint)),
            EdmError::Serde(info) => EdmError::Serde(info.with_hint(hint)),
        }
    }

    /// Shorthand for an [`EdmError::Input`] error.
    pub fn input(code: impl Into<String>, message: impl Into<String>) -> Self {
        EdmError::Input(ErrorInfo::new(code, message))
    }

    /// Shorthand for an [`EdmError::Graph`] error.
    pub fn graph(code: impl Into<String>, message: impl Into<String>) -> Self {
        EdmError::Graph(ErrorInfo::new(code, message))
    }

    /// Shorthand for an [`EdmError::Match`] error.
    pub fn matching(code: impl Into<String>, message: impl Into<String>) -> Self {
        EdmError::Match(ErrorInfo::new(code, message))
    }

    /// Shorthand for an [`EdmError::Config`] error.
    pub fn config(code: impl Into<String>, message: impl Into<String>) -> Self {
        EdmError::Config(ErrorInfo::new(code, message))
    }

    /// Shorthand for an [`EdmError::Serde`] error.
    pub fn serde(code: impl Into<String>, message: impl Into<String>) -> Self {
        EdmError::Serde(ErrorInfo::new(code, message))
    }
}
