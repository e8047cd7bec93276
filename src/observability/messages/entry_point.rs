// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for entry point construction.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An entry point argument had the wrong shape and was replaced.
///
/// # Log Level
/// `warn!` - Input coerced to a default
///
/// # Example
/// ```
/// use taskflow::observability::messages::entry_point::EntryPointFieldCoerced;
///
/// let msg = EntryPointFieldCoerced {
///     field: "cookies",
///     received: "string",
///     replacement: "empty mapping",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct EntryPointFieldCoerced<'a> {
    pub field: &'a str,
    pub received: &'a str,
    pub replacement: &'a str,
}

impl Display for EntryPointFieldCoerced<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Entry point field '{}' expected a mapping but received {}, using {}",
            self.field, self.received, self.replacement
        )
    }
}

impl StructuredLog for EntryPointFieldCoerced<'_> {
    fn log(&self) {
        tracing::warn!(
            field = self.field,
            received = self.received,
            replacement = self.replacement,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "entry_point_coerced",
            span_name = name,
            field = self.field,
            received = self.received,
        )
    }
}

/// A log handler panicked while recording a message.
///
/// # Log Level
/// `error!` - Collaborator failure, contained
pub struct LogHandlerPanicked<'a> {
    pub level: &'a str,
}

impl Display for LogHandlerPanicked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Log handler panicked while writing a {} message", self.level)
    }
}

impl StructuredLog for LogHandlerPanicked<'_> {
    fn log(&self) {
        tracing::error!(level = self.level, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("log_handler_panicked", span_name = name, level = self.level)
    }
}
