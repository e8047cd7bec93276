// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for task execution and lookup events.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A task's function failed and the failure was converted into an error result.
///
/// # Log Level
/// `warn!` - Absorbed failure, routed through the error edge
///
/// # Example
/// ```
/// use taskflow::observability::messages::task::TaskExecutionFailed;
///
/// let msg = TaskExecutionFailed {
///     task_name: "SaveSession",
///     kind: "error",
///     message: "disk full",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct TaskExecutionFailed<'a> {
    pub task_name: &'a str,
    pub kind: &'a str,
    pub message: &'a str,
}

impl Display for TaskExecutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Task '{}' failed ({}): {}",
            self.task_name, self.kind, self.message
        )
    }
}

impl StructuredLog for TaskExecutionFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            task_name = self.task_name,
            kind = self.kind,
            message = self.message,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "task_failed",
            span_name = name,
            task_name = self.task_name,
            kind = self.kind,
        )
    }
}

/// A task was rejected when added to a collection.
///
/// # Log Level
/// `warn!` - Registration skipped
pub struct TaskRegistrationSkipped<'a> {
    pub collection: &'a str,
    pub task_name: &'a str,
    pub reason: &'a str,
}

impl Display for TaskRegistrationSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Collection '{}' skipped task '{}': {}",
            self.collection, self.task_name, self.reason
        )
    }
}

impl StructuredLog for TaskRegistrationSkipped<'_> {
    fn log(&self) {
        tracing::warn!(
            collection = self.collection,
            task_name = self.task_name,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "task_registration_skipped",
            span_name = name,
            collection = self.collection,
            task_name = self.task_name,
        )
    }
}

/// A lookup by name missed and the stop task was substituted.
///
/// # Log Level
/// `warn!` - Degraded traversal
pub struct TaskLookupMissed<'a> {
    pub collection: &'a str,
    pub task_name: &'a str,
}

impl Display for TaskLookupMissed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Collection '{}' has no task named '{}', substituting stop task",
            self.collection, self.task_name
        )
    }
}

impl StructuredLog for TaskLookupMissed<'_> {
    fn log(&self) {
        tracing::warn!(
            collection = self.collection,
            task_name = self.task_name,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "task_lookup_missed",
            span_name = name,
            collection = self.collection,
            task_name = self.task_name,
        )
    }
}
