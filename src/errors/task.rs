// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Failure side of a task outcome.

use std::fmt;

/// What went wrong at a task boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The function returned an error
    Error,
    /// The function panicked
    Panic,
    /// The task was built without a usable function and never runs one
    NotRunnable,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureKind::Error => "error",
            FailureKind::Panic => "panic",
            FailureKind::NotRunnable => "not runnable",
        };
        f.write_str(label)
    }
}

/// A failure absorbed at the task boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    pub task_name: String,
    pub kind: FailureKind,
    pub message: String,
}

impl TaskFailure {
    pub fn new(task_name: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            task_name: task_name.into(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task '{}' failed ({}): {}",
            self.task_name, self.kind, self.message
        )
    }
}

impl std::error::Error for TaskFailure {}
