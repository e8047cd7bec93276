// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! A named wrapper around one [`Function`] and the failure boundary around it.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::engine::{EntryPoint, TaskResult};
use crate::errors::{FailureKind, TaskFailure};
use crate::observability::messages::task::TaskExecutionFailed;
use crate::observability::messages::StructuredLog;
use crate::traits::Function;

/// Outcome of one task invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    Completed(TaskResult),
    Failed(TaskFailure),
}

impl TaskOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, TaskOutcome::Failed(_))
    }

    /// Flatten into the result handed to the next task. Failures become an
    /// error result whose message is the formatted failure.
    pub fn into_result(self) -> TaskResult {
        match self {
            TaskOutcome::Completed(result) => result,
            TaskOutcome::Failed(failure) => TaskResult::error(failure.to_string()),
        }
    }
}

#[derive(Clone)]
enum Runnable {
    Ready(Arc<dyn Function>),
    Inert(String),
}

/// A named unit of work in a [`crate::config::TaskCollection`].
///
/// Running a task never panics and never returns an error: everything that
/// goes wrong inside the function surfaces as an error [`TaskResult`].
#[derive(Clone)]
pub struct Task {
    name: String,
    runnable: Runnable,
}

impl Task {
    pub fn new(name: impl Into<String>, function: Arc<dyn Function>) -> Self {
        Self {
            name: name.into(),
            runnable: Runnable::Ready(function),
        }
    }

    pub fn from_function<F: Function + 'static>(name: impl Into<String>, function: F) -> Self {
        Self::new(name, Arc::new(function))
    }

    /// A task that could not be given a usable function. Every call returns
    /// the same error result without executing anything.
    pub fn inert(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runnable: Runnable::Inert(reason.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_runnable(&self) -> bool {
        matches!(self.runnable, Runnable::Ready(_))
    }

    pub fn function(&self) -> Option<&Arc<dyn Function>> {
        match &self.runnable {
            Runnable::Ready(function) => Some(function),
            Runnable::Inert(_) => None,
        }
    }

    pub fn execute(&self, entry_point: &EntryPoint, previous: Option<&TaskResult>) -> TaskOutcome {
        let function = match &self.runnable {
            Runnable::Ready(function) => function,
            Runnable::Inert(reason) => {
                return TaskOutcome::Failed(TaskFailure::new(
                    &self.name,
                    FailureKind::NotRunnable,
                    reason.clone(),
                ));
            }
        };

        let computed =
            panic::catch_unwind(AssertUnwindSafe(|| function.compute(entry_point, previous)));

        let failure = match computed {
            Ok(Ok(result)) => return TaskOutcome::Completed(result),
            Ok(Err(err)) => TaskFailure::new(&self.name, FailureKind::Error, format!("{:#}", err)),
            Err(payload) => {
                TaskFailure::new(&self.name, FailureKind::Panic, panic_message(payload.as_ref()))
            }
        };

        TaskExecutionFailed {
            task_name: &failure.task_name,
            kind: &failure.kind.to_string(),
            message: &failure.message,
        }
        .log();

        TaskOutcome::Failed(failure)
    }

    pub fn run(&self, entry_point: &EntryPoint, previous: Option<&TaskResult>) -> TaskResult {
        self.execute(entry_point, previous).into_result()
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let function = match &self.runnable {
            Runnable::Ready(function) => function.name().to_string(),
            Runnable::Inert(reason) => format!("<inert: {}>", reason),
        };
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("function", &function)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {}", message)
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {}", message)
    } else {
        "panicked with a non-string payload".to_string()
    }
}
