// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Iterative driver that walks a [`TaskCollection`] by name.
//!
//! # Execution Flow
//!
//! 1. Resolve the start name and run it with no previous result.
//! 2. While the latest result says `Proceed = true`:
//!    * stop if the iteration ceiling has been used up,
//!    * pick the success or error edge of the current task based on the
//!      result's error flag,
//!    * run the task behind that name with the latest result as input.
//! 3. Hand back the last result as-is, together with the path taken.
//!
//! Missing names and unset edges resolve to the stop task, so a traversal
//! never fails outright. The ceiling guarantees termination for cyclic graphs
//! whose functions never lower `Proceed`.
//!
//! # Example
//! ```rust
//! use serde_json::json;
//! use taskflow::config::TaskCollection;
//! use taskflow::engine::{EntryPoint, Task, TaskResult, WorkFlow};
//! use taskflow::traits::Function;
//!
//! struct Total;
//!
//! impl Function for Total {
//!     fn compute(&self, _: &EntryPoint, _: Option<&TaskResult>) -> anyhow::Result<TaskResult> {
//!         Ok(TaskResult::from_json(json!({"Total": 42, "Proceed": false})))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "total"
//!     }
//! }
//!
//! let mut collection = TaskCollection::new("Example");
//! collection.add(Task::from_function("Total", Total), None, None);
//!
//! let entry_point = EntryPoint::default();
//! let run = WorkFlow::new(&collection, &entry_point).run("Total");
//!
//! assert_eq!(run.result.get("Total"), Some(&json!(42)));
//! assert_eq!(run.iterations, 0);
//! ```

use std::time::Instant;

use crate::config::consts::DEFAULT_MAX_ITERATIONS;
use crate::config::TaskCollection;
use crate::engine::{EntryPoint, TaskResult};
use crate::observability::messages::engine::{
    IterationCeilingReached, ResultKindMismatch, TaskTransition, WorkFlowCompleted,
    WorkFlowStarted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::LogLevel;

/// Why the driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The latest result lowered `Proceed` (or never set it).
    Completed,
    /// The iteration ceiling forced termination; the result is the last one
    /// computed and is not altered.
    IterationCeiling,
}

/// Everything one traversal produced.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkFlowRun {
    pub result: TaskResult,
    /// Names of the tasks executed, in order, starting with the start name.
    pub path: Vec<String>,
    /// Number of transitions taken after the start task.
    pub iterations: usize,
    pub termination: Termination,
}

impl WorkFlowRun {
    pub fn is_truncated(&self) -> bool {
        self.termination == Termination::IterationCeiling
    }

    pub fn last_task(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    pub fn into_result(self) -> TaskResult {
        self.result
    }
}

/// One bounded traversal of a collection for a single entry point.
pub struct WorkFlow<'a> {
    collection: &'a TaskCollection,
    entry_point: &'a EntryPoint,
    max_iterations: usize,
}

impl<'a> WorkFlow<'a> {
    pub fn new(collection: &'a TaskCollection, entry_point: &'a EntryPoint) -> Self {
        Self {
            collection,
            entry_point,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Lower the iteration ceiling. Values above [`DEFAULT_MAX_ITERATIONS`]
    /// are clamped to it.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.min(DEFAULT_MAX_ITERATIONS);
        self
    }

    pub fn run(&self, start_name: &str) -> WorkFlowRun {
        let started = WorkFlowStarted {
            collection: self.collection.name(),
            start_name,
            max_iterations: self.max_iterations,
        };
        let span = started.span("workflow_run");
        let _guard = span.enter();
        started.log();

        let start_time = Instant::now();
        let entry_point = self.entry_point;

        let mut current = start_name.to_string();
        let mut result = self.collection.get_task(&current).run(entry_point, None);
        self.check_kinds(&current, &result);
        let mut path = vec![current.clone()];
        let mut iterations = 0usize;
        let mut termination = Termination::Completed;

        while result.proceed() {
            if iterations >= self.max_iterations {
                let ceiling = IterationCeilingReached {
                    collection: self.collection.name(),
                    last_task: &current,
                    max_iterations: self.max_iterations,
                };
                ceiling.log();
                entry_point.log(LogLevel::Error, &ceiling.to_string());
                termination = Termination::IterationCeiling;
                break;
            }
            iterations += 1;

            let use_error_edge = result.is_error();
            let next = self
                .collection
                .get_next_task_name(&current, use_error_edge)
                .to_string();

            let transition = TaskTransition {
                iteration: iterations,
                from: &current,
                to: &next,
                via_error_edge: use_error_edge,
            };
            transition.log();
            entry_point.log(LogLevel::Debug, &transition.to_string());

            result = self.collection.get_task(&next).run(entry_point, Some(&result));
            self.check_kinds(&next, &result);
            path.push(next.clone());
            current = next;
        }

        WorkFlowCompleted {
            collection: self.collection.name(),
            last_task: &current,
            iterations,
            is_error: result.is_error(),
            duration: start_time.elapsed(),
        }
        .log();

        WorkFlowRun {
            result,
            path,
            iterations,
            termination,
        }
    }

    fn check_kinds(&self, task_name: &str, result: &TaskResult) {
        for mismatch in self.collection.key_registry().mismatches(result.values()) {
            let expected = mismatch.expected.to_string();
            let actual = mismatch.actual.to_string();
            let message = ResultKindMismatch {
                task_name,
                key: &mismatch.key,
                expected: &expected,
                actual: &actual,
            };
            message.log();
            self.entry_point.log(LogLevel::Warning, &message.to_string());
        }
    }
}
