// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for WorkFlow lifecycle and graph traversal events.
//!
//! This module contains message types for logging events related to:
//! * WorkFlow start and termination
//! * Transitions between named tasks
//! * The iteration ceiling guard
//! * Route resolution in the router

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// WorkFlow started against a collection.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use taskflow::observability::messages::engine::WorkFlowStarted;
///
/// let msg = WorkFlowStarted {
///     collection: "HelloWorldApp",
///     start_name: "GetSession",
///     max_iterations: 1000,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct WorkFlowStarted<'a> {
    pub collection: &'a str,
    pub start_name: &'a str,
    pub max_iterations: usize,
}

impl Display for WorkFlowStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting workflow on collection '{}' at task '{}' (max_iterations={})",
            self.collection, self.start_name, self.max_iterations
        )
    }
}

impl StructuredLog for WorkFlowStarted<'_> {
    fn log(&self) {
        tracing::info!(
            collection = self.collection,
            start_name = self.start_name,
            max_iterations = self.max_iterations,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "workflow",
            span_name = name,
            collection = self.collection,
            start_name = self.start_name,
            max_iterations = self.max_iterations,
        )
    }
}

/// The driver moved from one task to the next.
///
/// # Log Level
/// `debug!` - Per-iteration detail
pub struct TaskTransition<'a> {
    pub iteration: usize,
    pub from: &'a str,
    pub to: &'a str,
    pub via_error_edge: bool,
}

impl Display for TaskTransition<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let edge = if self.via_error_edge { "error" } else { "success" };
        write!(
            f,
            "Iteration {}: '{}' -> '{}' via {} edge",
            self.iteration, self.from, self.to, edge
        )
    }
}

impl StructuredLog for TaskTransition<'_> {
    fn log(&self) {
        tracing::debug!(
            iteration = self.iteration,
            from = self.from,
            to = self.to,
            via_error_edge = self.via_error_edge,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "transition",
            span_name = name,
            iteration = self.iteration,
            from = self.from,
            to = self.to,
        )
    }
}

/// The driver exceeded its iteration ceiling and forced termination.
///
/// # Log Level
/// `error!` - Runaway graph requiring attention
pub struct IterationCeilingReached<'a> {
    pub collection: &'a str,
    pub last_task: &'a str,
    pub max_iterations: usize,
}

impl Display for IterationCeilingReached<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Workflow on collection '{}' exceeded {} iterations at task '{}', terminating",
            self.collection, self.max_iterations, self.last_task
        )
    }
}

impl StructuredLog for IterationCeilingReached<'_> {
    fn log(&self) {
        tracing::error!(
            collection = self.collection,
            last_task = self.last_task,
            max_iterations = self.max_iterations,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "iteration_ceiling",
            span_name = name,
            collection = self.collection,
            last_task = self.last_task,
            max_iterations = self.max_iterations,
        )
    }
}

/// A task wrote a result key with a value of the wrong kind.
///
/// # Log Level
/// `warn!` - The workflow continues, downstream reads may misbehave
pub struct ResultKindMismatch<'a> {
    pub task_name: &'a str,
    pub key: &'a str,
    pub expected: &'a str,
    pub actual: &'a str,
}

impl Display for ResultKindMismatch<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Task '{}' wrote '{}' as {}, declared as {}",
            self.task_name, self.key, self.actual, self.expected
        )
    }
}

impl StructuredLog for ResultKindMismatch<'_> {
    fn log(&self) {
        tracing::warn!(
            task_name = self.task_name,
            key = self.key,
            expected = self.expected,
            actual = self.actual,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "result_kind_mismatch",
            span_name = name,
            task_name = self.task_name,
            key = self.key,
        )
    }
}

/// WorkFlow reached a terminal result.
///
/// # Log Level
/// `info!` - Important operational event
pub struct WorkFlowCompleted<'a> {
    pub collection: &'a str,
    pub last_task: &'a str,
    pub iterations: usize,
    pub is_error: bool,
    pub duration: std::time::Duration,
}

impl Display for WorkFlowCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Workflow on collection '{}' finished at task '{}' after {} iterations in {:?} (is_error={})",
            self.collection, self.last_task, self.iterations, self.duration, self.is_error
        )
    }
}

impl StructuredLog for WorkFlowCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            collection = self.collection,
            last_task = self.last_task,
            iterations = self.iterations,
            is_error = self.is_error,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "workflow_completed",
            span_name = name,
            collection = self.collection,
            last_task = self.last_task,
            iterations = self.iterations,
            duration = ?self.duration,
        )
    }
}

/// No route matched the request path.
///
/// # Log Level
/// `warn!` - Degraded behavior, the stop task answers instead
pub struct RouteNotFound<'a> {
    pub path: &'a str,
    pub method: &'a str,
}

impl Display for RouteNotFound<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "No route for {} '{}', using stop task", self.method, self.path)
    }
}

impl StructuredLog for RouteNotFound<'_> {
    fn log(&self) {
        tracing::warn!(path = self.path, method = self.method, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "route_not_found",
            span_name = name,
            path = self.path,
            method = self.method,
        )
    }
}
