// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration validation warnings and errors.
//!
//! This module contains message types for logging events related to:
//! * Task graph configuration validation
//! * Edge resolution inside a collection
//! * Result key kind conflicts caught by the key registry

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Configuration validation started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use taskflow::observability::messages::validation::ValidationStarted;
///
/// let msg = ValidationStarted {
///     collection_count: 2,
///     task_count: 7,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct ValidationStarted {
    pub collection_count: usize,
    pub task_count: usize,
}

impl Display for ValidationStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting configuration validation for {} collections ({} tasks)",
            self.collection_count, self.task_count
        )
    }
}

impl StructuredLog for ValidationStarted {
    fn log(&self) {
        tracing::info!(
            collection_count = self.collection_count,
            task_count = self.task_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::INFO,
            "span_name",
            name = name,
            collection_count = self.collection_count,
            task_count = self.task_count,
        )
    }
}

/// Configuration validation completed successfully.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ValidationCompleted {
    pub collection_count: usize,
    pub route_count: usize,
}

impl Display for ValidationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Configuration validation completed successfully for {} collections and {} routes",
            self.collection_count, self.route_count
        )
    }
}

impl StructuredLog for ValidationCompleted {
    fn log(&self) {
        tracing::info!(
            collection_count = self.collection_count,
            route_count = self.route_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::INFO,
            "span_name",
            name = name,
            collection_count = self.collection_count,
            route_count = self.route_count,
        )
    }
}

/// Configuration validation failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use taskflow::observability::messages::validation::ValidationFailed;
///
/// let msg = ValidationFailed {
///     error_count: 3,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ValidationFailed {
    pub error_count: usize,
}

impl Display for ValidationFailed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Configuration validation failed with {} errors",
            self.error_count
        )
    }
}

impl StructuredLog for ValidationFailed {
    fn log(&self) {
        tracing::error!(
            error_count = self.error_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            error_count = self.error_count,
        )
    }
}

/// A built collection has an edge that leads nowhere.
///
/// # Log Level
/// `warn!` - The driver will fall back to the stop task on this edge
pub struct DanglingEdgeDetected<'a> {
    pub collection: &'a str,
    pub task_name: &'a str,
    pub target: &'a str,
}

impl Display for DanglingEdgeDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Collection '{}': task '{}' transitions to unknown task '{}'",
            self.collection, self.task_name, self.target
        )
    }
}

impl StructuredLog for DanglingEdgeDetected<'_> {
    fn log(&self) {
        tracing::warn!(
            collection = self.collection,
            task_name = self.task_name,
            target = self.target,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "span_name",
            name = name,
            collection = self.collection,
            task_name = self.task_name,
            target = self.target,
        )
    }
}

/// Two functions disagree on the kind of a result key.
///
/// # Log Level
/// `warn!` - Potential contract mismatch between tasks
pub struct KeyKindConflict<'a> {
    pub key: &'a str,
    pub first: &'a str,
    pub second: &'a str,
}

impl Display for KeyKindConflict<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Result key '{}' declared as {} and as {}",
            self.key, self.first, self.second
        )
    }
}

impl StructuredLog for KeyKindConflict<'_> {
    fn log(&self) {
        tracing::warn!(
            key = self.key,
            first = self.first,
            second = self.second,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "span_name",
            name = name,
            key = self.key,
        )
    }
}
