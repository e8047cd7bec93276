// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

/// Errors that can occur while validating a task graph configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Two collections share the same name
    DuplicateCollection {
        collection: String,
    },
    /// A collection declares the same task name twice
    DuplicateTaskName {
        collection: String,
        task_name: String,
    },
    /// A task tries to take the name reserved for the built-in terminal
    ReservedTaskName {
        collection: String,
        task_name: String,
    },
    /// A success or error edge points at a task that does not exist
    UnresolvedEdge {
        collection: String,
        task_name: String,
        /// The missing edge target
        target: String,
    },
    /// Two functions declare the same result key with different value kinds
    ConflictingKeyKind {
        key: String,
        first: String,
        second: String,
    },
    /// A route references a collection that was never declared
    UnknownRouteCollection {
        path: String,
        collection: String,
    },
    /// A route starts at a task its collection does not contain
    UnknownRouteStart {
        path: String,
        collection: String,
        start: String,
    },
    /// Two routes share the same request path
    DuplicateRoute {
        path: String,
    },
    /// A task names a function implementation the factory does not provide
    UnknownFunction {
        collection: String,
        task_name: String,
        function: String,
    },
    /// The configured iteration ceiling is above the hard limit
    IterationCeilingTooHigh {
        configured: usize,
        limit: usize,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateCollection { collection } => {
                write!(f, "Duplicate collection name: '{}'", collection)
            }
            ValidationError::DuplicateTaskName {
                collection,
                task_name,
            } => {
                write!(
                    f,
                    "Collection '{}' declares task '{}' more than once",
                    collection, task_name
                )
            }
            ValidationError::ReservedTaskName {
                collection,
                task_name,
            } => {
                write!(
                    f,
                    "Collection '{}' uses the reserved task name '{}'",
                    collection, task_name
                )
            }
            ValidationError::UnresolvedEdge {
                collection,
                task_name,
                target,
            } => {
                write!(
                    f,
                    "Task '{}' in collection '{}' transitions to '{}' which does not exist",
                    task_name, collection, target
                )
            }
            ValidationError::ConflictingKeyKind { key, first, second } => {
                write!(
                    f,
                    "Result key '{}' is declared as both {} and {}",
                    key, first, second
                )
            }
            ValidationError::UnknownRouteCollection { path, collection } => {
                write!(
                    f,
                    "Route '{}' references unknown collection '{}'",
                    path, collection
                )
            }
            ValidationError::UnknownRouteStart {
                path,
                collection,
                start,
            } => {
                write!(
                    f,
                    "Route '{}' starts at '{}' which is not a task of collection '{}'",
                    path, start, collection
                )
            }
            ValidationError::DuplicateRoute { path } => {
                write!(f, "Duplicate route path: '{}'", path)
            }
            ValidationError::UnknownFunction {
                collection,
                task_name,
                function,
            } => {
                write!(
                    f,
                    "Task '{}' in collection '{}' uses unknown function '{}'",
                    task_name, collection, function
                )
            }
            ValidationError::IterationCeilingTooHigh { configured, limit } => {
                write!(
                    f,
                    "max_iterations {} exceeds the limit of {}",
                    configured, limit
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading configuration or building a runtime from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config format '{0}', expected .yaml, .yml or .toml")]
    UnsupportedFormat(String),

    #[error("Configuration validation failed:\n{}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
