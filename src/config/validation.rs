// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation for task graph integrity.
//!
//! Task graphs may be cyclic (a task can route back to itself or an earlier
//! task; the driver's iteration ceiling bounds such traversals), so unlike a
//! dependency DAG there is no cycle check. What must hold instead:
//!
//! 1. **Names are unique** - collections across the file, tasks inside a collection
//! 2. **The terminal name is reserved** - no configured task may be called `StopTask`
//! 3. **Edges resolve** - every `on_success` / `on_error` names a task of the same
//!    collection or the terminal
//! 4. **Routes resolve** - paths are unique, their collection exists and their
//!    start task is part of it
//! 5. **Functions exist** - every task names a local function implementation
//! 6. **The ceiling holds** - `max_iterations` may lower the limit of 1000, never raise it
//!
//! All checks run; errors are accumulated so one pass reports everything.
//!
//! # Example
//! ```rust
//! use taskflow::config::{parse_yaml, validate_config};
//!
//! let config = parse_yaml(r#"
//! collections:
//!   - name: App
//!     tasks:
//!       - name: Home
//!         function: serve_template
//!         on_success: Gone
//! "#).unwrap();
//!
//! let errors = validate_config(&config).unwrap_err();
//! assert_eq!(errors.len(), 1);
//! ```

use std::collections::{HashMap, HashSet};

use crate::backends::local::LocalFunctionFactory;
use crate::config::consts::{DEFAULT_MAX_ITERATIONS, STOP_TASK_NAME};
use crate::config::{CollectionConfig, Config};
use crate::errors::ValidationError;
use crate::observability::messages::validation::{
    DanglingEdgeDetected, ValidationCompleted, ValidationFailed, ValidationStarted,
};
use crate::observability::messages::StructuredLog;

/// Validate every collection and route of `config`.
///
/// # Returns
///
/// * `Ok(())` - Configuration can be built into a runtime
/// * `Err(Vec<ValidationError>)` - Every problem found, in file order
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    ValidationStarted {
        collection_count: config.collections.len(),
        task_count: config.collections.iter().map(|c| c.tasks.len()).sum(),
    }
    .log();

    let mut errors = Vec::new();
    let mut collections: HashMap<&str, &CollectionConfig> = HashMap::new();

    if config.max_iterations > DEFAULT_MAX_ITERATIONS {
        errors.push(ValidationError::IterationCeilingTooHigh {
            configured: config.max_iterations,
            limit: DEFAULT_MAX_ITERATIONS,
        });
    }

    for collection in &config.collections {
        if collections.insert(collection.name.as_str(), collection).is_some() {
            errors.push(ValidationError::DuplicateCollection {
                collection: collection.name.clone(),
            });
        }
        errors.extend(validate_collection(collection));
    }

    errors.extend(validate_routes(config, &collections));

    if errors.is_empty() {
        ValidationCompleted {
            collection_count: config.collections.len(),
            route_count: config.routes.len(),
        }
        .log();
        Ok(())
    } else {
        ValidationFailed {
            error_count: errors.len(),
        }
        .log();
        Err(errors)
    }
}

fn validate_collection(collection: &CollectionConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for task in &collection.tasks {
        if task.name == STOP_TASK_NAME {
            errors.push(ValidationError::ReservedTaskName {
                collection: collection.name.clone(),
                task_name: task.name.clone(),
            });
        } else if !seen.insert(task.name.as_str()) {
            errors.push(ValidationError::DuplicateTaskName {
                collection: collection.name.clone(),
                task_name: task.name.clone(),
            });
        }

        if !LocalFunctionFactory::is_implementation_available(&task.function) {
            errors.push(ValidationError::UnknownFunction {
                collection: collection.name.clone(),
                task_name: task.name.clone(),
                function: task.function.clone(),
            });
        }
    }

    for task in &collection.tasks {
        let targets = [task.on_success.as_deref(), task.on_error.as_deref()];
        for target in targets.into_iter().flatten() {
            if target != STOP_TASK_NAME && !seen.contains(target) {
                DanglingEdgeDetected {
                    collection: &collection.name,
                    task_name: &task.name,
                    target,
                }
                .log();
                errors.push(ValidationError::UnresolvedEdge {
                    collection: collection.name.clone(),
                    task_name: task.name.clone(),
                    target: target.to_string(),
                });
            }
        }
    }

    errors
}

fn validate_routes(
    config: &Config,
    collections: &HashMap<&str, &CollectionConfig>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen_paths = HashSet::new();

    for route in &config.routes {
        if !seen_paths.insert(route.path.as_str()) {
            errors.push(ValidationError::DuplicateRoute {
                path: route.path.clone(),
            });
        }

        match collections.get(route.collection.as_str()) {
            None => errors.push(ValidationError::UnknownRouteCollection {
                path: route.path.clone(),
                collection: route.collection.clone(),
            }),
            Some(collection) => {
                let known = route.start == STOP_TASK_NAME
                    || collection.tasks.iter().any(|t| t.name == route.start);
                if !known {
                    errors.push(ValidationError::UnknownRouteStart {
                        path: route.path.clone(),
                        collection: route.collection.clone(),
                        start: route.start.clone(),
                    });
                }
            }
        }
    }

    errors
}
