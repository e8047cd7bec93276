// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::fmt;

use crate::config::consts::STOP_TASK_NAME;
use crate::config::KeyRegistry;
use crate::engine::{StopTask, Task};
use crate::errors::ValidationError;
use crate::observability::messages::task::{TaskLookupMissed, TaskRegistrationSkipped};
use crate::observability::messages::validation::{DanglingEdgeDetected, KeyKindConflict};
use crate::observability::messages::StructuredLog;

#[derive(Clone)]
struct TaskEntry {
    task: Task,
    on_success: Option<String>,
    on_error: Option<String>,
}

/// A named directed graph of tasks wired by success and error edge names.
///
/// Every collection contains the reserved [`STOP_TASK_NAME`] entry from the
/// moment it is created. Once built it is only read, so one instance can be
/// shared (typically behind an `Arc`) by any number of concurrent workflow runs.
///
/// # Example
/// ```
/// use serde_json::json;
/// use taskflow::config::TaskCollection;
/// use taskflow::engine::{StopTask, Task, STOP_TASK_NAME};
///
/// let mut collection = TaskCollection::new("HelloWorldApp");
/// collection.add(StopTask::new("done").into_task(), None, None); // reserved, skipped
/// assert!(collection.contains(STOP_TASK_NAME));
/// assert_eq!(collection.get_next_task_name("Unknown", true), STOP_TASK_NAME);
/// ```
pub struct TaskCollection {
    name: String,
    entries: HashMap<String, TaskEntry>,
    keys: KeyRegistry,
    key_conflicts: Vec<ValidationError>,
}

impl TaskCollection {
    pub fn new(name: impl Into<String>) -> Self {
        let mut collection = Self {
            name: name.into(),
            entries: HashMap::new(),
            keys: KeyRegistry::new(),
            key_conflicts: Vec::new(),
        };
        collection.register(StopTask::default().into_task(), None, None);
        collection
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register `task` with its outgoing edges. Returns `false` (and logs why)
    /// when the task is not runnable or tries to replace the reserved terminal.
    /// A task with an existing name replaces the earlier registration.
    pub fn add(&mut self, task: Task, on_success: Option<&str>, on_error: Option<&str>) -> bool {
        let reason = if !task.is_runnable() {
            Some("task has no runnable function")
        } else if task.name() == STOP_TASK_NAME {
            Some("the name is reserved for the terminal task")
        } else {
            None
        };

        if let Some(reason) = reason {
            TaskRegistrationSkipped {
                collection: &self.name,
                task_name: task.name(),
                reason,
            }
            .log();
            return false;
        }

        self.register(task, on_success, on_error);
        true
    }

    fn register(&mut self, task: Task, on_success: Option<&str>, on_error: Option<&str>) {
        if let Some(function) = task.function() {
            for spec in function.declared_keys() {
                if let Err(conflict) = self.keys.register(&spec, function.name()) {
                    if let ValidationError::ConflictingKeyKind { key, first, second } = &conflict {
                        KeyKindConflict { key, first, second }.log();
                    }
                    self.key_conflicts.push(conflict);
                }
            }
        }

        self.entries.insert(
            task.name().to_string(),
            TaskEntry {
                task,
                on_success: on_success.map(str::to_string),
                on_error: on_error.map(str::to_string),
            },
        );
    }

    /// Exact-name lookup. A miss yields a fresh stop task whose reason names
    /// the missing task, so traversal degrades instead of failing.
    pub fn get_task(&self, name: &str) -> Task {
        match self.entries.get(name) {
            Some(entry) => entry.task.clone(),
            None => {
                TaskLookupMissed {
                    collection: &self.name,
                    task_name: name,
                }
                .log();
                StopTask::new(format!(
                    "task '{}' is not registered in collection '{}'",
                    name, self.name
                ))
                .into_task()
            }
        }
    }

    /// The success edge of `name`, or its error edge when `use_error_edge`.
    /// Unknown names and unset edges resolve to [`STOP_TASK_NAME`].
    pub fn get_next_task_name(&self, name: &str, use_error_edge: bool) -> &str {
        self.entries
            .get(name)
            .and_then(|entry| {
                if use_error_edge {
                    entry.on_error.as_deref()
                } else {
                    entry.on_success.as_deref()
                }
            })
            .unwrap_or(STOP_TASK_NAME)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// `(success, error)` edge names of a registered task.
    pub fn edges(&self, name: &str) -> Option<(Option<&str>, Option<&str>)> {
        self.entries
            .get(name)
            .map(|entry| (entry.on_success.as_deref(), entry.on_error.as_deref()))
    }

    /// Number of registered tasks, including the terminal.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered task names, sorted.
    pub fn task_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn key_registry(&self) -> &KeyRegistry {
        &self.keys
    }

    /// Build-time check: key kind conflicts collected while adding tasks, and
    /// edges that name tasks this collection does not contain.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = self.key_conflicts.clone();

        for task_name in self.task_names() {
            let Some((on_success, on_error)) = self.edges(task_name) else {
                continue;
            };
            for target in [on_success, on_error].into_iter().flatten() {
                if !self.contains(target) {
                    DanglingEdgeDetected {
                        collection: &self.name,
                        task_name,
                        target,
                    }
                    .log();
                    errors.push(ValidationError::UnresolvedEdge {
                        collection: self.name.clone(),
                        task_name: task_name.to_string(),
                        target: target.to_string(),
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl fmt::Debug for TaskCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskCollection")
            .field("name", &self.name)
            .field("task_count", &self.entries.len())
            .field("task_names", &self.task_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{StaticFunction, WrongKeyKindFunction};
    use crate::engine::result::STOP_REASON_KEY;
    use crate::engine::EntryPoint;
    use serde_json::json;

    fn static_task(name: &str) -> Task {
        Task::from_function(name, StaticFunction::new("static", json!({"Proceed": false})))
    }

    #[test]
    fn new_collection_contains_only_the_terminal() {
        let collection = TaskCollection::new("Empty");

        assert_eq!(collection.len(), 1);
        assert!(collection.contains(STOP_TASK_NAME));
        assert_eq!(collection.task_names(), vec![STOP_TASK_NAME]);
    }

    #[test]
    fn lookup_is_by_name_regardless_of_registration_order() {
        let mut forward = TaskCollection::new("Forward");
        forward.add(static_task("A"), Some("B"), None);
        forward.add(static_task("B"), None, None);

        let mut backward = TaskCollection::new("Backward");
        backward.add(static_task("B"), None, None);
        backward.add(static_task("A"), Some("B"), None);

        for collection in [&forward, &backward] {
            assert_eq!(collection.get_task("A").name(), "A");
            assert_eq!(collection.get_next_task_name("A", false), "B");
        }
    }

    #[test]
    fn missing_names_yield_stop_task_for_any_name() {
        let collection = TaskCollection::new("Empty");
        let entry_point = EntryPoint::default();

        for name in ["Ghost", "", "StopTask ", "a/b"] {
            let task = collection.get_task(name);
            assert_eq!(task.name(), STOP_TASK_NAME);

            let result = task.run(&entry_point, None);
            assert!(!result.proceed());
            let reason = result.get_str(STOP_REASON_KEY).unwrap_or_default();
            assert!(reason.contains(&format!("'{}'", name)), "reason: {}", reason);
        }
    }

    #[test]
    fn next_task_name_falls_back_to_terminal() {
        let mut collection = TaskCollection::new("Edges");
        collection.add(static_task("OnlySuccess"), Some("Next"), None);
        collection.add(static_task("OnlyError"), None, Some("Recover"));

        let cases = vec![
            ("OnlySuccess", false, "Next"),
            ("OnlySuccess", true, STOP_TASK_NAME),
            ("OnlyError", false, STOP_TASK_NAME),
            ("OnlyError", true, "Recover"),
            ("Unknown", false, STOP_TASK_NAME),
            ("Unknown", true, STOP_TASK_NAME),
            (STOP_TASK_NAME, false, STOP_TASK_NAME),
        ];

        for (name, use_error_edge, expected) in cases {
            assert_eq!(
                collection.get_next_task_name(name, use_error_edge),
                expected,
                "name={} use_error_edge={}",
                name,
                use_error_edge
            );
        }
    }

    #[test]
    fn inert_and_reserved_tasks_are_skipped() {
        let mut collection = TaskCollection::new("Skips");

        assert!(!collection.add(Task::inert("Broken", "no function"), None, None));
        assert!(!collection.add(static_task(STOP_TASK_NAME), Some("Anywhere"), None));

        assert!(!collection.contains("Broken"));
        assert_eq!(collection.edges(STOP_TASK_NAME), Some((None, None)));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn validate_reports_dangling_edges() {
        let mut collection = TaskCollection::new("Dangling");
        collection.add(static_task("A"), Some("B"), Some(STOP_TASK_NAME));
        collection.add(static_task("C"), Some("A"), None);

        let errors = collection.validate().unwrap_err();

        assert_eq!(
            errors,
            vec![ValidationError::UnresolvedEdge {
                collection: "Dangling".to_string(),
                task_name: "A".to_string(),
                target: "B".to_string(),
            }]
        );
    }

    #[test]
    fn validate_reports_key_kind_conflicts() {
        let mut collection = TaskCollection::new("Keys");
        collection.add(Task::from_function("Bad", WrongKeyKindFunction), None, None);

        let errors = collection.validate().unwrap_err();

        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            ValidationError::ConflictingKeyKind { key, .. } if key == "Proceed"
        ));
    }

    #[test]
    fn well_formed_collection_validates() {
        let mut collection = TaskCollection::new("Good");
        collection.add(static_task("A"), Some("B"), Some("A"));
        collection.add(static_task("B"), None, None);

        assert!(collection.validate().is_ok());
    }
}
