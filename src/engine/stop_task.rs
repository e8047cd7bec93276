// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::STOP_TASK_NAME;
use crate::config::{KeySpec, ValueKind};
use crate::engine::result::{
    default_values, ACTION_KEY, PROCEED_KEY, REDIRECT_URL_KEY, STOP_REASON_KEY,
};
use crate::engine::{EntryPoint, Task, TaskResult};
use crate::traits::Function;

pub const DEFAULT_STOP_REASON: &str = "workflow reached the terminal task";

/// Terminal function: ignores its inputs and answers with the safe default
/// action, annotated with why the traversal stopped.
#[derive(Debug, Clone)]
pub struct StopTask {
    reason: String,
}

impl StopTask {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Wrap into a task registered under the reserved terminal name.
    pub fn into_task(self) -> Task {
        Task::from_function(STOP_TASK_NAME, self)
    }
}

impl Default for StopTask {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_REASON)
    }
}

impl Function for StopTask {
    fn compute(
        &self,
        _entry_point: &EntryPoint,
        _previous: Option<&TaskResult>,
    ) -> anyhow::Result<TaskResult> {
        Ok(TaskResult::from_values(default_values()).with_value(STOP_REASON_KEY, self.reason.as_str()))
    }

    fn name(&self) -> &str {
        "stop_task"
    }

    fn declared_keys(&self) -> Vec<KeySpec> {
        vec![
            KeySpec::new(PROCEED_KEY, ValueKind::Bool),
            KeySpec::new(ACTION_KEY, ValueKind::String),
            KeySpec::new(REDIRECT_URL_KEY, ValueKind::String),
            KeySpec::new(STOP_REASON_KEY, ValueKind::String),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ignores_inputs_and_stops() {
        let task = StopTask::new("unknown task 'Ghost'").into_task();
        let previous = TaskResult::from_json(json!({"Proceed": true, "Total": 1}));

        let with_previous = task.run(&EntryPoint::default(), Some(&previous));
        let without_previous = task.run(&EntryPoint::default(), None);

        assert_eq!(with_previous, without_previous);
        assert!(!with_previous.proceed());
        assert!(!with_previous.is_error());
        assert_eq!(with_previous.get_str(ACTION_KEY), Some("Redirect"));
        assert_eq!(with_previous.get_str(REDIRECT_URL_KEY), Some("/"));
        assert_eq!(with_previous.get_str(STOP_REASON_KEY), Some("unknown task 'Ghost'"));
    }

    #[test]
    fn registers_under_reserved_name() {
        assert_eq!(StopTask::default().into_task().name(), STOP_TASK_NAME);
    }
}
