// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::config::{KeySpec, ValueKind};
use crate::engine::{EntryPoint, TaskResult, PROCEED_KEY};
use crate::traits::Function;

pub const DEFAULT_COUNTER_KEY: &str = "CounterValue";

/// Counts visits in the value mapping.
///
/// A first visit (no integer counter in the previous mapping) yields 0;
/// otherwise the counter is incremented. After an error the counter restarts
/// and the traversal stops.
#[derive(Debug, Clone)]
pub struct VisitCounterFunction {
    key: String,
}

impl VisitCounterFunction {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl Default for VisitCounterFunction {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTER_KEY)
    }
}

impl Function for VisitCounterFunction {
    fn compute(&self, _entry_point: &EntryPoint, previous: Option<&TaskResult>) -> anyhow::Result<TaskResult> {
        let (mut values, counter, proceed) = match previous {
            Some(result) if result.is_error() => (Default::default(), 0, false),
            Some(result) => {
                let counter = result
                    .get(&self.key)
                    .and_then(Value::as_i64)
                    .map_or(0, |count| count.saturating_add(1));
                (result.values().clone(), counter, true)
            }
            None => (Default::default(), 0, true),
        };

        values.insert(self.key.clone(), Value::from(counter));
        values.insert(PROCEED_KEY.to_string(), Value::Bool(proceed));
        Ok(TaskResult::from_values(values))
    }

    fn name(&self) -> &str {
        "visit_counter"
    }

    fn declared_keys(&self) -> Vec<KeySpec> {
        vec![KeySpec::new(self.key.clone(), ValueKind::Number)]
    }
}
