// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::anyhow;
use serde_json::Value;

use crate::config::{KeySpec, ValueKind};
use crate::engine::{EntryPoint, TaskResult, ValueMap, PROCEED_KEY};
use crate::errors::SessionError;
use crate::traits::{Function, LogHandler, LogLevel, SessionStore};

/// Build a value mapping from a JSON object literal
pub fn values(json: Value) -> ValueMap {
    match json {
        Value::Object(map) => map.into_iter().collect(),
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// A function that always returns the same mapping and counts its calls
pub struct StaticFunction {
    name: String,
    output: Value,
    calls: AtomicUsize,
}

impl StaticFunction {
    pub fn new(name: &str, output: Value) -> Self {
        Self {
            name: name.to_string(),
            output,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Function for StaticFunction {
    fn compute(&self, _: &EntryPoint, _: Option<&TaskResult>) -> anyhow::Result<TaskResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(TaskResult::from_json(self.output.clone()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Returns the scripted results in order, repeating the last one once exhausted
pub struct ScriptedFunction {
    outputs: Vec<TaskResult>,
    next: AtomicUsize,
}

impl ScriptedFunction {
    pub fn new(outputs: Vec<TaskResult>) -> Self {
        assert!(!outputs.is_empty(), "scripted function needs at least one result");
        Self {
            outputs,
            next: AtomicUsize::new(0),
        }
    }
}

impl Function for ScriptedFunction {
    fn compute(&self, _: &EntryPoint, _: Option<&TaskResult>) -> anyhow::Result<TaskResult> {
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        let last = self.outputs.len() - 1;
        Ok(self.outputs[index.min(last)].clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// A function that always fails for testing error edges
pub struct FailingFunction {
    message: String,
}

impl FailingFunction {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl Function for FailingFunction {
    fn compute(&self, _: &EntryPoint, _: Option<&TaskResult>) -> anyhow::Result<TaskResult> {
        Err(anyhow!("{}", self.message))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// A function that panics instead of returning
pub struct PanickingFunction;

impl Function for PanickingFunction {
    fn compute(&self, _: &EntryPoint, _: Option<&TaskResult>) -> anyhow::Result<TaskResult> {
        panic!("function exploded");
    }

    fn name(&self) -> &str {
        "panicking"
    }
}

/// Appends its step name to the `Trail` array of the previous mapping
pub struct AppendStepFunction {
    step: String,
    proceed: bool,
}

impl AppendStepFunction {
    pub fn new(step: &str, proceed: bool) -> Self {
        Self {
            step: step.to_string(),
            proceed,
        }
    }
}

impl Function for AppendStepFunction {
    fn compute(&self, _: &EntryPoint, previous: Option<&TaskResult>) -> anyhow::Result<TaskResult> {
        let mut values = previous.map(|r| r.values().clone()).unwrap_or_default();
        let mut trail = match values.remove("Trail") {
            Some(Value::Array(trail)) => trail,
            _ => Vec::new(),
        };
        trail.push(Value::from(self.step.as_str()));
        values.insert("Trail".to_string(), Value::Array(trail));
        values.insert(PROCEED_KEY.to_string(), Value::Bool(self.proceed));
        Ok(TaskResult::from_values(values))
    }

    fn name(&self) -> &str {
        "append_step"
    }
}

/// Declares `Proceed` as a string, which the key registry must reject
pub struct WrongKeyKindFunction;

impl Function for WrongKeyKindFunction {
    fn compute(&self, _: &EntryPoint, _: Option<&TaskResult>) -> anyhow::Result<TaskResult> {
        Ok(TaskResult::default())
    }

    fn name(&self) -> &str {
        "wrong_key_kind"
    }

    fn declared_keys(&self) -> Vec<KeySpec> {
        vec![KeySpec::new(PROCEED_KEY, ValueKind::String)]
    }
}

/// Captures every log call for assertions
#[derive(Default)]
pub struct RecordingLogHandler {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLogHandler {
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn entries_at(&self, level: LogLevel) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    }
}

impl LogHandler for RecordingLogHandler {
    fn log(&self, level: LogLevel, message: &str) {
        self.entries.lock().unwrap().push((level, message.to_string()));
    }
}

/// A log handler whose every call panics
pub struct PanickingLogHandler;

impl LogHandler for PanickingLogHandler {
    fn log(&self, _: LogLevel, _: &str) {
        panic!("log handler exploded");
    }
}

/// A session store whose reads and writes always fail
pub struct FailingSessionStore;

impl SessionStore for FailingSessionStore {
    fn get(&self, _: &str) -> Result<Option<ValueMap>, SessionError> {
        Err(SessionError::Poisoned)
    }

    fn save(&self, _: &str, _: &ValueMap) -> Result<(), SessionError> {
        Err(SessionError::Poisoned)
    }
}
