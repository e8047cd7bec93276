// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The payload threaded from one task to the next.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::consts::DEFAULT_REDIRECT_URL;

/// String-keyed heterogeneous values carried by a [`TaskResult`].
pub type ValueMap = BTreeMap<String, Value>;

/// Boolean key read by the workflow driver to decide whether to continue.
pub const PROCEED_KEY: &str = "Proceed";
pub const ACTION_KEY: &str = "Action";
pub const REDIRECT_URL_KEY: &str = "RedirectURL";
pub const TEMPLATE_NAME_KEY: &str = "TemplateName";
pub const COOKIES_KEY: &str = "Cookies";
pub const CONTEXT_KEY: &str = "Context";
/// Why a stop task ended the traversal.
pub const STOP_REASON_KEY: &str = "StopReason";

pub const ACTION_REDIRECT: &str = "Redirect";
pub const ACTION_SERVE_TEMPLATE: &str = "ServeTemplate";

/// The safe default mapping: redirect to `/` and stop.
pub fn default_values() -> ValueMap {
    let mut values = ValueMap::new();
    values.insert(ACTION_KEY.to_string(), Value::from(ACTION_REDIRECT));
    values.insert(REDIRECT_URL_KEY.to_string(), Value::from(DEFAULT_REDIRECT_URL));
    values.insert(TEMPLATE_NAME_KEY.to_string(), Value::from(""));
    values.insert(PROCEED_KEY.to_string(), Value::Bool(false));
    values
}

/// Short name of a JSON value's shape, used in diagnostics.
pub(crate) fn value_kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "mapping",
    }
}

/// Value mapping plus error flag and message, produced by every task.
///
/// The mapping is never absent: constructing a result without one (or from a
/// JSON value that is not an object) materializes [`default_values`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    values: ValueMap,
    is_error: bool,
    err_msg: Option<String>,
}

impl TaskResult {
    pub fn new(values: Option<ValueMap>, is_error: bool, err_msg: Option<String>) -> Self {
        Self {
            values: values.unwrap_or_else(default_values),
            is_error,
            err_msg,
        }
    }

    pub fn from_values(values: ValueMap) -> Self {
        Self::new(Some(values), false, None)
    }

    /// Build from a JSON object; anything else yields the default mapping.
    pub fn from_json(value: Value) -> Self {
        let values = match value {
            Value::Object(map) => Some(map.into_iter().collect()),
            _ => None,
        };
        Self::new(values, false, None)
    }

    /// An error result carrying the default mapping.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(None, true, Some(message.into()))
    }

    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    pub fn into_values(self) -> ValueMap {
        self.values
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn err_msg(&self) -> Option<&str> {
        self.err_msg.as_deref()
    }

    /// Continuation signal. Absent or non-boolean `Proceed` reads as `false`.
    pub fn proceed(&self) -> bool {
        matches!(self.values.get(PROCEED_KEY), Some(Value::Bool(true)))
    }

    /// Deterministic diagnostic dump; keys are listed in sorted order.
    pub fn dump(&self) -> String {
        let mut data = String::from("\n");
        for (key, value) in &self.values {
            data.push_str(&format!("\t\t{}={}\n", key, value));
        }
        format!(
            "DUMP\n----\n\tentries={}\n\tis_error={}\n\terr_msg={:?}\n\tDATA:{}",
            self.values.len(),
            self.is_error,
            self.err_msg,
            data
        )
    }
}

impl Default for TaskResult {
    fn default() -> Self {
        Self::new(None, false, None)
    }
}

impl fmt::Display for TaskResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dump())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_mapping_materializes_default_values() {
        let result = TaskResult::new(None, false, None);

        assert_eq!(result.values(), &default_values());
        assert_eq!(result.get_str(ACTION_KEY), Some("Redirect"));
        assert_eq!(result.get_str(REDIRECT_URL_KEY), Some("/"));
        assert!(!result.proceed());
        assert!(!result.is_error());
    }

    #[test]
    fn non_object_json_is_normalized_to_default_values() {
        for invalid in [json!(null), json!(42), json!("text"), json!([1, 2])] {
            let result = TaskResult::from_json(invalid.clone());
            assert_eq!(result.values(), &default_values(), "input: {}", invalid);
        }
    }

    #[test]
    fn proceed_requires_a_true_boolean() {
        let cases = vec![
            (json!({"Proceed": true}), true),
            (json!({"Proceed": false}), false),
            (json!({"Proceed": "true"}), false),
            (json!({"Proceed": 1}), false),
            (json!({"Other": true}), false),
        ];

        for (values, expected) in cases {
            let result = TaskResult::from_json(values.clone());
            assert_eq!(result.proceed(), expected, "values: {}", values);
        }
    }

    #[test]
    fn error_result_keeps_message_and_default_mapping() {
        let result = TaskResult::error("boom");

        assert!(result.is_error());
        assert_eq!(result.err_msg(), Some("boom"));
        assert_eq!(result.values(), &default_values());
    }

    #[test]
    fn dump_is_deterministic_and_sorted() {
        let a = TaskResult::from_json(json!({"b": 2, "a": 1, "c": "x"}));
        let b = TaskResult::from_json(json!({"c": "x", "a": 1, "b": 2}));

        assert_eq!(a.dump(), b.dump());
        let dump = a.to_string();
        let a_pos = dump.find("a=1").unwrap();
        let b_pos = dump.find("b=2").unwrap();
        let c_pos = dump.find("c=\"x\"").unwrap();
        assert!(a_pos < b_pos && b_pos < c_pos);
        assert!(dump.contains("is_error=false"));
        assert!(dump.contains("err_msg=None"));
    }

    #[test]
    fn with_value_overwrites_existing_keys() {
        let result = TaskResult::from_json(json!({"Proceed": true}))
            .with_value(PROCEED_KEY, false)
            .with_value("Total", 10);

        assert!(!result.proceed());
        assert_eq!(result.get("Total"), Some(&json!(10)));
    }
}
