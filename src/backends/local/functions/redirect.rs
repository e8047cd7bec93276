// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::backends::local::functions::carried_values;
use crate::config::consts::DEFAULT_REDIRECT_URL;
use crate::config::{KeySpec, ValueKind};
use crate::engine::result::{ACTION_KEY, ACTION_REDIRECT, REDIRECT_URL_KEY};
use crate::engine::{EntryPoint, TaskResult, PROCEED_KEY};
use crate::traits::Function;

/// Asks the host to redirect. With `proceed` set the traversal continues,
/// which lets a later task override the target.
#[derive(Debug, Clone)]
pub struct RedirectFunction {
    url: String,
    proceed: bool,
}

impl RedirectFunction {
    pub fn new(url: impl Into<String>, proceed: bool) -> Self {
        Self {
            url: url.into(),
            proceed,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for RedirectFunction {
    fn default() -> Self {
        Self::new(DEFAULT_REDIRECT_URL, false)
    }
}

impl Function for RedirectFunction {
    fn compute(&self, _entry_point: &EntryPoint, previous: Option<&TaskResult>) -> anyhow::Result<TaskResult> {
        let mut values = carried_values(previous);
        values.insert(ACTION_KEY.to_string(), Value::from(ACTION_REDIRECT));
        values.insert(REDIRECT_URL_KEY.to_string(), Value::from(self.url.as_str()));
        values.insert(PROCEED_KEY.to_string(), Value::Bool(self.proceed));
        Ok(TaskResult::from_values(values))
    }

    fn name(&self) -> &str {
        "redirect"
    }

    fn declared_keys(&self) -> Vec<KeySpec> {
        vec![
            KeySpec::new(ACTION_KEY, ValueKind::String),
            KeySpec::new(REDIRECT_URL_KEY, ValueKind::String),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_settings() {
        let cases = vec![
            (RedirectFunction::default(), "/", false),
            (RedirectFunction::new("/login", false), "/login", false),
            (RedirectFunction::new("/next", true), "/next", true),
        ];

        for (function, url, proceed) in cases {
            let result = function.compute(&EntryPoint::default(), None).unwrap();
            assert_eq!(result.get_str(REDIRECT_URL_KEY), Some(url));
            assert_eq!(result.get_str(ACTION_KEY), Some(ACTION_REDIRECT));
            assert_eq!(result.proceed(), proceed);
        }
    }
}
