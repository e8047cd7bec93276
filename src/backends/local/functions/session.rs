// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use anyhow::{bail, Context};
use serde_json::{json, Value};

use crate::backends::local::functions::carried_values;
use crate::config::{KeySpec, ValueKind};
use crate::engine::result::{
    ACTION_KEY, CONTEXT_KEY, COOKIES_KEY, REDIRECT_URL_KEY, STOP_REASON_KEY, TEMPLATE_NAME_KEY,
};
use crate::engine::{EntryPoint, TaskResult, ValueMap, PROCEED_KEY};
use crate::traits::{Function, LogLevel, SessionStore};

pub const SESSION_TOKEN_KEY: &str = "SessionToken";

/// Cookie carrying the session token back to the client.
const SESSION_COOKIE: &str = "SESSIONID";

/// Keys describing the current response rather than the session.
const TRANSIENT_KEYS: [&str; 8] = [
    PROCEED_KEY,
    ACTION_KEY,
    REDIRECT_URL_KEY,
    TEMPLATE_NAME_KEY,
    COOKIES_KEY,
    CONTEXT_KEY,
    STOP_REASON_KEY,
    SESSION_TOKEN_KEY,
];

fn new_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Loads the caller's session into the value mapping.
///
/// The token comes from the `SESSIONID` / `SESSION_ID` cookie or query
/// parameter; without one a fresh token is issued. Stored values are merged
/// over the previous mapping, then `SessionToken`, a `SESSIONID` cookie and
/// `Proceed = true` are set.
pub struct GetSessionFunction {
    store: Arc<dyn SessionStore>,
}

impl GetSessionFunction {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

impl Function for GetSessionFunction {
    fn compute(&self, entry_point: &EntryPoint, previous: Option<&TaskResult>) -> anyhow::Result<TaskResult> {
        let token = match entry_point.session_token() {
            Some(token) => token.to_string(),
            None => {
                let token = new_token();
                entry_point.log(LogLevel::Debug, &format!("Issued new session token {}", token));
                token
            }
        };

        let stored = self
            .store
            .get(&token)
            .with_context(|| format!("failed to load session '{}'", token))?;

        let mut values = carried_values(previous);
        values.extend(stored.unwrap_or_default());
        values.insert(SESSION_TOKEN_KEY.to_string(), Value::from(token.as_str()));
        values.insert(COOKIES_KEY.to_string(), json!({ SESSION_COOKIE: token }));
        values.insert(PROCEED_KEY.to_string(), Value::Bool(true));
        Ok(TaskResult::from_values(values))
    }

    fn name(&self) -> &str {
        "get_session"
    }

    fn declared_keys(&self) -> Vec<KeySpec> {
        vec![
            KeySpec::new(SESSION_TOKEN_KEY, ValueKind::String),
            KeySpec::new(COOKIES_KEY, ValueKind::Object),
        ]
    }
}

/// Persists the previous mapping, minus response keys, under the session token.
///
/// The token is read from the previous result's `SessionToken`, falling back
/// to the request. Without any token nothing is saved. Saving after a failed
/// task is itself a failure.
pub struct SaveSessionFunction {
    store: Arc<dyn SessionStore>,
}

impl SaveSessionFunction {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    fn session_data(values: &ValueMap) -> ValueMap {
        values
            .iter()
            .filter(|(key, _)| !TRANSIENT_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl Function for SaveSessionFunction {
    fn compute(&self, entry_point: &EntryPoint, previous: Option<&TaskResult>) -> anyhow::Result<TaskResult> {
        if let Some(result) = previous.filter(|r| r.is_error()) {
            bail!(
                "refusing to save session after a failed task: {}",
                result.err_msg().unwrap_or("no error message")
            );
        }

        let mut values = carried_values(previous);
        let token = values
            .get(SESSION_TOKEN_KEY)
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| entry_point.session_token().map(str::to_string));

        match token {
            Some(token) => {
                let data = Self::session_data(&values);
                self.store
                    .save(&token, &data)
                    .with_context(|| format!("failed to save session '{}'", token))?;
                values.insert(SESSION_TOKEN_KEY.to_string(), Value::from(token));
            }
            None => entry_point.log(LogLevel::Warning, "No session token; session data not saved"),
        }

        values.insert(PROCEED_KEY.to_string(), Value::Bool(true));
        Ok(TaskResult::from_values(values))
    }

    fn name(&self) -> &str {
        "save_session"
    }

    fn declared_keys(&self) -> Vec<KeySpec> {
        vec![KeySpec::new(SESSION_TOKEN_KEY, ValueKind::String)]
    }
}
