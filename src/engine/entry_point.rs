// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Immutable description of the external event that triggered a workflow.

use serde_json::Value;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::backends::logging::TracingLogHandler;
use crate::config::consts::DEFAULT_TEMPLATE;
use crate::engine::result::{value_kind_name, ValueMap};
use crate::observability::messages::entry_point::{EntryPointFieldCoerced, LogHandlerPanicked};
use crate::observability::messages::StructuredLog;
use crate::traits::{LogHandler, LogLevel};

/// Opaque framework object (request, response, app state, ...).
pub type FrameworkHandle = Arc<dyn Any + Send + Sync>;

pub const SESSION_ID_KEYS: [&str; 2] = ["SESSIONID", "SESSION_ID"];

pub const WEB_FRAMEWORK_INSTRUCTION: &str = "WebFramework";

/// Instructions used when none, or something other than a mapping, is supplied.
pub fn default_instructions() -> ValueMap {
    let mut instructions = ValueMap::new();
    instructions.insert(WEB_FRAMEWORK_INSTRUCTION.to_string(), Value::from("generic"));
    instructions
}

/// Context for exactly one workflow execution. Never mutated by the engine.
#[derive(Clone)]
pub struct EntryPoint {
    request_path: String,
    request_method: String,
    query: HashMap<String, String>,
    post_data: HashMap<String, String>,
    cookies: HashMap<String, String>,
    default_template: String,
    log_handler: Arc<dyn LogHandler>,
    framework_request: Option<FrameworkHandle>,
    framework_response: Option<FrameworkHandle>,
    additional_objects: HashMap<String, FrameworkHandle>,
    instructions: ValueMap,
}

impl EntryPoint {
    pub fn builder() -> EntryPointBuilder {
        EntryPointBuilder::default()
    }

    pub fn request_path(&self) -> &str {
        &self.request_path
    }

    pub fn request_method(&self) -> &str {
        &self.request_method
    }

    pub fn query(&self) -> &HashMap<String, String> {
        &self.query
    }

    pub fn post_data(&self) -> &HashMap<String, String> {
        &self.post_data
    }

    pub fn cookies(&self) -> &HashMap<String, String> {
        &self.cookies
    }

    pub fn default_template(&self) -> &str {
        &self.default_template
    }

    pub fn instructions(&self) -> &ValueMap {
        &self.instructions
    }

    pub fn framework_request(&self) -> Option<&FrameworkHandle> {
        self.framework_request.as_ref()
    }

    pub fn framework_response(&self) -> Option<&FrameworkHandle> {
        self.framework_response.as_ref()
    }

    pub fn additional_object(&self, name: &str) -> Option<&FrameworkHandle> {
        self.additional_objects.get(name)
    }

    /// Borrow the framework request as its concrete type.
    pub fn downcast_request<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.framework_request
            .as_ref()
            .and_then(|handle| handle.downcast_ref::<T>())
    }

    /// Session token from cookies first, then from query parameters.
    pub fn session_token(&self) -> Option<&str> {
        [&self.cookies, &self.query].into_iter().find_map(|source| {
            SESSION_ID_KEYS
                .iter()
                .find_map(|key| source.get(*key))
                .map(String::as_str)
        })
    }

    /// Forward to the log handler. A panicking handler is contained here.
    pub fn log(&self, level: LogLevel, message: &str) {
        let handler = &self.log_handler;
        if panic::catch_unwind(AssertUnwindSafe(|| handler.log(level, message))).is_err() {
            LogHandlerPanicked {
                level: &level.to_string(),
            }
            .log();
        }
    }
}

impl Default for EntryPoint {
    fn default() -> Self {
        EntryPointBuilder::default().build()
    }
}

impl fmt::Debug for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPoint")
            .field("request_path", &self.request_path)
            .field("request_method", &self.request_method)
            .field("query", &self.query)
            .field("post_data", &self.post_data)
            .field("cookies", &self.cookies)
            .field("default_template", &self.default_template)
            .field("has_framework_request", &self.framework_request.is_some())
            .field("has_framework_response", &self.framework_response.is_some())
            .field(
                "additional_objects",
                &self.additional_objects.keys().collect::<Vec<_>>(),
            )
            .field("instructions", &self.instructions)
            .finish()
    }
}

#[derive(Default)]
pub struct EntryPointBuilder {
    request_path: Option<String>,
    request_method: Option<String>,
    query: HashMap<String, String>,
    post_data: HashMap<String, String>,
    cookies: HashMap<String, String>,
    default_template: Option<String>,
    log_handler: Option<Arc<dyn LogHandler>>,
    framework_request: Option<FrameworkHandle>,
    framework_response: Option<FrameworkHandle>,
    additional_objects: HashMap<String, FrameworkHandle>,
    instructions: Option<ValueMap>,
}

impl EntryPointBuilder {
    pub fn request_path(mut self, path: impl Into<String>) -> Self {
        self.request_path = Some(path.into());
        self
    }

    pub fn request_method(mut self, method: impl Into<String>) -> Self {
        self.request_method = Some(method.into());
        self
    }

    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn query(mut self, query: HashMap<String, String>) -> Self {
        self.query = query;
        self
    }

    pub fn post_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.post_data.insert(key.into(), value.into());
        self
    }

    pub fn post_data(mut self, post_data: HashMap<String, String>) -> Self {
        self.post_data = post_data;
        self
    }

    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn cookies(mut self, cookies: HashMap<String, String>) -> Self {
        self.cookies = cookies;
        self
    }

    /// Accept cookies in loosely typed form. Anything other than a mapping
    /// becomes an empty cookie jar; non-string values are stringified.
    pub fn cookies_value(mut self, cookies: Value) -> Self {
        self.cookies = match cookies {
            Value::Object(map) => map
                .into_iter()
                .map(|(name, value)| {
                    let value = match value {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    (name, value)
                })
                .collect(),
            other => {
                EntryPointFieldCoerced {
                    field: "cookies",
                    received: value_kind_name(&other),
                    replacement: "an empty mapping",
                }
                .log();
                HashMap::new()
            }
        };
        self
    }

    pub fn default_template(mut self, template: impl Into<String>) -> Self {
        self.default_template = Some(template.into());
        self
    }

    pub fn log_handler(mut self, handler: Arc<dyn LogHandler>) -> Self {
        self.log_handler = Some(handler);
        self
    }

    pub fn framework_request(mut self, request: FrameworkHandle) -> Self {
        self.framework_request = Some(request);
        self
    }

    pub fn framework_response(mut self, response: FrameworkHandle) -> Self {
        self.framework_response = Some(response);
        self
    }

    pub fn additional_object(mut self, name: impl Into<String>, object: FrameworkHandle) -> Self {
        self.additional_objects.insert(name.into(), object);
        self
    }

    pub fn instruction(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.instructions
            .get_or_insert_with(ValueMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn instructions(mut self, instructions: ValueMap) -> Self {
        self.instructions = Some(instructions);
        self
    }

    /// Accept instructions in loosely typed form. Anything other than a
    /// mapping is replaced by [`default_instructions`].
    pub fn instructions_value(mut self, instructions: Value) -> Self {
        self.instructions = match instructions {
            Value::Object(map) => Some(map.into_iter().collect()),
            other => {
                EntryPointFieldCoerced {
                    field: "instructions",
                    received: value_kind_name(&other),
                    replacement: "the default instructions",
                }
                .log();
                Some(default_instructions())
            }
        };
        self
    }

    pub fn build(self) -> EntryPoint {
        EntryPoint {
            request_path: self.request_path.unwrap_or_else(|| "/".to_string()),
            request_method: self.request_method.unwrap_or_else(|| "GET".to_string()),
            query: self.query,
            post_data: self.post_data,
            cookies: self.cookies,
            default_template: self
                .default_template
                .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()),
            log_handler: self
                .log_handler
                .unwrap_or_else(|| Arc::new(TracingLogHandler::default())),
            framework_request: self.framework_request,
            framework_response: self.framework_response,
            additional_objects: self.additional_objects,
            instructions: self.instructions.unwrap_or_else(default_instructions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::{PanickingLogHandler, RecordingLogHandler};
    use serde_json::json;

    #[test]
    fn defaults_are_filled_in() {
        let entry_point = EntryPoint::default();

        assert_eq!(entry_point.request_path(), "/");
        assert_eq!(entry_point.request_method(), "GET");
        assert_eq!(entry_point.default_template(), DEFAULT_TEMPLATE);
        assert!(entry_point.cookies().is_empty());
        assert_eq!(entry_point.instructions(), &default_instructions());
    }

    #[test]
    fn non_mapping_cookies_become_empty() {
        let entry_point = EntryPoint::builder()
            .cookies_value(json!("SESSIONID=abc"))
            .build();

        assert!(entry_point.cookies().is_empty());
    }

    #[test]
    fn mapping_cookies_are_stringified() {
        let entry_point = EntryPoint::builder()
            .cookies_value(json!({"SESSIONID": "abc", "visits": 3}))
            .build();

        assert_eq!(entry_point.cookies().get("SESSIONID").map(String::as_str), Some("abc"));
        assert_eq!(entry_point.cookies().get("visits").map(String::as_str), Some("3"));
    }

    #[test]
    fn non_mapping_instructions_fall_back_to_default() {
        let entry_point = EntryPoint::builder()
            .instructions_value(json!(["flask"]))
            .build();

        assert_eq!(entry_point.instructions(), &default_instructions());
    }

    #[test]
    fn session_token_prefers_cookies_over_query() {
        let entry_point = EntryPoint::builder()
            .query_param("SESSIONID", "from-query")
            .cookie("SESSION_ID", "from-cookie")
            .build();
        assert_eq!(entry_point.session_token(), Some("from-cookie"));

        let query_only = EntryPoint::builder()
            .query_param("SESSION_ID", "from-query")
            .build();
        assert_eq!(query_only.session_token(), Some("from-query"));

        assert_eq!(EntryPoint::default().session_token(), None);
    }

    #[test]
    fn framework_request_can_be_downcast() {
        struct FakeRequest {
            remote_addr: &'static str,
        }

        let entry_point = EntryPoint::builder()
            .framework_request(Arc::new(FakeRequest {
                remote_addr: "127.0.0.1",
            }))
            .build();

        let request = entry_point.downcast_request::<FakeRequest>().unwrap();
        assert_eq!(request.remote_addr, "127.0.0.1");
        assert!(entry_point.downcast_request::<String>().is_none());
    }

    #[test]
    fn log_forwards_to_handler() {
        let recorder = Arc::new(RecordingLogHandler::default());
        let entry_point = EntryPoint::builder().log_handler(recorder.clone()).build();

        entry_point.log(LogLevel::Warning, "careful");

        assert_eq!(
            recorder.entries(),
            vec![(LogLevel::Warning, "careful".to_string())]
        );
    }

    #[test]
    fn panicking_log_handler_is_contained() {
        let entry_point = EntryPoint::builder()
            .log_handler(Arc::new(PanickingLogHandler))
            .build();

        entry_point.log(LogLevel::Error, "this handler explodes");
    }
}
