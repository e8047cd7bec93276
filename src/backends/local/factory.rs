// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::functions::*;
use crate::config::TaskConfig;
use crate::traits::{Function, SessionStore};

/// Shared collaborators handed to functions that need them.
#[derive(Clone)]
pub struct FunctionContext {
    pub session_store: Arc<dyn SessionStore>,
    pub default_template: String,
}

/// Factory for creating local (in-process) function instances
pub struct LocalFunctionFactory;

impl LocalFunctionFactory {
    /// Create a function instance from task configuration
    ///
    /// The `function` field determines which function to create:
    /// - "serve_template" -> ServeTemplateFunction (options: `template`, `templates`;
    ///   `template` defaults to the configured default template)
    /// - "redirect" -> RedirectFunction (options: `url`, `proceed`)
    /// - "visit_counter" -> VisitCounterFunction (options: `key`)
    /// - "get_session" -> GetSessionFunction
    /// - "save_session" -> SaveSessionFunction
    /// - "error_message" -> ErrorMessageFunction
    pub fn create_function(
        config: &TaskConfig,
        context: &FunctionContext,
    ) -> Result<Arc<dyn Function>, String> {
        let options = &config.options;

        match config.function.as_str() {
            "serve_template" => {
                let template = string_option(config, "template")?
                    .unwrap_or_else(|| context.default_template.clone());
                let mut function = ServeTemplateFunction::new(Some(template));
                for (path, template) in path_templates(config)? {
                    function = function.with_path_template(path, template);
                }
                Ok(Arc::new(function))
            }
            "redirect" => {
                let url = string_option(config, "url")?
                    .unwrap_or_else(|| RedirectFunction::default().url().to_string());
                let proceed = match options.get("proceed") {
                    None => false,
                    Some(Value::Bool(proceed)) => *proceed,
                    Some(_) => return Err(invalid_option(config, "proceed", "a boolean")),
                };
                Ok(Arc::new(RedirectFunction::new(url, proceed)))
            }
            "visit_counter" => {
                let key = string_option(config, "key")?
                    .unwrap_or_else(|| DEFAULT_COUNTER_KEY.to_string());
                Ok(Arc::new(VisitCounterFunction::new(key)))
            }
            "get_session" => Ok(Arc::new(GetSessionFunction::new(Arc::clone(
                &context.session_store,
            )))),
            "save_session" => Ok(Arc::new(SaveSessionFunction::new(Arc::clone(
                &context.session_store,
            )))),
            "error_message" => Ok(Arc::new(ErrorMessageFunction)),
            other => Err(format!(
                "Unknown local function implementation: '{}' (task '{}')",
                other, config.name
            )),
        }
    }

    /// List all available local function implementations
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec![
            "serve_template",
            "redirect",
            "visit_counter",
            "get_session",
            "save_session",
            "error_message",
        ]
    }

    /// Check if an implementation is available
    pub fn is_implementation_available(impl_name: &str) -> bool {
        Self::list_available_implementations().contains(&impl_name)
    }
}

fn invalid_option(config: &TaskConfig, key: &str, expected: &str) -> String {
    format!(
        "Task '{}' option '{}' must be {}",
        config.name, key, expected
    )
}

fn string_option(config: &TaskConfig, key: &str) -> Result<Option<String>, String> {
    match config.options.get(key) {
        None => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(invalid_option(config, key, "a string")),
    }
}

fn path_templates(config: &TaskConfig) -> Result<HashMap<String, String>, String> {
    match config.options.get("templates") {
        None => Ok(HashMap::new()),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(path, template)| match template {
                Value::String(template) => Ok((path.clone(), template.clone())),
                _ => Err(invalid_option(config, "templates", "a mapping of path to template name")),
            })
            .collect(),
        Some(_) => Err(invalid_option(config, "templates", "a mapping of path to template name")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::session::MemorySessionStore;
    use crate::engine::result::{REDIRECT_URL_KEY, TEMPLATE_NAME_KEY};
    use crate::engine::EntryPoint;
    use serde_json::json;

    fn create_test_config(function: &str, options: Value) -> TaskConfig {
        TaskConfig {
            name: "test".to_string(),
            function: function.to_string(),
            on_success: None,
            on_error: None,
            options: serde_json::from_value(options).unwrap(),
        }
    }

    fn context() -> FunctionContext {
        FunctionContext {
            session_store: Arc::new(MemorySessionStore::new()),
            default_template: "index.html".to_string(),
        }
    }

    #[test]
    fn test_every_listed_implementation_is_creatable() {
        for name in LocalFunctionFactory::list_available_implementations() {
            let config = create_test_config(name, json!({}));
            let function = LocalFunctionFactory::create_function(&config, &context())
                .unwrap_or_else(|e| panic!("Failed to create {}: {}", name, e));
            assert_eq!(function.name(), name);
            assert!(LocalFunctionFactory::is_implementation_available(name));
        }
    }

    #[test]
    fn test_unknown_implementation() {
        let config = create_test_config("nonexistent", json!({}));

        let err = LocalFunctionFactory::create_function(&config, &context()).err().unwrap();

        assert!(err.contains("Unknown local function implementation: 'nonexistent'"));
        assert!(!LocalFunctionFactory::is_implementation_available("nonexistent"));
    }

    #[test]
    fn test_options_are_applied() {
        let config = create_test_config(
            "serve_template",
            json!({"template": "home.html", "templates": {"/about": "about.html"}}),
        );
        let function = LocalFunctionFactory::create_function(&config, &context()).unwrap();
        let entry_point = EntryPoint::builder().request_path("/about").build();
        let result = function.compute(&entry_point, None).unwrap();
        assert_eq!(result.get_str(TEMPLATE_NAME_KEY), Some("about.html"));

        let config = create_test_config("redirect", json!({"url": "/login", "proceed": true}));
        let function = LocalFunctionFactory::create_function(&config, &context()).unwrap();
        let result = function.compute(&EntryPoint::default(), None).unwrap();
        assert_eq!(result.get_str(REDIRECT_URL_KEY), Some("/login"));
        assert!(result.proceed());
    }

    #[test]
    fn test_invalid_options() {
        let cases = vec![
            ("serve_template", json!({"template": 3}), "option 'template' must be a string"),
            ("serve_template", json!({"templates": ["a"]}), "option 'templates'"),
            ("serve_template", json!({"templates": {"/": 1}}), "option 'templates'"),
            ("redirect", json!({"proceed": "yes"}), "option 'proceed' must be a boolean"),
            ("visit_counter", json!({"key": false}), "option 'key' must be a string"),
        ];

        for (function, options, expected) in cases {
            let config = create_test_config(function, options);
            let err = LocalFunctionFactory::create_function(&config, &context()).err().unwrap();
            assert!(err.contains(expected), "{}: {}", function, err);
        }
    }
}
