// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use serde_json::Value;

use crate::backends::local::functions::carried_values;
use crate::config::{KeySpec, ValueKind};
use crate::engine::result::{ACTION_KEY, ACTION_SERVE_TEMPLATE, TEMPLATE_NAME_KEY};
use crate::engine::{EntryPoint, TaskResult, PROCEED_KEY};
use crate::traits::Function;

/// Ends a traversal by asking the host to render a template.
///
/// Template choice, first match wins: a per-path template, the configured
/// template, the entry point's default template.
#[derive(Debug, Clone, Default)]
pub struct ServeTemplateFunction {
    template: Option<String>,
    path_templates: HashMap<String, String>,
}

impl ServeTemplateFunction {
    pub fn new(template: Option<String>) -> Self {
        Self {
            template,
            path_templates: HashMap::new(),
        }
    }

    pub fn with_path_template(mut self, path: impl Into<String>, template: impl Into<String>) -> Self {
        self.path_templates.insert(path.into(), template.into());
        self
    }

    fn template_for<'a>(&'a self, entry_point: &'a EntryPoint) -> &'a str {
        self.path_templates
            .get(entry_point.request_path())
            .or(self.template.as_ref())
            .map(String::as_str)
            .unwrap_or_else(|| entry_point.default_template())
    }
}

impl Function for ServeTemplateFunction {
    fn compute(&self, entry_point: &EntryPoint, previous: Option<&TaskResult>) -> anyhow::Result<TaskResult> {
        let mut values = carried_values(previous);
        values.insert(PROCEED_KEY.to_string(), Value::Bool(false));
        values.insert(TEMPLATE_NAME_KEY.to_string(), Value::from(self.template_for(entry_point)));
        values.insert(ACTION_KEY.to_string(), Value::from(ACTION_SERVE_TEMPLATE));
        Ok(TaskResult::from_values(values))
    }

    fn name(&self) -> &str {
        "serve_template"
    }

    fn declared_keys(&self) -> Vec<KeySpec> {
        vec![
            KeySpec::new(TEMPLATE_NAME_KEY, ValueKind::String),
            KeySpec::new(ACTION_KEY, ValueKind::String),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn template_selection() {
        let function = ServeTemplateFunction::new(Some("home.html".to_string()))
            .with_path_template("/about", "about.html");

        let cases = vec![
            ("/about", "about.html"),
            ("/", "home.html"),
            ("/anything", "home.html"),
        ];

        for (path, expected) in cases {
            let entry_point = EntryPoint::builder().request_path(path).build();
            let result = function.compute(&entry_point, None).unwrap();
            assert_eq!(result.get_str(TEMPLATE_NAME_KEY), Some(expected), "path {}", path);
        }
    }

    #[test]
    fn falls_back_to_entry_point_default_template() {
        let entry_point = EntryPoint::builder().default_template("base.html").build();

        let result = ServeTemplateFunction::default().compute(&entry_point, None).unwrap();

        assert_eq!(result.get_str(TEMPLATE_NAME_KEY), Some("base.html"));
    }

    #[test]
    fn keeps_previous_values_and_stops() {
        let previous = TaskResult::from_json(json!({"CounterValue": 3, "Proceed": true}));

        let result = ServeTemplateFunction::default()
            .compute(&EntryPoint::default(), Some(&previous))
            .unwrap();

        assert!(!result.proceed());
        assert!(!result.is_error());
        assert_eq!(result.get("CounterValue"), Some(&json!(3)));
        assert_eq!(result.get_str(ACTION_KEY), Some(ACTION_SERVE_TEMPLATE));
    }

    #[test]
    fn does_not_carry_values_from_an_error() {
        let previous = TaskResult::error("bad").with_value("Secret", "x");

        let result = ServeTemplateFunction::default()
            .compute(&EntryPoint::default(), Some(&previous))
            .unwrap();

        assert!(result.get("Secret").is_none());
    }
}
