// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::config::consts::DEFAULT_REDIRECT_URL;
use crate::engine::result::{
    ACTION_KEY, ACTION_REDIRECT, ACTION_SERVE_TEMPLATE, CONTEXT_KEY, COOKIES_KEY,
    REDIRECT_URL_KEY, TEMPLATE_NAME_KEY,
};
use crate::engine::{EntryPoint, TaskResult, ValueMap};
use crate::traits::ResponseAdapter;

/// Framework-neutral description of the response a host should send.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseDirective {
    Redirect {
        url: String,
        cookies: BTreeMap<String, String>,
    },
    ServeTemplate {
        template: String,
        context: ValueMap,
        cookies: BTreeMap<String, String>,
    },
}

impl ResponseDirective {
    pub fn cookies(&self) -> &BTreeMap<String, String> {
        match self {
            ResponseDirective::Redirect { cookies, .. } => cookies,
            ResponseDirective::ServeTemplate { cookies, .. } => cookies,
        }
    }
}

impl fmt::Display for ResponseDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseDirective::Redirect { url, cookies } => {
                write!(f, "redirect to '{}' ({} cookies)", url, cookies.len())
            }
            ResponseDirective::ServeTemplate {
                template,
                context,
                cookies,
            } => write!(
                f,
                "serve template '{}' ({} context keys, {} cookies)",
                template,
                context.len(),
                cookies.len()
            ),
        }
    }
}

/// Reads the `Action` convention of a terminal result.
///
/// Error results and unknown actions redirect to `/`. A `ServeTemplate`
/// without a template name falls back to the entry point's default template.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectiveAdapter;

impl ResponseAdapter for DirectiveAdapter {
    type Response = ResponseDirective;

    fn respond(&self, result: &TaskResult, entry_point: &EntryPoint) -> ResponseDirective {
        let cookies = merge_cookies(entry_point, result);

        if result.is_error() {
            return ResponseDirective::Redirect {
                url: DEFAULT_REDIRECT_URL.to_string(),
                cookies,
            };
        }

        match result.get_str(ACTION_KEY) {
            Some(ACTION_SERVE_TEMPLATE) => {
                let template = result
                    .get_str(TEMPLATE_NAME_KEY)
                    .filter(|name| !name.is_empty())
                    .unwrap_or(entry_point.default_template())
                    .to_string();
                let context = match result.get(CONTEXT_KEY) {
                    Some(Value::Object(map)) => {
                        map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
                    }
                    _ => result.values().clone(),
                };
                ResponseDirective::ServeTemplate {
                    template,
                    context,
                    cookies,
                }
            }
            Some(ACTION_REDIRECT) => ResponseDirective::Redirect {
                url: result
                    .get_str(REDIRECT_URL_KEY)
                    .filter(|url| !url.is_empty())
                    .unwrap_or(DEFAULT_REDIRECT_URL)
                    .to_string(),
                cookies,
            },
            _ => ResponseDirective::Redirect {
                url: DEFAULT_REDIRECT_URL.to_string(),
                cookies,
            },
        }
    }
}

/// Request cookies overlaid with the string-valued `Cookies` entries of the result.
fn merge_cookies(entry_point: &EntryPoint, result: &TaskResult) -> BTreeMap<String, String> {
    let mut cookies: BTreeMap<String, String> = entry_point
        .cookies()
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    if let Some(Value::Object(set)) = result.get(COOKIES_KEY) {
        for (name, value) in set {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            cookies.insert(name.clone(), value);
        }
    }
    cookies
}
