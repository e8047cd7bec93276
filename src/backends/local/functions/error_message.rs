// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::config::{KeySpec, ValueKind};
use crate::engine::{default_values, EntryPoint, TaskResult};
use crate::traits::{Function, LogLevel};

pub const ERROR_MESSAGE_KEY: &str = "ErrorMessage";

const MISSING_MESSAGE: &str = "An error was set, but the error message was not provided";

/// Error-edge sink: reports the failure through the entry point's log handler
/// and ends the traversal with the safe default mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorMessageFunction;

impl Function for ErrorMessageFunction {
    fn compute(&self, entry_point: &EntryPoint, previous: Option<&TaskResult>) -> anyhow::Result<TaskResult> {
        let message = match previous {
            Some(result) if result.is_error() => {
                let message = result.err_msg().unwrap_or(MISSING_MESSAGE);
                entry_point.log(LogLevel::Error, message);
                message.to_string()
            }
            _ => {
                entry_point.log(
                    LogLevel::Warning,
                    "Error handler reached without error information",
                );
                String::new()
            }
        };

        let mut values = default_values();
        values.insert(ERROR_MESSAGE_KEY.to_string(), Value::from(message));
        Ok(TaskResult::from_values(values))
    }

    fn name(&self) -> &str {
        "error_message"
    }

    fn declared_keys(&self) -> Vec<KeySpec> {
        vec![KeySpec::new(ERROR_MESSAGE_KEY, ValueKind::String)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::RecordingLogHandler;
    use std::sync::Arc;

    #[test]
    fn reports_error_and_stops() {
        let handler = Arc::new(RecordingLogHandler::default());
        let entry_point = EntryPoint::builder().log_handler(handler.clone()).build();

        let cases = vec![
            (Some(TaskResult::error("disk full")), LogLevel::Error, "disk full"),
            (
                Some(TaskResult::new(None, true, None)),
                LogLevel::Error,
                MISSING_MESSAGE,
            ),
            (Some(TaskResult::default()), LogLevel::Warning, ""),
            (None, LogLevel::Warning, ""),
        ];

        for (previous, level, expected) in cases {
            let result = ErrorMessageFunction
                .compute(&entry_point, previous.as_ref())
                .unwrap();
            assert!(!result.proceed());
            assert!(!result.is_error());
            assert_eq!(result.get_str(ERROR_MESSAGE_KEY), Some(expected));
            assert_eq!(handler.entries().last().map(|(l, _)| *l), Some(level));
        }
    }
}
