// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::traits::{LogHandler, LogLevel};

/// Default [`LogHandler`]: forwards entry point log calls to `tracing`.
///
/// Messages below `min_level` are dropped before reaching the subscriber.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogHandler {
    min_level: LogLevel,
}

impl TracingLogHandler {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

impl Default for TracingLogHandler {
    fn default() -> Self {
        Self::new(LogLevel::Debug)
    }
}

impl LogHandler for TracingLogHandler {
    fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        match level {
            LogLevel::Debug => tracing::debug!(target: "taskflow::entry_point", "{}", message),
            LogLevel::Info => tracing::info!(target: "taskflow::entry_point", "{}", message),
            LogLevel::Warning => tracing::warn!(target: "taskflow::entry_point", "{}", message),
            LogLevel::Error => tracing::error!(target: "taskflow::entry_point", "{}", message),
        }
    }
}
