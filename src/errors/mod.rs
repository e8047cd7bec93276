// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod session;
mod task;

pub use config::{ConfigError, ValidationError};
pub use session::SessionError;
pub use task::{FailureKind, TaskFailure};
