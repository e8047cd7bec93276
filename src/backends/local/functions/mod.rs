// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Built-in functions for small web applications: template serving,
//! redirects, a visit counter and session load/save.

pub mod error_message;
pub mod redirect;
pub mod serve_template;
pub mod session;
pub mod visit_counter;

pub use error_message::{ErrorMessageFunction, ERROR_MESSAGE_KEY};
pub use redirect::RedirectFunction;
pub use serve_template::ServeTemplateFunction;
pub use session::{GetSessionFunction, SaveSessionFunction, SESSION_TOKEN_KEY};
pub use visit_counter::{VisitCounterFunction, DEFAULT_COUNTER_KEY};

use crate::engine::{TaskResult, ValueMap};

/// Values a function builds on: the previous mapping when it succeeded,
/// otherwise nothing.
pub(crate) fn carried_values(previous: Option<&TaskResult>) -> ValueMap {
    match previous {
        Some(result) if !result.is_error() => result.values().clone(),
        _ => ValueMap::new(),
    }
}
