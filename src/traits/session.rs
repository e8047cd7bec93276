// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::ValueMap;
use crate::errors::SessionError;

/// Session persistence keyed by an opaque token.
///
/// Only functions talk to a session store; the workflow driver never does.
pub trait SessionStore: Send + Sync {
    /// Fetch previously saved data, `Ok(None)` when nothing is stored for `token`.
    fn get(&self, token: &str) -> Result<Option<ValueMap>, SessionError>;

    fn save(&self, token: &str, data: &ValueMap) -> Result<(), SessionError>;
}
