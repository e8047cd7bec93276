// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for session persistence collaborators.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid session token '{0}'")]
    InvalidToken(String),

    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session data could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("session store lock was poisoned")]
    Poisoned,
}
