// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod adapter;
pub mod function;
pub mod logging;
pub mod session;

pub use adapter::ResponseAdapter;
pub use function::Function;
pub use logging::{LogHandler, LogLevel};
pub use session::SessionStore;
