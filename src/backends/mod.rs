// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Collaborator implementations for the task flow engine.
//!
//! The engine only sees traits (`Function`, `LogHandler`, `SessionStore`,
//! `ResponseAdapter`); this module provides the concrete pieces a host wires in.
//!
//! # Available Backends
//!
//! ## Local Functions
//! In-process functions for small web applications:
//! - **Templates and redirects**: `serve_template`, `redirect`
//! - **Sessions**: `get_session`, `save_session`
//! - **Samples**: `visit_counter`, `error_message`
//! - Created by name through `LocalFunctionFactory`
//!
//! ## Session Stores
//! - **MemorySessionStore**: in-process map
//! - **FileSessionStore**: one JSON file per session token
//!
//! ## Logging
//! - **TracingLogHandler**: default entry point log handler, forwards to `tracing`
//!
//! ## Response Adapter
//! - **DirectiveAdapter**: turns a final result into a `ResponseDirective`
//!
//! ## Stub Backend (Test-Only)
//! Scripted, failing and panicking functions plus a recording log handler.
//! **Note**: NOT available in production builds
//!
//! # Example
//! ```rust
//! use taskflow::backends::local::LocalFunctionFactory;
//!
//! assert!(LocalFunctionFactory::is_implementation_available("visit_counter"));
//! ```

pub mod adapter;
pub mod local;
pub mod logging;
pub mod session;
#[cfg(test)]
pub mod stub;
