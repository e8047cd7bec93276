// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] for emitting the same data as a `tracing` event or span.
//!
//! # Organization
//!
//! * `engine` - WorkFlow lifecycle and graph traversal events
//! * `task` - Task execution, failure and lookup events
//! * `entry_point` - Entry point construction warnings
//! * `validation` - Configuration and collection validation events
//!
//! # Usage Pattern
//!
//! ```rust
//! use taskflow::observability::messages::engine::WorkFlowStarted;
//! use taskflow::observability::messages::StructuredLog;
//!
//! let msg = WorkFlowStarted {
//!     collection: "HelloWorldApp",
//!     start_name: "GetSession",
//!     max_iterations: 1000,
//! };
//!
//! msg.log();
//! ```

use tracing::Span;

pub mod engine;
pub mod entry_point;
pub mod task;
pub mod validation;

/// Emit a message as a structured `tracing` event, or open a span carrying its fields.
pub trait StructuredLog {
    fn log(&self);

    fn span(&self, name: &str) -> Span;
}
