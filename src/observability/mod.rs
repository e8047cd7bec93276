// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging throughout the task flow engine. Message types follow a struct-based pattern
//! with `Display` trait implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Keep field names identical between the text message and the structured event
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - WorkFlow lifecycle and graph traversal events
//! * `messages::task` - Task execution, failure and lookup events
//! * `messages::entry_point` - Entry point construction warnings
//! * `messages::validation` - Configuration and collection validation events
//!
//! # Usage
//!
//! ```rust
//! use taskflow::observability::messages::task::TaskExecutionFailed;
//! use taskflow::observability::messages::StructuredLog;
//!
//! let msg = TaskExecutionFailed {
//!     task_name: "VisitCounter",
//!     kind: "error",
//!     message: "session store unavailable",
//! };
//!
//! msg.log();
//! ```

pub mod messages;
