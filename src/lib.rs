// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // functions, session stores, adapters
pub mod config;     // config + task collections
pub mod engine;     // results, tasks, workflow driver
pub mod errors;     // error handling
pub mod observability;
pub mod traits;     // unified abstractions
