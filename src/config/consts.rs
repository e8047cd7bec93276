// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Hard ceiling on driver iterations for a single workflow run
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;
/// Reserved name of the terminal task every collection contains
pub const STOP_TASK_NAME: &str = "StopTask";
/// Template served when nothing more specific is configured
pub const DEFAULT_TEMPLATE: &str = "index.html";
/// Safe location used by default and error redirects
pub const DEFAULT_REDIRECT_URL: &str = "/";
