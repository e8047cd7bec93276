// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::{EntryPoint, TaskResult};

/// Turns the terminal result of a workflow into a framework-native response.
///
/// Adapters read the loose `Action` / `RedirectURL` / `TemplateName`
/// convention; the engine itself never validates those keys.
pub trait ResponseAdapter {
    type Response;

    fn respond(&self, result: &TaskResult, entry_point: &EntryPoint) -> Self::Response;
}
