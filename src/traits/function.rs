// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::KeySpec;
use crate::engine::{EntryPoint, TaskResult};

/// A single computation step in a task graph.
///
/// Implementations are stateless from the engine's point of view: the same
/// instance is shared by every concurrent run of the collection that holds it.
/// Returning `Err` or panicking are both treated as computation failures and
/// converted into an error [`TaskResult`] by the owning task.
pub trait Function: Send + Sync {
    fn compute(
        &self,
        entry_point: &EntryPoint,
        previous: Option<&TaskResult>,
    ) -> anyhow::Result<TaskResult>;

    fn name(&self) -> &str;

    /// Result keys this function writes, checked once when its collection is built.
    fn declared_keys(&self) -> Vec<KeySpec> {
        Vec::new()
    }
}
