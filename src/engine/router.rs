// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Explicit request-path routing, built once by the host and passed around by reference.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::consts::{DEFAULT_MAX_ITERATIONS, STOP_TASK_NAME};
use crate::config::TaskCollection;
use crate::engine::{EntryPoint, StopTask, Termination, WorkFlow, WorkFlowRun};
use crate::observability::messages::engine::RouteNotFound;
use crate::observability::messages::StructuredLog;

/// Where a request path starts its traversal.
#[derive(Debug, Clone)]
pub struct Route {
    pub collection: Arc<TaskCollection>,
    pub start: String,
}

/// Request path → route. Read-only once handed to a [`Router`].
#[derive(Debug, Clone, Default)]
pub struct RouteTable(HashMap<String, Route>);

impl RouteTable {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Register a route, replacing any previous route for the same path.
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        collection: Arc<TaskCollection>,
        start: impl Into<String>,
    ) {
        self.0.insert(
            path.into(),
            Route {
                collection,
                start: start.into(),
            },
        );
    }

    pub fn get(&self, path: &str) -> Option<&Route> {
        self.0.get(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }
}

/// Dispatches entry points to the workflow registered for their request path.
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    max_iterations: usize,
}

impl Router {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    /// Lower the ceiling for every dispatched workflow; never above the default.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.min(DEFAULT_MAX_ITERATIONS);
        self
    }

    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    /// Run the workflow for the entry point's path. Unknown paths are answered
    /// by the stop task, exactly like a lookup miss inside a collection.
    pub fn dispatch(&self, entry_point: &EntryPoint) -> WorkFlowRun {
        match self.table.get(entry_point.request_path()) {
            Some(route) => WorkFlow::new(&route.collection, entry_point)
                .with_max_iterations(self.max_iterations)
                .run(&route.start),
            None => {
                RouteNotFound {
                    path: entry_point.request_path(),
                    method: entry_point.request_method(),
                }
                .log();

                let reason = format!("no route for path '{}'", entry_point.request_path());
                WorkFlowRun {
                    result: StopTask::new(reason).into_task().run(entry_point, None),
                    path: vec![STOP_TASK_NAME.to_string()],
                    iterations: 0,
                    termination: Termination::Completed,
                }
            }
        }
    }
}
