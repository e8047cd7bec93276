// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod entry_point;
pub mod result;
pub mod router;
pub mod stop_task;
pub mod task;
pub mod workflow;

pub use crate::config::consts::STOP_TASK_NAME;
pub use entry_point::{EntryPoint, EntryPointBuilder, FrameworkHandle};
pub use result::{default_values, TaskResult, ValueMap, PROCEED_KEY};
pub use router::{Route, RouteTable, Router};
pub use stop_task::StopTask;
pub use task::{Task, TaskOutcome};
pub use workflow::{Termination, WorkFlow, WorkFlowRun};
