// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod key_registry;
mod loader;
mod runtime;
mod task_collection;
mod validation;

pub mod consts;

pub use key_registry::{KeyRegistry, KeySpec, KindMismatch, ValueKind};
pub use loader::{
    load_and_validate_config, load_config, parse_toml, parse_yaml, CollectionConfig, Config,
    RouteConfig, SessionConfig, SessionStoreKind, TaskConfig,
};
pub use runtime::{Runtime, RuntimeBuilder};
pub use task_collection::TaskCollection;
pub use validation::validate_config;
