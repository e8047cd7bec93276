// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use crate::backends::local::{FunctionContext, LocalFunctionFactory};
use crate::backends::session::{FileSessionStore, MemorySessionStore};
use crate::config::{Config, SessionStoreKind, TaskCollection};
use crate::engine::{EntryPoint, EntryPointBuilder, Router, RouteTable, Task, WorkFlowRun};
use crate::errors::{ConfigError, ValidationError};
use crate::traits::SessionStore;

/// Task flow runtime builder - turns a configuration into collections and a router.
///
/// Functions are resolved through [`LocalFunctionFactory`]. A task whose
/// function cannot be created becomes an inert task, which the collection
/// refuses and logs. If no edge targets it the build goes on. Otherwise the
/// build fails and the error names the unknown function ahead of the dangling
/// edge. Run
/// [`validate_config`](crate::config::validate_config) first to reject unknown
/// functions outright.
///
/// # Examples
///
/// ```
/// use taskflow::config::{parse_yaml, RuntimeBuilder};
///
/// let config = parse_yaml(r#"
/// session:
///   store: memory
/// collections:
///   - name: App
///     tasks:
///       - name: Home
///         function: serve_template
/// routes:
///   - path: /
///     collection: App
///     start: Home
/// "#).unwrap();
///
/// let runtime = RuntimeBuilder::from_config(&config).unwrap();
/// let run = runtime.dispatch(&runtime.entry_point().request_path("/").build());
///
/// assert_eq!(run.path, vec!["Home"]);
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build a runtime using the session store named in the configuration.
    pub fn from_config(cfg: &Config) -> Result<Runtime, ConfigError> {
        let store: Arc<dyn SessionStore> = match cfg.session.store {
            SessionStoreKind::Memory => Arc::new(MemorySessionStore::new()),
            SessionStoreKind::File => match &cfg.session.dir {
                Some(dir) => Arc::new(FileSessionStore::new(dir)),
                None => Arc::new(FileSessionStore::in_temp_dir()),
            },
        };
        Self::from_config_with_store(cfg, store)
    }

    /// Build a runtime whose session functions share `store`.
    pub fn from_config_with_store(
        cfg: &Config,
        store: Arc<dyn SessionStore>,
    ) -> Result<Runtime, ConfigError> {
        let context = FunctionContext {
            session_store: Arc::clone(&store),
            default_template: cfg.default_template.clone(),
        };

        let mut collections = HashMap::new();
        let mut errors = Vec::new();

        for collection_cfg in &cfg.collections {
            let mut collection = TaskCollection::new(&collection_cfg.name);
            let mut unknown_functions = Vec::new();

            for task_cfg in &collection_cfg.tasks {
                let task = match LocalFunctionFactory::create_function(task_cfg, &context) {
                    Ok(function) => Task::new(&task_cfg.name, function),
                    Err(reason) => {
                        if !LocalFunctionFactory::is_implementation_available(&task_cfg.function) {
                            unknown_functions.push(ValidationError::UnknownFunction {
                                collection: collection_cfg.name.clone(),
                                task_name: task_cfg.name.clone(),
                                function: task_cfg.function.clone(),
                            });
                        }
                        Task::inert(&task_cfg.name, reason)
                    }
                };
                collection.add(
                    task,
                    task_cfg.on_success.as_deref(),
                    task_cfg.on_error.as_deref(),
                );
            }

            if let Err(collection_errors) = collection.validate() {
                errors.extend(unknown_functions);
                errors.extend(collection_errors);
            }
            collections.insert(collection_cfg.name.clone(), Arc::new(collection));
        }

        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }

        let mut table = RouteTable::new();
        for route in &cfg.routes {
            // Unknown collections are reported by validate_config; skip them here
            if let Some(collection) = collections.get(&route.collection) {
                table.insert(&route.path, Arc::clone(collection), &route.start);
            }
        }

        Ok(Runtime {
            router: Router::new(table).with_max_iterations(cfg.max_iterations),
            collections,
            session_store: store,
            default_template: cfg.default_template.clone(),
        })
    }
}

/// Everything a host needs to serve requests: the router, its collections and
/// the session store shared by the session functions.
pub struct Runtime {
    router: Router,
    collections: HashMap<String, Arc<TaskCollection>>,
    session_store: Arc<dyn SessionStore>,
    default_template: String,
}

impl Runtime {
    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn collection(&self, name: &str) -> Option<&Arc<TaskCollection>> {
        self.collections.get(name)
    }

    pub fn collection_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.collections.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        &self.session_store
    }

    /// An entry point builder preloaded with the configured default template.
    pub fn entry_point(&self) -> EntryPointBuilder {
        EntryPoint::builder().default_template(&self.default_template)
    }

    pub fn dispatch(&self, entry_point: &EntryPoint) -> WorkFlowRun {
        self.router.dispatch(entry_point)
    }
}
