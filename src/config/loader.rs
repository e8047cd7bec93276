// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_MAX_ITERATIONS, DEFAULT_TEMPLATE};
use crate::errors::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for a task flow application.
///
/// This struct describes every task collection the host serves and the request
/// paths that start a traversal in each of them. It is typically loaded from a
/// YAML or TOML file.
///
/// # Fields
/// * `max_iterations` - Driver iteration ceiling (optional, defaults to 1000)
/// * `session` - Where session data is persisted (optional, defaults to files in the temp dir)
/// * `default_template` - Template used when nothing more specific is set (optional)
/// * `collections` - Named task graphs
/// * `routes` - Request path → collection + start task
///
/// # Example
/// ```yaml
/// max_iterations: 1000
/// session:
///   store: memory
/// collections:
///   - name: HelloWorldApp
///     tasks:
///       - name: GetSession
///         function: get_session
///         on_success: VisitCounter
/// routes:
///   - path: /
///     collection: HelloWorldApp
///     start: GetSession
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default = "default_template")]
    pub default_template: String,
    #[serde(default)]
    pub collections: Vec<CollectionConfig>,
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

fn default_max_iterations() -> usize {
    DEFAULT_MAX_ITERATIONS
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

/// Session persistence backend.
#[derive(Debug, Deserialize, PartialEq, Clone, Copy, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStoreKind {
    #[default]
    File,
    Memory,
}

/// Session persistence options.
///
/// `dir` is only read by the file store; without it the OS temp dir is used.
#[derive(Debug, Deserialize, Default)]
pub struct SessionConfig {
    #[serde(default)]
    pub store: SessionStoreKind,
    pub dir: Option<PathBuf>,
}

/// A named task graph.
#[derive(Debug, Deserialize)]
pub struct CollectionConfig {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<TaskConfig>,
}

/// Configuration for a single task in a collection.
///
/// # Fields
/// * `name` - Unique name inside the collection
/// * `function` - Implementation name resolved by the local function factory
/// * `on_success` - Task that runs after a non-error result (optional)
/// * `on_error` - Task that runs after an error result (optional)
/// * `options` - Function-specific options
///
/// # Example
/// ```yaml
/// name: ServeHome
/// function: serve_template
/// options:
///   template: home.html
/// ```
#[derive(Debug, Deserialize)]
pub struct TaskConfig {
    pub name: String,
    pub function: String,
    pub on_success: Option<String>,
    pub on_error: Option<String>,
    #[serde(default)]
    pub options: HashMap<String, serde_json::Value>,
}

/// Binds a request path to the task a traversal starts from.
#[derive(Debug, Deserialize)]
pub struct RouteConfig {
    pub path: String,
    pub collection: String,
    pub start: String,
}

/// Load a config from a YAML (`.yaml`, `.yml`) or TOML (`.toml`) file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "yaml" | "yml" => parse_yaml(&content),
        "toml" => parse_toml(&content),
        _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    }
}

pub fn parse_yaml(content: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

pub fn parse_toml(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load and validate a config file
///
/// All validation errors are collected and returned together so one run
/// reports every problem in the file.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Validation)?;
    Ok(cfg)
}
