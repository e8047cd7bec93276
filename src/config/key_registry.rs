// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed registry of result keys, filled from each function's declarations
//! while a collection is built.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::engine::{ValueMap, PROCEED_KEY};
use crate::errors::ValidationError;

/// Expected shape of a result value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    Number,
    String,
    Array,
    Object,
    /// No constraint; never conflicts
    Any,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::Null => ValueKind::Any,
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        *self == ValueKind::Any || *self == ValueKind::of(value)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Any => "any",
        };
        f.write_str(label)
    }
}

/// A key a function promises to write, and the kind of value it writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    pub key: String,
    pub kind: ValueKind,
}

impl KeySpec {
    pub fn new(key: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            key: key.into(),
            kind,
        }
    }
}

/// A result value whose kind differs from the one declared for its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindMismatch {
    pub key: String,
    pub expected: ValueKind,
    pub actual: ValueKind,
}

#[derive(Debug, Clone)]
struct Declaration {
    kind: ValueKind,
    declared_by: String,
}

/// Key name → declared kind. `Proceed` is pre-registered as a boolean.
#[derive(Debug, Clone)]
pub struct KeyRegistry {
    declarations: HashMap<String, Declaration>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        let mut declarations = HashMap::new();
        declarations.insert(
            PROCEED_KEY.to_string(),
            Declaration {
                kind: ValueKind::Bool,
                declared_by: "engine".to_string(),
            },
        );
        Self { declarations }
    }

    /// Record a declaration. The first concrete kind wins; a later different
    /// concrete kind is reported as a conflict and not recorded.
    pub fn register(&mut self, spec: &KeySpec, declared_by: &str) -> Result<(), ValidationError> {
        match self.declarations.get_mut(&spec.key) {
            Some(existing) if existing.kind == ValueKind::Any => {
                existing.kind = spec.kind;
                existing.declared_by = declared_by.to_string();
                Ok(())
            }
            Some(existing) if spec.kind != ValueKind::Any && existing.kind != spec.kind => {
                Err(ValidationError::ConflictingKeyKind {
                    key: spec.key.clone(),
                    first: format!("{} (by {})", existing.kind, existing.declared_by),
                    second: format!("{} (by {})", spec.kind, declared_by),
                })
            }
            Some(_) => Ok(()),
            None => {
                self.declarations.insert(
                    spec.key.clone(),
                    Declaration {
                        kind: spec.kind,
                        declared_by: declared_by.to_string(),
                    },
                );
                Ok(())
            }
        }
    }

    pub fn kind_of(&self, key: &str) -> Option<ValueKind> {
        self.declarations.get(key).map(|d| d.kind)
    }

    /// Declared keys in `values` holding a value of another kind. Undeclared
    /// keys are not checked.
    pub fn mismatches(&self, values: &ValueMap) -> Vec<KindMismatch> {
        values
            .iter()
            .filter_map(|(key, value)| {
                let expected = self.kind_of(key)?;
                if expected.matches(value) {
                    None
                } else {
                    Some(KindMismatch {
                        key: key.clone(),
                        expected,
                        actual: ValueKind::of(value),
                    })
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl Default for KeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn proceed_is_preregistered_as_bool() {
        let registry = KeyRegistry::new();
        assert_eq!(registry.kind_of(PROCEED_KEY), Some(ValueKind::Bool));
    }

    #[test]
    fn declaring_proceed_as_string_conflicts() {
        let mut registry = KeyRegistry::new();
        let err = registry
            .register(&KeySpec::new(PROCEED_KEY, ValueKind::String), "bad_function")
            .unwrap_err();

        assert!(err.to_string().contains("bool (by engine)"));
        assert!(err.to_string().contains("string (by bad_function)"));
        assert_eq!(registry.kind_of(PROCEED_KEY), Some(ValueKind::Bool));
    }

    #[test]
    fn compatible_declarations_are_accepted() {
        let mut registry = KeyRegistry::new();
        let cases = vec![
            (KeySpec::new("CounterValue", ValueKind::Number), "counter"),
            (KeySpec::new("CounterValue", ValueKind::Number), "report"),
            (KeySpec::new("CounterValue", ValueKind::Any), "dump"),
            (KeySpec::new("Context", ValueKind::Any), "first"),
            (KeySpec::new("Context", ValueKind::Object), "second"),
        ];

        for (spec, by) in cases {
            assert!(registry.register(&spec, by).is_ok(), "{:?} by {}", spec, by);
        }
        assert_eq!(registry.kind_of("Context"), Some(ValueKind::Object));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn mismatches_only_cover_declared_keys() {
        let mut registry = KeyRegistry::new();
        registry
            .register(&KeySpec::new("CounterValue", ValueKind::Number), "counter")
            .unwrap();

        let values: ValueMap = [
            ("Proceed".to_string(), json!("yes")),
            ("CounterValue".to_string(), json!(3)),
            ("Free".to_string(), json!([1, 2])),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            registry.mismatches(&values),
            vec![KindMismatch {
                key: PROCEED_KEY.to_string(),
                expected: ValueKind::Bool,
                actual: ValueKind::String,
            }]
        );
    }

    #[test]
    fn kind_matching() {
        assert!(ValueKind::Bool.matches(&json!(true)));
        assert!(!ValueKind::Bool.matches(&json!("true")));
        assert!(ValueKind::Any.matches(&json!([1])));
        assert_eq!(ValueKind::of(&json!({"a": 1})), ValueKind::Object);
    }
}
