// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Session persistence backends.
//!
//! * [`MemorySessionStore`] keeps data in process; useful for tests and
//!   single-process hosts.
//! * [`FileSessionStore`] writes one JSON document per token into a
//!   directory, by default the OS temp dir. Each save goes to a temporary
//!   file that is renamed over the session file, so readers never see a
//!   partial document.

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tempfile::NamedTempFile;

use crate::engine::ValueMap;
use crate::errors::SessionError;
use crate::traits::SessionStore;

const SESSION_FILE_PREFIX: &str = "taskflow-session-";

/// Tokens become file names, so only `[A-Za-z0-9_-]` is accepted.
pub fn validate_token(token: &str) -> Result<(), SessionError> {
    let valid = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(SessionError::InvalidToken(token.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, ValueMap>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, token: &str) -> Result<Option<ValueMap>, SessionError> {
        validate_token(token)?;
        let sessions = self.sessions.read().map_err(|_| SessionError::Poisoned)?;
        Ok(sessions.get(token).cloned())
    }

    fn save(&self, token: &str, data: &ValueMap) -> Result<(), SessionError> {
        validate_token(token)?;
        let mut sessions = self.sessions.write().map_err(|_| SessionError::Poisoned)?;
        sessions.insert(token.to_string(), data.clone());
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    /// The directory is created on first save.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn in_temp_dir() -> Self {
        Self::new(std::env::temp_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn session_path(&self, token: &str) -> Result<PathBuf, SessionError> {
        validate_token(token)?;
        Ok(self
            .dir
            .join(format!("{}{}.json", SESSION_FILE_PREFIX, token)))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, token: &str) -> Result<Option<ValueMap>, SessionError> {
        let path = self.session_path(token)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &str, data: &ValueMap) -> Result<(), SessionError> {
        let path = self.session_path(token)?;
        fs::create_dir_all(&self.dir)?;

        let mut staged = NamedTempFile::new_in(&self.dir)?;
        staged.write_all(serde_json::to_string(data)?.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(&path).map_err(|e| e.error)?;
        tracing::debug!(token = token, dir = %self.dir.display(), "Saved session data");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::values;
    use serde_json::json;

    #[test]
    fn token_validation() {
        let cases = vec![
            ("abc123", true),
            ("a-b_c", true),
            ("0f8fad5bd9cb469fa16570867728950e", true),
            ("", false),
            ("../etc/passwd", false),
            ("with space", false),
            ("dot.dot", false),
        ];

        for (token, expected) in cases {
            assert_eq!(validate_token(token).is_ok(), expected, "token {:?}", token);
        }
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemorySessionStore::new();
        assert!(store.get("abc").unwrap().is_none());

        store.save("abc", &values(json!({"CounterValue": 2}))).unwrap();

        assert_eq!(store.get("abc").unwrap(), Some(values(json!({"CounterValue": 2}))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("sessions"));

        assert!(store.get("abc").unwrap().is_none());
        store
            .save("abc", &values(json!({"CounterValue": 7, "Name": "x"})))
            .unwrap();

        let reopened = FileSessionStore::new(dir.path().join("sessions"));
        assert_eq!(
            reopened.get("abc").unwrap(),
            Some(values(json!({"CounterValue": 7, "Name": "x"})))
        );
    }

    #[test]
    fn concurrent_saves_never_expose_partial_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(FileSessionStore::new(dir.path()));
        let payload = "x".repeat(64 * 1024);
        store.save("shared", &values(json!({"Blob": payload}))).unwrap();

        let writers: Vec<_> = (0..4)
            .map(|n| {
                let store = std::sync::Arc::clone(&store);
                let payload = payload.clone();
                std::thread::spawn(move || {
                    for i in 0..20 {
                        store
                            .save("shared", &values(json!({"Blob": payload, "Writer": n, "Round": i})))
                            .unwrap();
                    }
                })
            })
            .collect();

        for _ in 0..200 {
            let data = store.get("shared").unwrap().unwrap();
            assert_eq!(data.get("Blob"), Some(&json!(payload)));
        }
        for writer in writers {
            writer.join().unwrap();
        }

        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| !entry.file_name().to_string_lossy().starts_with(SESSION_FILE_PREFIX))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn file_store_rejects_path_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());

        let err = store.save("../escape", &ValueMap::new()).unwrap_err();

        assert!(matches!(err, SessionError::InvalidToken(_)));
    }

    #[test]
    fn file_store_reports_corrupt_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path());
        fs::write(dir.path().join("taskflow-session-bad.json"), "not json").unwrap();

        assert!(matches!(
            store.get("bad").unwrap_err(),
            SessionError::Serialization(_)
        ));
    }
}
