//! Per-session state: working location and clipboard.
//!
//! Commands are stateless at the transport level; the illusion of a shell
//! comes from two fields persisted between invocations through a
//! [`StateStore`]. State is created lazily with defaults on first load
//! and never explicitly destroyed; expiry, if any, belongs to the
//! backing store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::state_fields;
use crate::core::error::EngineError;
use crate::models::{FolderRef, NodeId, NodeKind};
use crate::store::RemoteStore;

// =============================================================================
// State Store
// =============================================================================

/// Keyed string storage scoped to one user session.
///
/// Mirrors the storage service the deployment environment provides:
/// `get`/`set` on named fields, persisting indefinitely across calls.
pub trait StateStore {
    fn get(&self, field: &str) -> Option<String>;
    fn set(&mut self, field: &str, value: &str);
    fn remove(&mut self, field: &str);
}

/// Process-lifetime state store. Suitable for tests and for hosts that
/// keep one engine instance per connected session.
#[derive(Default)]
pub struct MemoryStateStore {
    fields: HashMap<String, String>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, field: &str) -> Option<String> {
        self.fields.get(field).cloned()
    }

    fn set(&mut self, field: &str, value: &str) {
        self.fields.insert(field.to_string(), value.to_string());
    }

    fn remove(&mut self, field: &str) {
        self.fields.remove(field);
    }
}

/// JSON-file-backed state store, so a host process can keep session state
/// across restarts. Writes through on every mutation; IO failures are
/// logged and otherwise swallowed, since losing session state degrades to
/// the lazy defaults rather than breaking commands.
pub struct JsonStateStore {
    path: PathBuf,
    fields: HashMap<String, String>,
}

impl JsonStateStore {
    /// Open (or lazily create) the store at `path`.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let fields = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { path, fields }
    }

    fn flush(&self) {
        let raw = match serde_json::to_string_pretty(&self.fields) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "failed to serialize session state");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, raw) {
            warn!(path = %self.path.display(), error = %err, "failed to persist session state");
        }
    }
}

impl StateStore for JsonStateStore {
    fn get(&self, field: &str) -> Option<String> {
        self.fields.get(field).cloned()
    }

    fn set(&mut self, field: &str, value: &str) {
        self.fields.insert(field.to_string(), value.to_string());
        self.flush();
    }

    fn remove(&mut self, field: &str) {
        if self.fields.remove(field).is_some() {
            self.flush();
        }
    }
}

// =============================================================================
// Session State
// =============================================================================

/// One-slot clipboard entry: a node reference and its kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clipboard {
    pub id: NodeId,
    pub kind: NodeKind,
}

/// The two session fields, materialized from the state store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub current: FolderRef,
    pub clipboard: Option<Clipboard>,
}

impl SessionState {
    /// Load session state, falling back to defaults (root location, empty
    /// clipboard) for missing or malformed fields.
    pub fn load(store: &dyn StateStore) -> Self {
        let current = store
            .get(state_fields::CURRENT_DIR)
            .map(|v| FolderRef::from_state(&v))
            .unwrap_or(FolderRef::Root);

        let clipboard = match (
            store.get(state_fields::CLIPBOARD),
            store.get(state_fields::CLIPBOARD_TYPE),
        ) {
            (Some(id), Some(kind)) => NodeKind::from_state(&kind).map(|kind| Clipboard {
                id: NodeId::new(id),
                kind,
            }),
            _ => None,
        };

        Self { current, clipboard }
    }

    /// Write both fields back to the state store.
    pub fn save(&self, store: &mut dyn StateStore) {
        store.set(state_fields::CURRENT_DIR, &self.current.to_state());
        match &self.clipboard {
            Some(clip) => {
                store.set(state_fields::CLIPBOARD, clip.id.as_str());
                store.set(state_fields::CLIPBOARD_TYPE, clip.kind.to_state());
            }
            None => {
                store.remove(state_fields::CLIPBOARD);
                store.remove(state_fields::CLIPBOARD_TYPE);
            }
        }
    }

    /// Current location, verified against the live store.
    ///
    /// If the persisted folder was deleted out-of-band the location fails
    /// closed to root: state is reset (and must be saved by the caller's
    /// command epilogue) and the triggering command reports a scoped
    /// error. Other store faults propagate untouched.
    pub fn checked_current(&mut self, store: &dyn RemoteStore) -> Result<FolderRef, EngineError> {
        match &self.current {
            FolderRef::Root => Ok(FolderRef::Root),
            FolderRef::Folder(id) => match store.node(id) {
                Ok(node) if node.is_folder() => Ok(self.current.clone()),
                Ok(_) | Err(crate::core::error::StoreError::NodeNotFound(_)) => {
                    warn!(folder = %self.current.to_state(), "working location vanished, resetting to root");
                    self.current = FolderRef::Root;
                    Err(EngineError::LocationLost)
                }
                Err(err) => Err(err.into()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_load_defaults_when_empty() {
        let store = MemoryStateStore::new();
        let session = SessionState::load(&store);
        assert_eq!(session.current, FolderRef::Root);
        assert!(session.clipboard.is_none());
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut store = MemoryStateStore::new();
        let session = SessionState {
            current: FolderRef::Folder(NodeId::new("node-0001")),
            clipboard: Some(Clipboard {
                id: NodeId::new("node-0002"),
                kind: NodeKind::File,
            }),
        };
        session.save(&mut store);

        let loaded = SessionState::load(&store);
        assert_eq!(loaded, session);
    }

    #[test]
    fn test_save_clears_stale_clipboard_fields() {
        let mut store = MemoryStateStore::new();
        store.set(state_fields::CLIPBOARD, "node-0009");
        store.set(state_fields::CLIPBOARD_TYPE, "file");

        let session = SessionState {
            current: FolderRef::Root,
            clipboard: None,
        };
        session.save(&mut store);

        assert!(store.get(state_fields::CLIPBOARD).is_none());
        assert!(store.get(state_fields::CLIPBOARD_TYPE).is_none());
    }

    #[test]
    fn test_malformed_clipboard_kind_ignored() {
        let mut store = MemoryStateStore::new();
        store.set(state_fields::CLIPBOARD, "node-0009");
        store.set(state_fields::CLIPBOARD_TYPE, "banana");

        let session = SessionState::load(&store);
        assert!(session.clipboard.is_none());
    }

    #[test]
    fn test_checked_current_falls_back_to_root() {
        let mut remote = MemoryStore::new();
        let folder = remote.add_folder(&FolderRef::Root, "docs");

        let mut session = SessionState {
            current: FolderRef::Folder(folder.clone()),
            clipboard: None,
        };
        assert!(session.checked_current(&remote).is_ok());

        remote.trash(&folder).unwrap();
        let err = session.checked_current(&remote).unwrap_err();
        assert!(matches!(err, EngineError::LocationLost));
        assert_eq!(session.current, FolderRef::Root);
    }

    #[test]
    fn test_json_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        {
            let mut store = JsonStateStore::open(&path);
            store.set(state_fields::CURRENT_DIR, "node-0042");
        }

        let store = JsonStateStore::open(&path);
        assert_eq!(
            store.get(state_fields::CURRENT_DIR),
            Some("node-0042".to_string())
        );
    }
}
