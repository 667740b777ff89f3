//! Path-expression resolution against the live remote hierarchy.
//!
//! A path expression is classified at resolution time; nothing is cached,
//! so every resolution reflects the store as of this command. Bare-name
//! entry lookups check folders before files: folders shadow files of the
//! same name, and several commands depend on that ordering.

use std::collections::HashSet;

use thiserror::Error;

use crate::config::MAX_PARENT_DEPTH;
use crate::core::error::StoreError;
use crate::models::{FolderRef, Node};
use crate::store::RemoteStore;

// =============================================================================
// Path Expressions
// =============================================================================

/// Classified form of a user-supplied path string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathExpr {
    /// Empty expression: the current location.
    Current,
    /// `/` or `~`: the store root.
    Root,
    /// `..` or `../`: the first parent of the current folder.
    Parent,
    /// Leading `/`: segments walked from root.
    Absolute(Vec<String>),
    /// Anything else: a single name looked up in the current folder.
    Name(String),
}

impl PathExpr {
    /// Classify a raw path string.
    pub fn classify(raw: &str) -> Self {
        match raw {
            "" => Self::Current,
            "/" | "~" => Self::Root,
            ".." | "../" => Self::Parent,
            _ => {
                if let Some(rest) = raw.strip_prefix('/') {
                    let segments = rest
                        .split('/')
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect();
                    Self::Absolute(segments)
                } else {
                    Self::Name(raw.to_string())
                }
            }
        }
    }
}

// =============================================================================
// Resolution Errors
// =============================================================================

/// Typed not-found failures produced by the resolver.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Already at root")]
    AlreadyAtRoot,

    /// A segment of an absolute path did not match any child folder. The
    /// whole transition is aborted; no partial move happens.
    #[error("Folder '{0}' not found in path")]
    MissingSegment(String),

    /// A bare folder name did not match in the current folder.
    #[error("Folder '{0}' not found")]
    FolderNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

// =============================================================================
// Folder Resolution
// =============================================================================

/// Resolve a path expression to a folder reference.
///
/// Shared by `cd` and by every command that takes a target-folder
/// argument. Resolution is all-or-nothing: any failure leaves the caller
/// free to keep its state unchanged.
pub fn resolve_folder(
    store: &dyn RemoteStore,
    current: &FolderRef,
    raw: &str,
) -> Result<FolderRef, ResolveError> {
    match PathExpr::classify(raw) {
        PathExpr::Current => Ok(current.clone()),
        PathExpr::Root => Ok(FolderRef::Root),
        PathExpr::Parent => resolve_parent(store, current),
        PathExpr::Absolute(segments) => {
            let mut location = FolderRef::Root;
            for segment in segments {
                match store.folder_by_name(&location, &segment)? {
                    Some(folder) => location = FolderRef::Folder(folder.id),
                    None => return Err(ResolveError::MissingSegment(segment)),
                }
            }
            Ok(location)
        }
        PathExpr::Name(name) => match store.folder_by_name(current, &name)? {
            Some(folder) => Ok(FolderRef::Folder(folder.id)),
            None => Err(ResolveError::FolderNotFound(name)),
        },
    }
}

/// Resolve the first parent of the current folder.
///
/// Rejected at root; a parentless folder resolves to root.
pub fn resolve_parent(
    store: &dyn RemoteStore,
    current: &FolderRef,
) -> Result<FolderRef, ResolveError> {
    match current {
        FolderRef::Root => Err(ResolveError::AlreadyAtRoot),
        FolderRef::Folder(id) => match store.parent(id)? {
            Some(parent) => Ok(FolderRef::Folder(parent.id)),
            None => Ok(FolderRef::Root),
        },
    }
}

// =============================================================================
// Entry Resolution
// =============================================================================

/// Look up a name among the immediate children of a folder.
///
/// Folders are checked first, then files, so a folder shadows a file of
/// the same name. Always the first enumeration match; never more than one
/// candidate.
pub fn resolve_entry(
    store: &dyn RemoteStore,
    folder: &FolderRef,
    name: &str,
) -> Result<Option<Node>, StoreError> {
    if let Some(folder_node) = store.folder_by_name(folder, name)? {
        return Ok(Some(folder_node));
    }
    store.file_by_name(folder, name)
}

// =============================================================================
// Path Building
// =============================================================================

/// Build the absolute path of a folder by walking first parents upward.
///
/// A visited set guards against store-side parent cycles; the walk also
/// stops at a defensive depth. Root renders as `/`.
pub fn build_path(store: &dyn RemoteStore, folder: &FolderRef) -> Result<String, StoreError> {
    let mut id = match folder {
        FolderRef::Root => return Ok("/".to_string()),
        FolderRef::Folder(id) => id.clone(),
    };

    let mut parts = Vec::new();
    let mut visited = HashSet::new();

    loop {
        if !visited.insert(id.clone()) || visited.len() > MAX_PARENT_DEPTH {
            break;
        }
        let node = store.node(&id)?;
        parts.push(node.name);
        match store.parent(&id)? {
            Some(parent) => id = parent.id,
            None => break,
        }
    }

    parts.reverse();
    Ok(format!("/{}", parts.join("/")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn sample_store() -> (MemoryStore, FolderRef, FolderRef) {
        let mut store = MemoryStore::new();
        let docs = store.add_folder(&FolderRef::Root, "docs");
        let reports = store.add_folder(&FolderRef::Folder(docs.clone()), "reports");
        store.add_file(&FolderRef::Folder(reports.clone()), "q1.txt", "q1");
        (
            store,
            FolderRef::Folder(docs),
            FolderRef::Folder(reports),
        )
    }

    #[test]
    fn test_classify() {
        assert_eq!(PathExpr::classify(""), PathExpr::Current);
        assert_eq!(PathExpr::classify("/"), PathExpr::Root);
        assert_eq!(PathExpr::classify("~"), PathExpr::Root);
        assert_eq!(PathExpr::classify(".."), PathExpr::Parent);
        assert_eq!(PathExpr::classify("../"), PathExpr::Parent);
        assert_eq!(
            PathExpr::classify("/docs/reports"),
            PathExpr::Absolute(vec!["docs".to_string(), "reports".to_string()])
        );
        assert_eq!(
            PathExpr::classify("My Folder"),
            PathExpr::Name("My Folder".to_string())
        );
    }

    #[test]
    fn test_resolve_absolute_path() {
        let (store, _docs, reports) = sample_store();
        let resolved = resolve_folder(&store, &FolderRef::Root, "/docs/reports").unwrap();
        assert_eq!(resolved, reports);
    }

    #[test]
    fn test_absolute_equals_sequential_bare_names() {
        let (store, _docs, reports) = sample_store();

        let absolute = resolve_folder(&store, &FolderRef::Root, "/docs/reports").unwrap();

        let mut location = FolderRef::Root;
        for segment in ["docs", "reports"] {
            location = resolve_folder(&store, &location, segment).unwrap();
        }

        assert_eq!(absolute, location);
        assert_eq!(absolute, reports);
    }

    #[test]
    fn test_missing_segment_aborts_whole_walk() {
        let (store, _docs, _reports) = sample_store();
        let err = resolve_folder(&store, &FolderRef::Root, "/docs/missing/deep").unwrap_err();
        assert!(matches!(err, ResolveError::MissingSegment(ref s) if s == "missing"));
    }

    #[test]
    fn test_parent_from_root_rejected() {
        let (store, _docs, _reports) = sample_store();
        let err = resolve_folder(&store, &FolderRef::Root, "..").unwrap_err();
        assert!(matches!(err, ResolveError::AlreadyAtRoot));
    }

    #[test]
    fn test_parent_chain_reaches_root() {
        let (store, docs, reports) = sample_store();

        let up_once = resolve_folder(&store, &reports, "..").unwrap();
        assert_eq!(up_once, docs);

        let up_twice = resolve_folder(&store, &up_once, "..").unwrap();
        assert_eq!(up_twice, FolderRef::Root);

        assert!(resolve_folder(&store, &up_twice, "..").is_err());
    }

    #[test]
    fn test_folders_shadow_files() {
        let mut store = MemoryStore::new();
        store.add_file(&FolderRef::Root, "thing", "file body");
        let folder_id = store.add_folder(&FolderRef::Root, "thing");

        let hit = resolve_entry(&store, &FolderRef::Root, "thing")
            .unwrap()
            .unwrap();
        assert_eq!(hit.id, folder_id);
        assert!(hit.is_folder());
    }

    #[test]
    fn test_build_path() {
        let (store, docs, reports) = sample_store();
        assert_eq!(build_path(&store, &FolderRef::Root).unwrap(), "/");
        assert_eq!(build_path(&store, &docs).unwrap(), "/docs");
        assert_eq!(build_path(&store, &reports).unwrap(), "/docs/reports");
    }

    #[test]
    fn test_build_path_survives_parent_cycle() {
        let mut store = MemoryStore::new();
        let a = store.add_folder(&FolderRef::Root, "a");
        let b = store.add_folder(&FolderRef::Folder(a.clone()), "b");
        // Corrupt the store: a's parent is b, b's parent is a.
        store.set_parents(&a, vec![FolderRef::Folder(b.clone())]);

        let path = build_path(&store, &FolderRef::Folder(b)).unwrap();
        assert!(path.starts_with('/'));
    }
}
