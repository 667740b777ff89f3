//! Remote store gateway.
//!
//! The engine never talks to the remote object store directly; every
//! handler goes through [`RemoteStore`]. The trait mirrors the primitives
//! the store exposes: child enumeration, exact-name lookups, parent
//! lookup, node mutation, trash pools, and sharing. Enumeration order is
//! store-defined and must not be assumed sorted.

mod memory;

pub use memory::MemoryStore;

use crate::core::error::StoreResult;
use crate::models::{DocumentKind, FolderRef, Node, NodeId, SharingInfo, SharingRole};

/// Synchronous gateway to the remote hierarchical object store.
///
/// All calls block until the store answers; failures surface as
/// [`StoreError`](crate::core::error::StoreError) and are rendered into
/// failure envelopes by the command layer.
pub trait RemoteStore {
    /// Fetch a node by id. Fails with `NodeNotFound` for ids that were
    /// deleted out-of-band.
    fn node(&self, id: &NodeId) -> StoreResult<Node>;

    /// Enumerate the immediate child folders of a folder.
    fn child_folders(&self, folder: &FolderRef) -> StoreResult<Vec<Node>>;

    /// Enumerate the immediate child files of a folder.
    fn child_files(&self, folder: &FolderRef) -> StoreResult<Vec<Node>>;

    /// Exact-name lookup of a child folder. Returns the first enumeration
    /// match; the store does not guarantee name uniqueness.
    fn folder_by_name(&self, folder: &FolderRef, name: &str) -> StoreResult<Option<Node>>;

    /// Exact-name lookup of a child file. First enumeration match.
    fn file_by_name(&self, folder: &FolderRef, name: &str) -> StoreResult<Option<Node>>;

    /// Count the children (files + folders) carrying exactly `name`.
    /// Used by handlers that must disclose duplicate-name ambiguity.
    fn count_by_name(&self, folder: &FolderRef, name: &str) -> StoreResult<usize>;

    /// First parent of a node, or `None` for top-level nodes. The store
    /// model allows multiple parents; this always reports the first one
    /// the store enumerates ("first parent wins").
    fn parent(&self, id: &NodeId) -> StoreResult<Option<Node>>;

    /// Create a folder under `parent`.
    fn create_folder(&mut self, parent: &FolderRef, name: &str) -> StoreResult<Node>;

    /// Create a plain-text file under `parent`.
    fn create_file(&mut self, parent: &FolderRef, name: &str, content: &str) -> StoreResult<Node>;

    /// Create an office document of the given kind under `parent`.
    fn create_document(
        &mut self,
        parent: &FolderRef,
        name: &str,
        kind: DocumentKind,
    ) -> StoreResult<Node>;

    /// Read the text content of a file node.
    fn read_file(&self, id: &NodeId) -> StoreResult<String>;

    /// Rename a node in place.
    fn rename(&mut self, id: &NodeId, new_name: &str) -> StoreResult<()>;

    /// Move a node to the trash pool (recoverable).
    fn trash(&mut self, id: &NodeId) -> StoreResult<()>;

    /// Restore a trashed node to its original parent.
    fn restore(&mut self, id: &NodeId) -> StoreResult<()>;

    /// Enumerate globally trashed folders (not scoped to any folder).
    fn trashed_folders(&self) -> StoreResult<Vec<Node>>;

    /// Enumerate globally trashed files.
    fn trashed_files(&self) -> StoreResult<Vec<Node>>;

    /// Re-parent a node under `target`.
    fn move_node(&mut self, id: &NodeId, target: &FolderRef) -> StoreResult<()>;

    /// Duplicate a file into `target` under its original name, returning
    /// the new node. Folder copies are not a store primitive.
    fn copy_file(&mut self, id: &NodeId, target: &FolderRef) -> StoreResult<Node>;

    /// Grant `role` on a node to an account.
    fn grant(&mut self, id: &NodeId, email: &str, role: SharingRole) -> StoreResult<()>;

    /// Open the node to anyone with the link (view level), returning its URL.
    fn enable_link_sharing(&mut self, id: &NodeId) -> StoreResult<String>;

    /// Full sharing picture of a node.
    fn sharing_info(&self, id: &NodeId) -> StoreResult<SharingInfo>;
}
