//! In-memory reference implementation of the store gateway.
//!
//! Backs the integration tests and the demo REPL. Enumeration order is
//! insertion order, deliberately unsorted, so callers that require sorted
//! output have to sort themselves. The node table models the remote
//! store's quirks the engine must survive: duplicate names within a
//! parent, multi-parent nodes, and (via the seeding helpers) parent
//! cycles.

use std::collections::HashMap;

use crate::core::error::{StoreError, StoreResult};
use crate::models::{
    DocumentKind, FolderRef, Grant, Node, NodeId, NodeKind, Sharing, SharingAccess, SharingInfo,
    SharingRole,
};
use crate::store::RemoteStore;

/// Seconds the fake clock advances per mutation, so created/modified
/// timestamps stay distinct and deterministic.
const CLOCK_STEP: i64 = 60;

struct MemNode {
    name: String,
    kind: NodeKind,
    content_type: Option<String>,
    content: String,
    created: i64,
    modified: i64,
    sharing: Sharing,
    grants: Vec<Grant>,
    /// Parent chain; the first entry is "the" parent for upward walks.
    parents: Vec<FolderRef>,
    trashed: bool,
}

/// In-memory store with a deterministic id sequence and fake clock.
pub struct MemoryStore {
    nodes: HashMap<NodeId, MemNode>,
    /// Insertion order, which doubles as enumeration order.
    order: Vec<NodeId>,
    next_id: u64,
    clock: i64,
    owner: String,
}

impl MemoryStore {
    /// Create an empty store. The clock starts at an arbitrary fixed
    /// point so timestamps are stable across runs.
    pub fn new() -> Self {
        Self::with_base_time(1_750_000_000)
    }

    /// Create an empty store with the fake clock at `base` seconds.
    pub fn with_base_time(base: i64) -> Self {
        Self {
            nodes: HashMap::new(),
            order: Vec::new(),
            next_id: 0,
            clock: base,
            owner: "demo-user".to_string(),
        }
    }

    fn tick(&mut self) -> i64 {
        self.clock += CLOCK_STEP;
        self.clock
    }

    fn alloc_id(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId::new(format!("node-{:04}", self.next_id))
    }

    fn insert(
        &mut self,
        parent: &FolderRef,
        name: &str,
        kind: NodeKind,
        content_type: Option<String>,
        content: String,
    ) -> NodeId {
        let id = self.alloc_id();
        let now = self.tick();
        self.nodes.insert(
            id.clone(),
            MemNode {
                name: name.to_string(),
                kind,
                content_type,
                content,
                created: now,
                modified: now,
                sharing: Sharing::default(),
                grants: Vec::new(),
                parents: vec![parent.clone()],
                trashed: false,
            },
        );
        self.order.push(id.clone());
        id
    }

    /// Seed a folder. Convenience for tests and the demo REPL.
    pub fn add_folder(&mut self, parent: &FolderRef, name: &str) -> NodeId {
        self.insert(parent, name, NodeKind::Folder, None, String::new())
    }

    /// Seed a plain-text file.
    pub fn add_file(&mut self, parent: &FolderRef, name: &str, content: &str) -> NodeId {
        self.insert(
            parent,
            name,
            NodeKind::File,
            Some("text/plain".to_string()),
            content.to_string(),
        )
    }

    /// Attach an additional parent to a node. The original parent stays
    /// first, so upward walks keep reporting it.
    pub fn add_parent(&mut self, id: &NodeId, parent: FolderRef) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.parents.push(parent);
        }
    }

    /// Overwrite a node's parent chain. Only exists so tests can build
    /// the pathological cycles the renderer must survive.
    pub fn set_parents(&mut self, id: &NodeId, parents: Vec<FolderRef>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.parents = parents;
        }
    }

    fn get(&self, id: &NodeId) -> StoreResult<&MemNode> {
        self.nodes
            .get(id)
            .filter(|n| !n.trashed)
            .ok_or_else(|| StoreError::NodeNotFound(id.clone()))
    }

    fn get_mut(&mut self, id: &NodeId) -> StoreResult<&mut MemNode> {
        self.nodes
            .get_mut(id)
            .filter(|n| !n.trashed)
            .ok_or_else(|| StoreError::NodeNotFound(id.clone()))
    }

    fn to_node(&self, id: &NodeId, mem: &MemNode) -> Node {
        Node {
            id: id.clone(),
            name: mem.name.clone(),
            kind: mem.kind,
            content_type: mem.content_type.clone(),
            size: match mem.kind {
                NodeKind::Folder => 0,
                NodeKind::File => mem.content.len() as u64,
            },
            created: mem.created,
            modified: mem.modified,
            owner: self.owner.clone(),
            sharing: mem.sharing,
            url: format!("https://store.example/d/{}", id),
        }
    }

    fn children(&self, folder: &FolderRef, kind: NodeKind) -> Vec<Node> {
        self.order
            .iter()
            .filter_map(|id| {
                let mem = self.nodes.get(id)?;
                if mem.trashed || mem.kind != kind || !mem.parents.contains(folder) {
                    return None;
                }
                Some(self.to_node(id, mem))
            })
            .collect()
    }

    fn trashed_pool(&self, kind: NodeKind) -> Vec<Node> {
        self.order
            .iter()
            .filter_map(|id| {
                let mem = self.nodes.get(id)?;
                if !mem.trashed || mem.kind != kind {
                    return None;
                }
                Some(self.to_node(id, mem))
            })
            .collect()
    }

    /// Check whether `target` sits inside the subtree rooted at `id`.
    fn is_descendant(&self, target: &FolderRef, id: &NodeId) -> bool {
        let mut current = target.clone();
        let mut hops = 0;
        while let FolderRef::Folder(folder_id) = current {
            if &folder_id == id {
                return true;
            }
            hops += 1;
            if hops > crate::config::MAX_PARENT_DEPTH {
                return false;
            }
            current = match self.nodes.get(&folder_id).and_then(|n| n.parents.first()) {
                Some(parent) => parent.clone(),
                None => return false,
            };
        }
        false
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteStore for MemoryStore {
    fn node(&self, id: &NodeId) -> StoreResult<Node> {
        let mem = self.get(id)?;
        Ok(self.to_node(id, mem))
    }

    fn child_folders(&self, folder: &FolderRef) -> StoreResult<Vec<Node>> {
        Ok(self.children(folder, NodeKind::Folder))
    }

    fn child_files(&self, folder: &FolderRef) -> StoreResult<Vec<Node>> {
        Ok(self.children(folder, NodeKind::File))
    }

    fn folder_by_name(&self, folder: &FolderRef, name: &str) -> StoreResult<Option<Node>> {
        Ok(self
            .children(folder, NodeKind::Folder)
            .into_iter()
            .find(|n| n.name == name))
    }

    fn file_by_name(&self, folder: &FolderRef, name: &str) -> StoreResult<Option<Node>> {
        Ok(self
            .children(folder, NodeKind::File)
            .into_iter()
            .find(|n| n.name == name))
    }

    fn count_by_name(&self, folder: &FolderRef, name: &str) -> StoreResult<usize> {
        let folders = self.children(folder, NodeKind::Folder);
        let files = self.children(folder, NodeKind::File);
        Ok(folders
            .iter()
            .chain(files.iter())
            .filter(|n| n.name == name)
            .count())
    }

    fn parent(&self, id: &NodeId) -> StoreResult<Option<Node>> {
        let mem = self.get(id)?;
        match mem.parents.first() {
            Some(FolderRef::Folder(parent_id)) => {
                // A trashed or vanished parent reads as parentless, so
                // upward walks land at root instead of erroring.
                Ok(self
                    .nodes
                    .get(parent_id)
                    .filter(|n| !n.trashed)
                    .map(|parent| self.to_node(parent_id, parent)))
            }
            Some(FolderRef::Root) | None => Ok(None),
        }
    }

    fn create_folder(&mut self, parent: &FolderRef, name: &str) -> StoreResult<Node> {
        let id = self.insert(parent, name, NodeKind::Folder, None, String::new());
        self.node(&id)
    }

    fn create_file(&mut self, parent: &FolderRef, name: &str, content: &str) -> StoreResult<Node> {
        let id = self.insert(
            parent,
            name,
            NodeKind::File,
            Some("text/plain".to_string()),
            content.to_string(),
        );
        self.node(&id)
    }

    fn create_document(
        &mut self,
        parent: &FolderRef,
        name: &str,
        kind: DocumentKind,
    ) -> StoreResult<Node> {
        let id = self.insert(
            parent,
            name,
            NodeKind::File,
            Some(kind.content_type().to_string()),
            String::new(),
        );
        self.node(&id)
    }

    fn read_file(&self, id: &NodeId) -> StoreResult<String> {
        let mem = self.get(id)?;
        if mem.kind != NodeKind::File {
            return Err(StoreError::NotAFile(mem.name.clone()));
        }
        Ok(mem.content.clone())
    }

    fn rename(&mut self, id: &NodeId, new_name: &str) -> StoreResult<()> {
        let now = self.tick();
        let mem = self.get_mut(id)?;
        mem.name = new_name.to_string();
        mem.modified = now;
        Ok(())
    }

    fn trash(&mut self, id: &NodeId) -> StoreResult<()> {
        let now = self.tick();
        let mem = self.get_mut(id)?;
        mem.trashed = true;
        mem.modified = now;
        Ok(())
    }

    fn restore(&mut self, id: &NodeId) -> StoreResult<()> {
        let now = self.tick();
        let mem = self
            .nodes
            .get_mut(id)
            .filter(|n| n.trashed)
            .ok_or_else(|| StoreError::NodeNotFound(id.clone()))?;
        mem.trashed = false;
        mem.modified = now;
        Ok(())
    }

    fn trashed_folders(&self) -> StoreResult<Vec<Node>> {
        Ok(self.trashed_pool(NodeKind::Folder))
    }

    fn trashed_files(&self) -> StoreResult<Vec<Node>> {
        Ok(self.trashed_pool(NodeKind::File))
    }

    fn move_node(&mut self, id: &NodeId, target: &FolderRef) -> StoreResult<()> {
        {
            let mem = self.get(id)?;
            if mem.kind == NodeKind::Folder && self.is_descendant(target, id) {
                return Err(StoreError::Rejected(format!(
                    "cannot move '{}' into its own subtree",
                    mem.name
                )));
            }
        }
        let now = self.tick();
        let mem = self.get_mut(id)?;
        mem.parents = vec![target.clone()];
        mem.modified = now;
        Ok(())
    }

    fn copy_file(&mut self, id: &NodeId, target: &FolderRef) -> StoreResult<Node> {
        let (name, content_type, content) = {
            let mem = self.get(id)?;
            if mem.kind != NodeKind::File {
                return Err(StoreError::NotAFile(mem.name.clone()));
            }
            (mem.name.clone(), mem.content_type.clone(), mem.content.clone())
        };
        let new_id = self.insert(target, &name, NodeKind::File, content_type, content);
        self.node(&new_id)
    }

    fn grant(&mut self, id: &NodeId, email: &str, role: SharingRole) -> StoreResult<()> {
        let mem = self.get_mut(id)?;
        if let Some(existing) = mem.grants.iter_mut().find(|g| g.email == email) {
            existing.role = role;
        } else {
            mem.grants.push(Grant {
                email: email.to_string(),
                role,
            });
        }
        Ok(())
    }

    fn enable_link_sharing(&mut self, id: &NodeId) -> StoreResult<String> {
        let mem = self.get_mut(id)?;
        mem.sharing = Sharing {
            access: SharingAccess::AnyoneWithLink,
            role: SharingRole::View,
        };
        let url = format!("https://store.example/d/{}", id);
        Ok(url)
    }

    fn sharing_info(&self, id: &NodeId) -> StoreResult<SharingInfo> {
        let mem = self.get(id)?;
        Ok(SharingInfo {
            sharing: mem.sharing,
            grants: mem.grants.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_is_insertion_order() {
        let mut store = MemoryStore::new();
        store.add_folder(&FolderRef::Root, "zulu");
        store.add_folder(&FolderRef::Root, "alpha");

        let names: Vec<_> = store
            .child_folders(&FolderRef::Root)
            .unwrap()
            .into_iter()
            .map(|n| n.name)
            .collect();
        assert_eq!(names, vec!["zulu", "alpha"]);
    }

    #[test]
    fn test_first_parent_wins() {
        let mut store = MemoryStore::new();
        let a = store.add_folder(&FolderRef::Root, "a");
        let b = store.add_folder(&FolderRef::Root, "b");
        let shared = store.add_folder(&FolderRef::Folder(a.clone()), "shared");
        store.add_parent(&shared, FolderRef::Folder(b));

        let parent = store.parent(&shared).unwrap().unwrap();
        assert_eq!(parent.id, a);
    }

    #[test]
    fn test_trash_hides_node_from_children_and_lookup() {
        let mut store = MemoryStore::new();
        let f = store.add_file(&FolderRef::Root, "doomed.txt", "x");
        store.trash(&f).unwrap();

        assert!(store.child_files(&FolderRef::Root).unwrap().is_empty());
        assert!(matches!(store.node(&f), Err(StoreError::NodeNotFound(_))));
        assert_eq!(store.trashed_files().unwrap().len(), 1);

        store.restore(&f).unwrap();
        assert_eq!(store.child_files(&FolderRef::Root).unwrap().len(), 1);
        assert!(store.trashed_files().unwrap().is_empty());
    }

    #[test]
    fn test_copy_file_gets_fresh_identity() {
        let mut store = MemoryStore::new();
        let f = store.add_file(&FolderRef::Root, "a.txt", "hello");
        let copy = store.copy_file(&f, &FolderRef::Root).unwrap();

        assert_ne!(copy.id, f);
        assert_eq!(copy.name, "a.txt");
        assert_eq!(copy.size, 5);
        assert_eq!(store.child_files(&FolderRef::Root).unwrap().len(), 2);
    }

    #[test]
    fn test_move_into_own_subtree_rejected() {
        let mut store = MemoryStore::new();
        let outer = store.add_folder(&FolderRef::Root, "outer");
        let inner = store.add_folder(&FolderRef::Folder(outer.clone()), "inner");

        let err = store
            .move_node(&outer, &FolderRef::Folder(inner))
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
    }

    #[test]
    fn test_grant_replaces_existing_role() {
        let mut store = MemoryStore::new();
        let f = store.add_file(&FolderRef::Root, "a.txt", "");
        store.grant(&f, "x@example.com", SharingRole::View).unwrap();
        store.grant(&f, "x@example.com", SharingRole::Edit).unwrap();

        let info = store.sharing_info(&f).unwrap();
        assert_eq!(info.grants.len(), 1);
        assert_eq!(info.grants[0].role, SharingRole::Edit);
    }
}
