//! Node types for the remote object store.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Identifiers
// =============================================================================

/// Opaque, stable identifier of a node in the remote store.
///
/// This newtype distinguishes store identifiers from general strings in
/// signatures that mix ids, names, and path expressions. The id is stored
/// as-is; validity is a property of the store, not of the value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(String);

impl NodeId {
    /// Create a new id from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A folder reference: either the store root or a concrete folder node.
///
/// The root is a sentinel rather than a node id because the remote store
/// addresses it specially and the session state persists it as the literal
/// string `root`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FolderRef {
    Root,
    Folder(NodeId),
}

impl FolderRef {
    /// Sentinel used when persisting the root location.
    pub const ROOT_SENTINEL: &'static str = "root";

    /// Parse a persisted location field back into a reference.
    pub fn from_state(value: &str) -> Self {
        if value == Self::ROOT_SENTINEL {
            Self::Root
        } else {
            Self::Folder(NodeId::new(value))
        }
    }

    /// Render the reference for persistence.
    pub fn to_state(&self) -> String {
        match self {
            Self::Root => Self::ROOT_SENTINEL.to_string(),
            Self::Folder(id) => id.as_str().to_string(),
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }
}

// =============================================================================
// Nodes
// =============================================================================

/// Node kind: every node in the store is one or the other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    Folder,
    File,
}

impl NodeKind {
    /// Short uppercase label used in listings and diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Folder => "DIR",
            Self::File => "FILE",
        }
    }

    /// Parse the persisted clipboard-kind field.
    pub fn from_state(value: &str) -> Option<Self> {
        match value {
            "folder" => Some(Self::Folder),
            "file" => Some(Self::File),
            _ => None,
        }
    }

    /// Render the kind for persistence.
    pub fn to_state(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
        }
    }
}

/// A file or folder in the remote store.
///
/// Names are mutable and not guaranteed unique within a parent; the id is
/// the only stable handle. Timestamps are Unix seconds. `size` is 0 for
/// folders and for empty files.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// Content-type tag, e.g. `text/plain`. Folders carry none.
    pub content_type: Option<String>,
    pub size: u64,
    pub created: i64,
    pub modified: i64,
    pub owner: String,
    pub sharing: Sharing,
    pub url: String,
}

impl Node {
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Short type label for listing rows: `DIR` for folders, the trailing
    /// segment of the content type (capped at 12 chars) for files.
    pub fn type_label(&self) -> String {
        match self.kind {
            NodeKind::Folder => "DIR".to_string(),
            NodeKind::File => {
                let tag = self
                    .content_type
                    .as_deref()
                    .and_then(|ct| ct.rsplit('/').next())
                    .unwrap_or("file");
                tag.chars().take(12).collect()
            }
        }
    }
}

// =============================================================================
// Sharing
// =============================================================================

/// Who can reach a node without an explicit grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SharingAccess {
    Private,
    AnyoneWithLink,
}

impl fmt::Display for SharingAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Private => write!(f, "PRIVATE"),
            Self::AnyoneWithLink => write!(f, "ANYONE_WITH_LINK"),
        }
    }
}

/// Permission level attached to an access scope or a grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SharingRole {
    View,
    Comment,
    Edit,
}

impl SharingRole {
    /// Parse the user-facing role argument of the `share` command.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "view" => Some(Self::View),
            "comment" => Some(Self::Comment),
            "edit" => Some(Self::Edit),
            _ => None,
        }
    }
}

impl fmt::Display for SharingRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::View => write!(f, "VIEW"),
            Self::Comment => write!(f, "COMMENT"),
            Self::Edit => write!(f, "EDIT"),
        }
    }
}

/// Sharing state carried on every node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sharing {
    pub access: SharingAccess,
    pub role: SharingRole,
}

impl Default for Sharing {
    fn default() -> Self {
        Self {
            access: SharingAccess::Private,
            role: SharingRole::View,
        }
    }
}

/// One per-account grant on a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grant {
    pub email: String,
    pub role: SharingRole,
}

/// Full sharing picture of a node, as reported by the gateway.
#[derive(Clone, Debug, Default)]
pub struct SharingInfo {
    pub sharing: Sharing,
    pub grants: Vec<Grant>,
}

// =============================================================================
// Document kinds
// =============================================================================

/// Document kinds the `new` command can ask the gateway to create.
///
/// `Script` and `Py` are part of the advertised surface but creation is
/// delegated to external tooling; the handler reports them as unsupported
/// before reaching the gateway.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentKind {
    Form,
    Sheet,
    Docs,
    Slide,
}

impl DocumentKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "form" => Some(Self::Form),
            "sheet" => Some(Self::Sheet),
            "docs" => Some(Self::Docs),
            "slide" => Some(Self::Slide),
            _ => None,
        }
    }

    /// Content-type tag the store attaches to the created document.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Form => "application/vnd.store.form",
            Self::Sheet => "application/vnd.store.sheet",
            Self::Docs => "application/vnd.store.document",
            Self::Slide => "application/vnd.store.slides",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_ref_state_round_trip() {
        assert_eq!(FolderRef::from_state("root"), FolderRef::Root);
        assert_eq!(FolderRef::Root.to_state(), "root");

        let folder = FolderRef::from_state("abc123");
        assert_eq!(folder, FolderRef::Folder(NodeId::new("abc123")));
        assert_eq!(folder.to_state(), "abc123");
    }

    #[test]
    fn test_node_kind_state() {
        assert_eq!(NodeKind::from_state("file"), Some(NodeKind::File));
        assert_eq!(NodeKind::from_state("folder"), Some(NodeKind::Folder));
        assert_eq!(NodeKind::from_state("link"), None);
        assert_eq!(NodeKind::File.to_state(), "file");
    }

    #[test]
    fn test_type_label() {
        let node = Node {
            id: NodeId::new("n1"),
            name: "report.txt".to_string(),
            kind: NodeKind::File,
            content_type: Some("application/vnd.store.spreadsheet-like".to_string()),
            size: 10,
            created: 0,
            modified: 0,
            owner: "me".to_string(),
            sharing: Sharing::default(),
            url: String::new(),
        };
        // Trailing segment, capped at 12 chars.
        assert_eq!(node.type_label(), "vnd.store.sp");
    }

    #[test]
    fn test_sharing_role_parse() {
        assert_eq!(SharingRole::parse("view"), Some(SharingRole::View));
        assert_eq!(SharingRole::parse("edit"), Some(SharingRole::Edit));
        assert_eq!(SharingRole::parse("comment"), Some(SharingRole::Comment));
        assert_eq!(SharingRole::parse("owner"), None);
    }

    #[test]
    fn test_document_kind_parse() {
        assert_eq!(DocumentKind::parse("sheet"), Some(DocumentKind::Sheet));
        assert_eq!(DocumentKind::parse("file"), None);
    }
}
