//! Data models for the remote store.
//!
//! Contains domain types for:
//! - [`Node`], [`NodeId`], [`NodeKind`], [`FolderRef`] store entities
//! - [`Sharing`], [`SharingAccess`], [`SharingRole`], [`Grant`],
//!   [`SharingInfo`] sharing state
//! - [`DocumentKind`] office-document creation kinds

mod node;

pub use node::{
    DocumentKind, FolderRef, Grant, Node, NodeId, NodeKind, Sharing, SharingAccess, SharingInfo,
    SharingRole,
};
