//! Core engine: command routing, session state, path resolution, and
//! rendering.
//!
//! This module provides:
//! - [`commands::execute`]: one line in, one envelope out
//! - [`session`]: the persisted working location and clipboard
//! - [`resolve`]: path expressions against the live hierarchy
//! - [`tree`] / [`listing`]: the two textual views of a folder

pub mod commands;
pub mod error;
pub mod listing;
pub mod resolve;
pub mod session;
pub mod tree;

pub use commands::{Command, CommandResult, UiAction, execute};
