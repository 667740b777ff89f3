//! # drivesh
//!
//! Line-oriented terminal engine for a remote, hierarchical object store.
//!
//! Each invocation takes one raw command line (`ls`, `cd Projects`,
//! `new report.txt file`, ...) and turns it into gateway calls against the
//! store, returning a uniform `{success, output, action?, color?}`
//! envelope. Two session fields (the current working location and a
//! one-slot clipboard) persist between otherwise stateless invocations
//! and make the store feel like a conventional shell filesystem.
//!
//! ## Pieces
//!
//! - [`execute`]: the command router. Normalizes, parses, dispatches,
//!   and converts faults into failure envelopes.
//! - [`RemoteStore`]: the gateway trait the engine consumes; implement
//!   it over your storage API. [`MemoryStore`] is the in-memory reference
//!   implementation used by the tests and the demo REPL.
//! - [`StateStore`]: keyed string persistence for the session fields,
//!   with in-memory and JSON-file implementations.
//!
//! ## Example
//!
//! ```
//! use drivesh::{MemoryStateStore, MemoryStore, execute};
//! use drivesh::models::FolderRef;
//!
//! let mut store = MemoryStore::new();
//! store.add_folder(&FolderRef::Root, "Projects");
//!
//! let mut state = MemoryStateStore::new();
//! let result = execute("cd Projects", &mut state, &mut store);
//! assert!(result.success);
//! assert_eq!(execute("pwd", &mut state, &mut store).output, "/Projects");
//! ```

pub mod config;
pub mod core;
pub mod models;
pub mod store;
pub mod utils;

pub use crate::core::commands::{Command, CommandResult, UiAction, execute};
pub use crate::core::error::{EngineError, StoreError, StoreResult};
pub use crate::core::session::{
    Clipboard, JsonStateStore, MemoryStateStore, SessionState, StateStore,
};
pub use crate::core::tree::TreeOptions;
pub use crate::store::{MemoryStore, RemoteStore};
