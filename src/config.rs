//! Engine configuration.
//!
//! Centralizes the constants used throughout the engine. Text assets are
//! loaded at compile time using `include_str!`.

// =============================================================================
// Text Assets (loaded at compile time)
// =============================================================================

/// Help text for the `help` command.
pub const HELP_TEXT: &str = include_str!("../assets/text/help.txt");

// =============================================================================
// Session State Fields
// =============================================================================

/// Field names used against the session state store.
pub mod state_fields {
    /// Current working location (folder id, or the root sentinel).
    pub const CURRENT_DIR: &str = "currentDir";
    /// Clipboard node id.
    pub const CLIPBOARD: &str = "clipboard";
    /// Clipboard node kind (`file` / `folder`).
    pub const CLIPBOARD_TYPE: &str = "clipboardType";
}

// =============================================================================
// Listing Configuration
// =============================================================================

/// Column widths for the flat listing table.
pub mod listing {
    /// NAME column width (bracketed folder names included).
    pub const NAME_WIDTH: usize = 35;
    /// TYPE column width.
    pub const TYPE_WIDTH: usize = 15;
    /// SIZE column width.
    pub const SIZE_WIDTH: usize = 12;
    /// Width of the dash rule under the header.
    pub const RULE_WIDTH: usize = 90;
}

/// Column widths for the trash listing table.
pub mod trash_listing {
    /// NAME column width.
    pub const NAME_WIDTH: usize = 40;
    /// TYPE column width.
    pub const TYPE_WIDTH: usize = 15;
    /// Width of the dash rule under the header.
    pub const RULE_WIDTH: usize = 80;
}

// =============================================================================
// Tree Configuration
// =============================================================================

/// Default cap on file children rendered per folder in the tree view.
/// Sub-folders are never capped. Tunable through `TreeOptions`.
pub const TREE_MAX_FILES_PER_FOLDER: usize = 50;

/// Defensive bound on upward parent walks; a hierarchy deeper than this is
/// treated as a store-side cycle.
pub const MAX_PARENT_DEPTH: usize = 100;

// =============================================================================
// Terminal Configuration
// =============================================================================

/// Colors accepted by the `color` command.
pub const VALID_COLORS: &[&str] = &[
    "white", "blue", "green", "red", "yellow", "cyan", "magenta", "black",
];
