//! Command dispatch and handlers.
//!
//! [`execute`] is the router boundary: it normalizes and parses the line,
//! loads session state, dispatches to exactly one handler, persists the
//! session, and converts any fault that escaped a handler into a failure
//! envelope. Nothing below this function panics on store faults and
//! nothing above it sees a Rust error.

use tracing::{debug, warn};

use crate::config::{HELP_TEXT, VALID_COLORS};
use crate::core::error::EngineError;
use crate::core::listing::{render_listing, render_trash};
use crate::core::resolve::{build_path, resolve_entry, resolve_folder};
use crate::core::session::{Clipboard, SessionState, StateStore};
use crate::core::tree::{TreeOptions, render_tree};
use crate::models::{DocumentKind, FolderRef, Node, NodeKind, SharingRole};
use crate::store::RemoteStore;

use super::{Command, CommandResult, UiAction, parse_line};

/// Process one raw command line against the session and the store.
///
/// Always returns an envelope; session mutations (cd, copy) are written
/// back to the state store before returning.
pub fn execute(
    line: &str,
    state: &mut dyn StateStore,
    store: &mut dyn RemoteStore,
) -> CommandResult {
    let Some(command) = parse_line(line) else {
        return CommandResult::failure("Error: Empty command");
    };

    let mut session = SessionState::load(state);
    debug!(?command, location = %session.current.to_state(), "dispatching");

    let result = match dispatch(command, &mut session, store) {
        Ok(result) => result,
        Err(err) => {
            warn!(error = %err, "command failed");
            CommandResult::failure(format!("Error: {}", err))
        }
    };

    session.save(state);
    result
}

fn dispatch(
    command: Command,
    session: &mut SessionState,
    store: &mut dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    match command {
        Command::Ls => execute_ls(session, store),
        Command::LsTree => execute_ls_tree(session, store),
        Command::Pwd => execute_pwd(session, store),
        Command::Cd(path) => execute_cd(path, session, store),
        Command::Find(name) => execute_find(name, session, store),
        Command::New { name, kind } => execute_new(name, kind, session, store),
        Command::Touch(name) => execute_create_file(name, session, store),
        Command::Mkdir(name) => execute_create_folder(name, session, store),
        Command::Rename { old, new } => execute_rename(old, new, session, store),
        Command::Del(name) => execute_del(name, session, store),
        Command::Move { name, target } => execute_move(name, target, session, store),
        Command::CopyTo { name, target } => execute_copy_to(name, target, session, store),
        Command::Copy(name) => execute_copy(name, session, store),
        Command::Paste => execute_paste(session, store),
        Command::Stat(name) => execute_stat(name, session, store),
        Command::Url(name) => execute_url(name, session, store),
        Command::Open(name) => execute_open(name, session, store),
        Command::Cat(name) => execute_cat(name, session, store),
        Command::Share { name, email, role } => execute_share(name, email, role, session, store),
        Command::ShareLink(name) => execute_share_link(name, session, store),
        Command::ShareList(name) => execute_share_list(name, session, store),
        Command::Trash => execute_trash_list(store),
        Command::TrashRestore(name) => execute_trash_restore(name, store),
        Command::Clear => Ok(CommandResult::action("", UiAction::Clear)),
        Command::Reload => Ok(CommandResult::action("", UiAction::Reload)),
        Command::Exit => Ok(CommandResult::action("Closing...", UiAction::Exit)),
        Command::Color(color) => Ok(execute_color(color)),
        Command::Help => Ok(CommandResult::ok(HELP_TEXT)),
        Command::Invalid(usage) => Ok(CommandResult::failure(format!("Error: {}", usage))),
        Command::Unknown(verb) => Ok(CommandResult::failure(format!(
            "Error: Unknown command '{}'. Type 'help' for available commands.",
            verb
        ))),
    }
}

// =============================================================================
// Navigation
// =============================================================================

fn execute_ls(
    session: &mut SessionState,
    store: &dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    let current = session.checked_current(store)?;
    let folders = store.child_folders(&current)?;
    let files = store.child_files(&current)?;
    Ok(CommandResult::ok(render_listing(folders, files)))
}

fn execute_ls_tree(
    session: &mut SessionState,
    store: &dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    let current = session.checked_current(store)?;
    let tree = render_tree(store, &current, &TreeOptions::default())?;
    Ok(CommandResult::ok(tree))
}

fn execute_pwd(
    session: &mut SessionState,
    store: &dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    let current = session.checked_current(store)?;
    Ok(CommandResult::ok(build_path(store, &current)?))
}

fn execute_cd(
    path: String,
    session: &mut SessionState,
    store: &dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    if path.is_empty() || path == "/" || path == "~" {
        session.current = FolderRef::Root;
        return Ok(CommandResult::ok("Changed to root directory: /"));
    }

    let current = session.checked_current(store)?;
    let target = resolve_folder(store, &current, &path)?;
    let rendered = build_path(store, &target)?;
    session.current = target;
    Ok(CommandResult::ok(format!("Changed to: {}", rendered)))
}

fn execute_find(
    name: String,
    session: &mut SessionState,
    store: &dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    let current = session.checked_current(store)?;
    let needle = name.to_lowercase();

    for folder in store.child_folders(&current)? {
        if folder.name.to_lowercase() == needle {
            let path = build_path(store, &FolderRef::Folder(folder.id.clone()))?;
            return Ok(CommandResult::ok(format!(
                "Found (DIR): {}\nPath: {}\nID: {}",
                folder.name, path, folder.id
            )));
        }
    }

    for file in store.child_files(&current)? {
        if file.name.to_lowercase() == needle {
            let parent_path = build_path(store, &current)?;
            let path = if parent_path == "/" {
                format!("/{}", file.name)
            } else {
                format!("{}/{}", parent_path, file.name)
            };
            return Ok(CommandResult::ok(format!(
                "Found (FILE): {}\nPath: {}\nID: {}",
                file.name, path, file.id
            )));
        }
    }

    Ok(CommandResult::failure(format!(
        "Error: '{}' not found in current directory",
        name
    )))
}

// =============================================================================
// Creation
// =============================================================================

fn execute_new(
    name: String,
    kind: String,
    session: &mut SessionState,
    store: &mut dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    match kind.as_str() {
        "file" => execute_create_file(name, session, store),
        "dir" => execute_create_folder(name, session, store),
        "script" | "py" => Ok(CommandResult::failure(format!(
            "Error: '{}' creation requires external tooling and is not available from the terminal",
            kind
        ))),
        other => match DocumentKind::parse(other) {
            Some(doc_kind) => {
                let current = session.checked_current(store)?;
                let node = store.create_document(&current, &name, doc_kind)?;
                Ok(created_result(other, &node))
            }
            None => Ok(CommandResult::failure(format!(
                "Error: Unknown type '{}'",
                other
            ))),
        },
    }
}

fn execute_create_file(
    name: String,
    session: &mut SessionState,
    store: &mut dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    let current = session.checked_current(store)?;
    let node = store.create_file(&current, &name, "")?;
    Ok(created_result("file", &node))
}

fn execute_create_folder(
    name: String,
    session: &mut SessionState,
    store: &mut dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    let current = session.checked_current(store)?;
    let node = store.create_folder(&current, &name)?;
    Ok(created_result("dir", &node))
}

fn created_result(kind: &str, node: &Node) -> CommandResult {
    CommandResult::ok(format!(
        "Created {}: {}\nID: {}\nURL: {}",
        kind, node.name, node.id, node.url
    ))
}

// =============================================================================
// Mutation
// =============================================================================

fn execute_rename(
    old: String,
    new: String,
    session: &mut SessionState,
    store: &mut dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    let current = session.checked_current(store)?;

    if let Some(folder) = store.folder_by_name(&current, &old)? {
        store.rename(&folder.id, &new)?;
        return Ok(CommandResult::ok(format!(
            "Renamed directory: {} -> {}",
            old, new
        )));
    }

    if let Some(file) = store.file_by_name(&current, &old)? {
        store.rename(&file.id, &new)?;
        return Ok(CommandResult::ok(format!(
            "Renamed file: {} -> {}",
            old, new
        )));
    }

    Ok(CommandResult::failure(format!("Error: '{}' not found", old)))
}

fn execute_del(
    name: String,
    session: &mut SessionState,
    store: &mut dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    let current = session.checked_current(store)?;

    let Some(node) = resolve_entry(store, &current, &name)? else {
        return Ok(CommandResult::failure(format!(
            "Error: '{}' not found",
            name
        )));
    };

    let duplicates = store.count_by_name(&current, &name)?;
    store.trash(&node.id)?;

    let mut output = format!("Moved to trash: {} ({})", name, node.kind.label());
    if duplicates > 1 {
        output.push_str(&format!(
            "\nWarning: {} items share this name; only the first match was trashed.",
            duplicates
        ));
    }
    Ok(CommandResult::ok(output))
}

fn execute_move(
    name: String,
    target: String,
    session: &mut SessionState,
    store: &mut dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    let current = session.checked_current(store)?;

    let Some(node) = resolve_entry(store, &current, &name)? else {
        return Ok(CommandResult::failure(format!(
            "Error: '{}' not found",
            name
        )));
    };

    let destination = resolve_folder(store, &current, &target)?;
    store.move_node(&node.id, &destination)?;
    Ok(CommandResult::ok(format!(
        "Moved {} to {}",
        name,
        build_path(store, &destination)?
    )))
}

fn execute_copy_to(
    name: String,
    target: String,
    session: &mut SessionState,
    store: &mut dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    let current = session.checked_current(store)?;

    let Some(node) = resolve_entry(store, &current, &name)? else {
        return Ok(CommandResult::failure(format!(
            "Error: '{}' not found",
            name
        )));
    };
    if node.is_folder() {
        return Ok(CommandResult::failure(
            "Error: Folder copy is not supported",
        ));
    }

    let destination = resolve_folder(store, &current, &target)?;
    let copy = store.copy_file(&node.id, &destination)?;
    Ok(CommandResult::ok(format!(
        "Copied {} to {}",
        copy.name,
        build_path(store, &destination)?
    )))
}

// =============================================================================
// Clipboard
// =============================================================================

fn execute_copy(
    name: String,
    session: &mut SessionState,
    store: &dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    let current = session.checked_current(store)?;

    let Some(node) = resolve_entry(store, &current, &name)? else {
        return Ok(CommandResult::failure(format!(
            "Error: '{}' not found",
            name
        )));
    };

    // Single slot, last write wins.
    session.clipboard = Some(Clipboard {
        id: node.id,
        kind: node.kind,
    });
    Ok(CommandResult::ok(format!(
        "Copied to clipboard: {} ({})",
        name,
        node.kind.label()
    )))
}

fn execute_paste(
    session: &mut SessionState,
    store: &mut dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    let Some(clipboard) = session.clipboard.clone() else {
        return Ok(CommandResult::failure("Error: Clipboard is empty"));
    };

    if clipboard.kind == NodeKind::Folder {
        // Defined limitation; the clipboard stays as it was.
        return Ok(CommandResult::failure(
            "Error: Folder paste is not supported",
        ));
    }

    let current = session.checked_current(store)?;
    let copy = store.copy_file(&clipboard.id, &current)?;
    Ok(CommandResult::ok(format!("Pasted file: {}", copy.name)))
}

// =============================================================================
// Inspection
// =============================================================================

fn execute_stat(
    name: String,
    session: &mut SessionState,
    store: &dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    use crate::utils::format::{format_bytes, format_full};

    let current = session.checked_current(store)?;

    let Some(node) = resolve_entry(store, &current, &name)? else {
        return Ok(CommandResult::failure(format!(
            "Error: '{}' not found",
            name
        )));
    };

    let info = store.sharing_info(&node.id)?;
    let mut output = if node.is_folder() {
        String::from("=== Directory Statistics ===\n\n")
    } else {
        String::from("=== File Statistics ===\n\n")
    };
    output.push_str(&format!("Name:       {}\n", node.name));
    output.push_str(&format!("ID:         {}\n", node.id));
    if node.is_file() {
        output.push_str(&format!(
            "Type:       {}\n",
            node.content_type.as_deref().unwrap_or("unknown")
        ));
        output.push_str(&format!("Size:       {}\n", format_bytes(node.size)));
    }
    output.push_str(&format!("Created:    {}\n", format_full(node.created)));
    output.push_str(&format!("Modified:   {}\n", format_full(node.modified)));
    output.push_str(&format!("Owner:      {}\n", node.owner));
    output.push_str(&format!("URL:        {}\n", node.url));
    output.push_str(&format!(
        "Access:     {} ({})\n",
        info.sharing.access, info.sharing.role
    ));

    Ok(CommandResult::ok(output))
}

fn execute_url(
    name: String,
    session: &mut SessionState,
    store: &dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    let current = session.checked_current(store)?;
    match resolve_entry(store, &current, &name)? {
        Some(node) => Ok(CommandResult::ok(node.url)),
        None => Ok(CommandResult::failure(format!(
            "Error: '{}' not found",
            name
        ))),
    }
}

fn execute_open(
    name: String,
    session: &mut SessionState,
    store: &dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    let current = session.checked_current(store)?;
    match resolve_entry(store, &current, &name)? {
        Some(node) => Ok(CommandResult::action(node.url, UiAction::Open)),
        None => Ok(CommandResult::failure(format!(
            "Error: '{}' not found",
            name
        ))),
    }
}

fn execute_cat(
    name: String,
    session: &mut SessionState,
    store: &dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    let current = session.checked_current(store)?;

    let Some(node) = resolve_entry(store, &current, &name)? else {
        return Ok(CommandResult::failure(format!(
            "Error: '{}' not found",
            name
        )));
    };
    if node.is_folder() {
        return Ok(CommandResult::failure(format!(
            "Error: '{}' is a directory",
            name
        )));
    }

    Ok(CommandResult::ok(store.read_file(&node.id)?))
}

// =============================================================================
// Sharing
// =============================================================================

fn execute_share(
    name: String,
    email: String,
    role: String,
    session: &mut SessionState,
    store: &mut dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    // Validate the enumerated option before touching the store.
    let Some(parsed_role) = SharingRole::parse(&role) else {
        return Ok(CommandResult::failure(format!(
            "Error: Unknown permission type '{}'",
            role
        )));
    };

    let current = session.checked_current(store)?;
    let Some(node) = resolve_entry(store, &current, &name)? else {
        return Ok(CommandResult::failure(format!(
            "Error: '{}' not found",
            name
        )));
    };

    store.grant(&node.id, &email, parsed_role)?;
    Ok(CommandResult::ok(format!(
        "Shared {} with {} ({})",
        name, email, role
    )))
}

fn execute_share_link(
    name: String,
    session: &mut SessionState,
    store: &mut dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    let current = session.checked_current(store)?;
    let Some(node) = resolve_entry(store, &current, &name)? else {
        return Ok(CommandResult::failure(format!(
            "Error: '{}' not found",
            name
        )));
    };

    let url = store.enable_link_sharing(&node.id)?;
    Ok(CommandResult::ok(format!(
        "Anyone with the link can view: {}",
        url
    )))
}

fn execute_share_list(
    name: String,
    session: &mut SessionState,
    store: &dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    let current = session.checked_current(store)?;
    let Some(node) = resolve_entry(store, &current, &name)? else {
        return Ok(CommandResult::failure(format!(
            "Error: '{}' not found",
            name
        )));
    };

    let info = store.sharing_info(&node.id)?;
    let mut output = format!(
        "Sharing for '{}'\nAccess: {} ({})\n",
        node.name, info.sharing.access, info.sharing.role
    );
    if info.grants.is_empty() {
        output.push_str("No account grants.");
    } else {
        for grant in &info.grants {
            output.push_str(&format!("  {} ({})\n", grant.email, grant.role));
        }
    }
    Ok(CommandResult::ok(output))
}

// =============================================================================
// Trash
// =============================================================================

fn execute_trash_list(store: &dyn RemoteStore) -> Result<CommandResult, EngineError> {
    let folders = store.trashed_folders()?;
    let files = store.trashed_files()?;
    Ok(CommandResult::ok(render_trash(folders, files)))
}

fn execute_trash_restore(
    name: String,
    store: &mut dyn RemoteStore,
) -> Result<CommandResult, EngineError> {
    // Files pool first, then folders; first exact-name match wins.
    let file_hit = store
        .trashed_files()?
        .into_iter()
        .find(|node| node.name == name);
    let hit = match file_hit {
        Some(node) => Some(node),
        None => store
            .trashed_folders()?
            .into_iter()
            .find(|node| node.name == name),
    };

    match hit {
        Some(node) => {
            store.restore(&node.id)?;
            Ok(CommandResult::ok(format!("Restored: {}", name)))
        }
        None => Ok(CommandResult::failure(format!(
            "Error: '{}' not found in trash",
            name
        ))),
    }
}

// =============================================================================
// Session / UI
// =============================================================================

fn execute_color(color: String) -> CommandResult {
    if VALID_COLORS.contains(&color.as_str()) {
        CommandResult::color_change(color)
    } else {
        CommandResult::failure(format!("Error: Invalid color '{}'", color))
    }
}
