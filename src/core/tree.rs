//! Recursive tree rendering with branch glyphs.
//!
//! Sub-folders render before files; both groups use the same case-aware
//! name order as the flat listing. File children are capped per folder by
//! a tunable limit; sub-folders recurse without a count cap. A visited
//! set keeps the walk finite even if the store hands back a parent cycle.

use std::collections::HashSet;

use crate::config::TREE_MAX_FILES_PER_FOLDER;
use crate::core::error::StoreResult;
use crate::core::listing::sort_by_name;
use crate::models::{FolderRef, NodeId};
use crate::store::RemoteStore;

/// Tunables for the tree view.
#[derive(Clone, Debug)]
pub struct TreeOptions {
    /// Maximum file children rendered per folder. Sub-folders are never
    /// capped.
    pub max_files_per_folder: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            max_files_per_folder: TREE_MAX_FILES_PER_FOLDER,
        }
    }
}

/// Render a folder and its descendants as an indented branch diagram.
pub fn render_tree(
    store: &dyn RemoteStore,
    folder: &FolderRef,
    options: &TreeOptions,
) -> StoreResult<String> {
    let name = match folder {
        FolderRef::Root => "/".to_string(),
        FolderRef::Folder(id) => format!("{}/", store.node(id)?.name),
    };

    let mut output = String::new();
    let mut visited = HashSet::new();
    render_folder(
        store,
        folder,
        &name,
        "",
        true,
        options,
        &mut visited,
        &mut output,
    )?;
    Ok(output)
}

#[allow(clippy::too_many_arguments)]
fn render_folder(
    store: &dyn RemoteStore,
    folder: &FolderRef,
    name: &str,
    prefix: &str,
    is_last: bool,
    options: &TreeOptions,
    visited: &mut HashSet<NodeId>,
    output: &mut String,
) -> StoreResult<()> {
    let glyph = if is_last { "└── " } else { "├── " };

    if let FolderRef::Folder(id) = folder {
        if !visited.insert(id.clone()) {
            // Already rendered on this walk: a store-side cycle.
            output.push_str(&format!("{}{}{} ...\n", prefix, glyph, name));
            return Ok(());
        }
    }

    output.push_str(&format!("{}{}{}\n", prefix, glyph, name));

    let mut folders = store.child_folders(folder)?;
    let mut files = store.child_files(folder)?;
    sort_by_name(&mut folders);
    sort_by_name(&mut files);
    files.truncate(options.max_files_per_folder);

    let total = folders.len() + files.len();
    let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
    let mut count = 0;

    for sub in folders {
        count += 1;
        render_folder(
            store,
            &FolderRef::Folder(sub.id.clone()),
            &format!("{}/", sub.name),
            &child_prefix,
            count == total,
            options,
            visited,
            output,
        )?;
    }

    for file in files {
        count += 1;
        let glyph = if count == total { "└── " } else { "├── " };
        output.push_str(&format!("{}{}{}\n", child_prefix, glyph, file.name));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_tree_layout_and_glyphs() {
        let mut store = MemoryStore::new();
        let docs = store.add_folder(&FolderRef::Root, "docs");
        store.add_file(&FolderRef::Folder(docs.clone()), "a.txt", "a");
        store.add_file(&FolderRef::Root, "z.txt", "z");

        let output = render_tree(&store, &FolderRef::Root, &TreeOptions::default()).unwrap();
        let expected = "\
└── /
    ├── docs/
    │   └── a.txt
    └── z.txt
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_tree_sorts_folders_before_files_by_name() {
        let mut store = MemoryStore::new();
        // Insertion order is deliberately unsorted.
        store.add_file(&FolderRef::Root, "b.txt", "");
        store.add_folder(&FolderRef::Root, "zeta");
        store.add_folder(&FolderRef::Root, "Alpha");
        store.add_file(&FolderRef::Root, "a.txt", "");

        let output = render_tree(&store, &FolderRef::Root, &TreeOptions::default()).unwrap();
        let entries: Vec<&str> = output
            .lines()
            .skip(1)
            .map(|l| l.trim_start_matches(['│', ' ', '├', '└', '─']))
            .collect();
        assert_eq!(entries, vec!["Alpha/", "zeta/", "a.txt", "b.txt"]);
    }

    #[test]
    fn test_file_cap_is_tunable() {
        let mut store = MemoryStore::new();
        for i in 0..5 {
            store.add_file(&FolderRef::Root, &format!("f{}.txt", i), "");
        }

        let options = TreeOptions {
            max_files_per_folder: 2,
        };
        let output = render_tree(&store, &FolderRef::Root, &options).unwrap();
        // Root line + two file lines.
        assert_eq!(output.lines().count(), 3);
    }

    #[test]
    fn test_subfolders_are_not_capped() {
        let mut store = MemoryStore::new();
        for i in 0..4 {
            store.add_folder(&FolderRef::Root, &format!("d{}", i));
        }

        let options = TreeOptions {
            max_files_per_folder: 1,
        };
        let output = render_tree(&store, &FolderRef::Root, &options).unwrap();
        assert_eq!(output.lines().count(), 5);
    }

    #[test]
    fn test_cycle_guard_terminates() {
        let mut store = MemoryStore::new();
        let a = store.add_folder(&FolderRef::Root, "a");
        let b = store.add_folder(&FolderRef::Folder(a.clone()), "b");
        // Corrupt the store: b also claims a as its child.
        store.add_parent(&a, FolderRef::Folder(b.clone()));

        let output = render_tree(&store, &FolderRef::Folder(a), &TreeOptions::default()).unwrap();
        assert!(output.contains("..."));
        // Finite output.
        assert!(output.lines().count() < 10);
    }

    #[test]
    fn test_tree_starts_at_named_folder() {
        let mut store = MemoryStore::new();
        let docs = store.add_folder(&FolderRef::Root, "docs");
        store.add_file(&FolderRef::Folder(docs.clone()), "a.txt", "");

        let output = render_tree(&store, &FolderRef::Folder(docs), &TreeOptions::default()).unwrap();
        assert!(output.starts_with("└── docs/\n"));
    }
}
