//! Flat listing and trash tables.
//!
//! Fixed-width, left-justified columns with ellipsis truncation. Folders
//! sort before files; within each kind names compare case-aware: the
//! primary key is the NFKC-normalized, lowercased name, with the raw name
//! as tie-break so `A` and `a` still order deterministically.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

use crate::config::{listing, trash_listing};
use crate::models::Node;
use crate::utils::format::{format_bytes, format_minute, pad_cell};

/// Case-aware name comparison used by every sorted view.
pub fn name_cmp(a: &str, b: &str) -> Ordering {
    let fold = |s: &str| s.nfkc().collect::<String>().to_lowercase();
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

/// Sort one kind-group of nodes by name.
pub fn sort_by_name(nodes: &mut [Node]) {
    nodes.sort_by(|a, b| name_cmp(&a.name, &b.name));
}

/// Render the flat listing of a folder: sorted sub-folders, then sorted
/// files, in the four-column table.
pub fn render_listing(mut folders: Vec<Node>, mut files: Vec<Node>) -> String {
    if folders.is_empty() && files.is_empty() {
        return "Empty directory.".to_string();
    }

    sort_by_name(&mut folders);
    sort_by_name(&mut files);

    let total = folders.len() + files.len();
    let mut output = format!("Total: {} item(s)\n\n", total);
    output.push_str(&pad_cell("NAME", listing::NAME_WIDTH));
    output.push_str(&pad_cell("TYPE", listing::TYPE_WIDTH));
    output.push_str(&pad_cell("SIZE", listing::SIZE_WIDTH));
    output.push_str("MODIFIED\n");
    output.push_str(&"-".repeat(listing::RULE_WIDTH));
    output.push('\n');

    for node in folders.iter().chain(files.iter()) {
        let name = if node.is_folder() {
            format!("[{}]", node.name)
        } else {
            node.name.clone()
        };
        let size = if node.is_folder() {
            "-".to_string()
        } else {
            format_bytes(node.size)
        };
        output.push_str(&pad_cell(&name, listing::NAME_WIDTH));
        output.push_str(&pad_cell(&node.type_label(), listing::TYPE_WIDTH));
        output.push_str(&pad_cell(&size, listing::SIZE_WIDTH));
        output.push_str(&format_minute(node.modified));
        output.push('\n');
    }

    output
}

/// Render the global trash table: same shape as the flat listing minus
/// the SIZE column, with the trashed-at timestamp instead of MODIFIED.
pub fn render_trash(mut folders: Vec<Node>, mut files: Vec<Node>) -> String {
    if folders.is_empty() && files.is_empty() {
        return "Trash is empty.".to_string();
    }

    sort_by_name(&mut folders);
    sort_by_name(&mut files);

    let total = folders.len() + files.len();
    let mut output = format!("Trash: {} item(s)\n\n", total);
    output.push_str(&pad_cell("NAME", trash_listing::NAME_WIDTH));
    output.push_str(&pad_cell("TYPE", trash_listing::TYPE_WIDTH));
    output.push_str("TRASHED\n");
    output.push_str(&"-".repeat(trash_listing::RULE_WIDTH));
    output.push('\n');

    for node in folders.iter().chain(files.iter()) {
        let name = if node.is_folder() {
            format!("[{}]", node.name)
        } else {
            node.name.clone()
        };
        output.push_str(&pad_cell(&name, trash_listing::NAME_WIDTH));
        output.push_str(&pad_cell(&node.type_label(), trash_listing::TYPE_WIDTH));
        output.push_str(&format_minute(node.modified));
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NodeId, NodeKind, Sharing};

    fn node(name: &str, kind: NodeKind, size: u64) -> Node {
        Node {
            id: NodeId::new(format!("id-{}", name)),
            name: name.to_string(),
            kind,
            content_type: match kind {
                NodeKind::File => Some("text/plain".to_string()),
                NodeKind::Folder => None,
            },
            size,
            created: 0,
            modified: 1_704_067_200,
            owner: "tester".to_string(),
            sharing: Sharing::default(),
            url: String::new(),
        }
    }

    #[test]
    fn test_name_cmp_is_case_aware() {
        assert_eq!(name_cmp("A", "b"), Ordering::Less);
        assert_eq!(name_cmp("a", "A"), Ordering::Greater);
        assert_eq!(name_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_listing_order_folders_then_files() {
        let folders = vec![
            node("b", NodeKind::Folder, 0),
            node("A", NodeKind::Folder, 0),
        ];
        let files = vec![node("z.txt", NodeKind::File, 10)];

        let output = render_listing(folders, files);
        let rows: Vec<&str> = output.lines().skip(4).collect();
        assert!(rows[0].starts_with("[A]"));
        assert!(rows[1].starts_with("[b]"));
        assert!(rows[2].starts_with("z.txt"));
    }

    #[test]
    fn test_listing_header_and_counts() {
        let output = render_listing(
            vec![node("docs", NodeKind::Folder, 0)],
            vec![node("a.txt", NodeKind::File, 1024)],
        );
        assert!(output.starts_with("Total: 2 item(s)\n"));
        assert!(output.contains("NAME"));
        assert!(output.contains("MODIFIED"));
        assert!(output.contains("1.0 KB"));
        // Folder size renders as a dash.
        let folder_row = output.lines().find(|l| l.starts_with("[docs]")).unwrap();
        assert!(folder_row.contains('-'));
    }

    #[test]
    fn test_empty_listing() {
        assert_eq!(render_listing(vec![], vec![]), "Empty directory.");
    }

    #[test]
    fn test_trash_table_has_no_size_column() {
        let output = render_trash(vec![], vec![node("gone.txt", NodeKind::File, 99)]);
        assert!(output.starts_with("Trash: 1 item(s)\n"));
        assert!(output.contains("TRASHED"));
        assert!(!output.contains("SIZE"));
    }

    #[test]
    fn test_empty_trash() {
        assert_eq!(render_trash(vec![], vec![]), "Trash is empty.");
    }
}
