//! In-memory tree of simulated files and directories.
//!
//! The [`FileNode`] is the fundamental unit – it holds the synthetic inode
//! metadata for a single entry and links to its children via indices into an
//! arena (the [`FsTree`] struct).  Using an arena avoids recursive `Box`
//! allocations and makes borrowing trivial.  Slots are never reused: a
//! deleted node is simply unlinked from its parent and becomes unreachable
//! from the root, so inode numbers and `NodeId`s stay unique while the tree
//! is live.  Reset rebuilds the whole arena.

use chrono::{DateTime, Local};

/// Index into [`FsTree::nodes`].
pub type NodeId = usize;

/// What a node is, plus the per-kind payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    File {
        /// Size in bytes.
        size: u64,
        /// Ordered block indices backing this file.
        blocks: Vec<usize>,
    },
    Directory {
        /// Ordered child node ids.
        children: Vec<NodeId>,
    },
}

/// A single simulated filesystem entry.
#[derive(Debug, Clone)]
pub struct FileNode {
    /// Entry name, unique among siblings.
    pub name: String,
    /// Synthetic inode number, monotonically assigned, never reused.
    pub inode: u64,
    /// Display permission string (`drwxr-xr-x` style).
    pub permissions: &'static str,
    pub created_at: DateTime<Local>,
    pub parent: Option<NodeId>,
    /// Whether this node is expanded in the UI (only meaningful for dirs).
    pub expanded: bool,
    pub kind: NodeKind,
}

impl FileNode {
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// File size, or `None` for directories.
    pub fn size(&self) -> Option<u64> {
        match &self.kind {
            NodeKind::File { size, .. } => Some(*size),
            NodeKind::Directory { .. } => None,
        }
    }

    /// Block list for files, empty slice for directories.
    pub fn blocks(&self) -> &[usize] {
        match &self.kind {
            NodeKind::File { blocks, .. } => blocks,
            NodeKind::Directory { .. } => &[],
        }
    }
}

// ───────────────────────────────────────── arena tree ────────

/// Arena-backed simulated filesystem tree, rooted at `/`.
#[derive(Debug, Clone)]
pub struct FsTree {
    pub nodes: Vec<FileNode>,
    pub root: NodeId,
}

impl FsTree {
    /// Create a tree holding only the root directory with the given inode.
    pub fn new(root_inode: u64) -> Self {
        let root = FileNode {
            name: "/".to_string(),
            inode: root_inode,
            permissions: "drwxr-xr-x",
            created_at: Local::now(),
            parent: None,
            expanded: true,
            kind: NodeKind::Directory {
                children: Vec::new(),
            },
        };
        Self {
            nodes: vec![root],
            root: 0,
        }
    }

    pub fn get(&self, id: NodeId) -> &FileNode {
        &self.nodes[id]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut FileNode {
        &mut self.nodes[id]
    }

    /// Append `node` under `parent_id` and return its [`NodeId`].
    /// The caller guarantees `parent_id` is a directory.
    pub fn add_child(&mut self, parent_id: NodeId, mut node: FileNode) -> NodeId {
        let id = self.nodes.len();
        node.parent = Some(parent_id);
        self.nodes.push(node);
        if let NodeKind::Directory { children } = &mut self.nodes[parent_id].kind {
            children.push(id);
        }
        id
    }

    /// Unlink `id` from its parent's child list.  The arena slot remains but
    /// is unreachable from the root.
    pub fn remove_child(&mut self, parent_id: NodeId, id: NodeId) {
        if let NodeKind::Directory { children } = &mut self.nodes[parent_id].kind {
            children.retain(|&c| c != id);
        }
    }

    /// Child of `dir` named `name`, if any.
    pub fn find_child(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        match &self.nodes[dir].kind {
            NodeKind::Directory { children } => children
                .iter()
                .copied()
                .find(|&c| self.nodes[c].name == name),
            NodeKind::File { .. } => None,
        }
    }

    /// Walk `path` component names from the root, following directories only.
    /// An empty path resolves to the root.
    pub fn resolve_dir(&self, path: &[String]) -> Option<NodeId> {
        let mut cur = self.root;
        for component in path {
            let next = self.find_child(cur, component)?;
            if !self.nodes[next].is_dir() {
                return None;
            }
            cur = next;
        }
        Some(cur)
    }

    /// Absolute display path of a node, e.g. `/documents/notes.txt`.
    pub fn path_of(&self, id: NodeId) -> String {
        if id == self.root {
            return "/".to_string();
        }
        let mut parts = Vec::new();
        let mut cur = Some(id);
        while let Some(n) = cur {
            if n == self.root {
                break;
            }
            parts.push(self.nodes[n].name.clone());
            cur = self.nodes[n].parent;
        }
        parts.reverse();
        format!("/{}", parts.join("/"))
    }

    /// Toggle the expanded state of a node (only if it is a directory).
    pub fn toggle_expand(&mut self, id: NodeId) {
        if self.nodes[id].is_dir() {
            self.nodes[id].expanded = !self.nodes[id].expanded;
        }
    }

    /// Node ids reachable from the root through expanded directories, in
    /// display order.  This is the flattened list the UI renders.
    pub fn visible_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_visible(self.root, &mut out);
        out
    }

    fn collect_visible(&self, id: NodeId, out: &mut Vec<NodeId>) {
        out.push(id);
        let node = &self.nodes[id];
        if node.expanded {
            if let NodeKind::Directory { children } = &node.kind {
                for &child in children {
                    self.collect_visible(child, out);
                }
            }
        }
    }

    /// Depth of a node below the root (root = 0).
    pub fn depth_of(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cur = self.nodes[id].parent;
        while let Some(p) = cur {
            depth += 1;
            cur = self.nodes[p].parent;
        }
        depth
    }

    /// All node ids reachable from the root (live nodes, any expansion).
    pub fn live_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let NodeKind::Directory { children } = &self.nodes[id].kind {
                stack.extend(children.iter().copied());
            }
        }
        out
    }
}

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, inode: u64, size: u64, blocks: Vec<usize>) -> FileNode {
        FileNode {
            name: name.to_string(),
            inode,
            permissions: "-rw-r--r--",
            created_at: Local::now(),
            parent: None,
            expanded: false,
            kind: NodeKind::File { size, blocks },
        }
    }

    fn dir(name: &str, inode: u64) -> FileNode {
        FileNode {
            name: name.to_string(),
            inode,
            permissions: "drwxr-xr-x",
            created_at: Local::now(),
            parent: None,
            expanded: true,
            kind: NodeKind::Directory {
                children: Vec::new(),
            },
        }
    }

    #[test]
    fn resolve_walks_directories() {
        let mut t = FsTree::new(1);
        let docs = t.add_child(t.root, dir("docs", 2));
        let sub = t.add_child(docs, dir("sub", 3));
        t.add_child(sub, file("a.txt", 4, 100, vec![0]));

        assert_eq!(t.resolve_dir(&[]), Some(t.root));
        assert_eq!(
            t.resolve_dir(&["docs".into(), "sub".into()]),
            Some(sub)
        );
        // Files are not directories.
        assert_eq!(
            t.resolve_dir(&["docs".into(), "sub".into(), "a.txt".into()]),
            None
        );
        assert_eq!(t.resolve_dir(&["nope".into()]), None);
    }

    #[test]
    fn remove_unlinks_but_keeps_slot() {
        let mut t = FsTree::new(1);
        let f = t.add_child(t.root, file("a.txt", 2, 100, vec![0]));
        let slots = t.nodes.len();
        t.remove_child(t.root, f);
        assert_eq!(t.find_child(t.root, "a.txt"), None);
        assert_eq!(t.nodes.len(), slots);
        assert!(!t.visible_nodes().contains(&f));
    }

    #[test]
    fn path_of_joins_components() {
        let mut t = FsTree::new(1);
        let docs = t.add_child(t.root, dir("docs", 2));
        let f = t.add_child(docs, file("a.txt", 3, 100, vec![0]));
        assert_eq!(t.path_of(t.root), "/");
        assert_eq!(t.path_of(docs), "/docs");
        assert_eq!(t.path_of(f), "/docs/a.txt");
    }

    #[test]
    fn visibility_follows_expansion() {
        let mut t = FsTree::new(1);
        let docs = t.add_child(t.root, dir("docs", 2));
        let f = t.add_child(docs, file("a.txt", 3, 100, vec![0]));
        assert!(t.visible_nodes().contains(&f));
        t.toggle_expand(docs);
        assert!(!t.visible_nodes().contains(&f));
        assert!(t.visible_nodes().contains(&docs));
    }
}
