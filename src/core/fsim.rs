//! The filesystem simulator's state machine.
//!
//! [`FsState`] owns the node tree, the block allocator, the inode counter and
//! the bounded operation log.  Operations are applied through the pure
//! [`FsState::apply`]: it returns a fresh state, so a failed operation can
//! never leave a half-applied tree behind.  The single mutation call site is
//! the event handler's `state.fsim = state.fsim.apply(&op)`.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use thiserror::Error;

use super::alloc::{blocks_for, BlockAllocator};
use super::fstree::{FileNode, FsTree, NodeId, NodeKind};

/// Maximum retained operation-log entries, most-recent-first.
pub const LOG_CAP: usize = 15;

// ───────────────────────────────────────── errors ────────────

/// Why an operation failed.  Failures never propagate past the simulator –
/// they become log lines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("{0}: already exists")]
    AlreadyExists(String),
    #[error("not enough free blocks ({needed} needed, {free} free)")]
    OutOfBlocks { needed: usize, free: usize },
    #[error("{0}: not found")]
    NotFound(String),
    #[error("{0}: not a directory")]
    NotADirectory(String),
}

// ───────────────────────────────────────── operations ────────

/// One user-initiated operation against the simulated filesystem.
///
/// `parent` is the component path of the containing directory, relative to
/// the root (empty = root itself).
#[derive(Debug, Clone, PartialEq)]
pub enum FsOp {
    CreateFile {
        parent: Vec<String>,
        name: String,
        size: u64,
    },
    CreateDir {
        parent: Vec<String>,
        name: String,
    },
    WriteFile {
        parent: Vec<String>,
        name: String,
        delta: u64,
    },
    DeleteFile {
        parent: Vec<String>,
        name: String,
    },
    ReadFile {
        parent: Vec<String>,
        name: String,
    },
}

impl FsOp {
    /// Tag shown in the operation log, also used for error lines.
    pub fn verb(&self) -> &'static str {
        match self {
            FsOp::CreateFile { .. } => "CREATE",
            FsOp::CreateDir { .. } => "MKDIR",
            FsOp::WriteFile { .. } => "WRITE",
            FsOp::DeleteFile { .. } => "DELETE",
            FsOp::ReadFile { .. } => "READ",
        }
    }

    fn target(&self) -> String {
        let (parent, name) = match self {
            FsOp::CreateFile { parent, name, .. }
            | FsOp::CreateDir { parent, name }
            | FsOp::WriteFile { parent, name, .. }
            | FsOp::DeleteFile { parent, name }
            | FsOp::ReadFile { parent, name } => (parent, name),
        };
        if parent.is_empty() {
            format!("/{name}")
        } else {
            format!("/{}/{}", parent.join("/"), name)
        }
    }
}

// ───────────────────────────────────────── log ───────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Create,
    Mkdir,
    Write,
    Delete,
    Read,
    Error,
}

/// One line in the bounded operation log.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub at: DateTime<Local>,
    pub kind: LogKind,
    pub message: String,
}

impl LogEntry {
    fn new(kind: LogKind, message: String) -> Self {
        Self {
            at: Local::now(),
            kind,
            message,
        }
    }
}

// ───────────────────────────────────────── state ─────────────

/// Full simulator state.  Cheap to clone — the tree is a handful of nodes.
#[derive(Debug, Clone)]
pub struct FsState {
    pub tree: FsTree,
    pub alloc: BlockAllocator,
    /// Next inode to assign.  Monotonic; never reused while the tree lives.
    pub next_inode: u64,
    /// Operation log, most-recent-first, capped at [`LOG_CAP`].
    pub log: VecDeque<LogEntry>,
    /// Node whose details are currently displayed, if any.
    pub selected: Option<NodeId>,
}

impl FsState {
    /// The fixed initial configuration: two top-level directories, one
    /// top-level file, two nested files, seven blocks pre-allocated.
    pub fn seeded() -> Self {
        let mut tree = FsTree::new(1);
        let root = tree.root;
        let docs = tree.add_child(root, seed_dir("documents", 2));
        let projects = tree.add_child(root, seed_dir("projects", 3));
        tree.add_child(root, seed_file("readme.txt", 4, 2048, vec![0, 1, 2, 3]));
        tree.add_child(docs, seed_file("notes.txt", 5, 1024, vec![4, 5]));
        tree.add_child(projects, seed_file("main.rs", 6, 512, vec![6]));

        let mut alloc = BlockAllocator::new();
        alloc.reserve(&[0, 1, 2, 3, 4, 5, 6]);

        Self {
            tree,
            alloc,
            next_inode: 7,
            log: VecDeque::new(),
            selected: None,
        }
    }

    /// Apply one operation, returning the resulting state.
    ///
    /// On success the returned state carries the mutation plus a success log
    /// entry; on failure it is the receiver unchanged plus an error log
    /// entry.  Partial application is structurally impossible: the failed
    /// attempt's clone is discarded wholesale.
    #[must_use]
    pub fn apply(&self, op: &FsOp) -> FsState {
        let mut next = self.clone();
        match next.try_apply(op) {
            Ok(entry) => {
                next.push_log(entry);
                next
            }
            Err(err) => {
                let mut unchanged = self.clone();
                unchanged.push_log(LogEntry::new(
                    LogKind::Error,
                    format!("{} {} failed: {err}", op.verb(), op.target()),
                ));
                unchanged
            }
        }
    }

    /// Drop everything and return to the seeded configuration.
    pub fn reset() -> FsState {
        Self::seeded()
    }

    fn push_log(&mut self, entry: LogEntry) {
        self.log.push_front(entry);
        self.log.truncate(LOG_CAP);
    }

    // Runs against a throwaway clone; may mutate freely before failing.
    fn try_apply(&mut self, op: &FsOp) -> Result<LogEntry, FsError> {
        match op {
            FsOp::CreateFile { parent, name, size } => self.create_file(parent, name, *size),
            FsOp::CreateDir { parent, name } => self.create_dir(parent, name),
            FsOp::WriteFile {
                parent,
                name,
                delta,
            } => self.write_file(parent, name, *delta),
            FsOp::DeleteFile { parent, name } => self.delete_file(parent, name),
            FsOp::ReadFile { parent, name } => self.read_file(parent, name),
        }
    }

    fn resolve_parent(&self, parent: &[String]) -> Result<NodeId, FsError> {
        self.tree
            .resolve_dir(parent)
            .ok_or_else(|| FsError::NotADirectory(format!("/{}", parent.join("/"))))
    }

    fn create_file(
        &mut self,
        parent: &[String],
        name: &str,
        size: u64,
    ) -> Result<LogEntry, FsError> {
        let dir = self.resolve_parent(parent)?;
        if self.tree.find_child(dir, name).is_some() {
            return Err(FsError::AlreadyExists(name.to_string()));
        }
        let needed = blocks_for(size);
        let blocks = self.alloc.allocate(needed).ok_or(FsError::OutOfBlocks {
            needed,
            free: self.alloc.free_count(),
        })?;
        let inode = self.take_inode();
        let id = self.tree.add_child(
            dir,
            FileNode {
                name: name.to_string(),
                inode,
                permissions: "-rw-r--r--",
                created_at: Local::now(),
                parent: None,
                expanded: false,
                kind: NodeKind::File {
                    size,
                    blocks: blocks.clone(),
                },
            },
        );
        Ok(LogEntry::new(
            LogKind::Create,
            format!(
                "CREATE {} inode={inode} blocks={blocks:?}",
                self.tree.path_of(id)
            ),
        ))
    }

    fn create_dir(&mut self, parent: &[String], name: &str) -> Result<LogEntry, FsError> {
        let dir = self.resolve_parent(parent)?;
        if self.tree.find_child(dir, name).is_some() {
            return Err(FsError::AlreadyExists(name.to_string()));
        }
        let inode = self.take_inode();
        let id = self.tree.add_child(
            dir,
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
            },
        );
        Ok(LogEntry::new(
            LogKind::Mkdir,
            format!("MKDIR {} inode={inode}", self.tree.path_of(id)),
        ))
    }

    fn write_file(
        &mut self,
        parent: &[String],
        name: &str,
        delta: u64,
    ) -> Result<LogEntry, FsError> {
        let dir = self.resolve_parent(parent)?;
        let id = self
            .tree
            .find_child(dir, name)
            .filter(|&id| !self.tree.get(id).is_dir())
            .ok_or_else(|| FsError::NotFound(name.to_string()))?;

        let NodeKind::File {
            size: old_size,
            blocks: old_blocks,
        } = &self.tree.get(id).kind
        else {
            return Err(FsError::NotFound(name.to_string()));
        };
        let new_size = old_size + delta;
        let extra = blocks_for(new_size) - old_blocks.len();
        // Existing blocks are retained; only the shortfall is allocated.
        let mut added = self.alloc.allocate(extra).ok_or(FsError::OutOfBlocks {
            needed: extra,
            free: self.alloc.free_count(),
        })?;

        let path = self.tree.path_of(id);
        let NodeKind::File { size, blocks } = &mut self.tree.get_mut(id).kind else {
            return Err(FsError::NotFound(name.to_string()));
        };
        *size = new_size;
        blocks.append(&mut added);
        Ok(LogEntry::new(
            LogKind::Write,
            format!("WRITE {path} size={new_size} blocks={blocks:?}"),
        ))
    }

    fn delete_file(&mut self, parent: &[String], name: &str) -> Result<LogEntry, FsError> {
        let dir = self.resolve_parent(parent)?;
        let id = self
            .tree
            .find_child(dir, name)
            .filter(|&id| !self.tree.get(id).is_dir())
            .ok_or_else(|| FsError::NotFound(name.to_string()))?;

        let path = self.tree.path_of(id);
        let freed = self.tree.get(id).blocks().to_vec();
        self.alloc.release(&freed);
        self.tree.remove_child(dir, id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(LogEntry::new(
            LogKind::Delete,
            format!("DELETE {path} freed={freed:?}"),
        ))
    }

    fn read_file(&mut self, parent: &[String], name: &str) -> Result<LogEntry, FsError> {
        let dir = self.resolve_parent(parent)?;
        let id = self
            .tree
            .find_child(dir, name)
            .filter(|&id| !self.tree.get(id).is_dir())
            .ok_or_else(|| FsError::NotFound(name.to_string()))?;
        let node = self.tree.get(id);
        Ok(LogEntry::new(
            LogKind::Read,
            format!(
                "READ {} size={} inode={}",
                self.tree.path_of(id),
                node.size().unwrap_or(0),
                node.inode
            ),
        ))
    }

    fn take_inode(&mut self) -> u64 {
        let inode = self.next_inode;
        self.next_inode += 1;
        inode
    }
}

fn seed_dir(name: &str, inode: u64) -> FileNode {
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

fn seed_file(name: &str, inode: u64, size: u64, blocks: Vec<usize>) -> FileNode {
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

// ───────────────────────────────────────── tests ─────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alloc::{BLOCK_SIZE, TOTAL_BLOCKS};
    use std::collections::HashSet;

    fn op_create(name: &str, size: u64) -> FsOp {
        FsOp::CreateFile {
            parent: vec![],
            name: name.to_string(),
            size,
        }
    }

    #[test]
    fn seeded_state_matches_fixed_layout() {
        let fs = FsState::seeded();
        assert_eq!(fs.alloc.used_count(), 7);
        assert_eq!(fs.next_inode, 7);
        assert_eq!(fs.log.len(), 0);

        // Per-file block counts match ceil(size / BLOCK_SIZE), and no block
        // is shared between files.
        let mut seen = HashSet::new();
        for id in fs.tree.live_nodes() {
            let node = fs.tree.get(id);
            if let Some(size) = node.size() {
                assert_eq!(node.blocks().len(), blocks_for(size), "{}", node.name);
                for &b in node.blocks() {
                    assert!(seen.insert(b), "block {b} double-allocated");
                }
            }
        }
        assert_eq!(seen.len(), 7);

        // Inodes are unique.
        let inodes: HashSet<u64> = fs
            .tree
            .live_nodes()
            .iter()
            .map(|&id| fs.tree.get(id).inode)
            .collect();
        assert_eq!(inodes.len(), fs.tree.live_nodes().len());
    }

    #[test]
    fn read_seeded_readme() {
        // End-to-end: the seeded tree serves readme.txt at the root.
        let fs = FsState::seeded().apply(&FsOp::ReadFile {
            parent: vec![],
            name: "readme.txt".to_string(),
        });
        let entry = fs.log.front().unwrap();
        assert_eq!(entry.kind, LogKind::Read);
        assert_eq!(entry.message, "READ /readme.txt size=2048 inode=4");
    }

    #[test]
    fn create_then_delete_round_trips_blocks() {
        let base = FsState::seeded();
        let created = base.apply(&op_create("a.txt", 1024));
        assert_eq!(created.alloc.used_count(), 9);

        let deleted = created.apply(&FsOp::DeleteFile {
            parent: vec![],
            name: "a.txt".to_string(),
        });
        assert_eq!(deleted.alloc, base.alloc);
        assert_eq!(deleted.log.front().unwrap().kind, LogKind::Delete);
    }

    #[test]
    fn duplicate_create_fails_without_mutation() {
        let once = FsState::seeded().apply(&op_create("a.txt", 1024));
        let twice = once.apply(&op_create("a.txt", 1024));

        let entry = twice.log.front().unwrap();
        assert_eq!(entry.kind, LogKind::Error);
        assert!(entry.message.contains("already exists"), "{}", entry.message);
        // Tree and allocator are untouched by the failed attempt.
        assert_eq!(twice.alloc, once.alloc);
        assert_eq!(
            twice.tree.live_nodes().len(),
            once.tree.live_nodes().len()
        );
        assert_eq!(twice.next_inode, once.next_inode);
    }

    #[test]
    fn create_fails_when_disk_is_full() {
        // Fill the disk, leaving one free block.
        let free = FsState::seeded().alloc.free_count();
        let fs = FsState::seeded().apply(&op_create(
            "big.bin",
            (free as u64 - 1) * BLOCK_SIZE,
        ));
        assert_eq!(fs.alloc.free_count(), 1);

        let failed = fs.apply(&op_create("more.bin", 2 * BLOCK_SIZE));
        let entry = failed.log.front().unwrap();
        assert_eq!(entry.kind, LogKind::Error);
        assert!(
            entry.message.contains("not enough free blocks"),
            "{}",
            entry.message
        );
        assert_eq!(failed.alloc, fs.alloc);
    }

    #[test]
    fn write_allocates_exactly_the_boundary_shortfall() {
        let fs = FsState::seeded().apply(&op_create("a.txt", 1000));
        let before: HashSet<usize> = (0..TOTAL_BLOCKS)
            .filter(|&b| fs.alloc.is_used(b))
            .collect();
        let old_blocks = blocks_for(1000);

        // 1000 + 100 = 1100 crosses the 1024 boundary: exactly one new block.
        let written = fs.apply(&FsOp::WriteFile {
            parent: vec![],
            name: "a.txt".to_string(),
            delta: 100,
        });
        let id = written.tree.find_child(written.tree.root, "a.txt").unwrap();
        let node = written.tree.get(id);
        assert_eq!(node.size(), Some(1100));
        assert_eq!(node.blocks().len(), blocks_for(1100));
        assert_eq!(blocks_for(1100) - old_blocks, 1);
        // The added block was previously free; existing blocks are retained.
        let added: Vec<usize> = node
            .blocks()
            .iter()
            .copied()
            .filter(|b| !before.contains(b))
            .collect();
        assert_eq!(added.len(), 1);
        assert_eq!(node.blocks()[..old_blocks].len(), old_blocks);
    }

    #[test]
    fn write_within_block_allocates_nothing() {
        let fs = FsState::seeded().apply(&op_create("a.txt", 100));
        let used = fs.alloc.used_count();
        let written = fs.apply(&FsOp::WriteFile {
            parent: vec![],
            name: "a.txt".to_string(),
            delta: 100,
        });
        assert_eq!(written.alloc.used_count(), used);
        let id = written.tree.find_child(written.tree.root, "a.txt").unwrap();
        assert_eq!(written.tree.get(id).size(), Some(200));
    }

    #[test]
    fn delete_missing_file_logs_not_found() {
        let fs = FsState::seeded().apply(&FsOp::DeleteFile {
            parent: vec![],
            name: "ghost.txt".to_string(),
        });
        let entry = fs.log.front().unwrap();
        assert_eq!(entry.kind, LogKind::Error);
        assert!(entry.message.contains("not found"), "{}", entry.message);
    }

    #[test]
    fn delete_clears_selection_of_deleted_node() {
        let mut fs = FsState::seeded().apply(&op_create("a.txt", 512));
        let id = fs.tree.find_child(fs.tree.root, "a.txt").unwrap();
        fs.selected = Some(id);
        let fs = fs.apply(&FsOp::DeleteFile {
            parent: vec![],
            name: "a.txt".to_string(),
        });
        assert_eq!(fs.selected, None);
    }

    #[test]
    fn operations_resolve_nested_parents() {
        let fs = FsState::seeded().apply(&FsOp::CreateFile {
            parent: vec!["documents".to_string()],
            name: "b.txt".to_string(),
            size: 512,
        });
        assert_eq!(
            fs.log.front().unwrap().message,
            "CREATE /documents/b.txt inode=7 blocks=[7]"
        );
        // Bad parent path is a logged failure, not a panic.
        let bad = fs.apply(&FsOp::CreateFile {
            parent: vec!["readme.txt".to_string()],
            name: "c.txt".to_string(),
            size: 512,
        });
        assert_eq!(bad.log.front().unwrap().kind, LogKind::Error);
    }

    #[test]
    fn log_is_bounded_most_recent_first() {
        let mut fs = FsState::seeded();
        for i in 0..LOG_CAP + 5 {
            fs = fs.apply(&FsOp::ReadFile {
                parent: vec![],
                name: if i % 2 == 0 {
                    "readme.txt".to_string()
                } else {
                    "ghost.txt".to_string()
                },
            });
        }
        assert_eq!(fs.log.len(), LOG_CAP);
        // Index 0 is the newest entry (the last read, i = LOG_CAP + 4, odd → error).
        assert_eq!(fs.log.front().unwrap().kind, LogKind::Error);
    }

    #[test]
    fn reset_restores_seeded_configuration() {
        let fs = FsState::seeded()
            .apply(&op_create("a.txt", 4096))
            .apply(&FsOp::CreateDir {
                parent: vec![],
                name: "tmp".to_string(),
            });
        assert!(fs.alloc.used_count() > 7);
        let fresh = FsState::reset();
        assert_eq!(fresh.alloc.used_count(), 7);
        assert_eq!(fresh.next_inode, 7);
        assert!(fresh.log.is_empty());
        assert!(fresh.tree.find_child(fresh.tree.root, "a.txt").is_none());
    }
}
