//! Simulated Volumes
//!
//! A volume is the filesystem a device (or partition) exposes once opened
//! with a trailing separator. Nodes live in an arena; node 0 is the volume
//! root. Children keep their insertion order, which is the order
//! `query_directory_file` returns them in.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use crate::status::NtStatus;

/// Index of a node within its volume
pub type NodeId = usize;

/// Root directory of every volume
pub const ROOT_NODE: NodeId = 0;

/// File or directory on a volume
#[derive(Debug, Clone)]
pub struct FileNode {
    pub name: String,
    pub directory: bool,
    pub children: Vec<NodeId>,
}

/// In-memory filesystem
#[derive(Debug, Clone)]
pub struct Volume {
    nodes: Vec<FileNode>,
}

impl Volume {
    /// Empty volume (root directory only)
    pub fn new() -> Self {
        Self {
            nodes: vec![FileNode {
                name: String::new(),
                directory: true,
                children: Vec::new(),
            }],
        }
    }

    /// Build a volume from relative paths. A trailing `\` makes a directory;
    /// missing parent directories are created along the way.
    pub fn from_paths(paths: &[&str]) -> Self {
        let mut volume = Self::new();
        for path in paths {
            volume.insert_path(path);
        }
        volume
    }

    /// Add a file (or, with a trailing `\`, a directory)
    pub fn insert_path(&mut self, path: &str) -> NodeId {
        let (path, directory) = match path.strip_suffix('\\') {
            Some(stripped) => (stripped, true),
            None => (path, false),
        };

        let mut current = ROOT_NODE;
        let mut components = path.split('\\').filter(|c| !c.is_empty()).peekable();
        while let Some(component) = components.next() {
            let last = components.peek().is_none();
            current = match self.lookup(current, component) {
                Some(existing) => existing,
                None => self.push_child(current, component, directory || !last),
            };
        }
        current
    }

    fn push_child(&mut self, parent: NodeId, name: &str, directory: bool) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(FileNode {
            name: String::from(name),
            directory,
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Case-insensitive child lookup
    pub fn lookup(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.nodes
            .get(parent)?
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child].name.eq_ignore_ascii_case(name))
    }

    /// Follow one path component from `parent`
    pub fn step(&self, parent: NodeId, name: &str, last: bool) -> Result<NodeId, NtStatus> {
        let node = self.node(parent).ok_or(NtStatus::INVALID_HANDLE)?;
        if !node.directory {
            return Err(NtStatus::OBJECT_PATH_NOT_FOUND);
        }
        match self.lookup(parent, name) {
            Some(child) => Ok(child),
            None if last => Err(NtStatus::OBJECT_NAME_NOT_FOUND),
            None => Err(NtStatus::OBJECT_PATH_NOT_FOUND),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&FileNode> {
        self.nodes.get(id)
    }

    /// Number of files and directories, root excluded
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paths_creates_parents() {
        let volume = Volume::from_paths(&["TDATA\\fffe0000\\music\\ST.DB", "UDATA\\"]);
        assert_eq!(volume.len(), 5);

        let tdata = volume.lookup(ROOT_NODE, "tdata").unwrap();
        assert!(volume.node(tdata).unwrap().directory);
        let save = volume.step(tdata, "FFFE0000", false).unwrap();
        let music = volume.step(save, "music", false).unwrap();
        let db = volume.step(music, "st.db", true).unwrap();
        assert!(!volume.node(db).unwrap().directory);

        let udata = volume.lookup(ROOT_NODE, "UDATA").unwrap();
        assert!(volume.node(udata).unwrap().directory);
        assert!(volume.node(udata).unwrap().children.is_empty());
    }

    #[test]
    fn test_step_errors() {
        let volume = Volume::from_paths(&["a.txt"]);
        let file = volume.lookup(ROOT_NODE, "a.txt").unwrap();

        assert_eq!(volume.step(ROOT_NODE, "b.txt", true), Err(NtStatus::OBJECT_NAME_NOT_FOUND));
        assert_eq!(volume.step(ROOT_NODE, "dir", false), Err(NtStatus::OBJECT_PATH_NOT_FOUND));
        assert_eq!(volume.step(file, "x", true), Err(NtStatus::OBJECT_PATH_NOT_FOUND));
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let volume = Volume::from_paths(&["b", "a", "c\\"]);
        let names: Vec<&str> = volume.node(ROOT_NODE).unwrap()
            .children
            .iter()
            .map(|&id| volume.node(id).unwrap().name.as_str())
            .collect();
        assert_eq!(names, ["b", "a", "c"]);
    }
}
