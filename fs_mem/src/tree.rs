//! Node storage and path resolution

use fs_caps::path::is_valid_name;
use fs_caps::{DirEntry, ErrorCause, FileInfo, FileMode};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::SystemTime;

pub(crate) type NodeId = u64;

pub(crate) const ROOT_ID: NodeId = 0;

/// Symlinks followed during one lookup before giving up
const MAX_LINK_HOPS: usize = 40;

/// Contents of a regular file, shared with every open handle
#[derive(Debug)]
pub(crate) struct FileData {
    pub bytes: Vec<u8>,
    pub modified: SystemTime,
}

pub(crate) type SharedData = Arc<RwLock<FileData>>;

#[derive(Debug)]
pub(crate) enum NodeKind {
    Dir(BTreeMap<String, NodeId>),
    File(SharedData),
    Symlink(String),
}

#[derive(Debug)]
pub(crate) struct Node {
    pub kind: NodeKind,
    /// Permission bits only; the type comes from `kind`
    pub perm: FileMode,
    pub modified: SystemTime,
}

impl Node {
    pub fn dir(perm: FileMode) -> Self {
        Self {
            kind: NodeKind::Dir(BTreeMap::new()),
            perm: FileMode::perm(perm.permissions()),
            modified: SystemTime::now(),
        }
    }

    pub fn file(perm: FileMode) -> Self {
        let now = SystemTime::now();
        Self {
            kind: NodeKind::File(Arc::new(RwLock::new(FileData {
                bytes: Vec::new(),
                modified: now,
            }))),
            perm: FileMode::perm(perm.permissions()),
            modified: now,
        }
    }

    pub fn symlink(target: &str) -> Self {
        Self {
            kind: NodeKind::Symlink(target.to_string()),
            perm: FileMode::PERM,
            modified: SystemTime::now(),
        }
    }

    pub fn mode(&self) -> FileMode {
        match self.kind {
            NodeKind::Dir(_) => FileMode::DIR | self.perm,
            NodeKind::File(_) => self.perm,
            NodeKind::Symlink(_) => FileMode::SYMLINK | self.perm,
        }
    }

    pub fn info(&self, name: &str) -> FileInfo {
        let (size, modified) = match &self.kind {
            NodeKind::Dir(_) => (0, self.modified),
            NodeKind::File(data) => {
                let data = data.read().unwrap_or_else(PoisonError::into_inner);
                (data.bytes.len() as u64, data.modified)
            }
            NodeKind::Symlink(target) => (target.len() as u64, self.modified),
        };
        FileInfo::new(name, size, self.mode()).with_modified(modified)
    }
}

/// Outcome of resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resolved {
    /// Directory holding the final element
    pub parent: NodeId,
    /// Final element name; `None` when the path ended on a directory reached
    /// by `..`, a symlink to `.`, or nothing at all (the root)
    pub leaf: Option<String>,
    /// The node the path names, if it exists
    pub node: Option<NodeId>,
}

#[derive(Debug)]
pub(crate) struct Tree {
    nodes: HashMap<NodeId, Node>,
    next_id: NodeId,
}

impl Tree {
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(ROOT_ID, Node::dir(FileMode::perm(0o755)));
        Self { nodes, next_id: 1 }
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, ErrorCause> {
        self.nodes.get(&id).ok_or(ErrorCause::NotFound)
    }

    fn entries(&self, id: NodeId) -> Result<&BTreeMap<String, NodeId>, ErrorCause> {
        match &self.node(id)?.kind {
            NodeKind::Dir(entries) => Ok(entries),
            _ => Err(ErrorCause::NotADirectory),
        }
    }

    fn entries_mut(&mut self, id: NodeId) -> Result<&mut BTreeMap<String, NodeId>, ErrorCause> {
        match self.nodes.get_mut(&id).map(|node| &mut node.kind) {
            Some(NodeKind::Dir(entries)) => Ok(entries),
            Some(_) => Err(ErrorCause::NotADirectory),
            None => Err(ErrorCause::NotFound),
        }
    }

    /// Resolves `name`, always following symlinks in the middle of the path
    /// and following a final symlink only when `follow_last` is set
    pub fn resolve(&self, name: &str, follow_last: bool) -> Result<Resolved, ErrorCause> {
        let mut stack = vec![ROOT_ID];
        let mut pending = components(name);
        let mut hops = 0;

        while let Some(element) = pending.pop_front() {
            let is_last = pending.is_empty();
            if element == ".." {
                if stack.len() > 1 {
                    stack.pop();
                }
                continue;
            }

            let dir = stack[stack.len() - 1];
            let Some(&id) = self.entries(dir)?.get(&element) else {
                if is_last {
                    return Ok(Resolved {
                        parent: dir,
                        leaf: Some(element),
                        node: None,
                    });
                }
                return Err(ErrorCause::NotFound);
            };

            let node = self.node(id)?;
            match &node.kind {
                NodeKind::Symlink(target) if !is_last || follow_last => {
                    hops += 1;
                    if hops > MAX_LINK_HOPS {
                        return Err(ErrorCause::TooManyLinks);
                    }
                    if target.starts_with('/') {
                        stack.truncate(1);
                    }
                    let mut expanded = components(target);
                    expanded.extend(pending.drain(..));
                    pending = expanded;
                }
                _ if is_last => {
                    return Ok(Resolved {
                        parent: dir,
                        leaf: Some(element),
                        node: Some(id),
                    });
                }
                NodeKind::Dir(_) => stack.push(id),
                _ => return Err(ErrorCause::NotADirectory),
            }
        }

        let node = stack[stack.len() - 1];
        let parent = if stack.len() > 1 {
            stack[stack.len() - 2]
        } else {
            ROOT_ID
        };
        Ok(Resolved {
            parent,
            leaf: None,
            node: Some(node),
        })
    }

    /// Adds `node` as `leaf` inside directory `parent`
    pub fn insert(&mut self, parent: NodeId, leaf: &str, node: Node) -> Result<NodeId, ErrorCause> {
        if !is_valid_name(leaf) {
            return Err(ErrorCause::InvalidPath);
        }
        let id = self.next_id;
        let entries = self.entries_mut(parent)?;
        if entries.contains_key(leaf) {
            return Err(ErrorCause::AlreadyExists);
        }
        entries.insert(leaf.to_string(), id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        self.touch(parent);
        Ok(id)
    }

    /// Unlinks `leaf` from `parent`; directories must be empty
    pub fn remove(&mut self, parent: NodeId, leaf: &str) -> Result<(), ErrorCause> {
        let id = *self.entries(parent)?.get(leaf).ok_or(ErrorCause::NotFound)?;
        if let NodeKind::Dir(entries) = &self.node(id)?.kind {
            if !entries.is_empty() {
                return Err(ErrorCause::DirectoryNotEmpty);
            }
        }
        self.entries_mut(parent)?.remove(leaf);
        self.nodes.remove(&id);
        self.touch(parent);
        Ok(())
    }

    /// Lists a directory node
    pub fn list(&self, id: NodeId) -> Result<Vec<DirEntry>, ErrorCause> {
        let entries = self.entries(id)?;
        entries
            .iter()
            .map(|(name, child)| Ok(DirEntry::new(name.clone(), self.node(*child)?.mode())))
            .collect()
    }

    fn touch(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.modified = SystemTime::now();
        }
    }
}

/// Splits a path into the elements that take part in resolution
fn components(path: &str) -> VecDeque<String> {
    path.split('/')
        .filter(|element| !element.is_empty() && *element != ".")
        .map(str::to_string)
        .collect()
}
