//! The compiled-in, session-local directory tree.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. A directory maps
//! child names to ids, so mutating one entry never copies its siblings.
//! Freed slots are recycled.

use std::collections::BTreeMap;

use indoc::indoc;

use super::FsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Directory(BTreeMap<String, NodeId>),
    File(String),
}

impl Node {
    pub fn is_directory(&self) -> bool {
        matches!(self, Node::Directory(_))
    }
}

/// Value written by [`StaticTree::mutate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticEntry {
    Directory,
    File(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Set(StaticEntry),
    Remove,
}

#[derive(Debug, Clone)]
pub struct StaticTree {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    root: NodeId,
}

impl Default for StaticTree {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticTree {
    /// A tree holding only an empty root directory.
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::Directory(BTreeMap::new()))],
            free: Vec::new(),
            root: NodeId(0),
        }
    }

    /// The system files every session starts with.
    pub fn with_system_files(home: &[String]) -> Self {
        let mut tree = Self::new();
        let mut portfolio = home.to_vec();
        portfolio.push("portfolio".to_string());
        let files = [
            (".bashrc", BASHRC),
            ("package.json", PACKAGE_JSON),
        ];
        for (name, content) in files {
            let mut path = portfolio.clone();
            path.push(name.to_string());
            // Intermediate directories are created on the way down.
            let seeded = tree.mutate(&path, Mutation::Set(StaticEntry::File(content.to_string())));
            if let Err(err) = seeded {
                tracing::warn!(file = name, %err, "failed to seed system file");
            }
            debug_assert!(seeded.is_ok(), "seeding {name} failed");
        }
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Walk `segments` from the root.
    ///
    /// Indexing into a file yields `NotADirectory`; a missing name yields
    /// `NotFound`. The two are kept apart because the shell reports them
    /// differently.
    pub fn lookup<S: AsRef<str>>(&self, segments: &[S]) -> Result<NodeId, FsError> {
        let mut current = self.root;
        for segment in segments {
            match self.node(current) {
                Some(Node::Directory(children)) => {
                    current = *children.get(segment.as_ref()).ok_or(FsError::NotFound)?;
                }
                Some(Node::File(_)) => return Err(FsError::NotADirectory),
                None => return Err(FsError::NotFound),
            }
        }
        Ok(current)
    }

    pub fn get<S: AsRef<str>>(&self, segments: &[S]) -> Result<&Node, FsError> {
        let id = self.lookup(segments)?;
        self.node(id).ok_or(FsError::NotFound)
    }

    /// Children of the directory at `id`, in name order.
    pub fn children(&self, id: NodeId) -> Vec<(&str, &Node)> {
        match self.node(id) {
            Some(Node::Directory(children)) => children
                .iter()
                .filter_map(|(name, child)| self.node(*child).map(|node| (name.as_str(), node)))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Set or delete the entry at `segments`.
    ///
    /// Missing intermediate directories are created empty. An intermediate
    /// segment naming a file is never replaced by a directory; that fails
    /// with `NotADirectory`. Removing a name that does not exist is a no-op
    /// and creates nothing.
    pub fn mutate<S: AsRef<str>>(
        &mut self,
        segments: &[S],
        mutation: Mutation,
    ) -> Result<(), FsError> {
        let Some((last, parents)) = segments.split_last() else {
            return Err(FsError::RootImmutable);
        };
        let mut current = self.root;
        for segment in parents {
            let segment = segment.as_ref();
            let existing = match self.node(current) {
                Some(Node::Directory(children)) => children.get(segment).copied(),
                _ => return Err(FsError::NotADirectory),
            };
            current = match existing {
                Some(child) => {
                    if !self.node(child).is_some_and(Node::is_directory) {
                        return Err(FsError::NotADirectory);
                    }
                    child
                }
                None if mutation == Mutation::Remove => return Ok(()),
                None => {
                    let child = self.alloc(Node::Directory(BTreeMap::new()));
                    self.insert_child(current, segment, child);
                    child
                }
            };
        }

        let name = last.as_ref();
        match mutation {
            Mutation::Set(entry) => {
                let node = match entry {
                    StaticEntry::Directory => Node::Directory(BTreeMap::new()),
                    StaticEntry::File(content) => Node::File(content),
                };
                let child = self.alloc(node);
                if let Some(previous) = self.insert_child(current, name, child) {
                    self.release(previous);
                }
                tracing::debug!(path = ?segments.iter().map(AsRef::as_ref).collect::<Vec<_>>(), "static entry set");
            }
            Mutation::Remove => {
                let removed = match self.node_mut(current) {
                    Some(Node::Directory(children)) => children.remove(name),
                    _ => None,
                };
                if let Some(removed) = removed {
                    self.release(removed);
                    tracing::debug!(path = ?segments.iter().map(AsRef::as_ref).collect::<Vec<_>>(), "static entry removed");
                }
            }
        }
        Ok(())
    }

    fn insert_child(&mut self, parent: NodeId, name: &str, child: NodeId) -> Option<NodeId> {
        match self.node_mut(parent) {
            Some(Node::Directory(children)) => children.insert(name.to_string(), child),
            _ => None,
        }
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(slot) = self.free.pop() {
            self.nodes[slot] = Some(node);
            NodeId(slot)
        } else {
            self.nodes.push(Some(node));
            NodeId(self.nodes.len() - 1)
        }
    }

    fn release(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(Node::Directory(children)) = self.nodes.get_mut(next.0).and_then(Option::take)
            {
                pending.extend(children.into_values());
            }
            self.free.push(next.0);
        }
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }
}

const BASHRC: &str = indoc! {r"
    # ~/.bashrc
    export PS1='\u@ubuntu:\w$ '
    alias ll='ls -la'
    alias la='ls -A'
    alias l='ls -CF'"};

const PACKAGE_JSON: &str = indoc! {r#"
    {
      "name": "ubuntu-portfolio",
      "version": "1.0.0",
      "description": "Interactive Ubuntu desktop portfolio",
      "main": "index.js",
      "scripts": {
        "dev": "next dev",
        "build": "next build",
        "start": "next start"
      },
      "dependencies": {
        "react": "^18.0.0",
        "next": "^14.0.0",
        "tailwindcss": "^3.0.0"
      }
    }"#};
