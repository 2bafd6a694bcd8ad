//! Merged view of the static tree and the repository's dynamic entries.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::path::{PathResolver, canonicalize, join_segments};
use super::tree::{Mutation, Node, StaticTree};
use super::{EntryKind, FsError, ListError};
use crate::repository::{ContentRepository, RepositoryError, SIMULATED_FILES, SimulatedFile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySource {
    Static,
    Dynamic,
}

/// One row of a merged directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Canonical absolute path of the directory holding this entry.
    pub parent: String,
    pub content: Option<String>,
    pub url: Option<String>,
    /// Repository document id; `None` for static entries.
    pub id: Option<String>,
    pub source: EntrySource,
}

impl DirEntry {
    fn from_static(name: &str, node: &Node, parent: &str) -> Self {
        let (kind, content) = match node {
            Node::Directory(_) => (EntryKind::Folder, None),
            Node::File(content) => (EntryKind::File, Some(content.clone())),
        };
        Self {
            name: name.to_string(),
            kind,
            parent: parent.to_string(),
            content,
            url: None,
            id: None,
            source: EntrySource::Static,
        }
    }

    fn from_dynamic(file: SimulatedFile, parent: &str) -> Self {
        Self {
            name: file.name,
            kind: file.kind,
            parent: parent.to_string(),
            content: file.content,
            url: file.url,
            id: file.id,
            source: EntrySource::Dynamic,
        }
    }

    /// Absolute path of the entry itself.
    pub fn path(&self) -> String {
        if self.parent == "/" {
            format!("/{}", self.name)
        } else {
            format!("{}/{}", self.parent, self.name)
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }
}

/// Unified view over the static tree and the repository's
/// `simulatedFiles` collection. Dynamic entries shadow static entries of
/// the same name in the same directory.
pub struct VirtualFileSystemView {
    resolver: PathResolver,
    tree: StaticTree,
    repository: Arc<dyn ContentRepository>,
}

impl std::fmt::Debug for VirtualFileSystemView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualFileSystemView")
            .field("resolver", &self.resolver)
            .field("tree", &self.tree)
            .finish_non_exhaustive()
    }
}

impl VirtualFileSystemView {
    /// A view whose static tree holds the default system files.
    pub fn new(resolver: PathResolver, repository: Arc<dyn ContentRepository>) -> Self {
        let home = resolver.resolve(resolver.home());
        let tree = StaticTree::with_system_files(&home);
        Self::with_tree(resolver, tree, repository)
    }

    pub fn with_tree(
        resolver: PathResolver,
        tree: StaticTree,
        repository: Arc<dyn ContentRepository>,
    ) -> Self {
        Self {
            resolver,
            tree,
            repository,
        }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn tree(&self) -> &StaticTree {
        &self.tree
    }

    pub fn repository(&self) -> Arc<dyn ContentRepository> {
        Arc::clone(&self.repository)
    }

    /// Static-tree lookup only.
    pub fn get_entry<S: AsRef<str>>(&self, segments: &[S]) -> Result<&Node, FsError> {
        self.tree.get(segments)
    }

    /// Set or remove a static entry. Never touches the repository.
    pub fn mutate<S: AsRef<str>>(
        &mut self,
        segments: &[S],
        mutation: Mutation,
    ) -> Result<(), FsError> {
        self.tree.mutate(segments, mutation)
    }

    async fn dynamic_entries(&self, dir: &str) -> Result<Vec<SimulatedFile>, RepositoryError> {
        let records = self.repository.list(SIMULATED_FILES).await?;
        let mut files = Vec::new();
        for record in records {
            match record.decode::<SimulatedFile>(SIMULATED_FILES) {
                Ok(file) if canonicalize(&self.resolver, &file.path) == dir => files.push(file),
                Ok(_) => {}
                Err(err) => tracing::warn!(id = ?record.id, %err, "skipping malformed file record"),
            }
        }
        Ok(files)
    }

    /// Merged listing of the directory at `path` (absolute or `~`-relative).
    ///
    /// Directories sort before files, then names compare byte-wise. Listing
    /// a static file with no dynamic children is `NotADirectory`; a path
    /// that exists nowhere lists as empty.
    pub async fn list_directory(&self, path: &str) -> Result<Vec<DirEntry>, ListError> {
        let segments = self.resolver.resolve(path);
        let dir = join_segments(&segments);

        let mut merged: BTreeMap<String, DirEntry> = BTreeMap::new();
        for file in self.dynamic_entries(&dir).await? {
            if !merged.contains_key(&file.name) {
                merged.insert(file.name.clone(), DirEntry::from_dynamic(file, &dir));
            }
        }

        match self.tree.lookup(&segments) {
            Ok(id) => match self.tree.node(id) {
                Some(Node::Directory(_)) => {
                    for (name, node) in self.tree.children(id) {
                        merged
                            .entry(name.to_string())
                            .or_insert_with(|| DirEntry::from_static(name, node, &dir));
                    }
                }
                Some(Node::File(_)) if merged.is_empty() => {
                    return Err(FsError::NotADirectory.into());
                }
                _ => {}
            },
            Err(FsError::NotADirectory) if merged.is_empty() => {
                return Err(FsError::NotADirectory.into());
            }
            Err(_) => {}
        }

        let mut entries: Vec<DirEntry> = merged.into_values().collect();
        entries.sort_by(|a, b| a.kind.cmp(&b.kind).then_with(|| a.name.cmp(&b.name)));
        Ok(entries)
    }

    /// Resolve one entry, consulting the repository first so dynamic
    /// entries win. If the repository fails but the static tree has the
    /// entry, the static entry is returned.
    pub async fn lookup<S: AsRef<str>>(&self, segments: &[S]) -> Result<DirEntry, ListError> {
        let Some((name, parents)) = segments.split_last() else {
            return Ok(DirEntry {
                name: "/".to_string(),
                kind: EntryKind::Folder,
                parent: "/".to_string(),
                content: None,
                url: None,
                id: None,
                source: EntrySource::Static,
            });
        };
        let parent = join_segments(parents);
        let name = name.as_ref();

        let dynamic = match self.dynamic_entries(&parent).await {
            Ok(files) => files.into_iter().find(|file| file.name == name),
            Err(err) => match self.tree.get(segments) {
                Ok(node) => {
                    tracing::warn!(%err, "repository unavailable, using static entry");
                    return Ok(DirEntry::from_static(name, node, &parent));
                }
                Err(_) => return Err(err.into()),
            },
        };
        if let Some(file) = dynamic {
            return Ok(DirEntry::from_dynamic(file, &parent));
        }
        let node = self.tree.get(segments)?;
        Ok(DirEntry::from_static(name, node, &parent))
    }
}
