//! File manager model: the current directory, its listing state, and what
//! activating an entry does.

use super::kind::{FileKind, classify};
use super::path::{PathResolver, join_segments};
use super::view::{DirEntry, VirtualFileSystemView};
use super::ListError;
use crate::apps::{AppKind, OpenRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserState {
    Loading,
    Ready(Vec<DirEntry>),
    Failed(String),
}

/// Identifies one listing request. Only the most recently issued ticket
/// may complete; older ones are stale and their results are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ListingTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum BrowserAction {
    /// The browser moved to a new directory and needs a fresh listing.
    Navigated,
    Open(OpenRequest),
    /// Nothing can open the entry; show this description instead.
    Describe(String),
}

#[derive(Debug, Clone)]
pub struct FileBrowser {
    current_path: String,
    state: BrowserState,
    issued: u64,
    /// Highlighted row of a ready listing.
    selected: usize,
}

impl FileBrowser {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            current_path: path.into(),
            state: BrowserState::Loading,
            issued: 0,
            selected: 0,
        }
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn entries(&self) -> &[DirEntry] {
        match &self.state {
            BrowserState::Ready(entries) => entries,
            BrowserState::Loading | BrowserState::Failed(_) => &[],
        }
    }

    pub fn selected_entry(&self) -> Option<&DirEntry> {
        self.entries().get(self.selected)
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index.min(self.entries().len().saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        self.select(self.selected + 1);
    }

    pub fn select_previous(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    pub fn display_path(&self, resolver: &PathResolver) -> String {
        resolver.display(&self.current_path)
    }

    /// Start a listing for the current path.
    pub fn begin_listing(&mut self) -> ListingTicket {
        self.issued += 1;
        self.state = BrowserState::Loading;
        ListingTicket(self.issued)
    }

    /// Deliver a listing result. Returns `false` and leaves state untouched
    /// when `ticket` has been superseded.
    pub fn complete_listing(
        &mut self,
        ticket: ListingTicket,
        result: Result<Vec<DirEntry>, ListError>,
    ) -> bool {
        if ticket.0 != self.issued {
            tracing::debug!(ticket = ticket.0, latest = self.issued, "dropping stale listing");
            return false;
        }
        self.selected = 0;
        self.state = match result {
            Ok(entries) => BrowserState::Ready(entries),
            Err(err) => {
                tracing::warn!(path = %self.current_path, %err, "listing failed");
                BrowserState::Failed(err.to_string())
            }
        };
        true
    }

    /// Fetch and apply the listing for the current path.
    pub async fn refresh(&mut self, fs: &VirtualFileSystemView) {
        let ticket = self.begin_listing();
        let result = fs.list_directory(&self.current_path).await;
        self.complete_listing(ticket, result);
    }

    pub fn navigate(&mut self, path: impl Into<String>) -> ListingTicket {
        self.current_path = path.into();
        self.begin_listing()
    }

    /// Move to the parent directory. Returns `None` when already at `/`.
    pub fn go_up(&mut self, resolver: &PathResolver) -> Option<ListingTicket> {
        let mut segments = resolver.resolve(&self.current_path);
        segments.pop()?;
        Some(self.navigate(join_segments(&segments)))
    }

    pub fn activate(&mut self, entry: &DirEntry) -> BrowserAction {
        match classify(entry) {
            FileKind::Folder => {
                self.navigate(entry.path());
                BrowserAction::Navigated
            }
            FileKind::Launcher(app) => BrowserAction::Open(OpenRequest::launch(app)),
            FileKind::Text => BrowserAction::Open(OpenRequest::document(AppKind::TextEditor, entry)),
            FileKind::Pdf => BrowserAction::Open(OpenRequest::document(AppKind::PdfViewer, entry)),
            FileKind::Image => {
                BrowserAction::Open(OpenRequest::document(AppKind::ImageViewer, entry))
            }
            FileKind::Other => BrowserAction::Describe(format!(
                "File: {}\nType: file\nContent: {}",
                entry.name,
                entry
                    .content
                    .as_deref()
                    .or(entry.url.as_deref())
                    .unwrap_or("No content/URL.")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::fs::{EntryKind, EntrySource, FsError};
    use crate::repository::InMemoryRepository;

    fn entry(name: &str, kind: EntryKind) -> DirEntry {
        DirEntry {
            name: name.to_string(),
            kind,
            parent: "/home/developer".to_string(),
            content: None,
            url: None,
            id: None,
            source: EntrySource::Static,
        }
    }

    #[test]
    fn stale_listing_is_discarded() {
        let mut browser = FileBrowser::new("/a");
        let first = browser.begin_listing();
        browser.navigate("/b");
        let second = browser.begin_listing();

        assert!(browser.complete_listing(second, Ok(vec![entry("fresh", EntryKind::File)])));
        assert!(!browser.complete_listing(first, Ok(vec![entry("stale", EntryKind::File)])));
        match browser.state() {
            BrowserState::Ready(entries) => assert_eq!(entries[0].name, "fresh"),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn failures_become_error_state() {
        let mut browser = FileBrowser::new("/a");
        let ticket = browser.begin_listing();
        browser.complete_listing(ticket, Err(FsError::NotADirectory.into()));
        assert_eq!(
            browser.state(),
            &BrowserState::Failed("Not a directory".to_string())
        );
    }

    #[test]
    fn selection_stays_within_the_listing() {
        let mut browser = FileBrowser::new("/a");
        browser.select_next();
        assert_eq!(browser.selected_entry(), None);

        let ticket = browser.begin_listing();
        browser.complete_listing(
            ticket,
            Ok(vec![entry("one", EntryKind::File), entry("two", EntryKind::File)]),
        );
        browser.select_next();
        browser.select_next();
        assert_eq!(browser.selected_entry().map(|e| e.name.as_str()), Some("two"));
        browser.select_previous();
        browser.select_previous();
        assert_eq!(browser.selected(), 0);
    }

    #[test]
    fn go_up_stops_at_root() {
        let resolver = PathResolver::default();
        let mut browser = FileBrowser::new("/home");
        assert!(browser.go_up(&resolver).is_some());
        assert_eq!(browser.current_path(), "/");
        assert!(browser.go_up(&resolver).is_none());
    }

    #[test]
    fn activating_a_folder_navigates_into_it() {
        let mut browser = FileBrowser::new("/home/developer");
        let action = browser.activate(&entry("portfolio", EntryKind::Folder));
        assert_eq!(action, BrowserAction::Navigated);
        assert_eq!(browser.current_path(), "/home/developer/portfolio");
        assert_eq!(browser.state(), &BrowserState::Loading);
    }

    #[test]
    fn activating_unknown_files_describes_them() {
        let mut browser = FileBrowser::new("/");
        match browser.activate(&entry("blob", EntryKind::File)) {
            BrowserAction::Describe(text) => assert!(text.contains("No content/URL.")),
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[tokio::test]
    async fn refresh_lists_the_current_directory() {
        let fs = VirtualFileSystemView::new(
            PathResolver::default(),
            Arc::new(InMemoryRepository::new()),
        );
        let mut browser = FileBrowser::new("/home/developer/portfolio");
        browser.refresh(&fs).await;
        match browser.state() {
            BrowserState::Ready(entries) => assert_eq!(entries.len(), 2),
            other => panic!("unexpected state {other:?}"),
        }
    }
}
