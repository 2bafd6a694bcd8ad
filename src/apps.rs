//! Application kinds and the content handle each window carries.

use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_X, DEFAULT_WINDOW_Y};
use crate::fs::{DirEntry, FileBrowser};
use crate::shell::TerminalSession;
use crate::window::{Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AppKind {
    Browser,
    Files,
    Terminal,
    Photos,
    Settings,
    Contact,
    About,
    Skills,
    Projects,
    LinkedIn,
    Resume,
    TextEditor,
    PdfViewer,
    ImageViewer,
}

impl AppKind {
    /// Applications pinned to the dock, in dock order.
    pub const DOCK: [AppKind; 11] = [
        AppKind::Browser,
        AppKind::Files,
        AppKind::Terminal,
        AppKind::Photos,
        AppKind::Settings,
        AppKind::Contact,
        AppKind::About,
        AppKind::Skills,
        AppKind::Projects,
        AppKind::LinkedIn,
        AppKind::Resume,
    ];

    /// Short label shown under dock and desktop icons.
    pub fn name(self) -> &'static str {
        match self {
            AppKind::Browser => "Firefox",
            AppKind::Files => "Files",
            AppKind::Terminal => "Terminal",
            AppKind::Photos => "Photos",
            AppKind::Settings => "Settings",
            AppKind::Contact => "Contact",
            AppKind::About => "About Me",
            AppKind::Skills => "Skills",
            AppKind::Projects => "Projects",
            AppKind::LinkedIn => "LinkedIn",
            AppKind::Resume => "Resume",
            AppKind::TextEditor => "Text Editor",
            AppKind::PdfViewer => "Document Viewer",
            AppKind::ImageViewer => "Image Viewer",
        }
    }

    /// Window title for a freshly launched instance.
    pub fn title(self) -> &'static str {
        match self {
            AppKind::Browser => "Firefox Web Browser",
            AppKind::Files => "File Manager - Documents",
            AppKind::Terminal => "Terminal",
            AppKind::Photos => "Photos - Wallpaper Settings",
            AppKind::Settings => "Settings",
            AppKind::Contact => "Contact Information",
            AppKind::About => "About Me - Personal Information",
            AppKind::Skills => "Skills & Technologies",
            AppKind::Projects => "My Projects",
            AppKind::LinkedIn => "LinkedIn",
            AppKind::Resume => "My Resume",
            AppKind::TextEditor => "Text Editor",
            AppKind::PdfViewer => "Document Viewer",
            AppKind::ImageViewer => "Image Viewer",
        }
    }

    /// Size used when the app is launched from a launcher file.
    pub fn launch_size(self) -> Size {
        match self {
            AppKind::Terminal => Size::new(800.0, 500.0),
            AppKind::Browser => Size::new(1200.0, 800.0),
            AppKind::Settings | AppKind::TextEditor => Size::new(700.0, 500.0),
            _ => Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
        }
    }

    /// Where document viewers open; launchers use the default origin.
    fn document_origin(self) -> Point {
        match self {
            AppKind::TextEditor => Point::new(150.0, 150.0),
            AppKind::PdfViewer => Point::new(200.0, 200.0),
            AppKind::ImageViewer => Point::new(250.0, 250.0),
            _ => Point::new(DEFAULT_WINDOW_X, DEFAULT_WINDOW_Y),
        }
    }
}

/// A file handed to a viewer window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub content: Option<String>,
    pub url: Option<String>,
}

impl Document {
    /// Lines to show in a viewer: inline text, else the resource link.
    pub fn lines(&self) -> Vec<String> {
        match (&self.content, &self.url) {
            (Some(content), _) => content.split('\n').map(str::to_string).collect(),
            (None, Some(url)) => vec![url.clone()],
            (None, None) => Vec::new(),
        }
    }
}

/// Everything needed to open one window.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenRequest {
    pub app: AppKind,
    pub title: String,
    pub position: Point,
    pub size: Size,
    pub document: Option<Document>,
}

impl OpenRequest {
    pub fn new(app: AppKind, position: Point, size: Size) -> Self {
        Self {
            app,
            title: app.title().to_string(),
            position,
            size,
            document: None,
        }
    }

    /// Launch `app` the way a launcher file does.
    pub fn launch(app: AppKind) -> Self {
        Self::new(
            app,
            Point::new(DEFAULT_WINDOW_X, DEFAULT_WINDOW_Y),
            app.launch_size(),
        )
    }

    /// Open `entry` in the viewer `app`. The window is titled by file name.
    pub fn document(app: AppKind, entry: &DirEntry) -> Self {
        Self {
            app,
            title: entry.name.clone(),
            position: app.document_origin(),
            size: app.launch_size(),
            document: Some(Document {
                name: entry.name.clone(),
                content: entry.content.clone(),
                url: entry.url.clone(),
            }),
        }
    }
}

/// The renderable handle stored in each window record.
#[derive(Debug)]
pub enum AppContent {
    Terminal(Box<TerminalSession>),
    Files(FileBrowser),
    Viewer { app: AppKind, document: Document },
    /// A content page, rendered once when the window opens.
    Page { app: AppKind, lines: Vec<String> },
}

impl AppContent {
    pub fn app(&self) -> AppKind {
        match self {
            AppContent::Terminal(_) => AppKind::Terminal,
            AppContent::Files(_) => AppKind::Files,
            AppContent::Viewer { app, .. } => *app,
            AppContent::Page { app, .. } => *app,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{EntryKind, EntrySource};

    #[test]
    fn launcher_geometry_follows_app() {
        let terminal = OpenRequest::launch(AppKind::Terminal);
        assert_eq!(terminal.title, "Terminal");
        assert_eq!(terminal.size, Size::new(800.0, 500.0));
        assert_eq!(terminal.position, Point::new(100.0, 100.0));
        assert_eq!(
            OpenRequest::launch(AppKind::Photos).size,
            Size::new(800.0, 600.0)
        );
    }

    #[test]
    fn documents_are_titled_by_file_name() {
        let entry = DirEntry {
            name: "resume.pdf".into(),
            kind: EntryKind::File,
            parent: "/home/developer".into(),
            content: None,
            url: Some("https://example.com/resume.pdf".into()),
            id: Some("doc-1".into()),
            source: EntrySource::Dynamic,
        };
        let request = OpenRequest::document(AppKind::PdfViewer, &entry);
        assert_eq!(request.title, "resume.pdf");
        assert_eq!(request.position, Point::new(200.0, 200.0));
        let document = request.document.unwrap();
        assert_eq!(document.lines(), vec!["https://example.com/resume.pdf"]);
    }

    #[test]
    fn dock_apps_have_distinct_titles() {
        let mut titles: Vec<_> = AppKind::DOCK.iter().map(|app| app.title()).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), AppKind::DOCK.len());
    }
}
