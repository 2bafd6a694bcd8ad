//! Decides which application opens a directory entry.

use super::DirEntry;
use crate::apps::AppKind;

const TEXT_EXTENSIONS: &[&str] = &[
    ".txt", ".md", ".bashrc", ".json", ".info", ".log", ".conf", ".yaml", ".yml", ".xml", ".html",
    ".css", ".js", ".ts", ".jsx", ".tsx", ".py", ".java", ".c", ".cpp", ".h", ".sh",
];

const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Folder,
    /// A launcher file named after an application, e.g. `Terminal`.
    Launcher(AppKind),
    /// Text with inline content.
    Text,
    /// A PDF backed by a URL.
    Pdf,
    /// An image backed by a URL.
    Image,
    Other,
}

/// Classify `entry` once; the result picks the window to open.
///
/// Launcher names take priority, matched on the full name or on the part
/// before the first dot. Text needs inline content, PDFs and images need a
/// URL; anything lacking what its viewer needs is `Other`.
pub fn classify(entry: &DirEntry) -> FileKind {
    if entry.is_folder() {
        return FileKind::Folder;
    }
    let stem = entry.name.split('.').next().unwrap_or_default();
    if let Some(app) = launcher_for(&entry.name).or_else(|| launcher_for(stem)) {
        return FileKind::Launcher(app);
    }
    if entry.content.is_some() && TEXT_EXTENSIONS.iter().any(|ext| entry.name.ends_with(ext)) {
        return FileKind::Text;
    }
    let Some(url) = entry.url.as_deref() else {
        return FileKind::Other;
    };
    if entry.name.ends_with(".pdf") {
        FileKind::Pdf
    } else if IMAGE_EXTENSIONS.iter().any(|ext| url.ends_with(ext)) {
        FileKind::Image
    } else {
        FileKind::Other
    }
}

fn launcher_for(name: &str) -> Option<AppKind> {
    match name {
        "Terminal" => Some(AppKind::Terminal),
        "Firefox" => Some(AppKind::Browser),
        "Photos" => Some(AppKind::Photos),
        "Settings" => Some(AppKind::Settings),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{EntryKind, EntrySource};

    fn file(name: &str, content: Option<&str>, url: Option<&str>) -> DirEntry {
        DirEntry {
            name: name.to_string(),
            kind: EntryKind::File,
            parent: "/".to_string(),
            content: content.map(str::to_string),
            url: url.map(str::to_string),
            id: None,
            source: EntrySource::Dynamic,
        }
    }

    #[test]
    fn launchers_match_name_or_stem() {
        assert_eq!(
            classify(&file("Terminal", None, None)),
            FileKind::Launcher(AppKind::Terminal)
        );
        assert_eq!(
            classify(&file("Firefox.desktop", None, None)),
            FileKind::Launcher(AppKind::Browser)
        );
    }

    #[test]
    fn text_requires_inline_content() {
        assert_eq!(classify(&file("a.md", Some("# hi"), None)), FileKind::Text);
        assert_eq!(classify(&file("a.md", None, None)), FileKind::Other);
        assert_eq!(classify(&file(".bashrc", Some(""), None)), FileKind::Text);
    }

    #[test]
    fn pdf_and_image_require_urls() {
        assert_eq!(
            classify(&file("resume.pdf", None, Some("https://x/r.pdf"))),
            FileKind::Pdf
        );
        assert_eq!(classify(&file("resume.pdf", None, None)), FileKind::Other);
        assert_eq!(
            classify(&file("cat", None, Some("https://x/cat.jpeg"))),
            FileKind::Image
        );
        assert_eq!(
            classify(&file("blob", None, Some("https://x/blob.bin"))),
            FileKind::Other
        );
    }

    #[test]
    fn folders_classify_as_folders() {
        let mut entry = file("Terminal", None, None);
        entry.kind = EntryKind::Folder;
        assert_eq!(classify(&entry), FileKind::Folder);
    }
}
