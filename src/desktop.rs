//! The desktop: one window manager, one shared file system and the content
//! repository behind it, plus the launchers that open windows.

use std::sync::Arc;

use crate::apps::{AppContent, AppKind, OpenRequest};
use crate::config::DesktopConfig;
use crate::constants::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_X, DEFAULT_WINDOW_Y,
};
use crate::dock::{DockAction, DockItem, dock_items};
use crate::fs::{BrowserAction, FileBrowser, PathResolver, VirtualFileSystemView};
use crate::repository::ContentRepository;
use crate::shell::{CommandInterpreter, SessionKey, TerminalSession};
use crate::window::{
    FrameInteraction, FrameMetrics, Point, PointerDown, Screen, Size, WindowEvent, WindowId,
    WindowManager, WindowSpec,
};

/// A shortcut on the desktop background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesktopIcon {
    pub label: &'static str,
    pub app: AppKind,
    pub position: Point,
    pub size: Size,
}

const fn icon(label: &'static str, app: AppKind, x: f64, y: f64, w: f64, h: f64) -> DesktopIcon {
    DesktopIcon {
        label,
        app,
        position: Point::new(x, y),
        size: Size::new(w, h),
    }
}

pub const DESKTOP_ICONS: [DesktopIcon; 11] = [
    icon("About Me", AppKind::About, 100.0, 100.0, 800.0, 600.0),
    icon("Skills & Tech", AppKind::Skills, 150.0, 150.0, 900.0, 700.0),
    icon("Projects", AppKind::Projects, 200.0, 200.0, 1000.0, 800.0),
    icon("Terminal", AppKind::Terminal, 250.0, 250.0, 800.0, 500.0),
    icon("Firefox", AppKind::Browser, 100.0, 50.0, 1200.0, 800.0),
    icon("Photos", AppKind::Photos, 300.0, 200.0, 800.0, 600.0),
    icon("Settings", AppKind::Settings, 350.0, 250.0, 700.0, 500.0),
    icon("Contact", AppKind::Contact, 400.0, 300.0, 600.0, 500.0),
    icon("Files", AppKind::Files, 450.0, 350.0, 800.0, 600.0),
    icon("LinkedIn Profile", AppKind::LinkedIn, 100.0, 100.0, 900.0, 700.0),
    icon("Resume", AppKind::Resume, 550.0, 450.0, 800.0, 700.0),
];

pub struct Desktop {
    config: DesktopConfig,
    windows: WindowManager<AppContent>,
    fs: VirtualFileSystemView,
    interpreter: CommandInterpreter,
    frame: FrameInteraction,
    /// Last message for the user that has no window of its own.
    notice: Option<String>,
}

impl Desktop {
    pub fn new(config: DesktopConfig, repository: Arc<dyn ContentRepository>) -> Self {
        let fs = VirtualFileSystemView::new(PathResolver::new(config.home_dir.clone()), repository);
        Self {
            windows: WindowManager::new(config.screen),
            interpreter: CommandInterpreter::from_config(&config),
            frame: FrameInteraction::new(),
            notice: None,
            fs,
            config,
        }
    }

    /// Hit-test frames with `metrics` from now on. Cancels any gesture in
    /// flight.
    pub fn set_frame_metrics(&mut self, metrics: FrameMetrics) {
        self.frame = FrameInteraction::with_metrics(metrics);
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn windows(&self) -> &WindowManager<AppContent> {
        &self.windows
    }

    pub fn windows_mut(&mut self) -> &mut WindowManager<AppContent> {
        &mut self.windows
    }

    pub fn fs(&self) -> &VirtualFileSystemView {
        &self.fs
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn dock(&self) -> Vec<DockItem> {
        dock_items(&self.windows)
    }

    pub fn take_events(&mut self) -> Vec<WindowEvent> {
        self.windows.take_events()
    }

    /// Adopt a new screen size, keeping the dock height.
    pub fn resize_screen(&mut self, width: f64, height: f64) {
        let dock_height = self.windows.screen().dock_height;
        self.windows.set_screen(Screen::new(width, height, dock_height));
    }

    /// Open a window for `request`, building its content first.
    pub async fn open(&mut self, request: OpenRequest) -> WindowId {
        let OpenRequest {
            app,
            title,
            position,
            size,
            document,
        } = request;
        let content = match (app, document) {
            (_, Some(document)) => AppContent::Viewer { app, document },
            (AppKind::Terminal, None) => {
                AppContent::Terminal(Box::new(TerminalSession::new(self.interpreter.clone())))
            }
            (AppKind::Files, None) => {
                let mut browser = FileBrowser::new(self.fs.resolver().home());
                browser.refresh(&self.fs).await;
                AppContent::Files(browser)
            }
            (app, None) => AppContent::Page {
                app,
                lines: self.interpreter.page_lines(app, &self.fs).await,
            },
        };
        self.windows.open_window(WindowSpec {
            title,
            content,
            position,
            size,
        })
    }

    /// Open a fresh window of `app` at the default geometry, the way the
    /// dock does.
    pub async fn launch(&mut self, app: AppKind) -> WindowId {
        self.open(OpenRequest::new(
            app,
            Point::new(DEFAULT_WINDOW_X, DEFAULT_WINDOW_Y),
            Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
        ))
        .await
    }

    pub async fn open_icon(&mut self, icon: &DesktopIcon) -> WindowId {
        self.open(OpenRequest::new(icon.app, icon.position, icon.size)).await
    }

    /// Apply the dock's click policy to `item`. Returns the window that
    /// was launched, if any.
    pub async fn click_dock(&mut self, item: &DockItem) -> Option<WindowId> {
        match item.click_action() {
            DockAction::Focus(id) => {
                self.windows.focus_window(id);
                None
            }
            DockAction::Minimize(id) => {
                self.windows.minimize_window(id);
                None
            }
            DockAction::Launch(app) => Some(self.launch(app).await),
        }
    }

    pub fn pointer_down(&mut self, point: Point) -> PointerDown {
        self.frame.pointer_down(&mut self.windows, point)
    }

    pub fn pointer_move(&mut self, point: Point) -> bool {
        self.frame.pointer_move(&mut self.windows, point)
    }

    pub fn pointer_up(&mut self) -> bool {
        self.frame.pointer_up()
    }

    /// Feed a key to the terminal in window `id`. Returns `false` when the
    /// window is not a terminal.
    pub async fn terminal_key(&mut self, id: WindowId, key: SessionKey) -> bool {
        let Some(AppContent::Terminal(session)) = self.windows.content_mut(id) else {
            return false;
        };
        session.handle_key(key, &mut self.fs).await;
        true
    }

    /// Activate the selected entry of the file browser in window `id`.
    /// Folders are entered in place; files open in a new window, whose id
    /// is returned.
    pub async fn activate_selected(&mut self, id: WindowId) -> Option<WindowId> {
        let Some(AppContent::Files(browser)) = self.windows.content_mut(id) else {
            return None;
        };
        let entry = browser.selected_entry()?.clone();
        match browser.activate(&entry) {
            BrowserAction::Navigated => {
                browser.refresh(&self.fs).await;
                None
            }
            BrowserAction::Open(request) => Some(self.open(request).await),
            BrowserAction::Describe(text) => {
                self.notice = Some(text);
                None
            }
        }
    }

    /// Move the file browser in window `id` to its parent directory.
    pub async fn browser_up(&mut self, id: WindowId) {
        let Some(AppContent::Files(browser)) = self.windows.content_mut(id) else {
            return;
        };
        if browser.go_up(self.fs.resolver()).is_some() {
            browser.refresh(&self.fs).await;
        }
    }

    /// Re-list every open file browser, e.g. after the shell changed the
    /// tree.
    pub async fn refresh_browsers(&mut self) {
        let ids: Vec<WindowId> = self.windows.windows().iter().map(|w| w.id()).collect();
        for id in ids {
            if let Some(AppContent::Files(browser)) = self.windows.content_mut(id) {
                browser.refresh(&self.fs).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::fs::BrowserState;
    use crate::repository::InMemoryRepository;

    fn desktop(seed: serde_json::Value) -> Desktop {
        let repo = InMemoryRepository::from_seed_json(&seed.to_string()).unwrap();
        Desktop::new(DesktopConfig::default(), Arc::new(repo))
    }

    fn browser(desktop: &mut Desktop, id: WindowId) -> &mut FileBrowser {
        match desktop.windows_mut().content_mut(id) {
            Some(AppContent::Files(browser)) => browser,
            _ => panic!("not a file browser"),
        }
    }

    #[tokio::test]
    async fn icons_open_with_their_own_geometry() {
        let mut desktop = desktop(json!({}));
        let skills = DESKTOP_ICONS[1];
        let id = desktop.open_icon(&skills).await;
        let window = desktop.windows().window(id).unwrap();
        assert_eq!(window.title(), "Skills & Technologies");
        assert_eq!(window.position(), Point::new(150.0, 150.0));
        assert_eq!(window.size(), Size::new(900.0, 700.0));
    }

    #[tokio::test]
    async fn terminals_share_the_file_system() {
        let mut desktop = desktop(json!({}));
        let first = desktop.launch(AppKind::Terminal).await;
        let second = desktop.launch(AppKind::Terminal).await;

        for ch in "mkdir shared".chars() {
            desktop.terminal_key(first, SessionKey::Char(ch)).await;
        }
        desktop.terminal_key(first, SessionKey::Enter).await;
        for ch in "ls".chars() {
            desktop.terminal_key(second, SessionKey::Char(ch)).await;
        }
        desktop.terminal_key(second, SessionKey::Enter).await;

        let Some(AppContent::Terminal(session)) =
            desktop.windows().window(second).map(|w| w.content())
        else {
            panic!("not a terminal");
        };
        assert!(session.scrollback().iter().any(|line| line.contains("shared")));
    }

    #[tokio::test]
    async fn keys_to_non_terminals_are_refused() {
        let mut desktop = desktop(json!({}));
        let about = desktop.launch(AppKind::About).await;
        assert!(!desktop.terminal_key(about, SessionKey::Enter).await);
    }

    #[tokio::test]
    async fn file_browser_navigates_and_opens_documents() {
        let mut desktop = desktop(json!({
            "simulatedFiles": [
                {"name": "notes.txt", "path": "/home/developer", "type": "file", "content": "hi"}
            ]
        }));
        let files = desktop.launch(AppKind::Files).await;
        let names: Vec<String> = browser(&mut desktop, files)
            .entries()
            .iter()
            .map(|entry| entry.name.clone())
            .collect();
        let notes = names.iter().position(|name| name == "notes.txt").unwrap();
        let portfolio = names.iter().position(|name| name == "portfolio").unwrap();

        browser(&mut desktop, files).select(notes);
        let viewer = desktop.activate_selected(files).await.unwrap();
        let window = desktop.windows().window(viewer).unwrap();
        assert_eq!(window.title(), "notes.txt");
        assert_eq!(window.content().app(), AppKind::TextEditor);

        browser(&mut desktop, files).select(portfolio);
        assert_eq!(desktop.activate_selected(files).await, None);
        assert_eq!(
            browser(&mut desktop, files).current_path(),
            "/home/developer/portfolio"
        );
        assert!(matches!(
            browser(&mut desktop, files).state(),
            BrowserState::Ready(_)
        ));

        desktop.browser_up(files).await;
        assert_eq!(browser(&mut desktop, files).current_path(), "/home/developer");
    }

    #[tokio::test]
    async fn dock_clicks_follow_the_policy() {
        let mut desktop = desktop(json!({}));
        let launcher = desktop
            .dock()
            .into_iter()
            .find(|item| item.app == AppKind::Terminal)
            .unwrap();
        let id = desktop.click_dock(&launcher).await.unwrap();
        assert_eq!(desktop.windows().window(id).unwrap().size(), Size::new(800.0, 600.0));

        let item = desktop
            .dock()
            .into_iter()
            .find(|item| item.window == Some(id))
            .unwrap();
        assert!(item.is_focused);
        assert_eq!(desktop.click_dock(&item).await, None);
        assert!(desktop.windows().window(id).unwrap().is_minimized());
    }

    #[tokio::test]
    async fn resize_keeps_the_dock_height() {
        let mut desktop = desktop(json!({}));
        desktop.resize_screen(1024.0, 768.0);
        assert_eq!(desktop.windows().screen(), Screen::new(1024.0, 768.0, 64.0));
    }
}
