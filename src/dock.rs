//! The dock: one icon per open dock-app window plus a launcher for every
//! dock app that has none open.

use crate::apps::{AppContent, AppKind};
use crate::window::{WindowId, WindowManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockItem {
    pub app: AppKind,
    /// The window this icon stands for; `None` for a bare launcher.
    pub window: Option<WindowId>,
    pub is_minimized: bool,
    pub is_focused: bool,
}

/// What clicking a dock icon should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockAction {
    Focus(WindowId),
    Minimize(WindowId),
    Launch(AppKind),
}

impl DockItem {
    pub fn is_open(&self) -> bool {
        self.window.is_some()
    }

    /// Minimized windows are restored, the focused window is minimized,
    /// any other open window is focused, launchers open a new window.
    pub fn click_action(&self) -> DockAction {
        match self.window {
            None => DockAction::Launch(self.app),
            Some(id) if self.is_minimized => DockAction::Focus(id),
            Some(id) if self.is_focused => DockAction::Minimize(id),
            Some(id) => DockAction::Focus(id),
        }
    }
}

/// Build the dock. Windows are matched to apps by what they run, never by
/// title, so two windows of one app get two icons. Items sort by app name,
/// case-insensitively; ties keep window creation order.
pub fn dock_items(wm: &WindowManager<AppContent>) -> Vec<DockItem> {
    let focused = wm.focused();
    let mut items: Vec<DockItem> = wm
        .windows()
        .iter()
        .filter(|window| AppKind::DOCK.contains(&window.content().app()))
        .map(|window| DockItem {
            app: window.content().app(),
            window: Some(window.id()),
            is_minimized: window.is_minimized(),
            is_focused: focused == Some(window.id()),
        })
        .collect();

    for app in AppKind::DOCK {
        if !items.iter().any(|item| item.app == app) {
            items.push(DockItem {
                app,
                window: None,
                is_minimized: false,
                is_focused: false,
            });
        }
    }

    items.sort_by_cached_key(|item| item.app.name().to_lowercase());
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{Point, Screen, Size, WindowSpec};

    fn open(wm: &mut WindowManager<AppContent>, app: AppKind) -> WindowId {
        wm.open_window(WindowSpec {
            title: app.title().to_string(),
            content: AppContent::Page {
                app,
                lines: Vec::new(),
            },
            position: Point::new(100.0, 100.0),
            size: Size::new(800.0, 600.0),
        })
    }

    #[test]
    fn closed_dock_lists_every_launcher_by_name() {
        let wm = WindowManager::new(Screen::default());
        let items = dock_items(&wm);
        assert_eq!(items.len(), AppKind::DOCK.len());
        assert!(items.iter().all(|item| !item.is_open()));
        let names: Vec<_> = items.iter().map(|item| item.app.name()).collect();
        assert_eq!(names.first(), Some(&"About Me"));
        assert_eq!(names.last(), Some(&"Terminal"));
    }

    #[test]
    fn each_open_window_gets_its_own_icon() {
        let mut wm = WindowManager::new(Screen::default());
        let first = open(&mut wm, AppKind::About);
        let second = open(&mut wm, AppKind::About);
        open(&mut wm, AppKind::TextEditor);

        let items = dock_items(&wm);
        let about: Vec<_> = items.iter().filter(|item| item.app == AppKind::About).collect();
        assert_eq!(about.len(), 2);
        assert_eq!(about[0].window, Some(first));
        assert_eq!(about[1].window, Some(second));
        assert!(items.iter().all(|item| item.app != AppKind::TextEditor));
        assert_eq!(items.len(), AppKind::DOCK.len() + 1);
    }

    #[test]
    fn focus_is_derived_from_stacking() {
        let mut wm = WindowManager::new(Screen::default());
        let about = open(&mut wm, AppKind::About);
        let skills = open(&mut wm, AppKind::Skills);
        wm.focus_window(about);

        let items = dock_items(&wm);
        let focused: Vec<_> = items.iter().filter(|item| item.is_focused).collect();
        assert_eq!(focused.len(), 1);
        assert_eq!(focused[0].window, Some(about));
        assert!(items.iter().any(|item| item.window == Some(skills) && !item.is_focused));
    }

    #[test]
    fn click_policy() {
        let mut wm = WindowManager::new(Screen::default());
        let about = open(&mut wm, AppKind::About);
        let skills = open(&mut wm, AppKind::Skills);
        let item = |wm: &WindowManager<AppContent>, id: WindowId| {
            dock_items(wm)
                .into_iter()
                .find(|item| item.window == Some(id))
                .unwrap()
        };

        assert_eq!(item(&wm, skills).click_action(), DockAction::Minimize(skills));
        assert_eq!(item(&wm, about).click_action(), DockAction::Focus(about));
        wm.minimize_window(skills);
        assert_eq!(item(&wm, skills).click_action(), DockAction::Focus(skills));

        let launcher = dock_items(&wm)
            .into_iter()
            .find(|item| item.app == AppKind::Terminal)
            .unwrap();
        assert_eq!(launcher.click_action(), DockAction::Launch(AppKind::Terminal));
    }
}
