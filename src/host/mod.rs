//! Terminal host for the desktop.
//!
//! Draws windows with ratatui and feeds crossterm mouse and key events into
//! the desktop. The configured screen is stretched over the terminal, so
//! one cell stands for a block of desktop pixels (see [`CellScale`]); the
//! window manager itself never sees cells.

pub mod input;
pub mod render;
pub mod scale;

use std::io;
use std::time::Duration;

use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tokio::runtime::Runtime;

pub use input::{KeyCommand, key_command};
pub use render::HostLayout;
pub use scale::CellScale;

use crate::apps::{AppContent, AppKind};
use crate::desktop::Desktop;
use crate::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop};
use crate::shell::SessionKey;
use crate::window::{FrameHit, PointerDown, WindowId};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct DesktopHost {
    desktop: Desktop,
    scale: CellScale,
    area: Rect,
}

impl DesktopHost {
    pub fn new(desktop: Desktop) -> Self {
        Self {
            desktop,
            scale: CellScale::default(),
            area: Rect::default(),
        }
    }

    pub fn desktop(&self) -> &Desktop {
        &self.desktop
    }

    pub fn layout(&self) -> HostLayout {
        let dock_height = self.desktop.windows().screen().dock_height;
        HostLayout::new(self.area, self.scale.dock_rows(dock_height))
    }

    pub fn scale(&self) -> CellScale {
        self.scale
    }

    /// Adopt a terminal of `columns` x `rows` cells. The desktop keeps its
    /// pixel size; only the cell scale changes.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.area = Rect::new(0, 0, columns, rows);
        self.scale = CellScale::fit(&self.desktop.windows().screen(), columns, rows);
        self.desktop.set_frame_metrics(self.scale.frame_metrics());
        tracing::debug!(columns, rows, scale = ?self.scale, "terminal resized");
    }

    pub fn draw(&self, buffer: &mut ratatui::buffer::Buffer) {
        render::draw_desktop(buffer, &self.desktop, &self.scale, &self.layout());
    }

    pub async fn handle_event(&mut self, event: Event) -> ControlFlow {
        match event {
            Event::Key(key) => {
                let focused = self.focused_app();
                if let Some(command) = key_command(key, focused.map(|(_, app)| app)) {
                    return self.apply(command, focused.map(|(id, _)| id)).await;
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse).await,
            Event::Resize(columns, rows) => self.resize(columns, rows),
            _ => {}
        }
        ControlFlow::Continue
    }

    fn focused_app(&self) -> Option<(WindowId, AppKind)> {
        let wm = self.desktop.windows();
        let id = wm.focused()?;
        let window = wm.window(id)?;
        (!window.is_minimized()).then(|| (id, window.content().app()))
    }

    async fn apply(&mut self, command: KeyCommand, focused: Option<WindowId>) -> ControlFlow {
        match (command, focused) {
            (KeyCommand::Quit, _) => return ControlFlow::Quit,
            (KeyCommand::DismissNotice, _) => self.desktop.dismiss_notice(),
            (KeyCommand::Launch(app), _) => {
                self.desktop.launch(app).await;
            }
            (KeyCommand::CycleFocus, _) => {
                let wm = self.desktop.windows_mut();
                let bottom = wm
                    .stacking_order()
                    .into_iter()
                    .find(|id| wm.window(*id).is_some_and(|w| !w.is_minimized()));
                if let Some(id) = bottom {
                    wm.focus_window(id);
                }
            }
            (KeyCommand::CloseFocused, Some(id)) => {
                self.desktop.windows_mut().close_window(id);
            }
            (KeyCommand::Session(key), Some(id)) => {
                self.desktop.terminal_key(id, key).await;
                if key == SessionKey::Enter {
                    self.desktop.refresh_browsers().await;
                }
            }
            (KeyCommand::SelectPrevious, Some(id)) => {
                if let Some(AppContent::Files(browser)) =
                    self.desktop.windows_mut().content_mut(id)
                {
                    browser.select_previous();
                }
            }
            (KeyCommand::SelectNext, Some(id)) => {
                if let Some(AppContent::Files(browser)) =
                    self.desktop.windows_mut().content_mut(id)
                {
                    browser.select_next();
                }
            }
            (KeyCommand::Activate, Some(id)) => {
                self.desktop.activate_selected(id).await;
            }
            (KeyCommand::GoUp, Some(id)) => self.desktop.browser_up(id).await,
            (_, None) => {}
        }
        ControlFlow::Continue
    }

    async fn handle_mouse(&mut self, mouse: MouseEvent) {
        let point = self.scale.point_at(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.desktop.notice().is_some() {
                    self.desktop.dismiss_notice();
                    return;
                }
                let position = Position::new(mouse.column, mouse.row);
                let layout = self.layout();
                if layout.dock.contains(position) {
                    let items = self.desktop.dock();
                    let hit = render::dock_slots(&items, layout.dock)
                        .into_iter()
                        .find(|(rect, _)| rect.contains(position));
                    if let Some((_, item)) = hit {
                        self.desktop.click_dock(&item).await;
                    }
                    return;
                }
                match self.desktop.pointer_down(point) {
                    PointerDown::Desktop => {
                        let hit = render::icon_slots(layout.desktop)
                            .into_iter()
                            .find(|(rect, _)| rect.contains(position));
                        if let Some((_, icon)) = hit {
                            self.desktop.open_icon(&icon).await;
                        }
                    }
                    PointerDown::Window {
                        id,
                        hit: FrameHit::Body,
                    } => self.click_body(id, mouse.row).await,
                    PointerDown::Window { .. } => {}
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.desktop.pointer_move(point);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.desktop.pointer_up();
            }
            _ => {}
        }
    }

    /// A click inside a file browser: the path line goes up, an entry is
    /// selected, and a click on the selected entry opens it.
    async fn click_body(&mut self, id: WindowId, row: u16) {
        let layout = self.layout();
        let Some(rect) = render::window_rect(&self.desktop, &self.scale, &layout, id) else {
            return;
        };
        let Some(AppContent::Files(browser)) = self.desktop.windows_mut().content_mut(id) else {
            return;
        };
        let list_top = rect.y + render::LIST_TOP;
        if row == list_top - 1 {
            self.desktop.browser_up(id).await;
            return;
        }
        if row < list_top {
            return;
        }
        let visible = usize::from(rect.height.saturating_sub(render::LIST_TOP + 1));
        let index = render::list_offset(browser.selected(), visible) + usize::from(row - list_top);
        if index >= browser.entries().len() {
            return;
        }
        if index == browser.selected() {
            self.desktop.activate_selected(id).await;
        } else {
            browser.select(index);
        }
    }
}

/// Run the desktop in the current terminal until the user quits.
pub fn run(desktop: Desktop, runtime: &Runtime) -> io::Result<()> {
    let mut output = ConsoleOutputDriver::new()?;
    let mut input = ConsoleInputDriver::new();
    output.enter()?;
    input.set_mouse_capture(true)?;

    let mut host = DesktopHost::new(desktop);
    let (columns, rows) = output.size()?;
    host.resize(columns, rows);

    let result = EventLoop::new(&mut input, FRAME_INTERVAL).run(|_, event| match event {
        None => {
            for change in host.desktop.take_events() {
                tracing::trace!(?change, "window event");
            }
            output.draw(|frame| host.draw(frame.buffer_mut()))?;
            Ok(ControlFlow::Continue)
        }
        Some(event) => Ok(runtime.block_on(host.handle_event(event))),
    });

    input.set_mouse_capture(false)?;
    output.exit()?;
    result
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;
    use crate::config::DesktopConfig;
    use crate::repository::InMemoryRepository;
    use crate::window::Screen;

    /// 960x640 pixels over 120x40 cells: 8x16 pixels per cell.
    fn host() -> DesktopHost {
        let config = DesktopConfig {
            screen: Screen::new(960.0, 640.0, 64.0),
            ..DesktopConfig::default()
        };
        let desktop = Desktop::new(config, Arc::new(InMemoryRepository::new()));
        let mut host = DesktopHost::new(desktop);
        host.resize(120, 40);
        host
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[tokio::test]
    async fn resize_rescales_cells_not_the_screen() {
        let mut host = host();
        assert_eq!(host.scale(), CellScale::default());
        assert_eq!(host.layout().dock, Rect::new(0, 36, 120, 4));

        host.handle_event(Event::Resize(240, 80)).await;
        assert_eq!(host.desktop().windows().screen(), Screen::new(960.0, 640.0, 64.0));
        assert_eq!(host.scale().cell_width, 4.0);
        assert_eq!(host.layout().dock, Rect::new(0, 72, 240, 8));
    }

    #[tokio::test]
    async fn ctrl_q_quits() {
        let mut host = host();
        let flow = host
            .handle_event(key(KeyCode::Char('q'), KeyModifiers::CONTROL))
            .await;
        assert_eq!(flow, ControlFlow::Quit);
    }

    #[tokio::test]
    async fn clicking_an_icon_opens_its_window() {
        let mut host = host();
        // "About Me" is the first icon, at (1, 1).
        host.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 2, 1))
            .await;
        let windows = host.desktop().windows().windows();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].title(), "About Me - Personal Information");
    }

    #[tokio::test]
    async fn typing_reaches_the_focused_terminal() {
        let mut host = host();
        host.handle_event(key(KeyCode::Char('t'), KeyModifiers::CONTROL))
            .await;
        for ch in "pwd".chars() {
            host.handle_event(key(KeyCode::Char(ch), KeyModifiers::NONE))
                .await;
        }
        host.handle_event(key(KeyCode::Enter, KeyModifiers::NONE)).await;

        let window = &host.desktop().windows().windows()[0];
        let AppContent::Terminal(session) = window.content() else {
            panic!("not a terminal");
        };
        assert_eq!(session.scrollback().last().map(String::as_str), Some("~/portfolio"));
    }

    #[tokio::test]
    async fn header_drag_moves_the_window() {
        let mut host = host();
        host.handle_event(key(KeyCode::Char('t'), KeyModifiers::CONTROL))
            .await;
        let id = host.desktop().windows().windows()[0].id();
        let before = host.desktop().windows().window(id).unwrap().position();
        let rect = render::window_rect(host.desktop(), &host.scale(), &host.layout(), id).unwrap();

        let (column, row) = (rect.x + 10, rect.y + 1);
        host.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), column, row))
            .await;
        host.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), column + 2, row - 1))
            .await;
        host.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), column + 2, row - 1))
            .await;

        let after = host.desktop().windows().window(id).unwrap().position();
        assert_eq!(after.x, before.x + 16.0);
        assert_eq!(after.y, before.y - 16.0);
    }

    #[tokio::test]
    async fn dock_click_minimizes_the_focused_window() {
        let mut host = host();
        host.handle_event(key(KeyCode::Char('t'), KeyModifiers::CONTROL))
            .await;
        let id = host.desktop().windows().windows()[0].id();
        let layout = host.layout();
        let items = host.desktop().dock();
        let (rect, _) = render::dock_slots(&items, layout.dock)
            .into_iter()
            .find(|(_, item)| item.window == Some(id))
            .unwrap();

        host.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), rect.x, rect.y))
            .await;
        assert!(host.desktop().windows().window(id).unwrap().is_minimized());
    }

    #[tokio::test]
    async fn file_browser_keys_select_and_open() {
        let mut host = host();
        host.handle_event(key(KeyCode::Char('e'), KeyModifiers::CONTROL))
            .await;
        let id = host.desktop().windows().windows()[0].id();
        assert_eq!(host.desktop().windows().window(id).unwrap().content().app(), AppKind::Files);

        // Home holds only `portfolio`; Enter walks into it.
        host.handle_event(key(KeyCode::Enter, KeyModifiers::NONE)).await;
        let Some(AppContent::Files(browser)) =
            host.desktop().windows().window(id).map(|w| w.content())
        else {
            panic!("not a file browser");
        };
        assert_eq!(browser.current_path(), "/home/developer/portfolio");

        host.handle_event(key(KeyCode::Backspace, KeyModifiers::NONE)).await;
        let Some(AppContent::Files(browser)) =
            host.desktop().windows().window(id).map(|w| w.content())
        else {
            panic!("not a file browser");
        };
        assert_eq!(browser.current_path(), "/home/developer");
    }
}
