//! Draws the desktop into a ratatui buffer: background icons, windows
//! bottom to top, the dock and any pending notice.

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap};

use super::scale::CellScale;
use crate::apps::AppContent;
use crate::desktop::{DESKTOP_ICONS, Desktop, DesktopIcon};
use crate::dock::DockItem;
use crate::fs::BrowserState;
use crate::window::{WindowId, WindowRecord};

const DESKTOP_BG: Color = Color::Rgb(48, 10, 36);
const WINDOW_BG: Color = Color::Rgb(30, 30, 30);
const ACCENT: Color = Color::Rgb(233, 84, 32);
const DOCK_BG: Color = Color::Rgb(20, 20, 20);

/// Rows above a file browser's first entry: border, header, path line.
pub const LIST_TOP: u16 = 3;

/// Where the desktop background and the dock sit inside the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostLayout {
    pub desktop: Rect,
    pub dock: Rect,
}

impl HostLayout {
    pub fn new(area: Rect, dock_rows: u16) -> Self {
        let dock_rows = dock_rows.min(area.height);
        let desktop_height = area.height - dock_rows;
        Self {
            desktop: Rect::new(area.x, area.y, area.width, desktop_height),
            dock: Rect::new(area.x, area.y + desktop_height, area.width, dock_rows),
        }
    }
}

/// Icons run down the left edge, wrapping into further columns.
pub fn icon_slots(area: Rect) -> Vec<(Rect, DesktopIcon)> {
    const COLUMN_WIDTH: u16 = 20;
    let per_column = (area.height.saturating_sub(1) / 2).max(1);
    DESKTOP_ICONS
        .iter()
        .enumerate()
        .map(|(index, icon)| {
            let index = index as u16;
            let x = area.x + 1 + (index / per_column) * COLUMN_WIDTH;
            let y = area.y + 1 + (index % per_column) * 2;
            let width = label_width(icon.label);
            (Rect::new(x, y, width, 1).intersection(area), *icon)
        })
        .filter(|(rect, _)| !rect.is_empty())
        .collect()
}

/// Dock items in a single row, left to right, one space apart.
pub fn dock_slots(items: &[DockItem], area: Rect) -> Vec<(Rect, DockItem)> {
    let y = area.y + area.height / 2;
    let mut x = area.x + 1;
    let mut slots = Vec::with_capacity(items.len());
    for item in items {
        let width = label_width(item.app.name());
        let rect = Rect::new(x, y, width, 1).intersection(area);
        if rect.is_empty() {
            break;
        }
        slots.push((rect, *item));
        x = x.saturating_add(width + 1);
    }
    slots
}

/// First visible entry of a list with `selected` highlighted, so the
/// selection is always on screen.
pub fn list_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 || selected < visible {
        0
    } else {
        selected + 1 - visible
    }
}

/// Where window `id` is drawn, clipped to the desktop area.
pub fn window_rect(desktop: &Desktop, scale: &CellScale, layout: &HostLayout, id: WindowId) -> Option<Rect> {
    let screen = desktop.windows().screen();
    let window = desktop.windows().window(id)?;
    let rect = scale
        .rect_for(window.rendered_bounds(&screen))
        .intersection(layout.desktop);
    (!rect.is_empty()).then_some(rect)
}

pub fn draw_desktop(buffer: &mut Buffer, desktop: &Desktop, scale: &CellScale, layout: &HostLayout) {
    Block::default()
        .style(Style::default().bg(DESKTOP_BG))
        .render(layout.desktop, buffer);
    let icon_style = Style::default().fg(Color::White).bg(DESKTOP_BG);
    for (rect, icon) in icon_slots(layout.desktop) {
        safe_set_string(buffer, rect, rect.x, rect.y, &format!(" {} ", icon.label), icon_style);
    }

    let focused = desktop.windows().focused();
    for id in desktop.windows().stacking_order() {
        let Some(window) = desktop.windows().window(id) else {
            continue;
        };
        if window.is_minimized() {
            continue;
        }
        if let Some(rect) = window_rect(desktop, scale, layout, id) {
            draw_window(buffer, rect, window, desktop, focused == Some(id));
        }
    }

    draw_dock(buffer, &desktop.dock(), layout.dock);
    if let Some(notice) = desktop.notice() {
        draw_notice(buffer, layout.desktop, notice);
    }
}

fn draw_window(
    buffer: &mut Buffer,
    rect: Rect,
    window: &WindowRecord<AppContent>,
    desktop: &Desktop,
    focused: bool,
) {
    let border = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Clear.render(rect, buffer);
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .style(Style::default().bg(WINDOW_BG))
        .title(window.title())
        .render(rect, buffer);
    if rect.width < 3 || rect.height < 3 {
        return;
    }

    let header = Rect::new(rect.x + 1, rect.y + 1, rect.width - 2, 1);
    let header_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
    safe_set_string(buffer, header, header.x + 1, header.y, window.title(), header_style);
    // Button glyphs sit on cells the frame hit-test maps to their buttons.
    let right = rect.x + rect.width - 1;
    let maximize = if window.is_maximized() { "❐" } else { "□" };
    for (offset, glyph) in [(1, "×"), (4, maximize), (7, "_")] {
        if let Some(x) = right.checked_sub(offset).filter(|x| *x > header.x) {
            safe_set_string(buffer, header, x, header.y, glyph, header_style);
        }
    }

    let body = Rect::new(
        rect.x + 1,
        rect.y + 2,
        rect.width - 2,
        rect.height.saturating_sub(3),
    );
    let text = Style::default().fg(Color::Gray);
    match window.content() {
        AppContent::Terminal(session) => {
            let mut lines: Vec<String> = session.scrollback().to_vec();
            lines.push(format!("{}{}█", session.prompt(desktop.fs()), session.input()));
            let skip = lines.len().saturating_sub(usize::from(body.height));
            draw_lines(buffer, body, lines.iter().skip(skip).map(String::as_str), text);
        }
        AppContent::Files(browser) => {
            let path = format!("⬆ {}", browser.display_path(desktop.fs().resolver()));
            safe_set_string(buffer, body, body.x, body.y, &path, text.add_modifier(Modifier::BOLD));
            let list = Rect::new(body.x, body.y + 1, body.width, body.height.saturating_sub(1));
            match browser.state() {
                BrowserState::Loading => draw_lines(buffer, list, ["Loading..."], text),
                BrowserState::Failed(message) => {
                    draw_lines(buffer, list, [message.as_str()], text.fg(Color::Red))
                }
                BrowserState::Ready(entries) if entries.is_empty() => {
                    draw_lines(buffer, list, ["This folder is empty."], text)
                }
                BrowserState::Ready(entries) => {
                    let offset = list_offset(browser.selected(), usize::from(list.height));
                    for (row, (index, entry)) in entries.iter().enumerate().skip(offset).enumerate() {
                        let Ok(row) = u16::try_from(row) else {
                            break;
                        };
                        if row >= list.height {
                            break;
                        }
                        let marker = if entry.is_folder() { "▸ " } else { "  " };
                        let style = if index == browser.selected() {
                            text.add_modifier(Modifier::REVERSED)
                        } else {
                            text
                        };
                        let label = format!("{marker}{}", entry.name);
                        safe_set_string(buffer, list, list.x, list.y + row, &label, style);
                    }
                }
            }
        }
        AppContent::Viewer { document, .. } => {
            let lines = document.lines();
            draw_lines(buffer, body, lines.iter().map(String::as_str), text);
        }
        AppContent::Page { lines, .. } => {
            draw_lines(buffer, body, lines.iter().map(String::as_str), text);
        }
    }
}

fn draw_dock(buffer: &mut Buffer, items: &[DockItem], area: Rect) {
    if area.is_empty() {
        return;
    }
    Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray))
        .style(Style::default().bg(DOCK_BG))
        .render(area, buffer);
    for (rect, item) in dock_slots(items, area) {
        let mut style = Style::default().fg(Color::White).bg(DOCK_BG);
        if item.is_open() {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if item.is_minimized {
            style = style.add_modifier(Modifier::DIM);
        }
        if item.is_focused {
            style = style.fg(ACCENT).add_modifier(Modifier::BOLD);
        }
        safe_set_string(buffer, rect, rect.x, rect.y, &format!(" {} ", item.app.name()), style);
    }
}

fn draw_notice(buffer: &mut Buffer, area: Rect, notice: &str) {
    let width = area.width.min(60);
    let height = area.height.min(8);
    let rect = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );
    Clear.render(rect, buffer);
    Paragraph::new(notice)
        .block(Block::default().title("Info").borders(Borders::ALL))
        .style(Style::default().bg(WINDOW_BG).fg(Color::White))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .render(rect, buffer);
}

fn draw_lines<'a, I>(buffer: &mut Buffer, area: Rect, lines: I, style: Style)
where
    I: IntoIterator<Item = &'a str>,
{
    for (line, y) in lines.into_iter().zip(area.y..area.y.saturating_add(area.height)) {
        safe_set_string(buffer, area, area.x, y, line, style);
    }
}

fn label_width(label: &str) -> u16 {
    u16::try_from(label.chars().count() + 2).unwrap_or(u16::MAX)
}

/// Write `text` at (`x`, `y`), cut off at the right edge of `bounds` and
/// skipped entirely outside it.
pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = usize::from(max_x - x);
    let text: String = text.chars().take(available).collect();
    buffer.set_string(x, y, text, style);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::apps::AppKind;
    use crate::config::DesktopConfig;
    use crate::repository::InMemoryRepository;
    use crate::window::Screen;

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn layout_reserves_dock_rows() {
        let layout = HostLayout::new(Rect::new(0, 0, 80, 24), 4);
        assert_eq!(layout.desktop, Rect::new(0, 0, 80, 20));
        assert_eq!(layout.dock, Rect::new(0, 20, 80, 4));
        assert_eq!(HostLayout::new(Rect::new(0, 0, 80, 2), 4).desktop.height, 0);
    }

    #[test]
    fn list_offset_keeps_selection_visible() {
        assert_eq!(list_offset(0, 5), 0);
        assert_eq!(list_offset(4, 5), 0);
        assert_eq!(list_offset(7, 5), 3);
        assert_eq!(list_offset(3, 0), 0);
    }

    #[test]
    fn icons_wrap_into_columns() {
        let slots = icon_slots(Rect::new(0, 0, 80, 9));
        assert_eq!(slots.len(), DESKTOP_ICONS.len());
        assert_eq!(slots[0].0, Rect::new(1, 1, 10, 1));
        assert_eq!(slots[4].0.x, 21);
        assert_eq!(slots[4].0.y, 1);
    }

    #[test]
    fn safe_set_string_clips_to_bounds() {
        let bounds = Rect::new(0, 0, 4, 1);
        let mut buffer = Buffer::empty(bounds);
        safe_set_string(&mut buffer, bounds, 1, 0, "hello", Style::default());
        assert_eq!(row_text(&buffer, 0), " hel");
        safe_set_string(&mut buffer, bounds, 9, 0, "x", Style::default());
        assert_eq!(row_text(&buffer, 0), " hel");
    }

    #[tokio::test]
    async fn draws_windows_and_dock() {
        let config = DesktopConfig {
            screen: Screen::new(960.0, 640.0, 64.0),
            ..DesktopConfig::default()
        };
        let mut desktop = Desktop::new(config, Arc::new(InMemoryRepository::new()));
        desktop.launch(AppKind::Terminal).await;

        let scale = CellScale::default();
        let area = Rect::new(0, 0, 120, 40);
        let layout = HostLayout::new(area, scale.dock_rows(64.0));
        let mut buffer = Buffer::empty(area);
        draw_desktop(&mut buffer, &desktop, &scale, &layout);

        // Opened at (100, 50): cells 12.. across, rows 3.. down.
        let header = row_text(&buffer, 4);
        assert!(header.contains("Terminal"));
        assert!(header.contains('×'));
        let body = row_text(&buffer, 5);
        assert!(body.contains("Welcome to Ubuntu"));
        let dock = row_text(&buffer, 38);
        assert!(dock.contains("About Me"));
        assert!(dock.contains("Terminal"));
    }
}
