//! Mapping between terminal cells and the desktop's pixel space.

use ratatui::layout::Rect;

use crate::window::{Bounds, FrameMetrics, Point, Screen};

/// How many desktop pixels one terminal cell stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellScale {
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Default for CellScale {
    fn default() -> Self {
        Self {
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }
}

impl CellScale {
    /// The pixel a pointer in this cell stands for: the cell's center.
    pub fn point_at(&self, column: u16, row: u16) -> Point {
        Point::new(
            (f64::from(column) + 0.5) * self.cell_width,
            (f64::from(row) + 0.5) * self.cell_height,
        )
    }

    /// Stretch `screen` over a terminal of `columns` x `rows` cells.
    pub fn fit(screen: &Screen, columns: u16, rows: u16) -> Self {
        Self {
            cell_width: screen.width / f64::from(columns.max(1)),
            cell_height: screen.height / f64::from(rows.max(1)),
        }
    }

    /// Rows the dock occupies at the bottom of the terminal.
    pub fn dock_rows(&self, dock_height: f64) -> u16 {
        to_cell((dock_height / self.cell_height).ceil())
    }

    /// The cells whose centers fall inside `bounds`. A pointer in any of
    /// them lands on the window, and nowhere else does.
    pub fn rect_for(&self, bounds: Bounds) -> Rect {
        let (x, right) = span(bounds.origin.x, bounds.right(), self.cell_width);
        let (y, bottom) = span(bounds.origin.y, bounds.bottom(), self.cell_height);
        Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
    }

    /// Frame hit-test sizes in whole cells: one-cell grips and edges, a
    /// two-row header and three-column buttons.
    pub fn frame_metrics(&self) -> FrameMetrics {
        FrameMetrics {
            header_height: 2.0 * self.cell_height,
            corner_x: self.cell_width,
            corner_y: self.cell_height,
            edge_x: self.cell_width,
            edge_y: self.cell_height,
            button_width: 3.0 * self.cell_width,
        }
    }
}

/// First and one-past-last cell whose center lies in `[start, end)`.
fn span(start: f64, end: f64, cell: f64) -> (u16, u16) {
    (
        to_cell((start / cell - 0.5).ceil()),
        to_cell((end / cell - 0.5).ceil()),
    )
}

fn to_cell(value: f64) -> u16 {
    value.clamp(0.0, f64::from(u16::MAX)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{FrameHit, HeaderButton, ResizeEdge, frame::hit_test};

    #[test]
    fn default_window_maps_to_whole_cells() {
        let scale = CellScale::default();
        let rect = scale.rect_for(Bounds::new(100.0, 100.0, 800.0, 600.0));
        assert_eq!(rect, Rect::new(12, 6, 100, 38));
    }

    #[test]
    fn dock_rows_round_up() {
        let scale = CellScale::default();
        assert_eq!(scale.dock_rows(64.0), 4);
        assert_eq!(scale.dock_rows(65.0), 5);
    }

    #[test]
    fn fit_divides_the_screen_into_cells() {
        let screen = Screen::new(960.0, 640.0, 64.0);
        assert_eq!(CellScale::fit(&screen, 120, 40), CellScale::default());
        let wide = CellScale::fit(&Screen::default(), 80, 24);
        assert_eq!(wide.cell_width, 24.0);
        assert_eq!(wide.cell_height, 45.0);
        assert_eq!(wide.dock_rows(64.0), 2);
    }

    #[test]
    fn cell_centers_reach_every_grip_and_button() {
        let scale = CellScale::default();
        let metrics = scale.frame_metrics();
        let bounds = Bounds::new(103.0, 100.0, 800.0, 600.0);
        let rect = scale.rect_for(bounds);
        let right = rect.x + rect.width - 1;
        let bottom = rect.y + rect.height - 1;
        let hit = |column, row| hit_test(bounds, scale.point_at(column, row), true, &metrics);

        assert_eq!(hit(rect.x, rect.y), Some(FrameHit::Resize(ResizeEdge::TopLeft)));
        assert_eq!(hit(right, bottom), Some(FrameHit::Resize(ResizeEdge::BottomRight)));
        assert_eq!(hit(rect.x, rect.y + 5), Some(FrameHit::Resize(ResizeEdge::Left)));
        assert_eq!(hit(right - 1, rect.y + 1), Some(FrameHit::Button(HeaderButton::Close)));
        assert_eq!(hit(right - 4, rect.y + 1), Some(FrameHit::Button(HeaderButton::Maximize)));
        assert_eq!(hit(right - 7, rect.y + 1), Some(FrameHit::Button(HeaderButton::Minimize)));
        assert_eq!(hit(rect.x + 10, rect.y + 1), Some(FrameHit::Header));
        assert_eq!(hit(rect.x + 10, rect.y + 2), Some(FrameHit::Body));
    }
}
