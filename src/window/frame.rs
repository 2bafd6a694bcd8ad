//! Pointer interaction with window frames: title-bar buttons, dragging by
//! the header, and resizing by edges and corners.
//!
//! A gesture exists only between pointer-down and pointer-up. While none is
//! active, pointer moves are ignored.

use crate::constants::{
    HEADER_BUTTON_WIDTH, HEADER_HEIGHT, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, RESIZE_CORNER,
    RESIZE_EDGE,
};

use super::{Bounds, Point, Screen, Size, WindowId, WindowManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ResizeEdge {
    fn moves_left(self) -> bool {
        matches!(
            self,
            ResizeEdge::Left | ResizeEdge::TopLeft | ResizeEdge::BottomLeft
        )
    }

    fn moves_right(self) -> bool {
        matches!(
            self,
            ResizeEdge::Right | ResizeEdge::TopRight | ResizeEdge::BottomRight
        )
    }

    fn moves_top(self) -> bool {
        matches!(
            self,
            ResizeEdge::Top | ResizeEdge::TopLeft | ResizeEdge::TopRight
        )
    }

    fn moves_bottom(self) -> bool {
        matches!(
            self,
            ResizeEdge::Bottom | ResizeEdge::BottomLeft | ResizeEdge::BottomRight
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderButton {
    Minimize,
    Maximize,
    Close,
}

/// Which part of a frame a point falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameHit {
    Resize(ResizeEdge),
    Button(HeaderButton),
    Header,
    Body,
}

/// Sizes of the interactive parts of a frame. The default is the pixel
/// layout; a cell-based host scales it to whole cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMetrics {
    pub header_height: f64,
    /// Corner grips are `corner_x` wide and `corner_y` tall.
    pub corner_x: f64,
    pub corner_y: f64,
    /// Thickness of the left/right and top/bottom edge strips.
    pub edge_x: f64,
    pub edge_y: f64,
    pub button_width: f64,
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self {
            header_height: HEADER_HEIGHT,
            corner_x: RESIZE_CORNER,
            corner_y: RESIZE_CORNER,
            edge_x: RESIZE_EDGE,
            edge_y: RESIZE_EDGE,
            button_width: HEADER_BUTTON_WIDTH,
        }
    }
}

/// Classify `point` against a frame drawn at `bounds`. Resize grips are
/// only reported when `resizable`; maximized frames pass `false`.
///
/// Corner grips win over edge strips, which run between the corners.
/// Header buttons sit at the right end of the header, close outermost.
pub fn hit_test(
    bounds: Bounds,
    point: Point,
    resizable: bool,
    metrics: &FrameMetrics,
) -> Option<FrameHit> {
    if !bounds.contains(point) {
        return None;
    }
    let local_x = point.x - bounds.origin.x;
    let local_y = point.y - bounds.origin.y;
    let from_right = bounds.size.width - local_x;
    let from_bottom = bounds.size.height - local_y;

    if resizable {
        let corner = match (
            local_x < metrics.corner_x,
            from_right < metrics.corner_x,
            local_y < metrics.corner_y,
            from_bottom < metrics.corner_y,
        ) {
            (true, _, true, _) => Some(ResizeEdge::TopLeft),
            (_, true, true, _) => Some(ResizeEdge::TopRight),
            (true, _, _, true) => Some(ResizeEdge::BottomLeft),
            (_, true, _, true) => Some(ResizeEdge::BottomRight),
            _ => None,
        };
        let edge = corner.or_else(|| {
            if local_y < metrics.edge_y {
                Some(ResizeEdge::Top)
            } else if from_bottom < metrics.edge_y {
                Some(ResizeEdge::Bottom)
            } else if local_x < metrics.edge_x {
                Some(ResizeEdge::Left)
            } else if from_right < metrics.edge_x {
                Some(ResizeEdge::Right)
            } else {
                None
            }
        });
        if let Some(edge) = edge {
            return Some(FrameHit::Resize(edge));
        }
    }

    if local_y >= metrics.header_height {
        return Some(FrameHit::Body);
    }
    let slot = (from_right / metrics.button_width).floor();
    Some(match slot as i64 {
        0 => FrameHit::Button(HeaderButton::Close),
        1 => FrameHit::Button(HeaderButton::Maximize),
        2 => FrameHit::Button(HeaderButton::Minimize),
        _ => FrameHit::Header,
    })
}

/// New origin for a drag: pointer minus the grab offset, kept fully on
/// screen and above the dock.
pub fn drag_position(pointer: Point, offset: Point, rendered: Size, screen: &Screen) -> Point {
    Point::new(
        (pointer.x - offset.x)
            .min(screen.width - rendered.width)
            .max(0.0),
        (pointer.y - offset.y)
            .min(screen.usable_height() - rendered.height)
            .max(0.0),
    )
}

/// Geometry captured at the start of a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeStart {
    pub pointer: Point,
    pub position: Point,
    pub size: Size,
}

/// Apply a resize of `edge` for the pointer now at `pointer`.
///
/// Left and top edges move the origin so the opposite edge stays put. The
/// minimum size is applied before the screen clamp, which keeps the right
/// and bottom edges on screen and above the dock.
pub fn resize_geometry(
    start: ResizeStart,
    edge: ResizeEdge,
    pointer: Point,
    screen: &Screen,
) -> (Point, Size) {
    let dx = pointer.x - start.pointer.x;
    let dy = pointer.y - start.pointer.y;

    let mut width = start.size.width;
    let mut height = start.size.height;
    if edge.moves_right() {
        width += dx;
    } else if edge.moves_left() {
        width -= dx;
    }
    if edge.moves_bottom() {
        height += dy;
    } else if edge.moves_top() {
        height -= dy;
    }
    width = width.max(MIN_WINDOW_WIDTH);
    height = height.max(MIN_WINDOW_HEIGHT);

    let mut x = start.position.x;
    let mut y = start.position.y;
    if edge.moves_left() {
        x = start.position.x + (start.size.width - width);
        if x < 0.0 {
            width += x;
            x = 0.0;
        }
    }
    if edge.moves_top() {
        y = start.position.y + (start.size.height - height);
        if y < 0.0 {
            height += y;
            y = 0.0;
        }
    }

    width = width.min(screen.width - x);
    height = height.min(screen.usable_height() - y);
    (Point::new(x, y), Size::new(width, height))
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Drag {
        id: WindowId,
        offset: Point,
    },
    Resize {
        id: WindowId,
        edge: ResizeEdge,
        start: ResizeStart,
    },
}

/// What a pointer-down landed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerDown {
    /// No visible window under the pointer.
    Desktop,
    Window { id: WindowId, hit: FrameHit },
}

/// Per-desktop gesture tracker. At most one drag or resize is in flight.
#[derive(Debug, Default)]
pub struct FrameInteraction {
    gesture: Option<Gesture>,
    metrics: FrameMetrics,
}

impl FrameInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: FrameMetrics) -> Self {
        Self {
            gesture: None,
            metrics,
        }
    }

    pub fn metrics(&self) -> &FrameMetrics {
        &self.metrics
    }

    pub fn is_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// The window under `point`: the highest visible one whose rendered
    /// bounds contain it.
    pub fn window_at<C>(wm: &WindowManager<C>, point: Point) -> Option<WindowId> {
        let screen = wm.screen();
        wm.stacking_order().into_iter().rev().find(|id| {
            wm.window(*id).is_some_and(|window| {
                !window.is_minimized() && window.rendered_bounds(&screen).contains(point)
            })
        })
    }

    /// Press on the topmost window under `point`. The window is focused
    /// first; then a button acts, a header grab starts a drag and a grip
    /// starts a resize. Maximized windows neither drag nor resize.
    pub fn pointer_down<C>(&mut self, wm: &mut WindowManager<C>, point: Point) -> PointerDown {
        self.gesture = None;
        let Some(id) = Self::window_at(wm, point) else {
            return PointerDown::Desktop;
        };
        wm.focus_window(id);
        let screen = wm.screen();
        let Some(window) = wm.window(id) else {
            return PointerDown::Desktop;
        };
        let maximized = window.is_maximized();
        let position = window.position();
        let size = window.size();
        let bounds = window.rendered_bounds(&screen);
        let Some(hit) = hit_test(bounds, point, !maximized, &self.metrics) else {
            return PointerDown::Desktop;
        };

        match hit {
            FrameHit::Button(HeaderButton::Minimize) => wm.minimize_window(id),
            FrameHit::Button(HeaderButton::Maximize) => wm.maximize_window(id),
            FrameHit::Button(HeaderButton::Close) => {
                wm.close_window(id);
            }
            FrameHit::Header if !maximized => {
                tracing::trace!(window_id = %id, "drag start");
                self.gesture = Some(Gesture::Drag {
                    id,
                    offset: Point::new(point.x - position.x, point.y - position.y),
                });
            }
            FrameHit::Resize(edge) => {
                tracing::trace!(window_id = %id, ?edge, "resize start");
                self.gesture = Some(Gesture::Resize {
                    id,
                    edge,
                    start: ResizeStart {
                        pointer: point,
                        position,
                        size,
                    },
                });
            }
            FrameHit::Header | FrameHit::Body => {}
        }
        PointerDown::Window { id, hit }
    }

    /// Continue the active gesture. Returns `true` when a gesture consumed
    /// the move.
    pub fn pointer_move<C>(&mut self, wm: &mut WindowManager<C>, point: Point) -> bool {
        let Some(gesture) = self.gesture else {
            return false;
        };
        let screen = wm.screen();
        match gesture {
            Gesture::Drag { id, offset } => {
                let Some(window) = wm.window(id) else {
                    self.gesture = None;
                    return false;
                };
                if window.is_maximized() {
                    return true;
                }
                let rendered = window.rendered_bounds(&screen).size;
                let next = drag_position(point, offset, rendered, &screen);
                wm.update_window_position(id, next);
            }
            Gesture::Resize { id, edge, start } => {
                let Some(window) = wm.window(id) else {
                    self.gesture = None;
                    return false;
                };
                if window.is_maximized() {
                    return true;
                }
                let (position, size) = resize_geometry(start, edge, point, &screen);
                wm.update_window_position(id, position);
                wm.update_window_size(id, size);
            }
        }
        true
    }

    /// End any gesture. Returns `true` if one was active.
    pub fn pointer_up(&mut self) -> bool {
        self.gesture.take().is_some()
    }
}
