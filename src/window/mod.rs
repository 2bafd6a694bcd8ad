pub mod frame;
mod window_manager;

use std::fmt;

use crate::constants::{DEFAULT_SCREEN_HEIGHT, DEFAULT_SCREEN_WIDTH, DOCK_HEIGHT};

pub use frame::{FrameHit, FrameInteraction, FrameMetrics, HeaderButton, PointerDown, ResizeEdge};
pub use window_manager::{WindowEvent, WindowManager};

/// Screen-space point in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle: origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub origin: Point,
    pub size: Size,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn right(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x < self.right()
            && point.y >= self.origin.y
            && point.y < self.bottom()
    }
}

/// The area windows live in. The bottom `dock_height` pixels belong to the
/// dock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Screen {
    pub width: f64,
    pub height: f64,
    pub dock_height: f64,
}

impl Default for Screen {
    fn default() -> Self {
        Self {
            width: DEFAULT_SCREEN_WIDTH,
            height: DEFAULT_SCREEN_HEIGHT,
            dock_height: DOCK_HEIGHT,
        }
    }
}

impl Screen {
    pub fn new(width: f64, height: f64, dock_height: f64) -> Self {
        Self {
            width,
            height,
            dock_height,
        }
    }

    /// Height available above the dock.
    pub fn usable_height(&self) -> f64 {
        (self.height - self.dock_height).max(0.0)
    }

    /// The full area above the dock; where maximized windows render.
    pub fn work_area(&self) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, self.usable_height())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window-{}", self.0)
    }
}

/// What a caller asks for when opening a window.
#[derive(Debug, Clone)]
pub struct WindowSpec<C> {
    pub title: String,
    pub content: C,
    pub position: Point,
    pub size: Size,
}

/// One open window. Geometry is only mutated through the
/// [`WindowManager`], which keeps every field finite and non-negative.
#[derive(Debug)]
pub struct WindowRecord<C> {
    id: WindowId,
    title: String,
    content: C,
    is_minimized: bool,
    is_maximized: bool,
    position: Point,
    size: Size,
    z_index: u64,
}

impl<C> WindowRecord<C> {
    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    pub fn is_minimized(&self) -> bool {
        self.is_minimized
    }

    pub fn is_maximized(&self) -> bool {
        self.is_maximized
    }

    /// Stored position; a maximized window still remembers it.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    /// Where the window is drawn on `screen`. Maximized windows fill the
    /// work area; others keep their stored geometry, cut off at the right
    /// screen edge and at the dock.
    pub fn rendered_bounds(&self, screen: &Screen) -> Bounds {
        if self.is_maximized {
            return screen.work_area();
        }
        let Point { x, y } = self.position;
        Bounds::new(
            x,
            y,
            self.size.width.min((screen.width - x).max(0.0)),
            self.size.height.min((screen.usable_height() - y).max(0.0)),
        )
    }
}
