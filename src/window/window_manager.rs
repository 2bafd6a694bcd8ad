use crate::constants::{
    CASCADE_STEP, CASCADE_WRAP_X, CASCADE_WRAP_Y, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH,
    DEFAULT_WINDOW_X, DEFAULT_WINDOW_Y, INITIAL_Z_INDEX, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
    OPEN_MARGIN,
};

use super::{Point, Screen, Size, WindowId, WindowRecord, WindowSpec};

/// Change notifications, drained by the host with
/// [`WindowManager::take_events`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    Opened(WindowId),
    Closed(WindowId),
    Focused(WindowId),
    Minimized { id: WindowId, minimized: bool },
    Maximized { id: WindowId, maximized: bool },
    Moved(WindowId),
    Resized(WindowId),
    ScreenChanged(Screen),
}

/// Owns every open window. Focus is derived: the window with the highest
/// z-index is focused, there is no separate flag.
///
/// Every operation that takes a [`WindowId`] is a no-op when the id is not
/// open, so a late event for a closed window is harmless.
#[derive(Debug)]
pub struct WindowManager<C> {
    /// Open windows in creation order.
    windows: Vec<WindowRecord<C>>,
    screen: Screen,
    next_id: u64,
    next_z_index: u64,
    events: Vec<WindowEvent>,
}

impl<C> Default for WindowManager<C> {
    fn default() -> Self {
        Self::new(Screen::default())
    }
}

impl<C> WindowManager<C> {
    pub fn new(screen: Screen) -> Self {
        Self {
            windows: Vec::new(),
            screen,
            next_id: 1,
            next_z_index: INITIAL_Z_INDEX,
            events: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Later opens and gestures clamp against the new screen. Existing
    /// geometry is left as is.
    pub fn set_screen(&mut self, screen: Screen) {
        if self.screen == screen {
            return;
        }
        tracing::debug!(width = screen.width, height = screen.height, "screen changed");
        self.screen = screen;
        self.events.push(WindowEvent::ScreenChanged(screen));
    }

    pub fn windows(&self) -> &[WindowRecord<C>] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn window(&self, id: WindowId) -> Option<&WindowRecord<C>> {
        self.windows.iter().find(|window| window.id == id)
    }

    fn window_mut(&mut self, id: WindowId) -> Option<&mut WindowRecord<C>> {
        self.windows.iter_mut().find(|window| window.id == id)
    }

    pub fn content_mut(&mut self, id: WindowId) -> Option<&mut C> {
        self.window_mut(id).map(WindowRecord::content_mut)
    }

    /// The window with the highest z-index.
    pub fn focused(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .max_by_key(|window| window.z_index)
            .map(|window| window.id)
    }

    /// Window ids from bottom to top.
    pub fn stacking_order(&self) -> Vec<WindowId> {
        let mut order: Vec<&WindowRecord<C>> = self.windows.iter().collect();
        order.sort_by_key(|window| window.z_index);
        order.into_iter().map(|window| window.id).collect()
    }

    fn take_z_index(&mut self) -> u64 {
        let z_index = self.next_z_index;
        self.next_z_index += 1;
        z_index
    }

    /// Open a window on top of the stack.
    ///
    /// Non-finite position fields fall back to the default origin and
    /// non-finite or negative sizes to the default size, which is then held
    /// to the minimum window size. The origin is then
    /// cascaded by the number of open windows and clamped so the window
    /// starts on screen, above the dock and at least `OPEN_MARGIN` from the
    /// top-left corner.
    pub fn open_window(&mut self, spec: WindowSpec<C>) -> WindowId {
        let base = Point::new(
            finite_or(spec.position.x, DEFAULT_WINDOW_X),
            finite_or(spec.position.y, DEFAULT_WINDOW_Y),
        );
        let size = Size::new(
            extent_or(spec.size.width, DEFAULT_WINDOW_WIDTH).max(MIN_WINDOW_WIDTH),
            extent_or(spec.size.height, DEFAULT_WINDOW_HEIGHT).max(MIN_WINDOW_HEIGHT),
        );

        let open = self.windows.len() as f64;
        let offset_x = (open * CASCADE_STEP) % CASCADE_WRAP_X;
        let offset_y = (open * CASCADE_STEP) % CASCADE_WRAP_Y;
        // The margin wins when the window is wider or taller than the room left.
        let position = Point::new(
            (base.x + offset_x)
                .min(self.screen.width - size.width)
                .max(OPEN_MARGIN),
            (base.y + offset_y)
                .min(self.screen.usable_height() - size.height)
                .max(OPEN_MARGIN),
        );

        let id = WindowId(self.next_id);
        self.next_id += 1;
        let z_index = self.take_z_index();
        tracing::debug!(window_id = %id, title = %spec.title, z_index, ?position, ?size, "opened window");
        self.windows.push(WindowRecord {
            id,
            title: spec.title,
            content: spec.content,
            is_minimized: false,
            is_maximized: false,
            position,
            size,
            z_index,
        });
        self.events.push(WindowEvent::Opened(id));
        id
    }

    /// Remove a window, handing its content back to the caller.
    pub fn close_window(&mut self, id: WindowId) -> Option<C> {
        let idx = self.windows.iter().position(|window| window.id == id)?;
        let record = self.windows.remove(idx);
        tracing::debug!(window_id = %id, "closed window");
        self.events.push(WindowEvent::Closed(id));
        Some(record.content)
    }

    pub fn minimize_window(&mut self, id: WindowId) {
        let Some(window) = self.window_mut(id) else {
            return;
        };
        window.is_minimized = !window.is_minimized;
        let minimized = window.is_minimized;
        tracing::debug!(window_id = %id, minimized, "toggled minimize");
        self.events.push(WindowEvent::Minimized { id, minimized });
    }

    pub fn maximize_window(&mut self, id: WindowId) {
        let Some(window) = self.window_mut(id) else {
            return;
        };
        window.is_maximized = !window.is_maximized;
        let maximized = window.is_maximized;
        tracing::debug!(window_id = %id, maximized, "toggled maximize");
        self.events.push(WindowEvent::Maximized { id, maximized });
    }

    /// Raise a window above every other and restore it if minimized.
    pub fn focus_window(&mut self, id: WindowId) {
        if self.window(id).is_none() {
            return;
        }
        let z_index = self.take_z_index();
        if let Some(window) = self.window_mut(id) {
            window.z_index = z_index;
            window.is_minimized = false;
        }
        tracing::debug!(window_id = %id, z_index, "focused window");
        self.events.push(WindowEvent::Focused(id));
    }

    /// Store a new origin. Non-finite fields keep their previous value and
    /// negative ones become zero. Screen clamping belongs to the gesture.
    pub fn update_window_position(&mut self, id: WindowId, position: Point) {
        let Some(window) = self.window_mut(id) else {
            return;
        };
        let next = Point::new(
            finite_or(position.x, window.position.x).max(0.0),
            finite_or(position.y, window.position.y).max(0.0),
        );
        if next == window.position {
            return;
        }
        window.position = next;
        tracing::trace!(window_id = %id, x = next.x, y = next.y, "moved window");
        self.events.push(WindowEvent::Moved(id));
    }

    /// Store a new size. Non-finite fields keep their previous value, then
    /// the minimum size is enforced.
    pub fn update_window_size(&mut self, id: WindowId, size: Size) {
        let Some(window) = self.window_mut(id) else {
            return;
        };
        let next = Size::new(
            finite_or(size.width, window.size.width).max(MIN_WINDOW_WIDTH),
            finite_or(size.height, window.size.height).max(MIN_WINDOW_HEIGHT),
        );
        if next == window.size {
            return;
        }
        window.size = next;
        tracing::trace!(window_id = %id, width = next.width, height = next.height, "resized window");
        self.events.push(WindowEvent::Resized(id));
    }

    /// Drain pending change notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<WindowEvent> {
        std::mem::take(&mut self.events)
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

fn extent_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}
