//! Shared crate-wide constants.

/// Absolute path that a leading `~` expands to.
pub const HOME_DIR: &str = "/home/developer";

/// Working directory a fresh shell starts in, and where `cd` with no
/// operand returns to.
pub const INITIAL_CWD: &str = "/home/developer/portfolio";

pub const DEFAULT_USER: &str = "developer";
pub const DEFAULT_HOSTNAME: &str = "ubuntu";

/// Default logical screen size in pixels, used until the host reports the
/// real one.
pub const DEFAULT_SCREEN_WIDTH: f64 = 1920.0;
pub const DEFAULT_SCREEN_HEIGHT: f64 = 1080.0;

/// Vertical band at the bottom of the screen reserved for the dock. No
/// window may be dragged or resized into it.
///
/// Units: pixels.
pub const DOCK_HEIGHT: f64 = 64.0;

/// Minimum size enforced on every size update and every resize gesture.
pub const MIN_WINDOW_WIDTH: f64 = 300.0;
pub const MIN_WINDOW_HEIGHT: f64 = 200.0;

/// Smallest distance from the top/left screen edge that a newly opened
/// window is placed at.
pub const OPEN_MARGIN: f64 = 50.0;

/// Geometry substituted for non-finite fields in an open request.
pub const DEFAULT_WINDOW_X: f64 = 100.0;
pub const DEFAULT_WINDOW_Y: f64 = 100.0;
pub const DEFAULT_WINDOW_WIDTH: f64 = 800.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 600.0;

/// Each already-open window pushes the next one this far right and down.
/// The horizontal offset wraps at `CASCADE_WRAP_X`, the vertical one at
/// `CASCADE_WRAP_Y`.
pub const CASCADE_STEP: f64 = 30.0;
pub const CASCADE_WRAP_X: f64 = 300.0;
pub const CASCADE_WRAP_Y: f64 = 200.0;

/// First z-index handed out. Every open and every focus takes the next
/// value, so z-indices are never reused within a session.
pub const INITIAL_Z_INDEX: u64 = 1000;

/// Height of the draggable title bar at the top of each window frame.
pub const HEADER_HEIGHT: f64 = 32.0;

/// Square corner grips and edge strips used for resize hit-testing.
pub const RESIZE_CORNER: f64 = 8.0;
pub const RESIZE_EDGE: f64 = 4.0;

/// Width of each title-bar button (minimize, maximize, close), laid out
/// right-to-left from the frame's right edge.
pub const HEADER_BUTTON_WIDTH: f64 = 24.0;
