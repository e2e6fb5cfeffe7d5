//! Shared crate-wide constants.

/// Smallest width (in columns) a sizer drag may shrink a window to.
pub const MIN_WINDOW_WIDTH: f32 = 10.0;

/// Smallest height (in rows) a sizer drag may shrink a window to.
///
/// Height always grows downward from the sizer, so this floor is applied
/// to both left-edge and right-edge gestures alike.
pub const MIN_WINDOW_HEIGHT: f32 = 25.0;

/// Fraction of a window's width that counts as its left half when a sizer
/// gesture starts. Presses at or left of this point resize from the left
/// edge.
pub const SIZER_LEFT_FRACTION: f32 = 0.5;

/// Fraction of a dock section's width/height treated as an edge zone when
/// choosing where a dropped window lands.
pub const DOCK_EDGE_THRESHOLD: f32 = 0.25;

/// Default size given to freshly opened windows.
pub const DEFAULT_WINDOW_WIDTH: f32 = 40.0;
pub const DEFAULT_WINDOW_HEIGHT: f32 = 25.0;
