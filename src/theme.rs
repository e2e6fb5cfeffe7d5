use ratatui::style::Color;

// Centralized chrome colors. Kept as small helpers so the style table and
// the dock renderer agree on one palette.

pub const ACCENT_RGB: (u8, u8, u8) = (200, 100, 0);

pub fn accent() -> Color {
    Color::Rgb(ACCENT_RGB.0, ACCENT_RGB.1, ACCENT_RGB.2)
}

// Floating window chrome
pub fn header_bg() -> Color {
    Color::Blue
}
pub fn header_fg() -> Color {
    Color::White
}
pub fn border() -> Color {
    Color::DarkGray
}
pub fn sizer_fg() -> Color {
    Color::Gray
}

// Docked window chrome
pub fn docked_header_bg() -> Color {
    Color::DarkGray
}
pub fn docked_header_fg() -> Color {
    Color::White
}

// Dock sections
pub fn dock_bg() -> Color {
    Color::Black
}
pub fn dock_outline() -> Color {
    Color::DarkGray
}

// Close control
pub fn close_fg() -> Color {
    accent()
}
