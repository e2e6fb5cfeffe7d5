//! Enum-keyed chrome styles.
//!
//! Docking a window re-skins it. The skin is chosen by looking up a
//! [`WindowStyle`] key in a [`StyleTable`].

use enum_map::{Enum, EnumMap, enum_map};
use ratatui::style::{Modifier, Style};

use crate::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum WindowStyle {
    Floating,
    Docked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeStyle {
    pub header: Style,
    pub border: Style,
    pub sizer: Style,
    pub close: Style,
    /// Whether the outer border is drawn. Docked windows butt against their
    /// neighbours and skip it.
    pub framed: bool,
}

#[derive(Debug, Clone)]
pub struct StyleTable {
    styles: EnumMap<WindowStyle, ChromeStyle>,
}

impl Default for StyleTable {
    fn default() -> Self {
        let border = Style::default().fg(theme::border());
        Self {
            styles: enum_map! {
                WindowStyle::Floating => ChromeStyle {
                    header: Style::default()
                        .bg(theme::header_bg())
                        .fg(theme::header_fg())
                        .add_modifier(Modifier::BOLD),
                    border,
                    sizer: Style::default().fg(theme::sizer_fg()),
                    close: Style::default()
                        .bg(theme::header_bg())
                        .fg(theme::close_fg())
                        .add_modifier(Modifier::BOLD),
                    framed: true,
                },
                WindowStyle::Docked => ChromeStyle {
                    header: Style::default()
                        .bg(theme::docked_header_bg())
                        .fg(theme::docked_header_fg()),
                    border,
                    sizer: Style::default().fg(theme::sizer_fg()),
                    close: Style::default()
                        .bg(theme::docked_header_bg())
                        .fg(theme::close_fg()),
                    framed: false,
                },
            },
        }
    }
}

impl StyleTable {
    pub fn get(&self, key: WindowStyle) -> &ChromeStyle {
        &self.styles[key]
    }

    pub fn set(&mut self, key: WindowStyle, style: ChromeStyle) {
        self.styles[key] = style;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docked_and_floating_differ() {
        let table = StyleTable::default();
        assert!(table.get(WindowStyle::Floating).framed);
        assert!(!table.get(WindowStyle::Docked).framed);
        assert_ne!(
            table.get(WindowStyle::Floating).header,
            table.get(WindowStyle::Docked).header
        );
    }

    #[test]
    fn set_overrides_one_entry() {
        let mut table = StyleTable::default();
        let mut docked = *table.get(WindowStyle::Docked);
        docked.framed = true;
        table.set(WindowStyle::Docked, docked);
        assert!(table.get(WindowStyle::Docked).framed);
        assert!(table.get(WindowStyle::Floating).framed);
    }
}
