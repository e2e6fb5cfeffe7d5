use ratatui::style::Modifier;
use ratatui::widgets::{Block, Clear, Paragraph};

use super::Window;
use crate::frame::{Bounds, Opacity};
use crate::style::StyleTable;
use crate::ui::UiFrame;

const CLOSE_GLYPH: &str = "[x]";
const CLOSE_WIDTH: f32 = 3.0;
const SEPARATOR_GLYPH: &str = "│";

/// Which piece of a window's chrome lies under a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromePart {
    Header,
    Close,
    Sizer,
    Body,
}

/// Absolute rectangles of a window's chrome parts. Shared by rendering and
/// hit-testing so both always agree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeLayout {
    pub outer: Bounds,
    pub header: Option<Bounds>,
    pub close: Option<Bounds>,
    pub body: Bounds,
    pub sizer: Option<Bounds>,
}

impl ChromeLayout {
    pub fn new(
        outer: Bounds,
        framed: bool,
        header_visible: bool,
        close_visible: bool,
        sizer_visible: bool,
    ) -> Self {
        let inner = if framed && outer.width >= 2.0 && outer.height >= 2.0 {
            Bounds::new(
                outer.x + 1.0,
                outer.y + 1.0,
                outer.width - 2.0,
                outer.height - 2.0,
            )
        } else {
            outer
        };
        let header = (header_visible && inner.height >= 1.0)
            .then(|| Bounds::new(inner.x, inner.y, inner.width, 1.0));
        let close = header
            .filter(|h| close_visible && h.width >= CLOSE_WIDTH)
            .map(|h| Bounds::new(h.right() - CLOSE_WIDTH, h.y, CLOSE_WIDTH, 1.0));
        let top = inner.y + if header.is_some() { 1.0 } else { 0.0 };
        let sizer = (sizer_visible && inner.bottom() - top >= 1.0)
            .then(|| Bounds::new(inner.x, inner.bottom() - 1.0, inner.width, 1.0));
        let bottom = sizer.map_or(inner.bottom(), |s| s.y);
        let body = Bounds::new(inner.x, top, inner.width, (bottom - top).max(0.0));
        Self {
            outer,
            header,
            close,
            body,
            sizer,
        }
    }

    pub fn for_window(window: &Window, styles: &StyleTable) -> Self {
        let header = window.header();
        Self::new(
            window.frame().bounds(),
            styles.get(window.style()).framed,
            header.is_visible(),
            header.close_button().is_some_and(|b| b.is_visible()),
            window.sizer().is_visible(),
        )
    }

    pub fn hit_test(&self, x: f32, y: f32) -> Option<ChromePart> {
        if !self.outer.contains(x, y) {
            return None;
        }
        if self.close.is_some_and(|b| b.contains(x, y)) {
            Some(ChromePart::Close)
        } else if self.header.is_some_and(|b| b.contains(x, y)) {
            Some(ChromePart::Header)
        } else if self.sizer.is_some_and(|b| b.contains(x, y)) {
            Some(ChromePart::Sizer)
        } else {
            Some(ChromePart::Body)
        }
    }
}

pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(&self, frame: &mut UiFrame<'_>, window: &mut Window, styles: &StyleTable);
}

#[derive(Debug, Default)]
pub struct DefaultDecorator;

impl WindowDecorator for DefaultDecorator {
    fn render_window(&self, frame: &mut UiFrame<'_>, window: &mut Window, styles: &StyleTable) {
        let area = frame.area();
        let style = *styles.get(window.style());
        let layout = ChromeLayout::for_window(window, styles);
        let Some(outer) = layout.outer.clip_to(area) else {
            return;
        };

        // A lifted window is see-through: outline only.
        if window.frame().opacity() == Opacity::Void {
            frame.render_widget(
                Block::bordered().border_style(style.border.add_modifier(Modifier::DIM)),
                outer,
            );
            return;
        }

        frame.render_widget(Clear, outer);
        if style.framed {
            frame.render_widget(Block::bordered().border_style(style.border), outer);
        }
        if let Some(header) = layout.header.and_then(|b| b.clip_to(area)) {
            frame.render_widget(
                Paragraph::new(window.title()).style(style.header).centered(),
                header,
            );
        }
        if let Some(close) = layout.close {
            if window.header().has_separator()
                && let Some(sep) =
                    Bounds::new(close.x - 1.0, close.y, 1.0, 1.0).clip_to(area)
            {
                frame.render_widget(Paragraph::new(SEPARATOR_GLYPH).style(style.header), sep);
            }
            if let Some(close) = close.clip_to(area) {
                frame.render_widget(Paragraph::new(CLOSE_GLYPH).style(style.close), close);
            }
        }
        if let Some(sizer) = layout.sizer.and_then(|b| b.clip_to(area)) {
            frame.render_widget(
                Paragraph::new(sizer_line(sizer.width)).style(style.sizer),
                sizer,
            );
        }
        if let Some(body) = layout.body.clip_to(area)
            && let Some(content) = window.content_mut()
        {
            content.render(frame, body);
        }
    }
}

fn sizer_line(width: u16) -> String {
    match width {
        0 => String::new(),
        1 => "◢".to_string(),
        w => format!("◣{}◢", "┄".repeat(w as usize - 2)),
    }
}
