use std::fmt;

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};

use crate::ui::UiFrame;

/// The single widget a window body hosts. Its name becomes the window
/// title.
pub trait Content: fmt::Debug {
    fn name(&self) -> &str;

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect);
}

/// Pass-through container for at most one piece of content.
#[derive(Debug, Default)]
pub struct WindowBody {
    content: Option<Box<dyn Content>>,
}

impl WindowBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> Option<&dyn Content> {
        self.content.as_deref()
    }

    pub fn content_mut(&mut self) -> Option<&mut (dyn Content + 'static)> {
        self.content.as_deref_mut()
    }

    /// Replace the content, handing back what was there before.
    pub fn set_content(&mut self, content: Box<dyn Content>) -> Option<Box<dyn Content>> {
        self.content.replace(content)
    }
}

/// Static lines of text.
#[derive(Debug, Clone)]
pub struct TextContent {
    name: String,
    lines: Vec<String>,
}

impl TextContent {
    pub fn new<I, S>(name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Content for TextContent {
    fn name(&self) -> &str {
        &self.name
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        let lines: Vec<Line> = self.lines.iter().map(|l| Line::raw(l.as_str())).collect();
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
    }
}
