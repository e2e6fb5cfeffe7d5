pub mod body;
pub mod decorator;
pub mod header;
pub mod sizer;

use std::fmt;

use crate::dock::{DockHost, SectionId};
use crate::error::ChromeError;
use crate::frame::{Dim, Frame, LayerStack, Size};
use crate::style::WindowStyle;
use crate::surface::RootSurface;

pub use body::{Content, TextContent, WindowBody};
pub use decorator::{ChromeLayout, ChromePart, DefaultDecorator, WindowDecorator};
pub use header::{ChromeAction, CloseButton, HeaderDrag, WindowHeader};
pub use sizer::{ResizeDrag, WindowSizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFlags {
    pub closable: bool,
    pub dockable: bool,
    pub movable: bool,
    pub sizable: bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self {
            closable: true,
            dockable: true,
            movable: true,
            sizable: true,
        }
    }
}

/// Notified once, right before a window is dropped.
pub type CloseCallback = Box<dyn FnOnce(WindowId)>;

/// Collaborators a gesture needs while it mutates a window.
pub struct ChromeContext<'a> {
    pub surface: &'a dyn RootSurface,
    pub docks: &'a mut dyn DockHost,
    pub layers: &'a mut LayerStack,
}

/// A draggable, resizable, dockable window.
///
/// The window is either floating (`dock` is `None`) or docked in a section
/// of a [`DockHost`]. [`Window::dock`], [`Window::undock`] and
/// [`Window::close`] are the only transitions; keeping the docked style and
/// the hidden sizer in step with `dock` is their job.
pub struct Window {
    id: WindowId,
    name: String,
    flags: WindowFlags,
    frame: Frame,
    dock: Option<SectionId>,
    style: WindowStyle,
    header: WindowHeader,
    body: WindowBody,
    footer: WindowSizer,
    on_close: Option<CloseCallback>,
}

impl fmt::Debug for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("flags", &self.flags)
            .field("frame", &self.frame)
            .field("dock", &self.dock)
            .field("style", &self.style)
            .field("has_on_close", &self.on_close.is_some())
            .finish()
    }
}

impl Window {
    /// Create a floating window with a fresh layer on top of `layers`.
    pub fn new(
        id: WindowId,
        title: impl Into<String>,
        closable: bool,
        dockable: bool,
        size: Size,
        layers: &mut LayerStack,
    ) -> Self {
        let name = title.into();
        let flags = WindowFlags {
            closable,
            dockable,
            ..WindowFlags::default()
        };
        Self {
            id,
            header: WindowHeader::new(id, &name, closable),
            body: WindowBody::new(),
            footer: WindowSizer::new(),
            name,
            flags,
            frame: Frame::new(layers.allocate(), size),
            dock: None,
            style: WindowStyle::Floating,
            on_close: None,
        }
    }

    pub fn with_on_close(mut self, on_close: impl FnOnce(WindowId) + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Display name; attached content names the window.
    pub fn name(&self) -> &str {
        self.body
            .content()
            .map(|content| content.name())
            .unwrap_or(self.name.as_str())
    }

    /// Text currently shown in the title bar.
    pub fn title(&self) -> &str {
        self.header.title()
    }

    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    pub fn dock_section(&self) -> Option<SectionId> {
        self.dock
    }

    pub fn is_docked(&self) -> bool {
        self.dock.is_some()
    }

    pub fn style(&self) -> WindowStyle {
        self.style
    }

    pub fn header(&self) -> &WindowHeader {
        &self.header
    }

    pub fn body(&self) -> &WindowBody {
        &self.body
    }

    pub fn sizer(&self) -> &WindowSizer {
        &self.footer
    }

    pub fn content(&self) -> Option<&dyn Content> {
        self.body.content()
    }

    pub fn content_mut(&mut self) -> Option<&mut (dyn Content + 'static)> {
        self.body.content_mut()
    }

    /// First attach to the root surface: a floating window is centered.
    pub fn bind(&mut self, surface: &dyn RootSurface) {
        if self.dock.is_some() {
            return;
        }
        let root = surface.size();
        let x = (root.width / 2.0 - self.frame.size(Dim::X) / 2.0).floor();
        let y = (root.height / 2.0 - self.frame.size(Dim::Y) / 2.0).floor();
        self.frame.set_position(x, y);
    }

    /// Attach `content`, retitling the header after it. Any previously
    /// attached content is handed back.
    pub fn vappend(&mut self, content: Box<dyn Content>) -> Option<Box<dyn Content>> {
        self.header.set_title(content.name());
        self.body.set_content(content)
    }

    pub fn toggle_closable(&mut self) {
        if let Some(button) = self.header.close_button_mut() {
            if button.is_visible() {
                button.hide();
            } else {
                button.show();
            }
        }
    }

    pub fn toggle_movable(&mut self) {
        self.flags.movable = !self.flags.movable;
    }

    /// Flip `sizable`. The sizer only reappears while floating; a docked
    /// window picks it up again on undock.
    pub fn toggle_resizable(&mut self) {
        self.flags.sizable = !self.flags.sizable;
        if self.flags.sizable && self.dock.is_none() {
            self.footer.show();
        } else {
            self.footer.hide();
        }
    }

    pub fn show_titlebar(&mut self) {
        self.header.show();
    }

    pub fn hide_titlebar(&mut self) {
        self.header.hide();
    }

    /// Dock into `target`. Fails without side effects if already docked.
    pub fn dock(&mut self, target: SectionId, host: &mut dyn DockHost) -> Result<(), ChromeError> {
        if let Some(section) = self.dock {
            tracing::warn!(window = %self.id, %section, %target, "dock rejected: already docked");
            return Err(ChromeError::AlreadyDocked {
                window: self.id,
                section,
            });
        }
        self.docked();
        self.dock = Some(target);
        if let Err(err) = host.dock(target, self.id, &mut self.frame) {
            tracing::warn!(window = %self.id, %target, error = %err, "dock host refused window");
            self.dock = None;
            self.floating_chrome();
            return Err(err);
        }
        tracing::debug!(window = %self.id, section = %target, "docked window");
        Ok(())
    }

    /// Release the window from its dock host and float it in place, on top.
    pub fn undock(
        &mut self,
        host: &mut dyn DockHost,
        layers: &mut LayerStack,
    ) -> Result<(), ChromeError> {
        let Some(section) = self.dock else {
            tracing::warn!(window = %self.id, "undock rejected: not docked");
            return Err(ChromeError::NotDocked(self.id));
        };
        host.undock(section, self.id, &mut self.frame)?;
        self.dock = None;
        self.undocked(layers);
        tracing::debug!(window = %self.id, %section, "undocked window");
        Ok(())
    }

    fn docked(&mut self) {
        self.style = WindowStyle::Docked;
        if self.flags.sizable {
            self.footer.hide();
        }
    }

    fn undocked(&mut self, layers: &mut LayerStack) {
        self.floating_chrome();
        self.frame.reanchor_to_root();
        self.frame.move_to_top(layers);
    }

    fn floating_chrome(&mut self) {
        self.style = WindowStyle::Floating;
        if self.flags.sizable {
            self.footer.show();
        }
    }

    /// Close and drop the window. A docked window is released from its host
    /// first; `on_close` fires exactly once either way.
    pub fn close(mut self, host: &mut dyn DockHost, layers: &mut LayerStack) {
        if let Some(section) = self.dock.take()
            && let Err(err) = host.undock(section, self.id, &mut self.frame)
        {
            tracing::warn!(window = %self.id, %section, error = %err, "dock host did not hold closing window");
        }
        if let Some(on_close) = self.on_close.take() {
            on_close(self.id);
        }
        layers.remove(self.frame.layer());
        tracing::debug!(window = %self.id, "closed window");
    }

    /// Raise on click unless docked; docked windows keep the host's order.
    pub fn left_click(&self, layers: &mut LayerStack) -> bool {
        if self.dock.is_none() {
            self.frame.move_to_top(layers);
        }
        true
    }

    pub fn right_click(&self, layers: &mut LayerStack) -> bool {
        self.left_click(layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock::Dockspace;
    use crate::frame::{Bounds, Opacity, Point};
    use crate::surface::WidgetTree;
    use std::cell::Cell;
    use std::rc::Rc;

    fn window(layers: &mut LayerStack) -> Window {
        Window::new(
            WindowId::new(1),
            "Log",
            true,
            true,
            Size::new(20.0, 30.0),
            layers,
        )
    }

    fn assert_mode_consistent(w: &Window) {
        let docked = w.dock_section().is_some();
        assert_eq!(docked, w.style() == WindowStyle::Docked);
        if w.flags().sizable {
            assert_eq!(docked, !w.sizer().is_visible());
        }
    }

    #[test]
    fn new_window_floats() {
        let mut layers = LayerStack::new();
        let w = window(&mut layers);
        assert!(!w.is_docked());
        assert!(w.sizer().is_visible());
        assert!(w.header().close_button().is_some());
        assert_eq!(w.frame().opacity(), Opacity::Opaque);
        assert!(layers.is_top(w.frame().layer()));
        assert_mode_consistent(&w);
    }

    #[test]
    fn bind_centers_floating_window() {
        let mut layers = LayerStack::new();
        let mut w = window(&mut layers);
        let surface = WidgetTree::new(Size::new(100.0, 50.0));
        w.bind(&surface);
        assert_eq!(w.frame().position(Dim::X), 40.0);
        assert_eq!(w.frame().position(Dim::Y), 10.0);
    }

    #[test]
    fn dock_and_undock_keep_mode_consistent() {
        let mut layers = LayerStack::new();
        let mut host = Dockspace::new(Bounds::new(0.0, 0.0, 30.0, 40.0));
        let mut w = window(&mut layers);
        let root = host.root();

        w.dock(root, &mut host).unwrap();
        assert_eq!(w.dock_section(), Some(root));
        assert_mode_consistent(&w);
        assert_eq!(host.windows(root), &[w.id()]);

        w.undock(&mut host, &mut layers).unwrap();
        assert!(!w.is_docked());
        assert_mode_consistent(&w);
        assert!(host.windows(root).is_empty());
    }

    #[test]
    fn undock_keeps_screen_position_and_raises() {
        let mut layers = LayerStack::new();
        let mut host = Dockspace::new(Bounds::new(12.0, 3.0, 30.0, 40.0));
        let mut w = window(&mut layers);
        let other = layers.allocate();
        w.dock(host.root(), &mut host).unwrap();
        let before = w.frame().bounds();

        w.undock(&mut host, &mut layers).unwrap();
        assert_eq!(w.frame().origin(), Point::ORIGIN);
        assert_eq!(w.frame().position(Dim::X), before.x);
        assert_eq!(w.frame().position(Dim::Y), before.y);
        assert!(layers.is_top(w.frame().layer()));
        assert_eq!(layers.depth(other), Some(0));
    }

    #[test]
    fn invalid_transitions_fail_loudly() {
        let mut layers = LayerStack::new();
        let mut host = Dockspace::new(Bounds::new(0.0, 0.0, 30.0, 40.0));
        let mut w = window(&mut layers);
        let root = host.root();
        assert_eq!(
            w.undock(&mut host, &mut layers),
            Err(ChromeError::NotDocked(w.id()))
        );
        w.dock(root, &mut host).unwrap();
        assert_eq!(
            w.dock(root, &mut host),
            Err(ChromeError::AlreadyDocked {
                window: w.id(),
                section: root
            })
        );
        assert_eq!(host.windows(root).len(), 1);
        assert_mode_consistent(&w);
    }

    #[test]
    fn refused_dock_rolls_back() {
        let mut layers = LayerStack::new();
        let mut host = Dockspace::new(Bounds::new(0.0, 0.0, 40.0, 40.0));
        let root = host.root();
        let mut occupant = window(&mut layers);
        occupant.dock(root, &mut host).unwrap();
        // splitting turns the old root into a container that cannot hold windows
        host.docktarget(root, 39.0, 20.0).unwrap();
        let container = host.root();

        let mut w = Window::new(
            WindowId::new(2),
            "Other",
            true,
            true,
            Size::new(20.0, 30.0),
            &mut layers,
        );
        assert_eq!(
            w.dock(container, &mut host),
            Err(ChromeError::UnknownSection(container))
        );
        assert!(!w.is_docked());
        assert_mode_consistent(&w);
    }

    #[test]
    fn undocked_shows_sizer_only_when_sizable() {
        let mut layers = LayerStack::new();
        let mut host = Dockspace::new(Bounds::new(0.0, 0.0, 30.0, 40.0));

        let mut sizable = window(&mut layers);
        sizable.dock(host.root(), &mut host).unwrap();
        assert!(!sizable.sizer().is_visible());
        sizable.undock(&mut host, &mut layers).unwrap();
        assert!(sizable.sizer().is_visible());

        let mut fixed = Window::new(
            WindowId::new(2),
            "Fixed",
            false,
            true,
            Size::new(20.0, 30.0),
            &mut layers,
        );
        fixed.toggle_resizable();
        assert!(!fixed.sizer().is_visible());
        fixed.dock(host.root(), &mut host).unwrap();
        fixed.undock(&mut host, &mut layers).unwrap();
        assert!(!fixed.sizer().is_visible());
    }

    #[test]
    fn toggle_resizable_while_docked_keeps_sizer_hidden() {
        let mut layers = LayerStack::new();
        let mut host = Dockspace::new(Bounds::new(0.0, 0.0, 30.0, 40.0));
        let mut w = window(&mut layers);
        w.dock(host.root(), &mut host).unwrap();
        w.toggle_resizable();
        w.toggle_resizable();
        assert!(w.flags().sizable);
        assert!(!w.sizer().is_visible());
        w.undock(&mut host, &mut layers).unwrap();
        assert!(w.sizer().is_visible());
    }

    #[test]
    fn close_fires_callback_once() {
        let mut layers = LayerStack::new();
        let mut host = Dockspace::default();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let mut w = window(&mut layers).with_on_close(move |_| counter.set(counter.get() + 1));
        w.vappend(Box::new(TextContent::new("Console", ["hello"])));
        let layer = w.frame().layer();
        w.close(&mut host, &mut layers);
        assert_eq!(fired.get(), 1);
        assert_eq!(layers.depth(layer), None);
    }

    #[test]
    fn close_without_content_fires_callback_once() {
        let mut layers = LayerStack::new();
        let mut host = Dockspace::default();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let w = window(&mut layers).with_on_close(move |_| counter.set(counter.get() + 1));
        assert!(w.content().is_none());
        let layer = w.frame().layer();
        w.close(&mut host, &mut layers);
        assert_eq!(fired.get(), 1);
        assert_eq!(layers.depth(layer), None);
    }

    #[test]
    fn close_without_callback_or_content() {
        let mut layers = LayerStack::new();
        let mut host = Dockspace::default();
        let w = window(&mut layers);
        w.close(&mut host, &mut layers);
        assert!(layers.is_empty());
    }

    #[test]
    fn closing_docked_window_releases_host() {
        let mut layers = LayerStack::new();
        let mut host = Dockspace::new(Bounds::new(0.0, 0.0, 30.0, 40.0));
        let root = host.root();
        let mut w = window(&mut layers);
        w.dock(root, &mut host).unwrap();
        w.close(&mut host, &mut layers);
        assert!(host.windows(root).is_empty());
    }

    #[test]
    fn vappend_renames_and_returns_previous_content() {
        let mut layers = LayerStack::new();
        let mut w = window(&mut layers);
        assert_eq!(w.name(), "Log");
        assert!(w.vappend(Box::new(TextContent::new("Inspector", ["a"]))).is_none());
        assert_eq!(w.name(), "Inspector");
        assert_eq!(w.title(), "Inspector");
        let previous = w.vappend(Box::new(TextContent::new("Console", ["b"])));
        assert_eq!(previous.map(|c| c.name().to_string()), Some("Inspector".into()));
        assert_eq!(w.title(), "Console");
    }

    #[test]
    fn clicks_raise_only_floating_windows() {
        let mut layers = LayerStack::new();
        let mut host = Dockspace::new(Bounds::new(0.0, 0.0, 30.0, 40.0));
        let mut w = window(&mut layers);
        let other = layers.allocate();
        assert!(w.left_click(&mut layers));
        assert!(layers.is_top(w.frame().layer()));

        w.dock(host.root(), &mut host).unwrap();
        layers.move_to_top(other);
        assert!(w.right_click(&mut layers));
        assert!(layers.is_top(other));
    }

    #[test]
    fn toggles_flip_flags_and_visibility() {
        let mut layers = LayerStack::new();
        let mut w = window(&mut layers);
        w.toggle_movable();
        assert!(!w.flags().movable);
        w.toggle_closable();
        assert!(!w.header().close_button().unwrap().is_visible());
        w.toggle_closable();
        assert!(w.header().close_button().unwrap().is_visible());
        w.hide_titlebar();
        assert!(!w.header().is_visible());
        w.show_titlebar();
        assert!(w.header().is_visible());

        let mut plain = Window::new(
            WindowId::new(3),
            "Plain",
            false,
            false,
            Size::new(10.0, 25.0),
            &mut layers,
        );
        plain.toggle_closable();
        assert!(plain.header().close_button().is_none());
    }
}
