//! Title bar: relocation and undock-by-drag.

use crate::dock::SectionId;
use crate::error::ChromeError;
use crate::frame::{Dim, Opacity};

use super::{ChromeContext, Window, WindowId};

/// Messages produced by chrome controls for whoever owns the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeAction {
    Close(WindowId),
}

/// Close control in the title bar. Activation asks the owner to close the
/// window; the button itself holds no other state.
#[derive(Debug, Clone)]
pub struct CloseButton {
    window: WindowId,
    visible: bool,
}

impl CloseButton {
    pub fn new(window: WindowId) -> Self {
        Self {
            window,
            visible: true,
        }
    }

    pub fn activate(&self) -> ChromeAction {
        ChromeAction::Close(self.window)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

#[derive(Debug, Clone)]
pub struct WindowHeader {
    title: String,
    separator: bool,
    close_button: Option<CloseButton>,
    visible: bool,
}

impl WindowHeader {
    pub fn new(window: WindowId, title: &str, closable: bool) -> Self {
        Self {
            title: title.to_string(),
            separator: true,
            close_button: closable.then(|| CloseButton::new(window)),
            visible: true,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn has_separator(&self) -> bool {
        self.separator
    }

    pub fn close_button(&self) -> Option<&CloseButton> {
        self.close_button.as_ref()
    }

    pub fn close_button_mut(&mut self) -> Option<&mut CloseButton> {
        self.close_button.as_mut()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// A header drag in progress.
///
/// [`HeaderDrag::begin`] lifts the window (undocking it first if needed)
/// and [`HeaderDrag::finish`] puts it down again, docking it when released
/// over a dock section. The lifted opacity lives exactly as long as this
/// value.
#[must_use = "a header drag must be finished to restore the window's opacity"]
#[derive(Debug)]
pub struct HeaderDrag {
    window: WindowId,
}

impl HeaderDrag {
    pub fn begin(window: &mut Window, ctx: &mut ChromeContext<'_>) -> Result<Self, ChromeError> {
        if window.is_docked() {
            window.undock(ctx.docks, ctx.layers)?;
        }
        window.frame_mut().set_opacity(Opacity::Void);
        window.frame().move_to_top(ctx.layers);
        Ok(Self {
            window: window.id(),
        })
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    /// Move the window by the pointer delta. Immovable windows stay put.
    pub fn update(&self, window: &mut Window, dx: f32, dy: f32) -> bool {
        if window.flags().movable {
            let frame = window.frame_mut();
            let x = frame.position(Dim::X) + dx;
            let y = frame.position(Dim::Y) + dy;
            frame.set_position(x, y);
        }
        true
    }

    /// Drop the window at `(x, y)`. Returns the section it docked into, if
    /// any. Opacity is restored whatever the outcome.
    pub fn finish(
        self,
        window: &mut Window,
        x: f32,
        y: f32,
        ctx: &mut ChromeContext<'_>,
    ) -> Result<Option<SectionId>, ChromeError> {
        let docked = Self::dock_at(window, x, y, ctx);
        window.frame_mut().set_opacity(Opacity::Opaque);
        docked
    }

    fn dock_at(
        window: &mut Window,
        x: f32,
        y: f32,
        ctx: &mut ChromeContext<'_>,
    ) -> Result<Option<SectionId>, ChromeError> {
        if !window.flags().dockable {
            return Ok(None);
        }
        let Some(section) = ctx.surface.docksection_at(x, y) else {
            return Ok(None);
        };
        let target = ctx.docks.docktarget(section, x, y)?;
        window.dock(target, ctx.docks)?;
        Ok(Some(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock::{DockHost, Dockspace};
    use crate::frame::{Bounds, LayerStack, Size};
    use crate::surface::{WidgetKind, WidgetTree};

    struct Scene {
        layers: LayerStack,
        docks: Dockspace,
        window: Window,
    }

    impl Scene {
        fn new(dockable: bool) -> Self {
            let mut layers = LayerStack::new();
            let docks = Dockspace::new(Bounds::new(0.0, 0.0, 20.0, 40.0));
            let mut window = Window::new(
                WindowId::new(7),
                "Log",
                true,
                dockable,
                Size::new(20.0, 30.0),
                &mut layers,
            );
            window.frame_mut().set_position(40.0, 5.0);
            Self {
                layers,
                docks,
                window,
            }
        }

        /// Root with one dock column on the left and the window wherever it
        /// currently is, see-through while lifted.
        fn surface(&self) -> WidgetTree {
            let mut tree = WidgetTree::new(Size::new(100.0, 40.0));
            let root = tree.root();
            let section = self.docks.root();
            let section_widget = tree.push(
                root,
                WidgetKind::Docksection(section),
                self.docks.bounds(section).unwrap_or_default(),
            );
            let parent = if self.window.is_docked() {
                section_widget
            } else {
                root
            };
            let kind = WidgetKind::Window(self.window.id());
            if self.window.frame().opacity() == Opacity::Void {
                tree.push_transparent(parent, kind, self.window.frame().bounds());
            } else {
                tree.push(parent, kind, self.window.frame().bounds());
            }
            tree
        }

        fn begin(&mut self) -> HeaderDrag {
            let surface = self.surface();
            let mut ctx = ChromeContext {
                surface: &surface,
                docks: &mut self.docks,
                layers: &mut self.layers,
            };
            HeaderDrag::begin(&mut self.window, &mut ctx).unwrap()
        }

        fn finish(&mut self, drag: HeaderDrag, x: f32, y: f32) -> Option<SectionId> {
            let surface = self.surface();
            let mut ctx = ChromeContext {
                surface: &surface,
                docks: &mut self.docks,
                layers: &mut self.layers,
            };
            drag.finish(&mut self.window, x, y, &mut ctx).unwrap()
        }
    }

    #[test]
    fn drag_over_nothing_stays_floating() {
        let mut scene = Scene::new(true);
        let other = scene.layers.allocate();
        let drag = scene.begin();
        assert_eq!(scene.window.frame().opacity(), Opacity::Void);
        assert!(scene.layers.is_top(scene.window.frame().layer()));
        assert_eq!(scene.layers.depth(other), Some(0));

        for _ in 0..3 {
            assert!(drag.update(&mut scene.window, 5.0, 0.0));
        }
        assert_eq!(scene.window.frame().position(Dim::X), 55.0);
        assert_eq!(scene.window.frame().position(Dim::Y), 5.0);

        assert_eq!(scene.finish(drag, 80.0, 10.0), None);
        assert!(!scene.window.is_docked());
        assert_eq!(scene.window.frame().opacity(), Opacity::Opaque);
    }

    #[test]
    fn drop_over_docksection_docks() {
        let mut scene = Scene::new(true);
        let drag = scene.begin();
        drag.update(&mut scene.window, -40.0, 0.0);
        let root = scene.docks.root();
        assert_eq!(scene.finish(drag, 10.0, 20.0), Some(root));
        assert_eq!(scene.window.dock_section(), Some(root));
        assert_eq!(scene.docks.windows(root), &[scene.window.id()]);
        assert_eq!(scene.window.frame().opacity(), Opacity::Opaque);
    }

    #[test]
    fn undockable_window_ignores_docksections() {
        let mut scene = Scene::new(false);
        let drag = scene.begin();
        assert_eq!(scene.finish(drag, 10.0, 20.0), None);
        assert!(!scene.window.is_docked());
        assert_eq!(scene.window.frame().opacity(), Opacity::Opaque);
    }

    #[test]
    fn dragging_docked_window_undocks_before_moving() {
        let mut scene = Scene::new(true);
        let root = scene.docks.root();
        scene.window.dock(root, &mut scene.docks).unwrap();
        let docked_at = scene.window.frame().bounds();

        let drag = scene.begin();
        assert!(!scene.window.is_docked());
        assert!(scene.docks.windows(root).is_empty());
        assert_eq!(scene.window.frame().bounds(), docked_at);

        drag.update(&mut scene.window, 30.0, 2.0);
        assert_eq!(scene.window.frame().position(Dim::X), docked_at.x + 30.0);
        assert_eq!(scene.window.frame().position(Dim::Y), docked_at.y + 2.0);
        assert_eq!(scene.finish(drag, 60.0, 20.0), None);
        assert!(!scene.window.is_docked());
    }

    #[test]
    fn redocking_after_drag_never_double_docks() {
        let mut scene = Scene::new(true);
        let root = scene.docks.root();
        scene.window.dock(root, &mut scene.docks).unwrap();
        let drag = scene.begin();
        assert_eq!(scene.finish(drag, 5.0, 5.0), Some(root));
        assert_eq!(scene.docks.windows(root), &[scene.window.id()]);
    }

    #[test]
    fn immovable_window_does_not_follow_pointer() {
        let mut scene = Scene::new(true);
        scene.window.toggle_movable();
        let drag = scene.begin();
        drag.update(&mut scene.window, 10.0, 10.0);
        assert_eq!(scene.window.frame().position(Dim::X), 40.0);
        assert_eq!(scene.finish(drag, 80.0, 10.0), None);
    }

    #[test]
    fn close_button_emits_close_action() {
        let header = WindowHeader::new(WindowId::new(3), "Log", true);
        let button = header.close_button().unwrap();
        assert_eq!(button.activate(), ChromeAction::Close(WindowId::new(3)));
        assert!(header.has_separator());
        assert!(WindowHeader::new(WindowId::new(4), "x", false).close_button().is_none());
    }

    #[test]
    fn host_sees_undock_during_drag_start() {
        let mut scene = Scene::new(true);
        let root = scene.docks.root();
        scene.window.dock(root, &mut scene.docks).unwrap();
        let drag = scene.begin();
        let mut detached = scene.window.frame().clone();
        assert!(scene.docks.undock(root, scene.window.id(), &mut detached).is_err());
        let _ = scene.finish(drag, 90.0, 30.0);
    }
}
