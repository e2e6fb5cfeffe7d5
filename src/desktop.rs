//! The root surface: owns every window, the dockspace and the layer stack,
//! and turns mouse events into chrome gestures.

use std::collections::BTreeMap;
use std::sync::Arc;

use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::dock::{Dockspace, SectionId};
use crate::error::ChromeError;
use crate::frame::{Bounds, LayerId, LayerStack, Opacity, Point, Size};
use crate::style::StyleTable;
use crate::surface::{AncestorLookup, RootSurface, WidgetKind, WidgetTree};
use crate::theme;
use crate::ui::UiFrame;
use crate::window::decorator::{DefaultDecorator, WindowDecorator};
use crate::window::{
    ChromeAction, ChromeContext, ChromeLayout, ChromePart, CloseCallback, Content, HeaderDrag,
    ResizeDrag, Window, WindowId,
};

/// Everything needed to open a window.
pub struct WindowSpec {
    pub title: String,
    pub closable: bool,
    pub dockable: bool,
    pub size: Size,
    pub position: Option<Point>,
    pub dock: Option<SectionId>,
    pub content: Option<Box<dyn Content>>,
    pub on_close: Option<CloseCallback>,
}

impl WindowSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            closable: true,
            dockable: true,
            size: Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
            position: None,
            dock: None,
            content: None,
            on_close: None,
        }
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    pub fn dockable(mut self, dockable: bool) -> Self {
        self.dockable = dockable;
        self
    }

    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Place the window explicitly instead of centering it.
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }

    pub fn docked_in(mut self, section: SectionId) -> Self {
        self.dock = Some(section);
        self
    }

    pub fn content(mut self, content: impl Content + 'static) -> Self {
        self.content = Some(Box::new(content));
        self
    }

    pub fn on_close(mut self, on_close: impl FnOnce(WindowId) + 'static) -> Self {
        self.on_close = Some(Box::new(on_close));
        self
    }
}

#[derive(Debug)]
enum Gesture {
    Header(HeaderDrag),
    Resize(ResizeDrag),
}

impl Gesture {
    fn window(&self) -> WindowId {
        match self {
            Gesture::Header(drag) => drag.window(),
            Gesture::Resize(drag) => drag.window(),
        }
    }
}

#[derive(Debug)]
struct ActiveGesture {
    gesture: Gesture,
    last: (u16, u16),
}

#[derive(Debug)]
pub struct Desktop {
    area: Rect,
    dock_width_percent: u16,
    windows: BTreeMap<WindowId, Window>,
    by_layer: BTreeMap<LayerId, WindowId>,
    layers: LayerStack,
    docks: Dockspace,
    styles: StyleTable,
    decorator: Arc<dyn WindowDecorator>,
    gesture: Option<ActiveGesture>,
    closed_windows: Vec<WindowId>,
    next_id: u64,
}

fn dock_bounds(area: Rect, percent: u16) -> Bounds {
    let width = (area.width as u32 * percent.min(100) as u32 / 100) as f32;
    Bounds::new(area.x as f32, area.y as f32, width, area.height as f32)
}

fn point(mouse: &MouseEvent) -> (f32, f32) {
    (mouse.column as f32, mouse.row as f32)
}

impl Desktop {
    /// A desktop covering `area` whose left `dock_width_percent` is a dock
    /// column. `0` disables docking targets entirely.
    pub fn new(area: Rect, dock_width_percent: u16) -> Self {
        Self {
            area,
            dock_width_percent,
            windows: BTreeMap::new(),
            by_layer: BTreeMap::new(),
            layers: LayerStack::new(),
            docks: Dockspace::new(dock_bounds(area, dock_width_percent)),
            styles: StyleTable::default(),
            decorator: Arc::new(DefaultDecorator),
            gesture: None,
            closed_windows: Vec::new(),
            next_id: 1,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn docks(&self) -> &Dockspace {
        &self.docks
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn styles_mut(&mut self) -> &mut StyleTable {
        &mut self.styles
    }

    pub fn set_decorator(&mut self, decorator: Arc<dyn WindowDecorator>) {
        self.decorator = decorator;
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.get(&id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.get_mut(&id)
    }

    pub fn window_ids(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// The window currently being dragged or resized, if any.
    pub fn gesture_window(&self) -> Option<WindowId> {
        self.gesture.as_ref().map(|active| active.gesture.window())
    }

    /// Drain the ids of windows closed since the last call.
    pub fn take_closed_windows(&mut self) -> Vec<WindowId> {
        std::mem::take(&mut self.closed_windows)
    }

    /// Windows back to front: docked windows first in dockspace order, then
    /// floating windows in z-order.
    pub fn draw_order(&self) -> Vec<WindowId> {
        let mut order: Vec<WindowId> = self
            .docks
            .sections()
            .into_iter()
            .flat_map(|section| self.docks.windows(section).iter().copied())
            .filter(|id| self.windows.contains_key(id))
            .collect();
        order.extend(
            self.layers
                .order()
                .iter()
                .filter_map(|layer| self.by_layer.get(layer).copied())
                .filter(|id| self.windows.get(id).is_some_and(|w| !w.is_docked())),
        );
        order
    }

    /// Hit-testing snapshot of the current state. Lifted windows are
    /// transparent to `pinpoint`.
    pub fn scene(&self) -> WidgetTree {
        let mut tree = WidgetTree::new(Size::new(self.area.width as f32, self.area.height as f32));
        let root = tree.root();
        let mut section_widgets = BTreeMap::new();
        for section in self.docks.sections() {
            let parent = self
                .docks
                .parent(section)
                .and_then(|p| section_widgets.get(&p).copied())
                .unwrap_or(root);
            let bounds = self.docks.bounds(section).unwrap_or_default();
            let widget = tree.push(parent, WidgetKind::Docksection(section), bounds);
            section_widgets.insert(section, widget);
        }
        for id in self.draw_order() {
            let Some(window) = self.windows.get(&id) else {
                continue;
            };
            let parent = window
                .dock_section()
                .and_then(|section| section_widgets.get(&section).copied())
                .unwrap_or(root);
            let kind = WidgetKind::Window(id);
            let bounds = window.frame().bounds();
            if window.frame().opacity() == Opacity::Void {
                tree.push_transparent(parent, kind, bounds);
            } else {
                tree.push(parent, kind, bounds);
            }
        }
        tree
    }

    /// Topmost window under `(x, y)`.
    pub fn window_at(&self, x: f32, y: f32) -> Option<WindowId> {
        let scene = self.scene();
        let hit = scene.pinpoint(x, y)?;
        scene
            .nearest_ancestor(hit, &|kind| matches!(kind, WidgetKind::Window(_)))
            .and_then(|(_, kind)| match kind {
                WidgetKind::Window(id) => Some(id),
                _ => None,
            })
    }

    pub fn open_window(&mut self, spec: WindowSpec) -> Result<WindowId, ChromeError> {
        if let Some(section) = spec.dock
            && !self.docks.is_leaf(section)
        {
            return Err(ChromeError::UnknownSection(section));
        }
        let id = WindowId::new(self.next_id);
        self.next_id += 1;

        let mut window = Window::new(
            id,
            spec.title,
            spec.closable,
            spec.dockable,
            spec.size,
            &mut self.layers,
        );
        if let Some(on_close) = spec.on_close {
            window = window.with_on_close(on_close);
        }
        if let Some(content) = spec.content {
            window.vappend(content);
        }
        window.bind(&self.scene());
        if let Some(position) = spec.position {
            window.frame_mut().set_position(position.x, position.y);
        }
        self.by_layer.insert(window.frame().layer(), id);
        self.windows.insert(id, window);
        tracing::debug!(window = %id, "opened window");

        if let Some(section) = spec.dock {
            self.dock_window(id, section)?;
        }
        Ok(id)
    }

    pub fn close_window(&mut self, id: WindowId) -> Result<(), ChromeError> {
        let window = self
            .windows
            .remove(&id)
            .ok_or(ChromeError::UnknownWindow(id))?;
        if self.gesture_window() == Some(id) {
            self.gesture = None;
        }
        self.by_layer.remove(&window.frame().layer());
        window.close(&mut self.docks, &mut self.layers);
        self.relayout_docked();
        self.closed_windows.push(id);
        Ok(())
    }

    pub fn dock_window(&mut self, id: WindowId, section: SectionId) -> Result<(), ChromeError> {
        let window = self
            .windows
            .get_mut(&id)
            .ok_or(ChromeError::UnknownWindow(id))?;
        window.dock(section, &mut self.docks)?;
        self.relayout_docked();
        Ok(())
    }

    pub fn undock_window(&mut self, id: WindowId) -> Result<(), ChromeError> {
        let window = self
            .windows
            .get_mut(&id)
            .ok_or(ChromeError::UnknownWindow(id))?;
        window.undock(&mut self.docks, &mut self.layers)?;
        self.relayout_docked();
        Ok(())
    }

    /// The root surface changed size; the dock column follows.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.docks
            .set_bounds(dock_bounds(area, self.dock_width_percent));
        self.relayout_docked();
    }

    fn relayout_docked(&mut self) {
        for (id, window) in self.windows.iter_mut() {
            if window.is_docked() {
                self.docks.place(*id, window.frame_mut());
            }
        }
    }

    pub fn apply_action(&mut self, action: ChromeAction) -> Result<(), ChromeError> {
        match action {
            ChromeAction::Close(id) => self.close_window(id),
        }
    }

    /// Route one input event. Returns `true` when the event was consumed by
    /// window chrome.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match event {
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => {
                self.resize(Rect::new(self.area.x, self.area.y, *width, *height));
                false
            }
            _ => false,
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) -> bool {
        let result = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(last) = self.gesture.as_ref().map(|active| active.last) {
                    tracing::debug!("new press while a gesture was active; ending it first");
                    if let Err(err) = self.end_gesture(last.0, last.1) {
                        tracing::warn!(error = %err, "interrupted gesture failed to finish");
                    }
                }
                self.press(mouse)
            }
            MouseEventKind::Down(MouseButton::Right) => {
                let (x, y) = point(mouse);
                match self.window_at(x, y).and_then(|id| self.windows.get(&id)) {
                    Some(window) => Ok(window.right_click(&mut self.layers)),
                    None => Ok(false),
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => Ok(self.drag_to(mouse.column, mouse.row)),
            MouseEventKind::Up(MouseButton::Left) => {
                self.drag_to(mouse.column, mouse.row);
                self.end_gesture(mouse.column, mouse.row)
            }
            _ => Ok(false),
        };
        result.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "chrome gesture failed");
            true
        })
    }

    fn press(&mut self, mouse: &MouseEvent) -> Result<bool, ChromeError> {
        let (x, y) = point(mouse);
        let Some(id) = self.window_at(x, y) else {
            return Ok(false);
        };
        let scene = self.scene();
        let window = self
            .windows
            .get_mut(&id)
            .ok_or(ChromeError::UnknownWindow(id))?;
        let part = ChromeLayout::for_window(window, &self.styles).hit_test(x, y);
        let gesture = match part {
            Some(ChromePart::Close) => {
                let action = window.header().close_button().map(|button| button.activate());
                if let Some(action) = action {
                    self.apply_action(action)?;
                }
                return Ok(true);
            }
            Some(ChromePart::Header) => {
                let mut ctx = ChromeContext {
                    surface: &scene,
                    docks: &mut self.docks,
                    layers: &mut self.layers,
                };
                Gesture::Header(HeaderDrag::begin(window, &mut ctx)?)
            }
            Some(ChromePart::Sizer) => {
                Gesture::Resize(ResizeDrag::begin(window, x, y, &mut self.layers))
            }
            Some(ChromePart::Body) | None => return Ok(window.left_click(&mut self.layers)),
        };
        self.gesture = Some(ActiveGesture {
            gesture,
            last: (mouse.column, mouse.row),
        });
        self.relayout_docked();
        Ok(true)
    }

    fn drag_to(&mut self, column: u16, row: u16) -> bool {
        let Some(active) = self.gesture.as_mut() else {
            return false;
        };
        let dx = column as f32 - active.last.0 as f32;
        let dy = row as f32 - active.last.1 as f32;
        active.last = (column, row);
        if dx == 0.0 && dy == 0.0 {
            return true;
        }
        let Some(window) = self.windows.get_mut(&active.gesture.window()) else {
            return false;
        };
        match &active.gesture {
            Gesture::Header(drag) => drag.update(window, dx, dy),
            Gesture::Resize(drag) => drag.update(window, dx, dy),
        }
    }

    fn end_gesture(&mut self, column: u16, row: u16) -> Result<bool, ChromeError> {
        let Some(active) = self.gesture.take() else {
            return Ok(false);
        };
        match active.gesture {
            Gesture::Header(drag) => {
                let scene = self.scene();
                let id = drag.window();
                let window = self
                    .windows
                    .get_mut(&id)
                    .ok_or(ChromeError::UnknownWindow(id))?;
                let mut ctx = ChromeContext {
                    surface: &scene,
                    docks: &mut self.docks,
                    layers: &mut self.layers,
                };
                let docked = drag.finish(window, column as f32, row as f32, &mut ctx);
                self.relayout_docked();
                if let Some(section) = docked? {
                    tracing::debug!(window = %id, %section, "dropped window into dock");
                }
                Ok(true)
            }
            Gesture::Resize(drag) => Ok(drag.finish()),
        }
    }

    /// Draw dock sections, then windows back to front.
    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        let outline = Style::default().fg(theme::dock_outline()).bg(theme::dock_bg());
        for section in self.docks.sections() {
            if !self.docks.is_leaf(section) {
                continue;
            }
            if let Some(rect) = self.docks.bounds(section).and_then(|b| b.clip_to(area)) {
                frame.render_widget(Block::bordered().title(" dock ").style(outline), rect);
            }
        }
        let decorator = Arc::clone(&self.decorator);
        for id in self.draw_order() {
            if let Some(window) = self.windows.get_mut(&id) {
                decorator.render_window(frame, window, &self.styles);
            }
        }
    }
}
