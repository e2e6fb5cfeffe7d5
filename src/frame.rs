//! Spatial and draw-order handles for window chrome.
//!
//! A [`Frame`] owns where a window sits (an origin plus a position relative
//! to it), how big it is, and whether its layer is lifted. Draw order lives
//! in a shared [`LayerStack`]; frames only carry their [`LayerId`] into it.

use std::fmt;

use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dim {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn get(self, dim: Dim) -> f32 {
        match dim {
            Dim::X => self.x,
            Dim::Y => self.y,
        }
    }

    fn set(&mut self, dim: Dim, value: f32) {
        match dim {
            Dim::X => self.x = value,
            Dim::Y => self.y = value,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn get(self, dim: Dim) -> f32 {
        match dim {
            Dim::X => self.width,
            Dim::Y => self.height,
        }
    }
}

/// Absolute rectangle in cell units. Unlike `ratatui::Rect` it may sit
/// partially off screen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self::new(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        )
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Snap to the cell grid and clip against `area`. Returns `None` when
    /// nothing of the rectangle is visible.
    pub fn clip_to(&self, area: Rect) -> Option<Rect> {
        let x0 = (self.x.round() as i32).max(area.x as i32);
        let y0 = (self.y.round() as i32).max(area.y as i32);
        let x1 = (self.right().round() as i32).min(area.right() as i32);
        let y1 = (self.bottom().round() as i32).min(area.bottom() as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect {
            x: x0 as u16,
            y: y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        })
    }
}

/// Two-level layer transparency. `Void` is used while a header drag lifts
/// the window; hit-testing looks straight through void layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Opacity {
    Void,
    #[default]
    Opaque,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// Back-to-front draw order of sibling layers. The last entry renders on
/// top and gets input priority.
#[derive(Debug, Clone, Default)]
pub struct LayerStack {
    order: Vec<LayerId>,
    next: u64,
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new layer on top of the stack.
    pub fn allocate(&mut self) -> LayerId {
        let id = LayerId(self.next);
        self.next += 1;
        self.order.push(id);
        id
    }

    pub fn move_to_top(&mut self, id: LayerId) {
        if self.order.last() == Some(&id) {
            return;
        }
        self.order.retain(|layer| *layer != id);
        self.order.push(id);
    }

    pub fn remove(&mut self, id: LayerId) {
        self.order.retain(|layer| *layer != id);
    }

    pub fn top(&self) -> Option<LayerId> {
        self.order.last().copied()
    }

    pub fn is_top(&self, id: LayerId) -> bool {
        self.top() == Some(id)
    }

    /// Position in draw order, `0` being the bottom.
    pub fn depth(&self, id: LayerId) -> Option<usize> {
        self.order.iter().position(|layer| *layer == id)
    }

    pub fn order(&self) -> &[LayerId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Screen-space handle of one window.
///
/// `position` is relative to `origin`; a floating window's origin is the
/// root surface (`Point::ORIGIN`), a docked window's origin is its dock
/// section.
#[derive(Debug, Clone)]
pub struct Frame {
    layer: LayerId,
    origin: Point,
    position: Point,
    size: Size,
    opacity: Opacity,
}

impl Frame {
    pub fn new(layer: LayerId, size: Size) -> Self {
        Self {
            layer,
            origin: Point::ORIGIN,
            position: Point::ORIGIN,
            size,
            opacity: Opacity::Opaque,
        }
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }

    pub fn position(&self, dim: Dim) -> f32 {
        self.position.get(dim)
    }

    pub fn absolute(&self, dim: Dim) -> f32 {
        self.origin.get(dim) + self.position.get(dim)
    }

    pub fn size(&self, dim: Dim) -> f32 {
        self.size.get(dim)
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn opacity(&self) -> Opacity {
        self.opacity
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(
            self.absolute(Dim::X),
            self.absolute(Dim::Y),
            self.size.width,
            self.size.height,
        )
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.position = Point::new(x, y);
    }

    pub fn set_position_dim(&mut self, dim: Dim, value: f32) {
        self.position.set(dim, value);
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = Size::new(width, height);
    }

    pub fn set_opacity(&mut self, opacity: Opacity) {
        self.opacity = opacity;
    }

    /// Attach the frame to a new parent origin without touching its
    /// relative position.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Re-express the frame relative to the root surface, keeping its
    /// on-screen location.
    pub fn reanchor_to_root(&mut self) {
        let x = self.absolute(Dim::X);
        let y = self.absolute(Dim::Y);
        self.origin = Point::ORIGIN;
        self.set_position(x, y);
    }

    pub fn move_to_top(&self, layers: &mut LayerStack) {
        layers.move_to_top(self.layer);
    }
}
