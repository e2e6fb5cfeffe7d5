//! Hit-testing view of the root surface.
//!
//! Widget kinds are an explicit tag rather than a runtime type check, and
//! the walk from a hit widget up to its enclosing dock section goes
//! through [`AncestorLookup`].

use crate::dock::SectionId;
use crate::frame::{Bounds, Size};
use crate::window::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Root,
    Docksection(SectionId),
    Window(WindowId),
}

impl WidgetKind {
    pub fn as_docksection(self) -> Option<SectionId> {
        match self {
            WidgetKind::Docksection(id) => Some(id),
            _ => None,
        }
    }
}

pub trait AncestorLookup {
    fn kind(&self, id: WidgetId) -> Option<WidgetKind>;

    fn parent(&self, id: WidgetId) -> Option<WidgetId>;

    /// Walk from `from` (inclusive) towards the root and return the first
    /// widget whose kind satisfies `pred`.
    fn nearest_ancestor(
        &self,
        from: WidgetId,
        pred: &dyn Fn(WidgetKind) -> bool,
    ) -> Option<(WidgetId, WidgetKind)> {
        let mut current = Some(from);
        while let Some(id) = current {
            let kind = self.kind(id)?;
            if pred(kind) {
                return Some((id, kind));
            }
            current = self.parent(id);
        }
        None
    }
}

pub trait RootSurface: AncestorLookup {
    fn size(&self) -> Size;

    /// The topmost hittable widget under `(x, y)`.
    fn pinpoint(&self, x: f32, y: f32) -> Option<WidgetId>;

    /// The dock section enclosing whatever lies under `(x, y)`, if any.
    fn docksection_at(&self, x: f32, y: f32) -> Option<SectionId> {
        let hit = self.pinpoint(x, y)?;
        self.nearest_ancestor(hit, &|kind| matches!(kind, WidgetKind::Docksection(_)))
            .and_then(|(_, kind)| kind.as_docksection())
    }
}

#[derive(Debug, Clone)]
struct Node {
    kind: WidgetKind,
    parent: Option<WidgetId>,
    bounds: Bounds,
    hittable: bool,
}

/// Flat snapshot of the widget hierarchy.
///
/// Widgets are pushed back to front: a later widget sits above every
/// earlier one, so parents must be pushed before their children.
#[derive(Debug, Clone)]
pub struct WidgetTree {
    size: Size,
    nodes: Vec<Node>,
}

impl WidgetTree {
    pub fn new(size: Size) -> Self {
        let root = Node {
            kind: WidgetKind::Root,
            parent: None,
            bounds: Bounds::new(0.0, 0.0, size.width, size.height),
            hittable: true,
        };
        Self {
            size,
            nodes: vec![root],
        }
    }

    pub fn root(&self) -> WidgetId {
        WidgetId(0)
    }

    pub fn push(&mut self, parent: WidgetId, kind: WidgetKind, bounds: Bounds) -> WidgetId {
        self.push_with(parent, kind, bounds, true)
    }

    /// Push a widget that is drawn but ignored by `pinpoint`, e.g. a
    /// window lifted by a header drag.
    pub fn push_transparent(
        &mut self,
        parent: WidgetId,
        kind: WidgetKind,
        bounds: Bounds,
    ) -> WidgetId {
        self.push_with(parent, kind, bounds, false)
    }

    fn push_with(
        &mut self,
        parent: WidgetId,
        kind: WidgetKind,
        bounds: Bounds,
        hittable: bool,
    ) -> WidgetId {
        let id = WidgetId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            bounds,
            hittable,
        });
        id
    }

    pub fn find(&self, kind: WidgetKind) -> Option<WidgetId> {
        self.nodes
            .iter()
            .position(|node| node.kind == kind)
            .map(WidgetId)
    }

    pub fn bounds(&self, id: WidgetId) -> Option<Bounds> {
        self.nodes.get(id.0).map(|node| node.bounds)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl AncestorLookup for WidgetTree {
    fn kind(&self, id: WidgetId) -> Option<WidgetKind> {
        self.nodes.get(id.0).map(|node| node.kind)
    }

    fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id.0).and_then(|node| node.parent)
    }
}

impl RootSurface for WidgetTree {
    fn size(&self) -> Size {
        self.size
    }

    fn pinpoint(&self, x: f32, y: f32) -> Option<WidgetId> {
        self.nodes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, node)| node.hittable && node.bounds.contains(x, y))
            .map(|(idx, _)| WidgetId(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dock::Dockspace;

    fn sample() -> (WidgetTree, WidgetId, WidgetId) {
        let dock = Dockspace::new(Bounds::new(0.0, 0.0, 20.0, 40.0));
        let mut tree = WidgetTree::new(Size::new(80.0, 40.0));
        let root = tree.root();
        let section = tree.push(
            root,
            WidgetKind::Docksection(dock.root()),
            Bounds::new(0.0, 0.0, 20.0, 40.0),
        );
        let docked = tree.push(
            section,
            WidgetKind::Window(WindowId::new(1)),
            Bounds::new(0.0, 0.0, 20.0, 20.0),
        );
        (tree, section, docked)
    }

    #[test]
    fn pinpoint_prefers_later_widgets() {
        let (tree, section, docked) = sample();
        assert_eq!(tree.pinpoint(5.0, 5.0), Some(docked));
        assert_eq!(tree.pinpoint(5.0, 30.0), Some(section));
        assert_eq!(tree.pinpoint(50.0, 5.0), Some(tree.root()));
        assert_eq!(tree.pinpoint(500.0, 5.0), None);
    }

    #[test]
    fn ancestor_walk_finds_docksection() {
        let (tree, _, docked) = sample();
        assert_eq!(tree.docksection_at(5.0, 5.0), Some(Dockspace::default().root()));
        assert_eq!(tree.docksection_at(50.0, 5.0), None);
        let (found, kind) = tree
            .nearest_ancestor(docked, &|kind| kind == WidgetKind::Root)
            .unwrap();
        assert_eq!(found, tree.root());
        assert_eq!(kind, WidgetKind::Root);
    }

    #[test]
    fn transparent_widgets_are_skipped() {
        let (mut tree, _, _) = sample();
        let root = tree.root();
        tree.push_transparent(
            root,
            WidgetKind::Window(WindowId::new(2)),
            Bounds::new(0.0, 0.0, 80.0, 40.0),
        );
        assert_eq!(tree.docksection_at(5.0, 30.0), Some(Dockspace::default().root()));
    }
}
