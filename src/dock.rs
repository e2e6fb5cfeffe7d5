//! Docking host: a tree of dock sections that windows can be docked into.
//!
//! Leaf sections hold an ordered list of windows and stack them top to
//! bottom. Dropping onto the outer quarter of a leaf splits it, so the
//! dropped window gets its own half on that edge. A leaf emptied by undock
//! folds back into its sibling.

use std::collections::BTreeMap;
use std::fmt;

use ratatui::layout::Direction;

use crate::constants::DOCK_EDGE_THRESHOLD;
use crate::error::ChromeError;
use crate::frame::{Bounds, Frame};
use crate::window::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionId(usize);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockZone {
    Left,
    Right,
    Top,
    Bottom,
    Center,
}

/// Classify a point against a section rectangle. Edge zones win over the
/// center; `None` when the point is outside or the rectangle is empty.
pub fn detect_zone(bounds: Bounds, x: f32, y: f32) -> Option<DockZone> {
    if !bounds.contains(x, y) {
        return None;
    }
    let rel_x = (x - bounds.x) / bounds.width;
    let rel_y = (y - bounds.y) / bounds.height;
    if rel_x < DOCK_EDGE_THRESHOLD {
        Some(DockZone::Left)
    } else if rel_x > 1.0 - DOCK_EDGE_THRESHOLD {
        Some(DockZone::Right)
    } else if rel_y < DOCK_EDGE_THRESHOLD {
        Some(DockZone::Top)
    } else if rel_y > 1.0 - DOCK_EDGE_THRESHOLD {
        Some(DockZone::Bottom)
    } else {
        Some(DockZone::Center)
    }
}

/// Host side of docking. A window calls into its host when it docks or
/// undocks; the header asks the host where a drop should land.
pub trait DockHost {
    /// Resolve the concrete section a drop at `(x, y)` over `section`
    /// lands in. May create a new section.
    fn docktarget(&mut self, section: SectionId, x: f32, y: f32)
    -> Result<SectionId, ChromeError>;

    /// Accept `window` into `target` and lay out its frame.
    fn dock(
        &mut self,
        target: SectionId,
        window: WindowId,
        frame: &mut Frame,
    ) -> Result<(), ChromeError>;

    /// Release `window` from `target`. The frame keeps its last placement.
    fn undock(
        &mut self,
        target: SectionId,
        window: WindowId,
        frame: &mut Frame,
    ) -> Result<(), ChromeError>;
}

#[derive(Debug, Clone)]
enum SectionContent {
    Leaf(Vec<WindowId>),
    Split {
        direction: Direction,
        first: SectionId,
        second: SectionId,
    },
}

#[derive(Debug, Clone)]
struct Docksection {
    bounds: Bounds,
    parent: Option<SectionId>,
    content: SectionContent,
}

#[derive(Debug, Clone)]
pub struct Dockspace {
    root: SectionId,
    sections: BTreeMap<SectionId, Docksection>,
    next: usize,
}

impl Dockspace {
    pub fn new(bounds: Bounds) -> Self {
        let root = SectionId(0);
        let mut sections = BTreeMap::new();
        sections.insert(
            root,
            Docksection {
                bounds,
                parent: None,
                content: SectionContent::Leaf(Vec::new()),
            },
        );
        Self {
            root,
            sections,
            next: 1,
        }
    }

    pub fn root(&self) -> SectionId {
        self.root
    }

    fn section(&self, id: SectionId) -> Result<&Docksection, ChromeError> {
        self.sections.get(&id).ok_or(ChromeError::UnknownSection(id))
    }

    fn section_mut(&mut self, id: SectionId) -> Result<&mut Docksection, ChromeError> {
        self.sections
            .get_mut(&id)
            .ok_or(ChromeError::UnknownSection(id))
    }

    fn allocate(&mut self) -> SectionId {
        let id = SectionId(self.next);
        self.next += 1;
        id
    }

    pub fn bounds(&self, id: SectionId) -> Option<Bounds> {
        self.sections.get(&id).map(|section| section.bounds)
    }

    pub fn parent(&self, id: SectionId) -> Option<SectionId> {
        self.sections.get(&id).and_then(|section| section.parent)
    }

    pub fn is_leaf(&self, id: SectionId) -> bool {
        matches!(
            self.sections.get(&id).map(|section| &section.content),
            Some(SectionContent::Leaf(_))
        )
    }

    /// Windows docked in `id`, top to bottom. Empty for split sections.
    pub fn windows(&self, id: SectionId) -> &[WindowId] {
        match self.sections.get(&id).map(|section| &section.content) {
            Some(SectionContent::Leaf(windows)) => windows,
            _ => &[],
        }
    }

    /// Every section, parents before children.
    pub fn sections(&self) -> Vec<SectionId> {
        let mut out = Vec::with_capacity(self.sections.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(SectionContent::Split { first, second, .. }) =
                self.sections.get(&id).map(|section| &section.content)
            {
                stack.push(*second);
                stack.push(*first);
            }
        }
        out
    }

    pub fn section_of(&self, window: WindowId) -> Option<SectionId> {
        self.sections
            .iter()
            .find_map(|(id, section)| match &section.content {
                SectionContent::Leaf(windows) => windows.contains(&window).then_some(*id),
                SectionContent::Split { .. } => None,
            })
    }

    /// The absolute rectangle assigned to a docked window.
    pub fn slot(&self, window: WindowId) -> Option<Bounds> {
        let id = self.section_of(window)?;
        let section = self.sections.get(&id)?;
        let SectionContent::Leaf(windows) = &section.content else {
            return None;
        };
        let index = windows.iter().position(|w| *w == window)?;
        let count = windows.len() as f32;
        let height = (section.bounds.height / count).floor();
        let y = section.bounds.y + height * index as f32;
        let height = if index + 1 == windows.len() {
            section.bounds.bottom() - y
        } else {
            height
        };
        Some(Bounds::new(section.bounds.x, y, section.bounds.width, height))
    }

    /// Apply the window's slot to its frame. Returns `false` when the window
    /// is not docked here.
    pub fn place(&self, window: WindowId, frame: &mut Frame) -> bool {
        let (Some(id), Some(slot)) = (self.section_of(window), self.slot(window)) else {
            return false;
        };
        let Some(origin) = self.bounds(id).map(|b| b.origin()) else {
            return false;
        };
        frame.set_origin(origin);
        frame.set_position(slot.x - origin.x, slot.y - origin.y);
        frame.set_size(slot.width, slot.height);
        true
    }

    /// Resize the whole dockspace; splits keep their halves.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        let root = self.root;
        self.layout_section(root, bounds);
    }

    fn layout_section(&mut self, id: SectionId, bounds: Bounds) {
        let Some(section) = self.sections.get_mut(&id) else {
            return;
        };
        section.bounds = bounds;
        if let SectionContent::Split {
            direction,
            first,
            second,
        } = section.content.clone()
        {
            let (a, b) = halve(bounds, direction);
            self.layout_section(first, a);
            self.layout_section(second, b);
        }
    }

    /// Split leaf `id` so that a new, empty leaf takes the `zone` half.
    /// The existing leaf keeps its id and its windows.
    fn split(&mut self, id: SectionId, zone: DockZone) -> Result<SectionId, ChromeError> {
        let (bounds, parent) = {
            let section = self.section(id)?;
            (section.bounds, section.parent)
        };
        let direction = match zone {
            DockZone::Left | DockZone::Right => Direction::Horizontal,
            DockZone::Top | DockZone::Bottom => Direction::Vertical,
            DockZone::Center => return Ok(id),
        };
        let container = self.allocate();
        let fresh = self.allocate();
        let (first, second) = match zone {
            DockZone::Left | DockZone::Top => (fresh, id),
            _ => (id, fresh),
        };
        self.sections.insert(
            container,
            Docksection {
                bounds,
                parent,
                content: SectionContent::Split {
                    direction,
                    first,
                    second,
                },
            },
        );
        self.sections.insert(
            fresh,
            Docksection {
                bounds,
                parent: Some(container),
                content: SectionContent::Leaf(Vec::new()),
            },
        );
        self.section_mut(id)?.parent = Some(container);
        match parent {
            Some(parent_id) => self.replace_child(parent_id, id, container),
            None => self.root = container,
        }
        self.layout_section(container, bounds);
        tracing::debug!(section = %id, new_section = %fresh, ?zone, "split dock section");
        Ok(fresh)
    }

    /// Fold an emptied leaf back into its parent split: the sibling takes
    /// the parent's place and space. The root leaf is never removed.
    fn collapse(&mut self, id: SectionId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        let Some(SectionContent::Split { first, second, .. }) =
            self.sections.get(&parent).map(|section| section.content.clone())
        else {
            return;
        };
        let sibling = if first == id { second } else { first };
        let Some(removed) = self.sections.remove(&parent) else {
            return;
        };
        self.sections.remove(&id);
        if let Some(section) = self.sections.get_mut(&sibling) {
            section.parent = removed.parent;
        }
        match removed.parent {
            Some(grandparent) => self.replace_child(grandparent, parent, sibling),
            None => self.root = sibling,
        }
        self.layout_section(sibling, removed.bounds);
        tracing::debug!(section = %id, into = %sibling, "collapsed empty dock section");
    }

    fn replace_child(&mut self, parent: SectionId, old: SectionId, new: SectionId) {
        if let Some(Docksection {
            content: SectionContent::Split { first, second, .. },
            ..
        }) = self.sections.get_mut(&parent)
        {
            if *first == old {
                *first = new;
            } else if *second == old {
                *second = new;
            }
        }
    }
}

fn halve(bounds: Bounds, direction: Direction) -> (Bounds, Bounds) {
    match direction {
        Direction::Horizontal => {
            let left = (bounds.width / 2.0).floor();
            (
                Bounds::new(bounds.x, bounds.y, left, bounds.height),
                Bounds::new(bounds.x + left, bounds.y, bounds.width - left, bounds.height),
            )
        }
        Direction::Vertical => {
            let top = (bounds.height / 2.0).floor();
            (
                Bounds::new(bounds.x, bounds.y, bounds.width, top),
                Bounds::new(bounds.x, bounds.y + top, bounds.width, bounds.height - top),
            )
        }
    }
}

impl DockHost for Dockspace {
    fn docktarget(
        &mut self,
        section: SectionId,
        x: f32,
        y: f32,
    ) -> Result<SectionId, ChromeError> {
        let current = self.section(section)?;
        match &current.content {
            SectionContent::Split { first, second, .. } => {
                let (first, second) = (*first, *second);
                let child = if self.bounds(second).is_some_and(|b| b.contains(x, y)) {
                    second
                } else {
                    first
                };
                self.docktarget(child, x, y)
            }
            SectionContent::Leaf(windows) => {
                if windows.is_empty() {
                    return Ok(section);
                }
                match detect_zone(current.bounds, x, y) {
                    None | Some(DockZone::Center) => Ok(section),
                    Some(zone) => self.split(section, zone),
                }
            }
        }
    }

    fn dock(
        &mut self,
        target: SectionId,
        window: WindowId,
        frame: &mut Frame,
    ) -> Result<(), ChromeError> {
        match &mut self.section_mut(target)?.content {
            SectionContent::Leaf(windows) => {
                if !windows.contains(&window) {
                    windows.push(window);
                }
            }
            SectionContent::Split { .. } => return Err(ChromeError::UnknownSection(target)),
        }
        self.place(window, frame);
        Ok(())
    }

    fn undock(
        &mut self,
        target: SectionId,
        window: WindowId,
        _frame: &mut Frame,
    ) -> Result<(), ChromeError> {
        let SectionContent::Leaf(windows) = &mut self.section_mut(target)?.content else {
            return Err(ChromeError::NotInSection {
                window,
                section: target,
            });
        };
        let Some(index) = windows.iter().position(|w| *w == window) else {
            return Err(ChromeError::NotInSection {
                window,
                section: target,
            });
        };
        windows.remove(index);
        if windows.is_empty() {
            self.collapse(target);
        }
        Ok(())
    }
}

impl Default for Dockspace {
    fn default() -> Self {
        Self::new(Bounds::default())
    }
}
