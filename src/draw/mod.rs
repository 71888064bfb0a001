//! Retained-mode drawing primitives.
//!
//! The query panel and the table card never talk to a concrete renderer.
//! They create, style, place and measure nodes through the [`Canvas`] trait,
//! which covers the handful of vector-graphics operations an SVG host
//! offers:
//!
//! - `group`, `text`, `rect` and `line` nodes arranged in a tree,
//! - absolute placement (`x`/`y` attributes) and translation (group transforms),
//! - text measurement, only meaningful once a node is attached to the tree,
//! - declarative attribute animations that can be restarted on demand.
//!
//! [`Scene`] is the in-memory implementation used by the demo binary and the
//! tests. Text metrics come from a pluggable [`TextMeasurer`].

crate::reexport!(animation);
crate::reexport!(measure);
crate::reexport!(scene);

use crate::{Point, Rect, Size};
use derive_more::Display;
use std::{cell::RefCell, rc::Rc};

/// Opaque handle of a node owned by a [`Canvas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("node#{_0}")]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NodeKind {
    Group,
    Text,
    Rect,
    Line,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Visual style of a text run. Style affects measured width.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TextStyle {
    pub weight: FontWeight,
    pub italic: bool,
    pub fill: Option<String>,
}

impl TextStyle {
    pub fn bold() -> Self {
        Self {
            weight: FontWeight::Bold,
            ..Self::default()
        }
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = Some(fill.into());
        self
    }

    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }
}

/// Fill and stroke of shapes (rects and lines).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paint {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub corner_radius: f32,
}

impl Paint {
    pub fn stroke(color: impl Into<String>) -> Self {
        Self {
            stroke: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn with_fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }
}

/// Shared handle to the canvas. Borrows must not be held across `.await`.
pub type CanvasHandle = Rc<RefCell<dyn Canvas>>;

/// Drawing and measurement collaborator.
///
/// Operations on unknown or destroyed nodes are ignored.
pub trait Canvas {
    fn root(&self) -> NodeId;

    fn viewport(&self) -> Size;

    fn add_group(&mut self, parent: NodeId) -> NodeId;

    fn add_text(&mut self, parent: NodeId, text: &str) -> NodeId;

    fn add_rect(&mut self, parent: NodeId) -> NodeId;

    fn add_line(&mut self, parent: NodeId) -> NodeId;

    fn set_text(&mut self, node: NodeId, text: &str);

    fn set_text_style(&mut self, node: NodeId, style: &TextStyle);

    fn set_paint(&mut self, node: NodeId, paint: &Paint);

    /// Set the `x`/`y` position of a text or rect node. Text is anchored at
    /// its left edge and vertical middle.
    fn place(&mut self, node: NodeId, at: Point);

    fn resize(&mut self, node: NodeId, size: Size);

    /// Set the translation applied to a node and its children.
    fn translate(&mut self, node: NodeId, by: Point);

    fn set_line(&mut self, node: NodeId, from: Point, to: Point);

    /// Move `node` to the end of `parent`'s children, detaching it from its
    /// previous parent first.
    fn append(&mut self, parent: NodeId, node: NodeId);

    /// Remove `node` from its parent without destroying it.
    fn detach(&mut self, node: NodeId);

    /// Remove `node` and its whole subtree for good.
    fn destroy(&mut self, node: NodeId);

    /// Rendered size of an attached node, `None` while detached.
    fn measure(&self, node: NodeId) -> Option<Size>;

    /// Size `text` renders at with `style`, matching what [`Canvas::measure`]
    /// reports for an attached text node with the same content.
    fn measure_text(&self, text: &str, style: &TextStyle) -> Size;

    /// Bounds of `node` in its parent's coordinate space.
    fn bounds(&self, node: NodeId) -> Option<Rect>;

    /// Install an animation, replacing any previous animation of the same
    /// attribute on that node.
    fn animate(&mut self, node: NodeId, animation: Animation);

    /// (Re)start an installed animation from its first keyframe.
    fn begin_animation(&mut self, node: NodeId, attribute: Attribute);

    /// Halt an installed animation; the attribute falls back to its base value.
    fn stop_animation(&mut self, node: NodeId, attribute: Attribute);
}
