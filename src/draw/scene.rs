use crate::{
    Animation, AnimationState, Attribute, Canvas, NodeId, NodeKind, Paint, Point, Rect, Size,
    TextMeasurer, TextStyle, trace, warn,
};
use std::collections::HashMap;
use tokio::time::Instant;

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    text: String,
    style: TextStyle,
    paint: Paint,
    position: Point,
    size: Size,
    transform: Point,
    line: (Point, Point),
    animations: Vec<AnimationState>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            text: String::new(),
            style: TextStyle::default(),
            paint: Paint::default(),
            position: Point::ZERO,
            size: Size::ZERO,
            transform: Point::ZERO,
            line: (Point::ZERO, Point::ZERO),
            animations: Vec::new(),
        }
    }
}

/// In-memory scene graph implementing [`Canvas`].
///
/// Besides the drawing operations it exposes read-only inspection helpers
/// so a host (or a test) can see what would be painted.
pub struct Scene {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    next_id: u64,
    viewport: Size,
    measurer: Box<dyn TextMeasurer>,
}

impl Scene {
    pub fn new(viewport: Size, measurer: impl TextMeasurer + 'static) -> Self {
        let root = NodeId::from_raw(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::new(NodeKind::Group));
        Self {
            nodes,
            root,
            next_id: 1,
            viewport,
            measurer: Box::new(measurer),
        }
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        trace!("Viewport resized to {viewport}");
        self.viewport = viewport;
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.nodes.get(&node).map(|n| n.kind)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(&node)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes
            .get(&node)
            .filter(|n| n.kind == NodeKind::Text)
            .map(|n| n.text.as_str())
    }

    pub fn style(&self, node: NodeId) -> Option<&TextStyle> {
        self.nodes.get(&node).map(|n| &n.style)
    }

    pub fn paint(&self, node: NodeId) -> Option<&Paint> {
        self.nodes.get(&node).map(|n| &n.paint)
    }

    pub fn position(&self, node: NodeId) -> Option<Point> {
        self.nodes.get(&node).map(|n| n.position)
    }

    pub fn size(&self, node: NodeId) -> Option<Size> {
        self.nodes.get(&node).map(|n| n.size)
    }

    pub fn transform(&self, node: NodeId) -> Option<Point> {
        self.nodes.get(&node).map(|n| n.transform)
    }

    pub fn line(&self, node: NodeId) -> Option<(Point, Point)> {
        self.nodes.get(&node).map(|n| n.line)
    }

    /// Whether `node` is reachable from the root.
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Sum of the translations of every ancestor, i.e. where the local origin
    /// of `node`'s children ends up in root coordinates.
    pub fn absolute_origin(&self, node: NodeId) -> Point {
        let mut origin = Point::ZERO;
        let mut current = Some(node);
        while let Some(id) = current {
            if let Some(n) = self.nodes.get(&id) {
                origin += n.transform;
            }
            current = self.parent(id);
        }
        origin
    }

    /// Text contents of every text node below `node`, in paint order.
    pub fn texts_under(&self, node: NodeId) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_texts(node, &mut out);
        out
    }

    fn collect_texts(&self, node: NodeId, out: &mut Vec<String>) {
        let Some(n) = self.nodes.get(&node) else {
            return;
        };
        if n.kind == NodeKind::Text {
            out.push(n.text.clone());
        }
        for child in &n.children {
            self.collect_texts(*child, out);
        }
    }

    pub fn animation(&self, node: NodeId, attribute: Attribute) -> Option<&AnimationState> {
        self.nodes
            .get(&node)?
            .animations
            .iter()
            .find(|a| a.animation.attribute == attribute)
    }

    /// Animated value of `attribute` at `now`; `None` when the base value applies.
    pub fn attribute_at(&self, node: NodeId, attribute: Attribute, now: Instant) -> Option<f32> {
        self.animation(node, attribute)?.value_at(now)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn insert(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId::from_raw(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(kind));
        self.append(parent, id);
        id
    }

    fn with_node(&mut self, node: NodeId, f: impl FnOnce(&mut Node)) {
        match self.nodes.get_mut(&node) {
            Some(n) => f(n),
            None => warn!("Ignoring operation on unknown {node}"),
        }
    }

    fn unlink(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get_mut(&node).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.retain(|c| *c != node);
        }
    }
}

impl Canvas for Scene {
    fn root(&self) -> NodeId {
        self.root
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn add_group(&mut self, parent: NodeId) -> NodeId {
        self.insert(parent, NodeKind::Group)
    }

    fn add_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.insert(parent, NodeKind::Text);
        self.set_text(id, text);
        id
    }

    fn add_rect(&mut self, parent: NodeId) -> NodeId {
        self.insert(parent, NodeKind::Rect)
    }

    fn add_line(&mut self, parent: NodeId) -> NodeId {
        self.insert(parent, NodeKind::Line)
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.with_node(node, |n| n.text = text.to_string());
    }

    fn set_text_style(&mut self, node: NodeId, style: &TextStyle) {
        self.with_node(node, |n| n.style = style.clone());
    }

    fn set_paint(&mut self, node: NodeId, paint: &Paint) {
        self.with_node(node, |n| n.paint = paint.clone());
    }

    fn place(&mut self, node: NodeId, at: Point) {
        self.with_node(node, |n| n.position = at);
    }

    fn resize(&mut self, node: NodeId, size: Size) {
        self.with_node(node, |n| n.size = size);
    }

    fn translate(&mut self, node: NodeId, by: Point) {
        self.with_node(node, |n| n.transform = by);
    }

    fn set_line(&mut self, node: NodeId, from: Point, to: Point) {
        self.with_node(node, |n| n.line = (from, to));
    }

    fn append(&mut self, parent: NodeId, node: NodeId) {
        if !self.contains(parent) || !self.contains(node) || parent == node {
            warn!("Cannot append {node} to {parent}");
            return;
        }
        self.unlink(node);
        if let Some(n) = self.nodes.get_mut(&node) {
            n.parent = Some(parent);
        }
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(node);
        }
    }

    fn detach(&mut self, node: NodeId) {
        self.unlink(node);
    }

    fn destroy(&mut self, node: NodeId) {
        if node == self.root {
            warn!("Refusing to destroy the root node");
            return;
        }
        self.unlink(node);
        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            if let Some(n) = self.nodes.remove(&id) {
                pending.extend(n.children);
            }
        }
    }

    fn measure(&self, node: NodeId) -> Option<Size> {
        if !self.is_attached(node) {
            return None;
        }
        let n = self.nodes.get(&node)?;
        match n.kind {
            NodeKind::Text => Some(self.measurer.measure(&n.text, &n.style)),
            NodeKind::Rect => Some(n.size),
            NodeKind::Line | NodeKind::Group => {
                Some(self.bounds(node).map(|b| b.size).unwrap_or(Size::ZERO))
            }
        }
    }

    fn measure_text(&self, text: &str, style: &TextStyle) -> Size {
        self.measurer.measure(text, style)
    }

    fn bounds(&self, node: NodeId) -> Option<Rect> {
        let n = self.nodes.get(&node)?;
        match n.kind {
            NodeKind::Text => {
                let size = self.measurer.measure(&n.text, &n.style);
                let origin = Point::new(n.position.x, n.position.y - size.height / 2.0);
                Some(Rect::new(origin, size).translated(n.transform))
            }
            NodeKind::Rect => Some(Rect::new(n.position, n.size).translated(n.transform)),
            NodeKind::Line => {
                let (a, b) = n.line;
                let origin = Point::new(a.x.min(b.x), a.y.min(b.y));
                let size = Size::new((a.x - b.x).abs(), (a.y - b.y).abs());
                Some(Rect::new(origin, size).translated(n.transform))
            }
            NodeKind::Group => n
                .children
                .iter()
                .filter_map(|c| self.bounds(*c))
                .reduce(|a, b| a.union(b))
                .map(|r| r.translated(n.transform)),
        }
    }

    fn animate(&mut self, node: NodeId, animation: Animation) {
        let now = Instant::now();
        self.with_node(node, |n| {
            n.animations
                .retain(|a| a.animation.attribute != animation.attribute);
            n.animations.push(AnimationState::install(animation, now));
        });
    }

    fn begin_animation(&mut self, node: NodeId, attribute: Attribute) {
        let now = Instant::now();
        self.with_node(node, |n| {
            if let Some(a) = n
                .animations
                .iter_mut()
                .find(|a| a.animation.attribute == attribute)
            {
                a.begin(now);
            }
        });
    }

    fn stop_animation(&mut self, node: NodeId, attribute: Attribute) {
        self.with_node(node, |n| {
            if let Some(a) = n
                .animations
                .iter_mut()
                .find(|a| a.animation.attribute == attribute)
            {
                a.stop();
            }
        });
    }
}
