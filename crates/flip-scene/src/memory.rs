//! In-memory document for driving flips without a browser.
//!
//! [`MemoryDocument`] is a small element tree with layout rects, computed
//! styles and inline styles. Layout is whatever the caller says it is: move an
//! element by assigning a new rect between `record` and `animate`. Inline
//! style writes made by the engine are kept on each node and appended to a
//! write log so tests can assert on exactly what was touched.
//!
//! ```
//! use flip_scene::geometry::{Rect, Viewport};
//! use flip_scene::memory::{MemoryDocument, NodeSpec};
//!
//! let mut doc = MemoryDocument::new(Viewport::new(800.0, 600.0));
//! let root = doc.root();
//! let card = doc.append(root, NodeSpec::tracked("card").rect(Rect::new(0.0, 0.0, 100.0, 50.0)));
//! assert_eq!(doc.flip_id_of(card), Some("card"));
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ElementConfig;
use crate::geometry::{Rect, Viewport};
use crate::host::FlipHost;

/// Handle to a node in a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// Description of a node to append.
#[derive(Debug, Clone, Default)]
pub struct NodeSpec {
    pub flip_id: Option<String>,
    pub inverse_of: Option<String>,
    pub group_id: Option<String>,
    pub rect: Rect,
    pub opacity: Option<String>,
    pub transform: Option<String>,
    pub config: ElementConfig,
}

impl NodeSpec {
    /// Untracked node (plain wrapper or container).
    pub fn plain() -> Self {
        Self::default()
    }

    /// Node carrying a flip identity.
    pub fn tracked(flip_id: impl Into<String>) -> Self {
        Self {
            flip_id: Some(flip_id.into()),
            opacity: Some("1".to_string()),
            ..Self::default()
        }
    }

    /// Node compensating the animation of the ancestor with `flip_id`.
    pub fn inverse_of(flip_id: impl Into<String>) -> Self {
        Self {
            inverse_of: Some(flip_id.into()),
            ..Self::default()
        }
    }

    pub fn group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }

    pub fn opacity(mut self, opacity: impl Into<String>) -> Self {
        self.opacity = Some(opacity.into());
        self
    }

    pub fn transform(mut self, transform: impl Into<String>) -> Self {
        self.transform = Some(transform.into());
        self
    }

    pub fn config(mut self, config: ElementConfig) -> Self {
        self.config = config;
        self
    }
}

/// Inline styles written by the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InlineStyle {
    pub transform: Option<String>,
    pub opacity: Option<f64>,
    pub transform_origin: Option<String>,
}

/// One inline style mutation, in the order it happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StyleWrite {
    Transform { node: NodeId, value: String },
    ClearTransform { node: NodeId },
    Opacity { node: NodeId, value: f64 },
    TransformOrigin { node: NodeId, value: String },
}

impl StyleWrite {
    pub fn node(&self) -> NodeId {
        match self {
            Self::Transform { node, .. }
            | Self::ClearTransform { node }
            | Self::Opacity { node, .. }
            | Self::TransformOrigin { node, .. } => *node,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    spec: NodeSpec,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    style: InlineStyle,
}

/// Element tree implementing [`FlipHost`].
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    viewport: Viewport,
    writes: Vec<StyleWrite>,
}

impl MemoryDocument {
    pub fn new(viewport: Viewport) -> Self {
        let root = Node {
            spec: NodeSpec::plain().rect(Rect::new(0.0, 0.0, viewport.width, viewport.height)),
            parent: None,
            children: Vec::new(),
            style: InlineStyle::default(),
        };
        Self {
            nodes: vec![root],
            viewport,
            writes: Vec::new(),
        }
    }

    /// The document root. Always attached.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new node as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, spec: NodeSpec) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            spec,
            parent: Some(parent),
            children: Vec::new(),
            style: InlineStyle::default(),
        });
        if let Some(parent) = self.nodes.get_mut(parent.0) {
            parent.children.push(id);
        }
        id
    }

    /// Remove `node` (and its subtree) from the document. The handle stays
    /// valid and can be re-attached with [`reparent`](Self::reparent).
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes.get(node.0).and_then(|n| n.parent) {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.parent = None;
        }
    }

    /// Move `node` to the end of `parent`'s children.
    ///
    /// Does nothing when `parent` is `node` or one of its descendants.
    pub fn reparent(&mut self, node: NodeId, parent: NodeId) {
        if node.0 >= self.nodes.len() || parent.0 >= self.nodes.len() {
            return;
        }
        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            if current == node {
                return;
            }
            ancestor = self.nodes[current.0].parent;
        }

        self.detach(node);
        self.nodes[node.0].parent = Some(parent);
        self.nodes[parent.0].children.push(node);
    }

    pub fn set_rect(&mut self, node: NodeId, rect: Rect) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.spec.rect = rect;
        }
    }

    pub fn set_group(&mut self, node: NodeId, group_id: Option<&str>) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.spec.group_id = group_id.map(String::from);
        }
    }

    pub fn set_computed_opacity(&mut self, node: NodeId, opacity: Option<&str>) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.spec.opacity = opacity.map(String::from);
        }
    }

    pub fn set_computed_transform(&mut self, node: NodeId, transform: Option<&str>) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.spec.transform = transform.map(String::from);
        }
    }

    pub fn set_config(&mut self, node: NodeId, config: ElementConfig) {
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.spec.config = config;
        }
    }

    pub fn flip_id_of(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0)?.spec.flip_id.as_deref()
    }

    pub fn rect_of(&self, node: NodeId) -> Option<Rect> {
        self.nodes.get(node.0).map(|n| n.spec.rect)
    }

    pub fn style(&self, node: NodeId) -> Option<&InlineStyle> {
        self.nodes.get(node.0).map(|n| &n.style)
    }

    pub fn inline_transform(&self, node: NodeId) -> Option<&str> {
        self.style(node)?.transform.as_deref()
    }

    pub fn inline_opacity(&self, node: NodeId) -> Option<f64> {
        self.style(node)?.opacity
    }

    pub fn inline_transform_origin(&self, node: NodeId) -> Option<&str> {
        self.style(node)?.transform_origin.as_deref()
    }

    /// Every inline style write since creation or the last
    /// [`clear_writes`](Self::clear_writes).
    pub fn writes(&self) -> &[StyleWrite] {
        &self.writes
    }

    pub fn writes_for(&self, node: NodeId) -> Vec<&StyleWrite> {
        self.writes.iter().filter(|w| w.node() == node).collect()
    }

    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first descendants of `node`, excluding `node`.
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match self.nodes.get(node.0) {
            Some(n) => n.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.nodes[next.0].children.iter().rev().copied());
        }
        out
    }

    fn node(&self, node: NodeId) -> Option<&Node> {
        self.nodes.get(node.0)
    }

    fn style_mut(&mut self, node: NodeId) -> Option<&mut InlineStyle> {
        self.nodes.get_mut(node.0).map(|n| &mut n.style)
    }
}

impl FlipHost for MemoryDocument {
    type Element = NodeId;

    fn tracked_elements(&self, container: &NodeId) -> Vec<NodeId> {
        self.descendants(*container)
            .into_iter()
            .filter(|n| self.nodes[n.0].spec.flip_id.is_some())
            .collect()
    }

    fn flip_id(&self, element: &NodeId) -> Option<String> {
        self.node(*element)?.spec.flip_id.clone()
    }

    fn group_id(&self, element: &NodeId) -> Option<String> {
        self.node(*element)?.spec.group_id.clone()
    }

    fn bounding_rect(&self, element: &NodeId) -> Rect {
        self.node(*element).map(|n| n.spec.rect).unwrap_or_default()
    }

    fn computed_opacity(&self, element: &NodeId) -> Option<String> {
        self.node(*element)?.spec.opacity.clone()
    }

    fn computed_transform(&self, element: &NodeId) -> Option<String> {
        self.node(*element)?.spec.transform.clone()
    }

    fn find_tracked(&self, container: &NodeId, flip_id: &str) -> Option<NodeId> {
        self.descendants(*container)
            .into_iter()
            .find(|n| self.nodes[n.0].spec.flip_id.as_deref() == Some(flip_id))
    }

    fn inverse_children(&self, element: &NodeId, flip_id: &str) -> Vec<NodeId> {
        self.descendants(*element)
            .into_iter()
            .filter(|n| self.nodes[n.0].spec.inverse_of.as_deref() == Some(flip_id))
            .collect()
    }

    fn element_config(&self, element: &NodeId) -> ElementConfig {
        self.node(*element)
            .map(|n| n.spec.config.clone())
            .unwrap_or_default()
    }

    fn is_attached(&self, element: &NodeId) -> bool {
        let mut current = *element;
        loop {
            if current == self.root() {
                return true;
            }
            match self.node(current).and_then(|n| n.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn set_transform(&mut self, element: &NodeId, transform: &str) {
        if let Some(style) = self.style_mut(*element) {
            style.transform = Some(transform.to_string());
            self.writes.push(StyleWrite::Transform {
                node: *element,
                value: transform.to_string(),
            });
        }
    }

    fn clear_transform(&mut self, element: &NodeId) {
        if let Some(style) = self.style_mut(*element) {
            style.transform = None;
            self.writes.push(StyleWrite::ClearTransform { node: *element });
        }
    }

    fn set_opacity(&mut self, element: &NodeId, opacity: f64) {
        if let Some(style) = self.style_mut(*element) {
            style.opacity = Some(opacity);
            self.writes.push(StyleWrite::Opacity {
                node: *element,
                value: opacity,
            });
        }
    }

    fn set_transform_origin(&mut self, element: &NodeId, origin: &str) {
        if let Some(style) = self.style_mut(*element) {
            style.transform_origin = Some(origin.to_string());
            self.writes.push(StyleWrite::TransformOrigin {
                node: *element,
                value: origin.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> MemoryDocument {
        MemoryDocument::new(Viewport::new(800.0, 600.0))
    }

    #[test]
    fn test_tracked_elements_in_document_order() {
        let mut doc = doc();
        let root = doc.root();
        let list = doc.append(root, NodeSpec::plain());
        let a = doc.append(list, NodeSpec::tracked("a"));
        let nested = doc.append(a, NodeSpec::tracked("nested"));
        let b = doc.append(list, NodeSpec::tracked("b"));
        doc.append(list, NodeSpec::inverse_of("a"));

        assert_eq!(doc.tracked_elements(&root), vec![a, nested, b]);
        assert_eq!(doc.tracked_elements(&a), vec![nested]);
        assert_eq!(doc.find_tracked(&root, "b"), Some(b));
        assert_eq!(doc.find_tracked(&root, "missing"), None);
    }

    #[test]
    fn test_inverse_children_scoped_to_element() {
        let mut doc = doc();
        let root = doc.root();
        let card = doc.append(root, NodeSpec::tracked("card"));
        let label = doc.append(card, NodeSpec::inverse_of("card"));
        let other = doc.append(card, NodeSpec::inverse_of("other"));
        doc.append(root, NodeSpec::inverse_of("card"));

        assert_eq!(doc.inverse_children(&card, "card"), vec![label]);
        assert_eq!(doc.inverse_children(&card, "other"), vec![other]);
    }

    #[test]
    fn test_detach_and_reparent() {
        let mut doc = doc();
        let root = doc.root();
        let wrapper = doc.append(root, NodeSpec::plain());
        let card = doc.append(wrapper, NodeSpec::tracked("card"));
        assert!(doc.is_attached(&card));

        doc.detach(wrapper);
        assert!(!doc.is_attached(&card));
        assert!(doc.tracked_elements(&root).is_empty());

        doc.reparent(card, root);
        assert!(doc.is_attached(&card));
        assert_eq!(doc.tracked_elements(&root), vec![card]);
    }

    #[test]
    fn test_reparent_under_own_descendant_is_ignored() {
        let mut doc = doc();
        let root = doc.root();
        let outer = doc.append(root, NodeSpec::tracked("outer"));
        let inner = doc.append(outer, NodeSpec::tracked("inner"));

        doc.reparent(outer, inner);
        doc.reparent(outer, outer);

        assert!(doc.is_attached(&outer));
        assert!(doc.is_attached(&inner));
        assert_eq!(doc.tracked_elements(&root), vec![outer, inner]);
        assert_eq!(doc.tracked_elements(&inner), Vec::<NodeId>::new());
    }

    #[test]
    fn test_style_writes_are_logged() {
        let mut doc = doc();
        let root = doc.root();
        let card = doc.append(root, NodeSpec::tracked("card"));

        doc.set_transform(&card, "matrix(1, 0, 0, 1, 5, 0)");
        doc.set_opacity(&card, 0.5);
        doc.clear_transform(&card);

        assert_eq!(doc.inline_transform(card), None);
        assert_eq!(doc.inline_opacity(card), Some(0.5));
        assert_eq!(doc.writes().len(), 3);
        assert_eq!(
            doc.writes()[2],
            StyleWrite::ClearTransform { node: card }
        );

        doc.clear_writes();
        assert!(doc.writes().is_empty());
    }
}
