//! Scene graph nodes.

use serde::{Deserialize, Serialize};

use crate::attribute::NodeAttribute;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribute: Option<NodeAttribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute: None,
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: NodeAttribute) -> Self {
        self.attribute = Some(attribute);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn is_skeleton_joint(&self) -> bool {
        self.attribute
            .as_ref()
            .is_some_and(NodeAttribute::is_skeleton_joint)
    }

    /// Attribute type name, or "None" when the node carries no attribute.
    pub fn attribute_type_name(&self) -> &str {
        self.attribute
            .as_ref()
            .map(NodeAttribute::type_name)
            .unwrap_or("None")
    }

    /// Pre-order depth-first walk; `visit` receives each node with its depth.
    /// Returning `false` from `visit` stops the walk.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node, usize) -> bool) -> bool {
        self.walk_at(0, visit)
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a Node, usize) -> bool) -> bool {
        if !visit(self, depth) {
            return false;
        }
        self.children.iter().all(|child| child.walk_at(depth + 1, visit))
    }

    /// First node named exactly `name`, in pre-order.
    pub fn find(&self, name: &str) -> Option<&Node> {
        let mut found = None;
        self.walk(&mut |node, _| {
            if node.name == name {
                found = Some(node);
                return false;
            }
            true
        });
        found
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }
}
