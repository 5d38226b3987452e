//! Component tree: an arena of nodes plus the flat open/close sequence.
//!
//! Nodes live in a [`NodeTree`] and are addressed by [`NodeId`]. Parent and
//! child links are ids, so a node can sit in a replacement tree without
//! being copied.

use crate::matcher::MatchResult;
use serde::Serialize;
use std::ops::{Index, IndexMut};

/// Index of a node in its [`NodeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// `ref={inputRef}` on an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RefBinding {
    /// Name without the `Ref` suffix
    pub name: String,
    /// Name as written in the source
    pub original_name: String,
}

impl RefBinding {
    pub fn new(original_name: &str) -> Self {
        Self {
            name: original_name
                .strip_suffix("Ref")
                .filter(|name| !name.is_empty())
                .unwrap_or(original_name)
                .to_string(),
            original_name: original_name.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// One attribute of an element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeAttribute {
    pub name: String,

    /// Expression text for dynamic attributes, literal text otherwise
    pub value: String,

    /// Value ready to paste into code (`"literal"` or the expression)
    pub default_value: String,

    /// Value as written in the source, before any rewriting
    pub original_value: String,

    /// Written as `name={expr}`
    pub dynamic: bool,
}

impl NodeAttribute {
    /// A quoted attribute: `name="value"`.
    pub fn literal(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            default_value: format!("\"{value}\""),
            original_value: value.to_string(),
            dynamic: false,
        }
    }

    /// An expression attribute: `name={value}`.
    pub fn dynamic(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            default_value: value.to_string(),
            original_value: value.to_string(),
            dynamic: true,
        }
    }
}

/// An `onX={handler}` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NodeEvent {
    /// Event name with the first letter lowered: `onMouseDown` -> `mouseDown`
    pub name: String,
    pub params: Vec<String>,

    #[serde(skip)]
    pub params_area: Option<MatchResult>,

    /// Handler source, re-indented
    pub text: String,

    /// Handler is an inline arrow function
    pub is_function: bool,
}

impl NodeEvent {
    /// Statements of the handler, suitable for a method body.
    ///
    /// Arrow functions yield what follows `=>` (braces unwrapped); any other
    /// handler becomes a call with the event parameters.
    pub fn body(&self) -> String {
        if !self.is_function {
            return format!("{}({});", self.text.trim(), self.params.join(", "));
        }
        let Some((_, body)) = self.text.split_once("=>") else {
            return self.text.trim().to_string();
        };
        let body = body.trim();

        match body.strip_prefix('{').and_then(|b| b.strip_suffix('}')) {
            Some(inner) => {
                let inner = inner.trim_matches('\n');
                let columns = retrofit_blocks::find_indent(inner, false);
                retrofit_blocks::remove_indent(inner, columns)
                    .trim_end()
                    .to_string()
            }
            None if body.ends_with(';') => body.to_string(),
            None => format!("{body};"),
        }
    }
}

/// A child of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NodeChild {
    Node(NodeId),
    Text(String),
}

/// One element or component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentNode {
    /// Tag name: `div`, `Button`, `Foo.Bar`
    pub target: String,

    #[serde(rename = "ref")]
    pub ref_binding: RefBinding,

    /// The `class` attribute (empty value when absent)
    pub class_name: NodeAttribute,

    pub attributes: Vec<NodeAttribute>,
    pub events: Vec<NodeEvent>,
    pub children: Vec<NodeChild>,

    /// Self-closing
    pub inline: bool,

    pub parent: Option<NodeId>,
}

impl ComponentNode {
    /// A bare node with no attributes.
    pub fn new(target: &str) -> Self {
        Self {
            target: target.to_string(),
            class_name: NodeAttribute {
                name: "class".to_string(),
                ..NodeAttribute::default()
            },
            ..Self::default()
        }
    }

    /// A node with the given children, self-closing when there are none.
    pub fn with_children(target: &str, children: Vec<NodeChild>) -> Self {
        Self {
            inline: children.is_empty(),
            children,
            ..Self::new(target)
        }
    }

    /// Capitalized tags are components; lowercase tags are DOM elements.
    pub fn is_component(&self) -> bool {
        self.target
            .chars()
            .next()
            .is_some_and(|first| (first as u32) <= 90)
    }

    pub fn attribute(&self, name: &str) -> Option<&NodeAttribute> {
        find_attribute(self, name)
    }
}

/// An attribute by name. `class` resolves to the class attribute.
pub fn find_attribute<'a>(node: &'a ComponentNode, name: &str) -> Option<&'a NodeAttribute> {
    if name == "class" && !node.class_name.value.is_empty() {
        return Some(&node.class_name);
    }
    node.attributes.iter().find(|attribute| attribute.name == name)
}

/// `"a b"` -> `".a.b"`.
pub fn convert_class_selector(class_name: &str) -> String {
    class_name
        .split_whitespace()
        .map(|class| format!(".{class}"))
        .collect()
}

/// Value of an [`InlineNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum InlineValue {
    Node(NodeId),
    Text(String),
}

/// One entry of the flat sequence: open tag, close tag, self-closing tag or text.
///
/// Text and self-closing tags are both open and close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineNode {
    pub value: InlineValue,
    pub is_open: bool,
    pub is_close: bool,
}

impl InlineNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            value: InlineValue::Text(text.into()),
            is_open: true,
            is_close: true,
        }
    }

    pub fn node(id: NodeId, is_open: bool, is_close: bool) -> Self {
        Self {
            value: InlineValue::Node(id),
            is_open,
            is_close,
        }
    }

    pub fn node_id(&self) -> Option<NodeId> {
        match self.value {
            InlineValue::Node(id) => Some(id),
            InlineValue::Text(_) => None,
        }
    }
}

/// A tree root with its flat sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeResult {
    pub root: NodeId,
    pub inline_nodes: Vec<InlineNode>,
}

/// Node arena.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct NodeTree {
    nodes: Vec<ComponentNode>,
}

impl Index<NodeId> for NodeTree {
    type Output = ComponentNode;

    fn index(&self, id: NodeId) -> &ComponentNode {
        &self.nodes[id.0]
    }
}

impl IndexMut<NodeId> for NodeTree {
    fn index_mut(&mut self, id: NodeId) -> &mut ComponentNode {
        &mut self.nodes[id.0]
    }
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&ComponentNode> {
        self.nodes.get(id.0)
    }

    pub fn insert(&mut self, node: ComponentNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Insert a node and produce its flat sequence.
    ///
    /// Children already in the arena become children of the new node, so a
    /// replacement can wrap the subtree of the node it replaces.
    pub fn create_node(&mut self, node: ComponentNode) -> NodeResult {
        let root = self.insert(node);

        NodeResult {
            root,
            inline_nodes: self.flatten(root),
        }
    }

    /// Pre-order flat sequence of the subtree under `id`.
    ///
    /// Non-inline nodes get a close entry backed by a fresh bare node with
    /// the same target.
    pub fn flatten(&mut self, id: NodeId) -> Vec<InlineNode> {
        let mut sequence = Vec::new();
        self.flatten_into(id, &mut sequence);
        sequence
    }

    fn flatten_into(&mut self, id: NodeId, sequence: &mut Vec<InlineNode>) {
        let inline = self[id].inline;
        sequence.push(InlineNode::node(id, true, inline));

        if inline {
            return;
        }
        let children = self[id].children.clone();

        for child in children {
            match child {
                NodeChild::Text(text) => sequence.push(InlineNode::text(text)),
                NodeChild::Node(child) => self.flatten_into(child, sequence),
            }
        }
        let target = self[id].target.clone();
        let close = self.insert(ComponentNode::new(&target));
        sequence.push(InlineNode::node(close, false, true));
    }

    /// Rebuild parent and child links from a flat sequence.
    ///
    /// Returns the first node of the sequence. Unbalanced close entries are
    /// ignored.
    pub fn link(&mut self, inline_nodes: &[InlineNode]) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = Vec::new();

        for inline in inline_nodes {
            let current = stack.last().copied();

            if let Some(current) = current {
                if inline.is_open {
                    let child = match &inline.value {
                        InlineValue::Node(id) => NodeChild::Node(*id),
                        InlineValue::Text(text) => NodeChild::Text(text.clone()),
                    };
                    self[current].children.push(child);
                }
            }
            let InlineValue::Node(id) = inline.value else {
                continue;
            };
            self[id].parent = current;

            if inline.is_open {
                self[id].children.clear();
                if !inline.is_close {
                    stack.push(id);
                }
            } else if inline.is_close {
                stack.pop();
            }
        }
        inline_nodes.iter().find_map(InlineNode::node_id)
    }

    /// Parent of the node at `id`, if any.
    pub fn parent(&self, id: NodeId) -> Option<&ComponentNode> {
        self[id].parent.map(|parent| &self[parent])
    }
}
