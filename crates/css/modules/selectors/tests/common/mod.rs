//! Minimal in-memory element tree for exercising selector matching.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use css_selectors::{ElementAdapter, StyleKeys, TypeKey};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Default)]
struct TestNode {
    tag: String,
    style_key: Option<TypeKey>,
    id: Option<String>,
    classes: HashSet<String>,
    attributes: HashMap<String, String>,
    pseudo_classes: HashSet<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Default)]
pub struct TestTree {
    keys: StyleKeys,
    nodes: Vec<TestNode>,
}

impl TestTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element of type `tag` as the last child of `parent`.
    pub fn insert(&mut self, parent: Option<NodeId>, tag: &str) -> NodeId {
        let style_key = self.keys.intern(tag);
        self.push_node(parent, tag, Some(style_key))
    }

    /// Append an element whose style type cannot be resolved.
    pub fn insert_untyped(&mut self, parent: Option<NodeId>) -> NodeId {
        self.push_node(parent, "", None)
    }

    /// Append an element named `tag` whose style type cannot be resolved.
    pub fn insert_untyped_tagged(&mut self, parent: Option<NodeId>, tag: &str) -> NodeId {
        self.push_node(parent, tag, None)
    }

    fn push_node(&mut self, parent: Option<NodeId>, tag: &str, style_key: Option<TypeKey>) -> NodeId {
        let node = NodeId(self.nodes.len());
        self.nodes.push(TestNode {
            tag: tag.to_owned(),
            style_key,
            parent,
            ..TestNode::default()
        });
        if let Some(parent_node) = parent.and_then(|parent_id| self.nodes.get_mut(parent_id.0)) {
            parent_node.children.push(node);
        }
        node
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        if let Some(info) = self.nodes.get_mut(node.0) {
            info.id = Some(id.to_owned());
        }
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(info) = self.nodes.get_mut(node.0) {
            info.classes.insert(class.to_owned());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(info) = self.nodes.get_mut(node.0) {
            info.classes.remove(class);
        }
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(info) = self.nodes.get_mut(node.0) {
            info.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    pub fn set_pseudo_class(&mut self, node: NodeId, pseudo_class: &str, enabled: bool) {
        if let Some(info) = self.nodes.get_mut(node.0) {
            if enabled {
                info.pseudo_classes.insert(pseudo_class.to_owned());
            } else {
                info.pseudo_classes.remove(pseudo_class);
            }
        }
    }

    /// Style key minted for `tag`, if any element of that type was inserted.
    pub fn key_of(&self, tag: &str) -> Option<TypeKey> {
        self.keys.get(tag)
    }
}

impl ElementAdapter for TestTree {
    type Handle = NodeId;

    fn unique_key(&self, element: NodeId) -> u64 {
        element.0 as u64
    }

    fn style_key(&self, element: NodeId) -> Option<TypeKey> {
        self.nodes.get(element.0).and_then(|info| info.style_key)
    }

    fn parent(&self, element: NodeId) -> Option<NodeId> {
        self.nodes.get(element.0).and_then(|info| info.parent)
    }

    fn previous_sibling_element(&self, element: NodeId) -> Option<NodeId> {
        let parent = self.parent(element)?;
        let siblings = &self.nodes.get(parent.0)?.children;
        let position = siblings.iter().position(|&sibling| sibling == element)?;
        position
            .checked_sub(1)
            .and_then(|previous| siblings.get(previous).copied())
    }

    fn tag_name(&self, element: NodeId) -> &str {
        self.nodes.get(element.0).map_or("", |info| info.tag.as_str())
    }

    fn element_id(&self, element: NodeId) -> Option<&str> {
        self.nodes.get(element.0).and_then(|info| info.id.as_deref())
    }

    fn has_class(&self, element: NodeId, class: &str) -> bool {
        self.nodes
            .get(element.0)
            .is_some_and(|info| info.classes.contains(class))
    }

    fn attr(&self, element: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(element.0)
            .and_then(|info| info.attributes.get(name))
            .map(String::as_str)
    }

    fn has_pseudo_class(&self, element: NodeId, pseudo_class: &str) -> bool {
        self.nodes
            .get(element.0)
            .is_some_and(|info| info.pseudo_classes.contains(pseudo_class))
    }
}
