use std::collections::HashMap;

use crate::host::DomHost;
use crate::{Error, Result};

// Recursive DOM walks grow the stack instead of overflowing on deep trees.
const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROW_SIZE: usize = 1024 * 1024;

/// Handle into a [`Document`]'s node arena. Stable for the lifetime of the
/// document; detached nodes keep their id but become unreachable from the
/// root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag_name: String,
    pub(crate) attrs: HashMap<String, String>,
    pub(crate) value: String,
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_type: NodeType,
}

/// In-memory document tree: arena-allocated nodes under a document root,
/// with an id index for document-wide lookup.
///
/// Diagnostics emitted by the utility operations (missing targets) are
/// recorded in a drainable buffer and mirrored to the `log` crate.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    id_index: HashMap<String, NodeId>,
    diagnostics: Vec<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: HashMap<String, String>,
    ) -> NodeId {
        let value = attrs.get("value").cloned().unwrap_or_default();
        let element = Element {
            tag_name,
            attrs,
            value,
        };
        let id = self.create_node(Some(parent), NodeType::Element(element));
        if let Some(id_attr) = self
            .element(id)
            .and_then(|element| element.attrs.get("id").cloned())
        {
            if !id_attr.is_empty() {
                self.id_index.insert(id_attr, id);
            }
        }
        id
    }

    /// Creates an element that belongs to no tree yet. Its `id` attribute,
    /// if any, is indexed only once the node is attached.
    pub fn create_detached_element(&mut self, tag_name: &str) -> NodeId {
        let element = Element {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs: HashMap::new(),
            value: String::new(),
        };
        self.create_node(None, NodeType::Element(element))
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    pub fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes[node_id.0].parent
    }

    /// Document-wide id lookup. Only nodes reachable from the root resolve.
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub fn is_connected(&self, node_id: NodeId) -> bool {
        let mut cursor = Some(node_id);
        while let Some(node) = cursor {
            if node == self.root {
                return true;
            }
            cursor = self.parent(node);
        }
        false
    }

    pub fn text_content(&self, node_id: NodeId) -> String {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            match &self.nodes[node_id.0].node_type {
                NodeType::Document | NodeType::Element(_) => {
                    let mut out = String::new();
                    for child in &self.nodes[node_id.0].children {
                        out.push_str(&self.text_content(*child));
                    }
                    out
                }
                NodeType::Text(text) => text.clone(),
            }
        })
    }

    /// Replaces the node's children with a single text node. Plain text:
    /// the value is never parsed as markup.
    pub fn set_text_content(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if self.element(node_id).is_none() {
            return Err(Error::NotAnElement("text content target".into()));
        }
        let old_children = std::mem::take(&mut self.nodes[node_id.0].children);
        for child in old_children {
            self.nodes[child.0].parent = None;
        }
        if !value.is_empty() {
            self.create_text(node_id, value.to_string());
        }
        self.rebuild_id_index();
        Ok(())
    }

    pub fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|e| e.attrs.get(&name.to_ascii_lowercase()).cloned())
    }

    pub fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let lowered = name.to_ascii_lowercase();
        let old_id = if lowered == "id" {
            self.element(node_id)
                .and_then(|element| element.attrs.get("id").cloned())
        } else {
            None
        };
        let connected = self.is_connected(node_id);

        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::NotAnElement("set attribute target".into()))?;
        element.attrs.insert(lowered.clone(), value.to_string());
        if lowered == "value" {
            element.value = value.to_string();
        }

        if lowered == "id" && connected {
            if let Some(old) = old_id {
                self.id_index.remove(&old);
            }
            if !value.is_empty() {
                self.id_index.insert(value.to_string(), node_id);
            }
        }
        Ok(())
    }

    /// Current control value, seeded from the `value` attribute at parse
    /// time and updated by [`set_value`](Self::set_value) afterwards.
    pub fn value(&self, node_id: NodeId) -> Result<String> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::NotAnElement("value target".into()))?;
        Ok(element.value.clone())
    }

    pub fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::NotAnElement("value target".into()))?;
        element.value = value.to_string();
        Ok(())
    }

    pub fn class_contains(&self, node_id: NodeId, class_name: &str) -> Result<bool> {
        let element = self
            .element(node_id)
            .ok_or_else(|| Error::NotAnElement("class target".into()))?;
        Ok(has_class(element, class_name))
    }

    pub fn class_add(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::NotAnElement("class target".into()))?;
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        if !classes.iter().any(|name| name == class_name) {
            classes.push(class_name.to_string());
        }
        set_class_attr(element, &classes);
        Ok(())
    }

    pub fn class_remove(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self
            .element_mut(node_id)
            .ok_or_else(|| Error::NotAnElement("class target".into()))?;
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        classes.retain(|name| name != class_name);
        set_class_attr(element, &classes);
        Ok(())
    }

    /// Attaches a node (typically a detached one) as the last child of
    /// `parent`. Ids inside the attached subtree become resolvable.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if self.element(parent).is_none() && parent != self.root {
            return Err(Error::NotAnElement("append target".into()));
        }
        if child == self.root {
            return Err(Error::NotAnElement("cannot append the document root".into()));
        }
        if let Some(old_parent) = self.parent(child) {
            self.nodes[old_parent.0].children.retain(|c| *c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        self.rebuild_id_index();
        Ok(())
    }

    /// Detaches the node from its parent. The subtree stays allocated but
    /// is no longer reachable via id lookup.
    pub fn remove_node(&mut self, node: NodeId) -> Result<()> {
        if node == self.root {
            return Err(Error::NotAnElement("cannot remove the document root".into()));
        }
        let Some(parent) = self.parent(node) else {
            return Ok(());
        };
        self.nodes[parent.0].children.retain(|child| *child != node);
        self.nodes[node.0].parent = None;
        self.rebuild_id_index();
        Ok(())
    }

    pub(crate) fn rebuild_id_index(&mut self) {
        let mut next = HashMap::new();
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            match &self.nodes[node.0].node_type {
                NodeType::Element(element) => {
                    if let Some(id) = element.attrs.get("id") {
                        if !id.is_empty() {
                            next.insert(id.clone(), node);
                        }
                    }
                }
                NodeType::Document | NodeType::Text(_) => {}
            }
            for child in self.nodes[node.0].children.iter().rev() {
                stack.push(*child);
            }
        }
        self.id_index = next;
    }

    /// Serializes the tree under `node_id`. Attributes come out sorted by
    /// name so the dump is deterministic and comparable.
    pub fn dump_node(&self, node_id: NodeId) -> String {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            match &self.nodes[node_id.0].node_type {
                NodeType::Document => {
                    let mut out = String::new();
                    for child in &self.nodes[node_id.0].children {
                        out.push_str(&self.dump_node(*child));
                    }
                    out
                }
                NodeType::Text(text) => text.clone(),
                NodeType::Element(element) => {
                    let mut out = String::new();
                    out.push('<');
                    out.push_str(&element.tag_name);
                    let mut attrs: Vec<_> = element.attrs.iter().collect();
                    attrs.sort_by(|a, b| a.0.cmp(b.0));
                    for (k, v) in attrs {
                        out.push(' ');
                        out.push_str(k);
                        out.push_str("=\"");
                        out.push_str(v);
                        out.push('"');
                    }
                    out.push('>');
                    for child in &self.nodes[node_id.0].children {
                        out.push_str(&self.dump_node(*child));
                    }
                    out.push_str("</");
                    out.push_str(&element.tag_name);
                    out.push('>');
                    out
                }
            }
        })
    }

    pub fn dump(&self) -> String {
        self.dump_node(self.root)
    }

    pub(crate) fn diagnose(&mut self, message: String) {
        log::error!("{message}");
        self.diagnostics.push(message);
    }

    /// Drains the recorded missing-target diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<String> {
        std::mem::take(&mut self.diagnostics)
    }
}

impl DomHost for Document {
    type Handle = NodeId;

    fn lookup(&self, id: &str) -> Option<NodeId> {
        self.by_id(id)
    }

    fn create(&mut self, tag: &str) -> NodeId {
        self.create_detached_element(tag)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Err(err) = self.set_attr(node, name, value) {
            log::debug!("set_attribute skipped: {err}");
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Err(err) = self.set_text_content(node, text) {
            log::debug!("set_text skipped: {err}");
        }
    }

    fn detach(&mut self, node: NodeId) {
        if let Err(err) = self.remove_node(node) {
            log::debug!("detach skipped: {err}");
        }
    }

    fn input_value(&self, node: NodeId) -> String {
        self.value(node).unwrap_or_default()
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Err(err) = self.class_add(node, class) {
            log::debug!("add_class skipped: {err}");
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Err(err) = self.class_remove(node, class) {
            log::debug!("remove_class skipped: {err}");
        }
    }

    fn missing_target(&mut self, operation: &str, id: &str) {
        self.diagnose(format!("{operation}: element with id {id} not found"));
    }
}

fn has_class(element: &Element, class_name: &str) -> bool {
    element
        .attrs
        .get("class")
        .map(|classes| classes.split_whitespace().any(|c| c == class_name))
        .unwrap_or(false)
}

fn class_tokens(class_attr: Option<&str>) -> Vec<String> {
    class_attr
        .map(|value| {
            value
                .split_whitespace()
                .map(ToOwned::to_owned)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default()
}

fn set_class_attr(element: &mut Element, classes: &[String]) {
    if classes.is_empty() {
        element.attrs.remove("class");
    } else {
        element.attrs.insert("class".to_string(), classes.join(" "));
    }
}
