use std::{borrow::Cow, fmt};

use quick_xml::{
    Reader,
    escape::{escape, partial_escape, unescape},
    events::{BytesStart, Event},
};

use super::XmlError;

/// Handle to a node inside an [`XmlTree`].
///
/// Handles are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);

/// An attribute as written in the source, value kept escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    raw_value: String,
}

impl Attribute {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unescaped attribute value.
    pub fn value(&self) -> Cow<'_, str> {
        unescape_lossy(&self.raw_value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    /// Source text between `<` and `>` (or `/>`); dropped once an attribute changes.
    raw_start: Option<String>,
    self_closing: bool,
}

impl Element {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            raw_start: None,
            self_closing: false,
        }
    }

    /// Qualified name as written (`prefix:local` or `local`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without namespace prefix.
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(Attribute::value)
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        let raw_value = escape(value).into_owned();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(attr) if attr.raw_value == raw_value => return,
            Some(attr) => attr.raw_value = raw_value,
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                raw_value,
            }),
        }
        self.raw_start = None;
    }
}

/// Node payloads. Text-like variants hold the raw (escaped) source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element(Element),
    Text(String),
    CData(String),
    Comment(String),
    ProcessingInstruction(String),
    Declaration(String),
    DocType(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed XML document.
///
/// Node 0 is the document node. Nodes removed from the tree stay in the arena
/// but are no longer reachable from the document node.
#[derive(Debug, Clone)]
pub struct XmlTree {
    nodes: Vec<Node>,
}

impl XmlTree {
    fn empty() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Parse a complete XML document.
    pub fn parse(text: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(text);
        let mut tree = Self::empty();
        let mut open: Vec<NodeId> = vec![ROOT];

        loop {
            let parent = open.last().copied().unwrap_or(ROOT);
            match reader.read_event()? {
                Event::Start(start) => {
                    let element = read_element(&start, false)?;
                    let id = tree.push_element(parent, element)?;
                    open.push(id);
                }
                Event::Empty(start) => {
                    let element = read_element(&start, true)?;
                    tree.push_element(parent, element)?;
                }
                Event::End(end) => {
                    if open.len() == 1 {
                        let name = std::str::from_utf8(end.name().as_ref())?.to_string();
                        return Err(XmlError::UnexpectedEnd(name));
                    }
                    open.pop();
                }
                Event::Text(text) => {
                    let raw = std::str::from_utf8(&text)?;
                    unescape(raw)?;
                    if parent == ROOT && !raw.trim().is_empty() {
                        return Err(XmlError::TextOutsideRoot);
                    }
                    tree.push(parent, NodeKind::Text(raw.to_string()));
                }
                Event::CData(cdata) => {
                    if parent == ROOT {
                        return Err(XmlError::TextOutsideRoot);
                    }
                    let raw = std::str::from_utf8(&cdata)?;
                    tree.push(parent, NodeKind::CData(raw.to_string()));
                }
                Event::Comment(comment) => {
                    let raw = std::str::from_utf8(&comment)?;
                    tree.push(parent, NodeKind::Comment(raw.to_string()));
                }
                Event::PI(pi) => {
                    let raw = std::str::from_utf8(&pi)?;
                    tree.push(parent, NodeKind::ProcessingInstruction(raw.to_string()));
                }
                Event::Decl(decl) => {
                    let raw = std::str::from_utf8(&decl)?;
                    tree.push(parent, NodeKind::Declaration(raw.to_string()));
                }
                Event::DocType(doctype) => {
                    let raw = std::str::from_utf8(&doctype)?;
                    tree.push(parent, NodeKind::DocType(raw.to_string()));
                }
                Event::Eof => break,
            }
        }

        if let Some(&unclosed) = open.get(1) {
            let name = tree.element(unclosed).map(Element::name).unwrap_or_default();
            return Err(XmlError::UnclosedElement(name.to_string()));
        }
        if tree.document_element().is_none() {
            return Err(XmlError::NoRootElement);
        }

        Ok(tree)
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    fn push_element(&mut self, parent: NodeId, element: Element) -> Result<NodeId, XmlError> {
        if parent == ROOT && self.document_element().is_some() {
            return Err(XmlError::MultipleRootElements);
        }
        Ok(self.push(parent, NodeKind::Element(element)))
    }

    // ============================================================
    // Navigation
    // ============================================================

    /// The document node; parent of the root element, declaration and prolog.
    pub fn root(&self) -> NodeId {
        ROOT
    }

    pub fn document_element(&self) -> Option<NodeId> {
        self.children(ROOT)
            .iter()
            .copied()
            .find(|&id| self.element(id).is_some())
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    /// True if `id` is an element whose local name is `name`.
    pub fn is_element_named(&self, id: NodeId, name: &str) -> bool {
        self.element(id)
            .is_some_and(|element| element.local_name() == name)
    }

    /// Child elements of `id` with the given local name, in document order.
    pub fn child_elements<'a>(
        &'a self,
        id: NodeId,
        name: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&child| self.is_element_named(child, name))
    }

    pub fn first_child_element(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.child_elements(id, name).next()
    }

    /// All nodes below `id` in document order (pre-order), excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        result
    }

    /// All elements in the document with the given local name, in document order.
    pub fn elements_by_name(&self, name: &str) -> Vec<NodeId> {
        self.descendants(ROOT)
            .into_iter()
            .filter(|&id| self.is_element_named(id, name))
            .collect()
    }

    // ============================================================
    // Content access
    // ============================================================

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.element(id)
            .and_then(|element| element.attribute(name))
            .map(Cow::into_owned)
    }

    /// Unescaped text of a text or CDATA node; `None` for anything else.
    pub fn node_text(&self, id: NodeId) -> Option<String> {
        match &self.nodes[id.0].kind {
            NodeKind::Text(raw) => Some(unescape_lossy(raw).into_owned()),
            NodeKind::CData(raw) => Some(raw.clone()),
            _ => None,
        }
    }

    /// Concatenated text of all text and CDATA nodes below `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.node_text(id) {
            return text;
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|node| self.node_text(node))
            .collect()
    }

    // ============================================================
    // Mutation
    // ============================================================

    /// Set an attribute on an element. Does nothing for non-element nodes.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeKind::Element(element) = &mut self.nodes[id.0].kind {
            element.set_attribute(name, value);
        }
    }

    /// Replace the text of a text or CDATA node. CDATA nodes become text nodes.
    pub fn set_node_text(&mut self, id: NodeId, value: &str) {
        let node = &mut self.nodes[id.0];
        if matches!(node.kind, NodeKind::Text(_) | NodeKind::CData(_)) {
            node.kind = NodeKind::Text(partial_escape(value).into_owned());
        }
    }

    /// Detach all children of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
    }

    /// Replace all children of `id` with a single text node.
    pub fn replace_children_with_text(&mut self, id: NodeId, value: &str) {
        self.clear_children(id);
        self.push(id, NodeKind::Text(partial_escape(value).into_owned()));
    }

    /// Append a new, empty element as last child of `parent`.
    pub fn append_element(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.push(parent, NodeKind::Element(Element::new(name)))
    }

    /// Insert a new, empty element directly after `sibling`.
    pub fn insert_element_after(&mut self, sibling: NodeId, name: &str) -> NodeId {
        self.insert_after(sibling, NodeKind::Element(Element::new(name)))
    }

    /// Insert a new text node directly after `sibling`.
    pub fn insert_text_after(&mut self, sibling: NodeId, value: &str) -> NodeId {
        self.insert_after(sibling, NodeKind::Text(partial_escape(value).into_owned()))
    }

    /// Insert a new text node as first child of `parent`.
    pub fn prepend_text(&mut self, parent: NodeId, value: &str) -> NodeId {
        self.insert_child(parent, 0, NodeKind::Text(partial_escape(value).into_owned()))
    }

    /// Append a new text node as last child of `parent`.
    pub fn append_text(&mut self, parent: NodeId, value: &str) -> NodeId {
        self.push(parent, NodeKind::Text(partial_escape(value).into_owned()))
    }

    fn insert_after(&mut self, sibling: NodeId, kind: NodeKind) -> NodeId {
        let Some(parent) = self.parent(sibling) else {
            return self.push(sibling, kind);
        };
        let position = self
            .children(parent)
            .iter()
            .position(|&child| child == sibling)
            .map_or(self.children(parent).len(), |index| index + 1);
        self.insert_child(parent, position, kind)
    }

    fn insert_child(&mut self, parent: NodeId, position: usize, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        let siblings = &mut self.nodes[parent.0].children;
        siblings.insert(position.min(siblings.len()), id);
        id
    }

    /// Append deep copies of the children of `from` to `to`.
    pub fn copy_children(&mut self, from: NodeId, to: NodeId) {
        let children = self.children(from).to_vec();
        for child in children {
            self.deep_copy(child, to);
        }
    }

    fn deep_copy(&mut self, id: NodeId, parent: NodeId) -> NodeId {
        let kind = self.nodes[id.0].kind.clone();
        let copy = self.push(parent, kind);
        let children = self.children(id).to_vec();
        for child in children {
            self.deep_copy(child, copy);
        }
        copy
    }

    // ============================================================
    // Serialization
    // ============================================================

    fn write_node(&self, id: NodeId, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = &self.nodes[id.0];
        match &node.kind {
            NodeKind::Document => {
                for &child in &node.children {
                    self.write_node(child, f)?;
                }
                Ok(())
            }
            NodeKind::Element(element) => {
                match &element.raw_start {
                    Some(raw) => write!(f, "<{}", raw)?,
                    None => {
                        write!(f, "<{}", element.name)?;
                        for attr in &element.attributes {
                            let quote = if attr.raw_value.contains('"') { '\'' } else { '"' };
                            write!(f, " {}={quote}{}{quote}", attr.name, attr.raw_value)?;
                        }
                    }
                }
                if node.children.is_empty() && element.self_closing {
                    return f.write_str("/>");
                }
                f.write_str(">")?;
                for &child in &node.children {
                    self.write_node(child, f)?;
                }
                write!(f, "</{}>", element.name)
            }
            NodeKind::Text(raw) => f.write_str(raw),
            NodeKind::CData(raw) => write!(f, "<![CDATA[{}]]>", raw),
            NodeKind::Comment(raw) => write!(f, "<!--{}-->", raw),
            NodeKind::ProcessingInstruction(raw) | NodeKind::Declaration(raw) => {
                write!(f, "<?{}?>", raw)
            }
            NodeKind::DocType(raw) => write!(f, "<!DOCTYPE {}>", raw),
        }
    }
}

impl fmt::Display for XmlTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(ROOT, f)
    }
}

fn read_element(start: &BytesStart<'_>, self_closing: bool) -> Result<Element, XmlError> {
    let name = std::str::from_utf8(start.name().as_ref())?.to_string();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let raw_value = std::str::from_utf8(&attr.value)?.to_string();
        unescape(&raw_value)?;
        attributes.push(Attribute {
            name: std::str::from_utf8(attr.key.as_ref())?.to_string(),
            raw_value,
        });
    }
    Ok(Element {
        name,
        attributes,
        raw_start: Some(std::str::from_utf8(start)?.to_string()),
        self_closing,
    })
}

fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

/// Values are validated at parse time, so the fallback only covers text
/// produced by this module's own escaping.
fn unescape_lossy(raw: &str) -> Cow<'_, str> {
    unescape(raw).unwrap_or(Cow::Borrowed(raw))
}
