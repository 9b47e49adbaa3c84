//! DOM Node
//!
//! Nodes live in the `DomTree` arena and refer to each other by `NodeId`.
//! Children are kept as an ordered id list on the parent.

use crate::{DOMTokenList, NodeId};

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// Child nodes in document order
    pub children: Vec<NodeId>,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self::with_data(NodeData::Text(content.to_string()))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            children: Vec::new(),
            data,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
}

/// Element-specific data
#[derive(Debug, Default)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,
    /// Cached id attribute
    pub id: Option<String>,
    /// classList
    pub class_list: DOMTokenList,
    /// Remaining attributes
    attrs: Vec<Attribute>,
    /// Inline style declarations, in insertion order
    style: Vec<(String, String)>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Get an attribute value
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id.as_deref(),
            _ => self.attrs.iter().find(|a| a.name == name).map(|a| a.value.as_str()),
        }
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match name {
            "id" => self.id = Some(value.to_string()),
            "class" => self.class_list = DOMTokenList::from_string(value),
            _ => {
                if let Some(attr) = self.attrs.iter_mut().find(|a| a.name == name) {
                    attr.value = value.to_string();
                } else {
                    self.attrs.push(Attribute {
                        name: name.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        if name == "id" {
            return self.id.take();
        }
        let pos = self.attrs.iter().position(|a| a.name == name)?;
        Some(self.attrs.remove(pos).value)
    }

    /// `title` attribute (tooltip)
    pub fn title(&self) -> Option<&str> {
        self.get_attr("title")
    }

    /// Read an inline style property
    pub fn style_property(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Set an inline style property, replacing an existing declaration
    pub fn set_style_property(&mut self, property: &str, value: &str) {
        if let Some(decl) = self.style.iter_mut().find(|(name, _)| name == property) {
            decl.1 = value.to_string();
        } else {
            self.style.push((property.to_string(), value.to_string()));
        }
    }

    /// Serialized `style` attribute
    pub fn style_text(&self) -> String {
        self.style
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}
