//! Markup view of a sequencer frame
//!
//! Builds the node tree a web host renders: a container element carrying the
//! easing class and caller class/style, and one `span` per character position
//! carrying its own style hooks (`slot-char`, `slot-space` or
//! `slot-char-animated`, and `data-easing`). `Display` renders HTML.

use std::fmt::{self, Write as _};

use crate::easing::EasingType;
use crate::sequencer::{Cell, CharacterSequencer, WordSequencer};

/// Element or text node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attributes: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add a class; blank names are ignored
    pub fn class(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.classes.push(name.trim().to_string());
        }
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.iter().any(|c| c == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Child elements, skipping text nodes
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of all descendants
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => collect_text(&element.children, out),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(element) => fmt::Display::fmt(element, f),
            Node::Text(text) => f.write_str(&escape(text)),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        if !self.classes.is_empty() {
            write!(f, " class=\"{}\"", escape(&self.classes.join(" ")))?;
        }
        for (name, value) in &self.attributes {
            write!(f, " {}=\"{}\"", name, escape(value))?;
        }
        f.write_char('>')?;
        for child in &self.children {
            fmt::Display::fmt(child, f)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

/// Caller-supplied presentation passed straight through to the container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presentation {
    pub class_name: String,
    /// Inline style declarations, e.g. `font-size: 2rem`
    pub style: Option<String>,
}

impl Presentation {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            style: None,
        }
    }

    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    fn apply(&self, mut element: Element) -> Element {
        element = element.class(self.class_name.clone());
        if let Some(style) = self.style.as_ref().filter(|s| !s.trim().is_empty()) {
            element = element.attr("style", style.clone());
        }
        element
    }
}

/// One leaf per display position
pub fn char_node(cell: &Cell, easing: EasingType) -> Element {
    let kind = if cell.is_blank() {
        "slot-space"
    } else {
        "slot-char-animated"
    };
    Element::new("span")
        .class("slot-char")
        .class(kind)
        .attr("data-easing", easing.name())
        .child(Node::Text(cell.glyph.to_string()))
}

/// Node tree of a character sequencer's current frame
pub fn characters(seq: &CharacterSequencer, presentation: &Presentation) -> Element {
    let easing = seq.options().easing;
    let container = Element::new("div")
        .class("slot-text-container")
        .class(easing.class_name());
    let container = presentation.apply(container);
    seq.cells()
        .iter()
        .fold(container, |el, cell| el.child(Node::Element(char_node(cell, easing))))
}

/// Node tree of a word sequencer's current frame; `None` for an empty list
pub fn words(seq: &WordSequencer, presentation: &Presentation) -> Option<Element> {
    if seq.is_empty() {
        return None;
    }
    let easing = seq.options().easing;
    let outer = Element::new("div")
        .class("slot-text-words-container")
        .class(easing.class_name());
    let inner = characters(seq.chars(), &Presentation::default());
    Some(presentation.apply(outer).child(Node::Element(inner)))
}

/// HTML of a word sequencer frame; an empty list renders nothing
pub fn words_html(seq: &WordSequencer, presentation: &Presentation) -> String {
    words(seq, presentation)
        .map(|element| element.to_string())
        .unwrap_or_default()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
