//! A small typed XML tree for SVG output.
//!
//! Drawings are assembled as [`Element`] values and written once at the
//! end. Escaping and well-formedness are handled here, never by callers
//! formatting markup by hand.

use std::fmt::Write as _;

/// XML declaration written before every document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

/// SVG namespace URI.
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// XLink namespace URI, bound to the `xlink:` prefix.
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

const INDENT: &str = "  ";

/// A child of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element
    Element(Element),
    /// Character data
    Text(String),
}

/// An XML element with ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name
    pub name: String,
    /// Attributes in output order
    pub attrs: Vec<(String, String)>,
    /// Children in output order
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add (or replace) an attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Append a child element.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Append several child elements.
    pub fn children<I: IntoIterator<Item = Element>>(mut self, children: I) -> Self {
        self.children
            .extend(children.into_iter().map(Node::Element));
        self
    }

    /// Append a text node.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Set an attribute in place, keeping its position if it exists.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.attrs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((key, value)),
        }
    }

    /// Look up an attribute.
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove an attribute, returning its value.
    pub fn remove_attr(&mut self, key: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|(k, _)| k == key)?;
        Some(self.attrs.remove(pos).1)
    }

    /// The `id` attribute.
    pub fn id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Child elements, skipping text.
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Mutable child elements, skipping text.
    pub fn element_children_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// This element and all descendant elements, depth first.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = vec![self];
        for child in self.element_children() {
            out.extend(child.descendants());
        }
        out
    }

    /// Whether this element or any descendant carries an `xlink:` attribute.
    pub fn uses_xlink(&self) -> bool {
        self.descendants()
            .iter()
            .any(|e| e.attrs.iter().any(|(k, _)| k.starts_with("xlink:")))
    }

    /// Declare the `xlink:` prefix on this element when the tree needs it.
    pub fn declare_xlink(&mut self) {
        if self.uses_xlink() {
            self.set_attr("xmlns:xlink", XLINK_NAMESPACE);
        }
    }

    /// Apply `f` to this element and every descendant element.
    pub fn for_each_mut<F: FnMut(&mut Element)>(&mut self, f: &mut F) {
        f(self);
        for child in self.element_children_mut() {
            child.for_each_mut(f);
        }
    }

    /// Find the first element (self included) with the given id.
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.element_children().find_map(|c| c.find_by_id(id))
    }

    /// Concatenated text content of direct text children.
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(t) => Some(t.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Serialize as a standalone document with an XML declaration.
    pub fn to_document_string(&self) -> String {
        let mut out = String::with_capacity(4096);
        out.push_str(XML_DECLARATION);
        out.push('\n');
        self.write_to(&mut out, 0);
        out
    }

    /// Serialize this element (and children) as an indented fragment.
    pub fn to_fragment_string(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out, 0);
        out
    }

    fn write_to(&self, out: &mut String, depth: usize) {
        let pad = INDENT.repeat(depth);
        let _ = write!(out, "{}<{}", pad, self.name);
        for (k, v) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", k, escape_attr(v));
        }

        if self.children.is_empty() {
            out.push_str(" />\n");
            return;
        }

        let text_only = self.children.iter().all(|n| matches!(n, Node::Text(_)));
        if text_only {
            let _ = writeln!(
                out,
                ">{}</{}>",
                escape_text(&self.text_content()),
                self.name
            );
            return;
        }

        out.push_str(">\n");
        for child in &self.children {
            match child {
                Node::Element(e) => e.write_to(out, depth + 1),
                Node::Text(t) => {
                    let t = t.trim();
                    if !t.is_empty() {
                        let _ = writeln!(out, "{}{}{}", pad, INDENT, escape_text(t));
                    }
                }
            }
        }
        let _ = writeln!(out, "{}</{}>", pad, self.name);
    }
}

/// Escape character data.
pub fn escape_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

/// Escape an attribute value for double-quoted output.
pub fn escape_attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_serialize() {
        let root = Element::new("svg")
            .attr("width", "210mm")
            .child(Element::new("g").attr("id", "borders").child(
                Element::new("path").attr("d", "M 0 0 H 10").attr("id", "border"),
            ))
            .child(Element::new("title").text("Legend"));

        let out = root.to_document_string();
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n",
            "<svg width=\"210mm\">\n",
            "  <g id=\"borders\">\n",
            "    <path d=\"M 0 0 H 10\" id=\"border\" />\n",
            "  </g>\n",
            "  <title>Legend</title>\n",
            "</svg>\n",
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_escaping() {
        let e = Element::new("g")
            .attr("data-x", "a\"b<c>&")
            .child(Element::new("desc").text("1 < 2 & 3"));
        let out = e.to_fragment_string();
        assert!(out.contains("data-x=\"a&quot;b&lt;c&gt;&amp;\""));
        assert!(out.contains("<desc>1 &lt; 2 &amp; 3</desc>"));
    }

    #[test]
    fn test_set_attr_keeps_position() {
        let mut e = Element::new("rect").attr("x", 1).attr("y", 2);
        e.set_attr("x", 5);
        assert_eq!(e.attrs[0], ("x".to_string(), "5".to_string()));
        assert_eq!(e.remove_attr("y").as_deref(), Some("2"));
        assert!(e.get_attr("y").is_none());
    }

    #[test]
    fn test_find_and_descendants() {
        let root = Element::new("svg").child(
            Element::new("g")
                .attr("id", "legend")
                .child(Element::new("line").attr("id", "legend-row-divider-0")),
        );
        assert_eq!(root.descendants().len(), 3);
        assert_eq!(
            root.find_by_id("legend-row-divider-0").map(|e| e.name.as_str()),
            Some("line")
        );
        assert!(root.find_by_id("nope").is_none());
    }

    #[test]
    fn test_for_each_mut() {
        let mut root = Element::new("svg")
            .child(Element::new("rect"))
            .child(Element::new("g").child(Element::new("rect")));
        let mut count = 0;
        root.for_each_mut(&mut |e| {
            if e.name == "rect" {
                e.set_attr("fill", "none");
                count += 1;
            }
        });
        assert_eq!(count, 2);
        assert!(root
            .descendants()
            .iter()
            .filter(|e| e.name == "rect")
            .all(|e| e.get_attr("fill") == Some("none")));
    }

    #[test]
    fn test_declare_xlink_only_when_used() {
        let mut plain = Element::new("svg").child(Element::new("g"));
        plain.declare_xlink();
        assert_eq!(plain.get_attr("xmlns:xlink"), None);

        let mut linked = Element::new("svg")
            .child(Element::new("g").child(Element::new("use").attr("xlink:href", "#a")));
        assert!(linked.uses_xlink());
        linked.declare_xlink();
        assert_eq!(linked.get_attr("xmlns:xlink"), Some(XLINK_NAMESPACE));
    }
}
