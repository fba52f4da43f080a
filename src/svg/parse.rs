//! Reading SVG files into an [`Element`] tree.

use std::fs;
use std::path::Path;

use roxmltree::{Document, ParsingOptions};

use super::element::{Element, SVG_NAMESPACE, XLINK_NAMESPACE};
use crate::error::{Error, Result};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Parse SVG source text.
///
/// Element names lose their namespace prefix. Elements and attributes from
/// foreign namespaces (editor metadata such as `sodipodi:namedview`) are
/// dropped; `xlink:` and `xml:` attributes are kept.
pub fn parse_svg(src: &str) -> Result<Element> {
    parse_named(src, "<memory>")
}

/// Read and parse an SVG file.
pub fn parse_svg_file<P: AsRef<Path>>(path: P) -> Result<Element> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::InputNotFound(path.to_path_buf()));
    }
    let src = fs::read_to_string(path)?;
    parse_named(&src, &path.display().to_string())
}

fn parse_named(src: &str, origin: &str) -> Result<Element> {
    let mut options = ParsingOptions::default();
    options.allow_dtd = true;

    let doc = Document::parse_with_options(src, options).map_err(|e| Error::malformed(origin, e))?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(Error::malformed(
            origin,
            format!("root element is <{}>, not <svg>", root.tag_name().name()),
        ));
    }

    let mut svg = build_element(root);
    svg.set_attr("xmlns", SVG_NAMESPACE);
    svg.declare_xlink();
    Ok(svg)
}

fn is_svg_namespace(ns: Option<&str>) -> bool {
    matches!(ns, None | Some(SVG_NAMESPACE))
}

fn build_element(node: roxmltree::Node<'_, '_>) -> Element {
    let mut element = Element::new(node.tag_name().name());

    for a in node.attributes() {
        let key = match a.namespace() {
            None => a.name().to_string(),
            Some(XLINK_NAMESPACE) => format!("xlink:{}", a.name()),
            Some(XML_NAMESPACE) => format!("xml:{}", a.name()),
            Some(_) => continue,
        };
        element.attrs.push((key, a.value().to_string()));
    }

    for child in node.children() {
        if child.is_element() {
            if is_svg_namespace(child.tag_name().namespace()) {
                element = element.child(build_element(child));
            }
        } else if child.is_text() {
            if let Some(text) = child.text().filter(|t| !t.trim().is_empty()) {
                element = element.text(text);
            }
        }
    }

    element
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strips_namespaces() {
        let src = r##"<?xml version="1.0"?>
<svg xmlns="http://www.w3.org/2000/svg"
     xmlns:xlink="http://www.w3.org/1999/xlink"
     xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
     xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd"
     width="100mm" height="50mm" viewBox="0 0 100 50">
  <sodipodi:namedview id="nv"/>
  <g inkscape:label="Layer 1" id="layer">
    <path d="M 0 0 L 10 10"/>
    <use xlink:href="#layer"/>
  </g>
  <title>Boat</title>
</svg>"##;
        let svg = parse_svg(src).unwrap();
        assert_eq!(svg.name, "svg");
        assert_eq!(svg.get_attr("viewBox"), Some("0 0 100 50"));
        assert_eq!(svg.get_attr("xmlns:xlink"), Some(XLINK_NAMESPACE));

        let children: Vec<_> = svg.element_children().map(|e| e.name.as_str()).collect();
        assert_eq!(children, vec!["g", "title"]);

        let layer = svg.find_by_id("layer").unwrap();
        assert!(layer.get_attr("label").is_none());
        let uses: Vec<_> = layer.element_children().filter(|e| e.name == "use").collect();
        assert_eq!(uses[0].get_attr("xlink:href"), Some("#layer"));

        let title = svg.element_children().last().unwrap();
        assert_eq!(title.text_content(), "Boat");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_svg("<svg"), Err(Error::MalformedInput { .. })));
        assert!(matches!(
            parse_svg("<html/>"),
            Err(Error::MalformedInput { .. })
        ));
        assert!(matches!(
            parse_svg_file("/nonexistent/drawing.svg"),
            Err(Error::InputNotFound(_))
        ));
    }

    #[test]
    fn test_reserialize() {
        let svg = parse_svg(r#"<svg xmlns="http://www.w3.org/2000/svg"><rect x="1"/></svg>"#)
            .unwrap();
        let out = svg.to_document_string();
        assert!(out.contains("<rect x=\"1\" />"));
        assert!(parse_svg(&out).is_ok());
    }
}
