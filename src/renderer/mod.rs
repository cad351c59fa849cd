//! Markup renderer - serializing rendered elements for a document host.
//!
//! Walks an [`Element`] (or a mounted tree) and emits markup: attributes in
//! forwarding order, then the class slot, then the style slot as an inline
//! declaration list. Text content and attribute values are escaped; void
//! variants emit no closing tag. Handlers are host-side wiring and do not
//! appear in markup.

use crate::element::{Child, Element};
use crate::host::{MountedChild, MountedNode};
use crate::style::StyleMap;
use crate::types::{AttrValue, ElementTag};

// =============================================================================
// Escaping
// =============================================================================

/// Escape a text run for element content.
fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
}

/// Escape an attribute value (always double-quoted).
fn escape_attr(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

// =============================================================================
// Open Tag
// =============================================================================

/// Write `<tag attrs... class style>`, shared by both tree walks.
fn write_open_tag(
    out: &mut String,
    tag: ElementTag,
    attrs: &[(String, AttrValue)],
    class: Option<&str>,
    style: &StyleMap,
) {
    out.push('<');
    out.push_str(tag.as_str());

    for (name, value) in attrs {
        match value {
            AttrValue::Text(text) => {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                escape_attr(text, out);
                out.push('"');
            }
            AttrValue::Number(number) => {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&number.to_string());
                out.push('"');
            }
            // Boolean attributes: present bare, or absent.
            AttrValue::Flag(true) => {
                out.push(' ');
                out.push_str(name);
            }
            AttrValue::Flag(false) => {}
        }
    }

    if let Some(class) = class {
        out.push_str(" class=\"");
        escape_attr(class, out);
        out.push('"');
    }

    if !style.is_empty() {
        out.push_str(" style=\"");
        escape_attr(&style.to_inline(), out);
        out.push('"');
    }

    out.push('>');
}

// =============================================================================
// Element Markup
// =============================================================================

/// Serialize a rendered element to markup.
pub fn to_markup(element: &Element) -> String {
    let mut out = String::new();
    write_element(element, &mut out);
    out
}

fn write_element(element: &Element, out: &mut String) {
    write_open_tag(
        out,
        element.tag(),
        element.attrs(),
        element.class(),
        element.style(),
    );

    if element.tag().is_void() {
        return;
    }

    for child in element.children() {
        match child {
            Child::Element(nested) => write_element(nested, out),
            Child::Text(text) => escape_text(text, out),
        }
    }

    out.push_str("</");
    out.push_str(element.tag().as_str());
    out.push('>');
}

// =============================================================================
// Mounted Markup
// =============================================================================

/// Serialize a mounted node tree to markup.
pub fn mounted_markup(node: &MountedNode) -> String {
    let mut out = String::new();
    write_mounted(node, &mut out);
    out
}

fn write_mounted(node: &MountedNode, out: &mut String) {
    write_open_tag(out, node.tag(), node.attrs(), node.class(), node.style());

    if node.tag().is_void() {
        return;
    }

    for child in node.children() {
        match child {
            MountedChild::Node(nested) => write_mounted(nested, out),
            MountedChild::Text(text) => escape_text(text, out),
        }
    }

    out.push_str("</");
    out.push_str(node.tag().as_str());
    out.push('>');
}

// =============================================================================
// Tests
// =============================================================================
