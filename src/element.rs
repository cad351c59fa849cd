//! Render Dispatcher - the polymorphic element primitive.
//!
//! [`element`] is the single entry point every presentational component is
//! built on. Per render request it resolves the variant's capability
//! descriptor, splits the open property bag, merges the two style layers,
//! folds the class slot, and produces an [`Element`] ready for the host to
//! instantiate. It is a pure function of its inputs: no state is carried
//! between calls, and calling it again with the same request produces the
//! same element.
//!
//! # Example
//!
//! ```ignore
//! use spark_ui::{element, ElementProps, ElementTag, PropertyBag, StyleMap};
//!
//! let rendered = element(ElementProps {
//!     tag: Some(ElementTag::Anchor),
//!     props: PropertyBag::new().with_attr("href", "/docs"),
//!     styles: Some(StyleMap::new().with("color", "red")),
//!     default_styles: Some(StyleMap::new().with("color", "blue").with("margin", "1rem")),
//!     ..Default::default()
//! })?;
//!
//! assert_eq!(rendered.style().to_inline(), "color:red;margin:1rem");
//! ```

use crate::capability;
use crate::error::RenderError;
use crate::handle::NodeSlot;
use crate::props::{split, EventCallback, PropValue, PropertyBag, SplitProps};
use crate::style::{self, StyleMap};
use crate::types::{AttrValue, ElementTag, EventKind};

// =============================================================================
// Children
// =============================================================================

/// One piece of nested renderable content.
#[derive(Clone, Debug)]
pub enum Child {
    /// A nested element.
    Element(Element),
    /// A text run.
    Text(String),
}

/// Nested renderable content, passed through opaque and unmodified.
#[derive(Clone, Default)]
pub struct Children {
    items: Vec<Child>,
}

impl Children {
    /// Create an empty children tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a nested element.
    pub fn push_element(&mut self, child: Element) {
        self.items.push(Child::Element(child));
    }

    /// Append a text run.
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.items.push(Child::Text(text.into()));
    }

    /// Builder-style [`Children::push_element`].
    pub fn with_element(mut self, child: Element) -> Self {
        self.push_element(child);
        self
    }

    /// Builder-style [`Children::push_text`].
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Element> for Children {
    fn from(child: Element) -> Self {
        Self::new().with_element(child)
    }
}

impl From<&str> for Children {
    fn from(text: &str) -> Self {
        Self::new().with_text(text)
    }
}

impl From<String> for Children {
    fn from(text: String) -> Self {
        Self::new().with_text(text)
    }
}

// =============================================================================
// Element Props
// =============================================================================

/// The render request.
///
/// Everything renderer-internal is a typed field here; only open
/// pass-through attributes and handlers travel through `props`. A bag key
/// that names one of these fields is rejected as a conflict rather than
/// resolved by picking a winner.
#[derive(Default)]
pub struct ElementProps {
    /// Which variant to render. `None` means the default container.
    pub tag: Option<ElementTag>,

    /// Open pass-through attributes and event handlers.
    pub props: PropertyBag,

    /// Component-default style layer (loses on collision).
    pub default_styles: Option<StyleMap>,

    /// Per-instance style layer (wins on collision).
    pub styles: Option<StyleMap>,

    /// Class slot, replaced literally - the renderer owns no internal
    /// class list to concatenate with.
    pub classes: Option<PropValue<String>>,

    /// Nested content, forwarded unmodified.
    pub children: Option<Children>,

    /// Handle request: populated at mount, cleared at unmount.
    pub node_ref: Option<NodeSlot>,
}

// =============================================================================
// Element
// =============================================================================

/// A resolved render request: capability-checked, style-merged, ready for
/// the host to instantiate.
#[derive(Clone)]
pub struct Element {
    pub(crate) tag: ElementTag,
    pub(crate) attrs: Vec<(String, AttrValue)>,
    pub(crate) handlers: Vec<(EventKind, EventCallback)>,
    pub(crate) style: StyleMap,
    pub(crate) class: Option<String>,
    pub(crate) children: Vec<Child>,
    pub(crate) node_ref: Option<NodeSlot>,
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("attrs", &self.attrs)
            .field(
                "handlers",
                &self.handlers.iter().map(|(kind, _)| kind).collect::<Vec<_>>(),
            )
            .field("style", &self.style)
            .field("class", &self.class)
            .field("children", &self.children)
            .field("node_ref", &self.node_ref.is_some())
            .finish()
    }
}

impl Element {
    /// The resolved variant.
    pub fn tag(&self) -> ElementTag {
        self.tag
    }

    /// Forwarded native attributes, in bag order.
    pub fn attrs(&self) -> &[(String, AttrValue)] {
        &self.attrs
    }

    /// Look up a forwarded attribute.
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// The merged style slot.
    pub fn style(&self) -> &StyleMap {
        &self.style
    }

    /// The class slot.
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Nested content.
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Whether a handler was forwarded for `kind`.
    pub fn has_handler(&self, kind: EventKind) -> bool {
        self.handlers.iter().any(|(k, _)| *k == kind)
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Render a polymorphic element.
///
/// Pure and synchronous; the only side effects of a render request happen
/// later, in `host::mount` (instantiate + attach). See the module docs for
/// the step order.
pub fn element(props: ElementProps) -> Result<Element, RenderError> {
    // 1. RESOLVE VARIANT - the single defaulting point. The declared
    //    default (`ElementTag::default()`) is the only source of truth.
    let tag = props.tag.unwrap_or_default();

    // 2. CAPABILITY DESCRIPTOR
    let capability = capability::resolve(tag);

    // 3. SPLIT THE OPEN BAG
    let SplitProps { native, handlers } = split(&props.props, capability)?;

    // 4. MERGE STYLE LAYERS
    if let Some(defaults) = &props.default_styles {
        style::validate(defaults)?;
    }
    if let Some(overrides) = &props.styles {
        style::validate(overrides)?;
    }
    let merged = style::merge(props.default_styles.as_ref(), props.styles.as_ref());

    // 5. CLASS SLOT - literal replacement
    let class = props.classes.map(|classes| classes.get());

    // 6. CHILDREN - nested unmodified, capability-checked
    let children = props.children.unwrap_or_default().items;
    if !children.is_empty() && !capability.allows_children() {
        return Err(RenderError::ChildrenNotAllowed { tag });
    }

    tracing::trace!(
        tag = %tag,
        attrs = native.len(),
        handlers = handlers.len(),
        children = children.len(),
        "rendered element"
    );

    Ok(Element {
        tag,
        attrs: native,
        handlers,
        style: merged,
        class,
        children,
        node_ref: props.node_ref,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use spark_signals::signal;

    #[test]
    fn test_empty_request_renders_default_container() {
        let rendered = element(ElementProps::default()).unwrap();
        assert_eq!(rendered.tag(), ElementTag::Div);
        assert!(rendered.attrs().is_empty());
        assert!(rendered.style().is_empty());
        assert!(rendered.class().is_none());
        assert!(rendered.children().is_empty());
    }

    #[test]
    fn test_omitted_tag_matches_explicit_default() {
        // Regression guard against divergent defaults: omission and the
        // declared default variant must produce identical output.
        let implicit = element(ElementProps::default()).unwrap();
        let explicit = element(ElementProps {
            tag: Some(ElementTag::default()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(implicit.tag(), explicit.tag());
        assert_eq!(implicit.attrs(), explicit.attrs());
        assert_eq!(implicit.style(), explicit.style());
        assert_eq!(implicit.class(), explicit.class());
    }

    #[test]
    fn test_forwards_bag_unchanged() {
        let rendered = element(ElementProps {
            props: PropertyBag::new()
                .with_attr("id", "hero")
                .with_attr("data-kind", "card")
                .with_attr("aria-hidden", true),
            ..Default::default()
        })
        .unwrap();

        let keys: Vec<&str> = rendered.attrs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["id", "data-kind", "aria-hidden"]);
        assert_eq!(rendered.attr("id"), Some(&AttrValue::from("hero")));
    }

    #[test]
    fn test_button_with_press_handler_has_no_style() {
        let pressed = Rc::new(Cell::new(false));
        let pressed_flag = pressed.clone();

        let rendered = element(ElementProps {
            tag: Some(ElementTag::Button),
            props: PropertyBag::new().with_on(
                EventKind::Press,
                Rc::new(move |_| pressed_flag.set(true)),
            ),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(rendered.tag(), ElementTag::Button);
        assert!(rendered.has_handler(EventKind::Press));
        assert!(rendered.style().is_empty());
    }

    #[test]
    fn test_style_layers_merge_into_style_slot() {
        let rendered = element(ElementProps {
            styles: Some(StyleMap::new().with("color", "red")),
            default_styles: Some(
                StyleMap::new().with("color", "blue").with("margin", "1rem"),
            ),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(rendered.style().to_inline(), "color:red;margin:1rem");
    }

    #[test]
    fn test_classes_replace_literally() {
        let rendered = element(ElementProps {
            classes: Some(PropValue::Static("btn btn-primary".to_string())),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(rendered.class(), Some("btn btn-primary"));
    }

    #[test]
    fn test_classes_snapshot_from_signal() {
        let classes = signal("idle".to_string());

        let rendered = element(ElementProps {
            classes: Some(classes.clone().into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(rendered.class(), Some("idle"));

        classes.set("active".to_string());
        let rerendered = element(ElementProps {
            classes: Some(classes.into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(rerendered.class(), Some("active"));
    }

    #[test]
    fn test_children_pass_through_unmodified() {
        let inner = element(ElementProps {
            tag: Some(ElementTag::Span),
            ..Default::default()
        })
        .unwrap();

        let rendered = element(ElementProps {
            children: Some(Children::new().with_text("before").with_element(inner)),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(rendered.children().len(), 2);
        assert!(matches!(&rendered.children()[0], Child::Text(text) if text == "before"));
        assert!(
            matches!(&rendered.children()[1], Child::Element(child) if child.tag() == ElementTag::Span)
        );
    }

    #[test]
    fn test_children_rejected_on_void_variant() {
        let err = element(ElementProps {
            tag: Some(ElementTag::Image),
            children: Some(Children::from("nope")),
            ..Default::default()
        })
        .unwrap_err();

        assert_eq!(err, RenderError::ChildrenNotAllowed { tag: ElementTag::Image });
    }

    #[test]
    fn test_malformed_style_rejected() {
        let err = element(ElementProps {
            styles: Some(StyleMap::new().with("color", "red;margin:0")),
            ..Default::default()
        })
        .unwrap_err();

        assert!(matches!(err, RenderError::MalformedStyle { .. }));
    }

    #[test]
    fn test_bag_conflicts_surface() {
        let err = element(ElementProps {
            props: PropertyBag::new().with_attr("style", "color:red"),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, RenderError::PropertyConflict { .. }));

        let err = element(ElementProps {
            props: PropertyBag::new().with_attr("href", "/x"),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedProperty { .. }));
    }
}
