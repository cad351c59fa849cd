//! Core types for spark-ui.
//!
//! These types define the foundation that everything builds on: the element
//! variant tag, the attribute value model, and the event model that flows
//! from the render dispatcher into mounted nodes.

use std::fmt;

use crate::error::RenderError;

// =============================================================================
// Element Tag
// =============================================================================

/// Selector for which markup-element family to instantiate.
///
/// The set is closed: every variant has a capability descriptor in
/// [`crate::capability`] and the two stay in lockstep (checked once at
/// startup). `Div` is the designated default container - the single source
/// of truth for it is this enum's `Default` impl, consumed at exactly one
/// point in the dispatcher.
///
/// # Example
///
/// ```ignore
/// use spark_ui::ElementTag;
///
/// let tag = ElementTag::parse("a")?;
/// assert_eq!(tag, ElementTag::Anchor);
/// assert_eq!(tag.as_str(), "a");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementTag {
    /// Generic container (the default variant).
    #[default]
    Div,
    /// Inline container.
    Span,
    /// Paragraph.
    Paragraph,
    /// Document section.
    Section,
    /// Self-contained article.
    Article,
    /// Introductory header.
    Header,
    /// Footer.
    Footer,
    /// Main document content.
    Main,
    /// Navigation landmark.
    Nav,
    /// Tangential aside.
    Aside,
    /// Button-like interactive element.
    Button,
    /// Anchor-like navigation element.
    Anchor,
    /// Unordered list.
    UnorderedList,
    /// Ordered list.
    OrderedList,
    /// List item.
    ListItem,
    /// Dialog overlay.
    Dialog,
    /// Form field label.
    Label,
    /// Form input (void element).
    Input,
    /// Image (void element).
    Image,
    /// Thematic break (void element).
    Rule,
}

impl ElementTag {
    /// The markup name this variant renders as.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::Span => "span",
            Self::Paragraph => "p",
            Self::Section => "section",
            Self::Article => "article",
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Main => "main",
            Self::Nav => "nav",
            Self::Aside => "aside",
            Self::Button => "button",
            Self::Anchor => "a",
            Self::UnorderedList => "ul",
            Self::OrderedList => "ol",
            Self::ListItem => "li",
            Self::Dialog => "dialog",
            Self::Label => "label",
            Self::Input => "input",
            Self::Image => "img",
            Self::Rule => "hr",
        }
    }

    /// Parse a markup name into a tag.
    ///
    /// An unsupported name fails loudly with [`RenderError::UnknownVariant`].
    /// It never falls back to the default variant - that would hide caller
    /// bugs behind a silently rendered container.
    pub fn parse(name: &str) -> Result<Self, RenderError> {
        match name {
            "div" => Ok(Self::Div),
            "span" => Ok(Self::Span),
            "p" => Ok(Self::Paragraph),
            "section" => Ok(Self::Section),
            "article" => Ok(Self::Article),
            "header" => Ok(Self::Header),
            "footer" => Ok(Self::Footer),
            "main" => Ok(Self::Main),
            "nav" => Ok(Self::Nav),
            "aside" => Ok(Self::Aside),
            "button" => Ok(Self::Button),
            "a" => Ok(Self::Anchor),
            "ul" => Ok(Self::UnorderedList),
            "ol" => Ok(Self::OrderedList),
            "li" => Ok(Self::ListItem),
            "dialog" => Ok(Self::Dialog),
            "label" => Ok(Self::Label),
            "input" => Ok(Self::Input),
            "img" => Ok(Self::Image),
            "hr" => Ok(Self::Rule),
            other => Err(RenderError::UnknownVariant(other.to_string())),
        }
    }

    /// All supported tags, in capability-table order.
    pub const fn all() -> &'static [ElementTag] {
        &[
            Self::Div,
            Self::Span,
            Self::Paragraph,
            Self::Section,
            Self::Article,
            Self::Header,
            Self::Footer,
            Self::Main,
            Self::Nav,
            Self::Aside,
            Self::Button,
            Self::Anchor,
            Self::UnorderedList,
            Self::OrderedList,
            Self::ListItem,
            Self::Dialog,
            Self::Label,
            Self::Input,
            Self::Image,
            Self::Rule,
        ]
    }

    /// Void elements never carry nested content in markup output.
    pub const fn is_void(self) -> bool {
        matches!(self, Self::Input | Self::Image | Self::Rule)
    }
}

impl fmt::Display for ElementTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Attribute Value
// =============================================================================

/// Value of a forwarded native attribute.
///
/// Attributes are scalar by construction - there is no nested shape to
/// reject at runtime. `Flag(false)` means "attribute absent" to the markup
/// renderer, matching boolean attribute semantics.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Text attribute (`id="hero"`).
    Text(String),
    /// Numeric attribute (`tabindex="2"`).
    Number(f64),
    /// Boolean attribute (`disabled`).
    Flag(bool),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

// =============================================================================
// Events
// =============================================================================

/// Host event families a handler can be forwarded for.
///
/// The bag keys handlers by these names; [`EventKind::parse`] is the
/// runtime path and rejects anything it does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Activation (click, Enter, Space) on an interactive variant.
    Press,
    /// Pointer entered the node.
    PointerEnter,
    /// Pointer left the node.
    PointerLeave,
    /// Node gained focus.
    FocusIn,
    /// Node lost focus.
    FocusOut,
    /// Form field received input.
    Input,
    /// Form field value committed.
    Change,
}

impl EventKind {
    /// The bag key this event is forwarded under.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Press => "press",
            Self::PointerEnter => "pointerenter",
            Self::PointerLeave => "pointerleave",
            Self::FocusIn => "focusin",
            Self::FocusOut => "focusout",
            Self::Input => "input",
            Self::Change => "change",
        }
    }

    /// Parse a bag key into an event kind.
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "press" => Some(Self::Press),
            "pointerenter" => Some(Self::PointerEnter),
            "pointerleave" => Some(Self::PointerLeave),
            "focusin" => Some(Self::FocusIn),
            "focusout" => Some(Self::FocusOut),
            "input" => Some(Self::Input),
            "change" => Some(Self::Change),
            _ => None,
        }
    }

    /// All event kinds.
    pub const fn all() -> &'static [EventKind] {
        &[
            Self::Press,
            Self::PointerEnter,
            Self::PointerLeave,
            Self::FocusIn,
            Self::FocusOut,
            Self::Input,
            Self::Change,
        ]
    }
}

/// Event delivered by the host into a forwarded handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// Which event family fired.
    pub kind: EventKind,
    /// Tag of the node the event fired on.
    pub target: ElementTag,
}

// =============================================================================
// Tests
// =============================================================================
