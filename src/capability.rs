//! Variant Capability Resolver - which property/event shapes are legal per tag.
//!
//! Every [`ElementTag`] maps to a [`Capability`] descriptor: a set of
//! capability flags plus the gated-attribute registry that ties attribute
//! names to the flag that legalizes them. Resolution is a table lookup with
//! the table checked once, at first use - a descriptor mismatch is a build
//! defect of this crate and panics with a descriptive message rather than
//! falling back to anything.
//!
//! Attributes outside the gated registry (`id`, `role`, `data-*`, `aria-*`,
//! arbitrary host-recognized metadata) are open pass-through and legal on
//! every variant; the registry only guards the names whose meaning is bound
//! to one element family.

use bitflags::bitflags;
use once_cell::sync::Lazy;

use crate::types::{ElementTag, EventKind};

// =============================================================================
// Capability Flags
// =============================================================================

bitflags! {
    /// Capability flags describing what an element family can do.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Caps: u16 {
        /// May contain nested content.
        const CHILDREN   = 1 << 0;
        /// Navigation target semantics (`href`, `target`, `rel`, `download`).
        const LINK       = 1 << 1;
        /// Activation semantics (`press` handlers, `disabled`).
        const PRESS      = 1 << 2;
        /// Embedded media semantics (`src`, `alt`, intrinsic size).
        const MEDIA      = 1 << 3;
        /// Form value semantics (`value`, `placeholder`, `input`/`change`).
        const FORM_FIELD = 1 << 4;
        /// Overlay open/close semantics (`open`).
        const POPUP      = 1 << 5;
        /// Field association semantics (`for`).
        const LABEL      = 1 << 6;
    }
}

// =============================================================================
// Capability Descriptor
// =============================================================================

/// The legal property/event schema for one element variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    /// The variant this descriptor belongs to.
    pub tag: ElementTag,
    /// Its capability flags.
    pub caps: Caps,
}

impl Capability {
    /// Whether `key` may be forwarded natively to this variant.
    ///
    /// Open pass-through names are always accepted; gated names require
    /// the matching capability.
    pub fn allows_attr(&self, key: &str) -> bool {
        match gated_attr_caps(key) {
            Some(required) => self.caps.intersects(required),
            None => true,
        }
    }

    /// Whether a handler for `kind` may be forwarded to this variant.
    pub fn allows_event(&self, kind: EventKind) -> bool {
        match gated_event_caps(kind) {
            Some(required) => self.caps.intersects(required),
            None => true,
        }
    }

    /// Whether this variant may contain nested content.
    pub fn allows_children(&self) -> bool {
        self.caps.contains(Caps::CHILDREN)
    }
}

// =============================================================================
// Gated Registries
// =============================================================================

/// Attribute names whose legality is bound to a capability.
const GATED_ATTRS: &[(&str, Caps)] = &[
    ("href", Caps::LINK),
    ("target", Caps::LINK),
    ("rel", Caps::LINK),
    ("download", Caps::LINK),
    ("disabled", Caps::PRESS.union(Caps::FORM_FIELD)),
    ("src", Caps::MEDIA),
    ("alt", Caps::MEDIA),
    ("width", Caps::MEDIA),
    ("height", Caps::MEDIA),
    ("value", Caps::FORM_FIELD),
    ("placeholder", Caps::FORM_FIELD),
    ("type", Caps::FORM_FIELD.union(Caps::PRESS)),
    ("name", Caps::FORM_FIELD),
    ("required", Caps::FORM_FIELD),
    ("readonly", Caps::FORM_FIELD),
    ("open", Caps::POPUP),
    ("for", Caps::LABEL),
];

/// Capability required to forward `key`, or `None` for open pass-through.
pub fn gated_attr_caps(key: &str) -> Option<Caps> {
    GATED_ATTRS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, caps)| *caps)
}

/// Capability required to forward a handler for `kind`, or `None` when the
/// event is accepted by every variant.
pub fn gated_event_caps(kind: EventKind) -> Option<Caps> {
    match kind {
        EventKind::Press => Some(Caps::PRESS),
        EventKind::Input | EventKind::Change => Some(Caps::FORM_FIELD),
        EventKind::PointerEnter
        | EventKind::PointerLeave
        | EventKind::FocusIn
        | EventKind::FocusOut => None,
    }
}

// =============================================================================
// Capability Table
// =============================================================================

/// One descriptor per tag, in `ElementTag` discriminant order.
static CAPABILITIES: [Capability; 20] = [
    Capability { tag: ElementTag::Div, caps: Caps::CHILDREN },
    Capability { tag: ElementTag::Span, caps: Caps::CHILDREN },
    Capability { tag: ElementTag::Paragraph, caps: Caps::CHILDREN },
    Capability { tag: ElementTag::Section, caps: Caps::CHILDREN },
    Capability { tag: ElementTag::Article, caps: Caps::CHILDREN },
    Capability { tag: ElementTag::Header, caps: Caps::CHILDREN },
    Capability { tag: ElementTag::Footer, caps: Caps::CHILDREN },
    Capability { tag: ElementTag::Main, caps: Caps::CHILDREN },
    Capability { tag: ElementTag::Nav, caps: Caps::CHILDREN },
    Capability { tag: ElementTag::Aside, caps: Caps::CHILDREN },
    Capability {
        tag: ElementTag::Button,
        caps: Caps::CHILDREN.union(Caps::PRESS),
    },
    Capability {
        tag: ElementTag::Anchor,
        caps: Caps::CHILDREN.union(Caps::LINK).union(Caps::PRESS),
    },
    Capability { tag: ElementTag::UnorderedList, caps: Caps::CHILDREN },
    Capability { tag: ElementTag::OrderedList, caps: Caps::CHILDREN },
    Capability { tag: ElementTag::ListItem, caps: Caps::CHILDREN },
    Capability {
        tag: ElementTag::Dialog,
        caps: Caps::CHILDREN.union(Caps::POPUP),
    },
    Capability {
        tag: ElementTag::Label,
        caps: Caps::CHILDREN.union(Caps::LABEL),
    },
    Capability {
        tag: ElementTag::Input,
        caps: Caps::FORM_FIELD.union(Caps::PRESS),
    },
    Capability { tag: ElementTag::Image, caps: Caps::MEDIA },
    Capability { tag: ElementTag::Rule, caps: Caps::empty() },
];

/// Table handle, validated exactly once at first resolution.
static TABLE: Lazy<&'static [Capability; 20]> = Lazy::new(|| {
    validate_table(&CAPABILITIES);
    tracing::debug!(tags = CAPABILITIES.len(), "capability table validated");
    &CAPABILITIES
});

/// Startup validation of the capability table.
///
/// The table is a closed, hand-maintained artifact; any inconsistency is a
/// defect in this crate, so it panics rather than limping along with wrong
/// dispatch.
fn validate_table(table: &[Capability]) {
    assert_eq!(
        table.len(),
        ElementTag::all().len(),
        "capability table must cover every element tag"
    );

    for (index, entry) in table.iter().enumerate() {
        assert_eq!(
            entry.tag as usize, index,
            "capability table out of order at `{}`",
            entry.tag
        );
        if entry.tag.is_void() {
            assert!(
                !entry.caps.contains(Caps::CHILDREN),
                "void element `{}` must not declare CHILDREN",
                entry.tag
            );
        }
    }

    for (index, (name, _)) in GATED_ATTRS.iter().enumerate() {
        assert!(
            GATED_ATTRS[index + 1..].iter().all(|(other, _)| other != name),
            "duplicate gated attribute `{name}`"
        );
        assert!(
            !crate::props::MANAGED_SLOTS.iter().any(|(slot, _)| slot == name),
            "gated attribute `{name}` collides with a managed slot"
        );
    }
}

/// Resolve the capability descriptor for a tag.
///
/// Infallible for enum tags - the compile-time path. The runtime path for
/// string tags is [`ElementTag::parse`], which rejects unknown names before
/// any dispatch happens.
pub fn resolve(tag: ElementTag) -> &'static Capability {
    let table = *TABLE;
    &table[tag as usize]
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_covers_every_tag() {
        for tag in ElementTag::all() {
            assert_eq!(resolve(*tag).tag, *tag);
        }
    }

    #[test]
    fn test_link_attrs_gated() {
        assert!(resolve(ElementTag::Anchor).allows_attr("href"));
        assert!(resolve(ElementTag::Anchor).allows_attr("target"));
        assert!(!resolve(ElementTag::Div).allows_attr("href"));
        assert!(!resolve(ElementTag::Button).allows_attr("target"));
    }

    #[test]
    fn test_press_attrs_gated() {
        assert!(resolve(ElementTag::Button).allows_attr("disabled"));
        assert!(resolve(ElementTag::Input).allows_attr("disabled"));
        assert!(!resolve(ElementTag::Span).allows_attr("disabled"));
    }

    #[test]
    fn test_media_attrs_gated() {
        assert!(resolve(ElementTag::Image).allows_attr("src"));
        assert!(resolve(ElementTag::Image).allows_attr("alt"));
        assert!(!resolve(ElementTag::Section).allows_attr("src"));
    }

    #[test]
    fn test_open_passthrough_always_allowed() {
        for tag in ElementTag::all() {
            let capability = resolve(*tag);
            assert!(capability.allows_attr("id"));
            assert!(capability.allows_attr("role"));
            assert!(capability.allows_attr("data-testid"));
            assert!(capability.allows_attr("aria-label"));
        }
    }

    #[test]
    fn test_activation_events_gated() {
        assert!(resolve(ElementTag::Button).allows_event(EventKind::Press));
        assert!(resolve(ElementTag::Anchor).allows_event(EventKind::Press));
        assert!(!resolve(ElementTag::Div).allows_event(EventKind::Press));
    }

    #[test]
    fn test_form_events_gated() {
        assert!(resolve(ElementTag::Input).allows_event(EventKind::Change));
        assert!(resolve(ElementTag::Input).allows_event(EventKind::Input));
        assert!(!resolve(ElementTag::Button).allows_event(EventKind::Change));
    }

    #[test]
    fn test_pointer_events_global() {
        for tag in ElementTag::all() {
            assert!(resolve(*tag).allows_event(EventKind::PointerEnter));
            assert!(resolve(*tag).allows_event(EventKind::FocusOut));
        }
    }

    #[test]
    fn test_children_capability() {
        assert!(resolve(ElementTag::Div).allows_children());
        assert!(resolve(ElementTag::Dialog).allows_children());
        assert!(!resolve(ElementTag::Image).allows_children());
        assert!(!resolve(ElementTag::Input).allows_children());
        assert!(!resolve(ElementTag::Rule).allows_children());
    }
}
