//! Property Conflict Resolver - splitting the open bag per capability.
//!
//! Callers hand the renderer one open, ordered [`PropertyBag`] of
//! attributes and event handlers. [`split`] classifies every entry against
//! the resolved capability descriptor: forward it natively, or fail loudly.
//! Renderer-internal configuration (`styles`, `classes`, children, the tag
//! selector, the handle request) never travels through the bag - those are
//! typed fields on `ElementProps`, and a bag key that names one of them is
//! a conflict, not a second channel.
//!
//! Props support static values, signals, and getters for reactivity; the
//! split snapshots them so the dispatcher stays a pure function of its
//! inputs.

use std::rc::Rc;

use spark_signals::Signal;

use crate::capability::Capability;
use crate::error::RenderError;
use crate::types::{AttrValue, Event, EventKind};

// =============================================================================
// Callback Types
// =============================================================================

/// Event handler forwarded into the instantiated node.
///
/// Rc<dyn Fn> so handlers can be cloned into the mounted tree without
/// ownership issues - the standard pattern for event callbacks captured in
/// closures.
pub type EventCallback = Rc<dyn Fn(&Event)>;

// =============================================================================
// Prop Value - Reactive property wrapper
// =============================================================================

/// A property value that can be static, a signal, or a getter.
///
/// Signals and getters keep the caller's source of truth reactive; the
/// renderer reads them exactly once per render call, so two renders of the
/// same bag can legitimately forward different snapshots.
#[derive(Clone)]
pub enum PropValue<T: Clone + PartialEq + 'static> {
    /// Static value (not reactive).
    Static(T),
    /// Reactive signal, read at dispatch time.
    Signal(Signal<T>),
    /// Getter function, called at dispatch time.
    Getter(Rc<dyn Fn() -> T>),
}

impl<T: Clone + PartialEq + 'static> PropValue<T> {
    /// Get the current value.
    pub fn get(&self) -> T {
        match self {
            PropValue::Static(value) => value.clone(),
            PropValue::Signal(signal) => signal.get(),
            PropValue::Getter(getter) => getter(),
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for PropValue<T> {
    fn default() -> Self {
        PropValue::Static(T::default())
    }
}

impl<T: Clone + PartialEq + 'static> From<T> for PropValue<T> {
    fn from(value: T) -> Self {
        PropValue::Static(value)
    }
}

impl<T: Clone + PartialEq + 'static> From<Signal<T>> for PropValue<T> {
    fn from(signal: Signal<T>) -> Self {
        PropValue::Signal(signal)
    }
}

// =============================================================================
// Managed Slots
// =============================================================================

/// Bag keys that collide with renderer-managed slots, and the slot each one
/// belongs to. These are handled explicitly by name on `ElementProps` (the
/// style layers feed the merger, `classes` feeds the class slot) and are
/// never forwarded - nor accepted - through the open bag.
pub(crate) const MANAGED_SLOTS: &[(&str, &str)] = &[
    ("style", "styles"),
    ("styles", "styles"),
    ("defaultStyles", "styles"),
    ("class", "classes"),
    ("classes", "classes"),
    ("children", "children"),
    ("as", "tag"),
    ("ref", "node_ref"),
];

/// The managed slot `key` collides with, if any.
fn managed_slot(key: &str) -> Option<&'static str> {
    MANAGED_SLOTS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, slot)| *slot)
}

// =============================================================================
// Property Bag
// =============================================================================

/// One entry in the open bag.
#[derive(Clone)]
pub enum PropEntry {
    /// Native attribute value.
    Attr(PropValue<AttrValue>),
    /// Event handler, keyed by event name.
    Handler(EventCallback),
}

/// Ordered, string-keyed bag of open pass-through properties.
///
/// Insertion order is preserved all the way into the instantiated node -
/// the pass-through contract is an explicit ordered mapping, not reflection
/// over an arbitrary object.
///
/// # Example
///
/// ```ignore
/// use spark_ui::{EventKind, PropertyBag};
///
/// let bag = PropertyBag::new()
///     .with_attr("href", "/docs")
///     .with_attr("data-testid", "docs-link")
///     .with_on(EventKind::Press, Rc::new(|_| {}));
/// ```
#[derive(Clone, Default)]
pub struct PropertyBag {
    entries: Vec<(String, PropEntry)>,
}

impl PropertyBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace an entry. Replacement keeps the key's position.
    pub fn set(&mut self, key: impl Into<String>, entry: PropEntry) {
        let key = key.into();
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some(existing) => existing.1 = entry,
            None => self.entries.push((key, entry)),
        }
    }

    /// Insert a static attribute.
    pub fn attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.set(key, PropEntry::Attr(PropValue::Static(value.into())));
    }

    /// Insert a reactive attribute.
    pub fn attr_value(&mut self, key: impl Into<String>, value: PropValue<AttrValue>) {
        self.set(key, PropEntry::Attr(value));
    }

    /// Insert an event handler under its event key.
    pub fn on(&mut self, kind: EventKind, callback: EventCallback) {
        self.set(kind.key(), PropEntry::Handler(callback));
    }

    /// Builder-style [`PropertyBag::attr`].
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attr(key, value);
        self
    }

    /// Builder-style [`PropertyBag::attr_value`].
    pub fn with_attr_value(mut self, key: impl Into<String>, value: PropValue<AttrValue>) -> Self {
        self.attr_value(key, value);
        self
    }

    /// Builder-style [`PropertyBag::on`].
    pub fn with_on(mut self, kind: EventKind, callback: EventCallback) -> Self {
        self.on(kind, callback);
        self
    }

    /// Look up an entry by key.
    pub fn get(&self, key: &str) -> Option<&PropEntry> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, entry)| entry)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

// =============================================================================
// Split
// =============================================================================

/// Output of [`split`]: the bag, classified and snapshot.
pub struct SplitProps {
    /// Attributes to forward natively, in bag order.
    pub native: Vec<(String, AttrValue)>,
    /// Handlers to forward, in bag order.
    pub handlers: Vec<(EventKind, EventCallback)>,
}

impl std::fmt::Debug for SplitProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SplitProps")
            .field("native", &self.native)
            .field(
                "handlers",
                &self.handlers.iter().map(|(kind, _)| kind).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Split the open bag against a capability descriptor.
///
/// Total and side-effect-free: every input key lands in exactly one
/// outcome - forwarded natively, forwarded as a handler, or a loud error.
/// Nothing is consumed silently and nothing falls through.
pub fn split(bag: &PropertyBag, capability: &Capability) -> Result<SplitProps, RenderError> {
    let mut native = Vec::new();
    let mut handlers = Vec::new();

    for (key, entry) in bag.iter() {
        if let Some(slot) = managed_slot(key) {
            return Err(RenderError::PropertyConflict {
                key: key.to_string(),
                slot,
            });
        }

        match entry {
            PropEntry::Attr(value) => {
                if !capability.allows_attr(key) {
                    return Err(RenderError::UnsupportedProperty {
                        tag: capability.tag,
                        key: key.to_string(),
                    });
                }
                native.push((key.to_string(), value.get()));
            }
            PropEntry::Handler(callback) => {
                let Some(kind) = EventKind::parse(key) else {
                    return Err(RenderError::UnsupportedEvent {
                        tag: capability.tag,
                        key: key.to_string(),
                    });
                };
                if !capability.allows_event(kind) {
                    return Err(RenderError::UnsupportedEvent {
                        tag: capability.tag,
                        key: key.to_string(),
                    });
                }
                handlers.push((kind, callback.clone()));
            }
        }
    }

    Ok(SplitProps { native, handlers })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::resolve;
    use crate::types::ElementTag;
    use spark_signals::signal;

    #[test]
    fn test_split_forwards_everything_without_custom_keys() {
        let bag = PropertyBag::new()
            .with_attr("id", "hero")
            .with_attr("data-testid", "card")
            .with_attr("aria-label", "Card")
            .with_attr("tabindex", 2i64);

        let split_props = split(&bag, resolve(ElementTag::Div)).unwrap();
        let keys: Vec<&str> = split_props.native.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["id", "data-testid", "aria-label", "tabindex"]);
        assert_eq!(split_props.native[0].1, AttrValue::from("hero"));
        assert_eq!(split_props.native[3].1, AttrValue::Number(2.0));
        assert!(split_props.handlers.is_empty());
    }

    #[test]
    fn test_split_snapshots_reactive_values() {
        let href = signal(AttrValue::from("/first"));
        let bag = PropertyBag::new().with_attr_value("href", href.clone().into());

        let first = split(&bag, resolve(ElementTag::Anchor)).unwrap();
        assert_eq!(first.native[0].1, AttrValue::from("/first"));

        href.set(AttrValue::from("/second"));
        let second = split(&bag, resolve(ElementTag::Anchor)).unwrap();
        assert_eq!(second.native[0].1, AttrValue::from("/second"));
    }

    #[test]
    fn test_split_getter_values() {
        let bag = PropertyBag::new().with_attr_value(
            "data-count",
            PropValue::Getter(Rc::new(|| AttrValue::Number(3.0))),
        );

        let split_props = split(&bag, resolve(ElementTag::Div)).unwrap();
        assert_eq!(split_props.native[0].1, AttrValue::Number(3.0));
    }

    #[test]
    fn test_split_rejects_managed_slot_keys() {
        for key in ["style", "styles", "defaultStyles", "class", "classes", "children", "as", "ref"] {
            let bag = PropertyBag::new().with_attr(key, "x");
            let err = split(&bag, resolve(ElementTag::Div)).unwrap_err();
            assert!(
                matches!(err, RenderError::PropertyConflict { .. }),
                "expected conflict for `{key}`, got {err:?}"
            );
        }
    }

    #[test]
    fn test_split_rejects_uncapable_attr() {
        let bag = PropertyBag::new().with_attr("href", "/nowhere");
        let err = split(&bag, resolve(ElementTag::Div)).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnsupportedProperty {
                tag: ElementTag::Div,
                key: "href".to_string(),
            }
        );

        // Same key is fine on the variant that carries the capability.
        assert!(split(&bag, resolve(ElementTag::Anchor)).is_ok());
    }

    #[test]
    fn test_split_rejects_uncapable_event() {
        let bag = PropertyBag::new().with_on(EventKind::Press, Rc::new(|_| {}));
        let err = split(&bag, resolve(ElementTag::Div)).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedEvent { .. }));

        let split_props = split(&bag, resolve(ElementTag::Button)).unwrap();
        assert_eq!(split_props.handlers.len(), 1);
        assert_eq!(split_props.handlers[0].0, EventKind::Press);
    }

    #[test]
    fn test_split_rejects_unknown_event_key() {
        let mut bag = PropertyBag::new();
        bag.set("hover", PropEntry::Handler(Rc::new(|_| {})));

        let err = split(&bag, resolve(ElementTag::Button)).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnsupportedEvent {
                tag: ElementTag::Button,
                key: "hover".to_string(),
            }
        );
    }

    #[test]
    fn test_bag_last_write_wins_in_place() {
        let bag = PropertyBag::new()
            .with_attr("id", "first")
            .with_attr("role", "note")
            .with_attr("id", "second");

        assert_eq!(bag.len(), 2);
        let split_props = split(&bag, resolve(ElementTag::Div)).unwrap();
        assert_eq!(split_props.native[0], ("id".to_string(), AttrValue::from("second")));
        assert_eq!(split_props.native[1].0, "role");
    }

    #[test]
    fn test_prop_value_get() {
        let fixed: PropValue<i64> = PropValue::Static(1);
        assert_eq!(fixed.get(), 1);

        let sig = signal(2i64);
        let reactive: PropValue<i64> = sig.clone().into();
        assert_eq!(reactive.get(), 2);
        sig.set(5);
        assert_eq!(reactive.get(), 5);

        let getter: PropValue<i64> = PropValue::Getter(Rc::new(|| 7));
        assert_eq!(getter.get(), 7);
    }
}
