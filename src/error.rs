//! Error types for the element renderer.
//!
//! Everything here is a programmer error: the renderer sits below any user
//! interaction path, so faults are surfaced to the caller as early and as
//! loudly as possible and never retried or silently recovered.

use thiserror::Error;

use crate::types::ElementTag;

/// Errors surfaced by the render dispatcher and its collaborators.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The requested variant tag is outside the supported set.
    ///
    /// Never resolved by falling back to the default variant.
    #[error("unknown element variant `{0}`")]
    UnknownVariant(String),

    /// A bag key collides with a renderer-managed slot.
    ///
    /// The custom configuration channel (`styles`, `classes`, ...) and the
    /// native slot it feeds cannot both be driven through the open bag;
    /// picking a winner silently would hide the bug.
    #[error("property `{key}` conflicts with the renderer-managed `{slot}` slot")]
    PropertyConflict {
        /// The offending bag key.
        key: String,
        /// The managed slot it collides with.
        slot: &'static str,
    },

    /// A capability-gated attribute was passed to a variant without that
    /// capability (a navigation target on a plain container, say).
    #[error("element `{tag}` does not accept property `{key}`")]
    UnsupportedProperty {
        /// The resolved variant.
        tag: ElementTag,
        /// The rejected attribute name.
        key: String,
    },

    /// A handler was forwarded for an event the variant does not accept,
    /// or under a key no event is known for.
    #[error("element `{tag}` does not accept a handler for `{key}`")]
    UnsupportedEvent {
        /// The resolved variant.
        tag: ElementTag,
        /// The rejected handler key.
        key: String,
    },

    /// Children were supplied to a variant that cannot contain them.
    #[error("element `{tag}` cannot contain children")]
    ChildrenNotAllowed {
        /// The resolved variant.
        tag: ElementTag,
    },

    /// A style entry has an unsupported shape; rejected rather than coerced.
    #[error("malformed style entry `{key}`: {reason}")]
    MalformedStyle {
        /// The offending style key.
        key: String,
        /// What was wrong with it.
        reason: String,
    },
}
