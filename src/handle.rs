//! Reference Forwarder - ownership-free handles to instantiated nodes.
//!
//! A caller that needs the real node (focus, scroll measurement) passes a
//! [`NodeSlot`] as the handle request. The host populates it at mount with
//! a [`NodeHandle`] typed to the resolved variant, and clears it at
//! unmount. The slot holds only a `Weak` reference - ownership of the node
//! stays with the host, and a handle outliving its node upgrades to `None`
//! instead of keeping the node alive.
//!
//! # Example
//!
//! ```ignore
//! use spark_ui::{element, ElementProps, ElementTag, NodeSlot, host};
//!
//! let slot = NodeSlot::new();
//! let rendered = element(ElementProps {
//!     tag: Some(ElementTag::Anchor),
//!     node_ref: Some(slot.clone()),
//!     ..Default::default()
//! })?;
//!
//! let mounted = host::mount(rendered);
//! assert_eq!(slot.get().unwrap().tag(), ElementTag::Anchor);
//!
//! mounted.unmount();
//! assert!(slot.get().is_none());
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::host::MountedNode;
use crate::types::ElementTag;

// =============================================================================
// Node Slot
// =============================================================================

/// Caller-supplied slot the host populates with a node handle.
///
/// `None` before mount and after unmount. The host is the only writer;
/// callers clone the slot freely and read it.
#[derive(Clone, Default)]
pub struct NodeSlot {
    inner: Rc<RefCell<Option<NodeHandle>>>,
}

impl NodeSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current handle, if the instance is mounted.
    pub fn get(&self) -> Option<NodeHandle> {
        self.inner.borrow().clone()
    }

    /// Whether a handle is currently attached.
    pub fn is_attached(&self) -> bool {
        self.inner.borrow().is_some()
    }
}

// =============================================================================
// Node Handle
// =============================================================================

/// Borrowed, ownership-free reference to an instantiated node.
///
/// Tagged with the resolved variant so callers can assert what they got.
#[derive(Clone)]
pub struct NodeHandle {
    tag: ElementTag,
    node: Weak<MountedNode>,
}

impl NodeHandle {
    /// The variant of the node this handle points at.
    pub fn tag(&self) -> ElementTag {
        self.tag
    }

    /// Upgrade to the live node.
    ///
    /// `None` once the host has dropped the instance - a stale handle never
    /// resurrects a destroyed node.
    pub fn node(&self) -> Option<Rc<MountedNode>> {
        self.node.upgrade()
    }
}

// =============================================================================
// Attach / Detach
// =============================================================================

/// Populate a slot with a handle to `node`.
///
/// Crate-private: the host is the single writer. Retains no strong
/// reference beyond the call.
pub(crate) fn attach(slot: &NodeSlot, node: &Rc<MountedNode>) {
    let handle = NodeHandle {
        tag: node.tag(),
        node: Rc::downgrade(node),
    };
    let mut inner = slot.inner.borrow_mut();
    // The host detaches before any re-attach; a live handle here means a
    // remount skipped its unmount.
    debug_assert!(inner.is_none(), "node slot attached twice without detach");
    tracing::trace!(tag = %node.tag(), "attaching node handle");
    *inner = Some(handle);
}

/// Clear a slot.
pub(crate) fn detach(slot: &NodeSlot) {
    if slot.inner.borrow_mut().take().is_some() {
        tracing::trace!("detached node handle");
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{element, ElementProps};
    use crate::host;

    fn render_with_slot(tag: ElementTag) -> (NodeSlot, crate::element::Element) {
        let slot = NodeSlot::new();
        let rendered = element(ElementProps {
            tag: Some(tag),
            node_ref: Some(slot.clone()),
            ..Default::default()
        })
        .unwrap();
        (slot, rendered)
    }

    #[test]
    fn test_slot_empty_before_mount() {
        let (slot, _rendered) = render_with_slot(ElementTag::Button);
        assert!(!slot.is_attached());
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_attach_and_detach() {
        let (slot, rendered) = render_with_slot(ElementTag::Anchor);

        let mounted = host::mount(rendered);
        let handle = slot.get().expect("handle populated at mount");
        assert_eq!(handle.tag(), ElementTag::Anchor);
        assert!(handle.node().is_some());

        mounted.unmount();
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_handle_is_ownership_free() {
        let (slot, rendered) = render_with_slot(ElementTag::Div);

        let mounted = host::mount(rendered);
        let handle = slot.get().unwrap();

        // Dropping the host tree invalidates the handle even though the
        // caller still holds it.
        mounted.unmount();
        assert!(handle.node().is_none());
    }

    #[test]
    fn test_clones_share_one_slot() {
        let (slot, rendered) = render_with_slot(ElementTag::Span);
        let observer = slot.clone();

        let mounted = host::mount(rendered);
        assert!(observer.is_attached());

        mounted.unmount();
        assert!(!observer.is_attached());
    }
}
