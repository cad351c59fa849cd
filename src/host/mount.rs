//! Mount API - instantiating rendered elements into host-owned nodes.
//!
//! `mount` executes the last two dispatch steps: instantiate the node tree
//! with native props applied and children nested, then populate any handle
//! requests. The returned [`MountHandle`] owns the tree; unmounting (or
//! dropping the handle) clears every handle before the nodes are released,
//! so a caller never observes a stale handle pointing at a destroyed node.
//!
//! # Example
//!
//! ```ignore
//! use spark_ui::{element, ElementProps, host};
//!
//! let rendered = element(ElementProps::default())?;
//! let mounted = host::mount(rendered);
//!
//! // ... host drives the instance ...
//!
//! mounted.unmount();
//! ```

use std::rc::Rc;

use crate::element::{Child, Element};
use crate::handle::{self, NodeSlot};
use crate::style::StyleMap;
use crate::types::{AttrValue, ElementTag, Event, EventKind};
use crate::props::EventCallback;

use super::registry;

// =============================================================================
// Mounted Node
// =============================================================================

/// Nested content of a mounted node.
#[derive(Clone)]
pub enum MountedChild {
    /// A nested node.
    Node(Rc<MountedNode>),
    /// A text run.
    Text(String),
}

/// An instantiated node, owned by the host for the lifetime of the mount.
pub struct MountedNode {
    id: usize,
    tag: ElementTag,
    attrs: Vec<(String, AttrValue)>,
    handlers: Vec<(EventKind, EventCallback)>,
    style: StyleMap,
    class: Option<String>,
    children: Vec<MountedChild>,
    node_ref: Option<NodeSlot>,
}

impl MountedNode {
    /// Host-unique instance id.
    pub fn id(&self) -> usize {
        self.id
    }

    /// The variant this node was instantiated as.
    pub fn tag(&self) -> ElementTag {
        self.tag
    }

    /// Applied native attributes, in forwarding order.
    pub fn attrs(&self) -> &[(String, AttrValue)] {
        &self.attrs
    }

    /// Look up an applied attribute.
    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// The node's resolved style slot.
    pub fn style(&self) -> &StyleMap {
        &self.style
    }

    /// The node's class slot.
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Nested content.
    pub fn children(&self) -> &[MountedChild] {
        &self.children
    }

    /// Whether a handler is attached for `kind`.
    pub fn has_handler(&self, kind: EventKind) -> bool {
        self.handlers.iter().any(|(k, _)| *k == kind)
    }

    /// Deliver an event into this node's attached handlers.
    ///
    /// Returns how many handlers were invoked.
    pub fn fire(&self, kind: EventKind) -> usize {
        let event = Event {
            kind,
            target: self.tag,
        };
        let mut fired = 0;
        for (handler_kind, callback) in &self.handlers {
            if *handler_kind == kind {
                callback(&event);
                fired += 1;
            }
        }
        fired
    }
}

// =============================================================================
// Instantiation
// =============================================================================

/// Instantiate an element tree into host-owned nodes, depth-first.
fn instantiate(element: Element) -> Rc<MountedNode> {
    let Element {
        tag,
        attrs,
        handlers,
        style,
        class,
        children,
        node_ref,
    } = element;

    let children = children
        .into_iter()
        .map(|child| match child {
            Child::Element(nested) => MountedChild::Node(instantiate(nested)),
            Child::Text(text) => MountedChild::Text(text),
        })
        .collect();

    let id = registry::allocate_instance();
    registry::register_mount(id);

    Rc::new(MountedNode {
        id,
        tag,
        attrs,
        handlers,
        style,
        class,
        children,
        node_ref,
    })
}

/// Populate handle requests throughout a mounted tree.
fn attach_handles(node: &Rc<MountedNode>) {
    if let Some(slot) = &node.node_ref {
        handle::attach(slot, node);
    }
    for child in &node.children {
        if let MountedChild::Node(nested) = child {
            attach_handles(nested);
        }
    }
}

/// Clear handle requests throughout a mounted tree.
fn detach_handles(node: &Rc<MountedNode>) {
    if let Some(slot) = &node.node_ref {
        handle::detach(slot);
    }
    for child in &node.children {
        if let MountedChild::Node(nested) = child {
            detach_handles(nested);
        }
    }
}

/// Release every instance id in a mounted tree.
fn release_tree(node: &MountedNode) {
    registry::release_instance(node.id);
    for child in &node.children {
        if let MountedChild::Node(nested) = child {
            release_tree(nested);
        }
    }
}

fn count_nodes(node: &MountedNode) -> usize {
    1 + node
        .children
        .iter()
        .map(|child| match child {
            MountedChild::Node(nested) => count_nodes(nested),
            MountedChild::Text(_) => 0,
        })
        .sum::<usize>()
}

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`mount`]; owns the instantiated tree.
///
/// Unmounting detaches every node handle first, then releases the nodes.
/// Dropping the handle does the same, so an instance cannot leak attached
/// handles.
pub struct MountHandle {
    root: Option<Rc<MountedNode>>,
}

impl MountHandle {
    /// The root node of the mounted tree.
    pub fn root(&self) -> Rc<MountedNode> {
        self.root
            .clone()
            .expect("mount handle already torn down")
    }

    /// Unmount: clear handles, release instances, drop the tree.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if let Some(root) = self.root.take() {
            detach_handles(&root);
            release_tree(&root);
            tracing::debug!(tag = %root.tag(), "unmounted element tree");
        }
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

// =============================================================================
// Mount / Unmount / Remount
// =============================================================================

/// Mount a rendered element into the host.
pub fn mount(element: Element) -> MountHandle {
    let root = instantiate(element);
    attach_handles(&root);
    tracing::debug!(
        tag = %root.tag(),
        nodes = count_nodes(&root),
        "mounted element tree"
    );
    MountHandle { root: Some(root) }
}

/// Unmount a mounted instance.
pub fn unmount(handle: MountHandle) {
    handle.unmount();
}

/// Replace a mounted instance with a newly rendered element.
///
/// A variant-tag change is a remount, never an in-place retype: the old
/// tree's handles are cleared before the new tree attaches, so a slot is
/// observably empty between generations and never points at a destroyed
/// node.
pub fn remount(handle: MountHandle, element: Element) -> MountHandle {
    handle.unmount();
    mount(element)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use crate::element::{element, Children, ElementProps};
    use crate::props::PropertyBag;
    use crate::types::EventKind;

    fn render(props: ElementProps) -> Element {
        element(props).unwrap()
    }

    #[test]
    fn test_mount_counts_every_node() {
        registry::reset_host();

        let inner = render(ElementProps {
            tag: Some(ElementTag::Span),
            ..Default::default()
        });
        let rendered = render(ElementProps {
            children: Some(Children::new().with_element(inner).with_text("tail")),
            ..Default::default()
        });

        let mounted = mount(rendered);
        assert_eq!(registry::mounted_count(), 2);

        mounted.unmount();
        assert_eq!(registry::mounted_count(), 0);
    }

    #[test]
    fn test_drop_tears_down() {
        registry::reset_host();

        let slot = crate::handle::NodeSlot::new();
        {
            let _mounted = mount(render(ElementProps {
                node_ref: Some(slot.clone()),
                ..Default::default()
            }));
            assert!(slot.is_attached());
        }

        // Scope exit dropped the handle: slot cleared, instance released.
        assert!(!slot.is_attached());
        assert_eq!(registry::mounted_count(), 0);
    }

    #[test]
    fn test_remount_clears_before_reattach() {
        registry::reset_host();

        let slot = crate::handle::NodeSlot::new();
        let mounted = mount(render(ElementProps {
            tag: Some(ElementTag::Div),
            node_ref: Some(slot.clone()),
            ..Default::default()
        }));

        let old_handle = slot.get().unwrap();
        assert_eq!(old_handle.tag(), ElementTag::Div);

        let remounted = remount(
            mounted,
            render(ElementProps {
                tag: Some(ElementTag::Anchor),
                node_ref: Some(slot.clone()),
                ..Default::default()
            }),
        );

        // New handle reflects the new variant; the old one is dead.
        let new_handle = slot.get().unwrap();
        assert_eq!(new_handle.tag(), ElementTag::Anchor);
        assert!(old_handle.node().is_none());

        remounted.unmount();
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_fire_invokes_attached_handlers() {
        registry::reset_host();

        let presses = Rc::new(Cell::new(0));
        let presses_counter = presses.clone();

        let mounted = mount(render(ElementProps {
            tag: Some(ElementTag::Button),
            props: PropertyBag::new().with_on(
                EventKind::Press,
                Rc::new(move |event| {
                    assert_eq!(event.kind, EventKind::Press);
                    assert_eq!(event.target, ElementTag::Button);
                    presses_counter.set(presses_counter.get() + 1);
                }),
            ),
            ..Default::default()
        }));

        let root = mounted.root();
        assert_eq!(root.fire(EventKind::Press), 1);
        assert_eq!(root.fire(EventKind::Press), 1);
        assert_eq!(presses.get(), 2);

        // No handler attached for this kind.
        assert_eq!(root.fire(EventKind::FocusIn), 0);

        mounted.unmount();
    }

    #[test]
    fn test_mounted_node_exposes_applied_props() {
        registry::reset_host();

        let mounted = mount(render(ElementProps {
            tag: Some(ElementTag::Anchor),
            props: PropertyBag::new()
                .with_attr("href", "/docs")
                .with_attr("data-nav", "primary"),
            classes: Some(crate::props::PropValue::Static("nav-link".to_string())),
            ..Default::default()
        }));

        let root = mounted.root();
        assert_eq!(root.tag(), ElementTag::Anchor);
        assert_eq!(root.attr("href"), Some(&AttrValue::from("/docs")));
        assert_eq!(root.attr("data-nav"), Some(&AttrValue::from("primary")));
        assert_eq!(root.class(), Some("nav-link"));
        assert!(root.style().is_empty());

        mounted.unmount();
    }
}
