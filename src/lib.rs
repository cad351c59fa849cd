//! # spark-ui
//!
//! Polymorphic element renderer for Rust.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! reactive prop values.
//!
//! ## Architecture
//!
//! Every presentational component (button, card, dialog, badge, ...) is a
//! thin wrapper over one primitive: [`element`]. A render request picks the
//! markup-element variant per instance, and the dispatcher resolves what is
//! legal for that variant before anything is instantiated:
//!
//! ```text
//! ElementProps → capability resolve → prop split → style merge → Element
//!                                                                   │
//!                                                     host::mount ──┴→ MountedNode (+ NodeHandle)
//! ```
//!
//! The dispatcher is a pure function of its inputs - no state between
//! calls, safe to invoke repeatedly and re-entrantly. Side effects happen
//! only at the host boundary: [`host::mount`] instantiates the tree and
//! populates handle requests, unmount clears them.
//!
//! ## Modules
//!
//! - [`types`] - Core types (ElementTag, AttrValue, events)
//! - [`capability`] - Per-variant property/event schemas
//! - [`props`] - Open property bag and the conflict-resolving split
//! - [`style`] - Two-layer style merge
//! - [`handle`] - Ownership-free node handles
//! - [`element`] - The render dispatcher
//! - [`host`] - Mount/unmount and the instantiated node tree
//! - [`renderer`] - Markup serialization

pub mod capability;
pub mod element;
pub mod error;
pub mod handle;
pub mod host;
pub mod props;
pub mod renderer;
pub mod style;
pub mod types;

// Re-export commonly used items
pub use types::{AttrValue, ElementTag, Event, EventKind};

pub use error::RenderError;

pub use capability::{resolve, Capability, Caps};

pub use props::{split, EventCallback, PropEntry, PropValue, PropertyBag, SplitProps};

pub use style::{merge, StyleMap, StyleValue};

pub use handle::{NodeHandle, NodeSlot};

pub use element::{element, Child, Children, Element, ElementProps};

pub use host::{
    is_mounted, mount, mounted_count, remount, reset_host, unmount, MountHandle, MountedChild,
    MountedNode,
};

pub use renderer::{mounted_markup, to_markup};
