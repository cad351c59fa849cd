//! Host rendering environment boundary.
//!
//! The renderer itself is pure; this module is where its output takes
//! effect. [`mount`] instantiates a rendered [`crate::Element`] into a
//! host-owned node tree and populates any handle requests; [`MountHandle`]
//! owns the tree and clears every handle on unmount. A registry of live
//! instance ids backs the bookkeeping, thread-local like the rest of the
//! host model.

mod mount;
mod registry;

pub use mount::{mount, remount, unmount, MountHandle, MountedChild, MountedNode};
pub use registry::{is_mounted, mounted_count, reset_host};
