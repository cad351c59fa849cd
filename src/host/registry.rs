//! Instance registry - id allocation and mount bookkeeping.
//!
//! Every instantiated node gets a host-unique id for its lifetime. The
//! mounted set is a `ReactiveSet` so host-side deriveds that watch the
//! tree react when instances mount or unmount.

use std::cell::RefCell;

use spark_signals::ReactiveSet;

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    /// Next instance id. Ids are never reused within a thread.
    static NEXT_INSTANCE: RefCell<usize> = const { RefCell::new(0) };

    /// Set of currently mounted instance ids.
    static MOUNTED: RefCell<ReactiveSet<usize>> = RefCell::new(ReactiveSet::new());
}

// =============================================================================
// Allocation
// =============================================================================

/// Allocate a fresh instance id.
pub(crate) fn allocate_instance() -> usize {
    NEXT_INSTANCE.with(|next| {
        let mut next = next.borrow_mut();
        let id = *next;
        *next += 1;
        id
    })
}

/// Record an instance as mounted.
pub(crate) fn register_mount(id: usize) {
    MOUNTED.with(|set| {
        set.borrow_mut().insert(id);
    });
}

/// Record an instance as unmounted.
pub(crate) fn release_instance(id: usize) {
    MOUNTED.with(|set| {
        set.borrow_mut().remove(&id);
    });
}

// =============================================================================
// Lookups
// =============================================================================

/// Whether an instance id is currently mounted.
///
/// Note: creates a reactive dependency when called from a derived/effect.
pub fn is_mounted(id: usize) -> bool {
    MOUNTED.with(|set| set.borrow().contains(&id))
}

/// Count of currently mounted instances.
pub fn mounted_count() -> usize {
    MOUNTED.with(|set| set.borrow().len())
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset all host state (for testing).
pub fn reset_host() {
    MOUNTED.with(|set| set.borrow_mut().clear());
    NEXT_INSTANCE.with(|next| *next.borrow_mut() = 0);
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_monotonic() {
        reset_host();

        let first = allocate_instance();
        let second = allocate_instance();
        assert_eq!(second, first + 1);
    }

    #[test]
    fn test_mount_bookkeeping() {
        reset_host();

        let id = allocate_instance();
        assert!(!is_mounted(id));

        register_mount(id);
        assert!(is_mounted(id));
        assert_eq!(mounted_count(), 1);

        release_instance(id);
        assert!(!is_mounted(id));
        assert_eq!(mounted_count(), 0);
    }

    #[test]
    fn test_reset() {
        reset_host();

        let id = allocate_instance();
        register_mount(id);
        reset_host();

        assert_eq!(mounted_count(), 0);
        assert_eq!(allocate_instance(), 0);
    }
}
