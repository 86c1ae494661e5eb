//! Allocation tracking for the test suite.
//!
//! Every node in a [`Queue`](crate::Queue) carries a [`Track`] cell around
//! its string value. In release builds the cell is just the value; in test
//! builds it registers the allocation with a thread-local [`registry`], so
//! that [`leak_check`] can fail a test if any node outlives the queue that
//! owned it.

use core::fmt;

/// Tracks a value's allocation, detecting leaks in test builds.
///
/// Outside of test builds, this is a transparent wrapper around the value,
/// and the tracking machinery compiles away.
pub(crate) struct Track<T> {
    value: T,

    /// Held for its `Drop`: the registry keeps a weak reference back to this
    /// allocation, and reports it as leaked if it is still alive when
    /// [`leak_check`] finishes.
    #[cfg(test)]
    #[allow(dead_code)]
    track: Option<std::sync::Arc<registry::TrackData>>,
}

// === impl Track ===

impl<T> Track<T> {
    /// Track a value for leaks.
    #[inline(always)]
    #[track_caller]
    pub(crate) fn new(value: T) -> Track<T> {
        Track {
            value,

            #[cfg(test)]
            track: registry::Registry::start_tracking::<T>(),
        }
    }

    /// Get a reference to the value.
    #[inline(always)]
    pub(crate) fn get_ref(&self) -> &T {
        &self.value
    }

    /// Stop tracking the value for leaks.
    #[inline(always)]
    pub(crate) fn into_inner(self) -> T {
        self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Track<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

/// Runs `f` with a fresh allocation-tracking registry as the current
/// thread's default, then panics if any allocation tracked while `f` ran is
/// still alive.
#[cfg(test)]
pub(crate) fn leak_check(f: impl FnOnce()) {
    let registry = registry::Registry::default();
    let _tracking = registry.set_default();
    f();
    registry.check();
}
