//! Scoped pointer capture.
//!
//! While a drag is active, pointer moves and releases must be observed
//! anywhere in the document, not only over the diagram. The host installs
//! such a listener in [`PointerHost::capture`] and hands back a
//! [`CaptureGuard`]; dropping the guard removes the listener again.

use std::fmt;

/// Something that can route document-wide pointer events to a view.
pub trait PointerHost {
    /// Start routing events. The listener stays installed until the returned
    /// guard is dropped.
    fn capture(&self) -> CaptureGuard;
}

impl<F> PointerHost for F
where
    F: Fn() -> CaptureGuard,
{
    fn capture(&self) -> CaptureGuard {
        self()
    }
}

/// Releases a pointer capture when dropped.
#[must_use = "dropping the guard releases the capture immediately"]
pub struct CaptureGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl CaptureGuard {
    /// A guard that runs `release` exactly once, when dropped.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A guard with nothing to release.
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Whether dropping this guard will release anything.
    pub fn is_attached(&self) -> bool {
        self.release.is_some()
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureGuard")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// A host without a global listener, for headless use.
///
/// Callers feed every pointer event to the view themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedHost;

impl PointerHost for DetachedHost {
    fn capture(&self) -> CaptureGuard {
        CaptureGuard::detached()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn test_guard_releases_once_on_drop() {
        let released = Rc::new(Cell::new(0));
        let counter = Rc::clone(&released);

        let guard = CaptureGuard::new(move || counter.set(counter.get() + 1));
        assert!(guard.is_attached());
        assert_eq!(released.get(), 0);

        drop(guard);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn test_detached_guard() {
        let guard = DetachedHost.capture();
        assert!(!guard.is_attached());
        assert_eq!(format!("{guard:?}"), "CaptureGuard { attached: false }");
    }

    #[test]
    fn test_closure_host() {
        let active = Rc::new(Cell::new(false));
        let flag = Rc::clone(&active);
        let host = move || {
            flag.set(true);
            let flag = Rc::clone(&flag);
            CaptureGuard::new(move || flag.set(false))
        };

        let guard = host.capture();
        assert!(active.get());
        drop(guard);
        assert!(!active.get());
    }
}
