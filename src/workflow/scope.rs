//! Scoped acquisition and release.

use std::ops::{Deref, DerefMut};

use tracing::{debug, warn};

use crate::graph::Close;

/// Owns a [`Close`] resource and releases it exactly once when dropped.
///
/// Guards declared later are dropped first, so a session guard created after
/// its connection guard is always released before the connection.
pub struct Scoped<T: Close> {
    inner: T,
    label: &'static str,
}

impl<T: Close> Scoped<T> {
    /// Take ownership of an acquired resource.
    pub fn new(inner: T, label: &'static str) -> Self {
        debug!("Acquired {}", label);
        Self { inner, label }
    }
}

impl<T: Close> Deref for Scoped<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T: Close> DerefMut for Scoped<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

impl<T: Close> Drop for Scoped<T> {
    fn drop(&mut self) {
        match self.inner.close() {
            Ok(()) => debug!("Released {}", self.label),
            Err(e) => warn!("Failed to release {}: {}", self.label, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DriverError;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Tracked {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
        fail: bool,
    }

    impl Close for Tracked {
        fn close(&mut self) -> Result<(), DriverError> {
            self.log.borrow_mut().push(self.name);
            if self.fail {
                Err(DriverError::new("nope"))
            } else {
                Ok(())
            }
        }
    }

    fn tracked(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Tracked {
        Tracked {
            name,
            log: Rc::clone(log),
            fail: false,
        }
    }

    #[test]
    fn releases_in_reverse_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let _outer = Scoped::new(tracked("connection", &log), "connection");
            let _inner = Scoped::new(tracked("session", &log), "session");
        }
        assert_eq!(*log.borrow(), ["session", "connection"]);
    }

    #[test]
    fn releases_once_on_early_return() {
        let log = Rc::new(RefCell::new(Vec::new()));

        fn body(log: &Rc<RefCell<Vec<&'static str>>>) -> Result<(), &'static str> {
            let _guard = Scoped::new(tracked("r", log), "resource");
            Err("failed midway")
        }

        assert!(body(&log).is_err());
        assert_eq!(*log.borrow(), ["r"]);
    }

    #[test]
    fn failed_release_does_not_panic() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut resource = tracked("r", &log);
        resource.fail = true;
        drop(Scoped::new(resource, "resource"));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn derefs_to_inner() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let guard = Scoped::new(tracked("r", &log), "resource");
        assert_eq!(guard.name, "r");
    }
}
