use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::channel::oneshot;

/// Frame-driven delays.
///
/// A delay resolves on the first [`Timeouts::advance`] whose clock reading
/// reaches its deadline; the render loop supplies the clock.
#[derive(Clone, Default)]
pub struct Timeouts {
    inner: Rc<RefCell<Inner>>,
}

#[derive(Default)]
struct Inner {
    now: Duration,
    pending: Vec<(Duration, oneshot::Sender<()>)>,
}

impl Timeouts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A receiver that completes once `delay` has elapsed on this clock.
    #[must_use]
    pub fn after(&self, delay: Duration) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        let mut inner = self.inner.borrow_mut();
        let deadline = inner.now + delay;
        inner.pending.push((deadline, tx));
        rx
    }

    /// Moves the clock to `now` and fires every due delay.
    pub fn advance(&self, now: Duration) {
        let due: Vec<oneshot::Sender<()>> = {
            let mut inner = self.inner.borrow_mut();
            inner.now = inner.now.max(now);
            let current = inner.now;
            let (due, pending): (Vec<_>, Vec<_>) = inner.pending.drain(..).partition(|(deadline, _)| *deadline <= current);
            inner.pending = pending;
            due.into_iter().map(|(_, tx)| tx).collect()
        };
        for tx in due {
            // receiver may already be gone
            let _ = tx.send(());
        }
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }
}

impl std::fmt::Debug for Timeouts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Timeouts")
            .field("now", &self.now())
            .field("pending", &self.pending())
            .finish()
    }
}
