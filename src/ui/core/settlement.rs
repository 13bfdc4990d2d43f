use std::cell::RefCell;
use tokio::sync::oneshot;

/// One-shot latch in front of a oneshot channel.
///
/// The producing side may be triggered any number of times by an event
/// source; only the first value is delivered.
#[derive(Debug)]
pub struct Settlement<T> {
    sender: RefCell<Option<oneshot::Sender<T>>>,
}

impl<T> Settlement<T> {
    pub fn new() -> (Self, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                sender: RefCell::new(Some(tx)),
            },
            rx,
        )
    }

    /// Delivers `value` if nothing was delivered yet. Returns whether this
    /// call settled the latch.
    pub fn settle(&self, value: T) -> bool {
        let sender = self.sender.borrow_mut().take();
        match sender {
            Some(tx) => {
                // The receiver may already be gone; the latch is spent either way.
                let _ = tx.send(value);
                true
            }
            None => false,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.sender.borrow().is_none()
    }
}
