use super::Word;
use crate::error;
use crate::lang::Error;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::Arc;

type Result<T> = std::result::Result<T, Error>;

/// ## Unbounded FIFO of words
///
/// Cloning a `Channel` shares the queue; chaining two programs means the
/// output channel of one *is* the input channel of the next. Sending never
/// blocks. Receiving blocks until a value arrives or the channel closes.

#[derive(Clone, Default)]
pub struct Channel {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    queue: Mutex<Queue>,
    ready: Condvar,
}

#[derive(Default)]
struct Queue {
    values: VecDeque<Word>,
    closed: bool,
}

impl Channel {
    pub fn new() -> Channel {
        Channel::default()
    }

    pub fn with_values<I: IntoIterator<Item = Word>>(values: I) -> Channel {
        let channel = Channel::new();
        channel.send_all(values);
        channel
    }

    /// Values sent after `close` are dropped.
    pub fn send(&self, value: Word) {
        let mut queue = self.inner.queue.lock();
        if queue.closed {
            return;
        }
        queue.values.push_back(value);
        self.inner.ready.notify_one();
    }

    pub fn send_all<I: IntoIterator<Item = Word>>(&self, values: I) {
        let mut queue = self.inner.queue.lock();
        if queue.closed {
            return;
        }
        queue.values.extend(values);
        self.inner.ready.notify_all();
    }

    /// Blocks until a value is available. Values queued before a close are
    /// still delivered; after that a closed channel yields `Cancelled`.
    pub fn receive(&self) -> Result<Word> {
        let mut queue = self.inner.queue.lock();
        loop {
            if let Some(value) = queue.values.pop_front() {
                return Ok(value);
            }
            if queue.closed {
                return Err(error!(Cancelled; "CHANNEL CLOSED"));
            }
            self.inner.ready.wait(&mut queue);
        }
    }

    /// Never blocks. `Ok(None)` means the channel is open but empty.
    pub fn try_receive(&self) -> Result<Option<Word>> {
        let mut queue = self.inner.queue.lock();
        match queue.values.pop_front() {
            Some(value) => Ok(Some(value)),
            None if queue.closed => Err(error!(Cancelled; "CHANNEL CLOSED")),
            None => Ok(None),
        }
    }

    /// Takes every value currently queued.
    pub fn drain(&self) -> Vec<Word> {
        self.inner.queue.lock().values.drain(..).collect()
    }

    pub fn close(&self) {
        self.inner.queue.lock().closed = true;
        self.inner.ready.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.queue.lock().closed
    }

    pub fn len(&self) -> usize {
        self.inner.queue.lock().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.queue.lock().values.is_empty()
    }

    /// True when both handles share one queue.
    pub fn same_channel(&self, other: &Channel) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let queue = self.inner.queue.lock();
        write!(f, "Channel {:?}", queue.values)?;
        if queue.closed {
            write!(f, " (closed)")?;
        }
        Ok(())
    }
}
