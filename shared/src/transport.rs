use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use crate::commands::Command;

/// Where captured commands go. Implementations must deliver every command to
/// every peer in one total order; the common implementation relays through
/// an arbiter that stamps the order.
pub trait CommandTransport {
    fn enqueue(&mut self, command: Command);
}

/// An in-process transport backed by a shared queue. Useful for tests and
/// for a host peer that is its own arbiter: drain the queue, stamp the
/// order, and feed the commands back through delivery on every peer.
#[derive(Clone, Default)]
pub struct QueueTransport {
    queue: Rc<RefCell<VecDeque<Command>>>,
}

impl QueueTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Command> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }
}

impl CommandTransport for QueueTransport {
    fn enqueue(&mut self, command: Command) {
        self.queue.borrow_mut().push_back(command);
    }
}
