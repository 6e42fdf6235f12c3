use std::rc::Rc;

use crate::{
    commands::{error::CommandError, Command, CommandDispatcher, TraceLog},
    protocol::Protocol,
    sync::SyncState,
    transport::CommandTransport,
    world::DesignateWorld,
};

const TRACE_LOG_CAPACITY: usize = 128;

/// A peer's whole synchronization context: the locked protocol, the shared
/// flag state, the dispatcher, and the encode trace history.
///
/// Capture goes through the `intercept_*` methods; delivered commands come
/// back in through [`SyncSession::deliver`]. An inactive session (single
/// player, or a peer that has left) passes everything through untouched.
pub struct SyncSession {
    pub(crate) protocol: Protocol,
    pub(crate) state: Rc<SyncState>,
    pub(crate) dispatcher: CommandDispatcher,
    pub(crate) trace_log: TraceLog,
    pub(crate) active: bool,
}

impl SyncSession {
    pub fn new(mut protocol: Protocol, transport: Box<dyn CommandTransport>) -> Self {
        if protocol.try_check_lock().is_ok() {
            protocol.lock();
        }
        let state = Rc::new(SyncState::new());
        let dispatcher = CommandDispatcher::new(state.clone(), transport);
        Self {
            protocol,
            state,
            dispatcher,
            trace_log: TraceLog::new(TRACE_LOG_CAPACITY),
            active: true,
        }
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    /// A handle to the shared flag state, for frontends that route scope or
    /// selection reads through it.
    pub fn state(&self) -> Rc<SyncState> {
        self.state.clone()
    }

    pub fn trace_log(&self) -> &TraceLog {
        &self.trace_log
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Whether a local mutating action should be captured right now: the
    /// session is live and we are not inside a replay window.
    pub fn should_sync(&self) -> bool {
        self.active && !self.state.replaying()
    }

    /// Applies one delivered command to the world.
    pub fn deliver<W: DesignateWorld>(
        &self,
        world: &mut W,
        command: &Command,
    ) -> Result<(), CommandError> {
        self.dispatcher
            .receive(&self.protocol.action_kinds, world, command)
    }

    /// Applies a batch of delivered commands in order, dropping failures.
    pub fn deliver_batch<W: DesignateWorld>(&self, world: &mut W, commands: &[Command]) {
        self.dispatcher
            .receive_batch(&self.protocol.action_kinds, world, commands);
    }
}
