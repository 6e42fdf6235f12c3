use std::rc::Rc;

use log::{trace, warn};

use lockstep_serde::{BitReader, Serde};

use crate::{
    actions::ActionKinds,
    commands::{
        error::{CommandError, DecodeError},
        Command, CommandKind, DesignateMode,
    },
    sync::{InstallOverrideGuard, ReplayGuard, ScopeOverrideGuard, SyncState},
    transport::CommandTransport,
    types::ScopeId,
    world::{Cell, DesignateWorld, ObjectId},
};

enum ReplayArgs {
    Single(Cell),
    Multi(Vec<Cell>),
    Object(ObjectId),
}

/// Moves commands between the capture path and the replay path.
///
/// Outbound, it hands finished commands to the transport. Inbound, it
/// decodes each payload and applies it to the world through the one replay
/// path every peer shares, with the replay gate and context overrides held
/// for exactly the span of the world call.
pub struct CommandDispatcher {
    state: Rc<SyncState>,
    transport: Box<dyn CommandTransport>,
}

impl CommandDispatcher {
    pub fn new(state: Rc<SyncState>, transport: Box<dyn CommandTransport>) -> Self {
        Self { state, transport }
    }

    pub fn send(&mut self, scope: ScopeId, kind: CommandKind, payload: Vec<u8>) {
        trace!(
            "sending {:?} command for scope {} ({} bytes)",
            kind,
            scope,
            payload.len()
        );
        self.transport.enqueue(Command {
            scope,
            kind,
            payload,
        });
    }

    /// Applies one delivered command to the world. Commands must arrive here
    /// in the transport's total order; this method never reorders or defers.
    pub fn receive<W: DesignateWorld>(
        &self,
        kinds: &ActionKinds,
        world: &mut W,
        command: &Command,
    ) -> Result<(), CommandError> {
        match command.kind {
            CommandKind::Designator => self.replay_designator(kinds, world, command),
        }
    }

    /// Applies a batch in order. A command that fails is logged and dropped;
    /// the rest of the batch still applies. Every peer sees the same bytes,
    /// so a deterministic failure drops the same command everywhere.
    pub fn receive_batch<W: DesignateWorld>(
        &self,
        kinds: &ActionKinds,
        world: &mut W,
        commands: &[Command],
    ) {
        for command in commands {
            if let Err(error) = self.receive(kinds, world, command) {
                warn!("dropping command for scope {}: {}", command.scope, error);
            }
        }
    }

    fn replay_designator<W: DesignateWorld>(
        &self,
        kinds: &ActionKinds,
        world: &mut W,
        command: &Command,
    ) -> Result<(), CommandError> {
        let scope = command.scope;
        if !world.contains_scope(scope) {
            return Err(CommandError::ScopeNotFound { scope_id: scope });
        }

        let mut reader = BitReader::new(&command.payload);
        let mode = DesignateMode::de(&mut reader).map_err(DecodeError::from)?;
        let action = kinds.read(&mut reader).map_err(DecodeError::from)?;

        // Decode everything before touching the world, so a malformed
        // payload is rejected whole instead of half-applied.
        let args = match mode {
            DesignateMode::SingleCell => {
                ReplayArgs::Single(Cell::de(&mut reader).map_err(DecodeError::from)?)
            }
            DesignateMode::MultiCell => {
                ReplayArgs::Multi(Vec::<Cell>::de(&mut reader).map_err(DecodeError::from)?)
            }
            DesignateMode::Object => {
                let object = ObjectId::de(&mut reader).map_err(DecodeError::from)?;
                if !world.resolve_object(scope, object) {
                    return Err(CommandError::ReferenceNotFound {
                        scope_id: scope,
                        object_id: object,
                    });
                }
                ReplayArgs::Object(object)
            }
        };

        let state = self.state.as_ref();
        let _replaying = ReplayGuard::new(state);
        let _scope_override = ScopeOverrideGuard::new(state, scope);
        let _install_override = action
            .install_target()
            .map(|target| InstallOverrideGuard::new(state, target));

        match args {
            ReplayArgs::Single(cell) => world.designate_single(scope, action.as_ref(), cell),
            ReplayArgs::Multi(cells) => world.designate_multi(scope, action.as_ref(), &cells),
            ReplayArgs::Object(object) => world.designate_object(scope, action.as_ref(), object),
        }

        Ok(())
    }
}
