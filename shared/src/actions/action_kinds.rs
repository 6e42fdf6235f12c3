use std::{any::TypeId, collections::HashMap};

use lockstep_serde::{BitReader, BitWrite, Serde, UnsignedVariableInteger};

use crate::{
    actions::{
        error::{ActionKindsError, ActionReadError},
        Action, ActionBuilder, CaptureEnv,
    },
    types::ActionNetId,
};

/// The identity of an action type, independent of any wire tag.
#[derive(Debug, Eq, Hash, Copy, Clone, PartialEq)]
pub struct ActionKind {
    type_id: TypeId,
}

impl ActionKind {
    pub fn of<A: Action>() -> Self {
        Self {
            type_id: TypeId::of::<A>(),
        }
    }
}

/// Registry of all action types a session can encode or decode.
///
/// Net ids are handed out in registration order, so every peer must register
/// the same actions in the same order for payloads to mean the same thing.
pub struct ActionKinds {
    current_net_id: ActionNetId,
    kind_map: HashMap<ActionKind, (ActionNetId, Box<dyn ActionBuilder>)>,
    net_id_map: HashMap<ActionNetId, ActionKind>,
}

impl ActionKinds {
    pub fn new() -> Self {
        Self {
            current_net_id: 0,
            kind_map: HashMap::new(),
            net_id_map: HashMap::new(),
        }
    }

    pub fn add_action<A: Action>(&mut self) {
        let action_kind = ActionKind::of::<A>();

        if self.kind_map.contains_key(&action_kind) {
            return;
        }

        let net_id = self.current_net_id;
        self.kind_map
            .insert(action_kind, (net_id, A::create_builder()));
        self.net_id_map.insert(net_id, action_kind);
        self.current_net_id += 1;
    }

    pub fn try_kind_to_net_id(&self, kind: &ActionKind) -> Result<ActionNetId, ActionKindsError> {
        self.kind_map
            .get(kind)
            .map(|(net_id, _)| *net_id)
            .ok_or(ActionKindsError::ActionKindNotFound)
    }

    pub fn try_net_id_to_kind(&self, net_id: ActionNetId) -> Result<ActionKind, ActionKindsError> {
        self.net_id_map
            .get(&net_id)
            .copied()
            .ok_or(ActionKindsError::NetIdNotFound { net_id })
    }

    pub fn try_kind_to_builder(
        &self,
        kind: &ActionKind,
    ) -> Result<&dyn ActionBuilder, ActionKindsError> {
        self.kind_map
            .get(kind)
            .map(|(_, builder)| builder.as_ref())
            .ok_or(ActionKindsError::ActionKindNotFound)
    }

    /// Writes the action's net id followed by its fields.
    pub fn write(
        &self,
        writer: &mut dyn BitWrite,
        env: &dyn CaptureEnv,
        action: &dyn Action,
    ) -> Result<(), ActionKindsError> {
        let net_id = self.try_kind_to_net_id(&action.kind())?;
        UnsignedVariableInteger::<4>::new(net_id).ser(writer);
        action.write_fields(writer, env);
        Ok(())
    }

    /// Reads a net id and dispatches to the matching builder.
    pub fn read(&self, reader: &mut BitReader) -> Result<Box<dyn Action>, ActionReadError> {
        let net_id = ActionNetId::try_from(UnsignedVariableInteger::<4>::de(reader)?.get())
            .map_err(|_| lockstep_serde::SerdeErr)?;
        let kind = self.try_net_id_to_kind(net_id)?;
        let builder = self.try_kind_to_builder(&kind)?;
        Ok(builder.read(reader)?)
    }
}

impl Default for ActionKinds {
    fn default() -> Self {
        Self::new()
    }
}
