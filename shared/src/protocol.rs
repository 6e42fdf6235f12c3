pub mod error;

use std::mem;

use crate::actions::{
    builtin::{DesignateCells, InstallObject, PlaceBuilding, SetAllowedArea},
    Action, ActionKinds,
};
use crate::protocol::error::ProtocolError;

/// The shared wire contract between peers: which action kinds exist and
/// which net ids they answer to.
///
/// Build one with [`Protocol::builder`], register actions in a fixed order,
/// then hand it to a session. Registration order is part of the contract;
/// peers that disagree on it will misread each other's payloads. Locking
/// freezes the registry so nothing can drift after a session starts.
pub struct Protocol {
    pub action_kinds: ActionKinds,
    locked: bool,
}

impl Protocol {
    pub fn builder() -> ProtocolBuilder {
        ProtocolBuilder {
            protocol: Protocol {
                action_kinds: ActionKinds::new(),
                locked: false,
            },
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn lock(&mut self) {
        self.check_lock();
        self.locked = true;
    }

    pub fn try_lock(&mut self) -> Result<(), ProtocolError> {
        self.try_check_lock()?;
        self.locked = true;
        Ok(())
    }

    /// Panics if the protocol is already locked.
    pub fn check_lock(&self) {
        if self.locked {
            panic!("Protocol already locked!");
        }
    }

    pub fn try_check_lock(&self) -> Result<(), ProtocolError> {
        if self.locked {
            return Err(ProtocolError::AlreadyLocked);
        }
        Ok(())
    }
}

pub struct ProtocolBuilder {
    protocol: Protocol,
}

impl ProtocolBuilder {
    pub fn add_action<A: Action>(&mut self) -> &mut Self {
        self.protocol.check_lock();
        self.protocol.action_kinds.add_action::<A>();
        self
    }

    pub fn try_add_action<A: Action>(&mut self) -> Result<&mut Self, ProtocolError> {
        self.protocol.try_check_lock()?;
        self.protocol.action_kinds.add_action::<A>();
        Ok(self)
    }

    /// Registers the built-in designation actions, in their canonical order.
    pub fn add_default_actions(&mut self) -> &mut Self {
        self.add_action::<DesignateCells>()
            .add_action::<SetAllowedArea>()
            .add_action::<PlaceBuilding>()
            .add_action::<InstallObject>()
    }

    pub fn try_add_default_actions(&mut self) -> Result<&mut Self, ProtocolError> {
        self.protocol.try_check_lock()?;
        Ok(self.add_default_actions())
    }

    pub fn build(&mut self) -> Protocol {
        mem::replace(
            &mut self.protocol,
            Protocol {
                action_kinds: ActionKinds::new(),
                locked: false,
            },
        )
    }
}
