use std::any::Any;

use lockstep_serde::{BitReader, BitWrite, SerdeErr};

use crate::{actions::ActionKind, world::ObjectId};

pub trait Named {
    fn name(&self) -> String;
}

/// A player-issued mutation of shared simulation state.
///
/// An action describes *what* the player asked for (which designation, which
/// building, which material); the accompanying targets (cells or an object)
/// travel beside it in the command payload. Everything an action writes must
/// come from its own fields or from the `CaptureEnv`, never from ambient
/// per-peer state, so that the same action encodes to the same bytes on
/// every machine.
pub trait Action: Named + Any {
    fn kind(&self) -> ActionKind;

    /// Writes the action's wire fields. `env` supplies capture-time context
    /// that lives outside the action value itself, such as the current
    /// selection.
    fn write_fields(&self, writer: &mut dyn BitWrite, env: &dyn CaptureEnv);

    /// Actions that never touch shared state (pure camera or UI tools) opt
    /// out of capture entirely.
    fn relevant_to_sync(&self) -> bool {
        true
    }

    /// The object this action will install, if any. Exposed so the replay
    /// path can pin the decoded target for the duration of the designation.
    fn install_target(&self) -> Option<ObjectId> {
        None
    }

    fn as_any(&self) -> &dyn Any;

    fn create_builder() -> Box<dyn ActionBuilder>
    where
        Self: Sized;
}

/// Reads an action of one concrete kind back out of a payload.
pub trait ActionBuilder: Send + Sync {
    fn read(&self, reader: &mut BitReader) -> Result<Box<dyn Action>, SerdeErr>;
}

/// Capture-time context an action may consult while encoding, and the
/// channel for purely cosmetic feedback that stays local to the capturing
/// peer.
pub trait CaptureEnv {
    /// The object currently selected for installation, if the frontend has
    /// one. Consulted when an action's own target field is unset.
    fn selected_install_target(&self) -> Option<ObjectId> {
        None
    }

    /// Fired on the capturing peer only, immediately after a successful
    /// capture. Cosmetic; must not touch shared state.
    fn visual_feedback(&mut self, _target: ObjectId) {}
}

/// A `CaptureEnv` with no selection and no feedback.
pub struct NullCaptureEnv;

impl CaptureEnv for NullCaptureEnv {}
