//! # Lockstep Shared
//! Command capture, canonical encoding, and ordered replay shared between the
//! lockstep host & client. Player actions that would mutate simulation state
//! locally are intercepted, encoded into a canonical byte form, routed
//! through an ordered command channel, and applied on every peer through one
//! replay path.

#![deny(trivial_numeric_casts, unstable_features)]

pub use lockstep_serde::{
    BitCounter, BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr, SerdeInteger,
    SignedInteger, SignedVariableInteger, UnsignedInteger, UnsignedVariableInteger,
};

mod actions;
mod commands;
mod protocol;
mod sync;
mod transport;
mod types;
mod world;

pub use actions::{
    builtin::{DesignateCells, InstallObject, PlaceBuilding, SetAllowedArea},
    error::{ActionKindsError, ActionReadError},
    Action, ActionBuilder, ActionKind, ActionKinds, CaptureEnv, Named, NullCaptureEnv,
};
pub use commands::{
    error::{CommandError, DecodeError, EncodeError},
    Command, CommandDispatcher, CommandKind, CommandWriter, DesignateMode, TraceLog, TraceNode,
};
pub use protocol::{error::ProtocolError, Protocol, ProtocolBuilder};
pub use sync::{
    InstallOverrideGuard, ReplayGuard, ScopeOverrideGuard, SyncSession, SyncState, Verdict,
};
pub use transport::{CommandTransport, QueueTransport};
pub use types::{ActionNetId, ScopeId};
pub use world::{Cell, DesignateWorld, ObjectId, Rot4};
