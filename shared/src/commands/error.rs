use thiserror::Error;

use lockstep_serde::SerdeErr;

use crate::{
    actions::error::{ActionKindsError, ActionReadError},
    types::ScopeId,
    world::ObjectId,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("cannot encode an unregistered action: {0}")]
    UnregisteredAction(#[from] ActionKindsError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed command payload: {0}")]
    Malformed(#[from] SerdeErr),
    #[error(transparent)]
    Action(#[from] ActionReadError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("scope {scope_id} does not resolve to a live partition")]
    ScopeNotFound { scope_id: ScopeId },
    #[error("object {object_id:?} does not resolve within scope {scope_id}")]
    ReferenceNotFound {
        scope_id: ScopeId,
        object_id: ObjectId,
    },
}
