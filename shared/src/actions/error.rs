use thiserror::Error;

use lockstep_serde::SerdeErr;

use crate::types::ActionNetId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionKindsError {
    #[error("action net id {net_id} has no registered kind; peers must register the same actions in the same order")]
    NetIdNotFound { net_id: ActionNetId },
    #[error("action kind is not registered with this protocol")]
    ActionKindNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionReadError {
    #[error(transparent)]
    Kinds(#[from] ActionKindsError),
    #[error("malformed action payload: {0}")]
    Serde(#[from] SerdeErr),
}
