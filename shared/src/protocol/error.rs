use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("protocol is already locked and cannot be modified")]
    AlreadyLocked,
}
