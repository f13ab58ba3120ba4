use hp_core::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PacketError {
    #[error("cannot spawn a packet at {0}: no such node")]
    NodeNotFound(NodeId),
}

pub type PacketResult<T> = Result<T, PacketError>;
