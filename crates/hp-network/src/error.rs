//! Network-subsystem error type.

use thiserror::Error;

use hp_core::NodeId;

/// Errors produced while building a `hp-network` graph by hand.
///
/// Generation itself cannot fail; these only surface from
/// [`NetworkBuilder::add_link`](crate::NetworkBuilder::add_link).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("cannot link {0} to itself")]
    SelfLoop(NodeId),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
