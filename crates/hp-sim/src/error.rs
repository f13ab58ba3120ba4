use hp_core::HpError;
use hp_packet::PacketError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] HpError),

    #[error("packet error: {0}")]
    Packet(#[from] PacketError),
}

pub type SimResult<T> = Result<T, SimError>;
