pub use self::{config::*, core::*, engine::*};

pub mod config;
pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding when setting falling piece")]
pub struct PieceCollisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CommandError {
    #[display("piece colliding when applying command")]
    PieceCollision(PieceCollisionError),
    #[display("session is not running")]
    NotRunning,
}
