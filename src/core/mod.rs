//! Core building blocks: typed ids, rule configuration, and seedable RNG.

pub mod config;
pub mod ids;
pub mod rng;

pub use config::GameConfig;
pub use ids::{BuildingId, CardId, CardIdAlloc, ParticipantId, PlayerId};
pub use rng::GameRng;
