//! Sampling a player's playhead against a timeline.

pub mod player;
pub mod sampler;
pub mod viewport;

pub use player::{Player, SimulatedPlayer};
pub use sampler::{PlaybackFrame, PlaybackSampler};
pub use viewport::Viewport;
