//! Line distributions: who sings which part of a song, and when.
//!
//! A [`Timeline`] holds performers and their time segments and answers two
//! questions for any playhead position: who is singing, and how much of
//! the song each performer has covered so far. Everything around it
//! (persistence, playback sampling, configuration) lives in its own module.

pub mod config;
pub mod logging;
pub mod ops;
pub mod playback;
pub mod store;
pub mod types;

pub use types::coverage::{CoverageStat, CoverageSummary};
pub use types::performer::Performer;
pub use types::segment::{Segment, SegmentPatch};
pub use types::timeline::Timeline;
