pub mod catalog;
pub mod coverage;
pub mod performer;
pub mod playback_state;
pub mod segment;
pub mod session;
pub mod timeline;
