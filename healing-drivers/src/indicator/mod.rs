//! Status indicator implementations

pub mod heartbeat;

pub use heartbeat::Heartbeat;
