//! Networking: the backend handle, the realtime channel, and wire types.

pub mod client;
pub mod realtime;
pub mod types;
