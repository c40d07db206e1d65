//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `chat`, `notice`) so individual
//! components can depend on small focused models. Components hold these in
//! `RwSignal`s provided via context; the structs themselves stay plain so
//! the interesting operations are testable off the event loop.

pub mod auth;
pub mod chat;
pub mod notice;
