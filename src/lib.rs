//! # glasschat
//!
//! Leptos + WASM client for a managed realtime chat backend. Email/password
//! and OAuth sign-in, a message list fed by a live insert subscription, and
//! a composer. Persistence, fan-out, and auth all live on the external
//! service; this crate is the browser-side client talking to its auth, data,
//! and realtime surfaces.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod state;
pub mod util;
