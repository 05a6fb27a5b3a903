//! Shared types for the Unity AI catalog service: the error type used by
//! every crate, the resolved [`Identity`](identity::Identity), structured
//! trace events, and the TOML configuration model.

pub mod config;
pub mod error;
pub mod identity;
pub mod trace;
