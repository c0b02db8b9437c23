//! Per-client styling sessions.
//!
//! Each session owns one avatar state, isolated from every other session.

pub mod manager;

pub use manager::{Session, SessionManager, SharedSession};
