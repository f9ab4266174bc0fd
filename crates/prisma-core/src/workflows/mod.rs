//! # Workflows Module
//!
//! High-level entry points that tie [`core`](crate::core) and
//! [`engine`](crate::engine) together.
//!
//! - **Session** ([`session`]) - Raw lines or a file path plus configuration in,
//!   a ready [`ViewController`](crate::engine::controller::ViewController) out.

pub mod session;
