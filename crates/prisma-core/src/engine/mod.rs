//! # Engine Module
//!
//! The stateful navigation and filtering layer of MolPrisma.
//!
//! ## Overview
//!
//! The engine owns a loaded record set and everything that changes while the user
//! browses it: the scroll cursor, the selected column, the record-kind toggles and
//! the categorical filters. Every visible-record query goes through a [`Visibility`]
//! value, so the filtered sequence is recomputed only when the predicate changes.
//!
//! ## Architecture
//!
//! - **Record Store** ([`store`]) - Records, cursor and the memoized filtered view
//! - **Filter Engine** ([`filter`]) - Named filters cycling over reference values
//! - **Visibility** ([`visibility`]) - Kind toggles and filter pins as a plain value
//! - **View Controller** ([`controller`]) - Action dispatch, cursor repositioning,
//!   highlights and render frames
//! - **Configuration** ([`config`]) - Startup toggles, filter registry and scrolling
//! - **Error Handling** ([`error`]) - Engine-level error type
//!
//! [`Visibility`]: visibility::Visibility

pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod store;
pub(crate) mod utils;
pub mod visibility;
