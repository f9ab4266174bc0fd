//! # MolPrisma Core Library
//!
//! The navigation and filtering engine behind the `molprisma` terminal viewer for
//! fixed-column molecular structure files (PDB).
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout and contains no terminal code.
//!
//! - **[`core`]: The Foundation.** Stateless pieces: the column schema and its
//!   format constants, record classification and padding, and line reading.
//!
//! - **[`engine`]: The Logic Core.** The record store with its memoized filtered
//!   view, the filter engine, the visibility predicate and the view controller that
//!   turns user actions into cursor moves and render frames.
//!
//! - **[`workflows`]: The Public API.** One call from raw input and configuration
//!   to a controller ready to be driven by a UI loop.

pub mod core;
pub mod engine;
pub mod workflows;
