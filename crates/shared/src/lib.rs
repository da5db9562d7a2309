//! Shared utilities for the dispatch reporting backend.
//!
//! This crate provides the derivation and formatting helpers used by the
//! other crates:
//! - Amount parsing and FCFA formatting
//! - Calendar arithmetic and French calendar vocabulary
//! - Placeholder display labels
//! - Safe ratio computations

pub mod amount;
pub mod calendar;
pub mod labels;
pub mod ratio;
