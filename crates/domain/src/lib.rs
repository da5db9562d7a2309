//! Domain layer for dispatch reporting.
//!
//! This crate contains:
//! - Domain models (orders, couriers, dashboard statistics, parsed reports)
//! - Aggregation, ranking and trend services
//! - The text report parser and writer

pub mod models;
pub mod services;
