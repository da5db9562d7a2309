//! Domain services for dispatch reporting.
//!
//! Services contain business logic that operates on domain models.

pub mod aggregator;
pub mod identity;
pub mod metrics;
pub mod period_filter;
pub mod ranking;
pub mod report_format;
pub mod report_parser;
pub mod report_writer;
pub mod trend;

pub use aggregator::{build_dashboard_stats, compute_dashboard_stats};

pub use identity::{resolve_couriers, IdentityError, IdentityResolver, StaticIdentityResolver};

pub use period_filter::{filter_by_period, filter_by_window, period_window};

pub use report_parser::{classify_period, parse_report};
pub use report_writer::render_report;
