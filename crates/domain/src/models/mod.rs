//! Domain models for dispatch reporting.

pub mod courier;
pub mod dashboard;
pub mod order;
pub mod period;
pub mod report;

pub use courier::{CourierIdentity, CourierProfile};
pub use dashboard::{ClientRanking, CourierRanking, DashboardStats, RecentOrder, TrendPoint};
pub use order::{Address, ClientProfile, ClientRef, OrderRecord, OrderStatus};
pub use period::{ParsePeriodError, PeriodType, PeriodWindow};
pub use report::{
    CourseDetail, GlobalStats, OperatorCourses, OperatorReport, OperatorSummary,
    ParsedPeriodReport, PaymentSummary, ReportPeriodType, ReportTotals,
};
