//! Dashboard statistics endpoint.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use domain::models::{CourierProfile, DashboardStats, OrderRecord, PeriodType};
use domain::services::{build_dashboard_stats, StaticIdentityResolver};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// Request body for dashboard statistics.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct DashboardStatsRequest {
    /// Hard cap; `limits.max_orders_per_request` may lower it.
    #[validate(length(max = 100000, message = "Too many orders in one request"))]
    pub orders: Vec<OrderRecord>,

    /// `day`, `week`, `month`, `year` or `all`.
    pub period: String,

    /// Defaults to the current time.
    #[serde(default)]
    pub reference_date: Option<DateTime<Utc>>,

    /// Known courier profiles; other couriers get placeholder identities.
    #[serde(default)]
    pub couriers: Vec<CourierProfile>,
}

/// POST /api/v1/dashboard/stats
///
/// Computes dashboard statistics over the submitted orders.
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
    Json(request): Json<DashboardStatsRequest>,
) -> Result<Json<DashboardStats>, ApiError> {
    request.validate()?;

    let limit = state.config.limits.max_orders_per_request;
    if request.orders.len() > limit {
        return Err(ApiError::Validation(format!(
            "orders: at most {} orders per request",
            limit
        )));
    }

    let period: PeriodType = request.period.parse()?;
    let reference = request.reference_date.unwrap_or_else(Utc::now);
    let resolver = StaticIdentityResolver::new(request.couriers);

    let stats = build_dashboard_stats(&request.orders, period, reference, &resolver).await;

    info!(
        period = %period,
        orders = request.orders.len(),
        total_orders = stats.total_orders,
        total_revenue = stats.total_revenue,
        "Dashboard statistics computed"
    );

    Ok(Json(stats))
}
