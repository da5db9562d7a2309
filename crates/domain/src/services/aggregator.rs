//! Dashboard statistics aggregation.
//!
//! Composes the period filter, metric calculator, ranking engine and trend
//! bucketer. Results are recomputed from scratch on every call.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::models::{CourierIdentity, DashboardStats, OrderRecord, PeriodType};
use crate::services::identity::{resolve_couriers, IdentityResolver};
use crate::services::metrics::{compute_metrics, recent_orders, RECENT_ORDERS_LIMIT};
use crate::services::period_filter::{filter_by_window, period_window};
use crate::services::ranking::{rank_clients, rank_couriers, ranked_courier_ids};
use crate::services::trend::revenue_trend;

/// Computes dashboard statistics with already-known courier identities.
///
/// Couriers absent from `identities` are shown with a placeholder identity.
pub fn compute_dashboard_stats(
    orders: &[OrderRecord],
    period: PeriodType,
    reference: DateTime<Utc>,
    identities: &HashMap<String, CourierIdentity>,
) -> DashboardStats {
    let window = period_window(period, reference);
    let filtered = filter_by_window(orders, &window);
    aggregate(&filtered, period, reference, identities)
}

/// Computes dashboard statistics, resolving courier identities on the way.
///
/// Each distinct ranked courier is looked up once; failures degrade to
/// placeholders.
pub async fn build_dashboard_stats<R>(
    orders: &[OrderRecord],
    period: PeriodType,
    reference: DateTime<Utc>,
    resolver: &R,
) -> DashboardStats
where
    R: IdentityResolver + ?Sized,
{
    let window = period_window(period, reference);
    let filtered = filter_by_window(orders, &window);

    let courier_ids = ranked_courier_ids(&filtered);
    let identities = resolve_couriers(resolver, courier_ids).await;

    aggregate(&filtered, period, reference, &identities)
}

fn aggregate(
    filtered: &[&OrderRecord],
    period: PeriodType,
    reference: DateTime<Utc>,
    identities: &HashMap<String, CourierIdentity>,
) -> DashboardStats {
    let metrics = compute_metrics(filtered);
    let clients = rank_clients(filtered);
    let couriers = rank_couriers(filtered, identities);
    let revenue_trend = revenue_trend(filtered, period, reference);

    tracing::debug!(
        period = %period,
        total_orders = metrics.total_orders,
        delivered_orders = metrics.delivered_orders,
        trend_buckets = revenue_trend.len(),
        "Aggregated dashboard statistics"
    );

    DashboardStats {
        period,
        window: period_window(period, reference),
        reference_date: reference,
        total_revenue: metrics.total_revenue,
        total_orders: metrics.total_orders,
        active_orders: metrics.active_orders,
        delivered_orders: metrics.delivered_orders,
        delivery_rate: metrics.delivery_rate,
        average_order_value: metrics.average_order_value,
        most_active_city: metrics.most_active_city,
        most_popular_service: metrics.most_popular_service,
        conversion_rate: metrics.conversion_rate,
        revenue_trend,
        orders_by_status: metrics.orders_by_status,
        orders_by_service: metrics.orders_by_service,
        top_clients_by_orders: clients.by_orders,
        top_clients_by_revenue: clients.by_revenue,
        top_couriers_by_deliveries: couriers.by_deliveries,
        top_couriers_by_revenue: couriers.by_revenue,
        recent_orders: recent_orders(filtered, RECENT_ORDERS_LIMIT),
    }
}
