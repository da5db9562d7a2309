//! Scalar dashboard metrics over a filtered order set.

use serde::Serialize;
use shared::labels::placeholder_label;
use shared::ratio::{average, percentage};
use std::collections::HashMap;

use crate::models::{OrderRecord, OrderStatus, RecentOrder};

/// Reported when no order carries a city.
pub const UNKNOWN_CITY: &str = "Inconnue";

/// Reported when no order carries a service type.
pub const UNKNOWN_SERVICE: &str = "Non spécifié";

/// Number of entries in the recent orders list.
pub const RECENT_ORDERS_LIMIT: usize = 3;

/// Label prefix for clients without an embedded profile.
pub const CLIENT_PLACEHOLDER_ROLE: &str = "Client";

/// Scalar metrics of a filtered order set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OrderMetrics {
    pub total_revenue: f64,
    pub total_orders: u64,
    pub active_orders: u64,
    pub delivered_orders: u64,
    pub delivery_rate: u32,
    pub average_order_value: f64,
    pub conversion_rate: u32,
    pub most_active_city: String,
    pub most_popular_service: String,
    pub orders_by_status: HashMap<String, u64>,
    pub orders_by_service: HashMap<String, u64>,
}

/// Computes the dashboard metrics of `orders`.
///
/// - delivered orders are those with status `delivered` and a final price
/// - revenue sums their final prices
/// - rates are rounded percentages, 0 when there are no orders
/// - city and service are the most frequent values, ties going to the first seen
pub fn compute_metrics(orders: &[&OrderRecord]) -> OrderMetrics {
    let total_orders = orders.len() as u64;

    let mut total_revenue = 0.0;
    let mut delivered_orders = 0u64;
    let mut active_orders = 0u64;
    let mut converted_orders = 0u64;
    let mut orders_by_status: HashMap<String, u64> = HashMap::new();
    let mut orders_by_service: HashMap<String, u64> = HashMap::new();

    for order in orders {
        if let Some(revenue) = order.delivered_revenue() {
            delivered_orders += 1;
            total_revenue += revenue;
        }
        if !order.status.is_terminal() {
            active_orders += 1;
        }
        if !matches!(order.status, OrderStatus::Pending | OrderStatus::Failed) {
            converted_orders += 1;
        }

        *orders_by_status
            .entry(order.status.as_str().to_string())
            .or_insert(0) += 1;
        if let Some(service) = order.service() {
            *orders_by_service.entry(service.to_string()).or_insert(0) += 1;
        }
    }

    let most_active_city = mode(orders.iter().filter_map(|o| o.city()))
        .unwrap_or(UNKNOWN_CITY)
        .to_string();
    let most_popular_service = mode(orders.iter().filter_map(|o| o.service()))
        .unwrap_or(UNKNOWN_SERVICE)
        .to_string();

    OrderMetrics {
        total_revenue,
        total_orders,
        active_orders,
        delivered_orders,
        delivery_rate: percentage(delivered_orders, total_orders),
        average_order_value: average(total_revenue, delivered_orders).round(),
        conversion_rate: percentage(converted_orders, total_orders),
        most_active_city,
        most_popular_service,
        orders_by_status,
        orders_by_service,
    }
}

/// Most frequent value; ties go to the value seen first.
pub fn mode<'a, I>(values: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<(&'a str, u64)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for value in values {
        match index.get(value) {
            Some(&at) => counts[at].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    let mut best: Option<(&'a str, u64)> = None;
    for (value, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value)
}

/// The most recent orders, newest first. Equal timestamps keep input order.
pub fn recent_orders(orders: &[&OrderRecord], limit: usize) -> Vec<RecentOrder> {
    let mut sorted: Vec<&OrderRecord> = orders.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    sorted
        .into_iter()
        .take(limit)
        .map(|order| RecentOrder {
            id: order.id.clone(),
            status: order.status,
            created_at: order.created_at,
            price: order.display_price(),
            client_name: client_display_name(order),
            city: order.city().map(str::to_string),
        })
        .collect()
}

/// Client name from the embedded profile, else a truncated-id label.
pub fn client_display_name(order: &OrderRecord) -> String {
    order
        .client_name()
        .map(str::to_string)
        .unwrap_or_else(|| placeholder_label(CLIENT_PLACEHOLDER_ROLE, &order.created_by.id))
}
