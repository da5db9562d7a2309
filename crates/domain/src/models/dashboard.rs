//! Dashboard statistics domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::courier::CourierIdentity;
use super::order::OrderStatus;
use super::period::{PeriodType, PeriodWindow};

/// One bucket of the revenue trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrendPoint {
    pub label: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub revenue: f64,
    pub order_count: u64,
}

/// Client leaderboard entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClientRanking {
    pub client_id: String,
    pub display_name: String,
    pub order_count: u64,
    pub revenue: f64,
    pub average_order_value: f64,
}

/// Courier leaderboard entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CourierRanking {
    pub courier: CourierIdentity,
    pub delivery_count: u64,
    pub revenue: f64,
    pub average_order_value: f64,
    /// Delivered share of the orders assigned to the courier, in percent.
    pub success_rate: u32,
}

/// Compact view of a recent order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RecentOrder {
    pub id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub price: Option<f64>,
    pub client_name: String,
    pub city: Option<String>,
}

/// Complete dashboard statistics for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DashboardStats {
    pub period: PeriodType,
    pub window: PeriodWindow,
    pub reference_date: DateTime<Utc>,
    pub total_revenue: f64,
    pub total_orders: u64,
    pub active_orders: u64,
    pub delivered_orders: u64,
    pub delivery_rate: u32,
    pub average_order_value: f64,
    pub most_active_city: String,
    pub most_popular_service: String,
    pub conversion_rate: u32,
    pub revenue_trend: Vec<TrendPoint>,
    pub orders_by_status: HashMap<String, u64>,
    pub orders_by_service: HashMap<String, u64>,
    pub top_clients_by_orders: Vec<ClientRanking>,
    pub top_clients_by_revenue: Vec<ClientRanking>,
    pub top_couriers_by_deliveries: Vec<CourierRanking>,
    pub top_couriers_by_revenue: Vec<CourierRanking>,
    pub recent_orders: Vec<RecentOrder>,
}

impl DashboardStats {
    /// Whether the window held no orders at all.
    pub fn is_empty(&self) -> bool {
        self.total_orders == 0
    }

    /// Orders counted under `status`, 0 when absent.
    pub fn count_for_status(&self, status: OrderStatus) -> u64 {
        self.orders_by_status
            .get(status.as_str())
            .copied()
            .unwrap_or(0)
    }
}
