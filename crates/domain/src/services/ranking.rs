//! Client and courier leaderboards.
//!
//! Groups are built from delivered orders in first-occurrence order and
//! sorted with a stable sort, so equal keys keep that order.

use shared::ratio::{average, percentage};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{ClientRanking, CourierIdentity, CourierRanking, OrderRecord};
use crate::services::metrics::client_display_name;

/// Maximum number of entries in a leaderboard.
pub const TOP_N: usize = 3;

/// Client leaderboards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientLeaderboards {
    pub by_orders: Vec<ClientRanking>,
    pub by_revenue: Vec<ClientRanking>,
}

/// Courier leaderboards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourierLeaderboards {
    pub by_deliveries: Vec<CourierRanking>,
    pub by_revenue: Vec<CourierRanking>,
}

#[derive(Debug)]
struct Group<'a> {
    key: &'a str,
    first: &'a OrderRecord,
    count: u64,
    revenue: f64,
}

/// Groups priced delivered orders by `key`, in order of first occurrence.
fn group_delivered<'a, F>(orders: &[&'a OrderRecord], key: F) -> Vec<Group<'a>>
where
    F: Fn(&'a OrderRecord) -> Option<&'a str>,
{
    let mut groups: Vec<Group<'a>> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for &order in orders {
        let Some(revenue) = order.delivered_revenue() else {
            continue;
        };
        let Some(group_key) = key(order) else {
            continue;
        };

        match index.get(group_key) {
            Some(&at) => {
                groups[at].count += 1;
                groups[at].revenue += revenue;
            }
            None => {
                index.insert(group_key, groups.len());
                groups.push(Group {
                    key: group_key,
                    first: order,
                    count: 1,
                    revenue,
                });
            }
        }
    }

    groups
}

/// First `n` items sorted descending by `key`. Ties keep their input order.
pub fn top_n<T, F>(items: &[T], n: usize, key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    let mut sorted: Vec<T> = items.to_vec();
    sorted.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    sorted.truncate(n);
    sorted
}

/// Ranks clients by delivered order count and by revenue.
pub fn rank_clients(orders: &[&OrderRecord]) -> ClientLeaderboards {
    let clients: Vec<ClientRanking> = group_delivered(orders, |o| Some(o.created_by.id.as_str()))
        .into_iter()
        .map(|group| ClientRanking {
            client_id: group.key.to_string(),
            display_name: client_display_name(group.first),
            order_count: group.count,
            revenue: group.revenue,
            average_order_value: average(group.revenue, group.count),
        })
        .collect();

    ClientLeaderboards {
        by_orders: top_n(&clients, TOP_N, |c| c.order_count as f64),
        by_revenue: top_n(&clients, TOP_N, |c| c.revenue),
    }
}

/// Ranks couriers by deliveries and by revenue.
///
/// Success rate is computed against every order assigned to the courier in
/// `orders`. Couriers missing from `identities` get a placeholder identity.
pub fn rank_couriers(
    orders: &[&OrderRecord],
    identities: &HashMap<String, CourierIdentity>,
) -> CourierLeaderboards {
    let mut assigned: HashMap<&str, u64> = HashMap::new();
    for courier_id in orders.iter().filter_map(|o| o.assigned_to.as_deref()) {
        *assigned.entry(courier_id).or_insert(0) += 1;
    }

    let couriers: Vec<CourierRanking> = group_delivered(orders, |o| o.assigned_to.as_deref())
        .into_iter()
        .map(|group| {
            let courier = identities
                .get(group.key)
                .cloned()
                .unwrap_or_else(|| CourierIdentity::placeholder(group.key));
            let assigned_total = assigned.get(group.key).copied().unwrap_or(0);

            CourierRanking {
                courier,
                delivery_count: group.count,
                revenue: group.revenue,
                average_order_value: average(group.revenue, group.count),
                success_rate: percentage(group.count, assigned_total),
            }
        })
        .collect();

    CourierLeaderboards {
        by_deliveries: top_n(&couriers, TOP_N, |c| c.delivery_count as f64),
        by_revenue: top_n(&couriers, TOP_N, |c| c.revenue),
    }
}

/// Distinct courier ids of delivered orders, in first-occurrence order.
pub fn ranked_courier_ids<'a>(orders: &[&'a OrderRecord]) -> Vec<&'a str> {
    group_delivered(orders, |o| o.assigned_to.as_deref())
        .into_iter()
        .map(|group| group.key)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CourierProfile, OrderStatus};
    use chrono::{TimeZone, Utc};

    fn delivered(id: &str, client: &str, courier: &str, price: f64) -> OrderRecord {
        let created = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        OrderRecord::new(id, OrderStatus::Delivered, created, client)
            .with_courier(courier)
            .with_final_price(price)
    }

    fn assigned(id: &str, courier: &str, status: OrderStatus) -> OrderRecord {
        let created = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        OrderRecord::new(id, status, created, "client-x").with_courier(courier)
    }

    #[test]
    fn test_top_n_is_stable_and_bounded() {
        let items = vec![("a", 1.0), ("b", 3.0), ("c", 3.0), ("d", 2.0), ("e", 3.0)];
        let top = top_n(&items, 3, |item| item.1);
        assert_eq!(top, vec![("b", 3.0), ("c", 3.0), ("e", 3.0)]);

        let top = top_n(&items[..2], 3, |item| item.1);
        assert_eq!(top.len(), 2);
    }

    #[test]
    fn test_rank_clients_by_orders_and_revenue() {
        let orders = vec![
            delivered("o1", "c1", "k1", 1000.0),
            delivered("o2", "c2", "k1", 5000.0),
            delivered("o3", "c1", "k2", 1000.0),
            delivered("o4", "c3", "k2", 2000.0),
            delivered("o5", "c4", "k2", 500.0),
        ];
        let refs: Vec<&OrderRecord> = orders.iter().collect();
        let boards = rank_clients(&refs);

        let by_orders: Vec<&str> = boards.by_orders.iter().map(|c| c.client_id.as_str()).collect();
        assert_eq!(by_orders, vec!["c1", "c2", "c3"]);
        assert_eq!(boards.by_orders[0].order_count, 2);
        assert_eq!(boards.by_orders[0].average_order_value, 1000.0);

        let by_revenue: Vec<&str> = boards.by_revenue.iter().map(|c| c.client_id.as_str()).collect();
        assert_eq!(by_revenue, vec!["c2", "c1", "c3"]);
    }

    #[test]
    fn test_rank_clients_ties_keep_first_occurrence() {
        let orders = vec![
            delivered("o1", "late-alphabet", "k1", 1000.0),
            delivered("o2", "alpha", "k1", 1000.0),
        ];
        let refs: Vec<&OrderRecord> = orders.iter().collect();
        let boards = rank_clients(&refs);
        assert_eq!(boards.by_orders[0].client_id, "late-alphabet");
        assert_eq!(boards.by_revenue[0].client_id, "late-alphabet");
    }

    #[test]
    fn test_rank_clients_ignores_undelivered() {
        let orders = vec![
            assigned("o1", "k1", OrderStatus::Pending),
            assigned("o2", "k1", OrderStatus::Failed),
        ];
        let refs: Vec<&OrderRecord> = orders.iter().collect();
        assert!(rank_clients(&refs).by_orders.is_empty());
    }

    #[test]
    fn test_rankings_skip_unpriced_deliveries() {
        let created = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let orders = vec![
            delivered("o1", "c1", "k1", 1000.0),
            OrderRecord::new("o2", OrderStatus::Delivered, created, "c1").with_courier("k1"),
        ];
        let refs: Vec<&OrderRecord> = orders.iter().collect();

        let clients = rank_clients(&refs);
        assert_eq!(clients.by_orders[0].order_count, 1);
        assert_eq!(clients.by_orders[0].average_order_value, 1000.0);

        let couriers = rank_couriers(&refs, &HashMap::new());
        assert_eq!(couriers.by_deliveries[0].delivery_count, 1);
        assert_eq!(couriers.by_deliveries[0].success_rate, 50);
    }

    #[test]
    fn test_rank_couriers_success_rate_and_placeholder() {
        let orders = vec![
            delivered("o1", "c1", "k1", 1000.0),
            assigned("o2", "k1", OrderStatus::Failed),
            delivered("o3", "c1", "k2", 3000.0),
            assigned("o4", "k1", OrderStatus::InDelivery),
        ];
        let refs: Vec<&OrderRecord> = orders.iter().collect();

        let mut identities = HashMap::new();
        identities.insert(
            "k2".to_string(),
            CourierIdentity::Resolved(CourierProfile {
                id: "k2".to_string(),
                display_name: "Moussa Diallo".to_string(),
                phone: None,
                vehicle: None,
            }),
        );

        let boards = rank_couriers(&refs, &identities);

        assert_eq!(boards.by_deliveries.len(), 2);
        let k1 = &boards.by_deliveries[0];
        assert_eq!(k1.courier.id(), "k1");
        assert!(!k1.courier.is_resolved());
        assert_eq!(k1.success_rate, 33);

        let k2 = &boards.by_deliveries[1];
        assert_eq!(k2.courier.display_name(), "Moussa Diallo");
        assert_eq!(k2.success_rate, 100);

        assert_eq!(boards.by_revenue[0].courier.id(), "k2");
    }

    #[test]
    fn test_rankings_never_exceed_three() {
        let orders: Vec<OrderRecord> = (0..10)
            .map(|i| delivered(&format!("o{}", i), &format!("c{}", i), &format!("k{}", i), 100.0 * i as f64))
            .collect();
        let refs: Vec<&OrderRecord> = orders.iter().collect();

        let clients = rank_clients(&refs);
        let couriers = rank_couriers(&refs, &HashMap::new());
        assert_eq!(clients.by_orders.len(), TOP_N);
        assert_eq!(clients.by_revenue.len(), TOP_N);
        assert_eq!(couriers.by_deliveries.len(), TOP_N);
        assert_eq!(couriers.by_revenue.len(), TOP_N);

        let revenues: Vec<f64> = clients.by_revenue.iter().map(|c| c.revenue).collect();
        assert_eq!(revenues, vec![900.0, 800.0, 700.0]);
    }

    #[test]
    fn test_ranked_courier_ids_are_distinct() {
        let orders = vec![
            delivered("o1", "c1", "k2", 100.0),
            delivered("o2", "c1", "k1", 100.0),
            delivered("o3", "c1", "k2", 100.0),
            assigned("o4", "k3", OrderStatus::Pending),
        ];
        let refs: Vec<&OrderRecord> = orders.iter().collect();
        assert_eq!(ranked_courier_ids(&refs), vec!["k2", "k1"]);
    }
}
