//! Order records as provided by the order store.
//!
//! Records are read-only inputs to every computation in this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Assigned,
    Negotiating,
    PriceValidated,
    InDelivery,
    Delivered,
    Failed,
}

impl OrderStatus {
    /// Wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Assigned => "assigned",
            Self::Negotiating => "negotiating",
            Self::PriceValidated => "price_validated",
            Self::InDelivery => "in_delivery",
            Self::Delivered => "delivered",
            Self::Failed => "failed",
        }
    }

    /// Terminal statuses never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Failed)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Postal address of a pickup or delivery point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl Address {
    /// Address located in `city`.
    pub fn in_city(city: impl Into<String>) -> Self {
        Self {
            street: None,
            city: Some(city.into()),
        }
    }

    /// City name, ignoring blank values.
    pub fn city_name(&self) -> Option<&str> {
        self.city
            .as_deref()
            .map(str::trim)
            .filter(|city| !city.is_empty())
    }
}

/// Display profile of the client who placed an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClientProfile {
    pub display_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Client reference embedded in an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ClientRef {
    pub id: String,
    #[serde(default)]
    pub profile: Option<ClientProfile>,
}

/// A delivery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OrderRecord {
    pub id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub final_price: Option<f64>,
    #[serde(default)]
    pub estimated_price: Option<f64>,
    /// Courier id, once assigned.
    #[serde(default)]
    pub assigned_to: Option<String>,
    pub created_by: ClientRef,
    #[serde(default)]
    pub pickup_address: Address,
    #[serde(default)]
    pub delivery_address: Address,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl OrderRecord {
    /// Create a record with only the required fields set.
    pub fn new(
        id: impl Into<String>,
        status: OrderStatus,
        created_at: DateTime<Utc>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            status,
            created_at,
            final_price: None,
            estimated_price: None,
            assigned_to: None,
            created_by: ClientRef {
                id: client_id.into(),
                profile: None,
            },
            pickup_address: Address::default(),
            delivery_address: Address::default(),
            service_type: None,
            weight: None,
        }
    }

    pub fn with_final_price(mut self, price: f64) -> Self {
        self.final_price = Some(price);
        self
    }

    pub fn with_estimated_price(mut self, price: f64) -> Self {
        self.estimated_price = Some(price);
        self
    }

    pub fn with_courier(mut self, courier_id: impl Into<String>) -> Self {
        self.assigned_to = Some(courier_id.into());
        self
    }

    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.created_by.profile = Some(ClientProfile {
            display_name: name.into(),
            phone: None,
        });
        self
    }

    pub fn with_pickup_city(mut self, city: impl Into<String>) -> Self {
        self.pickup_address = Address::in_city(city);
        self
    }

    pub fn with_delivery_city(mut self, city: impl Into<String>) -> Self {
        self.delivery_address = Address::in_city(city);
        self
    }

    pub fn with_service(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = Some(service_type.into());
        self
    }

    /// Whether the order reached the delivered status.
    pub fn is_delivered(&self) -> bool {
        self.status == OrderStatus::Delivered
    }

    /// Final price of a delivered order; `None` for any other order.
    pub fn delivered_revenue(&self) -> Option<f64> {
        if self.is_delivered() {
            self.final_price
        } else {
            None
        }
    }

    /// Delivery city, falling back to the pickup city.
    pub fn city(&self) -> Option<&str> {
        self.delivery_address
            .city_name()
            .or_else(|| self.pickup_address.city_name())
    }

    /// Service type, ignoring blank values.
    pub fn service(&self) -> Option<&str> {
        self.service_type
            .as_deref()
            .map(str::trim)
            .filter(|service| !service.is_empty())
    }

    /// Price to display: the final price when agreed, else the estimate.
    pub fn display_price(&self) -> Option<f64> {
        self.final_price.or(self.estimated_price)
    }

    /// Client display name from the embedded profile, if any.
    pub fn client_name(&self) -> Option<&str> {
        self.created_by
            .profile
            .as_ref()
            .map(|p| p.display_name.trim())
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_order_status_display() {
        assert_eq!(OrderStatus::PriceValidated.to_string(), "price_validated");
        assert_eq!(OrderStatus::InDelivery.to_string(), "in_delivery");
    }

    #[test]
    fn test_order_status_terminal() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Failed.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::InDelivery.is_terminal());
    }

    #[test]
    fn test_delivered_revenue_requires_delivered_status() {
        let pending = OrderRecord::new("o1", OrderStatus::Pending, created(), "c1")
            .with_final_price(1000.0);
        assert_eq!(pending.delivered_revenue(), None);

        let delivered = OrderRecord::new("o2", OrderStatus::Delivered, created(), "c1")
            .with_final_price(1000.0);
        assert_eq!(delivered.delivered_revenue(), Some(1000.0));

        let unpriced = OrderRecord::new("o3", OrderStatus::Delivered, created(), "c1");
        assert_eq!(unpriced.delivered_revenue(), None);
    }

    #[test]
    fn test_city_falls_back_to_pickup() {
        let order = OrderRecord::new("o1", OrderStatus::Pending, created(), "c1")
            .with_pickup_city("Bouaké");
        assert_eq!(order.city(), Some("Bouaké"));

        let order = order.with_delivery_city("Abidjan");
        assert_eq!(order.city(), Some("Abidjan"));
    }

    #[test]
    fn test_blank_city_is_ignored() {
        let order = OrderRecord::new("o1", OrderStatus::Pending, created(), "c1")
            .with_delivery_city("  ")
            .with_pickup_city("Yamoussoukro");
        assert_eq!(order.city(), Some("Yamoussoukro"));
    }

    #[test]
    fn test_order_deserialization_with_defaults() {
        let json = r#"{
            "id": "o1",
            "status": "price_validated",
            "created_at": "2024-03-15T10:00:00Z",
            "created_by": { "id": "c1" }
        }"#;
        let order: OrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::PriceValidated);
        assert!(order.final_price.is_none());
        assert!(order.city().is_none());
        assert!(order.client_name().is_none());
    }
}
