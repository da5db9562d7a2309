//! Courier identities shown on leaderboards.

use serde::{Deserialize, Serialize};

/// Label prefix for couriers whose profile could not be resolved.
pub const COURIER_PLACEHOLDER_ROLE: &str = "Livreur";

/// Display profile of a courier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CourierProfile {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub vehicle: Option<String>,
}

/// Courier identity as known to a ranking.
///
/// Lookups are best-effort, so consumers must handle the unresolved case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CourierIdentity {
    Resolved(CourierProfile),
    Placeholder { id: String, label: String },
}

impl CourierIdentity {
    /// Placeholder identity labelled with a truncated id.
    pub fn placeholder(id: &str) -> Self {
        Self::Placeholder {
            id: id.to_string(),
            label: shared::labels::placeholder_label(COURIER_PLACEHOLDER_ROLE, id),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Resolved(profile) => &profile.id,
            Self::Placeholder { id, .. } => id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Resolved(profile) => &profile.display_name,
            Self::Placeholder { label, .. } => label,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}
