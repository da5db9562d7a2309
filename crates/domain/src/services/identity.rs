//! Courier identity lookup.
//!
//! Lookups are best-effort: a failed lookup yields a placeholder identity
//! and never aborts the computation that asked for it.

use std::collections::HashMap;

use crate::models::{CourierIdentity, CourierProfile};

/// Identity lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("Courier not found: {0}")]
    NotFound(String),

    #[error("Identity service unavailable: {0}")]
    Unavailable(String),
}

/// Resolves courier ids to display profiles.
#[async_trait::async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Look up the profile of one courier.
    async fn resolve_courier(&self, courier_id: &str) -> Result<CourierProfile, IdentityError>;
}

/// In-memory directory of known courier profiles.
///
/// Used when the caller already holds the profiles, and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityResolver {
    profiles: HashMap<String, CourierProfile>,
    /// Whether to simulate an unavailable identity service.
    pub simulate_failure: bool,
}

impl StaticIdentityResolver {
    /// Create a directory from known profiles.
    pub fn new(profiles: impl IntoIterator<Item = CourierProfile>) -> Self {
        Self {
            profiles: profiles
                .into_iter()
                .map(|profile| (profile.id.clone(), profile))
                .collect(),
            simulate_failure: false,
        }
    }

    /// Create a resolver whose every lookup fails.
    pub fn failing() -> Self {
        Self {
            profiles: HashMap::new(),
            simulate_failure: true,
        }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[async_trait::async_trait]
impl IdentityResolver for StaticIdentityResolver {
    async fn resolve_courier(&self, courier_id: &str) -> Result<CourierProfile, IdentityError> {
        if self.simulate_failure {
            return Err(IdentityError::Unavailable("Simulated failure".to_string()));
        }

        self.profiles
            .get(courier_id)
            .cloned()
            .ok_or_else(|| IdentityError::NotFound(courier_id.to_string()))
    }
}

/// Resolves each distinct id once. Failed lookups become placeholders.
pub async fn resolve_couriers<'a, R, I>(resolver: &R, courier_ids: I) -> HashMap<String, CourierIdentity>
where
    R: IdentityResolver + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    let mut identities = HashMap::new();

    for courier_id in courier_ids {
        if identities.contains_key(courier_id) {
            continue;
        }

        let identity = match resolver.resolve_courier(courier_id).await {
            Ok(profile) => CourierIdentity::Resolved(profile),
            Err(e) => {
                tracing::warn!(
                    courier_id = %courier_id,
                    error = %e,
                    "Courier lookup failed, using placeholder identity"
                );
                CourierIdentity::placeholder(courier_id)
            }
        };
        identities.insert(courier_id.to_string(), identity);
    }

    identities
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::name::en::Name;
    use fake::Fake;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn profile(id: &str) -> CourierProfile {
        CourierProfile {
            id: id.to_string(),
            display_name: Name().fake(),
            phone: None,
            vehicle: None,
        }
    }

    /// Counts lookups to check that each id is resolved once.
    struct CountingResolver {
        inner: StaticIdentityResolver,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl IdentityResolver for CountingResolver {
        async fn resolve_courier(&self, courier_id: &str) -> Result<CourierProfile, IdentityError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.resolve_courier(courier_id).await
        }
    }

    #[tokio::test]
    async fn test_static_resolver_hit_and_miss() {
        let resolver = StaticIdentityResolver::new(vec![profile("k1")]);
        assert_eq!(resolver.len(), 1);

        let hit = resolver.resolve_courier("k1").await.unwrap();
        assert_eq!(hit.id, "k1");

        let miss = resolver.resolve_courier("k2").await;
        assert_eq!(miss, Err(IdentityError::NotFound("k2".to_string())));
    }

    #[tokio::test]
    async fn test_failing_resolver() {
        let resolver = StaticIdentityResolver::failing();
        let result = resolver.resolve_courier("k1").await;
        assert!(matches!(result, Err(IdentityError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_resolve_couriers_degrades_to_placeholders() {
        let resolver = StaticIdentityResolver::new(vec![profile("k1")]);
        let identities = resolve_couriers(&resolver, ["k1", "k2"]).await;

        assert!(identities["k1"].is_resolved());
        assert!(!identities["k2"].is_resolved());
        assert_eq!(identities["k2"].display_name(), "Livreur k2");
    }

    #[tokio::test]
    async fn test_resolve_couriers_looks_up_each_id_once() {
        let resolver = CountingResolver {
            inner: StaticIdentityResolver::new(vec![profile("k1")]),
            calls: AtomicUsize::new(0),
        };
        let identities = resolve_couriers(&resolver, ["k1", "k2", "k1", "k2", "k1"]).await;

        assert_eq!(identities.len(), 2);
        assert_eq!(resolver.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_resolve_couriers_with_dyn_resolver() {
        let resolver: Box<dyn IdentityResolver> = Box::new(StaticIdentityResolver::failing());
        let identities = resolve_couriers(resolver.as_ref(), ["k1"]).await;
        assert_eq!(identities["k1"], CourierIdentity::placeholder("k1"));
    }
}
