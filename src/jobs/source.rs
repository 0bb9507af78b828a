use crate::errors::AppResult;
use crate::models::{QuotaCategory, RawUsage, Subscription};

/// Where a report run reads tenant, subscription and usage data from.
pub trait UsageSource {
    async fn list_subscriptions(&self) -> AppResult<Vec<Subscription>>;

    async fn tenant_display_name(&self, tenant_id: &str) -> AppResult<Option<String>>;

    async fn fetch_usages(
        &self,
        subscription: &Subscription,
        location: &str,
        category: QuotaCategory,
    ) -> AppResult<Vec<RawUsage>>;
}
