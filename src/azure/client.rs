use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::azure::models::{ListResponse, SubscriptionItem, TenantItem, UsageItem};
use crate::errors::{AppError, AppResult};
use crate::jobs::UsageSource;
use crate::models::{QuotaCategory, RawUsage, Subscription};

const SUBSCRIPTIONS_API_VERSION: &str = "2022-12-01";
const TENANTS_API_VERSION: &str = "2022-12-01";

/// Safety stop for `nextLink` chains.
const MAX_PAGES: usize = 100;

/// Thin Azure Resource Manager client. Calls are issued one at a time.
pub struct ArmClient {
    http: reqwest::Client,
    endpoint: String,
    token: String,
}

impl ArmClient {
    pub fn new(http: reqwest::Client, endpoint: &str, token: String) -> Self {
        Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
        }
    }

    pub fn usages_url(
        &self,
        subscription_id: &str,
        location: &str,
        category: QuotaCategory,
    ) -> String {
        format!(
            "{}/subscriptions/{}/providers/{}/locations/{}/usages?api-version={}",
            self.endpoint,
            subscription_id,
            category.provider_namespace(),
            location,
            category.api_version()
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        let response = self.http.get(url).bearer_auth(&self.token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<T>().await?)
    }

    /// Collect every page of an ARM list endpoint.
    async fn get_all<T: DeserializeOwned>(&self, url: String) -> AppResult<Vec<T>> {
        let mut items = Vec::new();
        let mut next = Some(url);
        let mut pages = 0;

        while let Some(url) = next {
            let page: ListResponse<T> = self.get_json(&url).await?;
            items.extend(page.value);
            next = page.next_link.filter(|link| !link.is_empty());

            pages += 1;
            if pages >= MAX_PAGES {
                warn!(
                    url = %url,
                    pages,
                    items = items.len(),
                    "Stopping pagination at page limit; later pages are missing from the report"
                );
                break;
            }
        }

        Ok(items)
    }
}

impl UsageSource for ArmClient {
    async fn list_subscriptions(&self) -> AppResult<Vec<Subscription>> {
        let url = format!(
            "{}/subscriptions?api-version={SUBSCRIPTIONS_API_VERSION}",
            self.endpoint
        );
        let items: Vec<SubscriptionItem> = self
            .get_all(url)
            .await
            .map_err(|e| AppError::SubscriptionEnumeration(e.to_string()))?;

        let total = items.len();
        let enabled: Vec<Subscription> = items
            .into_iter()
            .filter(SubscriptionItem::is_enabled)
            .map(Subscription::from)
            .collect();
        debug!(total, enabled = enabled.len(), "Listed subscriptions");
        Ok(enabled)
    }

    async fn tenant_display_name(&self, tenant_id: &str) -> AppResult<Option<String>> {
        let url = format!("{}/tenants?api-version={TENANTS_API_VERSION}", self.endpoint);
        let tenants: Vec<TenantItem> = self.get_all(url).await?;
        Ok(tenants
            .into_iter()
            .find(|t| t.tenant_id.eq_ignore_ascii_case(tenant_id))
            .and_then(|t| t.display_name))
    }

    async fn fetch_usages(
        &self,
        subscription: &Subscription,
        location: &str,
        category: QuotaCategory,
    ) -> AppResult<Vec<RawUsage>> {
        let url = self.usages_url(&subscription.id, location, category);
        let items: Vec<UsageItem> = self
            .get_all(url)
            .await
            .map_err(|e| AppError::fetch(&subscription.name, category, e))?;

        Ok(items.into_iter().filter_map(UsageItem::into_raw).collect())
    }
}
