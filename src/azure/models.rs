//! Response shapes of the Azure Resource Manager endpoints the scan calls.
use serde::Deserialize;

use crate::models::{RawUsage, Subscription};

/// Paged ARM list envelope.
#[derive(Debug, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(rename = "nextLink", default)]
    pub next_link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubscriptionItem {
    #[serde(rename = "subscriptionId")]
    pub subscription_id: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(rename = "tenantId", default)]
    pub tenant_id: Option<String>,
}

impl SubscriptionItem {
    pub fn is_enabled(&self) -> bool {
        match self.state.as_deref() {
            Some(state) => state.eq_ignore_ascii_case("Enabled"),
            None => true,
        }
    }
}

impl From<SubscriptionItem> for Subscription {
    fn from(item: SubscriptionItem) -> Self {
        Self {
            id: item.subscription_id,
            name: item.display_name,
            tenant_id: item.tenant_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TenantItem {
    #[serde(rename = "tenantId")]
    pub tenant_id: String,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UsageName {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(rename = "localizedValue", default)]
    pub localized_value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UsageItem {
    #[serde(rename = "currentValue")]
    pub current_value: i64,
    pub limit: i64,
    pub name: UsageName,
}

impl UsageItem {
    /// Display name of the quota dimension; `None` when the API sent neither form.
    pub fn into_raw(self) -> Option<RawUsage> {
        let name = self
            .name
            .localized_value
            .filter(|n| !n.is_empty())
            .or(self.name.value)?;
        Some(RawUsage {
            name,
            current_value: self.current_value,
            limit: self.limit,
        })
    }
}
