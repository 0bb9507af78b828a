use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subscription {
    pub id: String,
    pub name: String,
    pub tenant_id: Option<String>,
}

impl Subscription {
    /// Filter entries may name a subscription by id or display name.
    pub fn matches(&self, filter: &str) -> bool {
        self.id.eq_ignore_ascii_case(filter) || self.name == filter
    }
}

/// Raw usage entry as returned by a `.../locations/{location}/usages` call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawUsage {
    pub name: String,
    pub current_value: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub tenant_name: String,
    pub tenant_id: String,
    pub location: String,
    pub generated_at: String,
    pub subscriptions_scanned: usize,
}

pub const UNKNOWN_TENANT: &str = "Unknown";

impl ReportMetadata {
    pub fn new(
        tenant_name: Option<String>,
        tenant_id: &str,
        location: &str,
        generated_at: String,
        subscriptions_scanned: usize,
    ) -> Self {
        Self {
            tenant_name: tenant_name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_TENANT.into()),
            tenant_id: tenant_id.into(),
            location: location.into(),
            generated_at,
            subscriptions_scanned,
        }
    }
}
