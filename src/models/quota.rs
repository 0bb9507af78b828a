use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::QuotaCategory;

/// One quota dimension of one subscription, as reported by a usages endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuotaRecord {
    pub subscription_name: String,
    pub subscription_id: String,
    pub location: String,
    pub category: QuotaCategory,
    pub resource_type: String,
    pub current_usage: u64,
    pub limit: u64,
}

impl QuotaRecord {
    /// Build a record from the signed values the API returns.
    /// Negative usage or limit (Azure uses -1 for some unlimited dimensions) is rejected.
    pub fn from_raw(
        subscription_name: &str,
        subscription_id: &str,
        location: &str,
        category: QuotaCategory,
        resource_type: &str,
        current_usage: i64,
        limit: i64,
    ) -> AppResult<Self> {
        let current_usage = u64::try_from(current_usage).map_err(|_| {
            AppError::InvalidRecord(format!("negative usage {current_usage} for '{resource_type}'"))
        })?;
        let limit = u64::try_from(limit).map_err(|_| {
            AppError::InvalidRecord(format!("negative limit {limit} for '{resource_type}'"))
        })?;

        Ok(Self {
            subscription_name: subscription_name.into(),
            subscription_id: subscription_id.into(),
            location: location.into(),
            category,
            resource_type: resource_type.into(),
            current_usage,
            limit,
        })
    }

    pub fn usage_percentage(&self) -> Decimal {
        usage_percentage(self.current_usage, self.limit)
    }
}

/// Per-subscription row shown under an aggregated quota line.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SubscriptionDetail {
    pub subscription_name: String,
    pub subscription_id: String,
    pub current_usage: u64,
    pub limit: u64,
    pub usage_percentage: Decimal,
}

impl From<&QuotaRecord> for SubscriptionDetail {
    fn from(record: &QuotaRecord) -> Self {
        Self {
            subscription_name: record.subscription_name.clone(),
            subscription_id: record.subscription_id.clone(),
            current_usage: record.current_usage,
            limit: record.limit,
            usage_percentage: record.usage_percentage(),
        }
    }
}

/// Usage of one resource type summed across every scanned subscription.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuotaSummary {
    pub resource_type: String,
    pub category: QuotaCategory,
    pub total_usage: u64,
    pub total_limit: u64,
    pub usage_percentage: Decimal,
    pub subscription_count: usize,
    pub subscription_details: Vec<SubscriptionDetail>,
}

impl QuotaSummary {
    pub fn is_expandable(&self) -> bool {
        !self.subscription_details.is_empty()
    }
}

/// `current / limit * 100` rounded to two places, half away from zero.
/// A zero limit yields zero.
pub fn usage_percentage(current: u64, limit: u64) -> Decimal {
    if limit == 0 {
        return Decimal::ZERO;
    }

    let pct = Decimal::from(current) / Decimal::from(limit) * Decimal::ONE_HUNDRED;
    pct.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
