use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::analysis::tier;
use crate::models::{QuotaCategory, QuotaSummary};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HighUsageAlert {
    pub category: QuotaCategory,
    pub resource_type: String,
    pub total_usage: u64,
    pub total_limit: u64,
    pub usage_percentage: Decimal,
}

/// Summaries at or above the critical threshold, category by category.
/// Within a category the aggregate's percentage ordering is kept.
pub fn high_usage_alerts(
    summaries_by_category: &BTreeMap<QuotaCategory, Vec<QuotaSummary>>,
) -> Vec<HighUsageAlert> {
    summaries_by_category
        .iter()
        .flat_map(|(category, summaries)| {
            summaries
                .iter()
                .filter(|s| tier::is_high_usage(s.usage_percentage))
                .map(move |s| HighUsageAlert {
                    category: *category,
                    resource_type: s.resource_type.clone(),
                    total_usage: s.total_usage,
                    total_limit: s.total_limit,
                    usage_percentage: s.usage_percentage,
                })
        })
        .collect()
}

pub fn log_alerts(alerts: &[HighUsageAlert]) {
    if alerts.is_empty() {
        tracing::info!("No quotas at or above {}% usage", tier::HIGH_USAGE_THRESHOLD);
        return;
    }

    for alert in alerts {
        tracing::warn!(
            category = %alert.category,
            resource_type = %alert.resource_type,
            usage = alert.total_usage,
            limit = alert.total_limit,
            usage_pct = %alert.usage_percentage,
            "High quota usage"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate_by_category;
    use crate::models::QuotaRecord;

    fn record(category: QuotaCategory, resource_type: &str, usage: u64, limit: u64) -> QuotaRecord {
        QuotaRecord {
            subscription_name: "A".into(),
            subscription_id: "id-a".into(),
            location: "westeurope".into(),
            category,
            resource_type: resource_type.into(),
            current_usage: usage,
            limit,
        }
    }

    #[test]
    fn test_alerts_use_critical_threshold() {
        let by_category = aggregate_by_category(&[
            record(QuotaCategory::Compute, "Total Regional vCPUs", 80, 100),
            record(QuotaCategory::Compute, "Standard Dv3 Family vCPUs", 7999, 10000),
            record(QuotaCategory::Storage, "Storage Accounts", 249, 250),
            record(QuotaCategory::WebApp, "App Service Plans", 12, 100),
        ]);

        let alerts = high_usage_alerts(&by_category);
        let names: Vec<&str> = alerts.iter().map(|a| a.resource_type.as_str()).collect();
        assert_eq!(names, vec!["Total Regional vCPUs", "Storage Accounts"]);
        assert_eq!(alerts[1].category, QuotaCategory::Storage);
    }

    #[test]
    fn test_no_alerts_for_empty() {
        assert!(high_usage_alerts(&aggregate_by_category(&[])).is_empty());
    }
}
