//! Groups per-subscription quota records into one summary per resource type.
use std::collections::{BTreeMap, HashMap};

use crate::models::{usage_percentage, QuotaCategory, QuotaRecord, QuotaSummary, SubscriptionDetail};

/// Aggregate records by exact `resource_type`.
///
/// Summaries come back ordered by usage percentage, highest first; equal
/// percentages keep the order in which their resource type was first seen.
pub fn aggregate(records: &[QuotaRecord]) -> Vec<QuotaSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<Vec<&QuotaRecord>> = Vec::new();

    for record in records {
        match index.get(record.resource_type.as_str()) {
            Some(&i) => groups[i].push(record),
            None => {
                index.insert(record.resource_type.as_str(), groups.len());
                groups.push(vec![record]);
            }
        }
    }

    let mut summaries: Vec<QuotaSummary> = groups.into_iter().map(summarize).collect();
    summaries.sort_by(|a, b| b.usage_percentage.cmp(&a.usage_percentage));
    summaries
}

/// Partition by category, then aggregate each partition.
/// Every category is present in the result, possibly with no summaries.
pub fn aggregate_by_category(
    records: &[QuotaRecord],
) -> BTreeMap<QuotaCategory, Vec<QuotaSummary>> {
    QuotaCategory::ALL
        .into_iter()
        .map(|category| {
            let partition: Vec<QuotaRecord> = records
                .iter()
                .filter(|r| r.category == category)
                .cloned()
                .collect();
            (category, aggregate(&partition))
        })
        .collect()
}

fn summarize(group: Vec<&QuotaRecord>) -> QuotaSummary {
    // groups are never empty: each one is created with its first record
    let first = group[0];

    let total_usage = group.iter().fold(0u64, |acc, r| acc.saturating_add(r.current_usage));
    let total_limit = group.iter().fold(0u64, |acc, r| acc.saturating_add(r.limit));

    let mut subscription_details: Vec<SubscriptionDetail> = group
        .iter()
        .filter(|r| r.current_usage > 0 || r.limit > 0)
        .map(|r| SubscriptionDetail::from(*r))
        .collect();
    subscription_details.sort_by(|a, b| b.current_usage.cmp(&a.current_usage));

    QuotaSummary {
        resource_type: first.resource_type.clone(),
        category: first.category,
        total_usage,
        total_limit,
        usage_percentage: usage_percentage(total_usage, total_limit),
        subscription_count: group.len(),
        subscription_details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn record(sub: &str, resource_type: &str, usage: u64, limit: u64) -> QuotaRecord {
        record_in(QuotaCategory::Compute, sub, resource_type, usage, limit)
    }

    fn record_in(
        category: QuotaCategory,
        sub: &str,
        resource_type: &str,
        usage: u64,
        limit: u64,
    ) -> QuotaRecord {
        QuotaRecord {
            subscription_name: sub.into(),
            subscription_id: format!("id-{sub}"),
            location: "eastus".into(),
            category,
            resource_type: resource_type.into(),
            current_usage: usage,
            limit,
        }
    }

    fn detail_names(summary: &QuotaSummary) -> Vec<&str> {
        summary.subscription_details.iter().map(|d| d.subscription_name.as_str()).collect()
    }

    #[test]
    fn test_two_subscriptions_same_family() {
        let records = vec![
            record("A", "Standard DSv5 Family vCPUs", 40, 100),
            record("B", "Standard DSv5 Family vCPUs", 60, 100),
        ];

        let summaries = aggregate(&records);
        assert_eq!(summaries.len(), 1);

        let s = &summaries[0];
        assert_eq!(s.total_usage, 100);
        assert_eq!(s.total_limit, 200);
        assert_eq!(s.usage_percentage, Decimal::from(50));
        assert_eq!(s.subscription_count, 2);

        assert_eq!(detail_names(s), vec!["B", "A"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_grouping_is_case_sensitive() {
        let records = vec![
            record("A", "Standard FSv2 Family vCPUs", 4, 10),
            record("A", "Standard FSv2 Family VCPUs", 4, 10),
        ];
        assert_eq!(aggregate(&records).len(), 2);
    }

    #[test]
    fn test_all_zero_group_has_no_details() {
        let records = vec![
            record("A", "Standard NCv3 Family vCPUs", 0, 0),
            record("B", "Standard NCv3 Family vCPUs", 0, 0),
        ];

        let summaries = aggregate(&records);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].subscription_count, 2);
        assert!(summaries[0].subscription_details.is_empty());
        assert!(!summaries[0].is_expandable());
        assert_eq!(summaries[0].usage_percentage, Decimal::ZERO);
    }

    #[test]
    fn test_zero_rows_counted_but_not_detailed() {
        let records = vec![
            record("A", "Availability Sets", 5, 2500),
            record("B", "Availability Sets", 0, 0),
            record("C", "Availability Sets", 0, 2500),
        ];

        let s = &aggregate(&records)[0];
        assert_eq!(s.subscription_count, 3);
        assert_eq!(s.subscription_details.len(), 2);
        let detail_usage: u64 = s.subscription_details.iter().map(|d| d.current_usage).sum();
        assert!(detail_usage <= s.total_usage);
    }

    #[test]
    fn test_limit_zero_means_zero_percent() {
        let s = &aggregate(&[record("A", "Dedicated vCPUs", 7, 0)])[0];
        assert_eq!(s.usage_percentage, Decimal::ZERO);
        assert_eq!(s.subscription_details[0].usage_percentage, Decimal::ZERO);
    }

    #[test]
    fn test_detail_ties_keep_input_order() {
        let records = vec![
            record("A", "Total Regional vCPUs", 10, 100),
            record("B", "Total Regional vCPUs", 20, 100),
            record("C", "Total Regional vCPUs", 10, 100),
            record("D", "Total Regional vCPUs", 10, 50),
        ];

        let s = &aggregate(&records)[0];
        assert_eq!(detail_names(s), vec!["B", "A", "C", "D"]);
    }

    #[test]
    fn test_summaries_sorted_by_percentage_with_stable_ties() {
        let records = vec![
            record("A", "Low Family", 1, 100),
            record("A", "Tie One", 50, 100),
            record("A", "Hot Family", 95, 100),
            record("A", "Tie Two", 5, 10),
        ];

        let order: Vec<String> = aggregate(&records).into_iter().map(|s| s.resource_type).collect();
        assert_eq!(order, vec!["Hot Family", "Tie One", "Tie Two", "Low Family"]);
    }

    #[test]
    fn test_totals_preserved() {
        let records = vec![
            record("A", "Total Regional vCPUs", 12, 100),
            record("B", "Total Regional vCPUs", 30, 100),
            record("A", "Standard DSv5 Family vCPUs", 8, 20),
            record("C", "Virtual Machines", 0, 25000),
            record("C", "Standard DSv5 Family vCPUs", 4, 20),
        ];

        let total_in: u64 = records.iter().map(|r| r.current_usage).sum();
        let total_out: u64 = aggregate(&records).iter().map(|s| s.total_usage).sum();
        assert_eq!(total_in, total_out);
    }

    #[test]
    fn test_idempotent() {
        let records = vec![
            record("A", "Total Regional vCPUs", 12, 100),
            record("B", "Total Regional vCPUs", 30, 100),
            record("A", "Virtual Machines", 3, 25000),
        ];
        assert_eq!(aggregate(&records), aggregate(&records));
    }

    #[test]
    fn test_over_quota_percentage_uncapped() {
        let s = &aggregate(&[record("A", "Standard Dv2 Family vCPUs", 15, 10)])[0];
        assert_eq!(s.usage_percentage, Decimal::from(150));
    }

    #[test]
    fn test_by_category_partitions() {
        let records = vec![
            record_in(QuotaCategory::Compute, "A", "Total Regional vCPUs", 4, 10),
            record_in(QuotaCategory::Storage, "A", "Storage Accounts", 12, 250),
            record_in(QuotaCategory::Storage, "B", "Storage Accounts", 3, 250),
        ];

        let by_category = aggregate_by_category(&records);
        assert_eq!(by_category.len(), 3);
        assert_eq!(by_category[&QuotaCategory::Compute].len(), 1);
        assert_eq!(by_category[&QuotaCategory::Storage][0].total_usage, 15);
        assert!(by_category[&QuotaCategory::WebApp].is_empty());
    }
}
