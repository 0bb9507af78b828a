//! Display-ready rows for the HTML report.
//!
//! Everything the page shows is decided here in a single pass over the
//! summaries: tier classes, clamped bar widths, percentage text and the ids
//! linking an expandable row to its detail row. The template in `html.rs`
//! only turns these views into markup.
use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::analysis::tier;
use crate::models::{QuotaCategory, QuotaSummary, ReportMetadata, SubscriptionDetail, UsageTier};

/// Hands out the ids that link an expandable row to its detail row.
/// A single counter spans the whole document, so ids never repeat.
#[derive(Debug, Default)]
pub struct RowIds {
    next: usize,
}

impl RowIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, category: QuotaCategory) -> String {
        self.next += 1;
        format!("detail-{}-{}", category, self.next)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportView {
    pub tenant_name: String,
    pub tenant_id: String,
    pub location: String,
    pub generated_at: String,
    pub subscriptions_scanned: usize,
    pub cards: Vec<CardView>,
    pub categories: Vec<CategoryView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub class: &'static str,
    pub value: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub slug: String,
    pub label: &'static str,
    pub rows: Vec<SummaryRowView>,
}

/// One resource type. `id` is set only when the row has a detail table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRowView {
    pub id: Option<String>,
    pub tier_class: String,
    pub resource_type: String,
    pub total_usage: u64,
    pub total_limit: u64,
    pub bar_width: Decimal,
    pub pct_text: String,
    pub subscription_count: usize,
    pub details: Vec<DetailRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRowView {
    pub subscription_name: String,
    pub subscription_id: String,
    pub current_usage: u64,
    pub limit: u64,
    pub tier_class: String,
    pub pct_text: String,
}

impl ReportView {
    pub fn build(
        summaries_by_category: &BTreeMap<QuotaCategory, Vec<QuotaSummary>>,
        metadata: &ReportMetadata,
    ) -> Self {
        let mut ids = RowIds::new();
        let mut critical = 0usize;
        let mut high = 0usize;
        let mut cards = vec![CardView {
            class: "card",
            value: metadata.subscriptions_scanned,
            label: "Subscriptions scanned".into(),
        }];
        let mut categories = Vec::with_capacity(summaries_by_category.len());

        for (category, summaries) in summaries_by_category {
            cards.push(CardView {
                class: "card",
                value: summaries.len(),
                label: format!("{} quotas", category.label()),
            });

            let rows = summaries
                .iter()
                .map(|summary| {
                    match tier::classify(summary.usage_percentage) {
                        UsageTier::Critical => critical += 1,
                        UsageTier::High => high += 1,
                        _ => {}
                    }
                    SummaryRowView::build(summary, &mut ids)
                })
                .collect();

            categories.push(CategoryView {
                slug: category.to_string(),
                label: category.label(),
                rows,
            });
        }

        cards.push(CardView {
            class: "card critical",
            value: critical,
            label: "Critical (80% and above)".into(),
        });
        cards.push(CardView {
            class: "card high",
            value: high,
            label: "High (50% to 80%)".into(),
        });

        Self {
            tenant_name: metadata.tenant_name.clone(),
            tenant_id: metadata.tenant_id.clone(),
            location: metadata.location.clone(),
            generated_at: metadata.generated_at.clone(),
            subscriptions_scanned: metadata.subscriptions_scanned,
            cards,
            categories,
        }
    }
}

impl SummaryRowView {
    fn build(summary: &QuotaSummary, ids: &mut RowIds) -> Self {
        let id = summary.is_expandable().then(|| ids.next_id(summary.category));
        let details = if id.is_some() {
            summary.subscription_details.iter().map(DetailRowView::from).collect()
        } else {
            Vec::new()
        };

        Self {
            id,
            tier_class: tier_class(summary.usage_percentage),
            resource_type: summary.resource_type.clone(),
            total_usage: summary.total_usage,
            total_limit: summary.total_limit,
            bar_width: tier::bar_width(summary.usage_percentage),
            pct_text: format_percentage(summary.usage_percentage),
            subscription_count: summary.subscription_count,
            details,
        }
    }
}

impl From<&SubscriptionDetail> for DetailRowView {
    fn from(detail: &SubscriptionDetail) -> Self {
        Self {
            subscription_name: detail.subscription_name.clone(),
            subscription_id: detail.subscription_id.clone(),
            current_usage: detail.current_usage,
            limit: detail.limit,
            tier_class: tier_class(detail.usage_percentage),
            pct_text: format_percentage(detail.usage_percentage),
        }
    }
}

fn tier_class(usage_percentage: Decimal) -> String {
    format!("tier-{}", tier::classify(usage_percentage))
}

fn format_percentage(usage_percentage: Decimal) -> String {
    format!("{usage_percentage:.2}%")
}
