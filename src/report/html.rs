//! Self-contained HTML report: inline CSS and JS, no external fetches.
//!
//! This is the template layer. It only emits markup for the views built in
//! `view.rs` and escapes every piece of text it writes.
use std::collections::BTreeMap;

use crate::models::{QuotaCategory, QuotaSummary, ReportMetadata};
use crate::report::assets;
use crate::report::view::{CardView, CategoryView, DetailRowView, ReportView, SummaryRowView};

const SEARCH_INPUT: &str = concat!(
    "        <input type=\"search\" id=\"quota-search\" ",
    "placeholder=\"Filter by resource type, usage or subscription count...\" ",
    "oninput=\"filterRows(this.value)\">\n",
);

const QUOTA_TABLE_HEAD: &str = concat!(
    "            <thead><tr><th></th><th>Resource Type</th><th>Usage</th>",
    "<th>Utilization</th><th>Percent</th><th>Subscriptions</th></tr></thead>\n",
);

const DETAIL_TABLE_HEAD: &str = concat!(
    "                        <thead><tr><th>Subscription</th><th>Subscription ID</th>",
    "<th>Usage</th><th>Limit</th><th>Percent</th></tr></thead>\n",
);

const EMPTY_ROW: &str = concat!(
    "                <tr class=\"empty-row\"><td colspan=\"6\">",
    "No quota data collected for this category.</td></tr>\n",
);

pub fn render(
    summaries_by_category: &BTreeMap<QuotaCategory, Vec<QuotaSummary>>,
    metadata: &ReportMetadata,
) -> String {
    render_view(&ReportView::build(summaries_by_category, metadata))
}

pub fn render_view(view: &ReportView) -> String {
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"utf-8\">\n");
    html.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "    <title>Azure Quota Report - {}</title>\n",
        html_escape(&view.tenant_name)
    ));
    html.push_str("    <style>");
    html.push_str(assets::STYLE);
    html.push_str("    </style>\n</head>\n<body>\n");

    render_header(&mut html, view);

    html.push_str("<main>\n");
    html.push_str("    <section class=\"overview\">\n");
    for card in &view.cards {
        render_card(&mut html, card);
    }
    html.push_str("    </section>\n");

    html.push_str("    <div class=\"search-box\">\n");
    html.push_str(SEARCH_INPUT);
    html.push_str("    </div>\n");

    for category in &view.categories {
        render_category(&mut html, category);
    }
    html.push_str("</main>\n");

    html.push_str(&format!(
        "<footer>Generated {} for tenant {} ({}).</footer>\n",
        html_escape(&view.generated_at),
        html_escape(&view.tenant_name),
        html_escape(&view.tenant_id)
    ));

    html.push_str("<script>");
    html.push_str(assets::SCRIPT);
    html.push_str("</script>\n</body>\n</html>\n");

    html
}

fn render_header(html: &mut String, view: &ReportView) {
    html.push_str("<header class=\"report-header\">\n");
    html.push_str("    <h1>Azure Quota Usage Report</h1>\n");
    html.push_str("    <div class=\"meta\">\n");
    let fields = [
        ("Tenant", html_escape(&view.tenant_name)),
        ("Tenant ID", html_escape(&view.tenant_id)),
        ("Region", html_escape(&view.location)),
        ("Generated", html_escape(&view.generated_at)),
        ("Subscriptions scanned", view.subscriptions_scanned.to_string()),
    ];
    for (label, value) in fields {
        html.push_str(&format!("        <span><strong>{label}:</strong> {value}</span>\n"));
    }
    html.push_str("    </div>\n</header>\n");
}

fn render_card(html: &mut String, card: &CardView) {
    html.push_str(&format!(
        concat!(
            "        <div class=\"{}\"><div class=\"value\">{}</div>",
            "<div class=\"label\">{}</div></div>\n",
        ),
        card.class,
        card.value,
        html_escape(&card.label)
    ));
}

fn render_category(html: &mut String, category: &CategoryView) {
    html.push_str(&format!(
        "    <section class=\"category\" id=\"category-{}\">\n",
        category.slug
    ));
    html.push_str(&format!(
        concat!(
            "        <h2>{} <span class=\"count\">",
            "(<span class=\"visible-count\">{}</span>)</span></h2>\n",
        ),
        html_escape(category.label),
        category.rows.len()
    ));
    html.push_str("        <table class=\"quota-table\">\n");
    html.push_str(QUOTA_TABLE_HEAD);
    html.push_str("            <tbody>\n");

    if category.rows.is_empty() {
        html.push_str(EMPTY_ROW);
    }

    for row in &category.rows {
        render_summary_row(html, row);
    }

    html.push_str("            </tbody>\n");
    html.push_str("        </table>\n");
    html.push_str("    </section>\n");
}

fn render_summary_row(html: &mut String, row: &SummaryRowView) {
    let tier_class = &row.tier_class;
    let cells = format!(
        concat!(
            "<td class=\"resource\">{}</td><td class=\"usage\">{} / {}</td><td>{}</td>",
            "<td class=\"pct {}\">{}</td><td class=\"subs\">{}</td>",
        ),
        html_escape(&row.resource_type),
        row.total_usage,
        row.total_limit,
        progress_bar(row),
        tier_class,
        row.pct_text,
        row.subscription_count
    );

    let Some(id) = &row.id else {
        html.push_str(&format!(
            concat!(
                "                <tr class=\"summary-row {}\"><td class=\"toggle\">",
                "<span class=\"no-data\" title=\"No subscription usage\">&#8212;</span></td>",
                "{}</tr>\n",
            ),
            tier_class, cells
        ));
        return;
    };

    html.push_str(&format!(
        concat!(
            "                <tr class=\"summary-row expandable {tier}\" data-detail=\"{id}\" ",
            "onclick=\"toggleDetail('{id}')\"><td class=\"toggle\">",
            "<span class=\"caret\" id=\"caret-{id}\">&#9654;</span></td>{cells}</tr>\n",
        ),
        tier = tier_class,
        id = id,
        cells = cells
    ));
    html.push_str(&format!(
        concat!(
            "                <tr class=\"detail-row\" id=\"{}\" data-open=\"false\" ",
            "style=\"display: none\"><td colspan=\"6\">\n",
        ),
        id
    ));
    html.push_str("                    <table class=\"detail-table\">\n");
    html.push_str(DETAIL_TABLE_HEAD);
    html.push_str("                        <tbody>\n");
    for detail in &row.details {
        render_detail_row(html, detail);
    }
    html.push_str("                        </tbody>\n");
    html.push_str("                    </table>\n");
    html.push_str("                </td></tr>\n");
}

fn render_detail_row(html: &mut String, detail: &DetailRowView) {
    html.push_str(&format!(
        concat!(
            "                            <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>",
            "<td class=\"pct {}\">{}</td></tr>\n",
        ),
        html_escape(&detail.subscription_name),
        html_escape(&detail.subscription_id),
        detail.current_usage,
        detail.limit,
        detail.tier_class,
        detail.pct_text
    ));
}

fn progress_bar(row: &SummaryRowView) -> String {
    format!(
        "<div class=\"bar\"><div class=\"bar-fill {}\" style=\"width: {:.2}%\"></div></div>",
        row.tier_class, row.bar_width
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
