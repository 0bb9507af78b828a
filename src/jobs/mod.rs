pub mod source;

pub use source::UsageSource;

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::analysis::aggregate_by_category;
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{QuotaCategory, QuotaRecord, ReportMetadata, Subscription};
use crate::report::{self, HighUsageAlert};

#[derive(Debug)]
pub struct ReportOutcome {
    pub output_path: PathBuf,
    pub subscriptions_scanned: usize,
    pub records: usize,
    pub failed_fetches: usize,
    pub alerts: Vec<HighUsageAlert>,
}

#[derive(Debug, Default)]
struct Collected {
    records: Vec<QuotaRecord>,
    failed_fetches: usize,
}

/// One full scan: subscriptions, usages, aggregate, render, write.
pub async fn run_report<S: UsageSource>(
    source: &S,
    config: &AppConfig,
) -> AppResult<ReportOutcome> {
    let started = Utc::now();
    let location = config.report.location.as_str();

    let subscriptions =
        select_subscriptions(source.list_subscriptions().await?, &config.report.subscriptions)?;
    info!(count = subscriptions.len(), location, "Scanning subscriptions");

    let tenant_name = match source.tenant_display_name(&config.azure.tenant_id).await {
        Ok(name) => name,
        Err(e) => {
            warn!(error = %e, "Could not resolve tenant display name");
            None
        }
    };

    let collected = collect_records(source, &subscriptions, location).await?;
    if collected.failed_fetches > 0 {
        warn!(
            failed = collected.failed_fetches,
            "Some usage fetches failed; their data is missing from the report"
        );
    }

    let by_category = aggregate_by_category(&collected.records);
    for (category, summaries) in &by_category {
        info!(category = %category, quotas = summaries.len(), "Aggregated usage");
    }

    let alerts = report::high_usage_alerts(&by_category);
    report::console::log_alerts(&alerts);

    let metadata = ReportMetadata::new(
        tenant_name,
        &config.azure.tenant_id,
        location,
        started.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        subscriptions.len(),
    );
    let html = report::render(&by_category, &metadata);

    let output_path = PathBuf::from(config.output_path(started));
    write_report(&output_path, &html)?;
    info!(path = %output_path.display(), bytes = html.len(), "Report written");

    Ok(ReportOutcome {
        output_path,
        subscriptions_scanned: subscriptions.len(),
        records: collected.records.len(),
        failed_fetches: collected.failed_fetches,
        alerts,
    })
}

fn select_subscriptions(all: Vec<Subscription>, filter: &[String]) -> AppResult<Vec<Subscription>> {
    if all.is_empty() {
        return Err(AppError::SubscriptionEnumeration(
            "no enabled subscriptions are visible to this identity".into(),
        ));
    }
    if filter.is_empty() {
        return Ok(all);
    }

    for wanted in filter {
        if !all.iter().any(|s| s.matches(wanted)) {
            warn!(subscription = %wanted, "Configured subscription not found");
        }
    }

    let selected: Vec<Subscription> = all
        .into_iter()
        .filter(|s| filter.iter().any(|f| s.matches(f)))
        .collect();

    if selected.is_empty() {
        return Err(AppError::SubscriptionEnumeration(
            "none of the configured subscriptions are visible to this identity".into(),
        ));
    }
    Ok(selected)
}

/// Fetch every category for every subscription. Non-fatal failures are counted
/// and skipped; a fatal one (e.g. a revoked credential) ends the run.
async fn collect_records<S: UsageSource>(
    source: &S,
    subscriptions: &[Subscription],
    location: &str,
) -> AppResult<Collected> {
    let mut collected = Collected::default();

    for subscription in subscriptions {
        for category in QuotaCategory::ALL {
            match source.fetch_usages(subscription, location, category).await {
                Ok(usages) => {
                    let before = collected.records.len();
                    for usage in usages {
                        match QuotaRecord::from_raw(
                            &subscription.name,
                            &subscription.id,
                            location,
                            category,
                            &usage.name,
                            usage.current_value,
                            usage.limit,
                        ) {
                            Ok(record) => collected.records.push(record),
                            Err(e) => debug!(
                                subscription = %subscription.name,
                                error = %e,
                                "Skipping usage entry"
                            ),
                        }
                    }
                    debug!(
                        subscription = %subscription.name,
                        category = %category,
                        records = collected.records.len() - before,
                        "Fetched usage"
                    );
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(
                        subscription = %subscription.name,
                        category = %category,
                        code = e.code(),
                        error = %e,
                        "Usage fetch failed"
                    );
                    collected.failed_fetches += 1;
                }
            }
        }
    }

    Ok(collected)
}

/// Write through a sibling temp file so a failed write never leaves a truncated report.
fn write_report(path: &Path, html: &str) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, html)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AzureConfig, HttpConfig, ReportConfig};
    use crate::models::RawUsage;

    struct FakeSource {
        subscriptions: Vec<Subscription>,
        tenant_name: Option<String>,
        failing: Vec<(String, QuotaCategory)>,
    }

    impl FakeSource {
        fn new(names: &[&str]) -> Self {
            Self {
                subscriptions: names
                    .iter()
                    .map(|n| Subscription {
                        id: format!("id-{n}"),
                        name: n.to_string(),
                        tenant_id: Some("tenant-1".into()),
                    })
                    .collect(),
                tenant_name: Some("Contoso".into()),
                failing: Vec::new(),
            }
        }
    }

    impl UsageSource for FakeSource {
        async fn list_subscriptions(&self) -> AppResult<Vec<Subscription>> {
            Ok(self.subscriptions.clone())
        }

        async fn tenant_display_name(&self, _tenant_id: &str) -> AppResult<Option<String>> {
            Ok(self.tenant_name.clone())
        }

        async fn fetch_usages(
            &self,
            subscription: &Subscription,
            _location: &str,
            category: QuotaCategory,
        ) -> AppResult<Vec<RawUsage>> {
            if self.failing.contains(&(subscription.name.clone(), category)) {
                return Err(AppError::fetch(
                    &subscription.name,
                    category,
                    "HTTP 403: AuthorizationFailed",
                ));
            }

            let usages = match category {
                QuotaCategory::Compute => vec![
                    usage("Total Regional vCPUs", 45, 50),
                    usage("Standard DSv5 Family vCPUs", 8, 100),
                ],
                QuotaCategory::Storage => vec![
                    usage("Storage Accounts", 10, 250),
                    usage("Unlimited Thing", 3, -1),
                ],
                QuotaCategory::WebApp => Vec::new(),
            };
            Ok(usages)
        }
    }

    fn usage(name: &str, current_value: i64, limit: i64) -> RawUsage {
        RawUsage { name: name.into(), current_value, limit }
    }

    fn config(output: &Path, subscriptions: Vec<String>) -> AppConfig {
        AppConfig {
            azure: AzureConfig {
                tenant_id: "tenant-1".into(),
                client_id: None,
                client_secret: None,
                access_token: Some("tok".into()),
                management_endpoint: "https://management.azure.com".into(),
                login_endpoint: "https://login.microsoftonline.com".into(),
            },
            report: ReportConfig {
                location: "eastus".into(),
                output_path: Some(output.to_string_lossy().into_owned()),
                subscriptions,
            },
            http: HttpConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_run_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("quota.html");
        let source = FakeSource::new(&["Production", "Staging"]);

        let outcome = run_report(&source, &config(&path, Vec::new())).await.unwrap();
        assert_eq!(outcome.subscriptions_scanned, 2);
        // the -1 limit entry is skipped
        assert_eq!(outcome.records, 6);
        assert_eq!(outcome.failed_fetches, 0);
        assert_eq!(outcome.alerts.len(), 1);
        assert_eq!(outcome.alerts[0].resource_type, "Total Regional vCPUs");

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Contoso"));
        assert!(html.contains("Total Regional vCPUs"));
        assert!(!html.contains("Unlimited Thing"));
        assert!(!dir.path().join("reports").join("quota.html.tmp").exists());
    }

    #[tokio::test]
    async fn test_fetch_failure_does_not_abort() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quota.html");
        let mut source = FakeSource::new(&["Production", "Staging"]);
        source.failing.push(("Staging".into(), QuotaCategory::Compute));

        let outcome = run_report(&source, &config(&path, Vec::new())).await.unwrap();
        assert_eq!(outcome.failed_fetches, 1);
        assert_eq!(outcome.records, 4);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_no_subscriptions_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quota.html");
        let source = FakeSource::new(&[]);

        let err = run_report(&source, &config(&path, Vec::new())).await.unwrap_err();
        assert!(matches!(err, AppError::SubscriptionEnumeration(_)));
        assert!(err.is_fatal());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_unknown_tenant_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quota.html");
        let mut source = FakeSource::new(&["Production"]);
        source.tenant_name = None;

        run_report(&source, &config(&path, Vec::new())).await.unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("<title>Azure Quota Report - Unknown</title>"));
    }

    #[test]
    fn test_subscription_filter() {
        let all = FakeSource::new(&["Production", "Staging", "Dev"]).subscriptions;

        let filter = vec!["Staging".to_string(), "id-dev".to_string()];
        let selected = select_subscriptions(all.clone(), &filter).unwrap();
        let names: Vec<&str> = selected.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Staging", "Dev"]);

        let err = select_subscriptions(all, &["Missing".into()]).unwrap_err();
        assert!(matches!(err, AppError::SubscriptionEnumeration(_)));
    }
}
