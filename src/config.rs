use serde::Deserialize;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub azure: AzureConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AzureConfig {
    pub tenant_id: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    /// Pre-issued ARM bearer token, e.g. from `az account get-access-token`.
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_management_endpoint")]
    pub management_endpoint: String,
    #[serde(default = "default_login_endpoint")]
    pub login_endpoint: String,
}

impl AzureConfig {
    /// Pre-issued token, ignoring an empty value.
    pub fn bearer_token(&self) -> Option<&str> {
        non_empty(&self.access_token)
    }

    /// Client id and secret, only when both are set and non-empty.
    pub fn client_credentials(&self) -> Option<(&str, &str)> {
        Some((non_empty(&self.client_id)?, non_empty(&self.client_secret)?))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn default_management_endpoint() -> String {
    "https://management.azure.com".into()
}

fn default_login_endpoint() -> String {
    "https://login.microsoftonline.com".into()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    #[serde(default = "default_location")]
    pub location: String,
    #[serde(default)]
    pub output_path: Option<String>,
    /// Restrict the scan to these subscription ids or names.
    #[serde(default)]
    pub subscriptions: Vec<String>,
}

fn default_location() -> String {
    "eastus".into()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            output_path: None,
            subscriptions: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

impl AppConfig {
    pub fn load() -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("AZQUOTA")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("report.subscriptions")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> AppResult<()> {
        if self.azure.tenant_id.trim().is_empty() {
            return Err(AppError::Authentication("azure.tenant_id is empty".into()));
        }
        if self.azure.bearer_token().is_none() && self.azure.client_credentials().is_none() {
            return Err(AppError::Authentication(
                "set azure.access_token or both azure.client_id and azure.client_secret".into(),
            ));
        }
        Ok(())
    }

    /// Output file, defaulting to a timestamped name in the working directory.
    pub fn output_path(&self, now: chrono::DateTime<chrono::Utc>) -> String {
        self.report
            .output_path
            .clone()
            .unwrap_or_else(|| format!("azure-quota-report-{}.html", now.format("%Y%m%d-%H%M%S")))
    }
}
