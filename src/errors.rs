use thiserror::Error;

use crate::models::QuotaCategory;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Could not enumerate subscriptions: {0}")]
    SubscriptionEnumeration(String),

    #[error("Failed to fetch {category} usage for subscription '{subscription}': {message}")]
    Fetch {
        subscription: String,
        category: QuotaCategory,
        message: String,
    },

    #[error("Invalid quota record: {0}")]
    InvalidRecord(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    pub fn fetch(subscription: &str, category: QuotaCategory, err: impl std::fmt::Display) -> Self {
        Self::Fetch {
            subscription: subscription.into(),
            category,
            message: err.to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Authentication(_) => "AUTHENTICATION_FAILURE",
            Self::SubscriptionEnumeration(_) => "SUBSCRIPTION_ENUMERATION_FAILURE",
            Self::Fetch { .. } => "FETCH_FAILURE",
            Self::InvalidRecord(_) => "INVALID_RECORD",
            Self::Status { .. } => "HTTP_STATUS",
            Self::Http(_) => "NETWORK_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Fatal errors abort the run; the rest are logged and skipped.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Fetch { .. } | Self::InvalidRecord(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
