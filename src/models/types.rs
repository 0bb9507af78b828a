use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuotaCategory {
    #[serde(rename = "compute")]
    Compute,
    #[serde(rename = "storage")]
    Storage,
    #[serde(rename = "webapp")]
    WebApp,
}

impl QuotaCategory {
    pub const ALL: [QuotaCategory; 3] = [Self::Compute, Self::Storage, Self::WebApp];

    /// Heading used in the report and in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Compute => "Compute",
            Self::Storage => "Storage",
            Self::WebApp => "Web Apps",
        }
    }

    /// Resource provider namespace that serves the usages endpoint.
    pub fn provider_namespace(&self) -> &'static str {
        match self {
            Self::Compute => "Microsoft.Compute",
            Self::Storage => "Microsoft.Storage",
            Self::WebApp => "Microsoft.Web",
        }
    }

    pub fn api_version(&self) -> &'static str {
        match self {
            Self::Compute => "2023-07-01",
            Self::Storage => "2023-01-01",
            Self::WebApp => "2023-01-01",
        }
    }
}

impl std::fmt::Display for QuotaCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compute => write!(f, "compute"),
            Self::Storage => write!(f, "storage"),
            Self::WebApp => write!(f, "webapp"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UsageTier {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for UsageTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}
