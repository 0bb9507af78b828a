use serde::Deserialize;

use crate::config::AzureConfig;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Clone)]
enum Credential {
    BearerToken(String),
    ClientSecret { client_id: String, client_secret: String },
}

/// Obtains the ARM bearer token used for every management call of a run.
#[derive(Debug, Clone)]
pub struct TokenProvider {
    tenant_id: String,
    login_endpoint: String,
    scope: String,
    credential: Credential,
}

impl TokenProvider {
    pub fn from_config(config: &AzureConfig) -> AppResult<Self> {
        let credential = match (config.bearer_token(), config.client_credentials()) {
            (Some(token), _) => Credential::BearerToken(token.to_string()),
            (None, Some((client_id, client_secret))) => Credential::ClientSecret {
                client_id: client_id.to_string(),
                client_secret: client_secret.to_string(),
            },
            (None, None) => {
                return Err(AppError::Authentication(
                    "no access token or client credentials configured".into(),
                ))
            }
        };

        Ok(Self {
            tenant_id: config.tenant_id.clone(),
            login_endpoint: config.login_endpoint.trim_end_matches('/').to_string(),
            scope: format!("{}/.default", config.management_endpoint.trim_end_matches('/')),
            credential,
        })
    }

    pub fn token_url(&self) -> String {
        format!("{}/{}/oauth2/v2.0/token", self.login_endpoint, self.tenant_id)
    }

    pub async fn acquire(&self, http: &reqwest::Client) -> AppResult<String> {
        let (client_id, client_secret) = match &self.credential {
            Credential::BearerToken(token) => return Ok(token.clone()),
            Credential::ClientSecret { client_id, client_secret } => (client_id, client_secret),
        };

        let params = [
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
            ("grant_type", "client_credentials"),
            ("scope", self.scope.as_str()),
        ];

        let response = http
            .post(self.token_url())
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::Authentication(format!("token request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Authentication(format!("could not read token response: {e}")))?;

        if !status.is_success() {
            return Err(AppError::Authentication(describe_token_error(status.as_u16(), &body)));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::Authentication(format!("malformed token response: {e}")))?;
        tracing::debug!(expires_in = ?token.expires_in, "Acquired ARM access token");
        Ok(token.access_token)
    }
}

fn describe_token_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<TokenErrorResponse>(body) {
        Ok(err) => match err.error_description {
            Some(desc) => format!("HTTP {status} {}: {desc}", err.error),
            None => format!("HTTP {status} {}", err.error),
        },
        Err(_) => format!("HTTP {status}: {body}"),
    }
}
