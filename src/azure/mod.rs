pub mod auth;
pub mod client;
pub mod models;

pub use auth::TokenProvider;
pub use client::ArmClient;

use std::time::Duration;

use crate::config::HttpConfig;
use crate::errors::AppResult;

pub fn http_client(config: &HttpConfig) -> AppResult<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!("azquota/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
