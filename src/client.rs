//! HTTP client for the generation endpoint, used by the study client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::server::{ErrorBody, GenerateRequest, GenerateResponse, GENERATE_PATH};

#[derive(Error, Debug)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, ApiClientError>;

/// Where generated cards come from
#[async_trait]
pub trait CardSource: Send + Sync {
    async fn generate(&self, text: &str) -> Result<GenerateResponse>;
}

pub struct GenerationClient {
    client: Client,
    endpoint: String,
}

impl GenerationClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.api_url.trim_end_matches('/');
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiClientError::InvalidUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url, GENERATE_PATH),
        })
    }
}

#[async_trait]
impl CardSource for GenerationClient {
    async fn generate(&self, text: &str) -> Result<GenerateResponse> {
        let request = GenerateRequest {
            text: Some(text.to_string()),
        };
        let response = self.client.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_string(),
            };
            return Err(ApiClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}
