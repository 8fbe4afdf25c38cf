//! Host lookups against the Censys Search v2 `hosts/{ip}` endpoint.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use exposr_common::credential::Credential;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::lookup::{HostLookup, HostView, LookupOutcome};

/// Longest slice of an error body kept in a failure message.
const MAX_ERROR_BODY: usize = 200;

pub struct CensysClient {
    api_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    result: Option<HostView>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

impl CensysClient {
    pub fn new(api_url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("exposr/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            api_url: api_url.into(),
            client,
        })
    }

    fn host_url(&self, ip: Ipv4Addr) -> String {
        format!("{}/v2/hosts/{ip}", self.api_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl HostLookup for CensysClient {
    async fn view(&self, ip: Ipv4Addr, credential: &Credential) -> LookupOutcome {
        let url = self.host_url(ip);
        debug!("GET {url} as '{}'", credential.label());

        let response = match self
            .client
            .get(&url)
            .basic_auth(&credential.key, Some(&credential.secret))
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return LookupOutcome::Failed(format!("request failed: {e}")),
        };

        let status = response.status();
        if is_rejection(status) {
            return LookupOutcome::Unauthorized;
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return LookupOutcome::Failed(error_message(status, &body));
        }

        match response.json::<Envelope>().await {
            Ok(Envelope { result: Some(view) }) => LookupOutcome::Found(view),
            Ok(Envelope { result: None }) => {
                LookupOutcome::Failed("response carried no host record".to_string())
            }
            Err(e) => LookupOutcome::Failed(format!("malformed response: {e}")),
        }
    }
}

fn is_rejection(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

fn error_message(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| body.chars().take(MAX_ERROR_BODY).collect());

    if detail.is_empty() {
        format!("API error ({status})")
    } else {
        format!("API error ({status}): {detail}")
    }
}
