use crate::domain::credentials::{mask_key, CredentialPool};
use crate::domain::model::{LookupMatch, NameEntry};
use crate::domain::ports::PersonLookup;
use crate::utils::error::{ApollonatorError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct MatchRequest<'a> {
    api_key: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    organization_name: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct MatchResponse {
    #[serde(default)]
    person: Option<MatchedPerson>,
}

#[derive(Debug, Default, Deserialize)]
struct MatchedPerson {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

impl From<MatchResponse> for LookupMatch {
    fn from(response: MatchResponse) -> Self {
        let person = response.person.unwrap_or_default();
        Self {
            email: person.email.unwrap_or_default(),
            title: person.title.unwrap_or_default(),
        }
    }
}

/// people/match API 的 client
pub struct ApolloClient {
    client: Client,
    endpoint: String,
    base_delay: Duration,
}

impl ApolloClient {
    pub fn new(endpoint: impl Into<String>, base_delay: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            base_delay,
        }
    }
}

#[async_trait]
impl PersonLookup for ApolloClient {
    async fn lookup(
        &self,
        pool: &mut CredentialPool,
        name: &NameEntry,
        organization: &str,
    ) -> Result<LookupMatch> {
        // 每輪不是回傳就是移除一把 key，最多跑 pool.len() 次
        while let Some(api_key) = pool.next_key() {
            let payload = MatchRequest {
                api_key: &api_key,
                first_name: &name.first_name,
                last_name: &name.last_name,
                organization_name: organization,
            };

            tracing::debug!(
                "POST {} for {} {} (key {})",
                self.endpoint,
                name.first_name,
                name.last_name,
                mask_key(&api_key)
            );
            let response = self.client.post(&self.endpoint).json(&payload).send().await?;
            let status = response.status();
            tracing::debug!("API response status: {}", status);

            match status {
                StatusCode::OK => {
                    let body: MatchResponse = response.json().await?;
                    tokio::time::sleep(pool.pacing(self.base_delay)).await;
                    return Ok(body.into());
                }
                StatusCode::TOO_MANY_REQUESTS => return Err(ApollonatorError::RateLimited),
                StatusCode::UNPROCESSABLE_ENTITY => {
                    pool.remove(&api_key);
                    tracing::warn!(
                        "⚠️ API key {} exhausted, removed ({} remaining)",
                        mask_key(&api_key),
                        pool.len()
                    );
                }
                other => {
                    return Err(ApollonatorError::UnexpectedStatus {
                        status: other.as_u16(),
                    })
                }
            }
        }

        Err(ApollonatorError::CredentialsExhausted)
    }
}
