//! Habitica API client and the collaborator seams the pipeline runs
//! against.
//!
//! The pipeline only sees the two traits; the live client implements both
//! on top of the group endpoints. Retrieval and persistence are each issued
//! at most once per run, with no internal retries — scheduling and retry
//! policy belong to whatever invokes the binary.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::chat::ChatMessage;
use crate::config::ApiSettings;
use crate::error::PodiumError;

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://habitica.com/api/v4";

/// Source of the party's chat stream.
#[async_trait]
pub trait PartyChatSource {
    async fn fetch_party_chat(&self) -> Result<Vec<ChatMessage>, PodiumError>;
}

/// Store holding the group record the podium is merged into.
#[async_trait]
pub trait GroupStore {
    async fn fetch_group(&self) -> Result<GroupRecord, PodiumError>;

    async fn update_description(
        &self,
        group_id: &str,
        description: &str,
    ) -> Result<(), PodiumError>;
}

/// Group identity and current description text.
#[derive(Debug, Clone, Default)]
pub struct GroupRecord {
    pub id: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct PartyData {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    chat: Vec<ChatMessage>,
}

/// HTTP client for the Habitica group endpoints.
pub struct HabiticaClient {
    http: reqwest::Client,
    base_url: String,
}

impl HabiticaClient {
    /// Build a client with the API's credential headers baked in.
    pub fn new(settings: &ApiSettings) -> Result<Self, PodiumError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("x-api-user", credential_header(&settings.user_id)?);
        headers.insert("x-api-key", credential_header(&settings.api_token)?);
        headers.insert("x-client", credential_header(&settings.client_header())?);
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(PodiumError::Client)?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `GET /groups/party` — one payload carries the group record and the
    /// chat stream.
    async fn get_party(&self) -> Result<PartyData, PodiumError> {
        let envelope: Envelope<PartyData> = self
            .http
            .get(format!("{}/groups/party", self.base_url))
            .send()
            .await
            .map_err(PodiumError::Fetch)?
            .error_for_status()
            .map_err(PodiumError::Fetch)?
            .json()
            .await
            .map_err(PodiumError::Fetch)?;
        Ok(envelope.data)
    }
}

fn credential_header(value: &str) -> Result<reqwest::header::HeaderValue, PodiumError> {
    reqwest::header::HeaderValue::from_str(value)
        .map_err(|_| PodiumError::InvalidCredentialHeader)
}

#[async_trait]
impl PartyChatSource for HabiticaClient {
    async fn fetch_party_chat(&self) -> Result<Vec<ChatMessage>, PodiumError> {
        Ok(self.get_party().await?.chat)
    }
}

#[async_trait]
impl GroupStore for HabiticaClient {
    async fn fetch_group(&self) -> Result<GroupRecord, PodiumError> {
        let party = self.get_party().await?;
        Ok(GroupRecord {
            id: party.id,
            description: party.description,
        })
    }

    async fn update_description(
        &self,
        group_id: &str,
        description: &str,
    ) -> Result<(), PodiumError> {
        self.http
            .put(format!("{}/groups/{group_id}", self.base_url))
            .json(&json!({ "description": description }))
            .send()
            .await
            .map_err(PodiumError::Update)?
            .error_for_status()
            .map_err(PodiumError::Update)?;
        Ok(())
    }
}
