//! HTTP backend for the console REST endpoints.
//!
//! `GET  {base}/table/{kind}?page=&search=&rows_per_page=`
//! `POST {base}/save/{kind}`, `POST {base}/delete/{kind}`
//! `POST {base}/deauth`, `POST {base}/block` with `{"mac": ...}`

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::GatewayConfig;
use crate::error::{Result, TransportError};
use crate::gateway::wire::{ActionReply, ListReply, MacBody, PageQuery, RecordPayload};
use crate::gateway::Gateway;
use crate::kind::RecordKind;

const MAX_LOG_BODY_CHARS: usize = 512;

/// Backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| TransportError::Request(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        if !status.is_success() {
            let mut preview = body.chars().take(MAX_LOG_BODY_CHARS).collect::<String>();
            if body.chars().count() > MAX_LOG_BODY_CHARS {
                preview.push_str("...");
            }
            tracing::debug!(%status, body = %preview, "backend error response");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: preview,
            }
            .into());
        }

        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()).into())
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Option<i64>> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Self::read::<ActionReply>(response).await?.into_result()
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn list(&self, kind: RecordKind, query: &PageQuery) -> Result<ListReply> {
        let response = self
            .client
            .get(self.url(&format!("table/{}", kind.slug())))
            .query(query)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Self::read(response).await
    }

    async fn save(&self, kind: RecordKind, payload: &RecordPayload) -> Result<Option<i64>> {
        self.post(&format!("save/{}", kind.slug()), payload).await
    }

    async fn delete(&self, kind: RecordKind, identity: &RecordPayload) -> Result<()> {
        self.post(&format!("delete/{}", kind.slug()), identity)
            .await
            .map(|_| ())
    }

    async fn deauth(&self, mac: &str) -> Result<()> {
        let body = MacBody {
            mac: mac.to_string(),
        };
        self.post("deauth", &body).await.map(|_| ())
    }

    async fn block(&self, mac: &str) -> Result<()> {
        let body = MacBody {
            mac: mac.to_string(),
        };
        self.post("block", &body).await.map(|_| ())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
