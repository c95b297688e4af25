//! Pinecone client: control-plane index lifecycle plus data-plane
//! upserts over the REST API.

use crate::domain::model::VectorRecord;
use crate::domain::ports::VectorStore;
use crate::utils::error::{IndexError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

pub const DEFAULT_CONTROLLER_URL: &str = "https://api.pinecone.io";

const API_VERSION: &str = "2025-01";
const METRIC: &str = "cosine";
const SERVERLESS_CLOUD: &str = "aws";
const SERVERLESS_REGION: &str = "us-east-1";

pub struct PineconeStore {
    client: Client,
    controller_url: String,
    api_key: String,
    index_name: String,
    namespace: String,
    // Data-plane host, resolved from the describe/create response.
    host: OnceCell<String>,
}

#[derive(Debug, Deserialize)]
struct IndexDescription {
    #[allow(dead_code)]
    name: String,
    dimension: usize,
    metric: String,
    host: String,
}

#[derive(Serialize)]
struct CreateIndexRequest<'a> {
    name: &'a str,
    dimension: usize,
    metric: &'a str,
    spec: IndexSpec<'a>,
}

#[derive(Serialize)]
struct IndexSpec<'a> {
    serverless: ServerlessSpec<'a>,
}

#[derive(Serialize)]
struct ServerlessSpec<'a> {
    cloud: &'a str,
    region: &'a str,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [VectorRecord],
    namespace: &'a str,
}

#[derive(Deserialize)]
struct UpsertResponse {
    #[serde(rename = "upsertedCount", default)]
    upserted_count: usize,
}

impl PineconeStore {
    pub fn new(
        controller_url: impl Into<String>,
        api_key: impl Into<String>,
        index_name: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        let controller_url = controller_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            controller_url,
            api_key: api_key.into(),
            index_name: index_name.into(),
            namespace: namespace.into(),
            host: OnceCell::new(),
        }
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
    }

    async fn error_from(response: Response) -> IndexError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        IndexError::StoreError { status, message }
    }

    /// `GET /indexes/{name}`; `None` on 404.
    async fn describe_index(&self) -> Result<Option<IndexDescription>> {
        let url = format!("{}/indexes/{}", self.controller_url, self.index_name);
        let response = self.request(self.client.get(&url)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        Ok(Some(response.json().await?))
    }

    async fn create_index(&self, dimension: usize) -> Result<IndexDescription> {
        let url = format!("{}/indexes", self.controller_url);
        let body = CreateIndexRequest {
            name: &self.index_name,
            dimension,
            metric: METRIC,
            spec: IndexSpec {
                serverless: ServerlessSpec {
                    cloud: SERVERLESS_CLOUD,
                    region: SERVERLESS_REGION,
                },
            },
        };

        let response = self.request(self.client.post(&url)).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        Ok(response.json().await?)
    }

    // Hosts come back bare ("index-xyz.svc.pinecone.io") from the live
    // service but may carry a scheme in other deployments.
    fn data_plane_url(host: &str) -> String {
        let host = host.trim_end_matches('/');
        if host.contains("://") {
            host.to_string()
        } else {
            format!("https://{}", host)
        }
    }

    async fn host(&self) -> Result<&String> {
        self.host
            .get_or_try_init(|| async {
                let description =
                    self.describe_index()
                        .await?
                        .ok_or_else(|| IndexError::StoreError {
                            status: 404,
                            message: format!("Index '{}' does not exist", self.index_name),
                        })?;
                Ok(Self::data_plane_url(&description.host))
            })
            .await
    }
}

#[async_trait]
impl VectorStore for PineconeStore {
    async fn ensure_index(&self, dimension: usize) -> Result<bool> {
        match self.describe_index().await? {
            Some(description) => {
                if description.dimension != dimension {
                    return Err(IndexError::ConfigError {
                        message: format!(
                            "Index '{}' has dimension {} but the embedder produces {}",
                            self.index_name, description.dimension, dimension
                        ),
                    });
                }
                if description.metric != METRIC {
                    tracing::warn!(
                        "Index '{}' uses metric '{}' instead of '{}'",
                        self.index_name,
                        description.metric,
                        METRIC
                    );
                }
                let _ = self.host.set(Self::data_plane_url(&description.host));
                Ok(false)
            }
            None => {
                let description = self.create_index(dimension).await?;
                let _ = self.host.set(Self::data_plane_url(&description.host));
                Ok(true)
            }
        }
    }

    async fn upsert(&self, records: &[VectorRecord]) -> Result<usize> {
        let url = format!("{}/vectors/upsert", self.host().await?);
        let body = UpsertRequest {
            vectors: records,
            namespace: &self.namespace,
        };

        let response = self.request(self.client.post(&url)).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let parsed: UpsertResponse = response.json().await?;
        Ok(parsed.upserted_count)
    }
}
