pub mod dto;

use std::env;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use crate::catalog::dto::RemoteCourse;
use crate::error::RetrievalError;

const DEFAULT_BASE_URL: &str = "https://app.pluralsight.com";

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub base_url: String,
}

impl CatalogConfig {
    pub fn new_from_env() -> Self {
        let base_url =
            env::var("COURSE_CATALOG_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}

#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Every course the catalog lists for the author, retired ones
    /// included. An unknown author is an empty list, not an error.
    async fn get_courses_for(&self, author_id: &str)
        -> Result<Vec<RemoteCourse>, RetrievalError>;
}

pub struct HttpCatalogClient {
    client: Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, RetrievalError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| RetrievalError::BaseUrl(format!("{}: {e}", config.base_url)))?;
        let client = Client::builder()
            .build()
            .map_err(RetrievalError::Transport)?;
        Ok(Self { client, base_url })
    }

    fn author_content_url(&self, author_id: &str) -> Result<Url, RetrievalError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                RetrievalError::BaseUrl(format!("{} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(["profile", "data", "author", author_id, "all-content"]);
        Ok(url)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn get_courses_for(
        &self,
        author_id: &str,
    ) -> Result<Vec<RemoteCourse>, RetrievalError> {
        let url = self.author_content_url(author_id)?;
        debug!("requesting {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(RetrievalError::Transport)?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await.map_err(RetrievalError::Transport)?;
                serde_json::from_str::<Vec<RemoteCourse>>(&body).map_err(|e| {
                    tracing::error!("failed to parse catalog response: {}", e);
                    RetrievalError::Decode(e)
                })
            }
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            status => Err(RetrievalError::Status(status.as_u16())),
        }
    }
}
