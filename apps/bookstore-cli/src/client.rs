//! HTTP client for the catalog server.

use bookstore_core::{Book, PageRequest, PageResult};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors talking to the catalog server.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid server URL '{0}'")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with its `{ code, message }` error body.
    #[error("{message} ({code})")]
    Api {
        status: StatusCode,
        code: String,
        message: String,
    },
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// Typed wrapper over the catalog endpoints.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base: Url,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        // A trailing slash makes `join` append instead of replacing the
        // last path segment.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalized).map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?;

        Ok(CatalogClient {
            http: reqwest::Client::new(),
            base,
        })
    }

    /// `GET /api/books` with the request's page, size, sort and category.
    pub async fn books(&self, request: &PageRequest) -> ClientResult<PageResult> {
        self.get_json(self.books_url(request)?).await
    }

    /// `GET /api/books/{id}`
    pub async fn book(&self, book_id: i64) -> ClientResult<Book> {
        self.get_json(self.endpoint(&format!("api/books/{}", book_id))?)
            .await
    }

    /// `GET /api/categories`
    pub async fn categories(&self) -> ClientResult<Vec<String>> {
        self.get_json(self.endpoint("api/categories")?).await
    }

    pub fn books_url(&self, request: &PageRequest) -> ClientResult<Url> {
        let mut url = self.endpoint("api/books")?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("page", &request.page().to_string())
                .append_pair("pageSize", &request.page_size().to_string());
            if let Some(sort) = request.sort() {
                query.append_pair("sort", sort.as_str());
            }
            if let Some(category) = request.category() {
                query.append_pair("category", category);
            }
        }
        Ok(url)
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base
            .join(path)
            .map_err(|_| ClientError::InvalidUrl(format!("{}{}", self.base, path)))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> ClientResult<T> {
        debug!(%url, "GET");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let (code, message) = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(err) => (err.code, err.message),
            Err(_) => (status.as_str().to_string(), status.to_string()),
        };

        Err(ClientError::Api {
            status,
            code,
            message,
        })
    }
}
