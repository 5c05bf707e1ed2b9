//! src/api/client.rs
//! ============================================================================
//! # KnowledgeBaseApi: REST Collaborator Seam
//!
//! `KnowledgeBaseApi` is the trait boundary between the console core and the
//! server. The production implementation (`HttpApi`) is a thin reqwest
//! wrapper; tests substitute an in-memory double. Every non-2xx response is
//! parsed for a server-supplied `detail` field, falling back to a generic
//! status-code message when the body is not JSON.

use reqwest::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::api::types::{
    CategoriesPayload, CreateCategoryBody, CreateFileBody, DeleteTextsBody, FileTexts, SearchPage,
    TextDraft, TextEntry, UpdateCategoryBody, UpdateTextBody,
};
use crate::error::AppError;

/// All server operations the console core needs.
///
/// The trait is generic-dispatch only; the event loop is parameterized over
/// it so tests can drive the full command flow without a network.
pub trait KnowledgeBaseApi {
    async fn fetch_categories(&self) -> Result<CategoriesPayload, AppError>;

    async fn create_category(&self, name: &str) -> Result<(), AppError>;
    async fn rename_category(&self, category_id: u64, name: &str) -> Result<(), AppError>;
    async fn delete_category(&self, category_id: u64) -> Result<(), AppError>;

    async fn create_file(&self, name: &str, category_id: u64) -> Result<(), AppError>;
    async fn delete_file(&self, file_id: u64) -> Result<(), AppError>;

    async fn fetch_texts(&self, file_id: u64) -> Result<Vec<TextEntry>, AppError>;
    async fn create_text(&self, file_id: u64, draft: &TextDraft) -> Result<(), AppError>;
    async fn update_text(&self, text_id: &str, draft: &TextDraft) -> Result<(), AppError>;
    async fn delete_texts(&self, text_ids: &[String]) -> Result<(), AppError>;

    async fn search_texts(
        &self,
        query: &str,
        page: u64,
        size: usize,
    ) -> Result<SearchPage, AppError>;
}

/// reqwest-backed implementation of [`KnowledgeBaseApi`].
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    client: Client,
}

/// Error body shape used by the collaborator for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

impl HttpApi {
    /// Build a client with the configured base URL and request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-2xx response to `AppError::Http`, preferring the server's
    /// `detail` field over the generic status message.
    async fn error_for(resp: Response) -> AppError {
        let status = resp.status().as_u16();
        let fallback = format!("request failed with status {status}");
        let detail = match resp.json::<ErrorBody>().await {
            Ok(body) => body.detail.unwrap_or(fallback),
            Err(_) => fallback,
        };
        AppError::Http { status, detail }
    }

    /// Check status, then decode the body.
    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, AppError> {
        if resp.status().is_success() {
            Ok(resp.json::<T>().await?)
        } else {
            Err(Self::error_for(resp).await)
        }
    }

    /// Check status for endpoints whose body we do not consume.
    async fn expect_ok(resp: Response) -> Result<(), AppError> {
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_for(resp).await)
        }
    }
}

impl KnowledgeBaseApi for HttpApi {
    async fn fetch_categories(&self) -> Result<CategoriesPayload, AppError> {
        debug!("GET /categories");
        let resp = self.client.get(self.url("/categories")).send().await?;
        Self::decode(resp).await
    }

    async fn create_category(&self, name: &str) -> Result<(), AppError> {
        let resp = self
            .client
            .post(self.url("/categories"))
            .json(&CreateCategoryBody {
                category_name: name,
            })
            .send()
            .await?;
        Self::expect_ok(resp).await
    }

    async fn rename_category(&self, category_id: u64, name: &str) -> Result<(), AppError> {
        let resp = self
            .client
            .post(self.url("/categories/update"))
            .json(&UpdateCategoryBody {
                category_id,
                category_name: name,
            })
            .send()
            .await?;
        Self::expect_ok(resp).await
    }

    async fn delete_category(&self, category_id: u64) -> Result<(), AppError> {
        let resp = self
            .client
            .delete(self.url(&format!("/categories/{category_id}")))
            .send()
            .await?;
        Self::expect_ok(resp).await
    }

    async fn create_file(&self, name: &str, category_id: u64) -> Result<(), AppError> {
        let resp = self
            .client
            .post(self.url("/files"))
            .json(&CreateFileBody {
                file_name: name,
                category_id,
            })
            .send()
            .await?;
        Self::expect_ok(resp).await
    }

    async fn delete_file(&self, file_id: u64) -> Result<(), AppError> {
        let resp = self
            .client
            .delete(self.url(&format!("/files/{file_id}")))
            .send()
            .await?;
        Self::expect_ok(resp).await
    }

    async fn fetch_texts(&self, file_id: u64) -> Result<Vec<TextEntry>, AppError> {
        debug!("GET /files/{file_id}/texts");
        let resp = self
            .client
            .get(self.url(&format!("/files/{file_id}/texts")))
            .send()
            .await?;
        let body: FileTexts = Self::decode(resp).await?;
        Ok(body.texts)
    }

    async fn create_text(&self, file_id: u64, draft: &TextDraft) -> Result<(), AppError> {
        let resp = self
            .client
            .post(self.url(&format!("/files/{file_id}/texts")))
            .json(draft)
            .send()
            .await?;
        Self::expect_ok(resp).await
    }

    async fn update_text(&self, text_id: &str, draft: &TextDraft) -> Result<(), AppError> {
        let resp = self
            .client
            .post(self.url("/texts/update"))
            .json(&UpdateTextBody { text_id, draft })
            .send()
            .await?;
        Self::expect_ok(resp).await
    }

    async fn delete_texts(&self, text_ids: &[String]) -> Result<(), AppError> {
        let resp = self
            .client
            .delete(self.url("/texts/batch"))
            .json(&DeleteTextsBody { text_ids })
            .send()
            .await?;
        Self::expect_ok(resp).await
    }

    async fn search_texts(
        &self,
        query: &str,
        page: u64,
        size: usize,
    ) -> Result<SearchPage, AppError> {
        let url = format!(
            "{}/texts/search?query={}&page={}&size={}",
            self.base_url,
            urlencoding::encode(query),
            page,
            size
        );
        debug!("GET {url}");
        let resp = self.client.get(&url).send().await?;
        Self::decode(resp).await
    }
}
