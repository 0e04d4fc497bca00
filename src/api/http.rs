//! HTTP implementation of the knowledge API
//!
//! Maps the [`KnowledgeApi`](super::KnowledgeApi) trait onto the backend's
//! REST routes. Business failures (`success=false`, structured error
//! bodies) are distinguished from transport failures: the former become
//! [`Error::Business`], the latter bubble up as [`Error::Http`].

use super::types::{
    ApiErrorBody, ChunkPage, DeleteResponse, DetailResponse, FilePage, PageQuery, UploadResponse,
};
use super::KnowledgeApi;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::files::UploadFile;
use async_trait::async_trait;
use serde::Deserialize;

/// Bearer-token header used by the backend
const AUTH_HEADER: &str = "Authorization";

/// Knowledge API client over HTTP
#[derive(Debug, Clone)]
pub struct HttpKnowledgeApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpKnowledgeApi {
    /// Create a client for the given backend base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: trim_trailing_slash(base_url.into()),
            token: None,
        }
    }

    /// Create a client from the client configuration.
    ///
    /// Rejects an empty or non-HTTP `api_base_url` up front rather than
    /// failing on the first request.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let url = config.api_base_url.trim();
        if url.is_empty() {
            return Err(Error::Config("api_base_url is empty".to_string()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::Config(format!(
                "api_base_url must be an http(s) URL, got `{url}`"
            )));
        }
        Ok(Self::new(url))
    }

    /// Attach a bearer token sent with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.header(AUTH_HEADER, format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Validate the current token against the backend.
    pub async fn validate_token(&self) -> Result<super::types::TokenCheck> {
        let resp = self
            .request(self.client.get(self.url("/auth/validate")))
            .send()
            .await?;
        parse_json(resp).await
    }
}

/// Error envelope the backend wraps failed responses in
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ApiErrorBody>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl ErrorEnvelope {
    fn into_error(self, status: reqwest::StatusCode) -> Error {
        let (nested_message, nested_code) = self
            .error
            .map(|e| (e.message, e.code))
            .unwrap_or((None, None));
        Error::Business {
            message: nested_message
                .or(self.message)
                .unwrap_or_else(|| format!("request failed with status {}", status)),
            code: nested_code.or(self.code),
        }
    }
}

/// Parse a 2xx response as JSON; turn anything else into a business error.
async fn parse_json<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json().await?);
    }
    let envelope: ErrorEnvelope = resp.json().await.unwrap_or_default();
    Err(envelope.into_error(status))
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[async_trait]
impl KnowledgeApi for HttpKnowledgeApi {
    async fn list_files(&self, kb_id: &str, query: &PageQuery) -> Result<FilePage> {
        let builder = self
            .client
            .get(self.url(&format!("/knowledge-bases/{}/knowledge", kb_id)))
            .query(query);
        let resp = self.request(builder).send().await?;
        parse_json(resp).await
    }

    async fn upload_file(&self, kb_id: &str, file: &UploadFile) -> Result<UploadResponse> {
        let part = reqwest::multipart::Part::bytes(file.content.clone())
            .file_name(file.name.clone());
        let form = reqwest::multipart::Form::new().part("file", part);
        let builder = self
            .client
            .post(self.url(&format!("/knowledge-bases/{}/knowledge/file", kb_id)))
            .multipart(form);
        let resp = self.request(builder).send().await?;

        // A rejected upload still carries a parsable body with the error
        // envelope; surface it as a response so callers can read the code.
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }
        match resp.json::<UploadResponse>().await {
            Ok(parsed) => Ok(UploadResponse {
                success: false,
                ..parsed
            }),
            Err(_) => Err(Error::Business {
                message: format!("upload failed with status {}", status),
                code: None,
            }),
        }
    }

    async fn get_details(&self, item_id: &str) -> Result<DetailResponse> {
        let resp = self
            .request(self.client.get(self.url(&format!("/knowledge/{}", item_id))))
            .send()
            .await?;
        parse_json(resp).await
    }

    async fn delete_details(&self, item_id: &str) -> Result<DeleteResponse> {
        let resp = self
            .request(
                self.client
                    .delete(self.url(&format!("/knowledge/{}", item_id))),
            )
            .send()
            .await?;
        parse_json(resp).await
    }

    async fn get_details_content(&self, item_id: &str, page: u32) -> Result<ChunkPage> {
        let resp = self
            .request(
                self.client
                    .get(self.url(&format!("/chunks/{}", item_id)))
                    .query(&[("page", page)]),
            )
            .send()
            .await?;
        parse_json(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let api = HttpKnowledgeApi::new("http://localhost:8080/");
        assert_eq!(
            api.url("/knowledge-bases/kb1/knowledge"),
            "http://localhost:8080/api/v1/knowledge-bases/kb1/knowledge"
        );
    }

    #[test]
    fn test_from_config_uses_configured_base_url() {
        let config = ClientConfig {
            api_base_url: "http://kb.internal:9000/".to_string(),
            ..ClientConfig::default()
        };
        let api = HttpKnowledgeApi::from_config(&config).unwrap();
        assert_eq!(
            api.url("/auth/validate"),
            "http://kb.internal:9000/api/v1/auth/validate"
        );
    }

    #[test]
    fn test_from_config_rejects_bad_base_url() {
        let mut config = ClientConfig {
            api_base_url: String::new(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            HttpKnowledgeApi::from_config(&config),
            Err(Error::Config(_))
        ));

        config.api_base_url = "kb.internal:9000".to_string();
        assert!(matches!(
            HttpKnowledgeApi::from_config(&config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_error_envelope_message_chain() {
        let envelope = ErrorEnvelope {
            error: Some(ApiErrorBody {
                message: Some("file already ingested".to_string()),
                code: Some("duplicate_file".to_string()),
            }),
            message: Some("outer".to_string()),
            code: None,
        };
        match envelope.into_error(reqwest::StatusCode::CONFLICT) {
            Error::Business { message, code } => {
                assert_eq!(message, "file already ingested");
                assert_eq!(code.as_deref(), Some("duplicate_file"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_error_envelope_falls_back_to_status() {
        let envelope = ErrorEnvelope::default();
        match envelope.into_error(reqwest::StatusCode::BAD_GATEWAY) {
            Error::Business { message, code } => {
                assert!(message.contains("502"));
                assert!(code.is_none());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
