use crate::config::ApiConfig;
use crate::error::ListError;
use crate::page::Page;
use crate::session::Session;
use crate::shape::ResponseShape;
use crate::source::{PageFetcher, PageRequest};
use futures::future::BoxFuture;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// REST client for listing endpoints.
///
/// Sends `GET {base_url}/{endpoint}?page=..&limit=..` with the session's
/// bearer token when one is set, and decodes the body through the
/// configured [`ResponseShape`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
    shape: ResponseShape,
    timeout: Option<Duration>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Session) -> Result<Self, ListError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("roster/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim().trim_end_matches('/').to_owned(),
            session,
            shape: config.response.clone(),
            timeout: config.timeout(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

impl<T> PageFetcher<T> for ApiClient
where
    T: DeserializeOwned + Send + 'static,
{
    fn fetch(&self, request: PageRequest) -> BoxFuture<'static, Result<Page<T>, ListError>> {
        let mut builder = self.http.get(self.url(&request.endpoint)).query(&request.query);
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let shape = self.shape.clone();

        async move {
            let response = builder.send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or_default().to_owned()
                } else {
                    body
                };
                return Err(ListError::Status {
                    status: status.as_u16(),
                    message,
                });
            }
            let body: Value = response.json().await?;
            shape.decode(body, request.page, request.page_size)
        }
        .boxed()
    }
}
