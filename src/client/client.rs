use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

use crate::api::{AsyncPetApi, AsyncUserApi, SyncPetApi, SyncUserApi};
use crate::client::request::{ApiRequest, ResponseType};
use crate::config::ClientConfig;
use crate::error::ApiError;

/// HTTP transport shared by every API group.
///
/// Holds the base URL and a `reqwest::Client`. Idle connections are not kept
/// between calls, so a client can be driven from a different runtime on each
/// call (which is what the blocking façades do).
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let (name, value) = header_pair(name, value)?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn pet(&self) -> AsyncPetApi<'_> {
        AsyncPetApi::new(self)
    }

    pub fn user(&self) -> AsyncUserApi<'_> {
        AsyncUserApi::new(self)
    }

    pub fn pet_blocking(&self) -> SyncPetApi<'_> {
        SyncPetApi::new(self)
    }

    pub fn user_blocking(&self) -> SyncUserApi<'_> {
        SyncUserApi::new(self)
    }

    /// Sends `request` and shapes the response body as `R`.
    ///
    /// Any non-2xx status becomes [`ApiError::UnexpectedStatus`] carrying the
    /// raw body. Network failures are returned as the original `reqwest::Error`.
    pub async fn request<R: ResponseType>(&self, request: ApiRequest) -> Result<R::Output, ApiError> {
        let url = format!("{}{}", self.base_url, request.resolved_path());
        tracing::debug!(method = %request.method, template = request.url, %url, "sending request");

        let mut builder = self.client.request(request.method.clone(), &url);

        if !request.query_params.is_empty() {
            builder = builder.query(&request.query_params);
        }

        for (name, value) in &request.headers {
            let (name, value) = header_pair(name, value)?;
            builder = builder.header(name, value);
        }

        if let Some(body) = &request.json {
            builder = builder.json(body);
        }

        match (request.files, request.data) {
            (Some(files), data) => {
                let mut form = reqwest::multipart::Form::new();
                for (name, value) in data.unwrap_or_default() {
                    form = form.text(name, value);
                }
                for (name, file) in files {
                    let part = file.into_part(&name)?;
                    form = form.part(name, part);
                }
                builder = builder.multipart(form);
            }
            (None, Some(data)) => {
                builder = builder.form(&data);
            }
            (None, None) => {}
        }

        let response = builder.send().await?;
        let status = response.status();
        tracing::debug!(%status, %url, "received response");

        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        R::parse(body)
    }
}

fn header_pair(name: &str, value: &str) -> Result<(HeaderName, HeaderValue), ApiError> {
    let invalid = || ApiError::InvalidHeader {
        name: name.to_string(),
    };
    let name = HeaderName::try_from(name).map_err(|_| invalid())?;
    let value = HeaderValue::try_from(value).map_err(|_| invalid())?;
    Ok((name, value))
}
