//! reqwest-backed [`DeviceEndpoint`] implementation.

use std::future::Future;
use std::pin::Pin;

use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use fwdeck_protocol::AggregateStatus;

use crate::config::EndpointConfig;
use crate::endpoint::{DeviceEndpoint, UploadPart};
use crate::error::ClientError;

/// HTTP transport to the device-management adapter.
pub struct HttpEndpoint {
    client: reqwest::Client,
    config: EndpointConfig,
}

impl HttpEndpoint {
    /// Create a transport over a fresh reqwest client.
    pub fn new(config: EndpointConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, config })
    }

    /// The endpoint configuration in use.
    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), %body, "endpoint rejected request");
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

impl DeviceEndpoint for HttpEndpoint {
    fn fetch_status(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<AggregateStatus, ClientError>> + Send + '_>> {
        let url = self.config.api_root();
        Box::pin(async move {
            let resp = self.client.get(&url).send().await?;
            let resp = Self::check(resp).await?;
            let status = resp.json::<AggregateStatus>().await?;
            Ok(status)
        })
    }

    fn put_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<(), ClientError>> + Send + '_>> {
        let url = self.config.url(path);
        Box::pin(async move {
            debug!(%url, "PUT");
            let resp = self.client.put(&url).json(&body).send().await?;
            Self::check(resp).await?;
            Ok(())
        })
    }

    fn upload_artifacts(
        &self,
        parts: Vec<UploadPart>,
    ) -> Pin<Box<dyn Future<Output = Result<(), ClientError>> + Send + '_>> {
        let url = self.config.api_root();
        Box::pin(async move {
            let mut form = Form::new();
            for part in parts {
                debug!(file = %part.file_name, bytes = part.data.len(), "adding upload part");
                form = form.part("file", Part::bytes(part.data).file_name(part.file_name));
            }
            let resp = self.client.post(&url).multipart(form).send().await?;
            Self::check(resp).await?;
            Ok(())
        })
    }
}
