//! The transport seam between orchestration logic and the wire.

use std::future::Future;
use std::pin::Pin;

use fwdeck_protocol::AggregateStatus;

use crate::error::ClientError;

/// One artifact in the multipart upload payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPart {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// Abstract connection to the device-management endpoint.
///
/// Implemented over reqwest by [`crate::HttpEndpoint`]; orchestration and
/// polling code hold `&dyn DeviceEndpoint` so tests can substitute a
/// recording mock. Using a trait keeps update logic decoupled from
/// transport.
pub trait DeviceEndpoint: Send + Sync {
    /// `GET` the full aggregate status document.
    fn fetch_status(
        &self,
    ) -> Pin<Box<dyn Future<Output = Result<AggregateStatus, ClientError>> + Send + '_>>;

    /// `PUT` a JSON body to a path under the adapter root.
    fn put_json(
        &self,
        path: &str,
        body: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<(), ClientError>> + Send + '_>>;

    /// `POST` the artifact payload as one multipart request, field name
    /// `file` repeated once per part.
    fn upload_artifacts(
        &self,
        parts: Vec<UploadPart>,
    ) -> Pin<Box<dyn Future<Output = Result<(), ClientError>> + Send + '_>>;
}
