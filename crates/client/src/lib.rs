//! REST client for the device-management update endpoint.
//!
//! The server is an odin-control style adapter: one aggregate status
//! document under a single API root, written to with JSON `PUT`s and one
//! multipart `POST` for the artifact payload. Orchestration code talks to
//! the [`DeviceEndpoint`] trait, never to reqwest directly, so every flow
//! stays testable with a recording mock.

pub mod api;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod http;

pub use config::EndpointConfig;
pub use endpoint::{DeviceEndpoint, UploadPart};
pub use error::ClientError;
pub use http::HttpEndpoint;
