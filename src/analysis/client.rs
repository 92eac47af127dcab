//! Food classification client
//!
//! Uploads an image to the classify endpoint as a multipart form. The
//! endpoint is an external service; this module only moves bytes and
//! hands back the status and JSON body.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use image::ImageFormat;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use thiserror::Error;

use super::interpreter::failure_message;
use crate::config::Config;
use crate::models::AnalysisResponse;

/// Value of the `mode` form field
pub const CLASSIFY_MODE: &str = "chat";

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Could not read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not an image file: {0}")]
    UnsupportedImage(String),
}

/// An image ready to upload
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Read an image file. The format is sniffed from the content, falling
    /// back to the extension.
    pub async fn from_path(path: &Path) -> Result<Self, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let format = image::guess_format(&bytes)
            .or_else(|_| ImageFormat::from_path(path))
            .map_err(|_| ClientError::UnsupportedImage(path.display().to_string()))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self {
            file_name,
            mime_type: format.to_mime_type(),
            bytes,
        })
    }
}

/// Whether a path names an image by its extension
pub fn is_image_path(path: &Path) -> bool {
    ImageFormat::from_path(path).is_ok()
}

/// Raw reply from the classify endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyReply {
    pub status: u16,
    /// `Value::Null` when a failed request returned no JSON
    pub body: Value,
}

impl ClassifyReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Split into a response to interpret or the message to show.
    ///
    /// Any non-2xx status is a failure, whatever the body says.
    pub fn into_outcome(self) -> Result<AnalysisResponse, String> {
        let success = self.is_success();
        let response = AnalysisResponse::from_value(self.body);
        if success {
            Ok(response)
        } else {
            Err(failure_message(&response))
        }
    }
}

/// Something that can classify a food image
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, upload: ImageUpload) -> Result<ClassifyReply, ClientError>;
}

/// Classifier backed by the HTTP endpoint
pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpClassifier {
    /// Create a classifier for an endpoint URL
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Self::new(config.classify_url(), config.timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Classifier for HttpClassifier {
    async fn classify(&self, upload: ImageUpload) -> Result<ClassifyReply, ClientError> {
        let size = upload.bytes.len();
        let part = Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(upload.mime_type)?;
        let form = Form::new().part("image", part).text("mode", CLASSIFY_MODE);

        tracing::debug!(endpoint = %self.endpoint, bytes = size, "uploading image");

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        let text = response.text().await?;

        let body = match serde_json::from_str::<Value>(&text) {
            Ok(v) => v,
            Err(e) if status.is_success() => return Err(e.into()),
            Err(_) => Value::Null,
        };

        Ok(ClassifyReply {
            status: status.as_u16(),
            body,
        })
    }
}
