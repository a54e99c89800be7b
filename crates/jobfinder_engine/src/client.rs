use std::time::Duration;

use jobfinder_logging::{jf_debug, jf_info};
use reqwest::multipart::{Form, Part};

use crate::wire::decode_report;
use crate::{AnalysisError, AnalysisReport, DocumentUpload, FailureKind};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/analyze";

#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    /// Full URL of the analyze operation.
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// Whole-request limit. `None` waits as long as the service takes.
    pub request_timeout: Option<Duration>,
    pub max_response_bytes: u64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            max_response_bytes: 2 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(&self, upload: &DocumentUpload) -> Result<AnalysisReport, AnalysisError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalysisClient {
    settings: AnalysisSettings,
    client: reqwest::Client,
}

impl ReqwestAnalysisClient {
    pub fn new(settings: AnalysisSettings) -> Result<Self, AnalysisError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| AnalysisError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    fn build_form(upload: &DocumentUpload) -> Result<Form, AnalysisError> {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str("application/pdf")
            .map_err(|err| AnalysisError::new(FailureKind::Network, err.to_string()))?;
        Ok(Form::new().part("file", part))
    }

    fn too_large(&self, actual: u64) -> AnalysisError {
        AnalysisError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_response_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl AnalysisClient for ReqwestAnalysisClient {
    async fn analyze(&self, upload: &DocumentUpload) -> Result<AnalysisReport, AnalysisError> {
        let endpoint = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| AnalysisError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let form = Self::build_form(upload)?;

        jf_info!(
            "Submitting {} ({} bytes) to {}",
            upload.file_name,
            upload.bytes.len(),
            endpoint
        );
        let mut response = self
            .client
            .post(endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_response_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(map_reqwest_error)? {
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_response_bytes {
                return Err(self.too_large(next_len));
            }
            body.extend_from_slice(&chunk);
        }

        if !status.is_success() {
            // Keep the service's own detail for the log; callers never show it.
            let detail = String::from_utf8_lossy(&body);
            return Err(AnalysisError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("{status}: {}", jobfinder_logging::excerpt(&detail)),
            ));
        }

        let report = decode_report(&body)?;
        jf_debug!(
            "Analysis returned {} matches, cover letter {} chars",
            report.matched_jobs.len(),
            report.cover_letter.chars().count()
        );
        Ok(report)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> AnalysisError {
    if err.is_timeout() {
        return AnalysisError::new(FailureKind::Timeout, err.to_string());
    }
    AnalysisError::new(FailureKind::Network, err.to_string())
}
