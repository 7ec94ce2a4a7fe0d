//! HTTP exporter that posts orders to a document-generation endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{ExportError, ExportLine, ExportRequest, ExportResponse, OrderExporter};

/// Configuration for the document-generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpExporterConfig {
    /// Endpoint URL the order is posted to.
    pub endpoint: String,

    /// Shared token expected by the endpoint.
    #[serde(default)]
    pub token: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// HTTP client for the order export endpoint.
#[derive(Debug, Clone)]
pub struct HttpOrderExporter {
    config: HttpExporterConfig,
    http: Client,
}

impl HttpOrderExporter {
    /// Create a new exporter from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: HttpExporterConfig) -> Result<Self, ExportError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, http })
    }

    /// Endpoint the exporter posts to
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl OrderExporter for HttpOrderExporter {
    async fn export(&self, request: &ExportRequest) -> Result<ExportResponse, ExportError> {
        let body = ExportBody {
            token: &self.config.token,
            cliente: &request.customer_name,
            pedido: &request.lines,
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ExportError::UnexpectedResponse(format!(
                "export request failed with status {status}: {text}"
            )));
        }

        Ok(parse_response(&text))
    }
}

#[derive(Debug, Serialize)]
struct ExportBody<'r> {
    token: &'r str,
    cliente: &'r str,
    pedido: &'r [ExportLine],
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawExportResponse {
    ok: Option<bool>,

    #[serde(rename = "archivoUrl")]
    archivo_url: Option<String>,

    url: Option<String>,
    error: Option<String>,
}

/// Interpret the endpoint's reply.
///
/// A JSON object without an explicit `ok` counts as success unless it carries
/// an error. Anything else (plain text, arrays, scalars) counts as a failure
/// carrying the text.
fn parse_response(text: &str) -> ExportResponse {
    let raw = serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .filter(serde_json::Value::is_object)
        .and_then(|value| serde_json::from_value::<RawExportResponse>(value).ok());

    match raw {
        Some(raw) => ExportResponse {
            ok: raw.ok.unwrap_or(raw.error.is_none()),
            url: raw.archivo_url.or(raw.url).filter(|url| !url.is_empty()),
            error: raw.error,
        },
        None => ExportResponse {
            ok: false,
            url: None,
            error: Some(text.trim().to_string()),
        },
    }
}
