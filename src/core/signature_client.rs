use crate::core::artifact::{encode_base64, hex_preview};
use crate::core::download::offer_download;
use crate::core::response::ResponseBody;
use crate::domain::model::{BinaryArtifact, DownloadOffer, SignRequest};
use crate::domain::ports::{ConfigProvider, SignaturePort, Storage};
use crate::utils::error::{FormError, Result};
use async_trait::async_trait;
use reqwest::Client;

pub const SIGNED_CMS_FIELD: &str = "signed_cms";
pub const SIGNED_DOCUMENT_STEM: &str = "signed_document";

/// Uploads the externally signed CMS and offers the confirmed artifact.
pub struct SignatureExchangeClient<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> SignatureExchangeClient<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl<S: Storage, C: ConfigProvider> SignaturePort for SignatureExchangeClient<S, C> {
    async fn upload_signed(&self, file_bytes: &[u8]) -> Result<DownloadOffer> {
        let endpoint = self.config.sign_endpoint();
        let request_body = SignRequest {
            cms: encode_base64(file_bytes),
        };
        tracing::debug!(
            "📡 Uploading signed file ({} bytes) to: {}",
            file_bytes.len(),
            endpoint
        );

        let mut request = self.client.post(endpoint).json(&request_body);
        if let Some(timeout) = self.config.request_timeout() {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 Sign response status: {}", status);

        if !status.is_success() {
            return Err(FormError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| FormError::InvalidResponse {
                message: format!("response is not JSON: {}", e),
            })?;
        let body = ResponseBody::Json(value);

        let encoded = body.string_field(SIGNED_CMS_FIELD)?;
        let artifact = BinaryArtifact::from_base64(encoded)?;
        tracing::debug!(
            "Decoded signed artifact: {} bytes, first bytes: {}",
            artifact.len(),
            hex_preview(&artifact.bytes, 10)
        );

        Ok(offer_download(
            &self.storage,
            artifact,
            SIGNED_DOCUMENT_STEM,
            self.config.auto_download_delay(),
        )
        .await)
    }
}
