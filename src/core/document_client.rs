use crate::core::artifact::hex_preview;
use crate::core::download::offer_download;
use crate::core::response::ResponseBody;
use crate::domain::model::{BinaryArtifact, ContractPayload, DownloadOffer};
use crate::domain::ports::{ConfigProvider, GenerationPort, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;

pub const GENERATED_DOCUMENT_FIELD: &str = "generated_document";
pub const GENERATED_DOCUMENT_STEM: &str = "generated_document";

/// Posts the payload to the generation endpoint and offers the returned document.
pub struct DocumentExchangeClient<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> DocumentExchangeClient<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self {
            storage,
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl<S: Storage, C: ConfigProvider> GenerationPort for DocumentExchangeClient<S, C> {
    async fn submit(&self, payload: &ContractPayload) -> Result<DownloadOffer> {
        let endpoint = self.config.generate_endpoint();
        tracing::debug!("📡 Posting contract payload to: {}", endpoint);

        let mut request = self.client.post(endpoint).json(payload);
        if let Some(timeout) = self.config.request_timeout() {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = ResponseBody::parse(&text);

        tracing::debug!("📡 Generate response status: {}", status);
        tracing::debug!("📡 Generate response body: {}", body.render());
        if !status.is_success() {
            tracing::warn!("Generate endpoint answered {}", status);
        }

        let encoded = body.string_field(GENERATED_DOCUMENT_FIELD)?;
        tracing::debug!("Base64 string length: {}", encoded.len());

        let artifact = BinaryArtifact::from_base64(encoded)?;
        tracing::debug!(
            "Decoded {} bytes, first bytes: {}, detected: {}",
            artifact.len(),
            hex_preview(&artifact.bytes, 10),
            artifact.kind.extension
        );

        Ok(offer_download(
            &self.storage,
            artifact,
            GENERATED_DOCUMENT_STEM,
            self.config.auto_download_delay(),
        )
        .await)
    }
}
