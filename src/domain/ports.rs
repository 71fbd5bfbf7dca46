use crate::domain::model::{ContractPayload, DownloadOffer};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn generate_endpoint(&self) -> &str;
    fn sign_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn auto_download_delay(&self) -> Duration;
    fn request_timeout(&self) -> Option<Duration>;
    fn hint_duration(&self) -> Duration;
}

/// 產生文件的往返 (第一步)
#[async_trait]
pub trait GenerationPort: Send + Sync {
    async fn submit(&self, payload: &ContractPayload) -> Result<DownloadOffer>;
}

/// 上傳已簽署 CMS 的往返 (第二步)
#[async_trait]
pub trait SignaturePort: Send + Sync {
    async fn upload_signed(&self, file_bytes: &[u8]) -> Result<DownloadOffer>;
}
