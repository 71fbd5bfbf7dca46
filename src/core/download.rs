use crate::domain::model::{BinaryArtifact, DownloadOffer};
use crate::domain::ports::Storage;
use std::time::Duration;

/// Wrap the artifact into a download link and auto-save it after `delay`.
/// A failed auto-save only logs a warning; the link is still offered.
pub async fn offer_download<S: Storage>(
    storage: &S,
    artifact: BinaryArtifact,
    stem: &str,
    delay: Duration,
) -> DownloadOffer {
    let file_name = artifact.file_name(stem);
    tracing::info!(
        "📄 Download ready: {} ({} bytes, {})",
        file_name,
        artifact.len(),
        artifact.kind.mime
    );

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let saved_to = match storage.write_file(&file_name, &artifact.bytes).await {
        Ok(path) => {
            tracing::info!("💾 Saved {} to {}", file_name, path);
            Some(path)
        }
        Err(e) => {
            tracing::warn!("⚠️ Auto-download of {} failed: {}", file_name, e);
            None
        }
    };

    DownloadOffer {
        file_name,
        artifact,
        saved_to,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::artifact::{DOCX, PDF};
    use crate::utils::error::{FormError, Result};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingStorage {
        fail: bool,
        written: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    }

    impl Storage for RecordingStorage {
        async fn read_file(&self, _path: &str) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            if self.fail {
                return Err(FormError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            self.written
                .lock()
                .unwrap()
                .push((path.to_string(), data.to_vec()));
            Ok(format!("/downloads/{}", path))
        }
    }

    #[test]
    fn test_offer_is_saved() {
        let storage = RecordingStorage::default();
        let artifact = BinaryArtifact {
            bytes: b"%PDF-1.4".to_vec(),
            kind: PDF,
        };

        let offer = tokio_test::block_on(offer_download(
            &storage,
            artifact,
            "generated_document",
            Duration::ZERO,
        ));

        assert_eq!(offer.file_name, "generated_document.pdf");
        assert_eq!(
            offer.saved_to.as_deref(),
            Some("/downloads/generated_document.pdf")
        );
        let written = storage.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].1, b"%PDF-1.4");
    }

    #[test]
    fn test_failed_save_still_offers_link() {
        let storage = RecordingStorage {
            fail: true,
            ..Default::default()
        };
        let artifact = BinaryArtifact {
            bytes: vec![0x50, 0x4B, 0x03, 0x04],
            kind: DOCX,
        };

        let offer = tokio_test::block_on(offer_download(
            &storage,
            artifact,
            "signed_document",
            Duration::ZERO,
        ));

        assert_eq!(offer.file_name, "signed_document.docx");
        assert!(offer.saved_to.is_none());
        assert_eq!(offer.artifact.len(), 4);
    }
}
