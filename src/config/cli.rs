use crate::core::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// Downloads land in a local directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&full_path, data)?;
        Ok(full_path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("nested").to_string_lossy().into_owned());

        let saved = storage
            .write_file("generated_document.docx", b"PK\x03\x04")
            .await
            .unwrap();

        assert!(saved.ends_with("generated_document.docx"));
        assert_eq!(
            storage.read_file("generated_document.docx").await.unwrap(),
            b"PK\x03\x04"
        );
    }
}
