use crate::core::ConfigProvider;
use crate::utils::error::{FormError, Result};
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static ENV_VAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub endpoints: EndpointsConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    pub generate: String,
    pub sign: String,
    /// 未設定時不逾時
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_auto_download_delay_ms")]
    pub auto_download_delay_ms: u64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            auto_download_delay_ms: default_auto_download_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_hint_seconds")]
    pub hint_seconds: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            hint_seconds: default_hint_seconds(),
        }
    }
}

fn default_output_path() -> String {
    "./output".to_string()
}

fn default_auto_download_delay_ms() -> u64 {
    200
}

fn default_hint_seconds() -> u64 {
    3
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| FormError::ConfigValidation {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GENERATE_ENDPOINT})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn generate_endpoint(&self) -> &str {
        &self.endpoints.generate
    }

    fn sign_endpoint(&self) -> &str {
        &self.endpoints.sign
    }

    fn output_path(&self) -> &str {
        &self.download.output_path
    }

    fn auto_download_delay(&self) -> Duration {
        Duration::from_millis(self.download.auto_download_delay_ms)
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.endpoints.timeout_seconds.map(Duration::from_secs)
    }

    fn hint_duration(&self) -> Duration {
        Duration::from_secs(self.ui.hint_seconds)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoints.generate", &self.endpoints.generate)?;
        validate_url("endpoints.sign", &self.endpoints.sign)?;
        validate_path("download.output_path", &self.download.output_path)?;
        validate_range(
            "download.auto_download_delay_ms",
            self.download.auto_download_delay_ms,
            0,
            10_000,
        )?;
        validate_range("ui.hint_seconds", self.ui.hint_seconds, 1, 60)?;
        if let Some(timeout) = self.endpoints.timeout_seconds {
            validate_range("endpoints.timeout_seconds", timeout, 1, 3600)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_config_uses_defaults() {
        let toml_content = r#"
[endpoints]
generate = "https://docs.example.kz/generate"
sign = "https://docs.example.kz/sign"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.generate_endpoint(), "https://docs.example.kz/generate");
        assert_eq!(config.output_path(), "./output");
        assert_eq!(config.auto_download_delay(), Duration::from_millis(200));
        assert_eq!(config.hint_duration(), Duration::from_secs(3));
        assert_eq!(config.request_timeout(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CONTRACT_FORM_TEST_SIGN", "https://sign.example.kz");

        let toml_content = r#"
[endpoints]
generate = "https://docs.example.kz/generate"
sign = "${CONTRACT_FORM_TEST_SIGN}"
timeout_seconds = 30
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.sign_endpoint(), "https://sign.example.kz");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));

        std::env::remove_var("CONTRACT_FORM_TEST_SIGN");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[endpoints]
generate = "${CONTRACT_FORM_TEST_UNSET_VAR}"
sign = "https://sign.example.kz"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.generate_endpoint(), "${CONTRACT_FORM_TEST_UNSET_VAR}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_endpoints_is_parse_error() {
        let err = TomlConfig::from_toml_str("[download]\noutput_path = \"./out\"\n").unwrap_err();
        assert!(matches!(err, FormError::ConfigValidation { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[endpoints]
generate = "http://localhost:8080/generate"
sign = "http://localhost:8080/sign"

[download]
output_path = "./signed"
auto_download_delay_ms = 0

[ui]
hint_seconds = 5
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), "./signed");
        assert!(config.auto_download_delay().is_zero());
        assert_eq!(config.hint_duration(), Duration::from_secs(5));
    }
}
