use crate::domain::model::FieldId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with status {status}")]
    HttpStatus { status: u16 },

    #[error("Base64 decoding failed: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Unexpected response: {message}")]
    InvalidResponse { message: String },

    #[error("Response is missing the \"{field}\" field")]
    MissingField { field: String },

    #[error("Form has {} invalid field(s)", .fields.len())]
    InvalidForm { fields: Vec<FieldId> },

    #[error("Signed upload is not available before a document is generated")]
    UploadUnavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Transport,
    Decode,
    MissingField,
    Flow,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FormError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FormError::InvalidForm { .. } => ErrorCategory::Validation,
            FormError::Transport(_) | FormError::HttpStatus { .. } => ErrorCategory::Transport,
            FormError::Decode(_) | FormError::InvalidResponse { .. } => ErrorCategory::Decode,
            FormError::MissingField { .. } => ErrorCategory::MissingField,
            FormError::UploadUnavailable => ErrorCategory::Flow,
            FormError::ConfigValidation { .. } | FormError::InvalidConfigValue { .. } => {
                ErrorCategory::Configuration
            }
            FormError::Io(_) | FormError::Serialization(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Flow => ErrorSeverity::Low,
            ErrorCategory::Validation | ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Decode | ErrorCategory::MissingField => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 顯示在頁面狀態區的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            FormError::Transport(e) => format!("Ошибка при отправке: {}", e),
            FormError::HttpStatus { status } => {
                format!("Сервер вернул ошибку: HTTP {}", status)
            }
            FormError::Decode(e) => {
                format!("Не удалось декодировать и скачать файл: {}", e)
            }
            FormError::InvalidResponse { message } => {
                format!("Не удалось декодировать и скачать файл: {}", message)
            }
            FormError::MissingField { field } => {
                format!("В ответе от сервера нет поля \"{}\".", field)
            }
            FormError::InvalidForm { .. } => {
                "Форма содержит ошибки. Исправьте и повторите отправку.".to_string()
            }
            FormError::UploadUnavailable => {
                "Сначала сформируйте договор, затем загрузите подписанный файл.".to_string()
            }
            FormError::Io(e) => format!("Ошибка чтения файла: {}", e),
            FormError::Serialization(e) => format!("Ошибка сериализации: {}", e),
            FormError::ConfigValidation { .. } | FormError::InvalidConfigValue { .. } => {
                format!("Ошибка конфигурации: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Fix the highlighted fields and submit again",
            ErrorCategory::Transport => "Check the endpoint address and network, then retry",
            ErrorCategory::Decode => "The server returned an unreadable document; retry or contact support",
            ErrorCategory::MissingField => "The server did not return a document; check the backend logs",
            ErrorCategory::Flow => "Generate the document before uploading the signed file",
            ErrorCategory::Configuration => "Check the configuration file and command-line overrides",
            ErrorCategory::System => "Check file paths and permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, FormError>;
