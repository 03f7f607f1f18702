use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnippetError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl SnippetError {
    pub fn config(message: impl Into<String>) -> Self {
        SnippetError::ConfigError {
            message: message.into(),
        }
    }

    /// 是否為設定 / 輸入驗證錯誤
    pub fn is_config_error(&self) -> bool {
        matches!(self, SnippetError::ConfigError { .. })
    }
}

pub type Result<T> = std::result::Result<T, SnippetError>;
