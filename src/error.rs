use std::io;

use reqwest::StatusCode;

use crate::upload::UploadRejected;

pub type Result<T> = core::result::Result<T, Error>;

/// 客户端统一错误类型。
///
/// - [`Error::Api`]：服务端返回非 2xx 状态，`message` 已归一化
/// - [`Error::Transport`]：请求未完成（连接失败、响应体读取失败等）
/// - [`Error::Upload`]：上传前的本地校验失败，不会发出任何请求
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Upload(#[from] UploadRejected),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("{0}")]
    FormatError(&'static str),
}

impl Error {
    /// 服务端返回的 HTTP 状态码，仅 [`Error::Api`] 有值
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Transport(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_message_only() {
        let err = Error::Api {
            status: StatusCode::NOT_FOUND,
            message: "Not found".to_string(),
        };

        assert_eq!(err.to_string(), "Not found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_upload_error_has_no_status() {
        let err = Error::from(UploadRejected::UnsupportedType("image/bmp".to_string()));
        assert_eq!(err.status(), None);
    }
}
