use std::path::Path;

use reqwest::multipart::Part;
use serde::{Deserialize, Serialize};

use crate::error::Result;

const MIB: u64 = 1024 * 1024;

/// 上传前本地校验失败的原因
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadRejected {
    #[error("File too large. Maximum: {}", format_limit(.limit))]
    TooLarge { size: u64, limit: u64 },

    #[error("Unsupported format. Use JPG, PNG, GIF or WebP")]
    UnsupportedType(String),
}

/// 大于等于 1MB 时用 MB，否则用 KB；整数不带小数，其余保留一位
fn format_limit(limit: &u64) -> String {
    let limit = *limit;
    let (unit, name) = if limit >= MIB { (MIB, "MB") } else { (1024, "KB") };
    if limit % unit == 0 {
        format!("{}{name}", limit / unit)
    } else {
        format!("{:.1}{name}", limit as f64 / unit as f64)
    }
}

/// 上传限制：文件大小上限和允许的 MIME 类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadLimits {
    pub max_file_size: u64,
    pub allowed_types: Vec<String>,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size: 10 * MIB,
            allowed_types: ["image/jpeg", "image/png", "image/gif", "image/webp"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl UploadLimits {
    pub fn is_type_allowed(&self, mime: &str) -> bool {
        self.allowed_types.iter().any(|t| t.eq_ignore_ascii_case(mime))
    }
}

/// 待上传的文件
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// 从磁盘读取文件，MIME 类型按扩展名推断
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;

        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self {
            mime: mime_from_path(path).to_string(),
            file_name,
            bytes,
        })
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// 同步校验大小和类型，必须在任何网络请求之前调用
    pub fn validate(&self, limits: &UploadLimits) -> core::result::Result<(), UploadRejected> {
        if self.size() > limits.max_file_size {
            return Err(UploadRejected::TooLarge {
                size: self.size(),
                limit: limits.max_file_size,
            });
        }

        if !limits.is_type_allowed(&self.mime) {
            return Err(UploadRejected::UnsupportedType(self.mime.clone()));
        }

        Ok(())
    }

    /// 转换为 multipart 文件段
    pub(crate) fn into_part(self) -> Result<Part> {
        Ok(Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)?)
    }
}

/// 按扩展名推断 MIME 类型，未知扩展名返回 `application/octet-stream`
pub fn mime_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        "md" => "text/markdown",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_file_rejected() {
        let file = UploadFile::new("big.png", "image/png", vec![0; 11 * 1024 * 1024]);
        let err = file.validate(&UploadLimits::default()).unwrap_err();

        assert!(matches!(err, UploadRejected::TooLarge { .. }));
        assert_eq!(err.to_string(), "File too large. Maximum: 10MB");
    }

    #[test]
    fn test_limit_message_below_one_megabyte() {
        let limits = UploadLimits {
            max_file_size: 512 * 1024,
            ..Default::default()
        };
        let err = UploadFile::new("a.png", "image/png", vec![0; 600 * 1024])
            .validate(&limits)
            .unwrap_err();
        assert_eq!(err.to_string(), "File too large. Maximum: 512KB");

        let odd = UploadRejected::TooLarge {
            size: 0,
            limit: 3 * MIB / 2,
        };
        assert_eq!(odd.to_string(), "File too large. Maximum: 1.5MB");
    }

    #[test]
    fn test_limit_is_inclusive() {
        let file = UploadFile::new("exact.jpg", "image/jpeg", vec![0; 10 * 1024 * 1024]);
        assert!(file.validate(&UploadLimits::default()).is_ok());
    }

    #[test]
    fn test_bmp_rejected_by_format() {
        let file = UploadFile::new(
            "scan.bmp",
            mime_from_path(Path::new("scan.bmp")),
            vec![0; 16],
        );
        let err = file.validate(&UploadLimits::default()).unwrap_err();

        assert_eq!(err, UploadRejected::UnsupportedType("image/bmp".to_string()));
        assert!(err.to_string().contains("Unsupported format"));
    }

    #[test]
    fn test_mime_from_path() {
        assert_eq!(mime_from_path(Path::new("a/B.JPG")), "image/jpeg");
        assert_eq!(mime_from_path(Path::new("cover.webp")), "image/webp");
        assert_eq!(mime_from_path(Path::new("noext")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.gif");
        tokio::fs::write(&path, b"GIF89a").await.unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();

        assert_eq!(file.file_name, "photo.gif");
        assert_eq!(file.mime, "image/gif");
        assert_eq!(file.size(), 6);
    }
}
