use serde::{Deserialize, Serialize};

use super::Image;

/// 删除、移出期刊、重排、配置更新等操作的简单确认
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    pub status: String,
}

/// 把文章加入期刊的确认
///
/// `status` 为 `added` 或 `already_assigned`，`order` 为文章在期刊中的位置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddArticleAck {
    pub status: String,
    #[serde(rename = "ordine", default)]
    pub order: Option<i64>,
}

impl AddArticleAck {
    pub fn already_assigned(&self) -> bool {
        self.status == "already_assigned"
    }
}

/// PDF 构建接口的原始响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildResult {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// PDF 构建结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum BuildOutcome {
    /// 构建成功，附带生成文件的下载地址
    Built { pdf_url: String },
    /// 服务端构建失败
    Failed { error: String },
}

impl From<BuildResult> for BuildOutcome {
    fn from(result: BuildResult) -> Self {
        match (result.status.as_str(), result.pdf_url) {
            ("success", Some(pdf_url)) => BuildOutcome::Built { pdf_url },
            _ => BuildOutcome::Failed {
                error: result.error.unwrap_or(result.status),
            },
        }
    }
}

/// 批量上传中单个文件的失败原因
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchUploadError {
    pub filename: String,
    pub error: String,
}

/// 批量上传结果
///
/// 服务端可能返回 `{images, errors}`，也可能直接返回图片数组，两者都接受。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BatchUploadWire")]
pub struct BatchUpload {
    pub images: Vec<Image>,
    pub errors: Vec<BatchUploadError>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BatchUploadWire {
    Detailed {
        images: Vec<Image>,
        #[serde(default)]
        errors: Vec<BatchUploadError>,
    },
    Bare(Vec<Image>),
}

impl From<BatchUploadWire> for BatchUpload {
    fn from(wire: BatchUploadWire) -> Self {
        match wire {
            BatchUploadWire::Detailed { images, errors } => Self { images, errors },
            BatchUploadWire::Bare(images) => Self {
                images,
                errors: Vec::new(),
            },
        }
    }
}
