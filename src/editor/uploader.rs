use reqwest::multipart::Form;
use serde::Deserialize;

use crate::{
    api::{self, Client},
    error::Result,
    model::Id,
    settings::Settings,
    upload::{UploadFile, UploadLimits},
};

/// 编辑器内的图片上传（拖放、粘贴、按钮）
///
/// 先在本地同步校验大小和类型，通过后才会发出请求。
#[derive(Clone, Debug)]
pub struct EditorUploader {
    http: reqwest::Client,
    endpoint: String,
    limits: UploadLimits,
}

#[derive(Deserialize)]
struct Uploaded {
    url: String,
}

impl EditorUploader {
    /// 上传接口挂在站点根下，与 API 前缀无关
    pub fn new(client: &Client, settings: &Settings) -> Self {
        Self {
            http: client.http().clone(),
            endpoint: format!(
                "{}/{}",
                client.origin(),
                settings.api.upload_endpoint.trim_start_matches('/')
            ),
            limits: settings.upload.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn limits(&self) -> &UploadLimits {
        &self.limits
    }

    /// 上传图片，成功时返回图片地址
    ///
    /// `article_id` 来自表单中的文章字段，可选。
    pub async fn upload(&self, file: UploadFile, article_id: Option<Id>) -> Result<String> {
        file.validate(&self.limits)?;

        tracing::debug!(file = %file.file_name, size = file.size(), "editor upload");
        let form = api::with_article(Form::new().part("file", file.into_part()?), article_id);

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let uploaded: Uploaded = api::read_json(response).await?;
        tracing::info!(url = %uploaded.url, "image uploaded");

        Ok(uploaded.url)
    }

    /// 回调形式的上传
    ///
    /// 成功时以图片地址调用 `on_success`，任何失败（校验或网络）
    /// 都以可读的错误信息调用 `on_error`。
    pub async fn upload_with<S, E>(
        &self,
        file: UploadFile,
        article_id: Option<Id>,
        on_success: S,
        on_error: E,
    ) where
        S: FnOnce(String),
        E: FnOnce(String),
    {
        match self.upload(file, article_id).await {
            Ok(url) => on_success(url),
            Err(e) => {
                tracing::error!(error = %e, "editor upload failed");
                on_error(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, upload::UploadRejected};

    fn uploader() -> EditorUploader {
        // 端口 1 上没有服务，若真的发出请求会得到连接错误
        let client = Client::new("http://127.0.0.1:1").unwrap();
        EditorUploader::new(&client, &Settings::default())
    }

    #[test]
    fn test_endpoint_is_outside_api_root() {
        assert_eq!(uploader().endpoint(), "http://127.0.0.1:1/upload/image/editor");
    }

    #[tokio::test]
    async fn test_oversized_rejected_before_network() {
        let file = UploadFile::new("big.jpg", "image/jpeg", vec![0; 11 * 1024 * 1024]);

        let err = uploader().upload(file, None).await.unwrap_err();
        assert!(matches!(err, Error::Upload(UploadRejected::TooLarge { .. })));
    }

    #[tokio::test]
    async fn test_callbacks_receive_message() {
        let file = UploadFile::new("scan.bmp", "image/bmp", vec![0; 8]);
        let mut message = None;

        uploader()
            .upload_with(
                file,
                Some(3),
                |_| panic!("upload should not succeed"),
                |m| message = Some(m),
            )
            .await;

        assert_eq!(
            message.as_deref(),
            Some("Unsupported format. Use JPG, PNG, GIF or WebP")
        );
    }
}
