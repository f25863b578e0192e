use reqwest::multipart::Form;

use super::{Client, ImageFilter};
use crate::{
    error::Result,
    model::{Ack, BatchUpload, Id, Image, ImagePatch},
    upload::UploadFile,
};

/// 图片接口 `/images`
pub struct Images<'a> {
    client: &'a Client,
}

impl<'a> Images<'a> {
    pub(super) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self, filter: &ImageFilter) -> Result<Vec<Image>> {
        let request = self
            .client
            .http()
            .get(self.client.url("images"))
            .query(&filter.query_pairs());

        self.client.send(request).await
    }

    pub async fn get(&self, id: Id) -> Result<Image> {
        let request = self.client.http().get(self.client.url(format!("images/{id}")));
        self.client.send(request).await
    }

    /// 上传单张图片（multipart 字段 `file`）
    pub async fn upload(&self, file: UploadFile, article_id: Option<Id>) -> Result<Image> {
        tracing::debug!(file = %file.file_name, size = file.size(), "uploading image");

        let form = with_article(Form::new().part("file", file.into_part()?), article_id);
        let request = self
            .client
            .http()
            .post(self.client.url("images"))
            .multipart(form);

        self.client.send(request).await
    }

    /// 批量上传（multipart 字段 `files` 重复出现）
    ///
    /// 服务端逐个处理，单个文件失败记录在 [`BatchUpload::errors`] 中。
    pub async fn upload_batch(
        &self,
        files: Vec<UploadFile>,
        article_id: Option<Id>,
    ) -> Result<BatchUpload> {
        tracing::debug!(count = files.len(), "uploading image batch");

        let mut form = Form::new();
        for file in files {
            form = form.part("files", file.into_part()?);
        }

        let request = self
            .client
            .http()
            .post(self.client.url("images/batch"))
            .multipart(with_article(form, article_id));

        self.client.send(request).await
    }

    pub async fn update(&self, id: Id, data: &ImagePatch) -> Result<Image> {
        let request = self
            .client
            .http()
            .put(self.client.url(format!("images/{id}")))
            .json(data);

        self.client.send(request).await
    }

    pub async fn delete(&self, id: Id) -> Result<Ack> {
        let request = self
            .client
            .http()
            .delete(self.client.url(format!("images/{id}")));

        self.client.send(request).await
    }
}

/// 附加可选的所属文章字段，id 为 0 视为未提供
pub(crate) fn with_article(form: Form, article_id: Option<Id>) -> Form {
    match article_id.filter(|id| *id != 0) {
        Some(id) => form.text("article_id", id.to_string()),
        None => form,
    }
}
