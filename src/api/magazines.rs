use serde::Serialize;

use super::Client;
use crate::{
    error::Result,
    model::{Ack, AddArticleAck, BuildOutcome, BuildResult, Id, Magazine, MagazinePatch},
};

/// 期刊接口 `/magazines`
pub struct Magazines<'a> {
    client: &'a Client,
}

#[derive(Serialize)]
struct AddArticleBody {
    #[serde(rename = "ordine", skip_serializing_if = "Option::is_none")]
    order: Option<i64>,
}

#[derive(Serialize)]
struct ReorderBody<'a> {
    article_ids: &'a [Id],
}

impl<'a> Magazines<'a> {
    pub(super) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Magazine>> {
        let request = self.client.http().get(self.client.url("magazines"));
        self.client.send(request).await
    }

    pub async fn get(&self, id: Id) -> Result<Magazine> {
        let request = self
            .client
            .http()
            .get(self.client.url(format!("magazines/{id}")));

        self.client.send(request).await
    }

    pub async fn create(&self, data: &MagazinePatch) -> Result<Magazine> {
        let request = self.client.http().post(self.client.url("magazines")).json(data);
        self.client.send(request).await
    }

    pub async fn update(&self, id: Id, data: &MagazinePatch) -> Result<Magazine> {
        let request = self
            .client
            .http()
            .put(self.client.url(format!("magazines/{id}")))
            .json(data);

        self.client.send(request).await
    }

    pub async fn delete(&self, id: Id) -> Result<Ack> {
        let request = self
            .client
            .http()
            .delete(self.client.url(format!("magazines/{id}")));

        self.client.send(request).await
    }

    /// 触发 PDF 构建
    ///
    /// 只发一次请求，不轮询也不重试。服务端构建失败时返回
    /// [`BuildOutcome::Failed`]，而不是 `Err`。
    pub async fn build(&self, id: Id) -> Result<BuildOutcome> {
        let request = self
            .client
            .http()
            .post(self.client.url(format!("magazines/{id}/build")));

        let result: BuildResult = self.client.send(request).await?;
        tracing::info!(magazine = id, status = %result.status, "pdf build finished");

        Ok(result.into())
    }

    /// PDF 下载地址，不发请求
    pub fn pdf_url(&self, id: Id) -> String {
        self.client.url(format!("magazines/{id}/pdf"))
    }

    /// 把文章加入期刊，`order` 为空时由服务端放到末尾
    pub async fn add_article(
        &self,
        magazine_id: Id,
        article_id: Id,
        order: Option<i64>,
    ) -> Result<AddArticleAck> {
        let request = self
            .client
            .http()
            .post(
                self.client
                    .url(format!("magazines/{magazine_id}/articles/{article_id}")),
            )
            .json(&AddArticleBody { order });

        self.client.send(request).await
    }

    pub async fn remove_article(&self, magazine_id: Id, article_id: Id) -> Result<Ack> {
        let request = self.client.http().delete(
            self.client
                .url(format!("magazines/{magazine_id}/articles/{article_id}")),
        );

        self.client.send(request).await
    }

    /// 提交完整的文章顺序，最终顺序以服务端为准
    pub async fn reorder_articles(&self, magazine_id: Id, article_ids: &[Id]) -> Result<Ack> {
        let request = self
            .client
            .http()
            .post(
                self.client
                    .url(format!("magazines/{magazine_id}/articles/reorder")),
            )
            .json(&ReorderBody { article_ids });

        self.client.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_url_is_pure() {
        let client = Client::new("http://localhost:8000").unwrap();
        assert_eq!(
            client.magazines().pdf_url(67),
            "http://localhost:8000/api/magazines/67/pdf"
        );
    }

    #[test]
    fn test_add_article_body_without_order() {
        let body = serde_json::to_string(&AddArticleBody { order: None }).unwrap();
        assert_eq!(body, "{}");
    }
}
