use serde::Serialize;

use super::{ArticleFilter, Client};
use crate::{
    error::Result,
    model::{Ack, Article, ArticlePatch, Id},
};

/// 文章接口 `/articles`
pub struct Articles<'a> {
    client: &'a Client,
}

#[derive(Serialize)]
struct AssignBody<'a> {
    magazine_ids: &'a [Id],
}

impl<'a> Articles<'a> {
    pub(super) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// `GET /articles`，只携带提供了的筛选条件
    pub async fn list(&self, filter: &ArticleFilter) -> Result<Vec<Article>> {
        let request = self
            .client
            .http()
            .get(self.client.url("articles"))
            .query(&filter.query_pairs());

        self.client.send(request).await
    }

    pub async fn get(&self, id: Id) -> Result<Article> {
        let request = self.client.http().get(self.client.url(format!("articles/{id}")));
        self.client.send(request).await
    }

    pub async fn create(&self, data: &ArticlePatch) -> Result<Article> {
        let request = self.client.http().post(self.client.url("articles")).json(data);
        self.client.send(request).await
    }

    /// 部分更新，只提交 `data` 中设置过的字段
    pub async fn update(&self, id: Id, data: &ArticlePatch) -> Result<Article> {
        let request = self
            .client
            .http()
            .put(self.client.url(format!("articles/{id}")))
            .json(data);

        self.client.send(request).await
    }

    pub async fn delete(&self, id: Id) -> Result<Ack> {
        let request = self
            .client
            .http()
            .delete(self.client.url(format!("articles/{id}")));

        self.client.send(request).await
    }

    /// 触发服务端生成摘要，返回更新后的文章
    pub async fn generate_summary(&self, id: Id) -> Result<Article> {
        let request = self
            .client
            .http()
            .post(self.client.url(format!("articles/{id}/summary")));

        self.client.send(request).await
    }

    /// 把文章指派到若干期刊，服务端会先清除原有指派
    pub async fn assign(&self, id: Id, magazine_ids: &[Id]) -> Result<Article> {
        let request = self
            .client
            .http()
            .post(self.client.url(format!("articles/{id}/assign")))
            .json(&AssignBody { magazine_ids });

        self.client.send(request).await
    }
}
