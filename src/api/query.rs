use crate::model::Id;

/// 查询参数，只收集调用方提供且非空的值
#[derive(Debug, Default)]
struct QueryPairs(Vec<(&'static str, String)>);

impl QueryPairs {
    /// id 为 0 视为未提供
    fn id(mut self, key: &'static str, value: Option<Id>) -> Self {
        if let Some(v) = value.filter(|v| *v != 0) {
            self.0.push((key, v.to_string()));
        }
        self
    }

    fn text(mut self, key: &'static str, value: Option<&str>) -> Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.0.push((key, v.to_string()));
        }
        self
    }

    /// 布尔值只要提供了就发送，包括 `false`
    fn flag(mut self, key: &'static str, value: Option<bool>) -> Self {
        if let Some(v) = value {
            self.0.push((key, v.to_string()));
        }
        self
    }
}

/// 文章列表筛选条件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleFilter {
    /// 所属期刊
    pub magazine_id: Option<Id>,
    /// 全文搜索关键字
    pub search: Option<String>,
}

impl ArticleFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::default()
            .id("magazine_id", self.magazine_id)
            .text("search", self.search.as_deref())
            .0
    }
}

/// 图片列表筛选条件
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageFilter {
    pub article_id: Option<Id>,
    pub magazine_id: Option<Id>,
    /// 是否属于已发布期刊
    pub published: Option<bool>,
}

impl ImageFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::default()
            .id("article_id", self.article_id)
            .id("magazine_id", self.magazine_id)
            .flag("published", self.published)
            .0
    }
}
