use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Id;

/// 文章
///
/// 字段名沿用后端 JSON 的命名（`titolo`、`contenuto_md` 等），
/// 客户端只持有临时副本。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    pub id: Id,
    #[serde(rename = "titolo")]
    pub title: String,
    #[serde(rename = "sottotitolo")]
    pub subtitle: String,
    /// 作者呼号
    #[serde(rename = "autore")]
    pub author: String,
    /// 作者真实姓名
    #[serde(rename = "nome_autore")]
    pub author_name: String,
    /// 原始 Markdown 正文
    #[serde(rename = "contenuto_md")]
    pub content_md: String,
    /// 由 Markdown 生成的排版源码
    #[serde(rename = "contenuto_typ")]
    pub content_typ: String,
    /// 服务端生成的摘要
    #[serde(rename = "sommario_llm")]
    pub summary: String,
    #[serde(rename = "ordine")]
    pub order: i64,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub magazines: Vec<MagazineRef>,
    pub images: Vec<ImageRef>,
}

/// 期刊状态，只有草稿和已发布两种
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MagazineStatus {
    #[default]
    #[serde(rename = "bozza")]
    Draft,
    #[serde(rename = "pubblicato")]
    Published,
}

/// 期刊（一期杂志）
///
/// `articles` 的顺序以服务端返回为准。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Magazine {
    pub id: Id,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "mese")]
    pub month: String,
    #[serde(rename = "anno")]
    pub year: String,
    #[serde(rename = "stato")]
    pub status: MagazineStatus,
    #[serde(rename = "editoriale")]
    pub editorial: String,
    #[serde(rename = "editoriale_autore")]
    pub editorial_author: String,
    #[serde(rename = "copertina_id")]
    pub cover_id: Option<Id>,
    #[serde(rename = "copertina")]
    pub cover: Option<ImageRef>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub articles: Vec<ArticleRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_count: Option<u32>,
}

/// 图片
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub id: Id,
    /// 服务端存储的文件名
    pub filename: String,
    pub original_filename: String,
    pub path: String,
    pub alt_text: String,
    pub article_id: Option<Id>,
    pub uploaded_at: Option<NaiveDateTime>,
    pub url: String,
    pub is_published: bool,
}

/// 文章中内嵌的期刊引用
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagazineRef {
    pub id: Id,
    #[serde(rename = "numero")]
    pub number: String,
    #[serde(rename = "mese")]
    pub month: String,
    #[serde(rename = "anno")]
    pub year: String,
    #[serde(rename = "stato")]
    pub status: MagazineStatus,
}

/// 期刊中内嵌的文章引用
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArticleRef {
    pub id: Id,
    #[serde(rename = "titolo")]
    pub title: String,
    #[serde(rename = "sottotitolo")]
    pub subtitle: String,
    #[serde(rename = "autore")]
    pub author: String,
    #[serde(rename = "ordine")]
    pub order: i64,
}

/// 内嵌的图片引用，不同接口返回的字段不完全相同
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageRef {
    pub id: Id,
    pub filename: String,
    pub original_filename: String,
    pub url: String,
    pub alt_text: String,
}

/// 单条配置项
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigItem {
    pub key: String,
    pub value: String,
    pub description: String,
    pub updated_at: Option<NaiveDateTime>,
}

/// 全部配置，按 key 索引
pub type ConfigMap = BTreeMap<String, ConfigItem>;
