use std::collections::BTreeMap;

use serde::Serialize;

use super::{Id, MagazineStatus};

/// 文章的创建/更新载荷
///
/// 只序列化调用方设置过的字段，未设置的字段不会出现在请求体中，
/// 服务端据此只修改提交的字段。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArticlePatch {
    #[serde(rename = "titolo", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "sottotitolo", skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(rename = "autore", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(rename = "nome_autore", skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(rename = "contenuto_md", skip_serializing_if = "Option::is_none")]
    pub content_md: Option<String>,
    #[serde(rename = "ordine", skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// 期刊的创建/更新载荷
///
/// `cover_id` 为三态：`None` 不提交，`Some(None)` 提交 `null` 清除封面。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MagazinePatch {
    #[serde(rename = "numero", skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(rename = "mese", skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    #[serde(rename = "anno", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(rename = "stato", skip_serializing_if = "Option::is_none")]
    pub status: Option<MagazineStatus>,
    #[serde(rename = "editoriale", skip_serializing_if = "Option::is_none")]
    pub editorial: Option<String>,
    #[serde(rename = "editoriale_autore", skip_serializing_if = "Option::is_none")]
    pub editorial_author: Option<String>,
    #[serde(rename = "copertina_id", skip_serializing_if = "Option::is_none")]
    pub cover_id: Option<Option<Id>>,
}

/// 图片元信息更新载荷
///
/// `article_id` 同样是三态，`Some(None)` 表示解除与文章的关联。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_id: Option<Option<Id>>,
}

/// 配置批量更新，key -> value
pub type ConfigUpdate = BTreeMap<String, String>;

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_article_patch_only_serializes_supplied_fields() {
        let patch = ArticlePatch {
            title: Some("Nuovo titolo".to_string()),
            order: Some(0),
            ..Default::default()
        };

        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value, json!({ "titolo": "Nuovo titolo", "ordine": 0 }));
    }

    #[test]
    fn test_empty_patch_is_empty_object() {
        let value = serde_json::to_value(MagazinePatch::default()).unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_tri_state_fields() {
        let detach = ImagePatch {
            article_id: Some(None),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&detach).unwrap(), json!({ "article_id": null }));

        let publish = MagazinePatch {
            status: Some(MagazineStatus::Published),
            cover_id: Some(Some(4)),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&publish).unwrap(),
            json!({ "stato": "pubblicato", "copertina_id": 4 })
        );
    }
}
