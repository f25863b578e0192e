use std::path::Path;

use serde::Deserialize;

use crate::{
    error::Result,
    model::ArticlePatch,
};

/// Markdown 头部的 YAML 元信息，中英文键名都接受
#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    #[serde(alias = "title")]
    titolo: Option<String>,
    #[serde(alias = "subtitle")]
    sottotitolo: Option<String>,
    #[serde(alias = "author")]
    autore: Option<String>,
    #[serde(alias = "name")]
    nome: Option<String>,
}

/// 从 Markdown 文件导入的文章
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleImport {
    pub title: String,
    pub subtitle: Option<String>,
    pub author: Option<String>,
    pub author_name: Option<String>,
    /// 原始文件内容，包括元信息
    pub markdown: String,
}

impl ArticleImport {
    /// 解析 Markdown 文本
    ///
    /// 标题依次取自元信息、正文第一个一级标题、文件名。
    pub fn parse(file_name: impl AsRef<Path>, markdown: impl Into<String>) -> Result<Self> {
        let markdown = markdown.into();
        let (front_matter, body) = split_front_matter(&markdown);

        let front_matter: FrontMatter = match front_matter {
            Some(yaml) if !yaml.is_empty() => serde_yaml::from_str(yaml)?,
            _ => FrontMatter::default(),
        };

        let title = front_matter
            .titolo
            .filter(|t| !t.trim().is_empty())
            .or_else(|| first_heading(body))
            .unwrap_or_else(|| {
                file_name
                    .as_ref()
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "article".to_string())
            });

        Ok(Self {
            title,
            subtitle: front_matter.sottotitolo,
            author: front_matter.autore,
            author_name: front_matter.nome,
            markdown,
        })
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let markdown = tokio::fs::read_to_string(path).await?;
        Self::parse(path, markdown)
    }

    /// 转换为创建文章的载荷
    pub fn into_patch(self) -> ArticlePatch {
        ArticlePatch {
            title: Some(self.title),
            subtitle: self.subtitle,
            author: self.author,
            author_name: self.author_name,
            content_md: Some(self.markdown),
            order: None,
        }
    }
}

/// 拆分元信息和正文，没有元信息时整个文本都是正文
fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    const DELIM: &str = "---";

    let trimmed = content.trim_start();
    if !trimmed.starts_with(DELIM) {
        return (None, content);
    }

    let rest = &trimmed[DELIM.len()..];
    // 没有结束分隔符时开头的 `---` 只是分隔线
    let Some(end_pos) = rest.find(&format!("\n{DELIM}")) else {
        return (None, content);
    };

    let yaml_str = &rest[..end_pos];
    let body_str = rest[end_pos + 1 + DELIM.len()..].trim_start();

    (Some(yaml_str.trim()), body_str)
}

fn first_heading(body: &str) -> Option<String> {
    body.lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_matter_fields() {
        let markdown = r#"
---
titolo: "Il mio articolo"
autore: IU3XYZ
nome: Mario Rossi
sottotitolo: Un sottotitolo
---

# Heading ignored

Body text.
"#;

        let import = ArticleImport::parse("articolo.md", markdown).expect("Failed to parse");

        assert_eq!(import.title, "Il mio articolo");
        assert_eq!(import.author.as_deref(), Some("IU3XYZ"));
        assert_eq!(import.author_name.as_deref(), Some("Mario Rossi"));
        assert_eq!(import.subtitle.as_deref(), Some("Un sottotitolo"));
        assert_eq!(import.markdown, markdown);
    }

    #[test]
    fn test_english_keys() {
        let import = ArticleImport::parse("a.md", "---\ntitle: Dipoles\nauthor: K1ABC\n---\nbody")
            .unwrap();

        assert_eq!(import.title, "Dipoles");
        assert_eq!(import.author.as_deref(), Some("K1ABC"));
    }

    #[test]
    fn test_title_falls_back_to_heading_then_file_name() {
        let import = ArticleImport::parse("a.md", "intro\n\n# Antenne verticali\n\ntext").unwrap();
        assert_eq!(import.title, "Antenne verticali");

        let import = ArticleImport::parse("notes/propagazione.md", "just text").unwrap();
        assert_eq!(import.title, "propagazione");
        assert!(import.author.is_none());
    }

    #[test]
    fn test_leading_rule_without_front_matter() {
        let markdown = "---\n\n# Title\n\nBody text";
        let import = ArticleImport::parse("a.md", markdown).expect("Failed to parse");

        assert_eq!(import.title, "Title");
        assert!(import.author.is_none());
        assert_eq!(import.markdown, markdown);
    }

    #[test]
    fn test_into_patch_keeps_full_text() {
        let patch = ArticleImport::parse("a.md", "# T\nbody").unwrap().into_patch();

        assert_eq!(patch.title.as_deref(), Some("T"));
        assert_eq!(patch.content_md.as_deref(), Some("# T\nbody"));
        assert!(patch.order.is_none());
    }
}
