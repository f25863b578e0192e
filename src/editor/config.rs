use std::time::Duration;

use serde::Serialize;

use crate::upload::UploadLimits;

/// 工具栏按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolbarItem {
    Bold,
    Italic,
    Heading,
    Quote,
    UnorderedList,
    OrderedList,
    Link,
    Image,
    UploadImage,
    Table,
    Preview,
    SideBySide,
    Fullscreen,
    Guide,
    /// 插入高亮框，见 [`highlight_box`]
    HighlightBox,
    #[serde(rename = "|")]
    Separator,
}

/// 自动保存配置
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Autosave {
    pub enabled: bool,
    pub unique_id: String,
    #[serde(serialize_with = "as_millis")]
    pub delay: Duration,
}

/// 传给编辑器组件的配置
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorConfig {
    pub spell_checker: bool,
    pub autosave: Autosave,
    pub placeholder: String,
    pub toolbar: Vec<ToolbarItem>,
    pub side_by_side_fullscreen: bool,
    pub status: Vec<&'static str>,
    pub upload_image: bool,
    pub upload: UploadLimits,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::with_limits(UploadLimits::default())
    }
}

impl EditorConfig {
    pub fn with_limits(upload: UploadLimits) -> Self {
        use ToolbarItem::*;

        Self {
            spell_checker: false,
            autosave: Autosave {
                enabled: true,
                unique_id: "magdesk-article-editor".to_string(),
                delay: Duration::from_secs(5),
            },
            placeholder: "Write your article in Markdown...\n\n## Section\n\nText with **bold** and *italic*.".to_string(),
            toolbar: vec![
                Bold, Italic, Heading, Separator,
                Quote, UnorderedList, OrderedList, Separator,
                Link, Image, UploadImage, Table, Separator,
                Preview, SideBySide, Fullscreen, Separator,
                Guide, HighlightBox,
            ],
            side_by_side_fullscreen: false,
            status: vec!["autosave", "lines", "words", "upload-image"],
            upload_image: true,
            upload,
        }
    }

    /// `accept` 属性使用的类型列表
    pub fn image_accept(&self) -> String {
        self.upload.allowed_types.join(", ")
    }
}

/// 高亮框片段，选区为空时使用占位内容
pub fn highlight_box(selection: &str) -> String {
    let text = if selection.is_empty() {
        "Box content"
    } else {
        selection
    };

    format!("\n!!! note \"Box title\"\n{text}\n!!!\n")
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}
