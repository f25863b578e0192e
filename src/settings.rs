use std::{
    env,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    editor::{FilePreferences, MemoryPreferences, Preferences},
    error::Result,
    upload::UploadLimits,
};

/// 客户端配置
///
/// 从 TOML 文件读取，缺失的段落和字段使用默认值。
///
/// ```toml
/// [api]
/// origin = "https://geko.example.org"
///
/// [upload]
/// max_file_size = 10485760
///
/// [editor]
/// preferences_path = "~/.config/magdesk/preferences.toml"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub upload: UploadLimits,
    pub editor: EditorSettings,
}

/// 后端地址相关配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// 后端站点根地址，例如 `http://localhost:8000`
    pub origin: String,
    /// JSON API 的固定前缀
    pub api_root: String,
    /// 编辑器图片上传接口，挂在站点根下而不是 API 前缀下
    pub upload_endpoint: String,
    pub user_agent: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8000".to_string(),
            api_root: "/api".to_string(),
            upload_endpoint: "/upload/image/editor".to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                .to_string(),
        }
    }
}

/// 编辑器相关配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// 编辑模式偏好的存放文件，未设置时仅保存在内存中
    pub preferences_path: Option<PathBuf>,
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml(&content)
    }

    /// 从环境变量加载配置
    ///
    /// - `MAGDESK_CONFIG`：配置文件路径，可选
    /// - `MAGDESK_ORIGIN`：覆盖 `api.origin`
    pub async fn from_env() -> Result<Self> {
        let mut settings = match env::var("MAGDESK_CONFIG") {
            Ok(path) => {
                tracing::debug!(%path, "loading settings");
                Self::load(path).await?
            }
            Err(_) => Self::default(),
        };

        if let Ok(origin) = env::var("MAGDESK_ORIGIN") {
            settings.api.origin = origin;
        }

        Ok(settings)
    }

    /// 打开编辑模式偏好存储，未配置文件路径时使用内存存储
    pub fn preferences(&self) -> Result<Preferences> {
        match &self.editor.preferences_path {
            Some(path) => Ok(Preferences::File(FilePreferences::open(path)?)),
            None => Ok(Preferences::Memory(MemoryPreferences::default())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{EditorMode, load_mode, store_mode};

    #[test]
    fn test_empty_toml_uses_defaults() {
        let settings = Settings::from_toml("").expect("Failed to parse settings");

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.api.api_root, "/api");
        assert_eq!(settings.upload.max_file_size, 10 * 1024 * 1024);
        assert!(settings.editor.preferences_path.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let settings = Settings::from_toml(
            r#"
            [api]
            origin = "https://geko.example.org"

            [upload]
            allowed_types = ["image/png"]
            "#,
        )
        .expect("Failed to parse settings");

        assert_eq!(settings.api.origin, "https://geko.example.org");
        assert_eq!(settings.api.upload_endpoint, "/upload/image/editor");
        assert_eq!(settings.upload.allowed_types, vec!["image/png"]);
        assert_eq!(settings.upload.max_file_size, 10 * 1024 * 1024);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(Settings::from_toml("[api\norigin = 1").is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("magdesk.toml");
        tokio::fs::write(&path, "[editor]\npreferences_path = \"/tmp/prefs.toml\"\n")
            .await
            .unwrap();

        let settings = Settings::load(&path).await.unwrap();
        assert_eq!(
            settings.editor.preferences_path.as_deref(),
            Some(Path::new("/tmp/prefs.toml"))
        );
    }

    #[test]
    fn test_preferences_follow_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs").join("editor.toml");

        let mut settings = Settings::default();
        assert!(matches!(settings.preferences().unwrap(), Preferences::Memory(_)));

        settings.editor.preferences_path = Some(path.clone());
        let mut prefs = settings.preferences().unwrap();
        assert!(matches!(prefs, Preferences::File(_)));
        store_mode(&mut prefs, EditorMode::Plain).unwrap();

        assert!(path.exists());
        assert_eq!(load_mode(&settings.preferences().unwrap()), EditorMode::Plain);
    }
}
