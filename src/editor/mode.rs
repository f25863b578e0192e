use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 编辑模式偏好在存储中的固定 key
pub const EDITOR_MODE_KEY: &str = "editor_mode";

/// 编辑模式：富文本编辑器或普通文本框
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorMode {
    #[default]
    #[serde(rename = "wysiwyg")]
    Rich,
    #[serde(rename = "plain")]
    Plain,
}

impl EditorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EditorMode::Rich => "wysiwyg",
            EditorMode::Plain => "plain",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            EditorMode::Rich => EditorMode::Plain,
            EditorMode::Plain => EditorMode::Rich,
        }
    }
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditorMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wysiwyg" => Ok(EditorMode::Rich),
            "plain" => Ok(EditorMode::Plain),
            _ => Err(Error::FormatError("unknown editor mode")),
        }
    }
}

/// 本地持久化的用户偏好，字符串键值对
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// 仅保存在内存中的偏好
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// 保存在 TOML 文件中的偏好，每次写入都会整体落盘
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    /// 打开偏好文件，文件不存在时视为空
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let values = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, values })
    }

    fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string(&self.values)?)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.persist()
    }
}

/// 按配置选用的偏好存储
#[derive(Debug, Clone)]
pub enum Preferences {
    Memory(MemoryPreferences),
    File(FilePreferences),
}

impl PreferenceStore for Preferences {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            Preferences::Memory(p) => p.get(key),
            Preferences::File(p) => p.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match self {
            Preferences::Memory(p) => p.set(key, value),
            Preferences::File(p) => p.set(key, value),
        }
    }
}

/// 读取保存的编辑模式，缺失或无法识别时使用默认的富文本模式
pub fn load_mode(prefs: &impl PreferenceStore) -> EditorMode {
    match prefs.get(EDITOR_MODE_KEY) {
        Some(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!(%value, "ignoring unknown editor mode");
            EditorMode::default()
        }),
        None => EditorMode::default(),
    }
}

pub fn store_mode(prefs: &mut impl PreferenceStore, mode: EditorMode) -> Result<()> {
    prefs.set(EDITOR_MODE_KEY, mode.as_str())
}
