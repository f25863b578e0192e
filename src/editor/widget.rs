use super::{
    EditorConfig,
    mode::{EditorMode, PreferenceStore, load_mode, store_mode},
};
use crate::error::Result;

/// 第三方富文本组件实例
///
/// 对本 crate 而言是不透明资源，只需要读写内容和销毁。
pub trait Widget {
    fn value(&self) -> String;

    fn set_value(&mut self, value: &str);

    /// 释放组件（事件监听等），之后不会再被调用
    fn destroy(&mut self);
}

/// 负责在文本框上创建组件实例
pub trait WidgetFactory {
    type Widget: Widget;

    fn create(&self, config: &EditorConfig, initial: &str) -> Result<Self::Widget>;
}

/// 文章编辑器
///
/// 包装一个普通文本框，富文本模式下在其上挂载一个组件实例。
/// 同一时间最多持有一个实例，创建新实例前总会先销毁旧实例。
pub struct Editor<F: WidgetFactory, P: PreferenceStore> {
    factory: F,
    prefs: P,
    config: EditorConfig,
    instance: Option<F::Widget>,
    /// 页面加载时的初始内容
    initial: String,
    /// 文本框内容，富文本实例销毁时会写回这里
    textarea: String,
}

impl<F: WidgetFactory, P: PreferenceStore> Editor<F, P> {
    pub fn new(factory: F, prefs: P, config: EditorConfig, initial: impl Into<String>) -> Self {
        let initial = initial.into();

        Self {
            factory,
            prefs,
            config,
            instance: None,
            textarea: initial.clone(),
            initial,
        }
    }

    pub fn mode(&self) -> EditorMode {
        load_mode(&self.prefs)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn instance(&self) -> Option<&F::Widget> {
        self.instance.as_ref()
    }

    /// 按保存的模式初始化
    ///
    /// 普通模式返回 `None`，只使用文本框。
    pub fn init(&mut self) -> Result<Option<&mut F::Widget>> {
        let mode = self.mode();
        self.destroy();

        if mode == EditorMode::Plain {
            tracing::debug!("editor in plain mode");
            return Ok(None);
        }

        let widget = self.factory.create(&self.config, &self.textarea)?;
        tracing::debug!(%mode, "editor widget created");

        Ok(Some(self.instance.insert(widget)))
    }

    /// 销毁当前实例并把内容写回文本框，可以重复调用
    pub fn destroy(&mut self) {
        if let Some(mut widget) = self.instance.take() {
            self.textarea = widget.value();
            widget.destroy();
            tracing::debug!("editor widget destroyed");
        }
    }

    /// 切换并保存编辑模式，返回新模式
    ///
    /// 当前实例被丢弃，内容回到页面加载时的状态，相当于重新加载页面；
    /// 调用方随后应再次调用 [`Editor::init`]。
    pub fn toggle(&mut self) -> Result<EditorMode> {
        let mode = self.mode().toggled();
        store_mode(&mut self.prefs, mode)?;

        self.destroy();
        self.textarea = self.initial.clone();
        tracing::info!(%mode, "editor mode switched");

        Ok(mode)
    }

    /// 当前内容，两种模式下都可用
    pub fn content(&self) -> String {
        match &self.instance {
            Some(widget) => widget.value(),
            None => self.textarea.clone(),
        }
    }

    pub fn set_content(&mut self, content: &str) {
        match &mut self.instance {
            Some(widget) => widget.set_value(content),
            None => self.textarea = content.to_string(),
        }
    }
}

impl<F: WidgetFactory, P: PreferenceStore> Drop for Editor<F, P> {
    fn drop(&mut self) {
        self.destroy();
    }
}
