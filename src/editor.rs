mod config;
mod mode;
mod uploader;
mod widget;

pub use self::{
    config::{Autosave, EditorConfig, ToolbarItem, highlight_box},
    mode::{
        EDITOR_MODE_KEY, EditorMode, FilePreferences, MemoryPreferences, PreferenceStore,
        Preferences, load_mode, store_mode,
    },
    uploader::EditorUploader,
    widget::{Editor, Widget, WidgetFactory},
};
