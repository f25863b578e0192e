mod ack;
mod patch;
mod resource;

pub use self::{
    ack::{AddArticleAck, Ack, BatchUpload, BatchUploadError, BuildOutcome, BuildResult},
    patch::{ArticlePatch, ConfigUpdate, ImagePatch, MagazinePatch},
    resource::{
        Article, ArticleRef, ConfigItem, ConfigMap, Image, ImageRef, Magazine, MagazineRef,
        MagazineStatus,
    },
};

/// 后端分配的资源标识
pub type Id = i64;
