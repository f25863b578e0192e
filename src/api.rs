mod articles;
mod config;
mod images;
mod magazines;
mod query;

use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    error::{Error, Result},
    settings::ApiSettings,
};

pub(crate) use self::images::with_article;

pub use self::{
    articles::Articles,
    config::ConfigApi,
    images::Images,
    magazines::Magazines,
    query::{ArticleFilter, ImageFilter},
};

/// 杂志后端的 HTTP 客户端
///
/// 无状态：不缓存、不去重、不重试、不设超时，每次调用都是一次独立的请求。
/// 按资源分组访问：
///
/// ```ignore
/// let client = Client::new("http://localhost:8000")?;
/// let articles = client.articles().list(&ArticleFilter::default()).await?;
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    origin: Arc<str>,
    base: Arc<str>,
}

impl Client {
    /// 使用默认配置连接指定站点
    pub fn new(origin: impl AsRef<str>) -> Result<Self> {
        Self::from_settings(&ApiSettings {
            origin: origin.as_ref().to_string(),
            ..Default::default()
        })
    }

    pub fn from_settings(settings: &ApiSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self::with_http(http, settings))
    }

    /// 复用已有的 [`reqwest::Client`]
    pub fn with_http(http: reqwest::Client, settings: &ApiSettings) -> Self {
        let origin = settings.origin.trim_end_matches('/');
        let root = settings.api_root.trim_matches('/');
        let base = if root.is_empty() {
            origin.to_string()
        } else {
            format!("{origin}/{root}")
        };

        Self {
            http,
            origin: Arc::from(origin),
            base: Arc::from(base),
        }
    }

    /// API 根地址，例如 `http://localhost:8000/api`
    pub fn base(&self) -> &str {
        &self.base
    }

    /// 站点根地址
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn articles(&self) -> Articles<'_> {
        Articles::new(self)
    }

    pub fn magazines(&self) -> Magazines<'_> {
        Magazines::new(self)
    }

    pub fn images(&self) -> Images<'_> {
        Images::new(self)
    }

    pub fn config(&self) -> ConfigApi<'_> {
        ConfigApi::new(self)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// 拼接资源地址：`{base}/{path}`
    pub(crate) fn url(&self, path: impl AsRef<str>) -> String {
        format!("{}/{}", self.base, path.as_ref().trim_start_matches('/'))
    }

    /// 发送请求并把成功响应解析为 JSON
    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.inspect_err(|e| {
            tracing::warn!(error = %e, "request not completed");
        })?;

        read_json(response).await
    }
}

/// 检查状态码并解析响应体
///
/// 非 2xx 状态统一转换为 [`Error::Api`]。
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    tracing::debug!(url = %response.url(), %status, "response");

    if !status.is_success() {
        let err = error_from_response(status, response).await;
        tracing::warn!(%status, error = %err, "request failed");
        return Err(err);
    }

    Ok(response.json().await?)
}

/// 失败响应体 `{"detail": ...}`
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    fn message(self) -> Option<String> {
        match self.detail? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }
}

/// 归一化失败响应
///
/// 优先取 JSON 中的 `detail`，无法解析或为空时退化为 `HTTP <code>`。
async fn error_from_response(status: StatusCode, response: Response) -> Error {
    let message = match response.bytes().await {
        Ok(body) => serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .and_then(ErrorBody::message),
        Err(_) => None,
    }
    .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    Error::Api { status, message }
}
