use super::Client;
use crate::{
    error::Result,
    model::{Ack, ConfigItem, ConfigMap, ConfigUpdate},
};

/// 配置接口 `/config`
pub struct ConfigApi<'a> {
    client: &'a Client,
}

impl<'a> ConfigApi<'a> {
    pub(super) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub async fn get_all(&self) -> Result<ConfigMap> {
        let request = self.client.http().get(self.client.url("config"));
        self.client.send(request).await
    }

    /// 未设置的 key 由服务端返回默认值或空值
    pub async fn get(&self, key: &str) -> Result<ConfigItem> {
        let request = self
            .client
            .http()
            .get(self.client.url(format!("config/{}", urlencoding::encode(key))));

        self.client.send(request).await
    }

    pub async fn update(&self, data: &ConfigUpdate) -> Result<Ack> {
        let request = self.client.http().put(self.client.url("config")).json(data);
        self.client.send(request).await
    }
}
