// Custom Provider
//
// 构造时校验名称和配置形状；每次获取节点列表时重新解析来源，
// 逐个处理描述，无效节点记录日志后跳过。

use super::config::ProviderConfig;
use super::source::CustomParams;
use crate::atoms::NodeConfig;
use crate::error::{ConfigError, ProviderError};
use crate::molecules::node_pipeline::{NodeListReport, process_batch};
use async_trait::async_trait;
use serde_json::Value;

// 供下游（配置渲染等）使用的节点提供方接口
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    // 返回校验通过的节点，顺序与来源一致；数量可能少于来源中的描述数
    async fn get_node_list(
        &self,
        params: Option<CustomParams>,
    ) -> Result<Vec<NodeConfig>, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct CustomProvider {
    name: String,
    config: ProviderConfig,
}

impl CustomProvider {
    pub fn new(name: impl Into<String>, config: ProviderConfig) -> Result<Self, ConfigError> {
        let name = check_name(name.into())?;

        if let Some(underlying_proxy) = &config.underlying_proxy
            && underlying_proxy.trim().is_empty()
        {
            return Err(ConfigError::UnderlyingProxy { provider: name });
        }

        log::debug!(
            "创建 Provider {}（{}来源）",
            name,
            if config.node_list.is_dynamic() {
                "动态"
            } else {
                "静态"
            }
        );

        Ok(Self { name, config })
    }

    pub fn from_value(name: impl Into<String>, value: &Value) -> Result<Self, ConfigError> {
        let name = check_name(name.into())?;
        let config = ProviderConfig::from_value(&name, value)?;
        Self::new(name, config)
    }

    pub fn from_yaml_str(name: impl Into<String>, content: &str) -> Result<Self, ConfigError> {
        let name = check_name(name.into())?;
        let config = ProviderConfig::from_yaml_str(&name, content)?;
        Self::new(name, config)
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    // 与 get_node_list 相同，但额外返回每个失败节点的索引和原因
    pub async fn get_node_list_report(
        &self,
        params: Option<CustomParams>,
    ) -> Result<NodeListReport, ProviderError> {
        let descriptors = self.config.node_list.resolve(params).await?;
        Ok(process_batch(
            &self.name,
            descriptors,
            self.config.underlying_proxy.as_deref(),
        ))
    }
}

// 名称在解析配置之前检查，空白名称不会产生带空名的配置错误
fn check_name(name: String) -> Result<String, ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::EmptyName);
    }
    Ok(name)
}

#[async_trait]
impl Provider for CustomProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get_node_list(
        &self,
        params: Option<CustomParams>,
    ) -> Result<Vec<NodeConfig>, ProviderError> {
        Ok(self.get_node_list_report(params).await?.nodes)
    }
}
