// Provider 配置
//
// nodeList：节点描述数组（或代码中传入的动态来源）
// underlyingProxy：节点未声明时使用的默认前置代理
//
// 构造时只检查配置本身的形状，单个节点描述的内容在获取时逐个校验。

use super::source::{NodeSource, NodeSupplier};
use crate::error::ConfigError;
use serde_json::Value;

pub const NODE_LIST_FIELD: &str = "nodeList";
pub const UNDERLYING_PROXY_FIELD: &str = "underlyingProxy";

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub node_list: NodeSource,
    pub underlying_proxy: Option<String>,
}

impl ProviderConfig {
    pub fn from_nodes(nodes: Vec<Value>) -> Self {
        Self {
            node_list: NodeSource::Static(nodes),
            underlying_proxy: None,
        }
    }

    pub fn from_supplier(supplier: impl NodeSupplier + 'static) -> Self {
        Self {
            node_list: NodeSource::dynamic(supplier),
            underlying_proxy: None,
        }
    }

    pub fn with_underlying_proxy(mut self, underlying_proxy: impl Into<String>) -> Self {
        self.underlying_proxy = Some(underlying_proxy.into());
        self
    }

    pub fn from_value(provider: &str, value: &Value) -> Result<Self, ConfigError> {
        let fields = value.as_object().ok_or_else(|| ConfigError::NotAnObject {
            provider: provider.to_string(),
        })?;

        let node_list = match fields.get(NODE_LIST_FIELD) {
            Some(Value::Array(nodes)) => NodeSource::Static(nodes.clone()),
            Some(other) => {
                return Err(ConfigError::NodeList {
                    provider: provider.to_string(),
                    reason: format!("必须是数组，实际为 {}", type_name(other)),
                });
            }
            None => {
                return Err(ConfigError::NodeList {
                    provider: provider.to_string(),
                    reason: "缺失".to_string(),
                });
            }
        };

        let underlying_proxy = match fields.get(UNDERLYING_PROXY_FIELD) {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name.clone()),
            Some(_) => {
                return Err(ConfigError::UnderlyingProxy {
                    provider: provider.to_string(),
                });
            }
        };

        Ok(Self {
            node_list,
            underlying_proxy,
        })
    }

    pub fn from_yaml_str(provider: &str, content: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_yaml_ng::from_str(content).map_err(|source| ConfigError::Parse {
            provider: provider.to_string(),
            source,
        })?;
        Self::from_value(provider, &value)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "布尔值",
        Value::Number(_) => "数字",
        Value::String(_) => "字符串",
        Value::Array(_) => "数组",
        Value::Object(_) => "对象",
    }
}
