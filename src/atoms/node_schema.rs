// 节点 schema
//
// 每种协议一个配置结构，负责定义必需/可选字段和取值范围。
// 校验通过后的节点统一表示为 NodeConfig。

pub mod fields;
pub mod http;
pub mod hysteria2;
pub mod shadowsocks;
pub mod shadowsocksr;
pub mod snell;
pub mod socks5;
pub mod transport;
pub mod trojan;
pub mod tuic;
pub mod vless;
pub mod vmess;
pub mod wireguard;

pub use http::{HttpConfig, HttpsConfig};
pub use hysteria2::Hysteria2Config;
pub use shadowsocks::ShadowsocksConfig;
pub use shadowsocksr::ShadowsocksrConfig;
pub use snell::SnellConfig;
pub use socks5::Socks5Config;
pub use transport::{GrpcOpts, H2Opts, HttpOpts, Network, WsOpts};
pub use trojan::TrojanConfig;
pub use tuic::TuicConfig;
pub use vless::VlessConfig;
pub use vmess::VmessConfig;
pub use wireguard::WireguardConfig;

use crate::atoms::NodeType;
use crate::error::SchemaError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// 所有协议共有的字段
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCommon {
    pub node_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlying_proxy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mptcp: Option<bool>,
}

impl NodeCommon {
    pub fn validate(&self) -> Result<(), SchemaError> {
        fields::check_not_blank("nodeName", &self.node_name)?;

        if let Some(underlying_proxy) = &self.underlying_proxy {
            fields::check_not_blank("underlyingProxy", underlying_proxy)?;
        }

        if let Some(test_url) = &self.test_url
            && !(test_url.starts_with("http://") || test_url.starts_with("https://"))
        {
            return Err(SchemaError::field(
                "testUrl",
                format!("必须是 http(s) 地址：{}", test_url),
            ));
        }

        Ok(())
    }
}

// 协议配置需要实现的接口
pub trait NodeSchema: DeserializeOwned + Serialize {
    const NODE_TYPE: NodeType;

    // 静态字段形状之外的取值约束
    fn validate(&self) -> Result<(), SchemaError> {
        Ok(())
    }
}

// 校验通过的单个节点：公共字段 + 协议字段
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node<T> {
    #[serde(flatten)]
    pub common: NodeCommon,
    #[serde(flatten)]
    pub protocol: T,
}

impl<T: NodeSchema> Node<T> {
    // 从描述对象解析并校验，错误中带有出错字段路径
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let common: NodeCommon = serde_path_to_error::deserialize(value)?;
        let protocol: T = serde_path_to_error::deserialize(value)?;

        common.validate()?;
        protocol.validate()?;

        Ok(Self { common, protocol })
    }

    pub fn node_type(&self) -> NodeType {
        T::NODE_TYPE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeConfig {
    Shadowsocks(Node<ShadowsocksConfig>),
    Shadowsocksr(Node<ShadowsocksrConfig>),
    Vmess(Node<VmessConfig>),
    Trojan(Node<TrojanConfig>),
    Socks5(Node<Socks5Config>),
    Http(Node<HttpConfig>),
    Https(Node<HttpsConfig>),
    Snell(Node<SnellConfig>),
    Tuic(Node<TuicConfig>),
    Wireguard(Node<WireguardConfig>),
    Hysteria2(Node<Hysteria2Config>),
    Vless(Node<VlessConfig>),
}

impl NodeConfig {
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeConfig::Shadowsocks(_) => NodeType::Shadowsocks,
            NodeConfig::Shadowsocksr(_) => NodeType::Shadowsocksr,
            NodeConfig::Vmess(_) => NodeType::Vmess,
            NodeConfig::Trojan(_) => NodeType::Trojan,
            NodeConfig::Socks5(_) => NodeType::Socks5,
            NodeConfig::Http(_) => NodeType::Http,
            NodeConfig::Https(_) => NodeType::Https,
            NodeConfig::Snell(_) => NodeType::Snell,
            NodeConfig::Tuic(_) => NodeType::Tuic,
            NodeConfig::Wireguard(_) => NodeType::Wireguard,
            NodeConfig::Hysteria2(_) => NodeType::Hysteria2,
            NodeConfig::Vless(_) => NodeType::Vless,
        }
    }

    pub fn common(&self) -> &NodeCommon {
        match self {
            NodeConfig::Shadowsocks(node) => &node.common,
            NodeConfig::Shadowsocksr(node) => &node.common,
            NodeConfig::Vmess(node) => &node.common,
            NodeConfig::Trojan(node) => &node.common,
            NodeConfig::Socks5(node) => &node.common,
            NodeConfig::Http(node) => &node.common,
            NodeConfig::Https(node) => &node.common,
            NodeConfig::Snell(node) => &node.common,
            NodeConfig::Tuic(node) => &node.common,
            NodeConfig::Wireguard(node) => &node.common,
            NodeConfig::Hysteria2(node) => &node.common,
            NodeConfig::Vless(node) => &node.common,
        }
    }

    fn common_mut(&mut self) -> &mut NodeCommon {
        match self {
            NodeConfig::Shadowsocks(node) => &mut node.common,
            NodeConfig::Shadowsocksr(node) => &mut node.common,
            NodeConfig::Vmess(node) => &mut node.common,
            NodeConfig::Trojan(node) => &mut node.common,
            NodeConfig::Socks5(node) => &mut node.common,
            NodeConfig::Http(node) => &mut node.common,
            NodeConfig::Https(node) => &mut node.common,
            NodeConfig::Snell(node) => &mut node.common,
            NodeConfig::Tuic(node) => &mut node.common,
            NodeConfig::Wireguard(node) => &mut node.common,
            NodeConfig::Hysteria2(node) => &mut node.common,
            NodeConfig::Vless(node) => &mut node.common,
        }
    }

    pub fn node_name(&self) -> &str {
        &self.common().node_name
    }

    pub fn underlying_proxy(&self) -> Option<&str> {
        self.common().underlying_proxy.as_deref()
    }

    // 节点自身未设置 underlyingProxy 时使用默认值，已设置的不覆盖
    pub fn with_default_underlying_proxy(mut self, default: Option<&str>) -> Self {
        if let Some(default) = default {
            let common = self.common_mut();
            if common.underlying_proxy.is_none() {
                common.underlying_proxy = Some(default.to_string());
            }
        }
        self
    }
}
