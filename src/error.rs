// 错误类型
//
// 分三层：
// - ConfigError：构造 Provider 时的配置错误，直接返回给调用方
// - NodeError：单个节点的处理错误，只丢弃该节点
// - ProviderError：获取节点来源失败，整次获取失败

use crate::atoms::NodeType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Provider 名称不能为空")]
    EmptyName,

    #[error("Provider {provider} 配置解析失败：{source}")]
    Parse {
        provider: String,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("Provider {provider} 配置无效：配置必须是对象")]
    NotAnObject { provider: String },

    #[error("Provider {provider} 配置无效：nodeList {reason}")]
    NodeList { provider: String, reason: String },

    #[error("Provider {provider} 配置无效：underlyingProxy 必须是字符串")]
    UnderlyingProxy { provider: String },
}

impl ConfigError {
    pub fn provider(&self) -> Option<&str> {
        match self {
            ConfigError::EmptyName => None,
            ConfigError::Parse { provider, .. }
            | ConfigError::NotAnObject { provider }
            | ConfigError::NodeList { provider, .. }
            | ConfigError::UnderlyingProxy { provider } => Some(provider),
        }
    }
}

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("节点描述必须是对象")]
    NotAnObject,

    #[error("旧版节点链接格式无效：{0}")]
    InvalidLegacyUri(String),

    #[error("{field} 已废弃，请使用 {replacement}")]
    DeprecatedField {
        field: &'static str,
        replacement: &'static str,
    },

    #[error("无法识别的节点类型：{}", .0.as_deref().unwrap_or("<未设置>"))]
    UnknownNodeType(Option<String>),

    #[error("{node_type} 节点校验失败：{source}")]
    Schema {
        node_type: NodeType,
        #[source]
        source: SchemaError,
    },

    #[error("Vmess 节点配置冲突：{0}")]
    VmessConflict(String),
}

#[derive(Debug, Error)]
pub enum SchemaError {
    // path 为 None 时错误发生在节点根部（例如缺少必需字段）
    #[error(
        "{}{source}",
        .path.as_ref().map(|p| format!("字段 {} 无效：", p)).unwrap_or_default()
    )]
    Shape {
        path: Option<String>,
        #[source]
        source: serde_json::Error,
    },

    #[error("字段 {field} 无效：{reason}")]
    Field { field: String, reason: String },
}

impl SchemaError {
    pub fn field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::Field {
            field: field.into(),
            reason: reason.into(),
        }
    }

    // 出错字段的路径，例如 "port"、"wsOpts.headers"
    pub fn field_path(&self) -> Option<&str> {
        match self {
            SchemaError::Shape { path, .. } => path.as_deref(),
            SchemaError::Field { field, .. } => Some(field),
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for SchemaError {
    fn from(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        SchemaError::Shape {
            path: (path != ".").then_some(path),
            source: err.into_inner(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    // 动态来源的错误原样透传
    #[error(transparent)]
    Source(#[from] anyhow::Error),
}
