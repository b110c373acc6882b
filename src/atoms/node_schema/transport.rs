// 传输层配置（ws / h2 / http / grpc）

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Tcp,
    Ws,
    H2,
    Http,
    Grpc,
    Quic,
    Httpupgrade,
}

impl Network {
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Tcp => "tcp",
            Network::Ws => "ws",
            Network::H2 => "h2",
            Network::Http => "http",
            Network::Grpc => "grpc",
            Network::Quic => "quic",
            Network::Httpupgrade => "httpupgrade",
        }
    }
}

pub(crate) fn default_path() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WsOpts {
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct H2Opts {
    #[serde(default = "default_path")]
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub host: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpOpts {
    #[serde(default = "default_http_method")]
    pub method: String,
    #[serde(default = "default_http_path")]
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, Vec<String>>>,
}

fn default_http_method() -> String {
    "GET".to_string()
}

fn default_http_path() -> Vec<String> {
    vec![default_path()]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrpcOpts {
    pub service_name: String,
}

fn check_path(field: &str, path: &str) -> Result<(), SchemaError> {
    if !path.starts_with('/') {
        return Err(SchemaError::field(field, format!("必须以 / 开头：{}", path)));
    }
    Ok(())
}

impl WsOpts {
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_path("wsOpts.path", &self.path)
    }
}

impl H2Opts {
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_path("h2Opts.path", &self.path)
    }
}

impl HttpOpts {
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.path.is_empty() {
            return Err(SchemaError::field("httpOpts.path", "不能为空"));
        }
        self.path
            .iter()
            .try_for_each(|path| check_path("httpOpts.path", path))
    }
}

impl GrpcOpts {
    pub fn validate(&self) -> Result<(), SchemaError> {
        super::fields::check_not_blank("grpcOpts.serviceName", &self.service_name)
    }
}
