// Vmess
//
// host / path / wsHeaders 为旧版字段，由 vmess_fixup 统一迁移到传输层配置

use super::transport::{GrpcOpts, H2Opts, HttpOpts, Network, WsOpts};
use super::{NodeSchema, fields};
use crate::atoms::NodeType;
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VmessCipher {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "aes-128-gcm")]
    Aes128Gcm,
    #[serde(rename = "chacha20-poly1305")]
    Chacha20Poly1305,
    #[serde(rename = "none")]
    Plain,
    #[serde(rename = "zero")]
    Zero,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VmessConfig {
    pub hostname: String,
    #[serde(deserialize_with = "fields::de_port")]
    pub port: u16,
    pub uuid: String,
    #[serde(default, deserialize_with = "fields::de_lenient_u32")]
    pub alter_id: u32,
    #[serde(default)]
    pub method: VmessCipher,
    #[serde(default)]
    pub network: Network,
    #[serde(default)]
    pub tls: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpn: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls13: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws_headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws_opts: Option<WsOpts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h2_opts: Option<H2Opts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_opts: Option<HttpOpts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grpc_opts: Option<GrpcOpts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub udp_relay: Option<bool>,
}

impl NodeSchema for VmessConfig {
    const NODE_TYPE: NodeType = NodeType::Vmess;

    fn validate(&self) -> Result<(), SchemaError> {
        fields::check_hostname("hostname", &self.hostname)?;
        fields::check_uuid("uuid", &self.uuid)?;

        if let Some(ws_opts) = &self.ws_opts {
            ws_opts.validate()?;
        }
        if let Some(h2_opts) = &self.h2_opts {
            h2_opts.validate()?;
        }
        if let Some(http_opts) = &self.http_opts {
            http_opts.validate()?;
        }
        if let Some(grpc_opts) = &self.grpc_opts {
            grpc_opts.validate()?;
        }

        if self.network == Network::Grpc && self.grpc_opts.is_none() {
            return Err(SchemaError::field("grpcOpts", "network 为 grpc 时必须设置"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::Node;
    use super::*;
    use serde_json::{Value, json};

    fn parse(value: Value) -> Result<Node<VmessConfig>, SchemaError> {
        Node::<VmessConfig>::from_value(&value)
    }

    #[test]
    fn test_defaults() {
        let result = parse(json!({
            "nodeName": "vmess",
            "hostname": "v.example.com",
            "port": 443,
            "uuid": "1386f85e-657b-4d6e-9d56-78badb75e1fd",
        }));
        match result {
            Ok(node) => {
                assert_eq!(node.protocol.alter_id, 0);
                assert_eq!(node.protocol.method, VmessCipher::Auto);
                assert_eq!(node.protocol.network, Network::Tcp);
                assert!(!node.protocol.tls);
            }
            Err(e) => panic!("{}", e),
        }
    }

    #[test]
    fn test_alter_id_accepts_string() {
        let result = parse(json!({
            "nodeName": "vmess",
            "hostname": "v.example.com",
            "port": 443,
            "uuid": "1386f85e-657b-4d6e-9d56-78badb75e1fd",
            "alterId": "64",
            "method": "chacha20-poly1305",
        }));
        match result {
            Ok(node) => {
                assert_eq!(node.protocol.alter_id, 64);
                assert_eq!(node.protocol.method, VmessCipher::Chacha20Poly1305);
            }
            Err(e) => panic!("{}", e),
        }
    }

    #[test]
    fn test_invalid_uuid_is_rejected() {
        let result = parse(json!({
            "nodeName": "vmess",
            "hostname": "v.example.com",
            "port": 443,
            "uuid": "1386f85e",
        }));
        match result {
            Err(e) => assert_eq!(e.field_path(), Some("uuid")),
            Ok(node) => panic!("应校验失败：{:?}", node),
        }
    }

    #[test]
    fn test_nested_error_path() {
        let result = parse(json!({
            "nodeName": "vmess",
            "hostname": "v.example.com",
            "port": 443,
            "uuid": "1386f85e-657b-4d6e-9d56-78badb75e1fd",
            "network": "ws",
            "wsOpts": { "path": "/ws", "headers": { "Host": 1 } },
        }));
        match result {
            Err(e) => assert_eq!(e.field_path(), Some("wsOpts.headers.Host")),
            Ok(node) => panic!("应校验失败：{:?}", node),
        }
    }

    #[test]
    fn test_grpc_requires_grpc_opts() {
        let mut node = json!({
            "nodeName": "vmess",
            "hostname": "v.example.com",
            "port": 443,
            "uuid": "1386f85e-657b-4d6e-9d56-78badb75e1fd",
            "network": "grpc",
        });
        assert!(parse(node.clone()).is_err());

        node["grpcOpts"] = json!({ "serviceName": "vmess-grpc" });
        assert!(parse(node).is_ok());
    }
}
