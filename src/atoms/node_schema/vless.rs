// VLESS

use super::transport::{GrpcOpts, H2Opts, HttpOpts, Network, WsOpts};
use super::{NodeSchema, fields};
use crate::atoms::NodeType;
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};

const METHOD_NONE: &str = "none";
const FLOW_VISION: &str = "xtls-rprx-vision";

fn default_method() -> String {
    METHOD_NONE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealityOpts {
    pub public_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spider_x: Option<String>,
}

impl RealityOpts {
    fn validate(&self) -> Result<(), SchemaError> {
        fields::check_not_blank("realityOpts.publicKey", &self.public_key)?;

        if let Some(short_id) = &self.short_id
            && (short_id.len() > 16 || !short_id.chars().all(|c| c.is_ascii_hexdigit()))
        {
            return Err(SchemaError::field(
                "realityOpts.shortId",
                format!("必须是不超过 16 位的十六进制串：{}", short_id),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VlessConfig {
    pub hostname: String,
    #[serde(deserialize_with = "fields::de_port")]
    pub port: u16,
    pub uuid: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,
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
    pub client_fingerprint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reality_opts: Option<RealityOpts>,
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

impl NodeSchema for VlessConfig {
    const NODE_TYPE: NodeType = NodeType::Vless;

    fn validate(&self) -> Result<(), SchemaError> {
        fields::check_hostname("hostname", &self.hostname)?;
        fields::check_uuid("uuid", &self.uuid)?;
        fields::check_one_of("method", &self.method, &[METHOD_NONE])?;

        if let Some(flow) = &self.flow {
            fields::check_one_of("flow", flow, &[FLOW_VISION])?;
            if self.network != Network::Tcp {
                return Err(SchemaError::field(
                    "flow",
                    format!("{} 只能用于 tcp 传输", FLOW_VISION),
                ));
            }
        }

        match self.network {
            Network::Tcp | Network::Ws | Network::H2 | Network::Http | Network::Grpc => {}
            other => {
                return Err(SchemaError::field(
                    "network",
                    format!("VLESS 不支持 {}，可选：tcp, ws, h2, http, grpc", other.as_str()),
                ));
            }
        }

        if self.network == Network::Grpc && self.grpc_opts.is_none() {
            return Err(SchemaError::field("grpcOpts", "network 为 grpc 时必须设置"));
        }

        if let Some(reality_opts) = &self.reality_opts {
            reality_opts.validate()?;
        }
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

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::Node;
    use super::*;
    use serde_json::{Value, json};

    fn vless(extra: Value) -> Value {
        let mut value = json!({
            "nodeName": "vless",
            "hostname": "vless.example.com",
            "port": 443,
            "uuid": "1386f85e-657b-4d6e-9d56-78badb75e1fd",
        });
        if let (Some(target), Some(extra)) = (value.as_object_mut(), extra.as_object()) {
            target.extend(extra.clone());
        }
        value
    }

    #[test]
    fn test_reality_vision_node() {
        let value = vless(json!({
            "flow": "xtls-rprx-vision",
            "tls": true,
            "sni": "www.microsoft.com",
            "clientFingerprint": "chrome",
            "realityOpts": { "publicKey": "Z84J2IelR9ch3k8VtlVhhs5ycBUlXA7wHBWcBrjqnAw", "shortId": "6ba85179e30d4fc2" },
        }));
        match Node::<VlessConfig>::from_value(&value) {
            Ok(node) => {
                assert_eq!(node.protocol.method, "none");
                assert!(node.protocol.reality_opts.is_some());
            }
            Err(e) => panic!("{}", e),
        }
    }

    #[test]
    fn test_vision_requires_tcp() {
        let value = vless(json!({
            "flow": "xtls-rprx-vision",
            "network": "ws",
        }));
        match Node::<VlessConfig>::from_value(&value) {
            Err(e) => assert_eq!(e.field_path(), Some("flow")),
            Ok(node) => panic!("应校验失败：{:?}", node),
        }
    }

    #[test]
    fn test_method_must_be_none() {
        match Node::<VlessConfig>::from_value(&vless(json!({ "method": "auto" }))) {
            Err(e) => assert_eq!(e.field_path(), Some("method")),
            Ok(node) => panic!("应校验失败：{:?}", node),
        }
    }

    #[test]
    fn test_invalid_short_id() {
        let value = vless(json!({
            "realityOpts": { "publicKey": "key", "shortId": "xyz" },
        }));
        match Node::<VlessConfig>::from_value(&value) {
            Err(e) => assert_eq!(e.field_path(), Some("realityOpts.shortId")),
            Ok(node) => panic!("应校验失败：{:?}", node),
        }
    }
}
