// Trojan

use super::transport::{GrpcOpts, Network, WsOpts};
use super::{NodeSchema, fields};
use crate::atoms::NodeType;
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrojanConfig {
    pub hostname: String,
    #[serde(deserialize_with = "fields::de_port")]
    pub port: u16,
    pub password: String,
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
    pub network: Option<Network>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws_opts: Option<WsOpts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grpc_opts: Option<GrpcOpts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub udp_relay: Option<bool>,
}

impl NodeSchema for TrojanConfig {
    const NODE_TYPE: NodeType = NodeType::Trojan;

    fn validate(&self) -> Result<(), SchemaError> {
        fields::check_hostname("hostname", &self.hostname)?;
        fields::check_not_blank("password", &self.password)?;

        match self.network {
            None | Some(Network::Tcp) | Some(Network::Ws) => {}
            Some(Network::Grpc) if self.grpc_opts.is_none() => {
                return Err(SchemaError::field("grpcOpts", "network 为 grpc 时必须设置"));
            }
            Some(Network::Grpc) => {}
            Some(other) => {
                return Err(SchemaError::field(
                    "network",
                    format!("Trojan 不支持 {}，可选：tcp, ws, grpc", other.as_str()),
                ));
            }
        }

        if let Some(ws_opts) = &self.ws_opts {
            ws_opts.validate()?;
        }
        if let Some(grpc_opts) = &self.grpc_opts {
            grpc_opts.validate()?;
        }

        Ok(())
    }
}
