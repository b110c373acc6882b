// ShadowsocksR

use super::{NodeSchema, fields};
use crate::atoms::NodeType;
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};

const VALID_METHODS: &[&str] = &[
    "none",
    "table",
    "rc4",
    "rc4-md5",
    "rc4-md5-6",
    "aes-128-cfb",
    "aes-192-cfb",
    "aes-256-cfb",
    "aes-128-ctr",
    "aes-192-ctr",
    "aes-256-ctr",
    "bf-cfb",
    "camellia-128-cfb",
    "camellia-192-cfb",
    "camellia-256-cfb",
    "salsa20",
    "chacha20",
    "chacha20-ietf",
];

const VALID_PROTOCOLS: &[&str] = &[
    "origin",
    "auth_sha1_v4",
    "auth_aes128_md5",
    "auth_aes128_sha1",
    "auth_chain_a",
    "auth_chain_b",
];

const VALID_OBFS: &[&str] = &[
    "plain",
    "http_simple",
    "http_post",
    "random_head",
    "tls1.2_ticket_auth",
    "tls1.2_ticket_fastauth",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowsocksrConfig {
    pub hostname: String,
    #[serde(deserialize_with = "fields::de_port")]
    pub port: u16,
    pub method: String,
    pub password: String,
    pub protocol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protoparam: Option<String>,
    pub obfs: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obfsparam: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub udp_relay: Option<bool>,
}

impl NodeSchema for ShadowsocksrConfig {
    const NODE_TYPE: NodeType = NodeType::Shadowsocksr;

    fn validate(&self) -> Result<(), SchemaError> {
        fields::check_hostname("hostname", &self.hostname)?;
        fields::check_not_blank("password", &self.password)?;
        fields::check_one_of("method", &self.method, VALID_METHODS)?;
        fields::check_one_of("protocol", &self.protocol, VALID_PROTOCOLS)?;
        fields::check_one_of("obfs", &self.obfs, VALID_OBFS)?;
        Ok(())
    }
}
