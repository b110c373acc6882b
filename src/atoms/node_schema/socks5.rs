// SOCKS5

use super::{NodeSchema, fields};
use crate::atoms::NodeType;
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Socks5Config {
    pub hostname: String,
    #[serde(deserialize_with = "fields::de_port")]
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub udp_relay: Option<bool>,
}

impl NodeSchema for Socks5Config {
    const NODE_TYPE: NodeType = NodeType::Socks5;

    fn validate(&self) -> Result<(), SchemaError> {
        fields::check_hostname("hostname", &self.hostname)?;
        fields::check_credentials(self.username.as_deref(), self.password.as_deref())?;

        if self.tls != Some(true) && (self.sni.is_some() || self.skip_cert_verify.is_some()) {
            return Err(SchemaError::field("tls", "设置了 sni / skipCertVerify 时必须启用"));
        }

        Ok(())
    }
}
