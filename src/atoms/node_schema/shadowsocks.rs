// Shadowsocks

use super::{NodeSchema, fields};
use crate::atoms::NodeType;
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShadowsocksCipher {
    #[serde(rename = "aes-128-gcm")]
    Aes128Gcm,
    #[serde(rename = "aes-192-gcm")]
    Aes192Gcm,
    #[serde(rename = "aes-256-gcm")]
    Aes256Gcm,
    #[serde(rename = "aes-128-cfb")]
    Aes128Cfb,
    #[serde(rename = "aes-192-cfb")]
    Aes192Cfb,
    #[serde(rename = "aes-256-cfb")]
    Aes256Cfb,
    #[serde(rename = "aes-128-ctr")]
    Aes128Ctr,
    #[serde(rename = "aes-192-ctr")]
    Aes192Ctr,
    #[serde(rename = "aes-256-ctr")]
    Aes256Ctr,
    #[serde(rename = "rc4-md5")]
    Rc4Md5,
    #[serde(rename = "chacha20")]
    Chacha20,
    #[serde(rename = "chacha20-ietf")]
    Chacha20Ietf,
    #[serde(rename = "xchacha20")]
    Xchacha20,
    #[serde(rename = "chacha20-ietf-poly1305")]
    Chacha20IetfPoly1305,
    #[serde(rename = "xchacha20-ietf-poly1305")]
    Xchacha20IetfPoly1305,
    #[serde(rename = "2022-blake3-aes-128-gcm")]
    Blake3Aes128Gcm,
    #[serde(rename = "2022-blake3-aes-256-gcm")]
    Blake3Aes256Gcm,
    #[serde(rename = "2022-blake3-chacha20-poly1305")]
    Blake3Chacha20Poly1305,
    #[serde(rename = "none")]
    Plain,
}

impl ShadowsocksCipher {
    // SIP022 密码为 Base64 编码的定长密钥
    fn key_len(self) -> Option<usize> {
        match self {
            ShadowsocksCipher::Blake3Aes128Gcm => Some(16),
            ShadowsocksCipher::Blake3Aes256Gcm | ShadowsocksCipher::Blake3Chacha20Poly1305 => {
                Some(32)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowsocksObfs {
    Tls,
    Http,
    Ws,
    Wss,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowsocksConfig {
    pub hostname: String,
    #[serde(deserialize_with = "fields::de_port")]
    pub port: u16,
    pub method: ShadowsocksCipher,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obfs: Option<ShadowsocksObfs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obfs_host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obfs_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls13: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ws_headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub udp_relay: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tfo: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mux: Option<bool>,
}

impl NodeSchema for ShadowsocksConfig {
    const NODE_TYPE: NodeType = NodeType::Shadowsocks;

    fn validate(&self) -> Result<(), SchemaError> {
        fields::check_hostname("hostname", &self.hostname)?;
        fields::check_not_blank("password", &self.password)?;

        if let Some(key_len) = self.method.key_len() {
            fields::check_base64_key("password", &self.password, &[key_len])?;
        }

        if self.obfs.is_none() {
            if self.obfs_host.is_some() {
                return Err(SchemaError::field("obfsHost", "需要同时设置 obfs"));
            }
            if self.obfs_uri.is_some() {
                return Err(SchemaError::field("obfsUri", "需要同时设置 obfs"));
            }
        }

        if let Some(obfs_uri) = &self.obfs_uri
            && !obfs_uri.starts_with('/')
        {
            return Err(SchemaError::field(
                "obfsUri",
                format!("必须以 / 开头：{}", obfs_uri),
            ));
        }

        Ok(())
    }
}
