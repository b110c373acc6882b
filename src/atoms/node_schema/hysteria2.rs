// Hysteria2

use super::{NodeSchema, fields};
use crate::atoms::NodeType;
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hysteria2Obfs {
    Salamander,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hysteria2Config {
    pub hostname: String,
    #[serde(deserialize_with = "fields::de_port")]
    pub port: u16,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obfs: Option<Hysteria2Obfs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obfs_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sni: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_cert_verify: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpn: Option<Vec<String>>,
    // 单位 Mbps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_bandwidth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_bandwidth: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_hopping: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_hopping_interval: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub udp_relay: Option<bool>,
}

impl NodeSchema for Hysteria2Config {
    const NODE_TYPE: NodeType = NodeType::Hysteria2;

    fn validate(&self) -> Result<(), SchemaError> {
        fields::check_hostname("hostname", &self.hostname)?;
        fields::check_not_blank("password", &self.password)?;

        match (&self.obfs, &self.obfs_password) {
            (Some(Hysteria2Obfs::Salamander), None) => {
                return Err(SchemaError::field(
                    "obfsPassword",
                    "obfs 为 salamander 时必须设置",
                ));
            }
            (Some(_), Some(obfs_password)) => {
                fields::check_not_blank("obfsPassword", obfs_password)?;
            }
            (None, Some(_)) => {
                return Err(SchemaError::field("obfs", "设置了 obfsPassword 时必须设置"));
            }
            (None, None) => {}
        }

        if let Some(port_hopping) = &self.port_hopping {
            fields::check_port_hopping("portHopping", port_hopping)?;
        }

        if self.port_hopping_interval.is_some() && self.port_hopping.is_none() {
            return Err(SchemaError::field(
                "portHoppingInterval",
                "需要同时设置 portHopping",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::Node;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_node() {
        let result = Node::<Hysteria2Config>::from_value(&json!({
            "nodeName": "hy2",
            "hostname": "hy2.example.com",
            "port": 443,
            "password": "secret",
            "obfs": "salamander",
            "obfsPassword": "cry_me_a_r1ver",
            "uploadBandwidth": 50,
            "downloadBandwidth": 200,
        }));
        match result {
            Ok(node) => {
                assert_eq!(node.protocol.obfs, Some(Hysteria2Obfs::Salamander));
                assert_eq!(node.protocol.download_bandwidth, Some(200));
            }
            Err(e) => panic!("{}", e),
        }
    }

    #[test]
    fn test_salamander_requires_password() {
        let result = Node::<Hysteria2Config>::from_value(&json!({
            "nodeName": "hy2",
            "hostname": "hy2.example.com",
            "port": 443,
            "password": "secret",
            "obfs": "salamander",
        }));
        match result {
            Err(e) => assert_eq!(e.field_path(), Some("obfsPassword")),
            Ok(node) => panic!("应校验失败：{:?}", node),
        }
    }

    #[test]
    fn test_unknown_obfs_is_shape_error() {
        let result = Node::<Hysteria2Config>::from_value(&json!({
            "nodeName": "hy2",
            "hostname": "hy2.example.com",
            "port": 443,
            "password": "secret",
            "obfs": "xor",
        }));
        match result {
            Err(e) => assert_eq!(e.field_path(), Some("obfs")),
            Ok(node) => panic!("应校验失败：{:?}", node),
        }
    }
}
