// Snell

use super::{NodeSchema, fields};
use crate::atoms::NodeType;
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnellObfs {
    Http,
    Tls,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnellConfig {
    pub hostname: String,
    #[serde(deserialize_with = "fields::de_port")]
    pub port: u16,
    pub psk: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obfs: Option<SnellObfs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obfs_host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reuse: Option<bool>,
}

impl NodeSchema for SnellConfig {
    const NODE_TYPE: NodeType = NodeType::Snell;

    fn validate(&self) -> Result<(), SchemaError> {
        fields::check_hostname("hostname", &self.hostname)?;
        fields::check_not_blank("psk", &self.psk)?;

        if let Some(version) = self.version
            && !(1..=4).contains(&version)
        {
            return Err(SchemaError::field(
                "version",
                format!("只支持 1-4：{}", version),
            ));
        }

        if self.obfs_host.is_some() && self.obfs.is_none() {
            return Err(SchemaError::field("obfsHost", "需要同时设置 obfs"));
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
        let result = Node::<SnellConfig>::from_value(&json!({
            "nodeName": "snell",
            "hostname": "snell.example.com",
            "port": 44046,
            "psk": "yourpsk",
            "version": 4,
            "obfs": "http",
            "obfsHost": "www.bing.com",
        }));
        match result {
            Ok(node) => assert_eq!(node.protocol.obfs, Some(SnellObfs::Http)),
            Err(e) => panic!("{}", e),
        }
    }

    #[test]
    fn test_unsupported_version_is_rejected() {
        let result = Node::<SnellConfig>::from_value(&json!({
            "nodeName": "snell",
            "hostname": "snell.example.com",
            "port": 44046,
            "psk": "yourpsk",
            "version": 5,
        }));
        match result {
            Err(e) => assert_eq!(e.field_path(), Some("version")),
            Ok(node) => panic!("应校验失败：{:?}", node),
        }
    }
}
