// WireGuard
//
// 连接目标由 peers[].endpoint 决定，没有顶层 hostname/port

use super::{NodeSchema, fields};
use crate::atoms::NodeType;
use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, Ipv6Addr};

const KEY_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireguardPeer {
    pub endpoint: String,
    pub public_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preshared_key: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_ips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keepalive: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserved_bits: Option<Vec<u8>>,
}

impl WireguardPeer {
    fn validate(&self, index: usize) -> Result<(), SchemaError> {
        let field = |name: &str| format!("peers.{}.{}", index, name);

        fields::check_endpoint(&field("endpoint"), &self.endpoint)?;
        fields::check_base64_key(&field("publicKey"), &self.public_key, &[KEY_LEN])?;

        if let Some(preshared_key) = &self.preshared_key {
            fields::check_base64_key(&field("presharedKey"), preshared_key, &[KEY_LEN])?;
        }

        if let Some(reserved_bits) = &self.reserved_bits
            && reserved_bits.len() != 3
        {
            return Err(SchemaError::field(
                field("reservedBits"),
                format!("必须是 3 个字节：{:?}", reserved_bits),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireguardConfig {
    pub self_ip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_ip_v6: Option<String>,
    pub private_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u16>,
    pub peers: Vec<WireguardPeer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dns_servers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefer_ipv6: Option<bool>,
}

impl NodeSchema for WireguardConfig {
    const NODE_TYPE: NodeType = NodeType::Wireguard;

    fn validate(&self) -> Result<(), SchemaError> {
        self.self_ip.parse::<Ipv4Addr>().map_err(|_| {
            SchemaError::field("selfIp", format!("不是有效的 IPv4 地址：{}", self.self_ip))
        })?;

        if let Some(self_ip_v6) = &self.self_ip_v6 {
            self_ip_v6.parse::<Ipv6Addr>().map_err(|_| {
                SchemaError::field("selfIpV6", format!("不是有效的 IPv6 地址：{}", self_ip_v6))
            })?;
        }

        fields::check_base64_key("privateKey", &self.private_key, &[KEY_LEN])?;

        if let Some(mtu) = self.mtu
            && !(576..=9000).contains(&mtu)
        {
            return Err(SchemaError::field(
                "mtu",
                format!("超出有效范围 576-9000：{}", mtu),
            ));
        }

        if self.peers.is_empty() {
            return Err(SchemaError::field("peers", "至少需要一个 peer"));
        }

        for (index, peer) in self.peers.iter().enumerate() {
            peer.validate(index)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::Node;
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use serde_json::{Value, json};

    fn key(byte: u8) -> String {
        BASE64.encode([byte; KEY_LEN])
    }

    fn wireguard(peers: Value) -> Value {
        json!({
            "nodeName": "wg",
            "selfIp": "172.16.0.2",
            "selfIpV6": "fd01:5ca1:ab1e::2",
            "privateKey": key(1),
            "mtu": 1280,
            "peers": peers,
            "dnsServers": ["1.1.1.1"],
        })
    }

    #[test]
    fn test_valid_node() {
        let value = wireguard(json!([{
            "endpoint": "engage.cloudflareclient.com:2408",
            "publicKey": key(2),
            "allowedIps": ["0.0.0.0/0", "::/0"],
            "reservedBits": [1, 2, 3],
        }]));
        match Node::<WireguardConfig>::from_value(&value) {
            Ok(node) => {
                assert_eq!(node.protocol.peers.len(), 1);
                assert_eq!(node.protocol.peers[0].allowed_ips.len(), 2);
            }
            Err(e) => panic!("{}", e),
        }
    }

    #[test]
    fn test_empty_peers_is_rejected() {
        match Node::<WireguardConfig>::from_value(&wireguard(json!([]))) {
            Err(e) => assert_eq!(e.field_path(), Some("peers")),
            Ok(node) => panic!("应校验失败：{:?}", node),
        }
    }

    #[test]
    fn test_peer_error_carries_index() {
        let value = wireguard(json!([
            { "endpoint": "a.example.com:2408", "publicKey": key(2) },
            { "endpoint": "b.example.com:2408", "publicKey": "short" },
        ]));
        match Node::<WireguardConfig>::from_value(&value) {
            Err(e) => assert_eq!(e.field_path(), Some("peers.1.publicKey")),
            Ok(node) => panic!("应校验失败：{:?}", node),
        }
    }

    #[test]
    fn test_invalid_self_ip() {
        let mut value = wireguard(json!([
            { "endpoint": "a.example.com:2408", "publicKey": key(2) },
        ]));
        value["selfIp"] = json!("fd01::2");
        match Node::<WireguardConfig>::from_value(&value) {
            Err(e) => assert_eq!(e.field_path(), Some("selfIp")),
            Ok(node) => panic!("应校验失败：{:?}", node),
        }
    }
}
